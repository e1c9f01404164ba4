//! `lithia-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by every screen of the
//! point-of-sale shell (no IO, no rendering).

pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod reducer;

pub use entity::{Entity, next_id};
pub use error::{DomainError, DomainResult};
pub use id::{CustomerId, ItemId, MovementId, PurchaseId, TaxRateId, UserId};
pub use money::Money;
pub use reducer::Reducer;
