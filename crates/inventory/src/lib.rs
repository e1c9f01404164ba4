//! Inventory domain module.
//!
//! This crate contains the stock rules of the inventory screen (status
//! derivation, clamped adjustments, the movement log), implemented purely as
//! deterministic domain logic (no IO, no rendering, no storage).

pub mod movement;
pub mod record;
pub mod status;
pub mod view;

pub use movement::{MovementKind, StockMovement};
pub use record::{InventoryRecord, InventoryRecordFields};
pub use status::{StockStatus, classify};
pub use view::{Inventory, InventoryAction, StockAdjustment};
