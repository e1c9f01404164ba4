//! Products / catalog domain module.
//!
//! This crate contains the catalog of sellable items and the products screen
//! view-model, implemented purely as deterministic domain logic (no IO, no
//! rendering, no storage).

pub mod catalog;

pub use catalog::{Catalog, CatalogAction, CatalogItem, LOW_STOCK_BADGE, ProductForm};
