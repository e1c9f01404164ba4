//! Customer directory (the customers screen).
//!
//! Pure view-model logic over the in-memory customer list and purchase
//! history; no IO, no rendering.

pub mod customer;

pub use customer::{
    Customer, CustomerAction, CustomerDirectory, CustomerForm, CustomerPurchase, CustomerStats,
    CustomerStatus,
};
