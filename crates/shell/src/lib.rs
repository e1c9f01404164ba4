//! Point-of-sale app shell.
//!
//! Owns one store per screen, the navigation state and the sample data the
//! screens start from. A presentation layer drives a [`Session`] and renders
//! its view-models.

pub mod page;
pub mod seed;
pub mod session;

pub use page::Page;
pub use session::{DashboardStats, SaleRequest, Session};
