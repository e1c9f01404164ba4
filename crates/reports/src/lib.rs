//! Reports domain module.
//!
//! Summary statistics for the reports, transactions and inventory screens.
//! Every reducer is a single linear pass over a fixed slice of records and
//! never fails: empty input yields zeros / `None`, not a division error.

pub mod breakdown;
pub mod stats;
pub mod summary;

pub use breakdown::{CategorySales, CategoryShare, category_breakdown};
pub use stats::{
    DailySales, ProductSales, SaleAmount, average_ticket, average_transaction, best_day,
    top_product, total_sales, units_sold,
};
pub use summary::{
    InventorySummary, ReportData, SalesOverview, SalesReport, TransactionSummary,
};
