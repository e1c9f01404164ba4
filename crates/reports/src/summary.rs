use serde::{Deserialize, Serialize};

use lithia_core::Money;
use lithia_inventory::{Inventory, StockStatus};
use lithia_sales::{TransactionRecord, TransactionStatus};

use crate::breakdown::{CategorySales, CategoryShare, category_breakdown};
use crate::stats::{
    DailySales, ProductSales, average_ticket, average_transaction, best_day, top_product,
    total_sales, units_sold,
};

/// Stat cards of the transactions screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSummary {
    pub count: usize,
    pub revenue: Money,
    pub completed: usize,
    pub average_value: Money,
}

impl TransactionSummary {
    /// Summarize the (already filtered) transactions on screen.
    pub fn from_records(records: &[&TransactionRecord]) -> Self {
        Self {
            count: records.len(),
            revenue: total_sales(records),
            completed: records
                .iter()
                .filter(|record| record.status == TransactionStatus::Completed)
                .count(),
            average_value: average_transaction(records),
        }
    }
}

/// Header stats of the sales report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesOverview {
    pub total_sales: Money,
    pub total_transactions: u64,
    pub average_ticket: Money,
    pub best_day: Option<DailySales>,
}

impl SalesOverview {
    pub fn from_days(days: &[DailySales]) -> Self {
        Self {
            total_sales: total_sales(days),
            total_transactions: days.iter().map(|day| u64::from(day.transactions)).sum(),
            average_ticket: average_ticket(days),
            best_day: best_day(days).cloned(),
        }
    }
}

/// Raw series behind the reports screen for the selected period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportData {
    pub daily: Vec<DailySales>,
    pub products: Vec<ProductSales>,
    pub categories: Vec<CategorySales>,
}

/// Everything the sales report shows, derived from [`ReportData`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesReport {
    pub overview: SalesOverview,
    pub top_product: Option<ProductSales>,
    pub units_sold: u64,
    pub categories: Vec<CategoryShare>,
}

impl SalesReport {
    pub fn build(data: &ReportData) -> Self {
        Self {
            overview: SalesOverview::from_days(&data.daily),
            top_product: top_product(&data.products).cloned(),
            units_sold: units_sold(&data.products),
            categories: category_breakdown(&data.categories),
        }
    }
}

/// Inventory report / inventory stat cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySummary {
    pub total_items: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
    pub stock_value: Money,
}

impl InventorySummary {
    pub fn from_inventory(inventory: &Inventory) -> Self {
        let mut low_stock = 0;
        let mut out_of_stock = 0;
        for record in inventory.records() {
            match record.status() {
                StockStatus::LowStock => low_stock += 1,
                StockStatus::OutOfStock => out_of_stock += 1,
                StockStatus::InStock => {}
            }
        }
        Self {
            total_items: inventory.records().len(),
            low_stock,
            out_of_stock,
            stock_value: inventory.total_value(),
        }
    }
}
