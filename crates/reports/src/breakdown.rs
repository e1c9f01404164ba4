//! Sales-by-category breakdown.
//!
//! Percentages are shown with one decimal. Rounding each share on its own can
//! make the column add up to 99.9 or 100.1, so shares are apportioned with the
//! largest-remainder method: every share is floored to 0.1 and the missing
//! tenths go to the shares with the largest remainders (earlier categories
//! first on equal remainders). The column then sums to exactly 100.0 whenever
//! the grand total is positive.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use lithia_core::Money;

use crate::stats::SaleAmount;

/// Sales amount recorded against a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySales {
    pub category: String,
    pub sales: Money,
}

impl SaleAmount for CategorySales {
    fn amount(&self) -> Money {
        self.sales
    }
}

/// One row of the breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: String,
    pub sales: Money,
    /// Percent of the grand total, one decimal place.
    pub percentage: Decimal,
}

/// Group sales by category (first-seen order) and compute each category's
/// share of the grand total.
pub fn category_breakdown(records: &[CategorySales]) -> Vec<CategoryShare> {
    let mut groups: Vec<(String, Money)> = Vec::new();
    for record in records {
        match groups.iter_mut().find(|(category, _)| *category == record.category) {
            Some((_, sum)) => *sum += record.sales,
            None => groups.push((record.category.clone(), record.sales)),
        }
    }

    let grand_total: Money = groups.iter().map(|(_, sum)| *sum).sum();
    let percentages = apportion_tenths(&groups, grand_total);

    groups
        .into_iter()
        .zip(percentages)
        .map(|((category, sales), percentage)| CategoryShare {
            category,
            sales: sales.rounded(),
            percentage,
        })
        .collect()
}

fn apportion_tenths(groups: &[(String, Money)], grand_total: Money) -> Vec<Decimal> {
    if grand_total.is_zero() || grand_total.is_negative() {
        return vec![Decimal::ZERO; groups.len()];
    }

    let ten = Decimal::TEN;
    // Exact shares in tenths of a percent.
    let exact: Vec<Decimal> = groups
        .iter()
        .map(|(_, sum)| sum.share_of(grand_total) * ten)
        .collect();
    let mut tenths: Vec<Decimal> = exact.iter().map(|share| share.floor()).collect();

    let allotted: Decimal = tenths.iter().copied().sum();
    let mut missing = Decimal::ONE_THOUSAND - allotted;

    let mut order: Vec<usize> = (0..exact.len()).collect();
    // Stable sort keeps first-seen order among equal remainders.
    order.sort_by(|a, b| {
        let ra = exact[*a] - tenths[*a];
        let rb = exact[*b] - tenths[*b];
        rb.cmp(&ra)
    });
    for idx in order {
        if missing <= Decimal::ZERO {
            break;
        }
        tenths[idx] += Decimal::ONE;
        missing -= Decimal::ONE;
    }

    tenths.into_iter().map(|t| t / ten).collect()
}
