use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use lithia_core::Money;
use lithia_sales::TransactionRecord;

/// A record that contributes a sale amount to a report.
pub trait SaleAmount {
    fn amount(&self) -> Money;
}

/// Sales of one business day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySales {
    pub date: NaiveDate,
    pub sales: Money,
    pub transactions: u32,
}

impl SaleAmount for DailySales {
    fn amount(&self) -> Money {
        self.sales
    }
}

/// Units and revenue of one product over the report window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSales {
    pub name: String,
    pub quantity: u32,
    pub revenue: Money,
}

impl SaleAmount for ProductSales {
    fn amount(&self) -> Money {
        self.revenue
    }
}

impl SaleAmount for TransactionRecord {
    fn amount(&self) -> Money {
        self.total
    }
}

impl<T: SaleAmount + ?Sized> SaleAmount for &T {
    fn amount(&self) -> Money {
        (**self).amount()
    }
}

/// Sum of all amounts, rounded to cents.
pub fn total_sales<R: SaleAmount>(records: &[R]) -> Money {
    records.iter().map(SaleAmount::amount).sum::<Money>().rounded()
}

/// Mean amount per record, rounded to cents; zero for no records.
pub fn average_transaction<R: SaleAmount>(records: &[R]) -> Money {
    let total: Money = records.iter().map(SaleAmount::amount).sum();
    total
        .checked_div_count(records.len() as u64)
        .map_or(Money::ZERO, Money::rounded)
}

/// Record with the highest amount; the first one wins ties.
pub fn best_day<R: SaleAmount>(records: &[R]) -> Option<&R> {
    let mut best: Option<&R> = None;
    for record in records {
        match best {
            Some(current) if record.amount() <= current.amount() => {}
            _ => best = Some(record),
        }
    }
    best
}

/// Average ticket across days: total sales / total transactions (zero when
/// no transactions were made).
pub fn average_ticket(days: &[DailySales]) -> Money {
    let transactions: u64 = days.iter().map(|day| u64::from(day.transactions)).sum();
    let sales: Money = days.iter().map(SaleAmount::amount).sum();
    sales
        .checked_div_count(transactions)
        .map_or(Money::ZERO, Money::rounded)
}

/// Product with the highest revenue; the first one wins ties.
pub fn top_product(products: &[ProductSales]) -> Option<&ProductSales> {
    best_day(products)
}

pub fn units_sold(products: &[ProductSales]) -> u64 {
    products.iter().map(|p| u64::from(p.quantity)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn day(d: u32, sales: Money, transactions: u32) -> DailySales {
        DailySales {
            date: NaiveDate::from_ymd_opt(2024, 6, d).unwrap(),
            sales,
            transactions,
        }
    }

    fn week() -> Vec<DailySales> {
        vec![
            day(7, Money::new(dec!(1250.75)), 45),
            day(8, Money::new(dec!(980.50)), 38),
            day(9, Money::new(dec!(1180.25)), 42),
            day(10, Money::new(dec!(1450.00)), 52),
            day(11, Money::new(dec!(1320.75)), 48),
            day(12, Money::new(dec!(1680.25)), 61),
            day(13, Money::new(dec!(1580.50)), 55),
        ]
    }

    #[test]
    fn weekly_totals() {
        let days = week();
        assert_eq!(total_sales(&days), Money::new(dec!(9443.00)));
        assert_eq!(average_transaction(&days), Money::new(dec!(1349.00)));
        // 9443.00 / 341
        assert_eq!(average_ticket(&days), Money::new(dec!(27.69)));
    }

    #[test]
    fn best_day_is_highest_sales() {
        let days = week();
        assert_eq!(best_day(&days).unwrap().date.to_string(), "2024-06-12");
    }

    #[test]
    fn best_day_tie_keeps_first_occurrence() {
        let days = vec![
            day(1, Money::new(dec!(10)), 1),
            day(2, Money::new(dec!(20)), 1),
            day(3, Money::new(dec!(20)), 1),
        ];
        assert_eq!(best_day(&days).unwrap().date.to_string(), "2024-06-02");
    }

    #[test]
    fn empty_input_yields_zero_or_none() {
        let none: Vec<DailySales> = Vec::new();
        assert_eq!(total_sales(&none), Money::ZERO);
        assert_eq!(average_transaction(&none), Money::ZERO);
        assert_eq!(average_ticket(&none), Money::ZERO);
        assert!(best_day(&none).is_none());
    }

    #[test]
    fn zero_transactions_average_ticket_is_zero() {
        let days = vec![day(1, Money::new(dec!(10)), 0)];
        assert_eq!(average_ticket(&days), Money::ZERO);
    }

    #[test]
    fn product_stats() {
        let products = vec![
            ProductSales {
                name: "Premium Coffee".to_string(),
                quantity: 156,
                revenue: Money::new(dec!(778.44)),
            },
            ProductSales {
                name: "Sandwich".to_string(),
                quantity: 89,
                revenue: Money::new(dec!(800.11)),
            },
            ProductSales {
                name: "Pastry".to_string(),
                quantity: 134,
                revenue: Money::new(dec!(469.00)),
            },
        ];
        assert_eq!(top_product(&products).unwrap().name, "Sandwich");
        assert_eq!(units_sold(&products), 379);
        assert!(top_product(&[]).is_none());
    }
}
