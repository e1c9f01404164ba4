use serde::{Deserialize, Serialize};

/// Stock classification of an inventory record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    /// Whether the record belongs in the low-stock alert list.
    pub fn needs_attention(&self) -> bool {
        matches!(self, StockStatus::LowStock | StockStatus::OutOfStock)
    }
}

/// Three-way threshold rule:
///
/// - `OutOfStock` iff `current_stock == 0`
/// - `LowStock` iff `0 < current_stock <= min_stock`
/// - `InStock` otherwise
pub fn classify(current_stock: u32, min_stock: u32) -> StockStatus {
    if current_stock == 0 {
        StockStatus::OutOfStock
    } else if current_stock <= min_stock {
        StockStatus::LowStock
    } else {
        StockStatus::InStock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn below_minimum_is_low_stock() {
        assert_eq!(classify(8, 15), StockStatus::LowStock);
    }

    #[test]
    fn empty_is_out_of_stock() {
        assert_eq!(classify(0, 15), StockStatus::OutOfStock);
        assert_eq!(classify(0, 0), StockStatus::OutOfStock);
    }

    #[test]
    fn minimum_itself_is_low_stock() {
        assert_eq!(classify(15, 15), StockStatus::LowStock);
        assert_eq!(classify(16, 15), StockStatus::InStock);
    }

    #[test]
    fn serializes_in_snake_case() {
        let json = serde_json::to_string(&StockStatus::OutOfStock).unwrap();
        assert_eq!(json, "\"out_of_stock\"");
    }

    proptest! {
        /// Property: every stock level maps to exactly the status its
        /// defining predicate selects.
        #[test]
        fn classification_is_total_and_exclusive(stock in 0u32..10_000, min in 0u32..10_000) {
            let status = classify(stock, min);
            let out = stock == 0;
            let low = stock > 0 && stock <= min;
            let ok = stock > min && stock > 0;

            prop_assert_eq!([out, low, ok].iter().filter(|b| **b).count(), 1);
            prop_assert_eq!(status == StockStatus::OutOfStock, out);
            prop_assert_eq!(status == StockStatus::LowStock, low);
            prop_assert_eq!(status == StockStatus::InStock, ok);
        }
    }
}
