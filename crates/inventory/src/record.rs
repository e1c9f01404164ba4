use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use lithia_core::{DomainError, DomainResult, Entity, ItemId, Money};

use crate::status::{StockStatus, classify};

/// Everything needed to create an inventory record; the status is derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecordFields {
    pub id: ItemId,
    pub name: String,
    pub sku: String,
    pub category: String,
    pub current_stock: u32,
    pub min_stock: u32,
    pub max_stock: u32,
    pub unit: String,
    pub cost_price: Money,
    pub selling_price: Money,
    pub supplier: String,
    pub last_restocked: NaiveDate,
}

/// A stocked product with its thresholds.
///
/// `status` is never set directly: it is computed at construction and after
/// every stock change. Deserializing goes through [`InventoryRecordFields`], so
/// a serialized status is ignored and re-derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "InventoryRecordFields")]
pub struct InventoryRecord {
    id: ItemId,
    name: String,
    sku: String,
    category: String,
    current_stock: u32,
    min_stock: u32,
    max_stock: u32,
    unit: String,
    cost_price: Money,
    selling_price: Money,
    supplier: String,
    last_restocked: NaiveDate,
    status: StockStatus,
}

impl InventoryRecord {
    pub fn new(fields: InventoryRecordFields) -> DomainResult<Self> {
        if fields.sku.trim().is_empty() {
            return Err(DomainError::validation("sku cannot be empty"));
        }
        if fields.max_stock < fields.min_stock {
            return Err(DomainError::invariant("max_stock must be >= min_stock"));
        }
        if fields.cost_price.is_negative() || fields.selling_price.is_negative() {
            return Err(DomainError::validation("prices cannot be negative"));
        }

        Ok(Self {
            status: classify(fields.current_stock, fields.min_stock),
            id: fields.id,
            name: fields.name,
            sku: fields.sku,
            category: fields.category,
            current_stock: fields.current_stock,
            min_stock: fields.min_stock,
            max_stock: fields.max_stock,
            unit: fields.unit,
            cost_price: fields.cost_price,
            selling_price: fields.selling_price,
            supplier: fields.supplier,
            last_restocked: fields.last_restocked,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn current_stock(&self) -> u32 {
        self.current_stock
    }

    pub fn min_stock(&self) -> u32 {
        self.min_stock
    }

    pub fn max_stock(&self) -> u32 {
        self.max_stock
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn cost_price(&self) -> Money {
        self.cost_price
    }

    pub fn selling_price(&self) -> Money {
        self.selling_price
    }

    pub fn supplier(&self) -> &str {
        &self.supplier
    }

    pub fn last_restocked(&self) -> NaiveDate {
        self.last_restocked
    }

    pub fn status(&self) -> StockStatus {
        self.status
    }

    /// Stock value at cost (unrounded).
    pub fn stock_value(&self) -> Money {
        self.cost_price.times(self.current_stock)
    }

    /// Apply a signed stock change, flooring at zero.
    ///
    /// Removing more than is on hand empties the record; it is not an error.
    pub fn adjust_stock(&self, delta: i64, reason: &str) -> InventoryRecord {
        let target = i64::from(self.current_stock).saturating_add(delta);
        let new_stock = u32::try_from(target.max(0)).unwrap_or(u32::MAX);

        tracing::debug!(
            sku = %self.sku,
            delta,
            reason,
            from = self.current_stock,
            to = new_stock,
            "stock adjusted"
        );

        InventoryRecord {
            current_stock: new_stock,
            status: classify(new_stock, self.min_stock),
            ..self.clone()
        }
    }
}

impl Entity for InventoryRecord {
    type Id = ItemId;

    fn id(&self) -> ItemId {
        self.id
    }
}

impl TryFrom<InventoryRecordFields> for InventoryRecord {
    type Error = DomainError;

    fn try_from(fields: InventoryRecordFields) -> Result<Self, Self::Error> {
        InventoryRecord::new(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn fields_with(stock: u32, min: u32) -> InventoryRecordFields {
        InventoryRecordFields {
            id: ItemId::new(2),
            name: "Sandwich Bread".to_string(),
            sku: "BRD-001".to_string(),
            category: "Food".to_string(),
            current_stock: stock,
            min_stock: min,
            max_stock: 50,
            unit: "pcs".to_string(),
            cost_price: Money::new(dec!(2.00)),
            selling_price: Money::new(dec!(3.50)),
            supplier: "Bakery Plus".to_string(),
            last_restocked: NaiveDate::from_ymd_opt(2024, 6, 12).unwrap(),
        }
    }

    fn record(stock: u32, min: u32) -> InventoryRecord {
        InventoryRecord::new(fields_with(stock, min)).unwrap()
    }

    #[test]
    fn status_is_derived_on_creation() {
        assert_eq!(record(8, 15).status(), StockStatus::LowStock);
        assert_eq!(record(0, 15).status(), StockStatus::OutOfStock);
        assert_eq!(record(45, 15).status(), StockStatus::InStock);
    }

    #[test]
    fn overdrawn_adjustment_clamps_to_zero() {
        let adjusted = record(5, 15).adjust_stock(-10, "breakage");
        assert_eq!(adjusted.current_stock(), 0);
        assert_eq!(adjusted.status(), StockStatus::OutOfStock);
    }

    #[test]
    fn restock_recomputes_status() {
        let adjusted = record(8, 15).adjust_stock(20, "Purchase order #PO-002");
        assert_eq!(adjusted.current_stock(), 28);
        assert_eq!(adjusted.status(), StockStatus::InStock);
    }

    #[test]
    fn max_below_min_is_rejected() {
        let mut bad = fields_with(5, 15);
        bad.max_stock = 10;
        assert!(matches!(
            InventoryRecord::new(bad),
            Err(DomainError::InvariantViolation(_))
        ));
    }

    #[test]
    fn deserializing_rederives_status() {
        let mut json = serde_json::to_value(record(45, 15)).unwrap();
        assert_eq!(json["status"], "in_stock");

        json["status"] = "out_of_stock".into();
        json["current_stock"] = 3.into();
        let back: InventoryRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back.status(), StockStatus::LowStock);
    }

    #[test]
    fn stock_value_uses_cost_price() {
        assert_eq!(record(8, 15).stock_value(), Money::new(dec!(16.00)));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 512,
            ..ProptestConfig::default()
        })]

        /// Property: non-negative deltas add exactly.
        #[test]
        fn non_negative_delta_adds(stock in 0u32..100_000, min in 0u32..50, delta in 0i64..100_000) {
            let adjusted = record(stock, min).adjust_stock(delta, "restock");
            prop_assert_eq!(i64::from(adjusted.current_stock()), i64::from(stock) + delta);
            prop_assert_eq!(adjusted.status(), classify(adjusted.current_stock(), min));
        }

        /// Property: removing more than is on hand floors at zero.
        #[test]
        fn overdraw_floors_at_zero(stock in 0u32..100_000, min in 0u32..50, extra in 1i64..100_000) {
            let delta = -(i64::from(stock) + extra);
            let adjusted = record(stock, min).adjust_stock(delta, "shrinkage");
            prop_assert_eq!(adjusted.current_stock(), 0);
            prop_assert_eq!(adjusted.status(), StockStatus::OutOfStock);
        }
    }
}
