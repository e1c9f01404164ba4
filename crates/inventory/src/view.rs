use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use lithia_core::{DomainError, DomainResult, Entity, Money, MovementId, Reducer, next_id};
use lithia_events::Action;

use crate::movement::{MovementKind, StockMovement};
use crate::record::InventoryRecord;

/// Stock adjustment form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockAdjustment {
    pub sku: String,
    /// Signed quantity entered by the user.
    pub delta: i64,
    pub reason: String,
    pub user: String,
    pub date: NaiveDate,
}

/// Inventory screen view-model: stocked records plus the movement log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Inventory {
    records: Vec<InventoryRecord>,
    movements: Vec<StockMovement>,
}

#[derive(Deserialize)]
struct InventorySnapshot {
    records: Vec<InventoryRecord>,
    #[serde(default)]
    movements: Vec<StockMovement>,
}

impl<'de> Deserialize<'de> for Inventory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let snapshot = InventorySnapshot::deserialize(deserializer)?;
        Inventory::new(snapshot.records, snapshot.movements).map_err(serde::de::Error::custom)
    }
}

impl Inventory {
    /// Build from seed data; skus must be unique.
    pub fn new(records: Vec<InventoryRecord>, movements: Vec<StockMovement>) -> DomainResult<Self> {
        for (idx, record) in records.iter().enumerate() {
            if records[..idx].iter().any(|other| other.sku() == record.sku()) {
                return Err(DomainError::conflict(format!("duplicate sku {}", record.sku())));
            }
        }
        Ok(Self { records, movements })
    }

    pub fn records(&self) -> &[InventoryRecord] {
        &self.records
    }

    pub fn movements(&self) -> &[StockMovement] {
        &self.movements
    }

    pub fn get(&self, sku: &str) -> Option<&InventoryRecord> {
        self.records.iter().find(|record| record.sku() == sku)
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for record in &self.records {
            if !categories.contains(&record.category()) {
                categories.push(record.category());
            }
        }
        categories
    }

    /// Case-insensitive search on name or sku, optionally within a category.
    pub fn filter(&self, search: &str, category: Option<&str>) -> Vec<&InventoryRecord> {
        let needle = search.to_lowercase();
        self.records
            .iter()
            .filter(|record| {
                record.name().to_lowercase().contains(&needle)
                    || record.sku().to_lowercase().contains(&needle)
            })
            .filter(|record| category.is_none_or(|c| record.category() == c))
            .collect()
    }

    /// Records that are low or out of stock.
    pub fn low_stock_items(&self) -> Vec<&InventoryRecord> {
        self.records
            .iter()
            .filter(|record| record.status().needs_attention())
            .collect()
    }

    /// Value of all stock at cost, rounded to cents.
    pub fn total_value(&self) -> Money {
        self.records
            .iter()
            .map(InventoryRecord::stock_value)
            .sum::<Money>()
            .rounded()
    }

    /// Apply a stock adjustment and log the movement actually applied.
    ///
    /// A zero quantity is refused like an empty form; unknown skus are
    /// `NotFound`. Overdrawing clamps to zero.
    pub fn adjust(&self, adjustment: &StockAdjustment) -> DomainResult<Inventory> {
        if adjustment.delta == 0 {
            return Err(DomainError::validation("adjustment quantity is required"));
        }

        let idx = self
            .records
            .iter()
            .position(|record| record.sku() == adjustment.sku)
            .ok_or_else(DomainError::not_found)?;

        let before = &self.records[idx];
        let after = before.adjust_stock(adjustment.delta, &adjustment.reason);
        let applied = i64::from(after.current_stock()) - i64::from(before.current_stock());

        let mut next = self.clone();
        if applied != 0 {
            next.movements.push(StockMovement {
                id: next_id(&self.movements, MovementId::FIRST, MovementId::next),
                item_id: after.id(),
                item_name: after.name().to_string(),
                kind: MovementKind::Adjustment,
                quantity: applied,
                reason: adjustment.reason.clone(),
                date: adjustment.date,
                user: adjustment.user.clone(),
            });
        }
        if after.status() != before.status() {
            tracing::info!(sku = %after.sku(), status = ?after.status(), "stock status changed");
        }
        next.records[idx] = after;
        Ok(next)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryAction {
    Adjust(StockAdjustment),
}

impl Action for InventoryAction {
    fn action_type(&self) -> &'static str {
        match self {
            InventoryAction::Adjust(_) => "inventory.stock.adjusted",
        }
    }
}

impl Reducer for Inventory {
    type Action = InventoryAction;
    type Error = DomainError;

    fn reduce(&self, action: &InventoryAction) -> DomainResult<Self> {
        match action {
            InventoryAction::Adjust(adjustment) => self.adjust(adjustment),
        }
    }
}
