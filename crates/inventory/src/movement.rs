use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use lithia_core::{Entity, ItemId, MovementId};

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    /// Goods received (quantity is positive).
    In,
    /// Goods sold or consumed (quantity is positive).
    Out,
    /// Manual correction (quantity carries its sign).
    Adjustment,
}

/// One entry of the stock movement log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockMovement {
    pub id: MovementId,
    pub item_id: ItemId,
    pub item_name: String,
    pub kind: MovementKind,
    pub quantity: i64,
    pub reason: String,
    pub date: NaiveDate,
    pub user: String,
}

impl Entity for StockMovement {
    type Id = MovementId;

    fn id(&self) -> MovementId {
        self.id
    }
}
