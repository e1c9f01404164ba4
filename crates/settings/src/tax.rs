//! Configured tax rates.
//!
//! The table is never empty and exactly one rate is the default; every
//! operation preserves both.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use lithia_core::{DomainError, DomainResult, Entity, TaxRateId, next_id};

use crate::validate_percent;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate {
    pub id: TaxRateId,
    pub name: String,
    /// Percent, 8.5 means 8.5 %.
    pub rate: Decimal,
    pub is_default: bool,
}

impl Entity for TaxRate {
    type Id = TaxRateId;

    fn id(&self) -> TaxRateId {
        self.id
    }
}

/// Partial edit of a tax rate row; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRateUpdate {
    pub name: Option<String>,
    pub rate: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TaxRate>", into = "Vec<TaxRate>")]
pub struct TaxTable {
    rates: Vec<TaxRate>,
}

impl TaxTable {
    pub fn new(rates: Vec<TaxRate>) -> DomainResult<Self> {
        if rates.is_empty() {
            return Err(DomainError::invariant("at least one tax rate is required"));
        }
        for (idx, rate) in rates.iter().enumerate() {
            if rates[..idx].iter().any(|other| other.id == rate.id) {
                return Err(DomainError::conflict(format!("duplicate tax rate id {}", rate.id)));
            }
            validate_percent(rate.rate, "tax rate")?;
        }
        let defaults = rates.iter().filter(|r| r.is_default).count();
        if defaults != 1 {
            return Err(DomainError::invariant(format!(
                "exactly one default tax rate is required, found {defaults}"
            )));
        }
        Ok(Self { rates })
    }

    pub fn rates(&self) -> &[TaxRate] {
        &self.rates
    }

    pub fn get(&self, id: TaxRateId) -> Option<&TaxRate> {
        self.rates.iter().find(|r| r.id == id)
    }

    pub fn default_rate(&self) -> Option<&TaxRate> {
        self.rates.iter().find(|r| r.is_default)
    }

    /// Append a zero-percent "New Tax Rate" row.
    pub fn add(&self) -> TaxTable {
        let id = next_id(&self.rates, TaxRateId::FIRST, TaxRateId::next);
        let mut rates = self.rates.clone();
        rates.push(TaxRate {
            id,
            name: "New Tax Rate".to_string(),
            rate: Decimal::ZERO,
            is_default: false,
        });
        TaxTable { rates }
    }

    pub fn update(&self, id: TaxRateId, update: &TaxRateUpdate) -> DomainResult<TaxTable> {
        if let Some(rate) = update.rate {
            validate_percent(rate, "tax rate")?;
        }
        if update.name.as_ref().is_some_and(|name| name.trim().is_empty()) {
            return Err(DomainError::validation("tax rate name cannot be empty"));
        }

        let mut rates = self.rates.clone();
        let row = rates
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(DomainError::not_found)?;
        if let Some(name) = &update.name {
            row.name = name.trim().to_string();
        }
        if let Some(rate) = update.rate {
            row.rate = rate;
        }
        Ok(TaxTable { rates })
    }

    /// Delete a row. The last remaining rate cannot be deleted; deleting the
    /// default promotes the first remaining row.
    pub fn delete(&self, id: TaxRateId) -> DomainResult<TaxTable> {
        if self.get(id).is_none() {
            return Ok(self.clone());
        }
        if self.rates.len() <= 1 {
            return Err(DomainError::invariant("at least one tax rate must remain"));
        }

        let mut rates: Vec<TaxRate> = self.rates.iter().filter(|r| r.id != id).cloned().collect();
        if !rates.iter().any(|r| r.is_default) {
            if let Some(first) = rates.first_mut() {
                first.is_default = true;
                tracing::info!(tax_rate_id = %first.id, "default tax rate reassigned");
            }
        }
        Ok(TaxTable { rates })
    }

    pub fn set_default(&self, id: TaxRateId) -> DomainResult<TaxTable> {
        if self.get(id).is_none() {
            return Err(DomainError::not_found());
        }
        let rates = self
            .rates
            .iter()
            .map(|r| TaxRate {
                is_default: r.id == id,
                ..r.clone()
            })
            .collect();
        Ok(TaxTable { rates })
    }
}

impl Default for TaxTable {
    fn default() -> Self {
        let row = |id: u32, name: &str, rate: Decimal, is_default: bool| TaxRate {
            id: TaxRateId::new(id),
            name: name.to_string(),
            rate,
            is_default,
        };
        Self {
            rates: vec![
                row(1, "Standard Tax", Decimal::new(85, 1), true),
                row(2, "Food Tax", Decimal::ZERO, false),
                row(3, "Luxury Tax", Decimal::from(15), false),
            ],
        }
    }
}

impl TryFrom<Vec<TaxRate>> for TaxTable {
    type Error = DomainError;

    fn try_from(rates: Vec<TaxRate>) -> Result<Self, Self::Error> {
        TaxTable::new(rates)
    }
}

impl From<TaxTable> for Vec<TaxRate> {
    fn from(table: TaxTable) -> Self {
        table.rates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn ids(table: &TaxTable) -> Vec<u32> {
        table.rates().iter().map(|r| r.id.get()).collect()
    }

    fn default_id(table: &TaxTable) -> u32 {
        table.default_rate().unwrap().id.get()
    }

    #[test]
    fn seed_table_is_valid() {
        let table = TaxTable::default();
        assert!(TaxTable::new(table.rates().to_vec()).is_ok());
        assert_eq!(table.default_rate().unwrap().rate, dec!(8.5));
    }

    #[test]
    fn add_appends_zero_rate() {
        let table = TaxTable::default().add();
        let added = table.get(TaxRateId::new(4)).unwrap();
        assert_eq!(added.name, "New Tax Rate");
        assert_eq!(added.rate, Decimal::ZERO);
        assert!(!added.is_default);
    }

    #[test]
    fn update_is_partial_and_validated() {
        let table = TaxTable::default();
        let next = table
            .update(
                TaxRateId::new(2),
                &TaxRateUpdate {
                    rate: Some(dec!(2.5)),
                    ..TaxRateUpdate::default()
                },
            )
            .unwrap();
        let food = next.get(TaxRateId::new(2)).unwrap();
        assert_eq!(food.name, "Food Tax");
        assert_eq!(food.rate, dec!(2.5));

        let too_high = TaxRateUpdate {
            rate: Some(dec!(100.01)),
            ..TaxRateUpdate::default()
        };
        assert!(matches!(
            table.update(TaxRateId::new(2), &too_high),
            Err(DomainError::Validation(_))
        ));
        assert_eq!(
            table.update(TaxRateId::new(9), &TaxRateUpdate::default()).unwrap_err(),
            DomainError::NotFound
        );
    }

    #[test]
    fn set_default_keeps_exactly_one() {
        let table = TaxTable::default().set_default(TaxRateId::new(3)).unwrap();
        assert_eq!(default_id(&table), 3);
        assert_eq!(table.rates().iter().filter(|r| r.is_default).count(), 1);
        assert!(TaxTable::default().set_default(TaxRateId::new(9)).is_err());
    }

    #[test]
    fn deleting_the_default_promotes_the_first_remaining() {
        let table = TaxTable::default().delete(TaxRateId::new(1)).unwrap();
        assert_eq!(ids(&table), vec![2, 3]);
        assert_eq!(default_id(&table), 2);
    }

    #[test]
    fn last_rate_cannot_be_deleted() {
        let table = TaxTable::default()
            .delete(TaxRateId::new(2))
            .and_then(|t| t.delete(TaxRateId::new(3)))
            .unwrap();
        assert!(matches!(
            table.delete(TaxRateId::new(1)),
            Err(DomainError::InvariantViolation(_))
        ));
        // unknown ids are ignored, even on a single-row table
        assert_eq!(table.delete(TaxRateId::new(7)).unwrap(), table);
    }

    #[test]
    fn deserializing_checks_the_default_invariant() {
        let mut json = serde_json::to_value(TaxTable::default()).unwrap();
        json[2]["is_default"] = true.into();
        assert!(serde_json::from_value::<TaxTable>(json).is_err());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add,
        Delete(u32),
        SetDefault(u32),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Add),
            (1u32..8).prop_map(Op::Delete),
            (1u32..8).prop_map(Op::SetDefault),
        ]
    }

    proptest! {
        /// Property: any sequence of edits keeps a non-empty table with one default.
        #[test]
        fn edits_preserve_table_invariants(ops in prop::collection::vec(op(), 0..40)) {
            let mut table = TaxTable::default();
            for op in ops {
                let next = match op {
                    Op::Add => Ok(table.add()),
                    Op::Delete(id) => table.delete(TaxRateId::new(id)),
                    Op::SetDefault(id) => table.set_default(TaxRateId::new(id)),
                };
                if let Ok(next) = next {
                    table = next;
                }
                prop_assert!(!table.rates().is_empty());
                prop_assert_eq!(table.rates().iter().filter(|r| r.is_default).count(), 1);
            }
        }
    }
}
