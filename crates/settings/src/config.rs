//! Process-level configuration.
//!
//! Read once at start-up from `LITHIA_*` environment variables and applied
//! on top of the seeded settings. Unset variables keep the defaults;
//! malformed values are validation errors.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use lithia_core::{DomainError, DomainResult, Reducer};

use crate::profile::validate_currency;
use crate::settings::{Settings, SettingsAction};
use crate::tax::TaxRateUpdate;
use crate::validate_percent;

pub const STORE_NAME_VAR: &str = "LITHIA_STORE_NAME";
pub const CURRENCY_VAR: &str = "LITHIA_CURRENCY";
pub const DEFAULT_TAX_RATE_VAR: &str = "LITHIA_DEFAULT_TAX_RATE";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub store_name: Option<String>,
    pub currency: Option<String>,
    /// Overrides the rate of the default tax row (percent).
    pub default_tax_rate: Option<Decimal>,
}

impl AppConfig {
    pub fn from_env() -> DomainResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the environment in production, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> DomainResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let currency = match read(CURRENCY_VAR) {
            Some(code) => {
                let code = code.to_ascii_uppercase();
                validate_currency(&code)?;
                Some(code)
            }
            None => None,
        };

        let default_tax_rate = match read(DEFAULT_TAX_RATE_VAR) {
            Some(raw) => {
                let rate: Decimal = raw.parse().map_err(|_| {
                    DomainError::validation(format!("{DEFAULT_TAX_RATE_VAR}: not a number: {raw:?}"))
                })?;
                validate_percent(rate, DEFAULT_TAX_RATE_VAR)?;
                Some(rate)
            }
            None => None,
        };

        Ok(Self {
            store_name: read(STORE_NAME_VAR),
            currency,
            default_tax_rate,
        })
    }

    /// Overlay the configured values on `settings`.
    pub fn apply(&self, settings: &Settings) -> DomainResult<Settings> {
        let mut next = settings.clone();
        if let Some(name) = &self.store_name {
            next.store.name = name.clone();
        }
        if let Some(currency) = &self.currency {
            next.store.currency = currency.clone();
        }
        if let Some(rate) = self.default_tax_rate {
            let id = next
                .default_tax()
                .map(|tax| tax.id)
                .ok_or_else(DomainError::not_found)?;
            let update = TaxRateUpdate {
                rate: Some(rate),
                ..TaxRateUpdate::default()
            };
            next = next.reduce(&SettingsAction::UpdateTaxRate { id, update })?;
        }
        tracing::info!(
            store = %next.store.name,
            currency = %next.store.currency,
            default_tax_rate = %next.default_tax_rate(),
            "configuration applied"
        );
        Ok(next)
    }
}
