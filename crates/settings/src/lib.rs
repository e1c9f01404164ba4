//! Settings screen: store profile, tax rates, staff users and the
//! process-level configuration read from the environment.

pub mod config;
pub mod profile;
pub mod settings;
pub mod tax;
pub mod users;

pub use config::AppConfig;
pub use profile::{NotificationSettings, PaymentSettings, ReceiptSettings, SecuritySettings, StoreProfile};
pub use settings::{Settings, SettingsAction};
pub use tax::{TaxRate, TaxRateUpdate, TaxTable};
pub use users::{Role, StaffUser, UserForm, UserStatus};

use rust_decimal::Decimal;

use lithia_core::{DomainError, DomainResult};

/// Percentages entered on the settings screen must lie in `0..=100`.
pub(crate) fn validate_percent(value: Decimal, what: &str) -> DomainResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(DomainError::validation(format!("{what} must be between 0 and 100")));
    }
    Ok(())
}
