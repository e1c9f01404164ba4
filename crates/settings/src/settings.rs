use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use lithia_core::{DomainError, DomainResult, Reducer, TaxRateId, UserId};
use lithia_events::Action;

use crate::profile::{NotificationSettings, PaymentSettings, ReceiptSettings, SecuritySettings, StoreProfile};
use crate::tax::{TaxRate, TaxRateUpdate, TaxTable};
use crate::users::{self, StaffUser, UserForm};

/// The settings view-model: every tab of the settings screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub store: StoreProfile,
    pub receipt: ReceiptSettings,
    pub payment: PaymentSettings,
    pub security: SecuritySettings,
    pub notifications: NotificationSettings,
    pub dark_mode: bool,
    tax_rates: TaxTable,
    #[serde(default)]
    users: Vec<StaffUser>,
}

impl Settings {
    /// Default sections with the given tax table and staff.
    pub fn new(tax_rates: TaxTable, users: Vec<StaffUser>) -> DomainResult<Self> {
        users::validate_users(&users)?;
        Ok(Self {
            tax_rates,
            users,
            ..Settings::default()
        })
    }

    pub fn tax_rates(&self) -> &TaxTable {
        &self.tax_rates
    }

    /// Rate applied at checkout; zero if somehow no default exists.
    pub fn default_tax_rate(&self) -> Decimal {
        self.tax_rates
            .default_rate()
            .map_or(Decimal::ZERO, |rate| rate.rate)
    }

    pub fn default_tax(&self) -> Option<&TaxRate> {
        self.tax_rates.default_rate()
    }

    pub fn users(&self) -> &[StaffUser] {
        &self.users
    }

    pub fn user(&self, id: UserId) -> Option<&StaffUser> {
        self.users.iter().find(|u| u.id == id)
    }

    fn with_tax_rates(&self, tax_rates: TaxTable) -> Settings {
        Settings {
            tax_rates,
            ..self.clone()
        }
    }

    fn with_users(&self, users: Vec<StaffUser>) -> Settings {
        Settings {
            users,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettingsAction {
    UpdateStore(StoreProfile),
    UpdateReceipt(ReceiptSettings),
    UpdatePayment(PaymentSettings),
    SetTipOption { index: usize, percent: Decimal },
    UpdateSecurity(SecuritySettings),
    UpdateNotifications(NotificationSettings),
    SetDarkMode(bool),
    AddTaxRate,
    UpdateTaxRate { id: TaxRateId, update: TaxRateUpdate },
    DeleteTaxRate(TaxRateId),
    SetDefaultTax(TaxRateId),
    AddUser(UserForm),
    EditUser { id: UserId, form: UserForm },
    DeleteUser(UserId),
}

impl Action for SettingsAction {
    fn action_type(&self) -> &'static str {
        match self {
            SettingsAction::UpdateStore(_) => "settings.store.updated",
            SettingsAction::UpdateReceipt(_) => "settings.receipt.updated",
            SettingsAction::UpdatePayment(_) | SettingsAction::SetTipOption { .. } => {
                "settings.payment.updated"
            }
            SettingsAction::UpdateSecurity(_) => "settings.security.updated",
            SettingsAction::UpdateNotifications(_) => "settings.notifications.updated",
            SettingsAction::SetDarkMode(_) => "settings.appearance.updated",
            SettingsAction::AddTaxRate => "settings.tax_rate.added",
            SettingsAction::UpdateTaxRate { .. } => "settings.tax_rate.updated",
            SettingsAction::DeleteTaxRate(_) => "settings.tax_rate.deleted",
            SettingsAction::SetDefaultTax(_) => "settings.tax_rate.default_changed",
            SettingsAction::AddUser(_) => "settings.user.added",
            SettingsAction::EditUser { .. } => "settings.user.updated",
            SettingsAction::DeleteUser(_) => "settings.user.deleted",
        }
    }
}

impl Reducer for Settings {
    type Action = SettingsAction;
    type Error = DomainError;

    fn reduce(&self, action: &SettingsAction) -> DomainResult<Self> {
        let next = match action {
            SettingsAction::UpdateStore(store) => {
                store.validate()?;
                Settings {
                    store: store.clone(),
                    ..self.clone()
                }
            }
            SettingsAction::UpdateReceipt(receipt) => Settings {
                receipt: receipt.clone(),
                ..self.clone()
            },
            SettingsAction::UpdatePayment(payment) => {
                payment.validate()?;
                Settings {
                    payment: payment.clone(),
                    ..self.clone()
                }
            }
            SettingsAction::SetTipOption { index, percent } => Settings {
                payment: self.payment.with_tip_option(*index, *percent)?,
                ..self.clone()
            },
            SettingsAction::UpdateSecurity(security) => Settings {
                security: security.clone(),
                ..self.clone()
            },
            SettingsAction::UpdateNotifications(notifications) => Settings {
                notifications: notifications.clone(),
                ..self.clone()
            },
            SettingsAction::SetDarkMode(on) => Settings {
                dark_mode: *on,
                ..self.clone()
            },
            SettingsAction::AddTaxRate => self.with_tax_rates(self.tax_rates.add()),
            SettingsAction::UpdateTaxRate { id, update } => {
                self.with_tax_rates(self.tax_rates.update(*id, update)?)
            }
            SettingsAction::DeleteTaxRate(id) => self.with_tax_rates(self.tax_rates.delete(*id)?),
            SettingsAction::SetDefaultTax(id) => {
                self.with_tax_rates(self.tax_rates.set_default(*id)?)
            }
            SettingsAction::AddUser(form) => self.with_users(users::add_user(&self.users, form)?),
            SettingsAction::EditUser { id, form } => {
                self.with_users(users::edit_user(&self.users, *id, form)?)
            }
            SettingsAction::DeleteUser(id) => self.with_users(users::delete_user(&self.users, *id)),
        };
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::Role;
    use rust_decimal_macros::dec;

    #[test]
    fn default_tax_rate_follows_set_default() {
        let settings = Settings::default();
        assert_eq!(settings.default_tax_rate(), dec!(8.5));

        let next = settings
            .reduce(&SettingsAction::SetDefaultTax(TaxRateId::new(2)))
            .unwrap();
        assert_eq!(next.default_tax_rate(), Decimal::ZERO);
        assert_eq!(next.default_tax().unwrap().name, "Food Tax");
    }

    #[test]
    fn invalid_store_profile_is_rejected() {
        let store = StoreProfile {
            name: String::new(),
            ..StoreProfile::default()
        };
        let err = Settings::default()
            .reduce(&SettingsAction::UpdateStore(store))
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn user_actions_route_to_the_user_list() {
        let settings = Settings::default()
            .reduce(&SettingsAction::AddUser(UserForm {
                name: "Dana".to_string(),
                email: "dana@lithiapos.com".to_string(),
                role: Role::Manager,
            }))
            .unwrap();
        assert_eq!(settings.users().len(), 1);
        assert_eq!(settings.user(UserId::FIRST).unwrap().name, "Dana");

        let settings = settings
            .reduce(&SettingsAction::DeleteUser(UserId::FIRST))
            .unwrap();
        assert!(settings.users().is_empty());
    }

    #[test]
    fn dark_mode_toggle() {
        let settings = Settings::default().reduce(&SettingsAction::SetDarkMode(true)).unwrap();
        assert!(settings.dark_mode);
    }

    #[test]
    fn round_trips_through_json() {
        let settings = Settings::default().reduce(&SettingsAction::AddTaxRate).unwrap();
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }
}
