//! Plain sections of the settings screen (general, receipt, payment,
//! security, notifications).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use lithia_core::{DomainError, DomainResult, Money};

use crate::validate_percent;

/// "General" tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreProfile {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    /// ISO 4217 code, e.g. `USD`.
    pub currency: String,
    pub timezone: String,
    pub language: String,
}

impl Default for StoreProfile {
    fn default() -> Self {
        Self {
            name: "Lithia POS Store".to_string(),
            address: "123 Main Street, City, State 12345".to_string(),
            phone: "+1 (555) 123-4567".to_string(),
            email: "info@lithiapos.com".to_string(),
            currency: "USD".to_string(),
            timezone: "America/New_York".to_string(),
            language: "en".to_string(),
        }
    }
}

impl StoreProfile {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("store name cannot be empty"));
        }
        validate_currency(&self.currency)
    }
}

pub(crate) fn validate_currency(code: &str) -> DomainResult<()> {
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(DomainError::validation(format!(
            "currency must be a three-letter ISO code, got {code:?}"
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptSettings {
    pub show_logo: bool,
    pub header_text: String,
    pub footer_text: String,
    pub show_tax_id: bool,
    pub tax_id: String,
    pub receipt_width: String,
    pub print_automatically: bool,
}

impl Default for ReceiptSettings {
    fn default() -> Self {
        Self {
            show_logo: true,
            header_text: "Thank you for your business!".to_string(),
            footer_text: "Please visit us again".to_string(),
            show_tax_id: true,
            tax_id: "TAX-123456789".to_string(),
            receipt_width: "80mm".to_string(),
            print_automatically: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSettings {
    pub accept_cash: bool,
    pub accept_card: bool,
    pub accept_mobile: bool,
    /// Tip percentages offered at checkout.
    pub tip_options: Vec<Decimal>,
    pub rounding_enabled: bool,
    pub minimum_card_amount: Money,
}

impl Default for PaymentSettings {
    fn default() -> Self {
        Self {
            accept_cash: true,
            accept_card: true,
            accept_mobile: true,
            tip_options: vec![Decimal::from(10), Decimal::from(15), Decimal::from(20)],
            rounding_enabled: true,
            minimum_card_amount: Money::ZERO,
        }
    }
}

impl PaymentSettings {
    pub fn validate(&self) -> DomainResult<()> {
        for tip in &self.tip_options {
            validate_percent(*tip, "tip option")?;
        }
        if self.minimum_card_amount.is_negative() {
            return Err(DomainError::validation("minimum card amount cannot be negative"));
        }
        Ok(())
    }

    /// Replace one tip option in place.
    pub fn with_tip_option(&self, index: usize, percent: Decimal) -> DomainResult<PaymentSettings> {
        validate_percent(percent, "tip option")?;
        let mut next = self.clone();
        let slot = next
            .tip_options
            .get_mut(index)
            .ok_or_else(DomainError::not_found)?;
        *slot = percent;
        Ok(next)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecuritySettings {
    /// Minutes.
    pub session_timeout: u32,
    pub require_pin_for_void: bool,
    pub require_pin_for_refund: bool,
    pub auto_lock_screen: bool,
    /// Days.
    pub password_expiry: u32,
}

impl Default for SecuritySettings {
    fn default() -> Self {
        Self {
            session_timeout: 30,
            require_pin_for_void: true,
            require_pin_for_refund: true,
            auto_lock_screen: true,
            password_expiry: 90,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    pub low_stock_alerts: bool,
    pub daily_sales_report: bool,
    pub system_updates: bool,
    pub sound_enabled: bool,
    pub email_notifications: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            low_stock_alerts: true,
            daily_sales_report: true,
            system_updates: true,
            sound_enabled: true,
            email_notifications: true,
        }
    }
}
