//! Order pricing: subtotal, discount, tax and total.
//!
//! One formula is used everywhere:
//!
//! ```text
//! discount = min(discount, subtotal)
//! tax      = round2((subtotal - discount) * rate / 100)
//! total    = subtotal - discount + tax
//! ```
//!
//! The discount reduces the taxable base; tax is never charged on money the
//! customer does not pay.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use lithia_core::{DomainError, DomainResult, Money};
use lithia_products::Catalog;

use crate::cart::Cart;

/// Discount requested at the till.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Discount {
    #[default]
    None,
    /// Fixed amount off the subtotal.
    Amount(Money),
    /// Percentage (0..=100) of the subtotal.
    Percent(Decimal),
}

impl Discount {
    fn resolve(self, subtotal: Money) -> DomainResult<Money> {
        let amount = match self {
            Discount::None => Money::ZERO,
            Discount::Amount(amount) => {
                if amount.is_negative() {
                    return Err(DomainError::validation("discount cannot be negative"));
                }
                amount
            }
            Discount::Percent(rate) => {
                if rate < Decimal::ZERO || rate > Decimal::ONE_HUNDRED {
                    return Err(DomainError::validation(
                        "discount percentage must be between 0 and 100",
                    ));
                }
                subtotal.percent(rate)
            }
        };
        Ok(amount.min(subtotal).rounded())
    }
}

/// Priced order, every field rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    pub subtotal: Money,
    pub discount: Money,
    pub tax: Money,
    pub total: Money,
}

/// Price an order from its (unrounded) subtotal.
///
/// `tax_rate` is a percentage (8.5 means 8.5 %).
pub fn price_order(subtotal: Money, tax_rate: Decimal, discount: Discount) -> DomainResult<OrderTotals> {
    if tax_rate < Decimal::ZERO || tax_rate > Decimal::ONE_HUNDRED {
        return Err(DomainError::validation("tax rate must be between 0 and 100"));
    }
    if subtotal.is_negative() {
        return Err(DomainError::invariant("subtotal cannot be negative"));
    }

    let subtotal = subtotal.rounded();
    let discount = discount.resolve(subtotal)?;
    let tax = (subtotal - discount).percent(tax_rate).rounded();

    Ok(OrderTotals {
        subtotal,
        discount,
        tax,
        total: subtotal - discount + tax,
    })
}

/// Price the current cart against live catalog prices.
pub fn price_cart(
    cart: &Cart,
    catalog: &Catalog,
    tax_rate: Decimal,
    discount: Discount,
) -> DomainResult<OrderTotals> {
    price_order(cart.subtotal(catalog), tax_rate, discount)
}
