//! Turning a checked-out cart into a recorded sale.
//!
//! There is no payment gateway: a checkout is a snapshot of the cart at the
//! moment the pay button was pressed, priced and stamped as a completed
//! transaction.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use lithia_core::{DomainResult, ItemId, Money};

use crate::pricing::OrderTotals;
use crate::transaction::{
    CustomerRef, LineItem, PaymentMethod, TransactionRecord, TransactionStatus,
};

/// Cart line frozen at checkout, with the price in force at that moment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutLine {
    pub item_id: ItemId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Money,
}

/// Snapshot returned by `Cart::checkout`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkout {
    pub lines: Vec<CheckoutLine>,
    /// Cart total (pre-tax, pre-discount), rounded to cents.
    pub total: Money,
}

/// Who/when/how of a sale, supplied by the till.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleContext {
    /// Sequence number used for `TXN-nnn` / `RCP-nnn`.
    pub sequence: u32,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub cashier: String,
    pub customer: Option<CustomerRef>,
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
}

/// Build the completed transaction for a checkout priced as `totals`.
///
/// The resulting record is validated before it is returned.
pub fn complete_sale(
    checkout: &Checkout,
    totals: &OrderTotals,
    context: SaleContext,
) -> DomainResult<TransactionRecord> {
    let record = TransactionRecord {
        id: format!("TXN-{:03}", context.sequence),
        date: context.date,
        time: context.time,
        customer: context.customer,
        line_items: checkout
            .lines
            .iter()
            .map(|line| LineItem {
                product_id: line.item_id,
                product_name: line.name.clone(),
                quantity: line.quantity,
                unit_price: line.unit_price,
            })
            .collect(),
        subtotal: totals.subtotal,
        tax: totals.tax,
        discount: totals.discount,
        total: totals.total,
        payment_method: context.payment_method,
        status: TransactionStatus::Completed,
        cashier: context.cashier,
        receipt_number: format!("RCP-{:03}", context.sequence),
        notes: context.notes,
    };
    record.validate()?;
    Ok(record)
}
