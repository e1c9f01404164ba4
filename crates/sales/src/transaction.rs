use chrono::{Days, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use lithia_core::{CustomerId, DomainError, DomainResult, ItemId, Money, Reducer};
use lithia_events::Action;

/// Tender used to pay for a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    CreditCard,
    DebitCard,
    MobilePayment,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::DebitCard => "debit_card",
            PaymentMethod::MobilePayment => "mobile_payment",
        }
    }
}

/// Transaction status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Completed,
    Pending,
    Refunded,
    Cancelled,
}

/// Customer attached to a sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRef {
    pub id: CustomerId,
    pub name: String,
}

/// One sold product line, with the price charged at the time of sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: ItemId,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Money,
}

impl LineItem {
    pub fn total(&self) -> Money {
        self.unit_price.times(self.quantity).rounded()
    }
}

/// A recorded sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerRef>,
    pub line_items: Vec<LineItem>,
    pub subtotal: Money,
    pub tax: Money,
    pub discount: Money,
    pub total: Money,
    pub payment_method: PaymentMethod,
    pub status: TransactionStatus,
    pub cashier: String,
    pub receipt_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl TransactionRecord {
    /// Units sold across all lines.
    pub fn item_quantity(&self) -> u64 {
        self.line_items
            .iter()
            .map(|line| u64::from(line.quantity))
            .sum()
    }

    /// Check the arithmetic invariants of the record.
    ///
    /// - `subtotal == sum of line totals`
    /// - `total == subtotal + tax - discount` (to the cent)
    pub fn validate(&self) -> DomainResult<()> {
        if self.id.trim().is_empty() {
            return Err(DomainError::validation("transaction id cannot be empty"));
        }
        if self.line_items.is_empty() {
            return Err(DomainError::validation("transaction must have line items"));
        }
        if self.line_items.iter().any(|line| line.quantity == 0) {
            return Err(DomainError::validation("line quantity must be positive"));
        }

        let lines: Money = self.line_items.iter().map(LineItem::total).sum();
        if lines.rounded() != self.subtotal.rounded() {
            return Err(DomainError::invariant(format!(
                "subtotal {} does not match line items {}",
                self.subtotal, lines
            )));
        }

        let expected = (self.subtotal + self.tax - self.discount).rounded();
        if expected != self.total.rounded() {
            return Err(DomainError::invariant(format!(
                "total {} does not equal subtotal + tax - discount ({})",
                self.total, expected
            )));
        }
        Ok(())
    }

    fn matches_search(&self, needle: &str) -> bool {
        self.id.to_lowercase().contains(needle)
            || self.receipt_number.to_lowercase().contains(needle)
            || self
                .customer
                .as_ref()
                .is_some_and(|customer| customer.name.to_lowercase().contains(needle))
            || self.cashier.to_lowercase().contains(needle)
    }
}

/// Date window of the transactions screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateFilter {
    #[default]
    Today,
    Yesterday,
    /// No date restriction.
    Any,
}

impl DateFilter {
    fn matches(self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            DateFilter::Today => date == today,
            DateFilter::Yesterday => today.checked_sub_days(Days::new(1)) == Some(date),
            DateFilter::Any => true,
        }
    }
}

/// Filter bar of the transactions screen. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionFilter {
    pub search: String,
    pub status: Option<TransactionStatus>,
    pub payment_method: Option<PaymentMethod>,
    pub date: DateFilter,
}

impl TransactionFilter {
    pub fn matches(&self, record: &TransactionRecord, today: NaiveDate) -> bool {
        let needle = self.search.to_lowercase();
        record.matches_search(&needle)
            && self.status.is_none_or(|status| record.status == status)
            && self
                .payment_method
                .is_none_or(|method| record.payment_method == method)
            && self.date.matches(record.date, today)
    }
}

/// Transaction history view-model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TransactionRecord>", into = "Vec<TransactionRecord>")]
pub struct TransactionLog {
    records: Vec<TransactionRecord>,
}

impl TransactionLog {
    /// Build the history from seed records; every record must validate and
    /// ids must be unique.
    pub fn new(records: Vec<TransactionRecord>) -> DomainResult<Self> {
        let mut log = TransactionLog::default();
        for record in records {
            log = log.record(record)?;
        }
        Ok(log)
    }

    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&TransactionRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn filter(&self, filter: &TransactionFilter, today: NaiveDate) -> Vec<&TransactionRecord> {
        self.records
            .iter()
            .filter(|record| filter.matches(record, today))
            .collect()
    }

    /// Next sequence number for `TXN-nnn` / `RCP-nnn` numbering.
    pub fn next_sequence(&self) -> DomainResult<u32> {
        let highest = self
            .records
            .iter()
            .filter_map(|record| record.id.rsplit('-').next()?.parse::<u32>().ok())
            .max();
        match highest {
            None => Ok(1),
            Some(max) => max
                .checked_add(1)
                .ok_or_else(|| DomainError::invariant("transaction sequence exhausted")),
        }
    }

    /// Append a validated record; duplicate ids are a conflict.
    pub fn record(&self, record: TransactionRecord) -> DomainResult<TransactionLog> {
        record.validate()?;
        if self.get(&record.id).is_some() {
            return Err(DomainError::conflict(format!(
                "transaction {} already recorded",
                record.id
            )));
        }
        tracing::info!(transaction_id = %record.id, total = %record.total, "transaction recorded");
        let mut records = self.records.clone();
        records.push(record);
        Ok(TransactionLog { records })
    }
}

impl TryFrom<Vec<TransactionRecord>> for TransactionLog {
    type Error = DomainError;

    fn try_from(records: Vec<TransactionRecord>) -> Result<Self, Self::Error> {
        TransactionLog::new(records)
    }
}

impl From<TransactionLog> for Vec<TransactionRecord> {
    fn from(log: TransactionLog) -> Self {
        log.records
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionLogAction {
    Record(TransactionRecord),
}

impl Action for TransactionLogAction {
    fn action_type(&self) -> &'static str {
        match self {
            TransactionLogAction::Record(_) => "sales.transaction.recorded",
        }
    }
}

impl Reducer for TransactionLog {
    type Action = TransactionLogAction;
    type Error = DomainError;

    fn reduce(&self, action: &TransactionLogAction) -> DomainResult<Self> {
        match action {
            TransactionLogAction::Record(record) => self.record(record.clone()),
        }
    }
}
