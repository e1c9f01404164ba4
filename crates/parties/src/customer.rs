use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize};

use lithia_core::{CustomerId, DomainError, DomainResult, Entity, Money, PurchaseId, Reducer, next_id};
use lithia_events::Action;

/// Customer lifecycle shown as a badge on the customers table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    Active,
    Inactive,
    Vip,
}

impl CustomerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerStatus::Active => "active",
            CustomerStatus::Inactive => "inactive",
            CustomerStatus::Vip => "vip",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub zip_code: String,
    pub date_joined: NaiveDate,
    pub total_spent: Money,
    pub total_orders: u32,
    pub last_purchase: Option<NaiveDate>,
    pub loyalty_points: u32,
    pub status: CustomerStatus,
    #[serde(default)]
    pub notes: String,
}

impl Customer {
    /// Case-insensitive match on name or email; phone numbers match verbatim.
    pub fn matches_search(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.email.to_lowercase().contains(&needle)
            || self.phone.contains(term)
    }
}

impl Entity for Customer {
    type Id = CustomerId;

    fn id(&self) -> CustomerId {
        self.id
    }
}

/// One entry of a customer's purchase history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerPurchase {
    pub id: PurchaseId,
    pub customer_id: CustomerId,
    pub date: NaiveDate,
    pub amount: Money,
    pub items: u32,
    pub payment_method: String,
}

impl Entity for CustomerPurchase {
    type Id = PurchaseId;

    fn id(&self) -> PurchaseId {
        self.id
    }
}

/// Editable fields of the add/edit customer dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub zip_code: String,
    pub notes: String,
}

/// Stat cards above the customers table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerStats {
    pub total: usize,
    pub active: usize,
    pub vip: usize,
    pub revenue: Money,
}

/// Loyalty points earned per this much spend.
const POINTS_PER: Decimal = Decimal::TEN;

fn loyalty_points(total_spent: Money) -> u32 {
    (total_spent.amount() / POINTS_PER)
        .floor()
        .to_u32()
        .unwrap_or(0)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CustomerDirectory {
    customers: Vec<Customer>,
    purchases: Vec<CustomerPurchase>,
}

#[derive(Deserialize)]
struct DirectorySnapshot {
    customers: Vec<Customer>,
    #[serde(default)]
    purchases: Vec<CustomerPurchase>,
}

impl<'de> Deserialize<'de> for CustomerDirectory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let snapshot = DirectorySnapshot::deserialize(deserializer)?;
        CustomerDirectory::new(snapshot.customers, snapshot.purchases)
            .map_err(serde::de::Error::custom)
    }
}

impl CustomerDirectory {
    pub fn new(customers: Vec<Customer>, purchases: Vec<CustomerPurchase>) -> DomainResult<Self> {
        for (idx, customer) in customers.iter().enumerate() {
            if customers[..idx].iter().any(|other| other.id == customer.id) {
                return Err(DomainError::conflict(format!(
                    "duplicate customer id {}",
                    customer.id
                )));
            }
        }
        if let Some(orphan) = purchases
            .iter()
            .find(|p| !customers.iter().any(|c| c.id == p.customer_id))
        {
            return Err(DomainError::invariant(format!(
                "purchase {} references unknown customer {}",
                orphan.id, orphan.customer_id
            )));
        }
        Ok(Self {
            customers,
            purchases,
        })
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn get(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    /// Customers matching the search box and the status dropdown (`None` = all).
    pub fn filter(&self, search: &str, status: Option<CustomerStatus>) -> Vec<&Customer> {
        self.customers
            .iter()
            .filter(|c| c.matches_search(search))
            .filter(|c| status.is_none_or(|s| c.status == s))
            .collect()
    }

    /// Purchase history of one customer, in recorded order.
    pub fn purchases_for(&self, id: CustomerId) -> Vec<&CustomerPurchase> {
        self.purchases
            .iter()
            .filter(|p| p.customer_id == id)
            .collect()
    }

    pub fn stats(&self) -> CustomerStats {
        let count = |status: CustomerStatus| self.customers.iter().filter(|c| c.status == status).count();
        CustomerStats {
            total: self.customers.len(),
            active: count(CustomerStatus::Active),
            vip: count(CustomerStatus::Vip),
            revenue: self
                .customers
                .iter()
                .map(|c| c.total_spent)
                .sum::<Money>()
                .rounded(),
        }
    }

    /// Register a new customer joined on `today`, with zeroed counters.
    pub fn add(&self, form: &CustomerForm, today: NaiveDate) -> DomainResult<CustomerDirectory> {
        validate_form(form)?;

        let id = next_id(&self.customers, CustomerId::FIRST, CustomerId::next);
        let mut customers = self.customers.clone();
        customers.push(Customer {
            id,
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            phone: form.phone.trim().to_string(),
            address: form.address.clone(),
            city: form.city.clone(),
            zip_code: form.zip_code.clone(),
            date_joined: today,
            total_spent: Money::ZERO,
            total_orders: 0,
            last_purchase: None,
            loyalty_points: 0,
            status: CustomerStatus::Active,
            notes: form.notes.clone(),
        });
        tracing::debug!(customer_id = %id, "customer added");

        Ok(CustomerDirectory {
            customers,
            purchases: self.purchases.clone(),
        })
    }

    /// Replace the contact fields of an existing customer; counters and
    /// status are kept.
    pub fn edit(&self, id: CustomerId, form: &CustomerForm) -> DomainResult<CustomerDirectory> {
        validate_form(form)?;

        let mut customers = self.customers.clone();
        let customer = customers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(DomainError::not_found)?;
        customer.name = form.name.trim().to_string();
        customer.email = form.email.trim().to_string();
        customer.phone = form.phone.trim().to_string();
        customer.address = form.address.clone();
        customer.city = form.city.clone();
        customer.zip_code = form.zip_code.clone();
        customer.notes = form.notes.clone();
        tracing::debug!(customer_id = %id, "customer updated");

        Ok(CustomerDirectory {
            customers,
            purchases: self.purchases.clone(),
        })
    }

    /// Remove a customer and their history; unknown ids are a no-op.
    pub fn remove(&self, id: CustomerId) -> CustomerDirectory {
        CustomerDirectory {
            customers: self.customers.iter().filter(|c| c.id != id).cloned().collect(),
            purchases: self
                .purchases
                .iter()
                .filter(|p| p.customer_id != id)
                .cloned()
                .collect(),
        }
    }

    /// Append a completed sale to a customer's history and roll it into
    /// their totals. Loyalty is one point per 10 spent.
    pub fn record_purchase(
        &self,
        customer_id: CustomerId,
        date: NaiveDate,
        amount: Money,
        items: u32,
        payment_method: &str,
    ) -> DomainResult<CustomerDirectory> {
        if amount.is_negative() {
            return Err(DomainError::validation("purchase amount cannot be negative"));
        }

        let mut customers = self.customers.clone();
        let customer = customers
            .iter_mut()
            .find(|c| c.id == customer_id)
            .ok_or_else(DomainError::not_found)?;
        customer.total_spent = (customer.total_spent + amount).rounded();
        customer.total_orders = customer.total_orders.saturating_add(1);
        customer.last_purchase = Some(customer.last_purchase.map_or(date, |last| last.max(date)));
        customer.loyalty_points = loyalty_points(customer.total_spent);

        let id = next_id(&self.purchases, PurchaseId::FIRST, PurchaseId::next);
        let mut purchases = self.purchases.clone();
        purchases.push(CustomerPurchase {
            id,
            customer_id,
            date,
            amount: amount.rounded(),
            items,
            payment_method: payment_method.to_string(),
        });
        tracing::debug!(customer_id = %customer_id, purchase_id = %id, amount = %amount, "purchase recorded");

        Ok(CustomerDirectory {
            customers,
            purchases,
        })
    }
}

fn validate_form(form: &CustomerForm) -> DomainResult<()> {
    if form.name.trim().is_empty() {
        return Err(DomainError::validation("name cannot be empty"));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomerAction {
    Add {
        form: CustomerForm,
        today: NaiveDate,
    },
    Edit {
        id: CustomerId,
        form: CustomerForm,
    },
    Remove(CustomerId),
    RecordPurchase {
        customer_id: CustomerId,
        date: NaiveDate,
        amount: Money,
        items: u32,
        payment_method: String,
    },
}

impl Action for CustomerAction {
    fn action_type(&self) -> &'static str {
        match self {
            CustomerAction::Add { .. } => "parties.customer.added",
            CustomerAction::Edit { .. } => "parties.customer.updated",
            CustomerAction::Remove(_) => "parties.customer.removed",
            CustomerAction::RecordPurchase { .. } => "parties.customer.purchase_recorded",
        }
    }
}

impl Reducer for CustomerDirectory {
    type Action = CustomerAction;
    type Error = DomainError;

    fn reduce(&self, action: &CustomerAction) -> DomainResult<Self> {
        match action {
            CustomerAction::Add { form, today } => self.add(form, *today),
            CustomerAction::Edit { id, form } => self.edit(*id, form),
            CustomerAction::Remove(id) => Ok(self.remove(*id)),
            CustomerAction::RecordPurchase {
                customer_id,
                date,
                amount,
                items,
                payment_method,
            } => self.record_purchase(*customer_id, *date, *amount, *items, payment_method),
        }
    }
}
