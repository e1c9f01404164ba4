//! One running point-of-sale session.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use lithia_core::{CustomerId, DomainError, DomainResult, ItemId, Money};
use lithia_events::Store;
use lithia_inventory::Inventory;
use lithia_parties::{CustomerAction, CustomerDirectory, CustomerStatus};
use lithia_products::{Catalog, CatalogItem};
use lithia_reports::{InventorySummary, ReportData, SalesReport, TransactionSummary, total_sales};
use lithia_sales::{
    Cart, CartAction, CustomerRef, Discount, PaymentMethod, SaleContext, TransactionFilter,
    TransactionLog, TransactionLogAction, TransactionRecord, TransactionStatus, complete_sale,
    price_cart,
};
use lithia_settings::{AppConfig, Settings};

use crate::page::Page;
use crate::seed;

/// Everything the pay button needs besides the cart itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRequest {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub cashier: String,
    pub customer: Option<CustomerId>,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub discount: Discount,
    pub notes: Option<String>,
}

/// Stat cards of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub todays_sales: Money,
    pub transactions_today: usize,
    pub products: usize,
    pub active_customers: usize,
    pub low_stock_items: usize,
}

/// Screen stores plus navigation.
#[derive(Debug)]
pub struct Session {
    pub catalog: Store<Catalog>,
    pub cart: Store<Cart>,
    pub inventory: Store<Inventory>,
    pub transactions: Store<TransactionLog>,
    pub customers: Store<CustomerDirectory>,
    pub settings: Store<Settings>,
    pub reports: ReportData,
    page: Page,
}

impl Session {
    pub fn new(
        catalog: Catalog,
        inventory: Inventory,
        transactions: TransactionLog,
        customers: CustomerDirectory,
        settings: Settings,
        reports: ReportData,
    ) -> Self {
        Self {
            catalog: Store::new(catalog),
            cart: Store::new(Cart::new()),
            inventory: Store::new(inventory),
            transactions: Store::new(transactions),
            customers: Store::new(customers),
            settings: Store::new(settings),
            reports,
            page: Page::default(),
        }
    }

    /// Session over the sample data, with `config` applied to the settings.
    pub fn seeded(config: &AppConfig) -> DomainResult<Self> {
        let settings = config.apply(&seed::settings()?)?;
        let session = Self::new(
            seed::catalog()?,
            seed::inventory()?,
            seed::transactions()?,
            seed::customers()?,
            settings,
            seed::reports()?,
        );
        tracing::info!(
            products = session.catalog.state().len(),
            customers = session.customers.state().customers().len(),
            "session seeded"
        );
        Ok(session)
    }

    pub fn page(&self) -> Page {
        self.page
    }

    /// Follow a sidebar link; unknown routes land on the dashboard.
    pub fn navigate(&mut self, path: &str) -> Page {
        self.page = Page::from_path(path);
        tracing::debug!(path, page = self.page.label(), "navigated");
        self.page
    }

    /// Product grid of the sales screen, filtered by name.
    pub fn product_grid(&self, search: &str) -> Vec<&CatalogItem> {
        self.catalog.state().search_by_name(search)
    }

    /// Add one unit of a catalog item to the cart.
    pub fn add_to_cart(&mut self, item_id: ItemId) -> DomainResult<u64> {
        let item = self
            .catalog
            .state()
            .get(item_id)
            .cloned()
            .ok_or_else(DomainError::not_found)?;
        self.cart.dispatch(CartAction::AddItem(item))
    }

    pub fn set_cart_quantity(&mut self, item_id: ItemId, quantity: i64) -> DomainResult<u64> {
        self.cart.dispatch(CartAction::SetQuantity { item_id, quantity })
    }

    /// Current cart total at live catalog prices.
    pub fn cart_total(&self) -> Money {
        self.cart.state().total(self.catalog.state())
    }

    /// Pay for the cart: price it with the default tax rate, record the
    /// transaction, empty the cart and credit the customer, if any.
    ///
    /// Nothing changes when any step is refused (empty cart, unknown
    /// customer, bad discount).
    pub fn checkout_sale(&mut self, request: SaleRequest) -> DomainResult<TransactionRecord> {
        let catalog = self.catalog.state();
        let totals = price_cart(
            self.cart.state(),
            catalog,
            self.settings.state().default_tax_rate(),
            request.discount,
        )?;
        let (_, checkout) = self.cart.state().checkout(catalog)?;

        let customer = match request.customer {
            Some(id) => {
                let customer = self
                    .customers
                    .state()
                    .get(id)
                    .ok_or_else(DomainError::not_found)?;
                Some(CustomerRef {
                    id,
                    name: customer.name.clone(),
                })
            }
            None => None,
        };

        let record = complete_sale(
            &checkout,
            &totals,
            SaleContext {
                sequence: self.transactions.state().next_sequence()?,
                date: request.date,
                time: request.time,
                cashier: request.cashier,
                customer,
                payment_method: request.payment_method,
                notes: request.notes,
            },
        )?;

        self.transactions
            .dispatch(TransactionLogAction::Record(record.clone()))?;
        self.cart.dispatch(CartAction::Clear)?;
        if let Some(customer) = &record.customer {
            let items = u32::try_from(record.item_quantity()).unwrap_or(u32::MAX);
            self.customers.dispatch(CustomerAction::RecordPurchase {
                customer_id: customer.id,
                date: record.date,
                amount: record.total,
                items,
                payment_method: record.payment_method.as_str().to_string(),
            })?;
        }
        Ok(record)
    }

    /// Transactions screen: the filtered rows and their stat cards.
    pub fn transactions_view(
        &self,
        filter: &TransactionFilter,
        today: NaiveDate,
    ) -> (Vec<&TransactionRecord>, TransactionSummary) {
        let rows = self.transactions.state().filter(filter, today);
        let summary = TransactionSummary::from_records(&rows);
        (rows, summary)
    }

    pub fn sales_report(&self) -> SalesReport {
        SalesReport::build(&self.reports)
    }

    pub fn inventory_summary(&self) -> InventorySummary {
        InventorySummary::from_inventory(self.inventory.state())
    }

    /// Dashboard cards. Only completed sales dated `today` count as sales.
    pub fn dashboard(&self, today: NaiveDate) -> DashboardStats {
        let todays: Vec<&TransactionRecord> = self
            .transactions
            .state()
            .records()
            .iter()
            .filter(|r| r.date == today && r.status == TransactionStatus::Completed)
            .collect();

        DashboardStats {
            todays_sales: total_sales(&todays),
            transactions_today: todays.len(),
            products: self.catalog.state().len(),
            active_customers: self
                .customers
                .state()
                .customers()
                .iter()
                .filter(|c| matches!(c.status, CustomerStatus::Active | CustomerStatus::Vip))
                .count(),
            low_stock_items: self.inventory.state().low_stock_items().len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn session() -> Session {
        Session::seeded(&AppConfig::default()).unwrap()
    }

    fn today() -> NaiveDate {
        seed::business_date().unwrap()
    }

    fn request(customer: Option<u32>) -> SaleRequest {
        SaleRequest {
            date: today(),
            time: NaiveTime::from_hms_opt(15, 5, 0).unwrap(),
            cashier: "Alice Cashier".to_string(),
            customer: customer.map(CustomerId::new),
            payment_method: PaymentMethod::CreditCard,
            discount: Discount::None,
            notes: None,
        }
    }

    #[test]
    fn seeded_dashboard() {
        let stats = session().dashboard(today());
        assert_eq!(stats.todays_sales, Money::new(dec!(44.28)));
        assert_eq!(stats.transactions_today, 3);
        assert_eq!(stats.products, 6);
        assert_eq!(stats.active_customers, 2);
        assert_eq!(stats.low_stock_items, 2);
    }

    #[test]
    fn navigation() {
        let mut session = session();
        assert_eq!(session.page(), Page::Dashboard);
        assert_eq!(session.navigate("/sales"), Page::Sales);
        assert_eq!(session.navigate("/missing"), Page::Dashboard);
    }

    #[test]
    fn product_grid_searches_names_only() {
        let session = session();
        let names: Vec<_> = session
            .product_grid("COF")
            .into_iter()
            .map(|item| item.name.as_str())
            .collect();
        assert_eq!(names, vec!["Coffee"]);
        assert!(session.product_grid("food").is_empty());
        assert_eq!(session.product_grid("").len(), 6);
    }

    #[test]
    fn unknown_item_cannot_be_added() {
        let mut session = session();
        assert_eq!(
            session.add_to_cart(ItemId::new(99)).unwrap_err(),
            DomainError::NotFound
        );
        assert!(session.cart.state().is_empty());
    }

    #[test]
    fn empty_cart_checkout_changes_nothing() {
        let mut session = session();
        let before = session.transactions.version();
        assert!(matches!(
            session.checkout_sale(request(None)),
            Err(DomainError::Validation(_))
        ));
        assert_eq!(session.transactions.version(), before);
    }

    #[test]
    fn unknown_customer_aborts_checkout() {
        let mut session = session();
        session.add_to_cart(ItemId::new(1)).unwrap();
        assert_eq!(
            session.checkout_sale(request(Some(42))).unwrap_err(),
            DomainError::NotFound
        );
        assert_eq!(session.cart.state().item_count(), 1);
        assert_eq!(session.transactions.state().records().len(), 4);
    }

    #[test]
    fn checkout_records_and_clears() {
        let mut session = session();
        session.add_to_cart(ItemId::new(1)).unwrap();
        session.add_to_cart(ItemId::new(1)).unwrap();
        assert_eq!(session.cart_total(), Money::new(dec!(9.98)));

        let record = session.checkout_sale(request(None)).unwrap();
        assert_eq!(record.id, "TXN-005");
        assert_eq!(record.receipt_number, "RCP-005");
        assert_eq!(record.subtotal, Money::new(dec!(9.98)));
        // 8.5 % of 9.98 = 0.8483
        assert_eq!(record.tax, Money::new(dec!(0.85)));
        assert_eq!(record.total, Money::new(dec!(10.83)));
        assert!(session.cart.state().is_empty());
    }
}
