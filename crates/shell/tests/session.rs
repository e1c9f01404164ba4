use chrono::NaiveTime;
use rust_decimal_macros::dec;

use lithia_core::{CustomerId, ItemId, Money, Reducer};
use lithia_inventory::{InventoryAction, StockAdjustment, StockStatus};
use lithia_parties::CustomerStatus;
use lithia_sales::{DateFilter, Discount, PaymentMethod, TransactionFilter, TransactionStatus};
use lithia_settings::{AppConfig, SettingsAction};
use lithia_shell::{SaleRequest, Session, seed};

fn session() -> Session {
    Session::seeded(&AppConfig::default()).expect("seed data is valid")
}

fn sale(customer: Option<u32>, discount: Discount) -> SaleRequest {
    SaleRequest {
        date: seed::business_date().unwrap(),
        time: NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
        cashier: "Alice Cashier".to_string(),
        customer: customer.map(CustomerId::new),
        payment_method: PaymentMethod::Cash,
        discount,
        notes: Some("integration".to_string()),
    }
}

#[test]
fn sale_flows_into_transactions_customers_and_dashboard() {
    let mut session = session();
    let today = seed::business_date().unwrap();
    let log_updates = session.transactions.subscribe();
    let customer_updates = session.customers.subscribe();

    // Sandwich + 2 x Muffin = 14.97
    session.add_to_cart(ItemId::new(2)).unwrap();
    session.add_to_cart(ItemId::new(5)).unwrap();
    session.add_to_cart(ItemId::new(5)).unwrap();

    let record = session
        .checkout_sale(sale(Some(3), Discount::Amount(Money::new(dec!(4.97)))))
        .unwrap();
    // base 10.00, tax 8.5 % = 0.85
    assert_eq!(record.subtotal, Money::new(dec!(14.97)));
    assert_eq!(record.discount, Money::new(dec!(4.97)));
    assert_eq!(record.tax, Money::new(dec!(0.85)));
    assert_eq!(record.total, Money::new(dec!(10.85)));
    assert_eq!(record.customer.as_ref().unwrap().name, "Mike Wilson");

    let changes = log_updates.drain();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].action_type, "sales.transaction.recorded");
    assert_eq!(customer_updates.drain().len(), 1);

    let mike = session.customers.state().get(CustomerId::new(3)).unwrap();
    assert_eq!(mike.total_spent, Money::new(dec!(131.10)));
    assert_eq!(mike.total_orders, 4);
    assert_eq!(mike.status, CustomerStatus::Inactive);

    let stats = session.dashboard(today);
    assert_eq!(stats.transactions_today, 4);
    assert_eq!(stats.todays_sales, Money::new(dec!(55.13)));

    let filter = TransactionFilter {
        search: "mike".to_string(),
        date: DateFilter::Today,
        ..TransactionFilter::default()
    };
    let (rows, summary) = session.transactions_view(&filter, today);
    assert_eq!(rows.len(), 1);
    assert_eq!(summary.completed, 1);
    assert_eq!(summary.revenue, Money::new(dec!(10.85)));
}

#[test]
fn changing_the_default_tax_rate_changes_checkout() {
    let mut session = session();
    let luxury = session
        .settings
        .state()
        .tax_rates()
        .rates()
        .iter()
        .find(|rate| rate.name == "Luxury Tax")
        .map(|rate| rate.id)
        .unwrap();
    session
        .settings
        .dispatch(SettingsAction::SetDefaultTax(luxury))
        .unwrap();

    session.add_to_cart(ItemId::new(6)).unwrap();
    let record = session.checkout_sale(sale(None, Discount::None)).unwrap();
    // 5.99 * 15 % = 0.8985
    assert_eq!(record.tax, Money::new(dec!(0.90)));
    assert_eq!(record.total, Money::new(dec!(6.89)));
}

#[test]
fn refunded_seed_transaction_is_not_today() {
    let session = session();
    let today = seed::business_date().unwrap();
    let filter = TransactionFilter {
        status: Some(TransactionStatus::Refunded),
        date: DateFilter::Yesterday,
        ..TransactionFilter::default()
    };
    let (rows, summary) = session.transactions_view(&filter, today);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, "TXN-004");
    assert_eq!(summary.completed, 0);
}

#[test]
fn restocking_clears_the_low_stock_card() {
    let mut session = session();
    let today = seed::business_date().unwrap();
    let adjust = |sku: &str, delta| {
        InventoryAction::Adjust(StockAdjustment {
            sku: sku.to_string(),
            delta,
            reason: "Purchase order #PO-002".to_string(),
            user: "Admin".to_string(),
            date: today,
        })
    };

    session.inventory.dispatch(adjust("BRD-001", 20)).unwrap();
    session.inventory.dispatch(adjust("CUP-001", 300)).unwrap();

    let inventory = session.inventory.state();
    assert_eq!(inventory.get("BRD-001").unwrap().status(), StockStatus::InStock);
    assert_eq!(inventory.movements().len(), 5);
    assert_eq!(session.dashboard(today).low_stock_items, 0);
    assert_eq!(session.inventory_summary().out_of_stock, 0);
}

#[test]
fn seeded_sales_report() {
    let report = session().sales_report();
    assert_eq!(report.overview.total_sales, Money::new(dec!(9443.00)));
    assert_eq!(report.overview.total_transactions, 341);
    assert_eq!(report.top_product.unwrap().name, "Sandwich");
    assert_eq!(report.units_sold, 491);
    let total: rust_decimal::Decimal = report.categories.iter().map(|c| c.percentage).sum();
    assert_eq!(total, dec!(100.0));
}

#[test]
fn config_overrides_apply_to_the_session() {
    let config = AppConfig {
        store_name: Some("Corner Cafe".to_string()),
        default_tax_rate: Some(dec!(0)),
        ..AppConfig::default()
    };
    let mut session = Session::seeded(&config).unwrap();
    assert_eq!(session.settings.state().store.name, "Corner Cafe");

    session.add_to_cart(ItemId::new(1)).unwrap();
    let record = session.checkout_sale(sale(None, Discount::None)).unwrap();
    assert_eq!(record.tax, Money::ZERO);

    // the reducer is still usable directly on a snapshot
    let snapshot = session.settings.state().clone();
    assert!(snapshot.reduce(&SettingsAction::SetDarkMode(true)).unwrap().dark_mode);
}
