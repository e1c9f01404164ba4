//! Headless point-of-sale demo: seeds a session, rings up one sale and
//! prints the resulting dashboard as JSON.

use anyhow::Context;
use chrono::NaiveTime;

use lithia_core::{CustomerId, ItemId};
use lithia_sales::{Discount, PaymentMethod};
use lithia_settings::AppConfig;
use lithia_shell::{Page, SaleRequest, Session, seed};

fn main() -> anyhow::Result<()> {
    lithia_observability::init();

    let config = AppConfig::from_env().context("invalid LITHIA_* configuration")?;
    let mut session = Session::seeded(&config).context("failed to seed session")?;
    let today = seed::business_date()?;

    let updates = session.transactions.subscribe();

    session.navigate(Page::Sales.path());
    for item in [1, 1, 3] {
        session.add_to_cart(ItemId::new(item))?;
    }
    let record = session.checkout_sale(SaleRequest {
        date: today,
        time: NaiveTime::from_hms_opt(15, 5, 0).context("invalid sale time")?,
        cashier: "Alice Cashier".to_string(),
        customer: Some(CustomerId::new(1)),
        payment_method: PaymentMethod::CreditCard,
        discount: Discount::None,
        notes: None,
    })?;
    for change in updates.drain() {
        tracing::info!(action = %change.action_type, version = change.version, "transactions updated");
    }
    tracing::info!(transaction = %record.id, total = %record.total, "sale completed");

    session.navigate(Page::Dashboard.path());
    println!("{}", serde_json::to_string_pretty(&session.dashboard(today))?);
    Ok(())
}
