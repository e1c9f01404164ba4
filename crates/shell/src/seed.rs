//! Sample data every screen starts from.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal_macros::dec;

use lithia_core::{CustomerId, DomainError, DomainResult, ItemId, Money, MovementId, PurchaseId, UserId};
use lithia_inventory::{Inventory, InventoryRecord, InventoryRecordFields, MovementKind, StockMovement};
use lithia_parties::{Customer, CustomerDirectory, CustomerPurchase, CustomerStatus};
use lithia_products::{Catalog, CatalogItem};
use lithia_reports::{CategorySales, DailySales, ProductSales, ReportData};
use lithia_sales::{
    CustomerRef, LineItem, PaymentMethod, TransactionLog, TransactionRecord, TransactionStatus,
};
use lithia_settings::{Role, Settings, StaffUser, TaxTable, UserStatus};

fn date(raw: &str) -> DomainResult<NaiveDate> {
    raw.parse()
        .map_err(|_| DomainError::validation(format!("bad seed date {raw:?}")))
}

fn time(raw: &str) -> DomainResult<NaiveTime> {
    raw.parse()
        .map_err(|_| DomainError::validation(format!("bad seed time {raw:?}")))
}

fn timestamp(raw: &str) -> DomainResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .map_err(|_| DomainError::validation(format!("bad seed timestamp {raw:?}")))
}

/// The day the sample data was captured on; "today" for the demo session.
pub fn business_date() -> DomainResult<NaiveDate> {
    date("2024-06-13")
}

pub fn catalog() -> DomainResult<Catalog> {
    let item = |id: u32, name: &str, price: Money, category: &str, stock: u32| CatalogItem {
        id: ItemId::new(id),
        name: name.to_string(),
        unit_price: price,
        category: category.to_string(),
        stock_level: stock,
        barcode: None,
    };
    Catalog::new(vec![
        item(1, "Coffee", Money::new(dec!(4.99)), "Beverages", 50),
        item(2, "Sandwich", Money::new(dec!(8.99)), "Food", 25),
        item(3, "Pastry", Money::new(dec!(3.50)), "Food", 30),
        item(4, "Tea", Money::new(dec!(3.99)), "Beverages", 40),
        item(5, "Muffin", Money::new(dec!(2.99)), "Food", 20),
        item(6, "Juice", Money::new(dec!(5.99)), "Beverages", 35),
    ])
}

pub fn inventory() -> DomainResult<Inventory> {
    struct Row<'a> {
        id: u32,
        name: &'a str,
        sku: &'a str,
        category: &'a str,
        stock: [u32; 3],
        unit: &'a str,
        cost: Money,
        price: Money,
        supplier: &'a str,
        restocked: &'a str,
    }

    let rows = [
        Row {
            id: 1,
            name: "Premium Coffee Beans",
            sku: "COF-001",
            category: "Beverages",
            stock: [45, 20, 100],
            unit: "kg",
            cost: Money::new(dec!(12.50)),
            price: Money::new(dec!(18.99)),
            supplier: "Coffee Co.",
            restocked: "2024-06-10",
        },
        Row {
            id: 2,
            name: "Sandwich Bread",
            sku: "BRD-001",
            category: "Food",
            stock: [8, 15, 50],
            unit: "pcs",
            cost: Money::new(dec!(2.00)),
            price: Money::new(dec!(3.50)),
            supplier: "Bakery Plus",
            restocked: "2024-06-12",
        },
        Row {
            id: 3,
            name: "Paper Cups",
            sku: "CUP-001",
            category: "Supplies",
            stock: [0, 100, 500],
            unit: "pcs",
            cost: Money::new(dec!(0.15)),
            price: Money::new(dec!(0.25)),
            supplier: "Supply Hub",
            restocked: "2024-06-05",
        },
        Row {
            id: 4,
            name: "Fresh Milk",
            sku: "MLK-001",
            category: "Beverages",
            stock: [25, 10, 40],
            unit: "L",
            cost: Money::new(dec!(1.80)),
            price: Money::new(dec!(2.99)),
            supplier: "Dairy Farm",
            restocked: "2024-06-13",
        },
    ];

    let records = rows
        .iter()
        .map(|row| {
            let [current_stock, min_stock, max_stock] = row.stock;
            InventoryRecord::new(InventoryRecordFields {
                id: ItemId::new(row.id),
                name: row.name.to_string(),
                sku: row.sku.to_string(),
                category: row.category.to_string(),
                current_stock,
                min_stock,
                max_stock,
                unit: row.unit.to_string(),
                cost_price: row.cost,
                selling_price: row.price,
                supplier: row.supplier.to_string(),
                last_restocked: date(row.restocked)?,
            })
        })
        .collect::<DomainResult<Vec<_>>>()?;

    let movement = |id: u32, item: u32, name: &str, kind: MovementKind, quantity: i64, reason: &str, on: &str, user: &str| {
        Ok::<_, DomainError>(StockMovement {
            id: MovementId::new(id),
            item_id: ItemId::new(item),
            item_name: name.to_string(),
            kind,
            quantity,
            reason: reason.to_string(),
            date: date(on)?,
            user: user.to_string(),
        })
    };
    let movements = vec![
        movement(1, 1, "Premium Coffee Beans", MovementKind::In, 25, "Purchase order #PO-001", "2024-06-10", "Admin")?,
        movement(2, 2, "Sandwich Bread", MovementKind::Out, 12, "Sale transaction", "2024-06-12", "Cashier 1")?,
        movement(3, 3, "Paper Cups", MovementKind::Out, 50, "Sale transaction", "2024-06-11", "Cashier 2")?,
    ];

    Inventory::new(records, movements)
}

fn line(product: u32, name: &str, quantity: u32, unit_price: Money) -> LineItem {
    LineItem {
        product_id: ItemId::new(product),
        product_name: name.to_string(),
        quantity,
        unit_price,
    }
}

pub fn transactions() -> DomainResult<TransactionLog> {
    let customer = |id: u32, name: &str| {
        Some(CustomerRef {
            id: CustomerId::new(id),
            name: name.to_string(),
        })
    };

    TransactionLog::new(vec![
        TransactionRecord {
            id: "TXN-001".to_string(),
            date: date("2024-06-13")?,
            time: time("14:30:25")?,
            customer: customer(1, "John Smith"),
            line_items: vec![
                line(1, "Premium Coffee", 2, Money::new(dec!(4.99))),
                line(2, "Croissant", 1, Money::new(dec!(3.50))),
            ],
            subtotal: Money::new(dec!(13.48)),
            tax: Money::new(dec!(1.35)),
            discount: Money::ZERO,
            total: Money::new(dec!(14.83)),
            payment_method: PaymentMethod::CreditCard,
            status: TransactionStatus::Completed,
            cashier: "Alice Johnson".to_string(),
            receipt_number: "RCP-001".to_string(),
            notes: Some("Customer requested extra hot".to_string()),
        },
        TransactionRecord {
            id: "TXN-002".to_string(),
            date: date("2024-06-13")?,
            time: time("13:45:12")?,
            customer: None,
            line_items: vec![
                line(3, "Sandwich", 1, Money::new(dec!(8.99))),
                line(4, "Juice", 1, Money::new(dec!(3.99))),
            ],
            subtotal: Money::new(dec!(12.98)),
            tax: Money::new(dec!(1.30)),
            discount: Money::new(dec!(1.30)),
            total: Money::new(dec!(12.98)),
            payment_method: PaymentMethod::Cash,
            status: TransactionStatus::Completed,
            cashier: "Bob Wilson".to_string(),
            receipt_number: "RCP-002".to_string(),
            notes: None,
        },
        TransactionRecord {
            id: "TXN-003".to_string(),
            date: date("2024-06-13")?,
            time: time("12:15:08")?,
            customer: customer(2, "Sarah Johnson"),
            line_items: vec![line(1, "Premium Coffee", 3, Money::new(dec!(4.99)))],
            subtotal: Money::new(dec!(14.97)),
            tax: Money::new(dec!(1.50)),
            discount: Money::ZERO,
            total: Money::new(dec!(16.47)),
            payment_method: PaymentMethod::MobilePayment,
            status: TransactionStatus::Completed,
            cashier: "Alice Johnson".to_string(),
            receipt_number: "RCP-003".to_string(),
            notes: None,
        },
        TransactionRecord {
            id: "TXN-004".to_string(),
            date: date("2024-06-12")?,
            time: time("16:22:45")?,
            customer: None,
            line_items: vec![line(5, "Muffin", 2, Money::new(dec!(2.99)))],
            subtotal: Money::new(dec!(5.98)),
            tax: Money::new(dec!(0.60)),
            discount: Money::ZERO,
            total: Money::new(dec!(6.58)),
            payment_method: PaymentMethod::DebitCard,
            status: TransactionStatus::Refunded,
            cashier: "Bob Wilson".to_string(),
            receipt_number: "RCP-004".to_string(),
            notes: Some("Customer returned - quality issue".to_string()),
        },
    ])
}

pub fn customers() -> DomainResult<CustomerDirectory> {
    let customers = vec![
        Customer {
            id: CustomerId::new(1),
            name: "John Smith".to_string(),
            email: "john.smith@email.com".to_string(),
            phone: "+1-555-0123".to_string(),
            address: "123 Main St".to_string(),
            city: "New York".to_string(),
            zip_code: "10001".to_string(),
            date_joined: date("2024-01-15")?,
            total_spent: Money::new(dec!(1250.75)),
            total_orders: 18,
            last_purchase: Some(date("2024-06-10")?),
            loyalty_points: 125,
            status: CustomerStatus::Vip,
            notes: "Prefers organic coffee".to_string(),
        },
        Customer {
            id: CustomerId::new(2),
            name: "Sarah Johnson".to_string(),
            email: "sarah.j@email.com".to_string(),
            phone: "+1-555-0124".to_string(),
            address: "456 Oak Ave".to_string(),
            city: "Los Angeles".to_string(),
            zip_code: "90210".to_string(),
            date_joined: date("2024-03-22")?,
            total_spent: Money::new(dec!(680.50)),
            total_orders: 12,
            last_purchase: Some(date("2024-06-12")?),
            loyalty_points: 68,
            status: CustomerStatus::Active,
            notes: "Regular customer, visits every Tuesday".to_string(),
        },
        Customer {
            id: CustomerId::new(3),
            name: "Mike Wilson".to_string(),
            email: "mike.w@email.com".to_string(),
            phone: "+1-555-0125".to_string(),
            address: "789 Pine St".to_string(),
            city: "Chicago".to_string(),
            zip_code: "60601".to_string(),
            date_joined: date("2024-02-10")?,
            total_spent: Money::new(dec!(120.25)),
            total_orders: 3,
            last_purchase: Some(date("2024-05-15")?),
            loyalty_points: 12,
            status: CustomerStatus::Inactive,
            notes: String::new(),
        },
    ];

    let purchase = |id: u32, customer: u32, on: &str, amount: Money, items: u32, method: &str| {
        Ok::<_, DomainError>(CustomerPurchase {
            id: PurchaseId::new(id),
            customer_id: CustomerId::new(customer),
            date: date(on)?,
            amount,
            items,
            payment_method: method.to_string(),
        })
    };
    let purchases = vec![
        purchase(1, 1, "2024-06-10", Money::new(dec!(45.99)), 3, "Credit Card")?,
        purchase(2, 1, "2024-06-08", Money::new(dec!(28.50)), 2, "Cash")?,
        purchase(3, 2, "2024-06-12", Money::new(dec!(32.75)), 4, "Debit Card")?,
        purchase(4, 2, "2024-06-09", Money::new(dec!(15.99)), 1, "Cash")?,
    ];

    CustomerDirectory::new(customers, purchases)
}

pub fn settings() -> DomainResult<Settings> {
    let user = |id: u32, name: &str, email: &str, role: Role, login: &str| {
        Ok::<_, DomainError>(StaffUser {
            id: UserId::new(id),
            name: name.to_string(),
            email: email.to_string(),
            role,
            status: UserStatus::Active,
            last_login: Some(timestamp(login)?),
        })
    };
    Settings::new(
        TaxTable::default(),
        vec![
            user(1, "Admin User", "admin@lithiapos.com", Role::Admin, "2024-06-13 14:30:00")?,
            user(2, "John Manager", "john@lithiapos.com", Role::Manager, "2024-06-13 12:15:00")?,
            user(3, "Alice Cashier", "alice@lithiapos.com", Role::Cashier, "2024-06-13 10:45:00")?,
        ],
    )
}

/// Last seven days of the sales report.
pub fn reports() -> DomainResult<ReportData> {
    let day = |on: &str, sales: Money, transactions: u32| {
        Ok::<_, DomainError>(DailySales {
            date: date(on)?,
            sales,
            transactions,
        })
    };
    let product = |name: &str, quantity: u32, revenue: Money| ProductSales {
        name: name.to_string(),
        quantity,
        revenue,
    };
    let category = |name: &str, sales: Money| CategorySales {
        category: name.to_string(),
        sales,
    };

    Ok(ReportData {
        daily: vec![
            day("2024-06-07", Money::new(dec!(1250.75)), 45)?,
            day("2024-06-08", Money::new(dec!(980.50)), 38)?,
            day("2024-06-09", Money::new(dec!(1180.25)), 42)?,
            day("2024-06-10", Money::new(dec!(1450.00)), 52)?,
            day("2024-06-11", Money::new(dec!(1320.75)), 48)?,
            day("2024-06-12", Money::new(dec!(1680.25)), 61)?,
            day("2024-06-13", Money::new(dec!(1580.50)), 55)?,
        ],
        products: vec![
            product("Premium Coffee", 156, Money::new(dec!(778.44))),
            product("Sandwich", 89, Money::new(dec!(800.11))),
            product("Pastry", 134, Money::new(dec!(469.00))),
            product("Tea", 67, Money::new(dec!(267.33))),
            product("Juice", 45, Money::new(dec!(269.55))),
        ],
        categories: vec![
            category("Beverages", Money::new(dec!(3250.75))),
            category("Food", Money::new(dec!(2890.50))),
            category("Snacks", Money::new(dec!(750.25))),
            category("Others", Money::new(dec!(298.50))),
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_seed_builds() {
        assert_eq!(catalog().unwrap().len(), 6);
        assert_eq!(inventory().unwrap().records().len(), 4);
        assert_eq!(transactions().unwrap().records().len(), 4);
        assert_eq!(customers().unwrap().customers().len(), 3);
        assert_eq!(settings().unwrap().users().len(), 3);
        assert_eq!(reports().unwrap().daily.len(), 7);
    }

    #[test]
    fn seeded_inventory_statuses() {
        use lithia_inventory::StockStatus;

        let inventory = inventory().unwrap();
        let statuses: Vec<StockStatus> = inventory.records().iter().map(|r| r.status()).collect();
        assert_eq!(
            statuses,
            vec![
                StockStatus::InStock,
                StockStatus::LowStock,
                StockStatus::OutOfStock,
                StockStatus::InStock
            ]
        );
        assert_eq!(inventory.total_value(), Money::new(dec!(623.50)));
    }
}
