//! Sales domain module: the point-of-sale cart, order pricing, checkout and
//! the transaction history.
//!
//! Everything here is deterministic domain logic (no IO, no payment gateway,
//! no storage).

pub mod cart;
pub mod checkout;
pub mod pricing;
pub mod transaction;

pub use cart::{Cart, CartAction, CartLine};
pub use checkout::{Checkout, CheckoutLine, SaleContext, complete_sale};
pub use pricing::{Discount, OrderTotals, price_cart, price_order};
pub use transaction::{
    CustomerRef, DateFilter, LineItem, PaymentMethod, TransactionFilter, TransactionLog,
    TransactionLogAction, TransactionRecord, TransactionStatus,
};
