use serde::{Deserialize, Serialize};

use lithia_core::{DomainError, DomainResult, ItemId, Money, Reducer};
use lithia_events::Action;
use lithia_products::{Catalog, CatalogItem};

use crate::checkout::{Checkout, CheckoutLine};

/// One product/quantity pairing in the cart.
///
/// Prices are not cached on the line; they are resolved from the catalog
/// whenever a total is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub item_id: ItemId,
    /// Always >= 1; a line that would reach 0 is removed instead.
    pub quantity: u32,
}

/// Point-of-sale cart view-model.
///
/// Lines keep insertion order and carry unique `item_id`s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, item_id: ItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.item_id == item_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Units in the cart (the cart badge), not the number of lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Add one unit of `item`: bump the existing line or append a new one.
    pub fn add_item(&self, item: &CatalogItem) -> Cart {
        let mut lines = self.lines.clone();
        match lines.iter_mut().find(|line| line.item_id == item.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => lines.push(CartLine {
                item_id: item.id,
                quantity: 1,
            }),
        }
        tracing::debug!(item_id = %item.id, "cart item added");
        Cart { lines }
    }

    /// Set a line's quantity; `quantity <= 0` removes the line.
    ///
    /// Unknown ids are a no-op.
    pub fn set_quantity(&self, item_id: ItemId, quantity: i64) -> Cart {
        if quantity <= 0 {
            return self.remove_item(item_id);
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        Cart {
            lines: self
                .lines
                .iter()
                .map(|line| {
                    if line.item_id == item_id {
                        CartLine { item_id, quantity }
                    } else {
                        *line
                    }
                })
                .collect(),
        }
    }

    pub fn remove_item(&self, item_id: ItemId) -> Cart {
        Cart {
            lines: self
                .lines
                .iter()
                .filter(|line| line.item_id != item_id)
                .copied()
                .collect(),
        }
    }

    /// Exact, unrounded sum of quantity x current unit price.
    ///
    /// Lines whose item is no longer in the catalog contribute nothing.
    pub fn subtotal(&self, catalog: &Catalog) -> Money {
        self.lines
            .iter()
            .filter_map(|line| {
                catalog
                    .unit_price(line.item_id)
                    .map(|price| price.times(line.quantity))
            })
            .sum()
    }

    /// Cart total for display, rounded to cents.
    pub fn total(&self, catalog: &Catalog) -> Money {
        self.subtotal(catalog).rounded()
    }

    /// Snapshot the cart for payment and hand back an empty cart.
    ///
    /// An empty cart is refused (the pay button is a no-op).
    pub fn checkout(&self, catalog: &Catalog) -> DomainResult<(Cart, Checkout)> {
        if self.is_empty() {
            return Err(DomainError::validation("cart is empty"));
        }

        let lines: Vec<CheckoutLine> = self
            .lines
            .iter()
            .filter_map(|line| {
                catalog.get(line.item_id).map(|item| CheckoutLine {
                    item_id: item.id,
                    name: item.name.clone(),
                    quantity: line.quantity,
                    unit_price: item.unit_price,
                })
            })
            .collect();

        let checkout = Checkout {
            total: self.total(catalog),
            lines,
        };
        tracing::info!(total = %checkout.total, units = self.item_count(), "cart checked out");
        Ok((Cart::new(), checkout))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartAction {
    AddItem(CatalogItem),
    SetQuantity { item_id: ItemId, quantity: i64 },
    RemoveItem(ItemId),
    Clear,
}

impl Action for CartAction {
    fn action_type(&self) -> &'static str {
        match self {
            CartAction::AddItem(_) => "sales.cart.item_added",
            CartAction::SetQuantity { .. } => "sales.cart.quantity_set",
            CartAction::RemoveItem(_) => "sales.cart.item_removed",
            CartAction::Clear => "sales.cart.cleared",
        }
    }
}

impl Reducer for Cart {
    type Action = CartAction;
    type Error = DomainError;

    fn reduce(&self, action: &CartAction) -> DomainResult<Self> {
        Ok(match action {
            CartAction::AddItem(item) => self.add_item(item),
            CartAction::SetQuantity { item_id, quantity } => self.set_quantity(*item_id, *quantity),
            CartAction::RemoveItem(item_id) => self.remove_item(*item_id),
            CartAction::Clear => Cart::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn item(id: u32, price: Money) -> CatalogItem {
        CatalogItem {
            id: ItemId::new(id),
            name: format!("Item {id}"),
            unit_price: price,
            category: "Food".to_string(),
            stock_level: 10,
            barcode: None,
        }
    }

    fn test_catalog() -> Catalog {
        Catalog::new(vec![
            item(1, Money::new(dec!(4.99))),
            item(2, Money::new(dec!(8.99))),
            item(3, Money::new(dec!(3.50))),
            item(4, Money::new(dec!(0.10))),
        ])
        .unwrap()
    }

    #[test]
    fn adding_same_item_twice_bumps_quantity() {
        let catalog = test_catalog();
        let coffee = catalog.get(ItemId::new(1)).unwrap();

        let cart = Cart::new().add_item(coffee).add_item(coffee);

        assert_eq!(
            cart.lines(),
            &[CartLine {
                item_id: ItemId::new(1),
                quantity: 2
            }]
        );
        assert_eq!(cart.total(&catalog), Money::new(dec!(9.98)));
    }

    #[test]
    fn set_quantity_zero_or_negative_removes_line() {
        let catalog = test_catalog();
        let cart = Cart::new().add_item(catalog.get(ItemId::new(1)).unwrap());

        assert!(cart.set_quantity(ItemId::new(1), 0).is_empty());
        assert!(cart.set_quantity(ItemId::new(1), -3).is_empty());
    }

    #[test]
    fn set_quantity_on_unknown_item_is_noop() {
        let catalog = test_catalog();
        let cart = Cart::new().add_item(catalog.get(ItemId::new(1)).unwrap());

        assert_eq!(cart.set_quantity(ItemId::new(99), 5), cart);
    }

    #[test]
    fn set_quantity_replaces_value() {
        let catalog = test_catalog();
        let cart = Cart::new()
            .add_item(catalog.get(ItemId::new(2)).unwrap())
            .set_quantity(ItemId::new(2), 4);

        assert_eq!(cart.line(ItemId::new(2)).unwrap().quantity, 4);
        assert_eq!(cart.item_count(), 4);
        assert_eq!(cart.total(&catalog), Money::new(dec!(35.96)));
    }

    #[test]
    fn total_reads_prices_from_catalog_at_read_time() {
        let catalog = test_catalog();
        let cart = Cart::new().add_item(catalog.get(ItemId::new(3)).unwrap());
        assert_eq!(cart.total(&catalog), Money::new(dec!(3.50)));

        let repriced = catalog
            .upsert(&lithia_products::ProductForm {
                id: Some(ItemId::new(3)),
                name: "Item 3".to_string(),
                unit_price: Money::new(dec!(3.75)),
                category: "Food".to_string(),
                stock_level: 10,
                barcode: None,
            })
            .unwrap();
        assert_eq!(cart.total(&repriced), Money::new(dec!(3.75)));
    }

    #[test]
    fn many_small_lines_do_not_drift() {
        let catalog = test_catalog();
        let cart = Cart::new()
            .add_item(catalog.get(ItemId::new(4)).unwrap())
            .set_quantity(ItemId::new(4), 1_000);
        assert_eq!(cart.total(&catalog), Money::new(dec!(100.00)));
    }

    #[test]
    fn items_missing_from_catalog_contribute_nothing() {
        let catalog = test_catalog();
        let cart = Cart::new()
            .add_item(catalog.get(ItemId::new(1)).unwrap())
            .add_item(catalog.get(ItemId::new(2)).unwrap());
        let shrunk = catalog.remove(ItemId::new(2));
        assert_eq!(cart.total(&shrunk), Money::new(dec!(4.99)));
    }

    #[test]
    fn checkout_of_empty_cart_is_refused() {
        let err = Cart::new().checkout(&test_catalog()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn checkout_clears_cart_and_snapshots_total() {
        let catalog = test_catalog();
        let cart = Cart::new()
            .add_item(catalog.get(ItemId::new(1)).unwrap())
            .add_item(catalog.get(ItemId::new(2)).unwrap())
            .add_item(catalog.get(ItemId::new(1)).unwrap());

        let (cleared, checkout) = cart.checkout(&catalog).unwrap();

        assert!(cleared.is_empty());
        assert_eq!(checkout.total, Money::new(dec!(18.97)));
        assert_eq!(checkout.lines.len(), 2);
        assert_eq!(checkout.lines[0].quantity, 2);
        assert_eq!(checkout.lines[0].name, "Item 1");
    }

    #[test]
    fn reducer_clear_empties_cart() {
        let catalog = test_catalog();
        let cart = Cart::new().add_item(catalog.get(ItemId::new(1)).unwrap());
        assert!(cart.reduce(&CartAction::Clear).unwrap().is_empty());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: the total only depends on the multiset of added items.
        #[test]
        fn total_is_order_independent(
            (picks, shuffled) in prop::collection::vec(1u32..=4u32, 0..30)
                .prop_flat_map(|picks| (Just(picks.clone()), Just(picks).prop_shuffle())),
        ) {
            let catalog = test_catalog();

            let forward = picks
                .iter()
                .fold(Cart::new(), |cart, id| cart.add_item(catalog.get(ItemId::new(*id)).unwrap()));

            let permuted = shuffled
                .iter()
                .fold(Cart::new(), |cart, id| cart.add_item(catalog.get(ItemId::new(*id)).unwrap()));

            prop_assert_eq!(forward.total(&catalog), permuted.total(&catalog));
            prop_assert_eq!(forward.item_count(), picks.len() as u64);
        }

        /// Property: no line is ever kept at quantity zero.
        #[test]
        fn quantities_stay_positive(
            ops in prop::collection::vec((1u32..=4u32, -3i64..5i64), 0..30)
        ) {
            let catalog = test_catalog();
            let mut cart = Cart::new();
            for (id, qty) in ops {
                let item_id = ItemId::new(id);
                cart = cart.add_item(catalog.get(item_id).unwrap()).set_quantity(item_id, qty);
            }
            prop_assert!(cart.lines().iter().all(|line| line.quantity >= 1));
        }
    }
}
