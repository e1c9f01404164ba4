use serde::{Deserialize, Serialize};

use lithia_core::{DomainError, DomainResult, Entity, ItemId, Money, Reducer, next_id};
use lithia_events::Action;

/// Items with fewer units than this are counted on the "low stock" badge.
pub const LOW_STOCK_BADGE: u32 = 10;

/// A sellable item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ItemId,
    pub name: String,
    pub unit_price: Money,
    pub category: String,
    pub stock_level: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
}

impl Entity for CatalogItem {
    type Id = ItemId;

    fn id(&self) -> ItemId {
        self.id
    }
}

/// Add/edit form of the products screen.
///
/// `id: None` adds a new product, `Some(id)` replaces an existing one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductForm {
    pub id: Option<ItemId>,
    pub name: String,
    pub unit_price: Money,
    pub category: String,
    pub stock_level: u32,
    pub barcode: Option<String>,
}

/// The catalog view-model: the ordered list of sellable items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CatalogItem>", into = "Vec<CatalogItem>")]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    /// Build a catalog from seed items, rejecting duplicate ids.
    pub fn new(items: Vec<CatalogItem>) -> DomainResult<Self> {
        for (idx, item) in items.iter().enumerate() {
            if items[..idx].iter().any(|other| other.id == item.id) {
                return Err(DomainError::conflict(format!("duplicate item id {}", item.id)));
            }
            if item.unit_price.is_negative() {
                return Err(DomainError::validation("unit_price cannot be negative"));
            }
        }
        Ok(Self { items })
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Current unit price of an item (prices are always read live).
    pub fn unit_price(&self, id: ItemId) -> Option<Money> {
        self.get(id).map(|item| item.unit_price)
    }

    /// Case-insensitive match on name or category (products table search).
    pub fn search(&self, term: &str) -> Vec<&CatalogItem> {
        let needle = term.to_lowercase();
        self.items
            .iter()
            .filter(|item| {
                item.name.to_lowercase().contains(&needle)
                    || item.category.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Case-insensitive match on name only (point-of-sale product grid).
    pub fn search_by_name(&self, term: &str) -> Vec<&CatalogItem> {
        let needle = term.to_lowercase();
        self.items
            .iter()
            .filter(|item| item.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for item in &self.items {
            if !categories.contains(&item.category.as_str()) {
                categories.push(&item.category);
            }
        }
        categories
    }

    pub fn low_stock_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| item.stock_level < LOW_STOCK_BADGE)
            .count()
    }

    pub fn total_units(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.stock_level)).sum()
    }

    /// Add or replace a product from the form.
    ///
    /// Editing an unknown id is `NotFound`.
    pub fn upsert(&self, form: &ProductForm) -> DomainResult<Catalog> {
        if form.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if form.unit_price.is_negative() {
            return Err(DomainError::validation("unit_price cannot be negative"));
        }

        let mut items = self.items.clone();
        match form.id {
            Some(id) => {
                let slot = items
                    .iter_mut()
                    .find(|item| item.id == id)
                    .ok_or_else(DomainError::not_found)?;
                *slot = item_from_form(id, form);
                tracing::debug!(item_id = %id, "product updated");
            }
            None => {
                let id = next_id(&items, ItemId::FIRST, ItemId::next);
                items.push(item_from_form(id, form));
                tracing::debug!(item_id = %id, "product added");
            }
        }
        Ok(Catalog { items })
    }

    /// Remove a product; unknown ids leave the catalog unchanged.
    pub fn remove(&self, id: ItemId) -> Catalog {
        Catalog {
            items: self
                .items
                .iter()
                .filter(|item| item.id != id)
                .cloned()
                .collect(),
        }
    }
}

fn item_from_form(id: ItemId, form: &ProductForm) -> CatalogItem {
    CatalogItem {
        id,
        name: form.name.trim().to_string(),
        unit_price: form.unit_price,
        category: form.category.trim().to_string(),
        stock_level: form.stock_level,
        barcode: form
            .barcode
            .as_ref()
            .map(|code| code.trim().to_string())
            .filter(|code| !code.is_empty()),
    }
}

impl TryFrom<Vec<CatalogItem>> for Catalog {
    type Error = DomainError;

    fn try_from(items: Vec<CatalogItem>) -> Result<Self, Self::Error> {
        Catalog::new(items)
    }
}

impl From<Catalog> for Vec<CatalogItem> {
    fn from(catalog: Catalog) -> Self {
        catalog.items
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogAction {
    Save(ProductForm),
    Remove(ItemId),
}

impl Action for CatalogAction {
    fn action_type(&self) -> &'static str {
        match self {
            CatalogAction::Save(form) if form.id.is_some() => "products.product.updated",
            CatalogAction::Save(_) => "products.product.added",
            CatalogAction::Remove(_) => "products.product.removed",
        }
    }
}

impl Reducer for Catalog {
    type Action = CatalogAction;
    type Error = DomainError;

    fn reduce(&self, action: &CatalogAction) -> DomainResult<Self> {
        match action {
            CatalogAction::Save(form) => self.upsert(form),
            CatalogAction::Remove(id) => Ok(self.remove(*id)),
        }
    }
}
