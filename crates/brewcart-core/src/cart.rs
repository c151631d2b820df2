//! Cart: an ordered list of line items keyed by display name.
//!
//! This is pure arithmetic over the item list. Persistence and notifications
//! live in the `brewcart` crate's `CartEngine`.

use serde::{Deserialize, Serialize};

/// A single product line in the cart.
///
/// Serialized with the field names the storefront has always used:
/// `{"name","price","quantity","imgUrl"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Display name. Unique within a cart; two products with the same name
    /// share a line.
    pub name: String,

    /// Price of one unit in whole currency units.
    #[serde(rename = "price")]
    pub unit_price: u64,

    /// Always at least 1 while the item is in a cart.
    pub quantity: u32,

    #[serde(rename = "imgUrl")]
    pub image_ref: String,
}

impl LineItem {
    /// Create a line with quantity 1.
    pub fn new(name: impl Into<String>, unit_price: u64, image_ref: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unit_price,
            quantity: 1,
            image_ref: image_ref.into(),
        }
    }

    /// `unit_price * quantity`, saturating.
    pub fn line_total(&self) -> u64 {
        self.unit_price.saturating_mul(u64::from(self.quantity))
    }
}

/// What a quantity change did to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// No item with that name.
    NotFound,
    /// Item kept, now at this quantity.
    Updated(u32),
    /// Quantity reached zero or below; item removed.
    Removed,
}

/// How [`Cart::normalize`] repaired a restored item list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Normalization {
    /// Items dropped because their quantity was zero.
    pub dropped_empty: usize,
    /// Items folded into an earlier line with the same name.
    pub merged_duplicates: usize,
}

impl Normalization {
    pub fn is_clean(&self) -> bool {
        self.dropped_empty == 0 && self.merged_duplicates == 0
    }
}

/// In-memory cart contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from persisted items, repairing anything that breaks the
    /// cart invariants.
    pub fn normalize(items: Vec<LineItem>) -> (Self, Normalization) {
        let mut cart = Self::new();
        let mut report = Normalization::default();

        for item in items {
            if item.quantity == 0 {
                report.dropped_empty += 1;
                continue;
            }
            match cart.position(&item.name) {
                Some(idx) => {
                    let line = &mut cart.items[idx];
                    line.quantity = line.quantity.saturating_add(item.quantity);
                    report.merged_duplicates += 1;
                }
                None => cart.items.push(item),
            }
        }

        (cart, report)
    }

    /// The items, in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Find an item by name.
    pub fn get(&self, name: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.name == name)
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add one unit of `name`, appending a new line if needed.
    ///
    /// The price and image of an existing line are kept as they were.
    /// Returns the line's new quantity.
    pub fn add(&mut self, name: &str, unit_price: u64, image_ref: &str) -> u32 {
        match self.position(name) {
            Some(idx) => {
                let line = &mut self.items[idx];
                line.quantity = line.quantity.saturating_add(1);
                line.quantity
            }
            None => {
                self.items.push(LineItem::new(name, unit_price, image_ref));
                1
            }
        }
    }

    /// Add `delta` to the quantity of `name`.
    pub fn change_quantity(&mut self, name: &str, delta: i64) -> QuantityChange {
        let Some(idx) = self.position(name) else {
            return QuantityChange::NotFound;
        };

        let next = i64::from(self.items[idx].quantity).saturating_add(delta);
        if next <= 0 {
            self.items.remove(idx);
            return QuantityChange::Removed;
        }

        let quantity = u32::try_from(next).unwrap_or(u32::MAX);
        self.items[idx].quantity = quantity;
        QuantityChange::Updated(quantity)
    }

    /// Remove the line for `name`. Returns the removed line, if any.
    pub fn remove(&mut self, name: &str) -> Option<LineItem> {
        self.position(name).map(|idx| self.items.remove(idx))
    }

    /// Sum of `unit_price * quantity` over all lines, saturating.
    pub fn subtotal(&self) -> u64 {
        self.items
            .iter()
            .fold(0u64, |acc, item| acc.saturating_add(item.line_total()))
    }

    /// Subtotal plus a flat delivery fee. The fee applies even when empty.
    pub fn total(&self, delivery_fee: u64) -> u64 {
        self.subtotal().saturating_add(delivery_fee)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|item| item.name == name)
    }
}
