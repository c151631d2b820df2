//! The cart engine: cart commands with persistence and rendering.
//!
//! Every mutation follows the same order: compute the next cart, persist
//! it, commit it in memory, then notify the presenter. If the write fails
//! the in-memory cart is unchanged.

use std::sync::Arc;

use brewcart_core::{Cart, LineItem, Normalization, QuantityChange};
use brewcart_store::{Store, StoreExt};

use crate::config::CartConfig;
use crate::error::Result;
use crate::presenter::{CartView, Notice, Presenter};

/// What [`CartEngine::restore`] found in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// Nothing stored; the cart starts empty.
    Empty,
    /// Cart restored. `repaired` is non-clean if stored lines were fixed up.
    Restored { lines: usize, repaired: Normalization },
    /// Stored cart was unreadable and has been reset to empty.
    Reset { reason: String },
}

/// The cart engine.
///
/// Owns the cart for one page session. Construct once, call
/// [`restore`](Self::restore) at startup, then drive it with commands.
pub struct CartEngine<S: Store> {
    store: Arc<S>,
    presenter: Arc<dyn Presenter>,
    config: CartConfig,
    cart: Cart,
}

impl<S: Store> CartEngine<S> {
    /// Create an engine with an empty cart. Nothing is read until `restore`.
    pub fn new(store: Arc<S>, presenter: Arc<dyn Presenter>, config: CartConfig) -> Self {
        Self {
            store,
            presenter,
            config,
            cart: Cart::new(),
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &CartConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Commands
    // ─────────────────────────────────────────────────────────────────────────

    /// Load the persisted cart.
    ///
    /// Unreadable data is not an error: the cart is reset to empty, the
    /// empty cart is written back, and the reason is logged and returned.
    /// Zero-quantity lines are dropped and duplicate names merged; the
    /// repaired cart is written back.
    pub fn restore(&mut self) -> Result<RestoreOutcome> {
        let key = self.config.storage_key.as_str();

        let outcome = match self.store.get_json::<Vec<LineItem>>(key) {
            Ok(None) => {
                self.cart = Cart::new();
                RestoreOutcome::Empty
            }
            Ok(Some(items)) => {
                let (cart, repaired) = Cart::normalize(items);
                if !repaired.is_clean() {
                    tracing::warn!(
                        dropped_empty = repaired.dropped_empty,
                        merged_duplicates = repaired.merged_duplicates,
                        "repaired stored cart"
                    );
                    self.store.set_json(key, cart.items())?;
                }
                let lines = cart.len();
                self.cart = cart;
                RestoreOutcome::Restored { lines, repaired }
            }
            Err(e) if e.is_malformed() => {
                tracing::warn!("Error loading cart: {}", e);
                self.store.set_json(key, Cart::new().items())?;
                self.cart = Cart::new();
                RestoreOutcome::Reset {
                    reason: e.to_string(),
                }
            }
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(lines = self.cart.len(), "cart restored");
        self.render();
        Ok(outcome)
    }

    /// Add one unit of an item. Returns the item's new quantity.
    ///
    /// An empty `image_ref` falls back to the configured default image.
    pub fn add_item(&mut self, name: &str, unit_price: u64, image_ref: &str) -> Result<u32> {
        let image_ref = if image_ref.is_empty() {
            self.config.default_image.as_str()
        } else {
            image_ref
        };

        let mut next = self.cart.clone();
        let quantity = next.add(name, unit_price, image_ref);
        self.commit(next)?;

        tracing::debug!(item = name, quantity, "added item to cart");
        self.render();
        self.notify(Notice::toast(format!("{} added to cart!", name)));
        Ok(quantity)
    }

    /// Change an item's quantity by `delta`.
    ///
    /// Unknown names are ignored. A result of zero or less removes the item.
    pub fn change_quantity(&mut self, name: &str, delta: i64) -> Result<QuantityChange> {
        let mut next = self.cart.clone();
        let change = next.change_quantity(name, delta);

        match change {
            QuantityChange::NotFound => {}
            QuantityChange::Removed => {
                self.commit(next)?;
                tracing::debug!(item = name, "quantity reached zero, removed item");
                self.render();
                self.notify(Notice::toast(format!("{} removed from cart", name)));
            }
            QuantityChange::Updated(quantity) => {
                self.commit(next)?;
                tracing::debug!(item = name, quantity, "changed item quantity");
                self.render();
            }
        }

        Ok(change)
    }

    /// Remove an item. Returns `false` (and does nothing) if absent.
    pub fn remove_item(&mut self, name: &str) -> Result<bool> {
        let mut next = self.cart.clone();
        if next.remove(name).is_none() {
            return Ok(false);
        }
        self.commit(next)?;

        tracing::debug!(item = name, "removed item from cart");
        self.render();
        self.notify(Notice::toast(format!("{} removed from cart", name)));
        Ok(true)
    }

    /// Confirm the order: returns the total charged and empties the cart.
    ///
    /// Runs even on an empty cart (charging the delivery fee alone); gate
    /// on [`CartView::can_checkout`] to avoid that.
    pub fn checkout(&mut self) -> Result<u64> {
        let total = self.compute_total();
        let lines = self.cart.len();

        self.commit(Cart::new())?;

        tracing::info!(lines, total, "checkout completed");
        self.render();
        self.notify(Notice::modal(
            "Checkout",
            format!(
                "Thank you for your order! Your order total is {}{}. Your coffee will be on its way soon!",
                self.config.currency_symbol, total
            ),
        ));
        Ok(total)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Sum of `unit_price * quantity` over all items.
    pub fn compute_subtotal(&self) -> u64 {
        self.cart.subtotal()
    }

    /// Subtotal plus the delivery fee.
    pub fn compute_total(&self) -> u64 {
        self.cart.total(self.config.delivery_fee)
    }

    /// The items, in the order they were first added.
    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    /// Quantity of an item, 0 if absent.
    pub fn quantity_of(&self, name: &str) -> u32 {
        self.cart.get(name).map_or(0, |item| item.quantity)
    }

    pub fn len(&self) -> usize {
        self.cart.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Get the underlying cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> CartView {
        CartView::of(&self.cart, self.config.delivery_fee)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────────

    fn commit(&mut self, next: Cart) -> Result<()> {
        self.store
            .set_json(&self.config.storage_key, next.items())?;
        self.cart = next;
        Ok(())
    }

    fn render(&self) {
        self.presenter.render_cart(&self.view());
    }

    fn notify(&self, notice: Notice) {
        self.presenter.show_message(&notice);
    }
}
