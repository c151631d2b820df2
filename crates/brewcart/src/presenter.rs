//! Presenter: the seam between the engine and whatever draws the page.
//!
//! The engine never touches UI state. After each mutating command it hands
//! the presenter a fresh [`CartView`] and/or a [`Notice`], synchronously.

use brewcart_core::{Cart, LineItem};

/// Read-only snapshot of the cart for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<LineItem>,
    pub subtotal: u64,
    /// Subtotal plus delivery fee. Non-zero even for an empty cart.
    pub total: u64,
    /// Checkout button state: enabled only with at least one item.
    pub can_checkout: bool,
}

impl CartView {
    pub(crate) fn of(cart: &Cart, delivery_fee: u64) -> Self {
        Self {
            items: cart.items().to_vec(),
            subtotal: cart.subtotal(),
            total: cart.total(delivery_fee),
            can_checkout: !cart.is_empty(),
        }
    }
}

/// A message for the user.
///
/// Notices with a title are modal dialogs; untitled ones are toasts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: Option<String>,
    pub body: String,
}

impl Notice {
    /// A transient toast.
    pub fn toast(body: impl Into<String>) -> Self {
        Self {
            title: None,
            body: body.into(),
        }
    }

    /// A modal dialog.
    pub fn modal(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            body: body.into(),
        }
    }

    pub fn is_modal(&self) -> bool {
        self.title.is_some()
    }
}

/// Rendering callbacks consumed by the engine.
pub trait Presenter: Send + Sync {
    /// Redraw the cart.
    fn render_cart(&self, view: &CartView);

    /// Show a toast or modal.
    fn show_message(&self, notice: &Notice);
}

/// Presenter that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn render_cart(&self, _view: &CartView) {}

    fn show_message(&self, _notice: &Notice) {}
}

/// Presenter that logs every callback at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingPresenter;

impl Presenter for TracingPresenter {
    fn render_cart(&self, view: &CartView) {
        tracing::debug!(
            lines = view.items.len(),
            subtotal = view.subtotal,
            total = view.total,
            can_checkout = view.can_checkout,
            "render cart"
        );
    }

    fn show_message(&self, notice: &Notice) {
        tracing::debug!(title = ?notice.title, body = %notice.body, "show message");
    }
}
