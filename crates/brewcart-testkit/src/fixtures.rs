//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::{Arc, Mutex, MutexGuard};

use brewcart::{CartView, Notice, Presenter, Storefront, StorefrontConfig};
use brewcart_core::DigestParams;
use brewcart_store::MemoryStore;

/// A presenter that records every callback for later inspection.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    renders: Mutex<Vec<CartView>>,
    notices: Mutex<Vec<Notice>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every cart view rendered so far.
    pub fn renders(&self) -> Vec<CartView> {
        lock(&self.renders).clone()
    }

    /// Every notice shown so far.
    pub fn notices(&self) -> Vec<Notice> {
        lock(&self.notices).clone()
    }

    /// The most recent cart view.
    pub fn last_render(&self) -> Option<CartView> {
        lock(&self.renders).last().cloned()
    }

    /// The most recent notice.
    pub fn last_notice(&self) -> Option<Notice> {
        lock(&self.notices).last().cloned()
    }

    pub fn render_count(&self) -> usize {
        lock(&self.renders).len()
    }

    pub fn notice_count(&self) -> usize {
        lock(&self.notices).len()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        lock(&self.renders).clear();
        lock(&self.notices).clear();
    }
}

impl Presenter for RecordingPresenter {
    fn render_cart(&self, view: &CartView) {
        lock(&self.renders).push(view.clone());
    }

    fn show_message(&self, notice: &Notice) {
        lock(&self.notices).push(notice.clone());
    }
}

// A panic while recording must not hide later callbacks.
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A test fixture with a shared memory store and a recording presenter.
///
/// [`storefront`](Self::storefront) opens a new page session over the same
/// store, which is how tests simulate a page reload.
pub struct TestFixture {
    pub store: Arc<MemoryStore>,
    pub presenter: Arc<RecordingPresenter>,
    pub config: StorefrontConfig,
}

impl TestFixture {
    /// Create a fixture with fast password digests.
    pub fn new() -> Self {
        Self::with_config(StorefrontConfig::default().with_digest(DigestParams::insecure_fast()))
    }

    pub fn with_config(config: StorefrontConfig) -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
            presenter: Arc::new(RecordingPresenter::new()),
            config,
        }
    }

    /// Open a page session over the fixture's store. Not yet started.
    pub fn storefront(&self) -> Storefront<MemoryStore> {
        Storefront::with_shared_store(
            self.store.clone(),
            self.presenter.clone(),
            self.config.clone(),
        )
    }

    /// Open and start a page session.
    pub fn started(&self) -> Storefront<MemoryStore> {
        let mut shop = self.storefront();
        if let Err(e) = shop.start() {
            panic!("storefront failed to start: {}", e);
        }
        shop
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
