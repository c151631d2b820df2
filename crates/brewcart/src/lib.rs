//! # Brewcart
//!
//! The unified API for the Brewcart storefront engine: a shopping cart and
//! a local credential registry persisted in a key-value store.
//!
//! ## Overview
//!
//! Brewcart provides a synchronous, UI-agnostic library for:
//!
//! - **Cart**: items with quantities, a flat delivery fee, and checkout
//! - **Registry**: user registration, login, and a single current session
//! - **Presenter**: callbacks through which the engine asks a UI to redraw
//! - **Storefront**: one page session wiring the above to a shared store
//!
//! ## Key Concepts
//!
//! - **Item identity**: cart lines are keyed by item name.
//! - **Persist first**: every command writes the store before it changes
//!   in-memory state, so a failed write changes nothing.
//! - **Recovery**: unreadable persisted records are reset to empty and
//!   logged, never surfaced to the user.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use brewcart::{Storefront, StorefrontConfig, TracingPresenter};
//! use brewcart::core::LoginForm;
//! use brewcart::store::SqliteStore;
//!
//! // Open storage
//! let store = SqliteStore::open("storefront.db").unwrap();
//!
//! // Create the storefront and restore the previous session
//! let mut shop = Storefront::new(store, Arc::new(TracingPresenter), StorefrontConfig::default());
//! let report = shop.start().unwrap();
//!
//! // Shop
//! shop.cart_mut().add_item("Cappuccino", 160, "cappuccino.jpg").unwrap();
//! shop.cart_mut().change_quantity("Cappuccino", 1).unwrap();
//!
//! // Log in
//! let form = LoginForm { email: "asha@example.com".into(), password: "secret1".into() };
//! let logged_in = shop.submit_login(&form).unwrap();
//!
//! let total = shop.checkout().unwrap();
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `brewcart::core` - Core types (Cart, User, Email, forms, etc.)
//! - `brewcart::store` - Storage abstraction, SQLite and in-memory stores

pub mod cart;
pub mod config;
pub mod error;
pub mod presenter;
pub mod registry;
pub mod storefront;

// Re-export component crates
pub use brewcart_core as core;
pub use brewcart_store as store;

// Re-export main types for convenience
pub use cart::{CartEngine, RestoreOutcome};
pub use config::{CartConfig, RegistryConfig, StorefrontConfig, DEFAULT_IMAGE, DELIVERY_FEE};
pub use error::{Result, StorefrontError};
pub use presenter::{CartView, Notice, NullPresenter, Presenter, TracingPresenter};
pub use registry::CredentialRegistry;
pub use storefront::{StartupReport, Storefront};

// Re-export commonly used core types
pub use brewcart_core::{
    Cart, ContactForm, Email, LineItem, LoginForm, QuantityChange, RegistrationForm, Session,
    User,
};
