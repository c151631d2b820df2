//! # Brewcart Testkit
//!
//! Testing utilities for Brewcart.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: stored records in the storefront's persisted layout,
//!   with the values they must decode to
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: a shared store and a recording presenter for scenarios
//!
//! ## Golden Vectors
//!
//! ```rust
//! use brewcart_testkit::vectors::verify_all_vectors;
//!
//! for (name, passed, detail) in verify_all_vectors() {
//!     assert!(passed, "{}: {}", name, detail);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use brewcart_testkit::generators::cart_ops;
//! use brewcart_testkit::TestFixture;
//!
//! proptest! {
//!     #[test]
//!     fn quantities_stay_positive(ops in cart_ops(50)) {
//!         let fixture = TestFixture::new();
//!         let mut shop = fixture.started();
//!         for op in &ops {
//!             op.apply(shop.cart_mut());
//!         }
//!         prop_assert!(shop.cart().items().iter().all(|i| i.quantity >= 1));
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use brewcart_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let mut shop = fixture.started();
//! shop.cart_mut().add_item("Latte", 150, "latte.jpg").unwrap();
//!
//! // Reload the page
//! let shop = fixture.started();
//! assert_eq!(shop.cart().quantity_of("Latte"), 1);
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{RecordingPresenter, TestFixture};
pub use generators::{cart_ops, CartOp};
pub use vectors::{all_vectors, check_vector, verify_all_vectors, GoldenVector};
