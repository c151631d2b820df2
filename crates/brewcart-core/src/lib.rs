//! # Brewcart Core
//!
//! Pure primitives for the Brewcart storefront: cart lines, users, sessions,
//! password digests and form validation.
//!
//! This crate contains no I/O and no storage. It is plain computation over
//! the storefront's data model.
//!
//! ## Key Types
//!
//! - [`LineItem`] - One product line, keyed by display name
//! - [`Cart`] - Ordered item list with subtotal/total arithmetic
//! - [`User`] - A registered user, keyed by [`Email`]
//! - [`Session`] - The current-user marker
//! - [`PasswordDigest`] - Argon2id digest in PHC string format
//!
//! ## Persisted Layout
//!
//! All types serialize with the record field names the storefront stores
//! (`price`, `imgUrl`, `created`, `loggedInAt`, ...). See each type.

pub mod cart;
pub mod digest;
pub mod email;
pub mod error;
pub mod user;
pub mod validation;

pub use cart::{Cart, LineItem, Normalization, QuantityChange};
pub use digest::{DigestParams, PasswordDigest};
pub use email::{Email, EmailError};
pub use error::{CoreError, FieldError, FieldProblem, Result, ValidationError};
pub use user::{Session, User};
pub use validation::{
    validate_contact, validate_login, validate_newsletter, validate_registration, ContactForm,
    LoginForm, RegistrationForm, MIN_PASSWORD_LENGTH,
};
