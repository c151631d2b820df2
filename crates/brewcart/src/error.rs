//! Error types for the storefront.

use brewcart_core::{CoreError, Email, ValidationError};
use brewcart_store::StoreError;
use thiserror::Error;

/// Errors that can occur during storefront operations.
///
/// Unknown cart items and failed logins are not errors: they are a silent
/// no-op and `Ok(false)` respectively.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Storage error. In-memory state was left unchanged.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Form input rejected.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Password digest could not be computed.
    #[error("digest error: {0}")]
    Digest(#[from] CoreError),

    /// A user with this email is already registered.
    #[error("user already exists: {0}")]
    AlreadyExists(Email),
}

/// Result type for storefront operations.
pub type Result<T> = std::result::Result<T, StorefrontError>;
