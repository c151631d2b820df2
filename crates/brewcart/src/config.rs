//! Storefront configuration.

use brewcart_core::{DigestParams, MIN_PASSWORD_LENGTH};

/// Flat delivery fee added to every order total.
pub const DELIVERY_FEE: u64 = 40;

/// Image used for items added without one.
pub const DEFAULT_IMAGE: &str = "default-coffee.jpg";

/// Configuration for the cart engine.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Store key holding the cart record.
    pub storage_key: String,
    /// Added to the subtotal on every total, including an empty cart.
    pub delivery_fee: u64,
    /// Fallback for an empty image reference.
    pub default_image: String,
    /// Prefix for amounts in user-facing messages.
    pub currency_symbol: String,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: "DV8Cart".to_string(),
            delivery_fee: DELIVERY_FEE,
            default_image: DEFAULT_IMAGE.to_string(),
            currency_symbol: "₹".to_string(),
        }
    }
}

/// Configuration for the credential registry.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Store key holding the list of registered users.
    pub users_key: String,
    /// Store key holding the current session.
    pub session_key: String,
    /// Cost parameters for new password digests.
    pub digest: DigestParams,
    /// Minimum password length accepted by the forms.
    pub min_password_length: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            users_key: "DV8Users".to_string(),
            session_key: "DV8CurrentUser".to_string(),
            digest: DigestParams::default(),
            min_password_length: MIN_PASSWORD_LENGTH,
        }
    }
}

/// Configuration for the Storefront.
#[derive(Debug, Clone, Default)]
pub struct StorefrontConfig {
    pub cart: CartConfig,
    pub registry: RegistryConfig,
}

impl StorefrontConfig {
    /// Override the digest cost, e.g. with [`DigestParams::insecure_fast`] in tests.
    pub fn with_digest(mut self, digest: DigestParams) -> Self {
        self.registry.digest = digest;
        self
    }

    /// Override the delivery fee.
    pub fn with_delivery_fee(mut self, fee: u64) -> Self {
        self.cart.delivery_fee = fee;
        self
    }
}
