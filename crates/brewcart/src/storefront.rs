//! The Storefront: one page session wiring the cart and the registry to a
//! shared store and presenter.

use std::sync::Arc;

use brewcart_core::{
    validate_contact, validate_login, validate_newsletter, ContactForm, Email, LoginForm,
    RegistrationForm, Session, User,
};
use brewcart_store::Store;

use crate::cart::{CartEngine, RestoreOutcome};
use crate::config::StorefrontConfig;
use crate::error::Result;
use crate::presenter::{Notice, Presenter};
use crate::registry::CredentialRegistry;

/// What [`Storefront::start`] restored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupReport {
    pub cart: RestoreOutcome,
    pub session: Option<Session>,
}

/// The Storefront: the main entry point for Brewcart.
///
/// # Example
///
/// ```rust
/// use brewcart::{NullPresenter, Storefront, StorefrontConfig};
/// use brewcart::core::DigestParams;
/// use brewcart::store::MemoryStore;
/// use std::sync::Arc;
///
/// let config = StorefrontConfig::default().with_digest(DigestParams::insecure_fast());
/// let mut shop = Storefront::new(MemoryStore::new(), Arc::new(NullPresenter), config);
/// shop.start().unwrap();
///
/// shop.cart_mut().add_item("Latte", 150, "latte.jpg").unwrap();
/// assert_eq!(shop.checkout().unwrap(), Some(190));
/// ```
pub struct Storefront<S: Store> {
    store: Arc<S>,
    presenter: Arc<dyn Presenter>,
    config: StorefrontConfig,
    cart: CartEngine<S>,
    registry: CredentialRegistry<S>,
}

impl<S: Store> Storefront<S> {
    /// Create a storefront that owns its store.
    pub fn new(store: S, presenter: Arc<dyn Presenter>, config: StorefrontConfig) -> Self {
        Self::with_shared_store(Arc::new(store), presenter, config)
    }

    /// Create a storefront over a store shared with other handles.
    pub fn with_shared_store(
        store: Arc<S>,
        presenter: Arc<dyn Presenter>,
        config: StorefrontConfig,
    ) -> Self {
        let cart = CartEngine::new(store.clone(), presenter.clone(), config.cart.clone());
        let registry =
            CredentialRegistry::new(store.clone(), presenter.clone(), config.registry.clone());
        Self {
            store,
            presenter,
            config,
            cart,
            registry,
        }
    }

    /// Page load: restore the cart and the session.
    pub fn start(&mut self) -> Result<StartupReport> {
        let cart = self.cart.restore()?;
        let session = self.registry.current_session()?;

        tracing::debug!(
            cart_lines = self.cart.len(),
            logged_in = session.is_some(),
            "storefront started"
        );
        Ok(StartupReport { cart, session })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Forms
    // ─────────────────────────────────────────────────────────────────────────

    /// Submit the registration form.
    pub fn submit_registration(&self, form: &RegistrationForm) -> Result<User> {
        self.registry
            .register(&form.username, &form.email, &form.password)
    }

    /// Submit the login form. Returns whether the login succeeded.
    pub fn submit_login(&self, form: &LoginForm) -> Result<bool> {
        validate_login(form, self.config.registry.min_password_length)?;
        self.registry.authenticate(&form.email, &form.password)
    }

    /// Submit the contact form. Nothing is stored or sent anywhere.
    pub fn submit_contact(&self, form: &ContactForm) -> Result<Email> {
        let email = validate_contact(form)?;

        tracing::info!(from = %email, "contact message received");
        self.presenter.show_message(&Notice::modal(
            "Success",
            "Your message has been sent successfully!",
        ));
        Ok(email)
    }

    /// Sign up for the newsletter. Nothing is stored.
    pub fn subscribe_newsletter(&self, email: &str) -> Result<Email> {
        let email = validate_newsletter(email)?;

        tracing::info!(email = %email, "newsletter signup");
        self.presenter.show_message(&Notice::toast(
            "Thank you for subscribing to our newsletter!",
        ));
        Ok(email)
    }

    pub fn logout(&self) -> Result<()> {
        self.registry.logout()
    }

    /// Check out, unless the cart is empty.
    ///
    /// Returns the total charged, or `None` without side effects when the
    /// cart has no items.
    pub fn checkout(&mut self) -> Result<Option<u64>> {
        if self.cart.is_empty() {
            tracing::debug!("checkout ignored, cart is empty");
            return Ok(None);
        }
        self.cart.checkout().map(Some)
    }

    /// The header greeting for the logged-in user, if any.
    ///
    /// The session only names an email; the username comes from the
    /// registered user. A session whose user is gone greets nobody.
    pub fn greeting(&self) -> Result<Option<String>> {
        let Some(session) = self.registry.current_session()? else {
            return Ok(None);
        };
        let user = self.registry.user(&session.email)?;
        if user.is_none() {
            tracing::warn!(email = %session.email, "session refers to an unknown user");
        }
        Ok(user.map(|u| u.greeting()))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn cart(&self) -> &CartEngine<S> {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut CartEngine<S> {
        &mut self.cart
    }

    pub fn registry(&self) -> &CredentialRegistry<S> {
        &self.registry
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// Get the underlying store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brewcart_core::DigestParams;
    use brewcart_store::MemoryStore;

    use crate::presenter::NullPresenter;

    fn storefront() -> Storefront<MemoryStore> {
        let config = StorefrontConfig::default().with_digest(DigestParams::insecure_fast());
        Storefront::new(MemoryStore::new(), Arc::new(NullPresenter), config)
    }

    #[test]
    fn test_start_fresh() {
        let mut shop = storefront();
        let report = shop.start().unwrap();
        assert_eq!(report.cart, RestoreOutcome::Empty);
        assert!(report.session.is_none());
    }

    #[test]
    fn test_checkout_empty_is_none() {
        let mut shop = storefront();
        shop.start().unwrap();
        assert_eq!(shop.checkout().unwrap(), None);
        assert_eq!(shop.store().get("DV8Cart").unwrap(), None);
    }

    #[test]
    fn test_login_form_validated_first() {
        let shop = storefront();
        let form = LoginForm {
            email: "bad".into(),
            password: "".into(),
        };
        assert!(shop.submit_login(&form).is_err());
    }

    #[test]
    fn test_greeting_follows_session() {
        let shop = storefront();
        shop.submit_registration(&RegistrationForm {
            username: "ravi".into(),
            email: "ravi@example.com".into(),
            password: "hunter22".into(),
        })
        .unwrap();
        assert_eq!(shop.greeting().unwrap(), None);

        let login = LoginForm {
            email: "ravi@example.com".into(),
            password: "hunter22".into(),
        };
        assert!(shop.submit_login(&login).unwrap());
        assert_eq!(shop.greeting().unwrap().as_deref(), Some("Welcome, ravi"));

        shop.logout().unwrap();
        assert_eq!(shop.greeting().unwrap(), None);
    }

    #[test]
    fn test_greeting_needs_registered_user() {
        let session = r#"{"username":"ghost","email":"ghost@x.com","loggedInAt":"2025-03-02T08:00:00Z"}"#;
        let store = MemoryStore::with_entries([("DV8CurrentUser", session)]);
        let config = StorefrontConfig::default().with_digest(DigestParams::insecure_fast());
        let mut shop = Storefront::new(store, Arc::new(NullPresenter), config);

        let report = shop.start().unwrap();
        assert!(report.session.is_some());
        assert_eq!(shop.greeting().unwrap(), None);
    }

    #[test]
    fn test_contact_and_newsletter() {
        let shop = storefront();
        let contact = ContactForm {
            name: "Meera".into(),
            email: "meera@example.com".into(),
            message: "More oat milk please".into(),
        };
        assert_eq!(shop.submit_contact(&contact).unwrap().as_str(), "meera@example.com");
        assert!(shop.subscribe_newsletter("nope").is_err());
        assert!(shop.subscribe_newsletter("meera@example.com").is_ok());
    }
}
