//! The credential registry: user registration, login and the session marker.

use std::sync::Arc;

use chrono::Utc;

use brewcart_core::{
    validate_registration, Email, PasswordDigest, RegistrationForm, Session, User,
};
use brewcart_store::{decode, encode, Store, StoreExt};

use crate::config::RegistryConfig;
use crate::error::{Result, StorefrontError};
use crate::presenter::{Notice, Presenter};

/// Registered users and the current session, kept in two store keys.
pub struct CredentialRegistry<S: Store> {
    store: Arc<S>,
    presenter: Arc<dyn Presenter>,
    config: RegistryConfig,
}

impl<S: Store> CredentialRegistry<S> {
    pub fn new(store: Arc<S>, presenter: Arc<dyn Presenter>, config: RegistryConfig) -> Self {
        Self {
            store,
            presenter,
            config,
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Register a new user.
    ///
    /// The duplicate check and the append happen in one store update, so
    /// two registrations for the same email cannot both succeed.
    pub fn register(&self, username: &str, email: &str, password: &str) -> Result<User> {
        let form = RegistrationForm {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let email = validate_registration(&form, self.config.min_password_length)?;

        let digest = PasswordDigest::create(password, &self.config.digest)?;
        let user = User::new(username.trim(), email.clone(), digest, Utc::now());

        let key = self.config.users_key.as_str();
        let mut duplicate = false;
        self.store.update(key, &mut |current: Option<&str>| {
            let mut users = match current {
                Some(raw) => decode_users(key, raw),
                None => Vec::new(),
            };
            if users.iter().any(|u| u.email == user.email) {
                duplicate = true;
                return Ok(None);
            }
            users.push(user.clone());
            encode(key, &users).map(Some)
        })?;

        if duplicate {
            tracing::debug!(email = %email, "registration rejected, email taken");
            self.notify(Notice::modal(
                "Registration Failed",
                "User with this email already exists.",
            ));
            return Err(StorefrontError::AlreadyExists(email));
        }

        tracing::info!(email = %user.email, username = %user.username, "registered user");
        self.notify(Notice::modal(
            "Registration Successful",
            "Your account has been created successfully! You can now log in.",
        ));
        Ok(user)
    }

    /// Check credentials and open a session on success.
    ///
    /// Returns `Ok(false)` for an unknown email, a wrong password, or a
    /// stored digest that cannot be read. These cases are deliberately
    /// indistinguishable to the caller.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<bool> {
        let user = match Email::parse(email) {
            Ok(email) => self.user(&email)?,
            Err(_) => None,
        };

        let user = match user {
            Some(user) if user.verify_password(password) => user,
            _ => {
                tracing::debug!("login rejected");
                self.notify(Notice::modal(
                    "Login Failed",
                    "Invalid email or password. Please try again.",
                ));
                return Ok(false);
            }
        };

        let session = user.session(Utc::now());
        self.store.set_json(&self.config.session_key, &session)?;

        tracing::info!(email = %session.email, "user logged in");
        self.notify(Notice::modal(
            "Login Successful",
            "You have been logged in successfully!",
        ));
        Ok(true)
    }

    /// Clear the session, whether or not one exists.
    pub fn logout(&self) -> Result<()> {
        self.store.delete(&self.config.session_key)?;

        tracing::info!("user logged out");
        self.notify(Notice::toast("You have been logged out successfully!"));
        Ok(())
    }

    /// The current session, if any.
    pub fn current_session(&self) -> Result<Option<Session>> {
        match self.store.get_json::<Session>(&self.config.session_key) {
            Ok(session) => Ok(session),
            Err(e) if e.is_malformed() => {
                tracing::warn!("ignoring unreadable session: {}", e);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Look up a user by email.
    pub fn user(&self, email: &Email) -> Result<Option<User>> {
        Ok(self.users()?.into_iter().find(|u| &u.email == email))
    }

    /// All registered users, in registration order.
    pub fn users(&self) -> Result<Vec<User>> {
        let key = self.config.users_key.as_str();
        Ok(match self.store.get(key)? {
            Some(raw) => decode_users(key, &raw),
            None => Vec::new(),
        })
    }

    fn notify(&self, notice: Notice) {
        self.presenter.show_message(&notice);
    }
}

/// Decode the users record. Unreadable data counts as no users.
fn decode_users(key: &str, raw: &str) -> Vec<User> {
    decode(key, raw).unwrap_or_else(|e| {
        tracing::warn!("ignoring unreadable users record: {}", e);
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use brewcart_core::DigestParams;
    use brewcart_store::MemoryStore;

    use crate::presenter::CartView;

    #[derive(Default)]
    struct Recorder {
        notices: Mutex<Vec<Notice>>,
    }

    impl Presenter for Recorder {
        fn render_cart(&self, _view: &CartView) {}

        fn show_message(&self, notice: &Notice) {
            self.notices.lock().unwrap().push(notice.clone());
        }
    }

    impl Recorder {
        fn last_title(&self) -> Option<String> {
            self.notices.lock().unwrap().last().and_then(|n| n.title.clone())
        }
    }

    fn registry_with(store: Arc<MemoryStore>) -> (CredentialRegistry<MemoryStore>, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        let config = RegistryConfig {
            digest: DigestParams::insecure_fast(),
            ..RegistryConfig::default()
        };
        (CredentialRegistry::new(store, recorder.clone(), config), recorder)
    }

    fn registry() -> (CredentialRegistry<MemoryStore>, Arc<MemoryStore>, Arc<Recorder>) {
        let store = Arc::new(MemoryStore::new());
        let (registry, recorder) = registry_with(store.clone());
        (registry, store, recorder)
    }

    #[test]
    fn test_register_then_login() {
        let (registry, _, recorder) = registry();

        let user = registry.register("asha", "asha@example.com", "secret1").unwrap();
        assert_eq!(user.username, "asha");
        assert_eq!(recorder.last_title().as_deref(), Some("Registration Successful"));

        assert!(registry.authenticate("asha@example.com", "secret1").unwrap());
        assert_eq!(recorder.last_title().as_deref(), Some("Login Successful"));

        let session = registry.current_session().unwrap().unwrap();
        assert_eq!(session.username, "asha");
        let user = registry.user(&session.email).unwrap().unwrap();
        assert_eq!(user.greeting(), "Welcome, asha");
    }

    #[test]
    fn test_password_not_stored_in_clear() {
        let (registry, store, _) = registry();
        registry.register("asha", "asha@example.com", "secret1").unwrap();

        let raw = store.get("DV8Users").unwrap().unwrap();
        assert!(!raw.contains("secret1"));
        assert!(raw.contains("$argon2id$"));
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let (registry, _, recorder) = registry();
        registry.register("asha", "asha@example.com", "secret1").unwrap();

        let err = registry
            .register("other", "asha@example.com", "secret2")
            .unwrap_err();

        assert!(matches!(err, StorefrontError::AlreadyExists(_)));
        assert_eq!(recorder.last_title().as_deref(), Some("Registration Failed"));
        assert_eq!(registry.users().unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_registration_writes_nothing() {
        let (registry, store, recorder) = registry();

        let err = registry.register("", "not-an-email", "123").unwrap_err();

        match err {
            StorefrontError::Validation(v) => assert_eq!(v.fields.len(), 3),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(store.get("DV8Users").unwrap(), None);
        assert!(recorder.notices.lock().unwrap().is_empty());
    }

    #[test]
    fn test_wrong_password_and_unknown_email_look_the_same() {
        let (registry, store, recorder) = registry();
        registry.register("asha", "asha@example.com", "secret1").unwrap();

        assert!(!registry.authenticate("asha@example.com", "wrong!!").unwrap());
        let first = recorder.notices.lock().unwrap().last().cloned();
        assert!(!registry.authenticate("nobody@example.com", "secret1").unwrap());
        let second = recorder.notices.lock().unwrap().last().cloned();

        assert_eq!(first, second);
        assert_eq!(store.get("DV8CurrentUser").unwrap(), None);
    }

    #[test]
    fn test_unparsable_email_fails_like_any_login() {
        let (registry, store, recorder) = registry();
        registry.register("asha", "asha@example.com", "secret1").unwrap();

        assert!(!registry.authenticate("asha@example.com", "wrong!!").unwrap());
        let wrong_password = recorder.notices.lock().unwrap().last().cloned();
        assert!(!registry.authenticate("not-an-email", "secret1").unwrap());
        let unparsable = recorder.notices.lock().unwrap().last().cloned();

        assert_eq!(
            unparsable,
            Some(Notice::modal(
                "Login Failed",
                "Invalid email or password. Please try again."
            ))
        );
        assert_eq!(unparsable, wrong_password);
        assert_eq!(store.get("DV8CurrentUser").unwrap(), None);
    }

    #[test]
    fn test_unreadable_digest_fails_login() {
        let users = r#"[{"username":"old","email":"old@example.com","password":"12345","created":"2024-01-01T00:00:00Z"}]"#;
        let store = Arc::new(MemoryStore::with_entries([("DV8Users", users)]));
        let (registry, _) = registry_with(store);

        assert!(!registry.authenticate("old@example.com", "secret1").unwrap());
        assert!(registry.current_session().unwrap().is_none());
    }

    #[test]
    fn test_logout_clears_session() {
        let (registry, _, recorder) = registry();
        registry.register("asha", "asha@example.com", "secret1").unwrap();
        registry.authenticate("asha@example.com", "secret1").unwrap();

        registry.logout().unwrap();

        assert!(registry.current_session().unwrap().is_none());
        assert_eq!(
            recorder.notices.lock().unwrap().last().unwrap(),
            &Notice::toast("You have been logged out successfully!")
        );

        // Logging out again is fine.
        registry.logout().unwrap();
    }

    #[test]
    fn test_malformed_records_recover() {
        let store = Arc::new(MemoryStore::with_entries([
            ("DV8Users", "not json"),
            ("DV8CurrentUser", "{\"username\":"),
        ]));
        let (registry, _) = registry_with(store.clone());

        assert!(registry.users().unwrap().is_empty());
        assert!(registry.current_session().unwrap().is_none());

        // The next registration overwrites the unreadable record.
        registry.register("asha", "asha@example.com", "secret1").unwrap();
        assert_eq!(registry.users().unwrap().len(), 1);
    }
}
