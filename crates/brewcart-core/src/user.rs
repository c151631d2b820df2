//! Registered users and the current-user session marker.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::digest::PasswordDigest;
use crate::email::Email;

/// A registered user.
///
/// Users are created once and never edited. Stored as
/// `{"username","email","password","created"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,

    /// Unique key within the registry.
    pub email: Email,

    #[serde(rename = "password")]
    pub digest: PasswordDigest,

    #[serde(rename = "created")]
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        username: impl Into<String>,
        email: Email,
        digest: PasswordDigest,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            username: username.into(),
            email,
            digest,
            created_at,
        }
    }

    /// Check a password against this user's digest.
    pub fn verify_password(&self, password: &str) -> bool {
        self.digest.verify(password)
    }

    /// The header greeting shown while this user is logged in.
    pub fn greeting(&self) -> String {
        format!("Welcome, {}", self.username)
    }

    /// Open a session for this user.
    pub fn session(&self, logged_in_at: DateTime<Utc>) -> Session {
        Session {
            username: self.username.clone(),
            email: self.email.clone(),
            logged_in_at,
        }
    }
}

/// The currently authenticated user. At most one per store, no expiry.
///
/// Stored as `{"username","email","loggedInAt"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub username: String,
    pub email: Email,
    pub logged_in_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::DigestParams;
    use chrono::TimeZone;

    fn sample_user() -> User {
        let digest = PasswordDigest::create("secret1", &DigestParams::insecure_fast()).unwrap();
        User::new(
            "ann",
            Email::parse("a@x.com").unwrap(),
            digest,
            Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap(),
        )
    }

    #[test]
    fn test_user_record_fields() {
        let user = sample_user();
        let value = serde_json::to_value(&user).unwrap();

        assert_eq!(value["username"], "ann");
        assert_eq!(value["email"], "a@x.com");
        assert_eq!(value["created"], "2025-03-01T09:30:00Z");
        assert!(value["password"].as_str().unwrap().starts_with("$argon2id$"));
    }

    #[test]
    fn test_session_record_fields() {
        let user = sample_user();
        let session = user.session(Utc.with_ymd_and_hms(2025, 3, 2, 8, 0, 0).unwrap());
        let json = serde_json::to_string(&session).unwrap();

        assert_eq!(
            json,
            r#"{"username":"ann","email":"a@x.com","loggedInAt":"2025-03-02T08:00:00Z"}"#
        );
        assert_eq!(user.greeting(), "Welcome, ann");
    }

    #[test]
    fn test_session_accepts_millisecond_timestamps() {
        let json = r#"{"username":"ann","email":"a@x.com","loggedInAt":"2025-03-02T08:00:00.123Z"}"#;
        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(session.username, "ann");
    }

    #[test]
    fn test_verify_password() {
        let user = sample_user();
        assert!(user.verify_password("secret1"));
        assert!(!user.verify_password("wrong12"));
    }
}
