//! Golden vectors for the persisted record layout.
//!
//! Each vector is a raw value as a browser storefront would have left it in
//! local storage. They pin the field names and the recovery behaviour, so
//! data written by older pages keeps loading.

use chrono::{DateTime, Utc};

use brewcart_core::{LineItem, Session, User};
use brewcart_store::{decode, encode};

/// What a vector's raw value must decode to.
#[derive(Debug, Clone)]
pub enum Expected {
    /// A cart record: `(name, price, quantity, imgUrl)` per line.
    Cart(Vec<(&'static str, u64, u32, &'static str)>),
    /// A users record: `(username, email, created)` per user.
    Users(Vec<(&'static str, &'static str, &'static str)>),
    /// A session record: `(username, email, loggedInAt)`.
    Session(&'static str, &'static str, &'static str),
    /// Not decodable; must be reported as malformed.
    Malformed,
}

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Store key the value lives under.
    pub key: &'static str,
    /// Raw stored value.
    pub raw: &'static str,
    pub expected: Expected,
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "empty cart",
            key: "DV8Cart",
            raw: "[]",
            expected: Expected::Cart(vec![]),
        },
        GoldenVector {
            name: "two line cart",
            key: "DV8Cart",
            raw: r#"[{"name":"Cappuccino","price":160,"quantity":2,"imgUrl":"images/cappuccino.jpg"},{"name":"Cold Brew","price":220,"quantity":1,"imgUrl":"default-coffee.jpg"}]"#,
            expected: Expected::Cart(vec![
                ("Cappuccino", 160, 2, "images/cappuccino.jpg"),
                ("Cold Brew", 220, 1, "default-coffee.jpg"),
            ]),
        },
        GoldenVector {
            name: "cart with non-ascii name",
            key: "DV8Cart",
            raw: r#"[{"name":"Café Mocha","price":190,"quantity":3,"imgUrl":"mocha.jpg"}]"#,
            expected: Expected::Cart(vec![("Café Mocha", 190, 3, "mocha.jpg")]),
        },
        GoldenVector {
            name: "truncated cart",
            key: "DV8Cart",
            raw: r#"[{"name":"Latte","price":150,"#,
            expected: Expected::Malformed,
        },
        GoldenVector {
            name: "cart with fractional price",
            key: "DV8Cart",
            raw: r#"[{"name":"Latte","price":149.5,"quantity":1,"imgUrl":"latte.jpg"}]"#,
            expected: Expected::Malformed,
        },
        GoldenVector {
            name: "single user",
            key: "DV8Users",
            raw: r#"[{"username":"asha","email":"asha@example.com","password":"$argon2id$v=19$m=8,t=1,p=1$c2FsdHNhbHQ$aGFzaGhhc2hoYXNoaGFzaA","created":"2024-05-01T10:30:00.000Z"}]"#,
            expected: Expected::Users(vec![(
                "asha",
                "asha@example.com",
                "2024-05-01T10:30:00Z",
            )]),
        },
        GoldenVector {
            name: "user with legacy digest",
            key: "DV8Users",
            raw: r#"[{"username":"old","email":"old@example.com","password":"-1392818327","created":"2023-12-31T23:59:59.999Z"}]"#,
            expected: Expected::Users(vec![(
                "old",
                "old@example.com",
                "2023-12-31T23:59:59.999Z",
            )]),
        },
        GoldenVector {
            name: "users not a list",
            key: "DV8Users",
            raw: r#"{"username":"asha"}"#,
            expected: Expected::Malformed,
        },
        GoldenVector {
            name: "session",
            key: "DV8CurrentUser",
            raw: r#"{"username":"asha","email":"asha@example.com","loggedInAt":"2024-05-02T08:00:00.000Z"}"#,
            expected: Expected::Session("asha", "asha@example.com", "2024-05-02T08:00:00Z"),
        },
        GoldenVector {
            name: "session missing timestamp",
            key: "DV8CurrentUser",
            raw: r#"{"username":"asha","email":"asha@example.com"}"#,
            expected: Expected::Malformed,
        },
    ]
}

/// Check one vector. Returns a description of the mismatch, if any.
pub fn check_vector(vector: &GoldenVector) -> Result<(), String> {
    match &vector.expected {
        Expected::Cart(lines) => {
            let items: Vec<LineItem> = decode(vector.key, vector.raw).map_err(|e| e.to_string())?;
            let got: Vec<_> = items
                .iter()
                .map(|i| (i.name.as_str(), i.unit_price, i.quantity, i.image_ref.as_str()))
                .collect();
            let want: Vec<_> = lines.iter().map(|&(n, p, q, i)| (n, p, q, i)).collect();
            if got != want {
                return Err(format!("decoded {:?}", got));
            }
            // Carts are written back byte for byte.
            let reencoded = encode(vector.key, &items).map_err(|e| e.to_string())?;
            if reencoded != vector.raw {
                return Err(format!("re-encoded as {}", reencoded));
            }
            Ok(())
        }
        Expected::Users(users) => {
            let decoded: Vec<User> = decode(vector.key, vector.raw).map_err(|e| e.to_string())?;
            if decoded.len() != users.len() {
                return Err(format!("decoded {} users", decoded.len()));
            }
            for (user, &(username, email, created)) in decoded.iter().zip(users) {
                if user.username != username
                    || user.email.as_str() != email
                    || user.created_at != timestamp(created)?
                {
                    return Err(format!("decoded {:?}", user));
                }
            }
            Ok(())
        }
        Expected::Session(username, email, logged_in_at) => {
            let session: Session = decode(vector.key, vector.raw).map_err(|e| e.to_string())?;
            if session.username != *username
                || session.email.as_str() != *email
                || session.logged_in_at != timestamp(logged_in_at)?
            {
                return Err(format!("decoded {:?}", session));
            }
            Ok(())
        }
        Expected::Malformed => {
            let result = match vector.key {
                "DV8Cart" => decode::<Vec<LineItem>>(vector.key, vector.raw).map(drop),
                "DV8Users" => decode::<Vec<User>>(vector.key, vector.raw).map(drop),
                _ => decode::<Session>(vector.key, vector.raw).map(drop),
            };
            match result {
                Err(e) if e.is_malformed() => Ok(()),
                Err(e) => Err(format!("wrong error: {}", e)),
                Ok(()) => Err("decoded successfully".to_string()),
            }
        }
    }
}

/// Verify all vectors, returning `(name, passed, detail)` for each.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| match check_vector(v) {
            Ok(()) => (v.name.to_string(), true, String::new()),
            Err(detail) => (v.name.to_string(), false, detail),
        })
        .collect()
}

fn timestamp(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("bad expected timestamp {}: {}", s, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_vectors_pass() {
        for (name, passed, detail) in verify_all_vectors() {
            assert!(passed, "vector {:?} failed: {}", name, detail);
        }
    }

    #[test]
    fn test_vector_names_unique() {
        let vectors = all_vectors();
        let mut names: Vec<_> = vectors.iter().map(|v| v.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), vectors.len());
    }

    #[test]
    fn test_legacy_digest_never_verifies() {
        let vector = all_vectors()
            .into_iter()
            .find(|v| v.name == "user with legacy digest")
            .unwrap();
        let users: Vec<User> = decode(vector.key, vector.raw).unwrap();
        assert!(!users[0].verify_password("secret1"));
        assert!(!users[0].verify_password("-1392818327"));
    }
}
