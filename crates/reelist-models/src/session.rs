use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The signed-in identity, as handed out by the identity provider.
///
/// Owned by the session manager; everything else only sees read-only
/// projections of this struct.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub uid: String,
    pub email: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Display name with the email local part as fallback, mirroring how the
    /// account menu labels the user.
    pub fn label(&self) -> &str {
        if self.display_name.is_empty() {
            self.email.split('@').next().unwrap_or(&self.email)
        } else {
            &self.display_name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(name: &str, email: &str) -> Session {
        Session {
            uid: "u1".to_string(),
            email: email.to_string(),
            display_name: name.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_label_prefers_display_name() {
        assert_eq!(session("Alice", "alice@example.com").label(), "Alice");
    }

    #[test]
    fn test_label_falls_back_to_email_local_part() {
        assert_eq!(session("", "alice@example.com").label(), "alice");
    }
}
