use serde::{Deserialize, Serialize};

/// The storage partition selecting which watchlist is active.
///
/// Exactly one scope is active at a time: the guest scope while signed out,
/// or the scope keyed by the signed-in identity. Switching scopes swaps the
/// active list wholesale; lists are never merged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Scope {
    Guest,
    User(String),
}

impl Scope {
    /// Durable storage key for this scope's watchlist.
    pub fn storage_key(&self) -> String {
        match self {
            Scope::Guest => "watchlist".to_string(),
            Scope::User(uid) => format!("watchlist_{}", uid),
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scope::Guest => write!(f, "guest"),
            Scope::User(uid) => write!(f, "user:{}", uid),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_keys() {
        assert_eq!(Scope::Guest.storage_key(), "watchlist");
        assert_eq!(
            Scope::User("abc".to_string()).storage_key(),
            "watchlist_abc"
        );
    }
}
