use async_trait::async_trait;
use chrono::{DateTime, Utc};

use reelist_models::Session;

use crate::error::AuthError;

/// Minimum password length enforced by the provider's policy; checked
/// client-side as well so a weak password never leaves the process.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Tokens issued alongside a session. The caller persists these; the
/// provider itself stays stateless.
#[derive(Debug, Clone)]
pub struct ProviderTokens {
    pub id_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct AuthOutcome {
    pub session: Session,
    pub tokens: ProviderTokens,
}

/// Seam to the external identity provider.
///
/// This system does not implement authentication itself; it only reacts to
/// the provider's answers. Tests substitute a stub implementation.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthOutcome, AuthError>;

    async fn sign_up(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthOutcome, AuthError>;

    /// Remote sign-out. Local state is authoritative: callers clear their
    /// session even when this fails.
    async fn sign_out(&self) -> Result<(), AuthError> {
        Ok(())
    }
}

/// Client-side password policy check applied before sign-up leaves the
/// process. Sign-in relies on the provider's own rejection.
pub fn check_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        Err(AuthError::WeakPassword)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_password_rejected() {
        assert_eq!(check_password("short"), Err(AuthError::WeakPassword));
        assert_eq!(check_password(""), Err(AuthError::WeakPassword));
    }

    #[test]
    fn test_minimum_length_accepted() {
        assert!(check_password("secret").is_ok());
    }
}
