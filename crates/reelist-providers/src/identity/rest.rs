use async_trait::async_trait;
use chrono::{Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use reelist_models::Session;

use crate::error::AuthError;
use crate::identity::provider::{check_password, AuthOutcome, IdentityProvider, ProviderTokens};

const DEFAULT_ENDPOINT: &str = "https://identitytoolkit.googleapis.com/v1";

/// REST client for an identity-toolkit style provider.
///
/// The provider exposes `accounts:signInWithPassword`, `accounts:signUp` and
/// `accounts:update` keyed by an API key; rejections arrive as an error code
/// string in the response body, which we map onto [`AuthError`].
pub struct RestIdentityProvider {
    client: Client,
    api_key: String,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct SignInResponse {
    #[serde(rename = "localId")]
    local_id: String,
    email: String,
    #[serde(rename = "displayName", default)]
    display_name: Option<String>,
    #[serde(rename = "idToken")]
    id_token: String,
    #[serde(rename = "refreshToken", default)]
    refresh_token: Option<String>,
    #[serde(rename = "expiresIn", default)]
    expires_in: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetails,
}

#[derive(Debug, Deserialize)]
struct ErrorDetails {
    #[serde(default)]
    message: String,
}

/// Map a provider error code onto the local taxonomy. Codes carry optional
/// trailing detail after a colon (e.g. `WEAK_PASSWORD : ...`).
pub fn map_provider_error(code: &str) -> AuthError {
    let code = code.split(':').next().unwrap_or(code).trim();
    match code {
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" | "USER_DISABLED" => {
            AuthError::InvalidCredentials
        }
        "WEAK_PASSWORD" => AuthError::WeakPassword,
        "EMAIL_EXISTS" => AuthError::EmailInUse,
        other => AuthError::Unavailable(other.to_string()),
    }
}

impl RestIdentityProvider {
    pub fn new(api_key: String, endpoint: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        }
    }

    fn url(&self, action: &str) -> String {
        format!("{}/accounts:{}?key={}", self.endpoint, action, self.api_key)
    }

    async fn post(&self, action: &str, payload: serde_json::Value) -> Result<SignInResponse, AuthError> {
        debug!("Identity POST accounts:{}", action);
        let response = self
            .client
            .post(self.url(action))
            .json(&payload)
            .send()
            .await
            .map_err(|e| AuthError::Unavailable(e.to_string()))?;

        if response.status().is_success() {
            response
                .json::<SignInResponse>()
                .await
                .map_err(|e| AuthError::Unavailable(e.to_string()))
        } else {
            let body: ErrorBody = response
                .json()
                .await
                .map_err(|e| AuthError::Unavailable(e.to_string()))?;
            Err(map_provider_error(&body.error.message))
        }
    }

    fn outcome(&self, resp: SignInResponse, display_name: Option<&str>) -> AuthOutcome {
        let expires_at = resp
            .expires_in
            .as_deref()
            .and_then(|s| s.parse::<i64>().ok())
            .map(|secs| Utc::now() + Duration::seconds(secs));

        AuthOutcome {
            session: Session {
                uid: resp.local_id,
                email: resp.email,
                display_name: display_name
                    .map(|s| s.to_string())
                    .or(resp.display_name)
                    .unwrap_or_default(),
                created_at: Utc::now(),
            },
            tokens: ProviderTokens {
                id_token: resp.id_token,
                refresh_token: resp.refresh_token,
                expires_at,
            },
        }
    }
}

#[async_trait]
impl IdentityProvider for RestIdentityProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthOutcome, AuthError> {
        let resp = self
            .post(
                "signInWithPassword",
                serde_json::json!({
                    "email": email,
                    "password": password,
                    "returnSecureToken": true,
                }),
            )
            .await?;

        info!("Signed in as {}", resp.email);
        Ok(self.outcome(resp, None))
    }

    async fn sign_up(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthOutcome, AuthError> {
        check_password(password)?;

        let resp = self
            .post(
                "signUp",
                serde_json::json!({
                    "email": email,
                    "password": password,
                    "returnSecureToken": true,
                }),
            )
            .await?;

        // The sign-up endpoint does not take a display name; it is set with
        // a follow-up profile update. A failure here is not fatal: the
        // account exists, the name is only cosmetic.
        if !name.is_empty() {
            let update = self
                .client
                .post(self.url("update"))
                .json(&serde_json::json!({
                    "idToken": resp.id_token,
                    "displayName": name,
                    "returnSecureToken": false,
                }))
                .send()
                .await;
            if let Err(e) = update {
                tracing::warn!("Failed to set display name after sign-up: {}", e);
            }
        }

        info!("Created account for {}", resp.email);
        Ok(self.outcome(resp, Some(name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_mapping() {
        assert_eq!(map_provider_error("EMAIL_EXISTS"), AuthError::EmailInUse);
        assert_eq!(
            map_provider_error("EMAIL_NOT_FOUND"),
            AuthError::InvalidCredentials
        );
        assert_eq!(
            map_provider_error("INVALID_LOGIN_CREDENTIALS"),
            AuthError::InvalidCredentials
        );
        assert_eq!(
            map_provider_error("WEAK_PASSWORD : Password should be at least 6 characters"),
            AuthError::WeakPassword
        );
        assert_eq!(
            map_provider_error("TOO_MANY_ATTEMPTS_TRY_LATER"),
            AuthError::Unavailable("TOO_MANY_ATTEMPTS_TRY_LATER".to_string())
        );
    }

    #[tokio::test]
    async fn test_weak_password_fails_before_any_network_call() {
        // Unroutable endpoint: if the client attempted a request this would
        // surface as Unavailable instead of WeakPassword.
        let provider = RestIdentityProvider::new(
            "key".to_string(),
            Some("http://127.0.0.1:0".to_string()),
        );
        let err = provider.sign_up("Al", "al@example.com", "short").await.unwrap_err();
        assert_eq!(err, AuthError::WeakPassword);
    }

    #[test]
    fn test_sign_in_response_parsing() {
        let resp: SignInResponse = serde_json::from_str(
            r#"{
                "localId": "u123",
                "email": "alice@example.com",
                "idToken": "tok",
                "refreshToken": "refresh",
                "expiresIn": "3600"
            }"#,
        )
        .unwrap();
        assert_eq!(resp.local_id, "u123");
        assert_eq!(resp.refresh_token.as_deref(), Some("refresh"));
    }
}
