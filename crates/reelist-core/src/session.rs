use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use reelist_config::{CredentialStore, KvStore};
use reelist_models::{Scope, Session};
use reelist_providers::identity::{AuthOutcome, IdentityProvider};
use reelist_providers::AuthError;

/// Storage key for the persisted session.
pub const SESSION_KEY: &str = "session";

/// Wraps the external identity provider and owns the current session.
///
/// A restored or newly established session is persisted under the `session`
/// key so a restart picks it up; provider tokens go to the credential store.
/// Every transition changes the active scope, which the surrounding context
/// turns into a watchlist swap.
pub struct SessionManager {
    provider: Arc<dyn IdentityProvider>,
    store: KvStore,
    credentials_path: PathBuf,
    session: Option<Session>,
}

impl SessionManager {
    /// Restore a persisted session if one exists.
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        store: KvStore,
        credentials_path: PathBuf,
    ) -> Self {
        let session: Option<Session> = store.get(SESSION_KEY);
        if let Some(s) = &session {
            info!("Restored session for {}", s.email);
        }
        Self {
            provider,
            store,
            credentials_path,
            session,
        }
    }

    pub fn current(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// The watchlist scope selected by the current session.
    pub fn scope(&self) -> Scope {
        match &self.session {
            Some(s) => Scope::User(s.uid.clone()),
            None => Scope::Guest,
        }
    }

    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<Session, AuthError> {
        let outcome = self.provider.sign_in(email, password).await?;
        Ok(self.commit(outcome))
    }

    pub async fn sign_up(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        let outcome = self.provider.sign_up(name, email, password).await?;
        Ok(self.commit(outcome))
    }

    /// Clear the session. Local state is authoritative: a failed remote
    /// revoke is logged and ignored.
    pub async fn sign_out(&mut self) {
        if let Err(e) = self.provider.sign_out().await {
            warn!("Remote sign-out failed, clearing local session anyway: {}", e);
        }

        self.session = None;
        if let Err(e) = self.store.delete(SESSION_KEY) {
            warn!("Failed to delete persisted session: {}", e);
        }

        let mut creds = CredentialStore::new(self.credentials_path.clone());
        if creds.load().is_ok() {
            creds.clear_identity_tokens();
            if let Err(e) = creds.save() {
                warn!("Failed to clear stored tokens: {}", e);
            }
        }

        info!("Signed out");
    }

    fn commit(&mut self, outcome: AuthOutcome) -> Session {
        let AuthOutcome { session, tokens } = outcome;

        if let Err(e) = self.store.put(SESSION_KEY, &session) {
            // The in-memory session still drives the UI; persistence only
            // affects the next start.
            warn!("Failed to persist session: {}", e);
        }

        let mut creds = CredentialStore::new(self.credentials_path.clone());
        if let Err(e) = creds.load() {
            warn!("Failed to load credential store: {}", e);
        }
        creds.set_id_token(tokens.id_token);
        if let Some(refresh) = tokens.refresh_token {
            creds.set_refresh_token(refresh);
        }
        if let Some(expires) = tokens.expires_at {
            creds.set_token_expires(expires);
        }
        if let Err(e) = creds.save() {
            warn!("Failed to save credential store: {}", e);
        }

        info!("Session established for {}", session.email);
        self.session = Some(session.clone());
        session
    }
}
