use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use reelist_config::KvStore;
use reelist_models::{Scope, Session};
use reelist_providers::identity::IdentityProvider;
use reelist_providers::AuthError;

use crate::session::SessionManager;
use crate::watchlist::WatchlistStore;

/// The process-wide state container: session plus the active watchlist.
///
/// Constructed explicitly once at startup and passed by reference to
/// whatever consumes it; there is no ambient singleton. Every auth
/// transition re-selects the active watchlist scope, and [`close`]
/// is the single teardown path at process exit.
///
/// [`close`]: AppContext::close
pub struct AppContext {
    session: SessionManager,
    watchlist: WatchlistStore,
}

impl AppContext {
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        store: KvStore,
        credentials_path: PathBuf,
    ) -> Self {
        let session = SessionManager::new(provider, store.clone(), credentials_path);
        let watchlist = WatchlistStore::load(store, session.scope());
        Self { session, watchlist }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.current()
    }

    pub fn scope(&self) -> Scope {
        self.session.scope()
    }

    pub fn watchlist(&self) -> &WatchlistStore {
        &self.watchlist
    }

    pub fn watchlist_mut(&mut self) -> &mut WatchlistStore {
        &mut self.watchlist
    }

    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<Session, AuthError> {
        let session = self.session.sign_in(email, password).await?;
        self.watchlist.switch_scope(self.session.scope());
        Ok(session)
    }

    pub async fn sign_up(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        let session = self.session.sign_up(name, email, password).await?;
        self.watchlist.switch_scope(self.session.scope());
        Ok(session)
    }

    pub async fn sign_out(&mut self) {
        self.session.sign_out().await;
        self.watchlist.switch_scope(Scope::Guest);
    }

    /// Teardown. Mutations persist synchronously as they happen, so there is
    /// nothing to flush; this is the designated single exit point.
    pub fn close(self) {
        debug!("App context closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::stub::StubProvider;
    use chrono::Utc;
    use reelist_models::WatchlistEntry;
    use tempfile::TempDir;

    fn entry(id: &str) -> WatchlistEntry {
        WatchlistEntry {
            id: id.to_string(),
            title: format!("Title {}", id),
            backdrop_path: None,
            vote_average: None,
            overview: None,
            date_added: Utc::now(),
        }
    }

    fn context(dir: &TempDir) -> AppContext {
        let store = KvStore::open(dir.path().join("store")).unwrap();
        AppContext::new(
            Arc::new(StubProvider::new()),
            store,
            dir.path().join("credentials.toml"),
        )
    }

    #[tokio::test]
    async fn test_login_swaps_guest_list_for_user_list() {
        let dir = TempDir::new().unwrap();
        let mut ctx = context(&dir);

        // Anonymous user saves item 42
        ctx.watchlist_mut().add(entry("42")).unwrap();
        assert!(ctx.watchlist().contains("42"));

        // First login as alice: her stored list is empty, not the guest list
        ctx.sign_in("alice@example.com", "secret1").await.unwrap();
        assert!(ctx.watchlist().is_empty());
        assert!(!ctx.watchlist().contains("42"));
    }

    #[tokio::test]
    async fn test_sign_out_returns_to_guest_list() {
        let dir = TempDir::new().unwrap();
        let mut ctx = context(&dir);

        ctx.watchlist_mut().add(entry("42")).unwrap();
        ctx.sign_in("alice@example.com", "secret1").await.unwrap();
        ctx.watchlist_mut().add(entry("7")).unwrap();

        ctx.sign_out().await;
        assert_eq!(ctx.scope(), Scope::Guest);
        assert!(ctx.watchlist().contains("42"));
        assert!(!ctx.watchlist().contains("7"));
    }

    #[tokio::test]
    async fn test_failed_login_keeps_current_list_active() {
        let dir = TempDir::new().unwrap();
        let mut ctx = context(&dir);

        ctx.watchlist_mut().add(entry("42")).unwrap();
        assert!(ctx.sign_in("alice@example.com", "nope42").await.is_err());

        assert_eq!(ctx.scope(), Scope::Guest);
        assert!(ctx.watchlist().contains("42"));
    }

    #[tokio::test]
    async fn test_restart_restores_session_and_its_list() {
        let dir = TempDir::new().unwrap();

        {
            let mut ctx = context(&dir);
            ctx.sign_in("alice@example.com", "secret1").await.unwrap();
            ctx.watchlist_mut().add(entry("7")).unwrap();
            ctx.close();
        }

        let ctx = context(&dir);
        assert_eq!(ctx.session().map(|s| s.uid.as_str()), Some("alice"));
        assert!(ctx.watchlist().contains("7"));
    }
}
