use anyhow::Result;
use tracing::{debug, info};

use reelist_config::KvStore;
use reelist_models::{normalize_id, Scope, SortBy, WatchlistEntry};

/// The active watchlist: an ordered in-memory list mirrored to durable
/// storage under the active scope's key.
///
/// Exactly one list is active at a time. Every mutation persists the whole
/// list synchronously before returning; there is no partial write. A single
/// logical writer is assumed, so no locking discipline is needed here.
pub struct WatchlistStore {
    store: KvStore,
    scope: Scope,
    entries: Vec<WatchlistEntry>,
}

impl WatchlistStore {
    /// Load the list persisted for `scope`. Absent or malformed stored data
    /// yields an empty list, never an error.
    pub fn load(store: KvStore, scope: Scope) -> Self {
        let entries: Vec<WatchlistEntry> = store.get(&scope.storage_key()).unwrap_or_default();
        info!("Loaded watchlist for {} ({} items)", scope, entries.len());
        Self {
            store,
            scope,
            entries,
        }
    }

    /// Swap the active list to the one persisted for the new scope. The
    /// previous scope's entries are left in storage untouched; lists are
    /// never merged.
    pub fn switch_scope(&mut self, scope: Scope) {
        if scope == self.scope {
            return;
        }
        debug!("Switching watchlist scope {} -> {}", self.scope, scope);
        self.entries = self.store.get(&scope.storage_key()).unwrap_or_default();
        self.scope = scope;
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn entries(&self) -> &[WatchlistEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Membership test by normalized id, tolerating numeric/string
    /// representation mismatches from upstream data.
    pub fn contains(&self, id: &str) -> bool {
        let wanted = normalize_id(id);
        self.entries.iter().any(|e| normalize_id(&e.id) == wanted)
    }

    /// Append the entry unless its id is already present. Returns whether
    /// the list changed; an already-present id is a no-op, not an error.
    pub fn add(&mut self, entry: WatchlistEntry) -> Result<bool> {
        if self.contains(&entry.id) {
            debug!("Watchlist already contains {}", entry.id);
            return Ok(false);
        }
        self.entries.push(entry);
        self.persist()?;
        Ok(true)
    }

    /// Remove all entries matching the id. Removing an absent id is a safe
    /// no-op.
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        let wanted = normalize_id(id);
        let before = self.entries.len();
        self.entries.retain(|e| normalize_id(&e.id) != wanted);
        if self.entries.len() == before {
            debug!("Watchlist does not contain {}", id);
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Derived presentation order; the stored list is untouched.
    pub fn sorted_view(&self, sort: SortBy) -> Vec<WatchlistEntry> {
        let mut view = self.entries.clone();
        if sort == SortBy::Rating {
            // Stable sort: ties keep insertion order, unrated items go last
            view.sort_by(|a, b| {
                let rating = |e: &WatchlistEntry| e.vote_average.unwrap_or(f64::NEG_INFINITY);
                rating(b)
                    .partial_cmp(&rating(a))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }
        view
    }

    fn persist(&self) -> Result<()> {
        self.store.put(&self.scope.storage_key(), &self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    fn entry(id: &str, rating: Option<f64>) -> WatchlistEntry {
        WatchlistEntry {
            id: id.to_string(),
            title: format!("Title {}", id),
            backdrop_path: None,
            vote_average: rating,
            overview: None,
            date_added: Utc::now(),
        }
    }

    fn open_store(dir: &TempDir) -> KvStore {
        KvStore::open(dir.path().join("store")).unwrap()
    }

    #[test]
    fn test_add_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let mut list = WatchlistStore::load(open_store(&dir), Scope::Guest);

        assert!(list.add(entry("42", Some(7.0))).unwrap());
        assert!(!list.add(entry("42", Some(7.0))).unwrap());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_add_detects_numeric_string_mismatch() {
        let dir = TempDir::new().unwrap();
        let mut list = WatchlistStore::load(open_store(&dir), Scope::Guest);

        assert!(list.add(entry("42", None)).unwrap());
        assert!(!list.add(entry(" 042 ", None)).unwrap());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_remove_absent_id_is_noop() {
        let dir = TempDir::new().unwrap();
        let mut list = WatchlistStore::load(open_store(&dir), Scope::Guest);
        list.add(entry("1", None)).unwrap();

        assert!(!list.remove("99").unwrap());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_contains_tracks_add_and_remove() {
        let dir = TempDir::new().unwrap();
        let mut list = WatchlistStore::load(open_store(&dir), Scope::Guest);

        list.add(entry("7", None)).unwrap();
        assert!(list.contains("7"));
        list.remove("7").unwrap();
        assert!(!list.contains("7"));
    }

    #[test]
    fn test_mutations_persist_across_reload() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        let mut list = WatchlistStore::load(store.clone(), Scope::Guest);
        list.add(entry("1", None)).unwrap();
        list.add(entry("2", None)).unwrap();
        list.remove("1").unwrap();

        let reloaded = WatchlistStore::load(store, Scope::Guest);
        assert_eq!(reloaded.len(), 1);
        assert!(reloaded.contains("2"));
    }

    #[test]
    fn test_scope_switch_swaps_without_merging() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        let alice = Scope::User("alice".to_string());

        let mut list = WatchlistStore::load(store.clone(), Scope::Guest);
        list.add(entry("42", None)).unwrap();

        // First login: alice has no stored list, so the visible list is empty
        list.switch_scope(alice.clone());
        assert!(list.is_empty());
        assert!(!list.contains("42"));

        list.add(entry("7", None)).unwrap();

        // Back to guest: the guest list still holds 42 and only 42
        list.switch_scope(Scope::Guest);
        assert_eq!(list.len(), 1);
        assert!(list.contains("42"));

        // And alice's list kept its own entry
        list.switch_scope(alice);
        assert_eq!(list.len(), 1);
        assert!(list.contains("7"));
    }

    #[test]
    fn test_sorted_view_rating_descending() {
        let dir = TempDir::new().unwrap();
        let mut list = WatchlistStore::load(open_store(&dir), Scope::Guest);
        list.add(entry("a", Some(7.0))).unwrap();
        list.add(entry("b", Some(9.0))).unwrap();
        list.add(entry("c", Some(8.0))).unwrap();

        let view = list.sorted_view(SortBy::Rating);
        let ratings: Vec<f64> = view.iter().filter_map(|e| e.vote_average).collect();
        assert_eq!(ratings, vec![9.0, 8.0, 7.0]);

        // The stored order is untouched
        assert_eq!(list.entries()[0].id, "a");
    }

    #[test]
    fn test_sorted_view_ties_keep_insertion_order() {
        let dir = TempDir::new().unwrap();
        let mut list = WatchlistStore::load(open_store(&dir), Scope::Guest);
        list.add(entry("first", Some(8.0))).unwrap();
        list.add(entry("second", Some(8.0))).unwrap();

        let view = list.sorted_view(SortBy::Rating);
        assert_eq!(view[0].id, "first");
        assert_eq!(view[1].id, "second");
    }

    #[test]
    fn test_sorted_view_missing_rating_sorts_last() {
        let dir = TempDir::new().unwrap();
        let mut list = WatchlistStore::load(open_store(&dir), Scope::Guest);
        list.add(entry("unrated", None)).unwrap();
        list.add(entry("rated", Some(3.0))).unwrap();

        let view = list.sorted_view(SortBy::Rating);
        assert_eq!(view[0].id, "rated");
        assert_eq!(view[1].id, "unrated");
    }

    #[test]
    fn test_sorted_view_added_is_identity() {
        let dir = TempDir::new().unwrap();
        let mut list = WatchlistStore::load(open_store(&dir), Scope::Guest);
        list.add(entry("x", Some(1.0))).unwrap();
        list.add(entry("y", Some(9.0))).unwrap();

        let view = list.sorted_view(SortBy::Added);
        assert_eq!(view[0].id, "x");
        assert_eq!(view[1].id, "y");
    }

    #[test]
    fn test_malformed_stored_list_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        store.put("watchlist", &"definitely not a list").unwrap();

        let list = WatchlistStore::load(store, Scope::Guest);
        assert!(list.is_empty());
    }
}
