use std::future::Future;

use tokio::task::JoinHandle;
use tracing::debug;

/// Reload-on-key-change: at most one in-flight request per declared key.
///
/// A consumer declares the key its view depends on (a category, an item id,
/// a search term). Requesting a new key aborts the superseded in-flight
/// task, and a completion is only handed out while its key is still the
/// current one; stale results are discarded instead of being applied to a
/// now-irrelevant view. State already committed elsewhere is never rolled
/// back by a discard.
pub struct KeyedFetcher<K, T> {
    inflight: Option<(K, JoinHandle<T>)>,
}

impl<K, T> KeyedFetcher<K, T>
where
    K: Eq + std::fmt::Debug,
    T: Send + 'static,
{
    pub fn new() -> Self {
        Self { inflight: None }
    }

    /// Current key, if a request is outstanding.
    pub fn key(&self) -> Option<&K> {
        self.inflight.as_ref().map(|(k, _)| k)
    }

    /// Issue a request for `key`. A still-running request for the same key
    /// is kept (exactly one in-flight request per key); a request for a
    /// different key is aborted and replaced.
    pub fn request<F>(&mut self, key: K, fut: F)
    where
        F: Future<Output = T> + Send + 'static,
    {
        if let Some((current, handle)) = &self.inflight {
            if *current == key && !handle.is_finished() {
                debug!("Request for {:?} already in flight", key);
                return;
            }
        }
        if let Some((stale, handle)) = self.inflight.take() {
            debug!("Superseding in-flight request for {:?}", stale);
            handle.abort();
        }
        self.inflight = Some((key, tokio::spawn(fut)));
    }

    /// Await the outstanding request, but only if `key` is still current.
    /// A superseded or missing request yields `None`.
    pub async fn resolve(&mut self, key: &K) -> Option<T> {
        match self.inflight.take() {
            Some((current, handle)) if current == *key => handle.await.ok(),
            Some((stale, handle)) => {
                debug!("Discarding stale result for {:?}", stale);
                handle.abort();
                None
            }
            None => None,
        }
    }

    /// Abort any outstanding request (view unmount).
    pub fn cancel(&mut self) {
        if let Some((_, handle)) = self.inflight.take() {
            handle.abort();
        }
    }
}

impl<K, T> Default for KeyedFetcher<K, T>
where
    K: Eq + std::fmt::Debug,
    T: Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, T> Drop for KeyedFetcher<K, T> {
    fn drop(&mut self) {
        if let Some((_, handle)) = self.inflight.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_resolve_returns_result_for_current_key() {
        let mut fetcher: KeyedFetcher<&str, u32> = KeyedFetcher::new();
        fetcher.request("popular", async { 12 });
        assert_eq!(fetcher.resolve(&"popular").await, Some(12));
    }

    #[tokio::test]
    async fn test_key_change_discards_superseded_request() {
        let mut fetcher: KeyedFetcher<&str, u32> = KeyedFetcher::new();
        fetcher.request("popular", async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            1
        });
        fetcher.request("top_rated", async { 2 });

        assert_eq!(fetcher.key(), Some(&"top_rated"));
        assert_eq!(fetcher.resolve(&"top_rated").await, Some(2));
    }

    #[tokio::test]
    async fn test_stale_key_resolution_yields_none() {
        let mut fetcher: KeyedFetcher<&str, u32> = KeyedFetcher::new();
        fetcher.request("popular", async { 1 });
        fetcher.request("top_rated", async { 2 });

        // The view asking for the old key gets nothing rather than a
        // cross-view leak
        assert_eq!(fetcher.resolve(&"popular").await, None);
    }

    #[tokio::test]
    async fn test_same_key_keeps_single_inflight_request() {
        let mut fetcher: KeyedFetcher<&str, u32> = KeyedFetcher::new();
        fetcher.request("popular", async { 1 });
        fetcher.request("popular", async { 2 });

        // The second request for the same key did not replace the first
        assert_eq!(fetcher.resolve(&"popular").await, Some(1));
    }

    #[tokio::test]
    async fn test_cancel_drops_inflight_request() {
        let mut fetcher: KeyedFetcher<&str, u32> = KeyedFetcher::new();
        fetcher.request("popular", async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            1
        });
        fetcher.cancel();
        assert_eq!(fetcher.key(), None);
        assert_eq!(fetcher.resolve(&"popular").await, None);
    }
}
