// ABOUTME: Full-replace collection cache with a generation guard
// ABOUTME: A refresh commits only if no newer refresh (or logout) started meanwhile

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;
use tracing::debug;

/// A client-side cache of one domain entity, replaced wholesale on refresh.
///
/// Every refresh claims a generation token before awaiting the network and
/// commits its result only while that token is still current. A slow, stale
/// response arriving after a newer one is dropped instead of overwriting it.
#[derive(Debug, Default)]
pub struct Collection<T> {
    items: RwLock<Vec<T>>,
    generation: AtomicU64,
}

impl<T> Collection<T> {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
            generation: AtomicU64::new(0),
        }
    }

    /// Claim the next generation token; invalidates all earlier claims
    pub fn begin_refresh(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Replace the contents if `token` is still the latest claim.
    /// Returns whether the result was applied.
    pub async fn commit(&self, token: u64, items: Vec<T>) -> bool {
        if self.generation.load(Ordering::SeqCst) != token {
            debug!("Dropping stale refresh result (generation {token})");
            return false;
        }
        *self.items.write().await = items;
        true
    }

    /// Empty the collection and invalidate in-flight refreshes
    pub async fn clear(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.items.write().await.clear();
    }

    pub async fn snapshot(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn refresh_replaces_contents_wholesale() {
        let collection = Collection::new();
        let token = collection.begin_refresh();
        assert!(collection.commit(token, vec![1, 2, 3]).await);

        let token = collection.begin_refresh();
        assert!(collection.commit(token, vec![4]).await);
        assert_eq!(collection.snapshot().await, vec![4]);
    }

    #[tokio::test]
    async fn repeated_refresh_with_same_data_is_idempotent() {
        let collection = Collection::new();
        let token = collection.begin_refresh();
        collection.commit(token, vec![1, 2, 3]).await;
        let first = collection.snapshot().await;

        let token = collection.begin_refresh();
        collection.commit(token, vec![1, 2, 3]).await;
        assert_eq!(collection.snapshot().await, first);
        assert_eq!(collection.len().await, 3);
    }

    #[tokio::test]
    async fn stale_result_does_not_overwrite_newer_one() {
        let collection = Collection::new();
        let old_token = collection.begin_refresh();
        let new_token = collection.begin_refresh();

        assert!(collection.commit(new_token, vec![2]).await);
        // The slower, older response arrives last and is dropped
        assert!(!collection.commit(old_token, vec![1]).await);
        assert_eq!(collection.snapshot().await, vec![2]);
    }

    #[tokio::test]
    async fn clear_invalidates_in_flight_refreshes() {
        let collection = Collection::new();
        let token = collection.begin_refresh();
        collection.clear().await;

        assert!(!collection.commit(token, vec![1]).await);
        assert!(collection.is_empty().await);
    }
}
