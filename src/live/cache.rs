//! Shared auction cache.
//!
//! Normalized by auction id and shared by every view mounted from the same
//! `ViewContext`. A cached auction is only ever a head start: the detail view
//! renders it immediately and still refetches.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::{Auction, AuctionId};

#[derive(Clone, Default)]
pub struct AuctionCache {
    entries: Arc<RwLock<HashMap<AuctionId, Auction>>>,
}

impl AuctionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, id: &str) -> Option<Auction> {
        self.entries.read().await.get(id).cloned()
    }

    /// Store the server's latest copy of an auction
    pub async fn put(&self, auction: Auction) {
        self.entries.write().await.insert(auction.id.clone(), auction);
    }

    /// Drop an entry; returns whether one existed
    pub async fn invalidate(&self, id: &str) -> bool {
        self.entries.write().await.remove(id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::auction;

    #[tokio::test]
    async fn test_put_get_invalidate() {
        let cache = AuctionCache::new();
        assert!(cache.is_empty().await);

        cache.put(auction("42", "Vase", 100.0)).await;
        let shared = cache.clone();
        assert_eq!(shared.get("42").await.unwrap().title, "Vase");

        cache.put(auction("42", "Vase", 150.0)).await;
        assert_eq!(shared.len().await, 1);
        assert_eq!(shared.get("42").await.unwrap().current_bid, 150.0);

        assert!(shared.invalidate("42").await);
        assert!(!cache.invalidate("42").await);
        assert!(cache.get("42").await.is_none());
    }
}
