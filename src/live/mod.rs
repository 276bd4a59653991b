//! Live Resource Views
//!
//! The machinery shared by every view: a fetch/hold/refresh cell per server
//! resource, a debouncer for input-driven refetches, and an optional cache
//! shared across views.
//!
//! ## Data Flow
//!
//! 1. A view mounts and starts a fetch for each resource it shows
//! 2. A dependency change (filter, auction id) starts a new fetch, which
//!    supersedes the old one
//! 3. A mutation's server response replaces or extends the held value
//! 4. Rendering reads a snapshot

mod cache;
mod debounce;
mod resource;

pub use cache::AuctionCache;
pub use debounce::Debouncer;
pub use resource::{LiveResource, LoadOutcome, Snapshot};

use std::sync::Arc;

use crate::api::{resolve_asset_url, AuctionApi};
use crate::config::{Config, ViewConfig};

/// Everything a view needs from its surroundings
#[derive(Clone)]
pub struct ViewContext {
    pub api: Arc<dyn AuctionApi>,
    /// Present when `views.shared_cache` is enabled
    pub cache: Option<AuctionCache>,
    pub views: ViewConfig,
    asset_host: String,
}

impl ViewContext {
    pub fn new(api: Arc<dyn AuctionApi>, config: &Config) -> Self {
        Self {
            api,
            cache: config.views.shared_cache.then(AuctionCache::new),
            views: config.views.clone(),
            asset_host: config.api.asset_host.clone(),
        }
    }

    pub fn asset_url(&self, image: &str) -> String {
        resolve_asset_url(&self.asset_host, image)
    }
}
