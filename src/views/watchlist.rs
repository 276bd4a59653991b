//! The current user's watchlist.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use super::format::{alert, heading, money};
use crate::live::{LiveResource, LoadOutcome, Snapshot, ViewContext};
use crate::models::{AuctionId, WatchlistEntry};

const WATCHLIST_ERROR: &str = "Failed to load watchlist. Please try again.";

pub struct WatchlistView {
    ctx: ViewContext,
    entries: LiveResource<Vec<WatchlistEntry>>,
}

impl WatchlistView {
    pub fn new(ctx: ViewContext) -> Self {
        let entries = LiveResource::new(ctx.views.on_fetch_error);
        Self { ctx, entries }
    }

    pub async fn load(&self) -> LoadOutcome {
        let api = Arc::clone(&self.ctx.api);
        self.entries
            .load_and_wait(async move {
                api.list_watchlist().await.map_err(|e| {
                    tracing::warn!(error = %e, "Error fetching watchlist");
                    WATCHLIST_ERROR.to_string()
                })
            })
            .await
    }

    pub async fn snapshot(&self) -> Snapshot<Vec<WatchlistEntry>> {
        self.entries.snapshot().await
    }

    pub async fn screen(&self) -> WatchlistScreen {
        let snapshot = self.entries.snapshot().await;
        let items = snapshot
            .data
            .unwrap_or_default()
            .into_iter()
            .map(|entry| WatchlistItem {
                image_url: entry.image.as_deref().map(|i| self.ctx.asset_url(i)),
                details_href: format!("/auction/{}", entry.id),
                id: entry.id,
                title: entry.title,
                description: entry.description,
                current_bid: entry.current_bid,
            })
            .collect();

        WatchlistScreen {
            loading: snapshot.loading,
            error: snapshot.error,
            items,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WatchlistItem {
    pub id: AuctionId,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub current_bid: f64,
    pub details_href: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct WatchlistScreen {
    pub loading: bool,
    pub error: Option<String>,
    pub items: Vec<WatchlistItem>,
}

impl fmt::Display for WatchlistScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        heading(f, "My Watchlist", '=')?;

        if self.loading && self.items.is_empty() {
            return writeln!(f, "Loading watchlist...");
        }
        if let Some(error) = &self.error {
            alert(f, error)?;
        }
        // The empty message is for a successful, empty response only.
        if self.items.is_empty() {
            if self.error.is_none() {
                writeln!(f, "Your watchlist is empty.")?;
            }
            return Ok(());
        }

        for item in &self.items {
            writeln!(f)?;
            writeln!(f, "{}", item.title)?;
            if let Some(url) = &item.image_url {
                writeln!(f, "  Image: {}", url)?;
            }
            if let Some(description) = &item.description {
                writeln!(f, "  {}", description)?;
            }
            writeln!(f, "  Current Bid: {}", money(item.current_bid))?;
            writeln!(f, "  [View Auction] {}", item.details_href)?;
        }
        Ok(())
    }
}
