//! Dashboard: the filterable auction list.
//!
//! Filter edits are debounced; once input settles, exactly one list fetch is
//! issued with the complete filter set. List fetches supersede each other,
//! so an old slow response cannot overwrite a newer one.

use chrono::{DateTime, Utc};
use futures_util::FutureExt;
use serde::Serialize;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tokio::task::JoinHandle;

use super::format::{alert, heading, local, long_timestamp, money};
use crate::api::AuctionApi;
use crate::live::{Debouncer, LiveResource, LoadOutcome, Snapshot, ViewContext};
use crate::models::{Auction, AuctionFilter, AuctionId, StatusFilter};

const LIST_ERROR: &str = "Failed to load auctions";

pub struct DashboardView {
    ctx: ViewContext,
    filter: AuctionFilter,
    auctions: Arc<LiveResource<Vec<Auction>>>,
    debouncer: Debouncer<AuctionFilter>,
}

fn fetch_auctions(
    api: Arc<dyn AuctionApi>,
    filter: AuctionFilter,
) -> impl Future<Output = Result<Vec<Auction>, String>> + Send + 'static {
    async move {
        api.list_auctions(&filter).await.map_err(|e| {
            tracing::warn!(error = %e, "Error fetching auctions");
            LIST_ERROR.to_string()
        })
    }
}

impl DashboardView {
    /// Create the view. Spawns the filter debouncer, so a tokio runtime must be running.
    pub fn new(ctx: ViewContext) -> Self {
        Self::with_filter(ctx, AuctionFilter::default())
    }

    /// Create the view with filters already filled in (e.g. from a query string).
    /// The initial filter is used by [`load`](Self::load) and does not trigger a debounced fetch.
    pub fn with_filter(ctx: ViewContext, filter: AuctionFilter) -> Self {
        let auctions = Arc::new(LiveResource::new(ctx.views.on_fetch_error));

        let debouncer = {
            let auctions = Arc::clone(&auctions);
            let api = Arc::clone(&ctx.api);
            Debouncer::spawn(ctx.views.filter_debounce(), move |filter: AuctionFilter| {
                let auctions = Arc::clone(&auctions);
                let api = Arc::clone(&api);
                async move {
                    tracing::debug!(?filter, "Filters settled, refetching auctions");
                    let _ = auctions.load(fetch_auctions(api, filter)).await;
                }
                .boxed()
            })
        };

        Self {
            ctx,
            filter,
            auctions,
            debouncer,
        }
    }

    /// Fetch the list with the current filters, bypassing the debounce (mount)
    pub async fn load(&self) -> LoadOutcome {
        self.auctions
            .load_and_wait(fetch_auctions(Arc::clone(&self.ctx.api), self.filter.clone()))
            .await
    }

    pub fn filter(&self) -> &AuctionFilter {
        &self.filter
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        if self.filter.search != search {
            self.filter.search = search;
            self.filter_changed();
        }
    }

    pub fn set_status(&mut self, status: StatusFilter) {
        if self.filter.status != status {
            self.filter.status = status;
            self.filter_changed();
        }
    }

    pub fn set_min_bid(&mut self, min_bid: impl Into<String>) {
        let min_bid = min_bid.into();
        if self.filter.min_bid != min_bid {
            self.filter.min_bid = min_bid;
            self.filter_changed();
        }
    }

    pub fn set_max_bid(&mut self, max_bid: impl Into<String>) {
        let max_bid = max_bid.into();
        if self.filter.max_bid != max_bid {
            self.filter.max_bid = max_bid;
            self.filter_changed();
        }
    }

    /// Replace every filter field at once; counts as a single change
    pub fn set_filter(&mut self, filter: AuctionFilter) {
        if self.filter != filter {
            self.filter = filter;
            self.filter_changed();
        }
    }

    fn filter_changed(&self) {
        self.debouncer.push(self.filter.clone());
    }

    /// Ask the server to watch an auction. Fire-and-forget: nothing local
    /// changes and failures are only logged.
    pub fn add_to_watchlist(&self, id: impl Into<AuctionId>) -> JoinHandle<()> {
        let api = Arc::clone(&self.ctx.api);
        let id = id.into();
        tokio::spawn(async move {
            match api.watch(&id).await {
                Ok(()) => tracing::debug!(auction_id = %id, "Added to watchlist"),
                Err(e) => tracing::warn!(auction_id = %id, error = %e, "Error adding to watchlist"),
            }
        })
    }

    pub async fn screen(&self) -> DashboardScreen {
        let snapshot = self.auctions.snapshot().await;
        let cards = snapshot
            .data
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|a| AuctionCard::new(a, &self.ctx))
            .collect();

        DashboardScreen {
            filter: self.filter.clone(),
            loading: snapshot.loading,
            error: snapshot.error,
            stale: snapshot.stale,
            cards,
        }
    }

    pub async fn snapshot(&self) -> Snapshot<Vec<Auction>> {
        self.auctions.snapshot().await
    }
}

/// One auction as the list shows it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuctionCard {
    pub id: AuctionId,
    pub title: String,
    pub image_url: Option<String>,
    pub current_bid: f64,
    pub end_time: Option<DateTime<Utc>>,
    pub details_href: String,
}

impl AuctionCard {
    fn new(auction: &Auction, ctx: &ViewContext) -> Self {
        Self {
            id: auction.id.clone(),
            title: auction.title.clone(),
            image_url: auction.image.as_deref().map(|i| ctx.asset_url(i)),
            current_bid: auction.current_bid,
            end_time: auction.end_time,
            details_href: format!("/auction/{}", auction.id),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardScreen {
    pub filter: AuctionFilter,
    pub loading: bool,
    pub error: Option<String>,
    pub stale: bool,
    pub cards: Vec<AuctionCard>,
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

impl fmt::Display for DashboardScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        heading(f, "Active Auctions", '=')?;

        let status = match self.filter.status {
            StatusFilter::All => "All Statuses",
            StatusFilter::Active => "Active",
            StatusFilter::Ended => "Ended",
        };
        writeln!(
            f,
            "Search: {} | Status: {} | Min Bid: {} | Max Bid: {}",
            or_dash(&self.filter.search),
            status,
            or_dash(&self.filter.min_bid),
            or_dash(&self.filter.max_bid),
        )?;
        writeln!(f)?;

        if let Some(error) = &self.error {
            alert(f, error)?;
            writeln!(f)?;
        }

        if self.cards.is_empty() {
            if self.loading {
                return writeln!(f, "Loading auctions...");
            }
            return writeln!(f, "No auctions available");
        }

        for card in &self.cards {
            writeln!(f, "{}", card.title)?;
            if let Some(url) = &card.image_url {
                writeln!(f, "  Image: {}", url)?;
            }
            writeln!(f, "  Current Bid: {}", money(card.current_bid))?;
            if let Some(end) = &card.end_time {
                writeln!(f, "  Ends: {}", long_timestamp(&local(end)))?;
            }
            writeln!(f, "  [View Details] {}   [Watch] {}", card.details_href, card.id)?;
            writeln!(f)?;
        }
        Ok(())
    }
}
