//! Auction API
//!
//! The seam between views and the remote auction service.
//!
//! ## Endpoints
//!
//! - `GET /auctions?search&status&minBid&maxBid` - filtered auction list
//! - `GET /auctions/{id}` - auction detail with bids and winner
//! - `POST /bids/{id}` - place a bid, returns the updated auction
//! - `GET /comments/{id}` - comments on an auction
//! - `POST /comments/{id}` - add a comment, returns the created comment
//! - `GET /watchlist` - watched auctions
//! - `POST /watchlist/{id}` - watch an auction (response ignored)

mod client;
mod error;

#[cfg(test)]
pub(crate) mod mock;

pub use client::{resolve_asset_url, ApiClient};
pub use error::{ApiError, ApiResult};

use async_trait::async_trait;

use crate::models::{Auction, AuctionFilter, Comment, WatchlistEntry};

/// Typed auction endpoints
///
/// Views hold an `Arc<dyn AuctionApi>`; the server answer returned here is
/// the only thing a view ever writes back into its state.
#[async_trait]
pub trait AuctionApi: Send + Sync {
    async fn list_auctions(&self, filter: &AuctionFilter) -> ApiResult<Vec<Auction>>;

    async fn get_auction(&self, id: &str) -> ApiResult<Auction>;

    /// Place a bid. The server is the authority on whether it is high enough.
    async fn place_bid(&self, id: &str, amount: f64) -> ApiResult<Auction>;

    async fn list_comments(&self, id: &str) -> ApiResult<Vec<Comment>>;

    async fn add_comment(&self, id: &str, text: &str) -> ApiResult<Comment>;

    async fn list_watchlist(&self) -> ApiResult<Vec<WatchlistEntry>>;

    async fn watch(&self, id: &str) -> ApiResult<()>;
}
