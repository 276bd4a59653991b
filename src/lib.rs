//! # Gavel
//!
//! Client for an online auction marketplace. Browse and filter auctions,
//! inspect an auction with its bid history and comments, place bids, comment,
//! and keep a watchlist, all against the marketplace REST API.
//!
//! ## Modules
//!
//! - [`api`]: typed HTTP client and the [`AuctionApi`] seam views depend on
//! - [`live`]: live resources (fetch, hold, refresh, supersede), debouncing, shared cache
//! - [`views`]: one view per page, each rendering a serializable screen
//! - [`models`]: auction, bid, comment, watchlist and filter records
//! - [`config`]: TOML config with environment overrides
//! - [`logging`]: tracing subscriber setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gavel::{ApiClient, AuctionDetailsView, Config, ViewContext};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let client = ApiClient::new(&config.api)?;
//!     let ctx = ViewContext::new(Arc::new(client), &config);
//!
//!     let mut view = AuctionDetailsView::new(ctx, "42").await;
//!     view.load().await;
//!     println!("{}", view.screen().await);
//!
//!     view.set_bid_input("150");
//!     match view.place_bid().await {
//!         Ok(auction) => println!("Current bid is now ${}", auction.current_bid),
//!         Err(e) => eprintln!("{}", e),
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod live;
pub mod logging;
pub mod models;
pub mod views;

pub use api::{ApiClient, ApiError, ApiResult, AuctionApi};

pub use config::{Config, ConfigError, FetchErrorPolicy};

pub use live::{AuctionCache, Debouncer, LiveResource, LoadOutcome, Snapshot, ViewContext};

pub use models::{
    Auction, AuctionFilter, AuctionId, AuctionStatus, Bid, Comment, StatusFilter, UserRef,
    WatchlistEntry,
};

pub use views::{
    AuctionDetailsView, DashboardView, LandingView, ValidationError, ViewError, WatchlistView,
};
