//! Views
//!
//! One struct per page of the marketplace client. Each view owns its
//! resources and input fields, exposes the page's operations (load, filter,
//! bid, comment, watch), and produces a screen: a serializable snapshot that
//! renders to text through `Display`.
//!
//! - [`LandingView`]: static welcome page
//! - [`DashboardView`]: filtered auction list with watch action
//! - [`AuctionDetailsView`]: auction, bid history, comments, bid and comment forms
//! - [`WatchlistView`]: watched auctions

pub mod format;
pub mod validation;

mod dashboard;
mod details;
mod landing;
mod watchlist;

pub use dashboard::{AuctionCard, DashboardScreen, DashboardView};
pub use details::{AuctionDetailsView, DetailsScreen};
pub use landing::{LandingScreen, LandingView, Link};
pub use validation::ValidationError;
pub use watchlist::{WatchlistItem, WatchlistScreen, WatchlistView};

use thiserror::Error;

/// Why a mutation did not go through. `Display` is the inline message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    /// Rejected locally; no request was sent
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// Sent, and the server or the network said no
    #[error("{0}")]
    Rejected(String),
}
