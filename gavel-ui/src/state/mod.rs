//! State Management
//!
//! Marketplace records and the reactive live-resource holder pages use.

pub mod live;
pub mod models;

pub use live::{same_route, Debounce, LiveResource};
pub use models::{Auction, AuctionFilter, Comment, WatchlistEntry};
