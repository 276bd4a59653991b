//! Pages
//!
//! Top-level page components for each route.

pub mod auction_details;
pub mod dashboard;
pub mod landing;
pub mod watchlist;

pub use auction_details::AuctionDetails;
pub use dashboard::Dashboard;
pub use landing::Landing;
pub use watchlist::Watchlist;
