//! Data Model
//!
//! Entities as the auction API transports them. The client never owns these
//! records: canonical storage is server-side, and every value here is a copy
//! of the server's latest answer.

mod auction;
mod comment;
mod filter;
mod watchlist;

pub use auction::{Auction, AuctionId, AuctionStatus, Bid, UserRef};
pub use comment::Comment;
pub use filter::{AuctionFilter, StatusFilter};
pub use watchlist::WatchlistEntry;
