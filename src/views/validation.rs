//! Client-side input checks.
//!
//! These are advisory: they spare the server obviously bad requests and give
//! instant feedback. The server re-validates everything, and its response is
//! the only thing written back to view state.

use thiserror::Error;

use crate::models::AuctionStatus;

/// Input rejected before any request was sent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Bid must be higher than current bid")]
    BidNotHigher,

    #[error("Bid amount must be a number")]
    BidNotNumeric,

    #[error("Comment cannot be empty")]
    EmptyComment,

    #[error("Auction is still loading")]
    AuctionNotLoaded,

    #[error("Auction has ended")]
    AuctionEnded,
}

/// Parse a bid amount and check it beats the current bid
pub fn validate_bid(input: &str, current_bid: f64) -> Result<f64, ValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ValidationError::BidNotHigher);
    }

    let amount: f64 = input.parse().map_err(|_| ValidationError::BidNotNumeric)?;
    if !amount.is_finite() {
        return Err(ValidationError::BidNotNumeric);
    }
    if amount <= current_bid || amount <= 0.0 {
        return Err(ValidationError::BidNotHigher);
    }

    Ok(amount)
}

/// Check a bid against the auction it targets: it must be loaded and open
pub fn validate_bid_for(
    auction: Option<(f64, AuctionStatus)>,
    input: &str,
) -> Result<f64, ValidationError> {
    let (current_bid, status) = auction.ok_or(ValidationError::AuctionNotLoaded)?;
    if status == AuctionStatus::Ended {
        return Err(ValidationError::AuctionEnded);
    }
    validate_bid(input, current_bid)
}

/// Whitespace-only text counts as empty
pub fn validate_comment(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        Err(ValidationError::EmptyComment)
    } else {
        Ok(())
    }
}
