//! Dashboard filter criteria.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Status selector of the filter panel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Ended,
}

impl StatusFilter {
    /// Query value; `All` is sent as an empty string
    pub fn as_query(&self) -> &'static str {
        match self {
            StatusFilter::All => "",
            StatusFilter::Active => "active",
            StatusFilter::Ended => "ended",
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::Active),
            "ended" => Ok(StatusFilter::Ended),
            other => Err(format!("unknown status filter: {}", other)),
        }
    }
}

/// Filter fields exactly as the user typed them.
///
/// Bid bounds stay raw text: the server interprets them, and a half-typed
/// value is still a value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionFilter {
    pub search: String,
    pub status: StatusFilter,
    pub min_bid: String,
    pub max_bid: String,
}

impl AuctionFilter {
    /// Query parameters for `GET /auctions`, always all four, in a fixed order
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("search", self.search.clone()),
            ("status", self.status.as_query().to_string()),
            ("minBid", self.min_bid.clone()),
            ("maxBid", self.max_bid.clone()),
        ]
    }

    pub fn is_empty(&self) -> bool {
        *self == AuctionFilter::default()
    }
}
