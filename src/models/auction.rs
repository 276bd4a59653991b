//! Auction and bid records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned auction identifier
pub type AuctionId = String;

/// Auction lifecycle state. The client observes transitions, it never drives them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuctionStatus {
    #[default]
    Active,
    Ended,
}

impl AuctionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuctionStatus::Active => "active",
            AuctionStatus::Ended => "ended",
        }
    }
}

impl fmt::Display for AuctionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to a marketplace user; only the email is visible to clients
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "UserRecord")]
pub struct UserRef {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub email: String,
}

/// Wire shape of a user. Servers may send `_id`, `id`, or both; `_id` wins.
#[derive(Deserialize)]
struct UserRecord {
    #[serde(rename = "_id", default)]
    object_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    email: String,
}

impl From<UserRecord> for UserRef {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.object_id.or(record.id),
            email: record.email,
        }
    }
}

impl UserRef {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            id: None,
            email: email.into(),
        }
    }
}

/// A single bid as recorded by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bid {
    pub amount: f64,
    #[serde(default)]
    pub user: Option<UserRef>,
    pub timestamp: DateTime<Utc>,
}

impl Bid {
    /// Email of the bidder, empty when the server omitted the user
    pub fn bidder_email(&self) -> &str {
        self.user.as_ref().map(|u| u.email.as_str()).unwrap_or("")
    }
}

/// Auction record
///
/// List endpoints may omit `bids`; it defaults to empty. Bid order is
/// insertion order, which is also bid order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "AuctionRecord")]
pub struct Auction {
    #[serde(rename = "_id")]
    pub id: AuctionId,
    pub title: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub current_bid: f64,
    pub status: AuctionStatus,
    pub end_time: Option<DateTime<Utc>>,
    pub winner: Option<UserRef>,
    pub bids: Vec<Bid>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuctionRecord {
    #[serde(rename = "_id", default)]
    object_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    image: Option<String>,
    current_bid: f64,
    #[serde(default)]
    status: AuctionStatus,
    #[serde(default)]
    end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    winner: Option<UserRef>,
    #[serde(default)]
    bids: Vec<Bid>,
}

impl From<AuctionRecord> for Auction {
    fn from(record: AuctionRecord) -> Self {
        Self {
            id: record.object_id.or(record.id).unwrap_or_default(),
            title: record.title,
            description: record.description,
            image: record.image,
            current_bid: record.current_bid,
            status: record.status,
            end_time: record.end_time,
            winner: record.winner,
            bids: record.bids,
        }
    }
}

impl Auction {
    pub fn is_active(&self) -> bool {
        self.status == AuctionStatus::Active
    }

    /// Winner to display: only an ended auction with a recorded winner has one
    pub fn display_winner(&self) -> Option<&UserRef> {
        match self.status {
            AuctionStatus::Ended => self.winner.as_ref(),
            AuctionStatus::Active => None,
        }
    }

    /// Lowest amount the client will let a user submit
    pub fn minimum_next_bid(&self) -> f64 {
        self.current_bid + 1.0
    }
}
