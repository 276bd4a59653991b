//! Marketplace records as the API returns them, plus the client-side checks
//! the forms run before submitting.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "UserRecord")]
pub struct UserRef {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub email: String,
}

// Record ids arrive as `_id`, `id`, or both; `_id` wins.
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
    fn from(r: UserRecord) -> Self {
        Self { id: r.object_id.or(r.id), email: r.email }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bid {
    pub amount: f64,
    #[serde(default)]
    pub user: Option<UserRef>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "AuctionRecord")]
pub struct Auction {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub current_bid: f64,
    pub status: String,
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
    #[serde(default = "active")]
    status: String,
    #[serde(default)]
    end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    winner: Option<UserRef>,
    #[serde(default)]
    bids: Vec<Bid>,
}

impl From<AuctionRecord> for Auction {
    fn from(r: AuctionRecord) -> Self {
        Self {
            id: r.object_id.or(r.id).unwrap_or_default(),
            title: r.title,
            description: r.description,
            image: r.image,
            current_bid: r.current_bid,
            status: r.status,
            end_time: r.end_time,
            winner: r.winner,
            bids: r.bids,
        }
    }
}

fn active() -> String {
    "active".to_string()
}

impl Auction {
    pub fn is_active(&self) -> bool {
        self.status == "active"
    }

    /// Only an ended auction shows its winner
    pub fn display_winner(&self) -> Option<&UserRef> {
        if self.status == "ended" {
            self.winner.as_ref()
        } else {
            None
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "CommentRecord")]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub text: String,
    pub user: Option<UserRef>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Deserialize)]
struct CommentRecord {
    #[serde(rename = "_id", default)]
    object_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    text: String,
    #[serde(default)]
    user: Option<UserRef>,
    timestamp: DateTime<Utc>,
}

impl From<CommentRecord> for Comment {
    fn from(r: CommentRecord) -> Self {
        Self {
            id: r.object_id.or(r.id),
            text: r.text,
            user: r.user,
            timestamp: r.timestamp,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "WatchlistRecord")]
pub struct WatchlistEntry {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub current_bid: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WatchlistRecord {
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
}

impl From<WatchlistRecord> for WatchlistEntry {
    fn from(r: WatchlistRecord) -> Self {
        Self {
            id: r.object_id.or(r.id).unwrap_or_default(),
            title: r.title,
            description: r.description,
            image: r.image,
            current_bid: r.current_bid,
        }
    }
}

/// Filter panel contents. `status` is "", "active" or "ended".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuctionFilter {
    pub search: String,
    pub status: String,
    pub min_bid: String,
    pub max_bid: String,
}

impl AuctionFilter {
    /// All four parameters, always, in this order
    pub fn query_pairs(&self) -> [(&'static str, &str); 4] {
        [
            ("search", self.search.as_str()),
            ("status", self.status.as_str()),
            ("minBid", self.min_bid.as_str()),
            ("maxBid", self.max_bid.as_str()),
        ]
    }
}

pub const BID_NOT_HIGHER: &str = "Bid must be higher than current bid";
pub const BID_NOT_NUMERIC: &str = "Bid amount must be a number";
pub const COMMENT_EMPTY: &str = "Comment cannot be empty";

pub fn validate_bid(input: &str, current_bid: f64) -> Result<f64, &'static str> {
    let input = input.trim();
    if input.is_empty() {
        return Err(BID_NOT_HIGHER);
    }
    let amount: f64 = input.parse().map_err(|_| BID_NOT_NUMERIC)?;
    if !amount.is_finite() {
        return Err(BID_NOT_NUMERIC);
    }
    if amount <= current_bid || amount <= 0.0 {
        return Err(BID_NOT_HIGHER);
    }
    Ok(amount)
}

pub fn validate_comment(text: &str) -> Result<(), &'static str> {
    if text.trim().is_empty() {
        Err(COMMENT_EMPTY)
    } else {
        Ok(())
    }
}

/// "Mar 5, 2:30 pm"
pub fn short_timestamp<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    at.format("%b %-d, %-I:%M %P").to_string()
}

pub fn money(amount: f64) -> String {
    format!("${}", amount)
}

/// "in 2 days", "3 hours ago"
pub fn relative_time(target: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = target.signed_duration_since(now).num_seconds();
    let seconds = delta.unsigned_abs() as f64;
    let minutes = (seconds / 60.0).round();
    let hours = (seconds / 3600.0).round();
    let days = (seconds / 86_400.0).round();

    let phrase = if seconds < 45.0 {
        "a few seconds".to_string()
    } else if seconds < 90.0 {
        "a minute".to_string()
    } else if minutes < 45.0 {
        format!("{} minutes", minutes)
    } else if minutes < 90.0 {
        "an hour".to_string()
    } else if hours < 22.0 {
        format!("{} hours", hours)
    } else if hours < 36.0 {
        "a day".to_string()
    } else if days < 26.0 {
        format!("{} days", days)
    } else if days < 45.0 {
        "a month".to_string()
    } else if days < 320.0 {
        format!("{} months", (days / 30.4).round())
    } else if days < 548.0 {
        "a year".to_string()
    } else {
        format!("{} years", (days / 365.0).round())
    };

    if delta >= 0 {
        format!("in {}", phrase)
    } else {
        format!("{} ago", phrase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_auction_defaults() {
        let json = r#"{"_id":"42","title":"Vase","currentBid":100}"#;
        let auction: Auction = serde_json::from_str(json).unwrap();

        assert!(auction.is_active());
        assert!(auction.bids.is_empty());
        assert!(auction.display_winner().is_none());
    }

    #[test]
    fn test_records_with_both_id_keys() {
        let auction: Auction = serde_json::from_str(
            r#"{"_id":"42","id":"42","title":"Vase","currentBid":100,"status":"active"}"#,
        )
        .unwrap();
        assert_eq!(auction.id, "42");

        let comment: Comment = serde_json::from_str(
            r#"{"_id":"c1","id":"c1","text":"Lovely","user":{"_id":"u1","id":"u1","email":"a@example.com"},"timestamp":"2024-03-05T14:30:00Z"}"#,
        )
        .unwrap();
        assert_eq!(comment.id.as_deref(), Some("c1"));
        assert_eq!(comment.user.unwrap().id.as_deref(), Some("u1"));

        let entries: Vec<WatchlistEntry> = serde_json::from_str(
            r#"[{"_id":"1","id":"1","title":"Vase","currentBid":100},{"id":"2","title":"Lamp","currentBid":12}]"#,
        )
        .unwrap();
        assert_eq!(entries[0].id, "1");
        assert_eq!(entries[1].id, "2");
    }

    #[test]
    fn test_winner_only_when_ended() {
        let mut auction: Auction = serde_json::from_str(
            r#"{"_id":"42","title":"Vase","currentBid":250,"winner":{"email":"w@example.com"}}"#,
        )
        .unwrap();
        assert!(auction.display_winner().is_none());

        auction.status = "ended".to_string();
        assert_eq!(auction.display_winner().unwrap().email, "w@example.com");
    }

    #[test]
    fn test_query_pairs_keep_empty_fields() {
        let filter = AuctionFilter {
            search: "vase".to_string(),
            ..Default::default()
        };
        assert_eq!(
            filter.query_pairs(),
            [("search", "vase"), ("status", ""), ("minBid", ""), ("maxBid", "")]
        );
    }

    #[test]
    fn test_validate_bid() {
        assert_eq!(validate_bid("50", 100.0), Err(BID_NOT_HIGHER));
        assert_eq!(validate_bid("", 100.0), Err(BID_NOT_HIGHER));
        assert_eq!(validate_bid("abc", 100.0), Err(BID_NOT_NUMERIC));
        assert_eq!(validate_bid("150", 100.0), Ok(150.0));
    }

    #[test]
    fn test_validate_comment() {
        assert_eq!(validate_comment("  "), Err(COMMENT_EMPTY));
        assert!(validate_comment("nice").is_ok());
    }

    #[test]
    fn test_short_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap();
        assert_eq!(short_timestamp(&at), "Mar 5, 2:30 pm");
    }

    #[test]
    fn test_relative_time() {
        let now = Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap();
        assert_eq!(relative_time(now + Duration::days(2), now), "in 2 days");
        assert_eq!(relative_time(now - Duration::hours(3), now), "3 hours ago");
    }
}
