use serde::{Deserialize, Serialize};

use super::AuctionId;

/// A watched auction with its display fields duplicated by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "WatchlistRecord")]
pub struct WatchlistEntry {
    #[serde(rename = "_id")]
    pub id: AuctionId,
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
    fn from(record: WatchlistRecord) -> Self {
        Self {
            id: record.object_id.or(record.id).unwrap_or_default(),
            title: record.title,
            description: record.description,
            image: record.image,
            current_bid: record.current_bid,
        }
    }
}
