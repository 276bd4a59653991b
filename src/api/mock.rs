//! In-memory `AuctionApi` used by view tests. Records every call.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use super::{ApiError, ApiResult, AuctionApi};
use crate::models::{Auction, AuctionFilter, AuctionStatus, Bid, Comment, UserRef, WatchlistEntry};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListAuctions(AuctionFilter),
    GetAuction(String),
    PlaceBid(String, f64),
    ListComments(String),
    AddComment(String, String),
    ListWatchlist,
    Watch(String),
}

#[derive(Default)]
pub struct MockApi {
    auctions: Mutex<HashMap<String, Auction>>,
    comments: Mutex<HashMap<String, Vec<Comment>>>,
    watchlist: Mutex<Vec<WatchlistEntry>>,
    failing: Mutex<HashMap<&'static str, Option<String>>>,
    calls: Mutex<Vec<Call>>,
}

pub const USER_EMAIL: &str = "me@example.com";

pub fn auction(id: &str, title: &str, current_bid: f64) -> Auction {
    Auction {
        id: id.to_string(),
        title: title.to_string(),
        description: Some(format!("{} description", title)),
        image: None,
        current_bid,
        status: AuctionStatus::Active,
        end_time: Some(Utc.with_ymd_and_hms(2099, 1, 1, 12, 0, 0).unwrap()),
        winner: None,
        bids: Vec::new(),
    }
}

pub fn comment(text: &str) -> Comment {
    Comment {
        id: None,
        text: text.to_string(),
        user: Some(UserRef::new(USER_EMAIL)),
        timestamp: Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap(),
    }
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_auction(self, auction: Auction) -> Self {
        self.auctions
            .lock()
            .unwrap()
            .insert(auction.id.clone(), auction);
        self
    }

    pub fn with_comments(self, id: &str, comments: Vec<Comment>) -> Self {
        self.comments.lock().unwrap().insert(id.to_string(), comments);
        self
    }

    pub fn with_watchlist(self, entries: Vec<WatchlistEntry>) -> Self {
        *self.watchlist.lock().unwrap() = entries;
        self
    }

    /// Make an endpoint fail with a 500 carrying `message` (or no body)
    pub fn fail(&self, endpoint: &'static str, message: Option<&str>) {
        self.failing
            .lock()
            .unwrap()
            .insert(endpoint, message.map(str::to_string));
    }

    pub fn recover(&self, endpoint: &'static str) {
        self.failing.lock().unwrap().remove(endpoint);
    }

    pub fn set_auction(&self, auction: Auction) {
        self.auctions
            .lock()
            .unwrap()
            .insert(auction.id.clone(), auction);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, endpoint: &'static str, call: Call) -> ApiResult<()> {
        self.calls.lock().unwrap().push(call);
        match self.failing.lock().unwrap().get(endpoint) {
            Some(message) => Err(ApiError::Server {
                status: 500,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }

    fn not_found() -> ApiError {
        ApiError::Server {
            status: 404,
            message: Some("Auction not found".to_string()),
        }
    }
}

#[async_trait]
impl AuctionApi for MockApi {
    async fn list_auctions(&self, filter: &AuctionFilter) -> ApiResult<Vec<Auction>> {
        self.record("list_auctions", Call::ListAuctions(filter.clone()))?;

        let search = filter.search.to_lowercase();
        let mut list: Vec<Auction> = self
            .auctions
            .lock()
            .unwrap()
            .values()
            .filter(|a| search.is_empty() || a.title.to_lowercase().contains(&search))
            .filter(|a| filter.status.as_query().is_empty() || a.status.as_str() == filter.status.as_query())
            .cloned()
            .collect();
        list.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(list)
    }

    async fn get_auction(&self, id: &str) -> ApiResult<Auction> {
        self.record("get_auction", Call::GetAuction(id.to_string()))?;
        self.auctions
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(Self::not_found)
    }

    async fn place_bid(&self, id: &str, amount: f64) -> ApiResult<Auction> {
        self.record("place_bid", Call::PlaceBid(id.to_string(), amount))?;

        let mut auctions = self.auctions.lock().unwrap();
        let auction = auctions.get_mut(id).ok_or_else(Self::not_found)?;
        if amount <= auction.current_bid {
            return Err(ApiError::Server {
                status: 400,
                message: Some("Bid must be higher than the current bid".to_string()),
            });
        }

        auction.current_bid = amount;
        auction.bids.push(Bid {
            amount,
            user: Some(UserRef::new(USER_EMAIL)),
            timestamp: Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap(),
        });
        Ok(auction.clone())
    }

    async fn list_comments(&self, id: &str) -> ApiResult<Vec<Comment>> {
        self.record("list_comments", Call::ListComments(id.to_string()))?;
        Ok(self
            .comments
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .unwrap_or_default())
    }

    async fn add_comment(&self, id: &str, text: &str) -> ApiResult<Comment> {
        self.record("add_comment", Call::AddComment(id.to_string(), text.to_string()))?;

        let created = Comment {
            id: Some(format!("c-{}", text.len())),
            ..comment(text)
        };
        self.comments
            .lock()
            .unwrap()
            .entry(id.to_string())
            .or_default()
            .push(created.clone());
        Ok(created)
    }

    async fn list_watchlist(&self) -> ApiResult<Vec<WatchlistEntry>> {
        self.record("list_watchlist", Call::ListWatchlist)?;
        Ok(self.watchlist.lock().unwrap().clone())
    }

    async fn watch(&self, id: &str) -> ApiResult<()> {
        self.record("watch", Call::Watch(id.to_string()))?;

        let seen: HashSet<String> = self
            .watchlist
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.id.clone())
            .collect();
        if seen.contains(id) {
            return Ok(());
        }
        if let Some(a) = self.auctions.lock().unwrap().get(id) {
            self.watchlist.lock().unwrap().push(WatchlistEntry {
                id: a.id.clone(),
                title: a.title.clone(),
                description: a.description.clone(),
                image: a.image.clone(),
                current_bid: a.current_bid,
            });
        }
        Ok(())
    }
}
