//! HTTP API Client
//!
//! Functions for communicating with the auction REST API. Errors come back as
//! the server's `error` (or `message`) field, or an empty string when there
//! is none so callers can substitute their own wording.

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

use crate::state::models::{Auction, AuctionFilter, Comment, WatchlistEntry};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:3000/api";

/// Default host for server-relative image paths
pub const DEFAULT_ASSET_HOST: &str = "http://localhost:3000";

fn stored(key: &str) -> Option<String> {
    web_sys::window()?
        .local_storage()
        .ok()??
        .get_item(key)
        .ok()?
        .filter(|value| !value.is_empty())
}

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    stored("gavel_api_url")
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
        .trim_end_matches('/')
        .to_string()
}

pub fn get_asset_host() -> String {
    stored("gavel_asset_host").unwrap_or_else(|| DEFAULT_ASSET_HOST.to_string())
}

/// `{base}/{collection}/{id}` with the id percent-encoded
fn item_url(collection: &str, id: &str) -> String {
    format!("{}/{}/{}", get_api_base(), collection, urlencoding::encode(id))
}

/// Resolve an auction image against the asset host; absolute URLs pass through
pub fn asset_url(host: &str, image: &str) -> String {
    if image.starts_with("http://") || image.starts_with("https://") {
        return image.to_string();
    }
    format!("{}/{}", host.trim_end_matches('/'), image.trim_start_matches('/'))
}

#[derive(Debug, serde::Deserialize)]
struct ApiError {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    if !response.ok() {
        let message = response
            .json::<ApiError>()
            .await
            .ok()
            .and_then(|e| e.error.or(e.message))
            .unwrap_or_default();
        return Err(message);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

fn network(e: gloo_net::Error) -> String {
    web_sys::console::warn_1(&format!("Network error: {}", e).into());
    String::new()
}

/// Fetch auctions matching the filter
pub async fn fetch_auctions(filter: AuctionFilter) -> Result<Vec<Auction>, String> {
    let response = Request::get(&format!("{}/auctions", get_api_base()))
        .query(filter.query_pairs())
        .send()
        .await
        .map_err(network)?;

    decode(response).await
}

/// Fetch one auction with bids and winner
pub async fn fetch_auction(id: String) -> Result<Auction, String> {
    let response = Request::get(&item_url("auctions", &id))
        .send()
        .await
        .map_err(network)?;

    decode(response).await
}

/// Place a bid; returns the updated auction
pub async fn place_bid(id: String, amount: f64) -> Result<Auction, String> {
    #[derive(serde::Serialize)]
    struct PlaceBidRequest {
        amount: f64,
    }

    let response = Request::post(&item_url("bids", &id))
        .json(&PlaceBidRequest { amount })
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(network)?;

    decode(response).await
}

pub async fn fetch_comments(id: String) -> Result<Vec<Comment>, String> {
    let response = Request::get(&item_url("comments", &id))
        .send()
        .await
        .map_err(network)?;

    decode(response).await
}

/// Post a comment; returns the created comment
pub async fn add_comment(id: String, text: String) -> Result<Comment, String> {
    #[derive(serde::Serialize)]
    struct AddCommentRequest {
        text: String,
    }

    let response = Request::post(&item_url("comments", &id))
        .json(&AddCommentRequest { text })
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(network)?;

    decode(response).await
}

pub async fn fetch_watchlist() -> Result<Vec<WatchlistEntry>, String> {
    let response = Request::get(&format!("{}/watchlist", get_api_base()))
        .send()
        .await
        .map_err(network)?;

    decode(response).await
}

/// Watch an auction. The response body is not used.
pub async fn watch(id: String) -> Result<(), String> {
    let response = Request::post(&item_url("watchlist", &id))
        .send()
        .await
        .map_err(network)?;

    if response.ok() {
        Ok(())
    } else {
        Err(format!("Watch failed ({})", response.status()))
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn store(url: &str) {
        let storage = web_sys::window().unwrap().local_storage().unwrap().unwrap();
        storage.set_item("gavel_api_url", url).unwrap();
    }

    #[wasm_bindgen_test]
    fn test_api_base_from_local_storage() {
        store("http://auctions.test/api/");
        assert_eq!(get_api_base(), "http://auctions.test/api");
        assert_eq!(item_url("auctions", "a/b c"), "http://auctions.test/api/auctions/a%2Fb%20c");

        store("");
        assert_eq!(get_api_base(), DEFAULT_API_BASE);
    }
}
