//! Auction REST API Client
//!
//! Thin JSON wrapper over reqwest. No retry, no caching and, unless
//! configured, no timeout: a slow or failed request leaves the calling view in
//! its prior state.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use super::{ApiError, ApiResult, AuctionApi};
use crate::config::ApiConfig;
use crate::models::{Auction, AuctionFilter, Comment, WatchlistEntry};

/// HTTP client bound to one auction API base URL
pub struct ApiClient {
    client: Client,
    base_url: String,
    asset_host: String,
    auth_token: Option<String>,
}

impl ApiClient {
    /// Create a client from configuration
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        reqwest::Url::parse(&config.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            asset_host: config.asset_host.clone(),
            auth_token: config.auth_token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a server-relative image path against the asset host
    pub fn asset_url(&self, image: &str) -> String {
        resolve_asset_url(&self.asset_host, image)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// `GET path?query`, decoding the JSON body
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        let request = self.client.get(self.url(path)).query(query);
        let response = self.send("GET", path, request).await?;
        decode(response).await
    }

    /// `POST path` with a JSON body, decoding the JSON response
    pub async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.client.post(self.url(path)).json(body);
        let response = self.send("POST", path, request).await?;
        decode(response).await
    }

    /// `POST path` without a body; the response body is ignored
    pub async fn post_empty(&self, path: &str) -> ApiResult<()> {
        let request = self.client.post(self.url(path));
        self.send("POST", path, request).await?;
        Ok(())
    }

    async fn send(&self, method: &str, path: &str, request: RequestBuilder) -> ApiResult<Response> {
        let request_id = Uuid::new_v4().to_string();

        let mut request = request.header("x-request-id", &request_id);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        tracing::debug!(request_id = %request_id, method, path, "Sending API request");

        let response = request.send().await.map_err(|e| {
            tracing::warn!(request_id = %request_id, method, path, error = %e, "API request failed");
            ApiError::Network(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = server_message(&text);

        tracing::warn!(
            request_id = %request_id,
            method,
            path,
            status = status.as_u16(),
            message = message.as_deref().unwrap_or(""),
            "API returned an error"
        );

        Err(ApiError::Server {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl AuctionApi for ApiClient {
    async fn list_auctions(&self, filter: &AuctionFilter) -> ApiResult<Vec<Auction>> {
        self.get("auctions", &filter.query_pairs()).await
    }

    async fn get_auction(&self, id: &str) -> ApiResult<Auction> {
        self.get(&format!("auctions/{}", urlencoding::encode(id)), &[]).await
    }

    async fn place_bid(&self, id: &str, amount: f64) -> ApiResult<Auction> {
        #[derive(Serialize)]
        struct PlaceBidRequest {
            amount: f64,
        }

        self.post(&format!("bids/{}", urlencoding::encode(id)), &PlaceBidRequest { amount })
            .await
    }

    async fn list_comments(&self, id: &str) -> ApiResult<Vec<Comment>> {
        self.get(&format!("comments/{}", urlencoding::encode(id)), &[]).await
    }

    async fn add_comment(&self, id: &str, text: &str) -> ApiResult<Comment> {
        #[derive(Serialize)]
        struct AddCommentRequest<'a> {
            text: &'a str,
        }

        self.post(&format!("comments/{}", urlencoding::encode(id)), &AddCommentRequest { text })
            .await
    }

    async fn list_watchlist(&self) -> ApiResult<Vec<WatchlistEntry>> {
        self.get("watchlist", &[]).await
    }

    async fn watch(&self, id: &str) -> ApiResult<()> {
        self.post_empty(&format!("watchlist/{}", urlencoding::encode(id)))
            .await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Extract `error` (or `message`) from an error body
fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["error", "message"]
        .iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map(str::to_string)
}

/// Resolve an image reference against the asset host.
///
/// Absolute `http(s)://` references pass through untouched.
pub fn resolve_asset_url(asset_host: &str, image: &str) -> String {
    if image.starts_with("http://") || image.starts_with("https://") {
        return image.to_string();
    }
    format!(
        "{}/{}",
        asset_host.trim_end_matches('/'),
        image.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_asset_url() {
        assert_eq!(
            resolve_asset_url("http://localhost:3000", "uploads/vase.jpg"),
            "http://localhost:3000/uploads/vase.jpg"
        );
        assert_eq!(
            resolve_asset_url("http://localhost:3000/", "/uploads/vase.jpg"),
            "http://localhost:3000/uploads/vase.jpg"
        );
        assert_eq!(
            resolve_asset_url("http://localhost:3000", "https://cdn.example.com/a.png"),
            "https://cdn.example.com/a.png"
        );
    }

    #[test]
    fn test_server_message() {
        assert_eq!(
            server_message(r#"{"error": "Bid too low"}"#).as_deref(),
            Some("Bid too low")
        );
        assert_eq!(
            server_message(r#"{"message": "Auction not found"}"#).as_deref(),
            Some("Auction not found")
        );
        assert_eq!(server_message(r#"{"error": {"code": 1}}"#), None);
        assert_eq!(server_message("<html>Bad Gateway</html>"), None);
    }

    #[test]
    fn test_new_rejects_invalid_base_url() {
        let config = ApiConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(ApiClient::new(&config), Err(ApiError::InvalidUrl(_))));
    }

    #[test]
    fn test_url_joining() {
        let config = ApiConfig {
            base_url: "http://localhost:3000/api/".to_string(),
            ..Default::default()
        };
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000/api");
        assert_eq!(client.url("/auctions/42"), "http://localhost:3000/api/auctions/42");
        assert_eq!(client.asset_url("img.png"), "http://localhost:3000/img.png");
    }
}
