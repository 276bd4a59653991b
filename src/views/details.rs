//! Auction detail page: the auction, its bid history, its comments, and the
//! bid and comment forms.
//!
//! Updates are reactive. A successful bid replaces the held auction with the
//! server's copy; a successful comment appends the server's record. Failed
//! submissions leave state and user input untouched.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use super::format::{alert, heading, local, money, relative_time, short_timestamp};
use super::validation::{validate_bid_for, validate_comment};
use super::ViewError;
use crate::live::{LiveResource, LoadOutcome, Snapshot, ViewContext};
use crate::models::{Auction, AuctionId, Comment};

pub struct AuctionDetailsView {
    ctx: ViewContext,
    id: AuctionId,
    auction: LiveResource<Auction>,
    comments: LiveResource<Vec<Comment>>,
    bid_input: String,
    comment_input: String,
    bid_error: Option<String>,
    comment_error: Option<String>,
}

impl AuctionDetailsView {
    /// Create the view for one auction, seeded from the shared cache if possible.
    /// Call [`load`](Self::load) to fetch.
    pub async fn new(ctx: ViewContext, id: impl Into<AuctionId>) -> Self {
        let id = id.into();
        let auction = Self::auction_resource(&ctx, &id).await;
        let comments = LiveResource::new(ctx.views.on_fetch_error);

        Self {
            ctx,
            id,
            auction,
            comments,
            bid_input: String::new(),
            comment_input: String::new(),
            bid_error: None,
            comment_error: None,
        }
    }

    async fn auction_resource(ctx: &ViewContext, id: &str) -> LiveResource<Auction> {
        let policy = ctx.views.on_fetch_error;
        let cached = match &ctx.cache {
            Some(cache) => cache.get(id).await,
            None => None,
        };
        match cached {
            Some(auction) => {
                tracing::debug!(auction_id = %id, "Seeding auction from cache");
                LiveResource::seeded(auction, policy)
            }
            None => LiveResource::new(policy),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Fetch the auction and its comments concurrently
    pub async fn load(&self) -> (LoadOutcome, LoadOutcome) {
        let api = Arc::clone(&self.ctx.api);
        let cache = self.ctx.cache.clone();
        let id = self.id.clone();
        let auction_fetch = async move {
            let auction = api.get_auction(&id).await.map_err(|e| {
                tracing::warn!(auction_id = %id, error = %e, "Error fetching auction");
                e.user_message("Failed to load auction")
            })?;
            if let Some(cache) = cache {
                cache.put(auction.clone()).await;
            }
            Ok::<_, String>(auction)
        };

        let api = Arc::clone(&self.ctx.api);
        let id = self.id.clone();
        let comments_fetch = async move {
            api.list_comments(&id).await.map_err(|e| {
                tracing::warn!(auction_id = %id, error = %e, "Error fetching comments");
                e.user_message("Failed to load comments")
            })
        };

        tokio::join!(
            self.auction.load_and_wait(auction_fetch),
            self.comments.load_and_wait(comments_fetch)
        )
    }

    /// Switch to another auction (route change). In-flight fetches for the
    /// previous auction are aborted and the form state is reset.
    pub async fn navigate(&mut self, id: impl Into<AuctionId>) -> (LoadOutcome, LoadOutcome) {
        let id = id.into();
        if id != self.id {
            self.auction = Self::auction_resource(&self.ctx, &id).await;
            self.comments = LiveResource::new(self.ctx.views.on_fetch_error);
            self.id = id;
            self.bid_input.clear();
            self.comment_input.clear();
            self.bid_error = None;
            self.comment_error = None;
        }
        self.load().await
    }

    pub fn set_bid_input(&mut self, input: impl Into<String>) {
        self.bid_input = input.into();
    }

    pub fn set_comment_input(&mut self, input: impl Into<String>) {
        self.comment_input = input.into();
    }

    pub fn bid_input(&self) -> &str {
        &self.bid_input
    }

    pub fn comment_input(&self) -> &str {
        &self.comment_input
    }

    pub fn bid_error(&self) -> Option<&str> {
        self.bid_error.as_deref()
    }

    pub fn comment_error(&self) -> Option<&str> {
        self.comment_error.as_deref()
    }

    /// Submit the bid input. Invalid input is rejected without a request.
    pub async fn place_bid(&mut self) -> Result<Auction, ViewError> {
        let current = self
            .auction
            .read(|s| s.data.as_ref().map(|a| (a.current_bid, a.status)))
            .await;

        let amount = match validate_bid_for(current, &self.bid_input) {
            Ok(amount) => amount,
            Err(e) => {
                self.bid_error = Some(e.to_string());
                return Err(e.into());
            }
        };

        match self.ctx.api.place_bid(&self.id, amount).await {
            Ok(updated) => {
                tracing::debug!(auction_id = %self.id, amount, "Bid accepted");
                self.auction.replace(updated.clone()).await;
                if let Some(cache) = &self.ctx.cache {
                    cache.put(updated.clone()).await;
                }
                self.bid_input.clear();
                self.bid_error = None;
                Ok(updated)
            }
            Err(e) => {
                tracing::warn!(auction_id = %self.id, amount, error = %e, "Bid rejected");
                let message = e.user_message("Failed to place bid");
                self.bid_error = Some(message.clone());
                Err(ViewError::Rejected(message))
            }
        }
    }

    /// Submit the comment input; the created comment is appended on success
    pub async fn add_comment(&mut self) -> Result<Comment, ViewError> {
        if let Err(e) = validate_comment(&self.comment_input) {
            self.comment_error = Some(e.to_string());
            return Err(e.into());
        }

        match self.ctx.api.add_comment(&self.id, &self.comment_input).await {
            Ok(created) => {
                let appended = created.clone();
                self.comments
                    .modify(move |list| list.get_or_insert_with(Vec::new).push(appended))
                    .await;
                self.comment_input.clear();
                self.comment_error = None;
                Ok(created)
            }
            Err(e) => {
                tracing::warn!(auction_id = %self.id, error = %e, "Error adding comment");
                let message = e.user_message("Failed to add comment");
                self.comment_error = Some(message.clone());
                Err(ViewError::Rejected(message))
            }
        }
    }

    pub async fn auction(&self) -> Snapshot<Auction> {
        self.auction.snapshot().await
    }

    pub async fn comments(&self) -> Snapshot<Vec<Comment>> {
        self.comments.snapshot().await
    }

    pub async fn screen(&self) -> DetailsScreen {
        self.screen_at(Utc::now()).await
    }

    pub async fn screen_at(&self, now: DateTime<Utc>) -> DetailsScreen {
        let auction = self.auction.snapshot().await;
        let image_url = auction
            .data
            .as_ref()
            .and_then(|a| a.image.as_deref())
            .map(|image| self.ctx.asset_url(image));

        DetailsScreen {
            auction,
            image_url,
            comments: self.comments.snapshot().await,
            bid_input: self.bid_input.clone(),
            comment_input: self.comment_input.clone(),
            bid_error: self.bid_error.clone(),
            comment_error: self.comment_error.clone(),
            rendered_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DetailsScreen {
    pub auction: Snapshot<Auction>,
    pub image_url: Option<String>,
    pub comments: Snapshot<Vec<Comment>>,
    pub bid_input: String,
    pub comment_input: String,
    pub bid_error: Option<String>,
    pub comment_error: Option<String>,
    pub rendered_at: DateTime<Utc>,
}

impl DetailsScreen {
    /// The bid form only exists while the auction is active
    pub fn bid_form_visible(&self) -> bool {
        self.auction.data.as_ref().is_some_and(Auction::is_active)
    }

    /// Winner email and final amount, for an ended auction with a winner
    pub fn winner(&self) -> Option<(&str, f64)> {
        let auction = self.auction.data.as_ref()?;
        auction
            .display_winner()
            .map(|w| (w.email.as_str(), auction.current_bid))
    }

    fn status_badge(&self, auction: &Auction) -> String {
        if !auction.is_active() {
            return "Auction Ended".to_string();
        }
        match auction.end_time {
            Some(end) => format!("Ends {}", relative_time(end, self.rendered_at)),
            None => "Ends soon".to_string(),
        }
    }
}

impl fmt::Display for DetailsScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let auction = match &self.auction.data {
            Some(auction) => auction,
            None => {
                if let Some(error) = &self.auction.error {
                    return alert(f, error);
                }
                return writeln!(f, "Loading auction...");
            }
        };

        if let Some(error) = &self.auction.error {
            alert(f, &format!("{} (showing last loaded data)", error))?;
        }

        if let Some(url) = &self.image_url {
            writeln!(f, "Image: {}", url)?;
        }
        heading(f, &auction.title, '=')?;
        writeln!(
            f,
            "[Current Bid: {}]  [{}]",
            money(auction.current_bid),
            self.status_badge(auction)
        )?;
        if let Some(description) = &auction.description {
            writeln!(f)?;
            writeln!(f, "{}", description)?;
        }

        if let Some((email, amount)) = self.winner() {
            writeln!(f)?;
            writeln!(f, "Winner: {}", email)?;
            writeln!(f, "Winning Bid: {}", money(amount))?;
        }

        writeln!(f)?;
        heading(f, "Bidding History", '-')?;
        if auction.bids.is_empty() {
            writeln!(f, "No bids placed yet")?;
        }
        for bid in &auction.bids {
            writeln!(
                f,
                "{} bid {}  ({})",
                bid.bidder_email(),
                money(bid.amount),
                short_timestamp(&local(&bid.timestamp))
            )?;
        }

        writeln!(f)?;
        heading(f, "Comments", '-')?;
        if let Some(error) = &self.comments.error {
            alert(f, error)?;
        }
        for comment in self.comments.data.as_deref().unwrap_or_default() {
            writeln!(
                f,
                "{}: {}  ({})",
                comment.author_email(),
                comment.text,
                short_timestamp(&local(&comment.timestamp))
            )?;
        }
        writeln!(f)?;
        writeln!(f, "Add a comment: {}", self.comment_input)?;
        if let Some(error) = &self.comment_error {
            alert(f, error)?;
        }
        writeln!(f, "[Add Comment]")?;

        if self.bid_form_visible() {
            writeln!(f)?;
            heading(f, "Place a Bid", '-')?;
            if let Some(error) = &self.bid_error {
                alert(f, error)?;
            }
            writeln!(
                f,
                "Bid amount (min {}): {}",
                money(auction.minimum_next_bid()),
                self.bid_input
            )?;
            writeln!(f, "[Place Bid]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{auction, comment, Call, MockApi, USER_EMAIL};
    use crate::config::{Config, FetchErrorPolicy};
    use crate::models::{AuctionStatus, UserRef};
    use crate::views::ValidationError;

    fn context(api: Arc<MockApi>) -> ViewContext {
        ViewContext::new(api, &Config::default())
    }

    async fn mounted(api: Arc<MockApi>) -> AuctionDetailsView {
        let view = AuctionDetailsView::new(context(api), "42").await;
        view.load().await;
        view
    }

    fn vase() -> Auction {
        Auction {
            end_time: None,
            description: None,
            ..auction("42", "Vase", 100.0)
        }
    }

    fn bid_calls(api: &MockApi) -> usize {
        api.count(|c| matches!(c, Call::PlaceBid(..)))
    }

    #[tokio::test]
    async fn test_active_auction_without_bids() {
        let api = Arc::new(MockApi::new().with_auction(vase()));
        let view = mounted(api).await;

        let screen = view.screen().await;
        assert!(screen.bid_form_visible());
        assert!(screen.winner().is_none());

        let text = screen.to_string();
        assert!(text.contains("Current Bid: $100"));
        assert!(text.contains("[Ends "));
        assert!(text.contains("No bids placed yet"));
        assert!(text.contains("[Place Bid]"));
        assert!(!text.contains("Winner:"));
    }

    #[tokio::test]
    async fn test_relative_end_badge() {
        let mut a = vase();
        let now = Utc::now();
        a.end_time = Some(now + chrono::Duration::days(2));
        let api = Arc::new(MockApi::new().with_auction(a));
        let view = mounted(api).await;

        let text = view.screen_at(now).await.to_string();
        assert!(text.contains("[Ends in 2 days]"));
    }

    #[tokio::test]
    async fn test_low_bid_rejected_without_request() {
        let api = Arc::new(MockApi::new().with_auction(vase()));
        let mut view = mounted(Arc::clone(&api)).await;

        for input in ["50", "100", "", "abc"] {
            view.set_bid_input(input);
            let err = view.place_bid().await.unwrap_err();
            assert!(matches!(err, ViewError::Invalid(_)));
            assert_eq!(view.bid_input(), input);
        }
        assert_eq!(bid_calls(&api), 0);

        view.set_bid_input("50");
        let err = view.place_bid().await.unwrap_err();
        assert_eq!(err.to_string(), "Bid must be higher than current bid");
        assert_eq!(view.bid_error(), Some("Bid must be higher than current bid"));
        assert!(view
            .screen()
            .await
            .to_string()
            .contains("[!] Bid must be higher than current bid"));
    }

    #[tokio::test]
    async fn test_bid_before_load_is_rejected() {
        let api = Arc::new(MockApi::new().with_auction(vase()));
        let mut view = AuctionDetailsView::new(context(Arc::clone(&api)), "42").await;

        view.set_bid_input("500");
        let err = view.place_bid().await.unwrap_err();
        assert_eq!(err, ViewError::Invalid(ValidationError::AuctionNotLoaded));
        assert_eq!(bid_calls(&api), 0);
    }

    #[tokio::test]
    async fn test_successful_bid_replaces_auction_with_server_copy() {
        let api = Arc::new(MockApi::new().with_auction(vase()));
        let mut view = mounted(Arc::clone(&api)).await;

        view.set_bid_input("150");
        let updated = view.place_bid().await.unwrap();

        assert_eq!(updated.current_bid, 150.0);
        assert_eq!(view.auction().await.data, Some(updated));
        assert_eq!(view.bid_input(), "");
        assert!(view.bid_error().is_none());

        let text = view.screen().await.to_string();
        assert!(text.contains("Current Bid: $150"));
        assert!(text.contains(&format!("{} bid $150", USER_EMAIL)));
        assert!(!text.contains("No bids placed yet"));
    }

    #[tokio::test]
    async fn test_server_rejection_keeps_state_and_input() {
        let api = Arc::new(MockApi::new().with_auction(vase()));
        let mut view = mounted(Arc::clone(&api)).await;

        // Another bidder got there first.
        let mut raced = vase();
        raced.current_bid = 200.0;
        api.set_auction(raced);

        view.set_bid_input("150");
        let err = view.place_bid().await.unwrap_err();

        assert_eq!(
            err,
            ViewError::Rejected("Bid must be higher than the current bid".to_string())
        );
        assert_eq!(view.bid_input(), "150");
        assert_eq!(view.auction().await.data.unwrap().current_bid, 100.0);
    }

    #[tokio::test]
    async fn test_bid_failure_without_message_uses_fallback() {
        let api = Arc::new(MockApi::new().with_auction(vase()));
        let mut view = mounted(Arc::clone(&api)).await;
        api.fail("place_bid", None);

        view.set_bid_input("150");
        let err = view.place_bid().await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to place bid");
    }

    #[tokio::test]
    async fn test_ended_auction_shows_winner_and_hides_bid_form() {
        let mut ended = vase();
        ended.status = AuctionStatus::Ended;
        ended.current_bid = 250.0;
        ended.winner = Some(UserRef::new("winner@example.com"));
        let api = Arc::new(MockApi::new().with_auction(ended));
        let mut view = mounted(Arc::clone(&api)).await;

        let screen = view.screen().await;
        assert!(!screen.bid_form_visible());
        assert_eq!(screen.winner(), Some(("winner@example.com", 250.0)));

        let text = screen.to_string();
        assert!(text.contains("[Auction Ended]"));
        assert!(text.contains("Winner: winner@example.com"));
        assert!(text.contains("Winning Bid: $250"));
        assert!(!text.contains("Place a Bid"));

        view.set_bid_input("300");
        assert_eq!(
            view.place_bid().await.unwrap_err(),
            ViewError::Invalid(ValidationError::AuctionEnded)
        );
        assert_eq!(bid_calls(&api), 0);
    }

    #[tokio::test]
    async fn test_comment_appended_exactly_once() {
        let api = Arc::new(
            MockApi::new()
                .with_auction(vase())
                .with_comments("42", vec![comment("First!")]),
        );
        let mut view = mounted(Arc::clone(&api)).await;

        view.set_comment_input("Lovely glaze");
        let created = view.add_comment().await.unwrap();

        let comments = view.comments().await.data.unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[1], created);
        assert_eq!(comments.iter().filter(|c| **c == created).count(), 1);
        assert_eq!(view.comment_input(), "");
        assert_eq!(
            api.count(|c| matches!(c, Call::AddComment(id, text) if id == "42" && text == "Lovely glaze")),
            1
        );
    }

    #[tokio::test]
    async fn test_empty_comment_rejected_locally() {
        let api = Arc::new(MockApi::new().with_auction(vase()));
        let mut view = mounted(Arc::clone(&api)).await;

        view.set_comment_input("   ");
        let err = view.add_comment().await.unwrap_err();

        assert_eq!(err, ViewError::Invalid(ValidationError::EmptyComment));
        assert_eq!(view.comment_error(), Some("Comment cannot be empty"));
        assert_eq!(api.count(|c| matches!(c, Call::AddComment(..))), 0);
    }

    #[tokio::test]
    async fn test_failed_comment_preserves_input() {
        let api = Arc::new(MockApi::new().with_auction(vase()));
        let mut view = mounted(Arc::clone(&api)).await;
        api.fail("add_comment", Some("Comments are closed"));

        view.set_comment_input("Hello");
        let err = view.add_comment().await.unwrap_err();

        assert_eq!(err.to_string(), "Comments are closed");
        assert_eq!(view.comment_input(), "Hello");
        assert_eq!(view.comments().await.data, Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_auction_and_reports_error() {
        let api = Arc::new(MockApi::new().with_auction(vase()));
        let view = mounted(Arc::clone(&api)).await;
        let before = view.auction().await.data;

        api.fail("get_auction", Some("Service unavailable"));
        let (outcome, _) = view.load().await;

        assert_eq!(outcome, LoadOutcome::Failed("Service unavailable".to_string()));
        let snap = view.auction().await;
        assert_eq!(snap.data, before);
        assert!(snap.stale);
        assert!(!snap.error.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clear_policy_drops_auction_on_failure() {
        let api = Arc::new(MockApi::new().with_auction(vase()));
        let mut config = Config::default();
        config.views.on_fetch_error = FetchErrorPolicy::Clear;
        let view = AuctionDetailsView::new(ViewContext::new(api.clone(), &config), "42").await;
        view.load().await;

        api.fail("get_auction", None);
        view.load().await;

        let snap = view.auction().await;
        assert!(snap.data.is_none());
        assert_eq!(snap.error.as_deref(), Some("Failed to load auction"));
        assert!(view.screen().await.to_string().contains("[!] Failed to load auction"));
    }

    #[tokio::test]
    async fn test_empty_comment_list_renders_no_placeholder() {
        let api = Arc::new(MockApi::new().with_auction(vase()));
        let view = mounted(api).await;

        let text = view.screen().await.to_string();
        assert!(text.contains("Comments\n--------\n\nAdd a comment:"));
        assert!(!text.contains("No comments yet"));
    }

    #[tokio::test]
    async fn test_cache_seeds_next_mount_and_tracks_bids() {
        let api = Arc::new(MockApi::new().with_auction(vase()));
        let ctx = context(Arc::clone(&api));

        let mut first = AuctionDetailsView::new(ctx.clone(), "42").await;
        first.load().await;
        first.set_bid_input("120");
        first.place_bid().await.unwrap();
        drop(first);

        api.fail("get_auction", None);
        let second = AuctionDetailsView::new(ctx.clone(), "42").await;
        assert_eq!(second.auction().await.data.unwrap().current_bid, 120.0);

        second.load().await;
        let snap = second.auction().await;
        assert_eq!(snap.data.unwrap().current_bid, 120.0);
        assert!(snap.stale);
    }

    #[tokio::test]
    async fn test_navigate_switches_auction_and_resets_forms() {
        let api = Arc::new(
            MockApi::new()
                .with_auction(vase())
                .with_auction(auction("7", "Lamp", 20.0)),
        );
        let mut view = mounted(Arc::clone(&api)).await;
        view.set_bid_input("10");
        view.place_bid().await.unwrap_err();

        view.navigate("7").await;

        assert_eq!(view.id(), "7");
        assert_eq!(view.bid_input(), "");
        assert!(view.bid_error().is_none());
        assert_eq!(view.auction().await.data.unwrap().title, "Lamp");
        assert_eq!(api.count(|c| matches!(c, Call::GetAuction(id) if id == "7")), 1);
    }
}
