//! Auction Details Page
//!
//! Auction with bid history, comments, and the bid form. Both resources
//! refetch when the route id changes. A successful bid replaces the auction
//! with the server's copy; a successful comment is appended.

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::components::{Alert, Loading, WinnerBanner};
use crate::state::models::{money, relative_time, short_timestamp, validate_bid, validate_comment};
use crate::state::{same_route, Auction, Comment, LiveResource};

#[component]
pub fn AuctionDetails() -> impl IntoView {
    let params = use_params_map();
    let id = create_memo(move |_| params.with(|p| p.get("id").cloned().unwrap_or_default()));

    let auction = LiveResource::<Auction>::new();
    let comments = LiveResource::<Vec<Comment>>::new();

    create_effect(move |_| {
        let id = id.get();
        auction.reset();
        comments.reset();
        auction.load(load_auction(id.clone()));
        comments.load(load_comments(id));
    });

    let open = move || auction.data.with(|a| a.as_ref().is_some_and(Auction::is_active));

    view! {
        <div class="space-y-8">
            {move || {
                match auction.data.get() {
                    None => {
                        if auction.error.get().is_some() {
                            view! { <Alert message=auction.error /> }.into_view()
                        } else {
                            view! { <Loading label="Loading auction..." /> }.into_view()
                        }
                    }
                    Some(current) => view! {
                        {move || auction.stale.get().then(|| view! {
                            <Alert message=auction.error />
                        })}
                        <AuctionSummary auction=current.clone() />
                        <BidHistory auction=current />
                    }.into_view(),
                }
            }}
            <Comments id=id comments=comments />
            <Show when=open>
                <BidForm id=id auction=auction />
            </Show>
        </div>
    }
}

async fn load_auction(id: String) -> Result<Auction, String> {
    api::fetch_auction(id).await.map_err(|e| {
        web_sys::console::warn_1(&format!("Error fetching auction: {}", e).into());
        if e.is_empty() { "Failed to load auction".to_string() } else { e }
    })
}

async fn load_comments(id: String) -> Result<Vec<Comment>, String> {
    api::fetch_comments(id).await.map_err(|e| {
        web_sys::console::warn_1(&format!("Error fetching comments: {}", e).into());
        "Failed to load comments".to_string()
    })
}

#[component]
fn AuctionSummary(auction: Auction) -> impl IntoView {
    let image = auction
        .image
        .as_deref()
        .map(|image| api::asset_url(&api::get_asset_host(), image));
    let badge = if auction.is_active() {
        match auction.end_time {
            Some(end) => format!("Ends {}", relative_time(end, chrono::Utc::now())),
            None => "Ends soon".to_string(),
        }
    } else {
        "Auction Ended".to_string()
    };
    let winner = auction
        .display_winner()
        .map(|w| (w.email.clone(), auction.current_bid));

    view! {
        <section class="bg-white rounded-xl shadow p-6 space-y-4">
            {image.map(|src| view! { <img src=src class="w-full max-h-96 object-cover rounded-lg" /> })}
            <h1 class="text-3xl font-bold">{auction.title.clone()}</h1>
            <div class="flex space-x-2">
                <span class="px-3 py-1 bg-blue-100 text-blue-800 rounded-full">
                    {format!("Current Bid: {}", money(auction.current_bid))}
                </span>
                <span class="px-3 py-1 bg-gray-100 text-gray-800 rounded-full">{badge}</span>
            </div>
            {auction.description.clone().map(|d| view! { <p class="text-gray-600">{d}</p> })}
            {winner.map(|(email, amount)| view! { <WinnerBanner email=email amount=amount /> })}
        </section>
    }
}

#[component]
fn BidHistory(auction: Auction) -> impl IntoView {
    view! {
        <section class="bg-white rounded-xl shadow p-6">
            <h2 class="text-xl font-semibold mb-4">"Bidding History"</h2>
            {if auction.bids.is_empty() {
                view! { <p class="text-gray-500">"No bids placed yet"</p> }.into_view()
            } else {
                auction.bids.into_iter().map(|bid| {
                    let who = bid.user.map(|u| u.email).unwrap_or_default();
                    let when = short_timestamp(&bid.timestamp.with_timezone(&chrono::Local));
                    view! {
                        <div class="flex justify-between py-2 border-b border-gray-100">
                            <span>{format!("{} bid {}", who, money(bid.amount))}</span>
                            <span class="text-sm text-gray-500">{when}</span>
                        </div>
                    }
                }).collect_view()
            }}
        </section>
    }
}

#[component]
fn Comments(id: Memo<String>, comments: LiveResource<Vec<Comment>>) -> impl IntoView {
    let text = create_rw_signal(String::new());
    let error = create_rw_signal(None::<String>);

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let body = text.get_untracked();
        if let Err(message) = validate_comment(&body) {
            error.set(Some(message.to_string()));
            return;
        }

        let issued = id.get_untracked();
        spawn_local(async move {
            match api::add_comment(issued.clone(), body).await {
                // Posted for an auction the page has since left.
                _ if !same_route(id, &issued) => {}
                Ok(created) => {
                    comments.modify(|list| list.get_or_insert_with(Vec::new).push(created));
                    text.set(String::new());
                    error.set(None);
                }
                Err(e) => {
                    web_sys::console::warn_1(&format!("Error adding comment: {}", e).into());
                    error.set(Some(if e.is_empty() { "Failed to add comment".to_string() } else { e }));
                }
            }
        });
    };

    view! {
        <section class="bg-white rounded-xl shadow p-6 space-y-4">
            <h2 class="text-xl font-semibold">"Comments"</h2>
            <Alert message=comments.error />
            // No placeholder for an empty list.
            <div class="space-y-2">
                {move || comments.data.get().unwrap_or_default().into_iter().map(|c| {
                    let who = c.user.map(|u| u.email).unwrap_or_default();
                    let when = short_timestamp(&c.timestamp.with_timezone(&chrono::Local));
                    view! {
                        <div class="py-2 border-b border-gray-100">
                            <div class="flex justify-between">
                                <span class="font-medium">{who}</span>
                                <span class="text-sm text-gray-500">{when}</span>
                            </div>
                            <p>{c.text}</p>
                        </div>
                    }
                }).collect_view()}
            </div>
            <form on:submit=submit class="space-y-2">
                <textarea
                    class="w-full bg-white rounded-lg px-4 py-2 border border-gray-300"
                    placeholder="Add a comment"
                    prop:value=move || text.get()
                    on:input=move |ev| text.set(event_target_value(&ev))
                />
                <Alert message=error />
                <button type="submit" class="px-4 py-2 bg-blue-600 text-white rounded-lg">
                    "Add Comment"
                </button>
            </form>
        </section>
    }
}

#[component]
fn BidForm(id: Memo<String>, auction: LiveResource<Auction>) -> impl IntoView {
    let amount = create_rw_signal(String::new());
    let error = create_rw_signal(None::<String>);
    let submitting = create_rw_signal(false);

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let current = auction
            .data
            .with_untracked(|a| a.as_ref().map(|a| a.current_bid))
            .unwrap_or_default();
        let value = match validate_bid(&amount.get_untracked(), current) {
            Ok(value) => value,
            Err(message) => {
                error.set(Some(message.to_string()));
                return;
            }
        };

        let issued = id.get_untracked();
        submitting.set(true);
        spawn_local(async move {
            match api::place_bid(issued.clone(), value).await {
                _ if !same_route(id, &issued) => {}
                Ok(updated) => {
                    auction.replace(updated);
                    amount.set(String::new());
                    error.set(None);
                }
                Err(e) => {
                    web_sys::console::warn_1(&format!("Error placing bid: {}", e).into());
                    error.set(Some(if e.is_empty() { "Failed to place bid".to_string() } else { e }));
                }
            }
            submitting.set(false);
        });
    };

    view! {
        <section class="bg-white rounded-xl shadow p-6">
            <h2 class="text-xl font-semibold mb-4">"Place a Bid"</h2>
            <Alert message=error />
            <form on:submit=submit class="flex space-x-2">
                <input
                    type="number"
                    class="flex-1 bg-white rounded-lg px-4 py-2 border border-gray-300"
                    placeholder=move || {
                        auction
                            .data
                            .with(|a| a.as_ref().map(|a| format!("Minimum {}", money(a.current_bid + 1.0))))
                            .unwrap_or_default()
                    }
                    prop:value=move || amount.get()
                    on:input=move |ev| amount.set(event_target_value(&ev))
                />
                <button
                    type="submit"
                    disabled=move || submitting.get()
                    class="px-4 py-2 bg-blue-600 disabled:bg-gray-400 text-white rounded-lg"
                >
                    {move || if submitting.get() { "Placing..." } else { "Place Bid" }}
                </button>
            </form>
        </section>
    }
}
