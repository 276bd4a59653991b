//! Watchlist Page

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::components::{Alert, Loading};
use crate::state::models::money;
use crate::state::{LiveResource, WatchlistEntry};

#[component]
pub fn Watchlist() -> impl IntoView {
    let entries = LiveResource::<Vec<WatchlistEntry>>::new();

    entries.load(async {
        api::fetch_watchlist().await.map_err(|e| {
            web_sys::console::warn_1(&format!("Error fetching watchlist: {}", e).into());
            "Failed to load watchlist. Please try again.".to_string()
        })
    });

    view! {
        <div class="space-y-8">
            <h1 class="text-3xl font-bold">"My Watchlist"</h1>

            <Alert message=entries.error />

            {move || {
                let list = entries.data.get().unwrap_or_default();
                if !list.is_empty() {
                    list.into_iter().map(|entry| view! { <WatchlistCard entry=entry /> }).collect_view()
                } else if entries.loading.get() {
                    view! { <Loading label="Loading watchlist..." /> }.into_view()
                } else if entries.error.get().is_none() {
                    view! { <p class="text-gray-500">"Your watchlist is empty."</p> }.into_view()
                } else {
                    ().into_view()
                }
            }}
        </div>
    }
}

#[component]
fn WatchlistCard(entry: WatchlistEntry) -> impl IntoView {
    let image = entry
        .image
        .as_deref()
        .map(|image| api::asset_url(&api::get_asset_host(), image));
    let href = format!("/auction/{}", entry.id);

    view! {
        <div class="bg-white rounded-xl shadow p-4 flex space-x-4">
            {image.map(|src| view! { <img src=src class="w-32 h-32 object-cover rounded-lg" /> })}
            <div class="space-y-1">
                <h2 class="text-xl font-semibold">{entry.title}</h2>
                {entry.description.map(|d| view! { <p class="text-gray-600">{d}</p> })}
                <p>{format!("Current Bid: {}", money(entry.current_bid))}</p>
                <A href=href class="text-blue-600">"View Auction"</A>
            </div>
        </div>
    }
}
