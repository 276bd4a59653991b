//! Dashboard Page
//!
//! Auction list with a filter panel. Filter edits are debounced: once the
//! inputs settle for 300 ms, a single fetch goes out with every filter field.

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::components::{Alert, Loading};
use crate::state::models::money;
use crate::state::{Auction, AuctionFilter, Debounce, LiveResource};

const FILTER_DEBOUNCE_MS: u32 = 300;

#[component]
pub fn Dashboard() -> impl IntoView {
    let auctions = LiveResource::<Vec<Auction>>::new();
    let debounce = Debounce::new(FILTER_DEBOUNCE_MS);

    let search = create_rw_signal(String::new());
    let status = create_rw_signal(String::new());
    let min_bid = create_rw_signal(String::new());
    let max_bid = create_rw_signal(String::new());

    // Only notifies when a field actually changed.
    let filter = create_memo(move |_| AuctionFilter {
        search: search.get(),
        status: status.get(),
        min_bid: min_bid.get(),
        max_bid: max_bid.get(),
    });

    create_effect(move |mounted: Option<()>| {
        let filter = filter.get();
        if mounted.is_none() {
            auctions.load(list(filter));
        } else {
            debounce.call(move || auctions.load(list(filter)));
        }
    });

    view! {
        <div class="space-y-8">
            <h1 class="text-3xl font-bold">"Active Auctions"</h1>

            <FilterPanel search=search status=status min_bid=min_bid max_bid=max_bid />

            <Alert message=auctions.error />

            {move || {
                let list = auctions.data.get().unwrap_or_default();
                if list.is_empty() {
                    if auctions.loading.get() {
                        view! { <Loading label="Loading auctions..." /> }.into_view()
                    } else {
                        view! { <p class="text-gray-500">"No auctions available"</p> }.into_view()
                    }
                } else {
                    view! {
                        <div class="grid md:grid-cols-3 gap-6">
                            {list.into_iter().map(|auction| view! { <AuctionCard auction=auction /> }).collect_view()}
                        </div>
                    }.into_view()
                }
            }}
        </div>
    }
}

async fn list(filter: AuctionFilter) -> Result<Vec<Auction>, String> {
    api::fetch_auctions(filter).await.map_err(|e| {
        web_sys::console::warn_1(&format!("Error fetching auctions: {}", e).into());
        "Failed to load auctions".to_string()
    })
}

#[component]
fn FilterPanel(
    search: RwSignal<String>,
    status: RwSignal<String>,
    min_bid: RwSignal<String>,
    max_bid: RwSignal<String>,
) -> impl IntoView {
    let input_class = "bg-white rounded-lg px-4 py-2 border border-gray-300";

    view! {
        <div class="flex flex-wrap gap-4">
            <input
                type="text"
                placeholder="Search auctions"
                class=input_class
                prop:value=move || search.get()
                on:input=move |ev| search.set(event_target_value(&ev))
            />
            <select
                class=input_class
                on:change=move |ev| status.set(event_target_value(&ev))
            >
                <option value="">"All Statuses"</option>
                <option value="active">"Active"</option>
                <option value="ended">"Ended"</option>
            </select>
            <input
                type="number"
                placeholder="Min Bid"
                class=input_class
                prop:value=move || min_bid.get()
                on:input=move |ev| min_bid.set(event_target_value(&ev))
            />
            <input
                type="number"
                placeholder="Max Bid"
                class=input_class
                prop:value=move || max_bid.get()
                on:input=move |ev| max_bid.set(event_target_value(&ev))
            />
        </div>
    }
}

#[component]
fn AuctionCard(auction: Auction) -> impl IntoView {
    let image = auction
        .image
        .as_deref()
        .map(|image| api::asset_url(&api::get_asset_host(), image));
    let ends = auction
        .end_time
        .map(|end| end.with_timezone(&chrono::Local).format("%-m/%-d/%Y, %-I:%M:%S %p").to_string());
    let href = format!("/auction/{}", auction.id);
    let id = auction.id.clone();

    // Fire-and-forget: nothing on the page changes.
    let add_to_watchlist = move |_| {
        let id = id.clone();
        spawn_local(async move {
            if let Err(e) = api::watch(id).await {
                web_sys::console::warn_1(&format!("Error adding to watchlist: {}", e).into());
            }
        });
    };

    view! {
        <div class="bg-white rounded-xl shadow p-4 space-y-2">
            {image.map(|src| view! { <img src=src class="w-full h-48 object-cover rounded-lg" /> })}
            <h2 class="text-xl font-semibold">{auction.title}</h2>
            <p>{format!("Current Bid: {}", money(auction.current_bid))}</p>
            {ends.map(|ends| view! { <p class="text-sm text-gray-500">{format!("Ends: {}", ends)}</p> })}
            <div class="flex space-x-2 pt-2">
                <A href=href class="px-4 py-2 bg-blue-600 text-white rounded-lg">"View Details"</A>
                <button on:click=add_to_watchlist class="px-4 py-2 bg-gray-200 rounded-lg">
                    "Add to Watchlist"
                </button>
            </div>
        </div>
    }
}
