//! Gavel Web
//!
//! Browser client for the auction marketplace built with Leptos (WASM).
//!
//! # Features
//!
//! - Auction list with debounced search, status and bid-range filters
//! - Auction detail page with bid history, comments, and a bid form
//! - Watchlist
//!
//! # Architecture
//!
//! Client-side rendered (CSR) Leptos application compiled to WebAssembly.
//! Every page holds its server data in live resources that fetch on mount,
//! refetch when their inputs change, and take mutation results straight from
//! the server's response.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
