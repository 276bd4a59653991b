//! Navigation Component
//!
//! Header navigation bar with brand and links.

use leptos::*;
use leptos_router::*;

#[component]
pub fn Nav() -> impl IntoView {
    view! {
        <nav class="bg-white border-b border-gray-200 shadow-sm">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    <A href="/" class="text-xl font-bold text-gray-900">
                        "Auction App"
                    </A>

                    <div class="flex items-center space-x-1">
                        <NavLink href="/auctions" label="Auctions" />
                        <NavLink href="/watchlist" label="Watchlist" />
                    </div>
                </div>
            </div>
        </nav>
    }
}

#[component]
fn NavLink(
    href: &'static str,
    label: &'static str,
) -> impl IntoView {
    view! {
        <A
            href=href
            class="px-4 py-2 rounded-lg text-gray-600 hover:text-gray-900 hover:bg-gray-100"
            active_class="bg-gray-100 text-gray-900"
        >
            {label}
        </A>
    }
}
