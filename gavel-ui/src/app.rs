//! App Root Component
//!
//! Routing shell shared by every page.

use leptos::*;
use leptos_router::*;

use crate::components::Nav;
use crate::pages::{AuctionDetails, Dashboard, Landing, Watchlist};

#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <div class="min-h-screen bg-gray-100 text-gray-900 flex flex-col">
                <Nav />

                <main class="flex-1 container mx-auto px-4 py-8">
                    <Routes>
                        <Route path="/" view=Landing />
                        <Route path="/auctions" view=Dashboard />
                        <Route path="/auction/:id" view=AuctionDetails />
                        <Route path="/watchlist" view=Watchlist />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>
            </div>
        </Router>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-500 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href="/auctions"
                class="px-6 py-3 bg-blue-600 hover:bg-blue-700 text-white rounded-lg font-medium"
            >
                "Browse Auctions"
            </A>
        </div>
    }
}
