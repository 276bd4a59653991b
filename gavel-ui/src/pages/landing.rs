//! Landing Page
//!
//! Static welcome, about and contact sections.

use chrono::Datelike;
use leptos::*;
use leptos_router::*;

#[component]
pub fn Landing() -> impl IntoView {
    let year = chrono::Local::now().year();

    view! {
        <div class="space-y-12">
            <section class="text-center py-16 bg-blue-600 text-white rounded-xl">
                <h1 class="text-4xl font-bold mb-4">"Welcome to the Auction App"</h1>
                <p class="text-lg mb-8">"The best place to buy and sell items through auctions."</p>
                <div class="space-x-4">
                    <A href="/signin" class="px-6 py-3 bg-white text-blue-700 rounded-lg font-medium">
                        "Sign In"
                    </A>
                    <A href="/signup" class="px-6 py-3 border border-white rounded-lg font-medium">
                        "Sign Up"
                    </A>
                </div>
            </section>

            <section class="bg-white rounded-xl p-8">
                <h2 class="text-2xl font-semibold mb-4">"About Us"</h2>
                <p class="text-gray-600">
                    "The Auction App is a platform where you can buy and sell unique items \
                     through a seamless auction process. Whether you're looking for rare \
                     collectibles, electronics, or art, our app connects you with sellers \
                     worldwide. Join us today and experience the thrill of bidding!"
                </p>
            </section>

            <section class="bg-white rounded-xl p-8">
                <h2 class="text-2xl font-semibold mb-4">"Contact Us"</h2>
                <p class="text-gray-600">"123 Auction Street, Bid City, BC 12345"</p>
                <p class="text-gray-600">"support@auctionapp.com"</p>
                <div class="flex space-x-4 mt-4">
                    <a href="https://facebook.com" class="text-blue-600">"Facebook"</a>
                    <a href="https://twitter.com" class="text-blue-600">"Twitter"</a>
                    <a href="https://instagram.com" class="text-blue-600">"Instagram"</a>
                </div>
            </section>

            <footer class="text-center text-gray-500 text-sm">
                {format!("\u{a9} {} Auction App. All rights reserved.", year)}
            </footer>
        </div>
    }
}
