//! Winner Banner Component
//!
//! Shown on an ended auction that has a winner.

use leptos::*;

use crate::state::models::money;

#[component]
pub fn WinnerBanner(
    #[prop(into)]
    email: String,
    amount: f64,
) -> impl IntoView {
    view! {
        <div class="bg-green-50 border border-green-300 rounded-lg p-4 my-4">
            <p class="font-semibold text-green-800">{format!("Winner: {}", email)}</p>
            <p class="text-green-700">{format!("Winning Bid: {}", money(amount))}</p>
        </div>
    }
}
