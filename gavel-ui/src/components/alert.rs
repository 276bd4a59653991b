//! Alert Component
//!
//! Inline error banner bound to an optional message.

use leptos::*;

#[component]
pub fn Alert(
    #[prop(into)]
    message: Signal<Option<String>>,
) -> impl IntoView {
    move || {
        message.get().map(|text| view! {
            <div class="bg-red-100 border border-red-300 text-red-700 px-4 py-3 rounded-lg mb-4">
                {text}
            </div>
        })
    }
}
