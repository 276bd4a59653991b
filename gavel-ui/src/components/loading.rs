//! Loading Component

use leptos::*;

/// Spinner with a caption
#[component]
pub fn Loading(
    #[prop(default = "Loading...")]
    label: &'static str,
) -> impl IntoView {
    view! {
        <div class="flex items-center justify-center space-x-3 py-12 text-gray-500">
            <div class="loading-spinner w-6 h-6" />
            <span>{label}</span>
        </div>
    }
}
