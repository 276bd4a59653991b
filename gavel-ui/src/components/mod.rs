//! UI Components
//!
//! Reusable Leptos components shared by the pages.

pub mod alert;
pub mod loading;
pub mod nav;
pub mod winner;

pub use alert::Alert;
pub use loading::Loading;
pub use nav::Nav;
pub use winner::WinnerBanner;
