//! API Module
//!
//! HTTP client functions for the auction REST API.

pub mod client;

pub use client::*;
