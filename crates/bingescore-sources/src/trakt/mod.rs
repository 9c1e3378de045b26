pub mod client;
pub mod api;

pub use client::TraktClient;

pub const DEFAULT_BASE_URL: &str = "https://api.trakt.tv";
