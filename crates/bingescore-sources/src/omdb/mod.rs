pub mod client;
pub mod api;

pub use client::OmdbClient;

pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com";
