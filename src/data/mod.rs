mod client;
mod fetch;

pub use client::{ApiClient, get_enrichment};
pub use fetch::FetchState;
