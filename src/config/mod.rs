//! Configuration module for the dashboard.

mod api;

// Can't be private because we don't re-export everything from it
pub mod plot;

pub use api::{API, ApiConfig};
