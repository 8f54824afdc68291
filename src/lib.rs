#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]

// Core modules
pub mod config;
pub mod data;
pub mod models;
pub mod ui;
pub mod utils;

pub use data::ApiClient;
pub use ui::App;

// CLI argument parsing
use clap::Parser;

use crate::config::API;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the trading-system API
    #[arg(long, default_value_t = API.defaults.base_url.to_string())]
    pub api_url: String,
}

/// Main application entry point - creates the GUI app
/// This is the public API for the binary to call
pub fn run_app(cc: &eframe::CreationContext<'_>, args: Cli) -> App {
    App::new(cc, args)
}
