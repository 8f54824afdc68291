pub mod app;
pub mod balance;
pub mod history;
pub mod market;
pub mod models_view;
pub mod monitor;
pub mod styles;
pub mod transactions;
pub mod ui_config;

pub use app::App;
pub use ui_config::UI_CONFIG;
