mod controller;
mod view;

pub use controller::{ChartPane, DualChartController, EnrichOutcome, HoverPhase, ViewRange};
pub use view::MarketView;
