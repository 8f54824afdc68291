use serde::Deserialize;

use crate::utils::TimeUtils;

pub const VARIANT_COUNT: usize = 12;

/// One sample of the rolling per-variant tracing series from `/aiml_tracing`.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelTracePoint {
    pub start_at: String,
    pub hit_rate_rolling_v1: f64,
    pub hit_rate_rolling_v2: f64,
    pub hit_rate_rolling_v3: f64,
    pub hit_rate_rolling_v4: f64,
    pub hit_rate_rolling_v5: f64,
    pub hit_rate_rolling_v6: f64,
    pub hit_rate_rolling_v7: f64,
    pub hit_rate_rolling_v8: f64,
    pub hit_rate_rolling_v9: f64,
    pub hit_rate_rolling_v10: f64,
    pub hit_rate_rolling_v11: f64,
    pub hit_rate_rolling_v12: f64,
    pub avg_profit_rolling_v1: f64,
    pub avg_profit_rolling_v2: f64,
    pub avg_profit_rolling_v3: f64,
    pub avg_profit_rolling_v4: f64,
    pub avg_profit_rolling_v5: f64,
    pub avg_profit_rolling_v6: f64,
    pub avg_profit_rolling_v7: f64,
    pub avg_profit_rolling_v8: f64,
    pub avg_profit_rolling_v9: f64,
    pub avg_profit_rolling_v10: f64,
    pub avg_profit_rolling_v11: f64,
    pub avg_profit_rolling_v12: f64,
    pub profit: f64,
}

impl ModelTracePoint {
    pub fn timestamp(&self) -> Option<i64> {
        TimeUtils::parse_server_datetime(&self.start_at)
    }

    pub fn hit_rates(&self) -> [f64; VARIANT_COUNT] {
        [
            self.hit_rate_rolling_v1,
            self.hit_rate_rolling_v2,
            self.hit_rate_rolling_v3,
            self.hit_rate_rolling_v4,
            self.hit_rate_rolling_v5,
            self.hit_rate_rolling_v6,
            self.hit_rate_rolling_v7,
            self.hit_rate_rolling_v8,
            self.hit_rate_rolling_v9,
            self.hit_rate_rolling_v10,
            self.hit_rate_rolling_v11,
            self.hit_rate_rolling_v12,
        ]
    }

    pub fn avg_profits(&self) -> [f64; VARIANT_COUNT] {
        [
            self.avg_profit_rolling_v1,
            self.avg_profit_rolling_v2,
            self.avg_profit_rolling_v3,
            self.avg_profit_rolling_v4,
            self.avg_profit_rolling_v5,
            self.avg_profit_rolling_v6,
            self.avg_profit_rolling_v7,
            self.avg_profit_rolling_v8,
            self.avg_profit_rolling_v9,
            self.avg_profit_rolling_v10,
            self.avg_profit_rolling_v11,
            self.avg_profit_rolling_v12,
        ]
    }

    pub fn metric(&self, kind: MetricKind, variant: usize) -> f64 {
        match kind {
            MetricKind::HitRate => self.hit_rates()[variant],
            MetricKind::AvgProfit => self.avg_profits()[variant],
        }
    }
}

/// Which of the two rolling series families the Models screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetricKind {
    #[default]
    HitRate,
    AvgProfit,
}

impl MetricKind {
    pub fn series_name(&self, variant: usize) -> String {
        match self {
            Self::HitRate => format!("hit_rate_rolling_v{}", variant + 1),
            Self::AvgProfit => format!("avg_profit_rolling_v{}", variant + 1),
        }
    }

    pub fn toggle_label(&self) -> &'static str {
        match self {
            Self::HitRate => "Show Hit Rate",
            Self::AvgProfit => "Show Avg Profit",
        }
    }
}

/// Rendering adapter: one variant's `(epoch_secs, value)` line, sorted
/// ascending with the usual integrity logging.
pub fn variant_series(
    points: &[ModelTracePoint],
    kind: MetricKind,
    variant: usize,
) -> Vec<[f64; 2]> {
    let mut out: Vec<[f64; 2]> = points
        .iter()
        .filter_map(|p| {
            let ts = p.timestamp();
            if ts.is_none() {
                log::warn!("dropping trace point with bad start_at: {:?}", p.start_at);
            }
            Some([ts? as f64, p.metric(kind, variant)])
        })
        .collect();
    out.sort_by(|a, b| a[0].total_cmp(&b[0]));
    out
}
