/// Defaults for talking to the trading-system API.
pub struct ApiDefaults {
    pub base_url: &'static str,
    pub symbol: &'static str,
    pub start_date: &'static str,
    pub end_date: &'static str,
}

/// Polling cadence and fetch sizes for the log views.
pub struct LogViewConfig {
    /// Number of entries the live monitor pulls per refresh.
    pub tail_entries: usize,
    /// Seconds between live monitor refreshes.
    pub poll_interval_secs: u64,
    /// Default lookback for the historical search, in days.
    pub history_lookback_days: i64,
}

pub struct ApiConfig {
    pub defaults: ApiDefaults,
    pub logs: LogViewConfig,
    /// `nstep` sent to the enrichment lookup (0 = exact spot only).
    pub enrichment_nstep: u32,
}

pub const API: ApiConfig = ApiConfig {
    defaults: ApiDefaults {
        base_url: "http://localhost:8000",
        symbol: "BTCUSDT",
        start_date: "2024-06-01",
        end_date: "2024-06-15",
    },
    logs: LogViewConfig {
        tail_entries: 200,
        poll_interval_secs: 30,
        history_lookback_days: 14,
    },
    enrichment_nstep: 0,
};
