use serde::Deserialize;

use crate::utils::TimeUtils;

/// One OHLC + indicator record as the API sends it.
#[derive(Debug, Clone, Deserialize)]
pub struct TechRecord {
    pub start_at: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub upper2: f64,
    pub middle: f64,
    pub lower2: f64,
    pub macd: f64,
    pub macdsignal: f64,
    pub macdhist: f64,
}

/// Chart-ready OHLC bar with attached indicator values. Replaced wholesale
/// on every fetch, never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    /// Epoch seconds, UTC
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub upper_band: f64,
    pub middle_band: f64,
    pub lower_band: f64,
    pub macd: f64,
    pub macd_signal: f64,
    pub macd_histogram: f64,
}

/// Rendering adapter: raw records -> sorted chart series.
///
/// Unparseable timestamps are dropped with a warning. After sorting we still
/// verify monotonicity; a violation is a data-integrity fault that gets
/// logged, not a reason to refuse rendering.
pub fn prepare_series(records: &[TechRecord]) -> Vec<PricePoint> {
    let mut series: Vec<PricePoint> = records
        .iter()
        .filter_map(|r| {
            let time = TimeUtils::parse_server_datetime(&r.start_at);
            if time.is_none() {
                log::warn!("dropping tech record with bad start_at: {:?}", r.start_at);
            }
            Some(PricePoint {
                time: time?,
                open: r.open,
                high: r.high,
                low: r.low,
                close: r.close,
                upper_band: r.upper2,
                middle_band: r.middle,
                lower_band: r.lower2,
                macd: r.macd,
                macd_signal: r.macdsignal,
                macd_histogram: r.macdhist,
            })
        })
        .collect();

    series.sort_by_key(|p| p.time);
    check_integrity(&series);
    series
}

fn check_integrity(series: &[PricePoint]) {
    for (i, win) in series.windows(2).enumerate() {
        if win[1].time < win[0].time {
            log::warn!(
                "data integrity issue: time at index {} is less than previous time",
                i + 1
            );
        }
    }
}
