use std::sync::mpsc::Receiver;

use crate::config::plot::PLOT_CONFIG;
use crate::models::{EnrichKey, EnrichmentRecord, PricePoint};

/// Which of the two stacked plot surfaces an event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartPane {
    Price,
    Macd,
}

/// The shared visible time window, in epoch seconds on the x axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewRange {
    pub min: f64,
    pub max: f64,
}

impl ViewRange {
    pub fn approx_eq(&self, other: &Self) -> bool {
        let tolerance = 1e-6 * (self.max - self.min).abs().max(1.0);
        (self.min - other.min).abs() <= tolerance && (self.max - other.max).abs() <= tolerance
    }
}

/// Hover/enrichment lifecycle. Any new hover event, including pointer exit,
/// transitions immediately; a superseded lookup is abandoned, not cancelled.
#[derive(Debug, Clone, PartialEq)]
pub enum HoverPhase {
    Idle,
    Hovering { timestamp: i64 },
    Enriching { key: EnrichKey },
    Enriched { key: EnrichKey, record: EnrichmentRecord },
    Unavailable { key: EnrichKey },
}

/// What an enrichment lookup resolves to: the key it was issued for plus
/// zero-or-one record, or a fetch error.
pub type EnrichOutcome = (EnrichKey, Result<Option<EnrichmentRecord>, String>);

/// Owns the two chart panes' shared state: the series, the lock-stepped
/// visible range, and the hover/enrichment machine.
///
/// Range propagation carries an explicit origin tag so one pane's change is
/// applied to the other exactly once and never echoes back.
pub struct DualChartController {
    series: Vec<PricePoint>,
    symbol: String,
    interval: String,
    interval_secs: i64,
    shared_range: Option<ViewRange>,
    pending: Option<(ChartPane, ViewRange)>,
    hover: HoverPhase,
    enrich_rx: Option<Receiver<EnrichOutcome>>,
}

impl Default for DualChartController {
    fn default() -> Self {
        Self {
            series: Vec::new(),
            symbol: String::new(),
            interval: String::new(),
            interval_secs: 3600,
            shared_range: None,
            pending: None,
            hover: HoverPhase::Idle,
            enrich_rx: None,
        }
    }
}

impl DualChartController {
    /// Seed both panes with a fresh series. Resets hover and view state;
    /// an empty series leaves the controller not-ready (the panes simply
    /// don't draw, per the missing-precondition rule).
    pub fn set_series(
        &mut self,
        series: Vec<PricePoint>,
        symbol: impl Into<String>,
        interval: impl Into<String>,
        interval_secs: i64,
    ) {
        self.series = series;
        self.symbol = symbol.into();
        self.interval = interval.into();
        self.interval_secs = interval_secs.max(1);
        self.reset();
    }

    pub fn is_ready(&self) -> bool {
        !self.series.is_empty()
    }

    pub fn series(&self) -> &[PricePoint] {
        &self.series
    }

    pub fn interval_secs(&self) -> i64 {
        self.interval_secs
    }

    /// Full data extent plus a small right offset, used to seed both panes
    /// when no range has settled yet.
    pub fn default_range(&self) -> Option<ViewRange> {
        let first = self.series.first()?.time as f64;
        let last = self.series.last()?.time as f64;
        let span = (last - first).max(self.interval_secs as f64);
        Some(ViewRange {
            min: first - span * 0.01,
            max: last + span * PLOT_CONFIG.right_offset_pct,
        })
    }

    pub fn shared_range(&self) -> Option<ViewRange> {
        self.shared_range
    }

    /// A pane reports the bounds it ended the frame with. A change relative
    /// to the settled range records a propagation tagged with its origin.
    pub fn observe_bounds(&mut self, pane: ChartPane, range: ViewRange) {
        match self.shared_range {
            Some(current) if current.approx_eq(&range) => {}
            Some(_) => {
                self.shared_range = Some(range);
                self.pending = Some((pane, range));
            }
            None => {
                self.shared_range = Some(range);
            }
        }
    }

    /// Range to force onto `pane` this frame, if the *other* pane moved.
    /// The origin tag keeps the propagation one-directional per event, so
    /// the updated pane can never re-trigger the handler.
    pub fn take_range_for(&mut self, pane: ChartPane) -> Option<ViewRange> {
        match self.pending {
            Some((origin, range)) if origin != pane => {
                self.pending = None;
                Some(range)
            }
            _ => None,
        }
    }

    /// Map a pointer x coordinate to the nearest bar timestamp, if the
    /// pointer is within half an interval of one. Linear scan; the series
    /// is bounded by the fetched window.
    pub fn snap_timestamp(&self, x: f64) -> Option<i64> {
        let half = self.interval_secs as f64 / 2.0;
        self.series
            .iter()
            .map(|p| (p.time, (p.time as f64 - x).abs()))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .filter(|(_, dist)| *dist <= half)
            .map(|(t, _)| t)
    }

    /// Crosshair event from either pane. Returns the key of an enrichment
    /// lookup the caller should start, when a new bar was selected.
    pub fn on_hover(&mut self, timestamp: Option<i64>) -> Option<EnrichKey> {
        let Some(ts) = timestamp else {
            self.clear_hover();
            return None;
        };
        // Exact-match against the in-memory series; no match means no hover.
        if !self.series.iter().any(|p| p.time == ts) {
            self.clear_hover();
            return None;
        }
        if self.hover_timestamp() == Some(ts) {
            return None; // same bar, keep whatever enrichment state we have
        }
        self.enrich_rx = None;
        self.hover = HoverPhase::Hovering { timestamp: ts };
        Some(EnrichKey {
            timestamp: ts,
            symbol: self.symbol.clone(),
            interval: self.interval.clone(),
        })
    }

    /// The caller spawned the lookup for `key`; park in `Enriching` until
    /// its outcome arrives on `rx`.
    pub fn enrichment_started(&mut self, key: EnrichKey, rx: Receiver<EnrichOutcome>) {
        self.enrich_rx = Some(rx);
        self.hover = HoverPhase::Enriching { key };
    }

    /// Drain the enrichment channel. Called once per frame.
    pub fn poll_enrichment(&mut self) {
        let Some(rx) = &self.enrich_rx else { return };
        if let Ok((key, outcome)) = rx.try_recv() {
            self.on_enrichment(key, outcome);
        }
    }

    /// Stale-response guard: a response is only kept when its key still
    /// equals the live selection. A failed or empty lookup downgrades to
    /// `Unavailable` without touching the hover highlight itself.
    pub fn on_enrichment(&mut self, key: EnrichKey, outcome: Result<Option<EnrichmentRecord>, String>) {
        let live = matches!(&self.hover, HoverPhase::Enriching { key: k } if *k == key);
        if !live {
            return;
        }
        self.enrich_rx = None;
        self.hover = match outcome {
            Ok(Some(record)) => HoverPhase::Enriched { key, record },
            Ok(None) => HoverPhase::Unavailable { key },
            Err(message) => {
                log::warn!("enrichment lookup failed: {message}");
                HoverPhase::Unavailable { key }
            }
        };
    }

    pub fn hover_phase(&self) -> &HoverPhase {
        &self.hover
    }

    pub fn hover_timestamp(&self) -> Option<i64> {
        match &self.hover {
            HoverPhase::Idle => None,
            HoverPhase::Hovering { timestamp } => Some(*timestamp),
            HoverPhase::Enriching { key }
            | HoverPhase::Enriched { key, .. }
            | HoverPhase::Unavailable { key } => Some(key.timestamp),
        }
    }

    pub fn hovered_point(&self) -> Option<&PricePoint> {
        let ts = self.hover_timestamp()?;
        self.series.iter().find(|p| p.time == ts)
    }

    fn clear_hover(&mut self) {
        self.hover = HoverPhase::Idle;
        self.enrich_rx = None;
    }

    /// Release everything a live screen holds: hover selection, the
    /// in-flight enrichment channel, and any pending propagation. Invoked
    /// when the screen is left, so nothing fires against a gone view.
    pub fn reset(&mut self) {
        self.clear_hover();
        self.pending = None;
        self.shared_range = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::channel;

    fn point(time: i64) -> PricePoint {
        PricePoint {
            time,
            open: 1.0,
            high: 2.0,
            low: 0.5,
            close: 1.5,
            upper_band: 2.2,
            middle_band: 1.5,
            lower_band: 0.9,
            macd: 0.1,
            macd_signal: 0.08,
            macd_histogram: 0.02,
        }
    }

    fn controller_with(times: &[i64]) -> DualChartController {
        let mut c = DualChartController::default();
        c.set_series(times.iter().map(|&t| point(t)).collect(), "BTCUSDT", "60", 3600);
        c
    }

    fn record() -> EnrichmentRecord {
        EnrichmentRecord {
            profit_and_loss: Some(12.5),
            entry_type: Some("long".into()),
            entry_price: Some(100.0),
        }
    }

    #[test]
    fn empty_series_is_not_ready() {
        let mut c = DualChartController::default();
        c.set_series(Vec::new(), "BTCUSDT", "60", 3600);
        assert!(!c.is_ready());
        assert!(c.default_range().is_none());
        assert_eq!(c.on_hover(Some(100)), None);
    }

    #[test]
    fn range_change_propagates_to_the_other_pane_only() {
        let mut c = controller_with(&[100, 200, 300]);
        let seed = ViewRange { min: 0.0, max: 400.0 };
        c.observe_bounds(ChartPane::Price, seed);
        c.observe_bounds(ChartPane::Macd, seed);

        let dragged = ViewRange { min: 50.0, max: 350.0 };
        c.observe_bounds(ChartPane::Price, dragged);

        // Origin pane must not receive its own change back.
        assert_eq!(c.take_range_for(ChartPane::Price), None);
        assert_eq!(c.take_range_for(ChartPane::Macd), Some(dragged));
        // Applied exactly once.
        assert_eq!(c.take_range_for(ChartPane::Macd), None);
    }

    #[test]
    fn ranges_settle_equal_with_no_feedback_loop() {
        let mut c = controller_with(&[100, 200]);
        let seed = ViewRange { min: 0.0, max: 300.0 };
        c.observe_bounds(ChartPane::Price, seed);
        c.observe_bounds(ChartPane::Macd, seed);

        let zoomed = ViewRange { min: 120.0, max: 180.0 };
        c.observe_bounds(ChartPane::Macd, zoomed);
        let applied = c.take_range_for(ChartPane::Price).unwrap();
        // The receiving pane reports the applied bounds back; since they
        // match the settled range this must not start a second propagation.
        c.observe_bounds(ChartPane::Price, applied);
        assert_eq!(c.take_range_for(ChartPane::Macd), None);
        assert_eq!(c.shared_range(), Some(zoomed));
    }

    #[test]
    fn hover_exact_match_and_clear() {
        let mut c = controller_with(&[100, 200]);

        let key = c.on_hover(Some(200)).expect("hover should select the bar");
        assert_eq!(key.timestamp, 200);
        assert_eq!(key.symbol, "BTCUSDT");
        assert_eq!(c.hover_timestamp(), Some(200));
        assert_eq!(c.hovered_point().unwrap().time, 200);

        c.on_hover(None);
        assert_eq!(c.hover_timestamp(), None);
        assert!(matches!(c.hover_phase(), HoverPhase::Idle));
    }

    #[test]
    fn hover_on_absent_timestamp_selects_nothing() {
        let mut c = controller_with(&[100, 200]);
        assert_eq!(c.on_hover(Some(150)), None);
        assert_eq!(c.hover_timestamp(), None);
    }

    #[test]
    fn re_hovering_the_same_bar_does_not_refetch() {
        let mut c = controller_with(&[100]);
        assert!(c.on_hover(Some(100)).is_some());
        assert!(c.on_hover(Some(100)).is_none());
    }

    #[test]
    fn stale_enrichment_response_is_discarded() {
        let mut c = controller_with(&[100, 200]);

        let first_key = c.on_hover(Some(100)).unwrap();
        let (_tx, rx) = channel();
        c.enrichment_started(first_key.clone(), rx);

        // Hover moves on before the first lookup resolves.
        let second_key = c.on_hover(Some(200)).unwrap();
        let (_tx2, rx2) = channel();
        c.enrichment_started(second_key.clone(), rx2);

        c.on_enrichment(first_key, Ok(Some(record())));
        assert!(matches!(c.hover_phase(), HoverPhase::Enriching { key } if *key == second_key));

        c.on_enrichment(second_key.clone(), Ok(Some(record())));
        assert!(matches!(c.hover_phase(), HoverPhase::Enriched { key, .. } if *key == second_key));
    }

    #[test]
    fn response_after_hover_cleared_is_ignored() {
        let mut c = controller_with(&[100]);
        let key = c.on_hover(Some(100)).unwrap();
        let (_tx, rx) = channel();
        c.enrichment_started(key.clone(), rx);
        c.on_hover(None);

        c.on_enrichment(key, Ok(Some(record())));
        assert!(matches!(c.hover_phase(), HoverPhase::Idle));
    }

    #[test]
    fn failed_lookup_keeps_the_hover_highlight() {
        let mut c = controller_with(&[100]);
        let key = c.on_hover(Some(100)).unwrap();
        let (_tx, rx) = channel();
        c.enrichment_started(key.clone(), rx);

        c.on_enrichment(key.clone(), Err("HTTP 500".into()));
        assert!(matches!(c.hover_phase(), HoverPhase::Unavailable { .. }));
        assert_eq!(c.hover_timestamp(), Some(100));
    }

    #[test]
    fn empty_lookup_means_unavailable() {
        let mut c = controller_with(&[100]);
        let key = c.on_hover(Some(100)).unwrap();
        let (_tx, rx) = channel();
        c.enrichment_started(key.clone(), rx);
        c.on_enrichment(key, Ok(None));
        assert!(matches!(c.hover_phase(), HoverPhase::Unavailable { .. }));
    }

    #[test]
    fn snap_picks_nearest_bar_within_half_interval() {
        let c = controller_with(&[3600, 7200]);
        assert_eq!(c.snap_timestamp(3700.0), Some(3600));
        assert_eq!(c.snap_timestamp(5450.0), Some(7200));
        // More than half an interval away from every bar.
        assert_eq!(c.snap_timestamp(20000.0), None);
    }

    #[test]
    fn reset_releases_hover_and_pending_state() {
        let mut c = controller_with(&[100, 200]);
        c.observe_bounds(ChartPane::Price, ViewRange { min: 0.0, max: 300.0 });
        c.observe_bounds(ChartPane::Price, ViewRange { min: 10.0, max: 290.0 });
        let key = c.on_hover(Some(100)).unwrap();
        let (_tx, rx) = channel();
        c.enrichment_started(key, rx);

        c.reset();
        assert!(matches!(c.hover_phase(), HoverPhase::Idle));
        assert_eq!(c.take_range_for(ChartPane::Macd), None);
        assert_eq!(c.shared_range(), None);
    }
}
