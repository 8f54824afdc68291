//! Hover selection plus the asynchronous trade-detail lookup, driven through
//! the same channel the UI uses.

use std::sync::mpsc::channel;

use trade_deck::models::{EnrichmentRecord, TechRecord, prepare_series};
use trade_deck::ui::market::{DualChartController, HoverPhase};

fn controller() -> DualChartController {
    let records: Vec<TechRecord> = serde_json::from_str(
        r#"[
            {"start_at": "2024-06-01 00:00:00", "open": 100.0, "high": 101.0, "low": 99.0, "close": 100.5,
             "upper2": 104.0, "middle": 100.0, "lower2": 96.0, "macd": 0.1, "macdsignal": 0.2, "macdhist": -0.1},
            {"start_at": "2024-06-01 01:00:00", "open": 100.5, "high": 103.0, "low": 100.0, "close": 102.0,
             "upper2": 105.0, "middle": 101.0, "lower2": 97.0, "macd": 0.2, "macdsignal": 0.25, "macdhist": -0.05}
        ]"#,
    )
    .unwrap();
    let mut c = DualChartController::default();
    c.set_series(prepare_series(&records), "BTCUSDT", "60", 3600);
    c
}

const BAR0: i64 = 1717200000; // 2024-06-01T00:00:00Z
const BAR1: i64 = 1717203600;

#[test]
fn snap_hover_fetch_and_display() {
    let mut c = controller();

    // Pointer lands a few minutes into the first bar.
    let ts = c.snap_timestamp(BAR0 as f64 + 240.0).unwrap();
    assert_eq!(ts, BAR0);

    let key = c.on_hover(Some(ts)).expect("new bar should start a lookup");
    assert_eq!(key.symbol, "BTCUSDT");
    assert_eq!(key.interval, "60");

    let (tx, rx) = channel();
    c.enrichment_started(key.clone(), rx);
    assert!(matches!(c.hover_phase(), HoverPhase::Enriching { .. }));

    let record: EnrichmentRecord = serde_json::from_str(
        r#"{"pandl": 42.5, "entry_type": "long", "entry_price": 100.25}"#,
    )
    .unwrap();
    tx.send((key, Ok(Some(record)))).unwrap();
    c.poll_enrichment();

    match c.hover_phase() {
        HoverPhase::Enriched { record, .. } => {
            assert_eq!(record.profit_and_loss, Some(42.5));
            assert_eq!(record.entry_type.as_deref(), Some("long"));
        }
        other => panic!("expected Enriched, got {other:?}"),
    }
}

#[test]
fn moving_to_another_bar_discards_the_stale_lookup() {
    let mut c = controller();

    let first = c.on_hover(Some(BAR0)).unwrap();
    let (first_tx, first_rx) = channel();
    c.enrichment_started(first.clone(), first_rx);

    let second = c.on_hover(Some(BAR1)).unwrap();
    let (_second_tx, second_rx) = channel();
    c.enrichment_started(second.clone(), second_rx);

    // The first lookup resolves late. Its channel was already dropped when
    // the hover moved on, so the send fails and the phase is untouched.
    let late = first_tx.send((
        first,
        Ok(Some(EnrichmentRecord {
            profit_and_loss: Some(-1.0),
            entry_type: None,
            entry_price: None,
        })),
    ));
    assert!(late.is_err());
    c.poll_enrichment();
    assert!(matches!(c.hover_phase(), HoverPhase::Enriching { key } if *key == second));
}

#[test]
fn null_detail_fields_deserialize_as_absent() {
    let record: EnrichmentRecord = serde_json::from_str(
        r#"{"pandl": null, "entry_type": null, "entry_price": null}"#,
    )
    .unwrap();
    assert_eq!(record.profit_and_loss, None);
    assert_eq!(record.entry_type, None);
    assert_eq!(record.entry_price, None);
}

#[test]
fn pointer_between_bars_clears_the_selection() {
    let mut c = controller();
    assert!(c.on_hover(Some(BAR0)).is_some());

    // Snapped-to-nothing pointer position reports None.
    assert_eq!(c.snap_timestamp(BAR1 as f64 + 7200.0), None);
    c.on_hover(None);
    assert!(matches!(c.hover_phase(), HoverPhase::Idle));
    assert_eq!(c.hovered_point(), None);
}
