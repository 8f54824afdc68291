//! Trading-log rows as the API sends them: the live feed carries a level
//! field, the historical search does not.

use trade_deck::models::{LevelFilter, LogEntry, LogLevel, ScrollTracker, filter_entries, sort_entries};

fn feed() -> Vec<LogEntry> {
    serde_json::from_str(
        r#"[
            {"_id": "a", "serial": 3, "date": "2024-07-01T00:02:00", "message": "position opened", "level": "INFO"},
            {"_id": "b", "serial": 1, "date": "2024-07-01T00:00:00", "message": "ERROR: order rejected"},
            {"_id": "c", "serial": 2, "date": "2024-07-01T00:01:00", "message": "WARNING: slow fill"},
            {"_id": "d", "serial": 4, "date": "2024-07-01T00:03:00", "message": "heartbeat"}
        ]"#,
    )
    .unwrap()
}

#[test]
fn levels_come_from_field_or_message_keywords() {
    let entries = feed();
    assert_eq!(entries[0].level(), LogLevel::Info);
    assert_eq!(entries[1].level(), LogLevel::Error);
    assert_eq!(entries[2].level(), LogLevel::Warning);
    assert_eq!(entries[3].level(), LogLevel::Info);
}

#[test]
fn filter_then_sort_yields_chronological_severity_slice() {
    let mut entries = feed();
    sort_entries(&mut entries);
    let serials: Vec<i64> = entries.iter().map(|e| e.serial).collect();
    assert_eq!(serials, vec![1, 2, 3, 4]);

    let errors = filter_entries(&entries, LevelFilter::Error);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].id, "b");

    let infos = filter_entries(&entries, LevelFilter::Info);
    assert_eq!(infos.len(), 2);
}

#[test]
fn auto_scroll_only_fires_when_the_tail_grows() {
    let mut tracker = ScrollTracker::default();
    assert!(tracker.should_scroll_to_bottom(4, true));
    assert!(!tracker.should_scroll_to_bottom(4, true));

    // Poll brought two new rows.
    assert!(tracker.should_scroll_to_bottom(6, true));

    // User scrolled up and disabled following; growth must not yank them.
    assert!(!tracker.should_scroll_to_bottom(8, false));

    // Re-enabling follows again on the next batch.
    assert!(!tracker.should_scroll_to_bottom(8, true));
    assert!(tracker.should_scroll_to_bottom(9, true));
}
