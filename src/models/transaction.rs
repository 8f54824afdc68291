use serde::Deserialize;

use crate::utils::TimeUtils;

/// One closed trade from `/transaction_data`.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionRecord {
    pub pl: f64,
    pub entrytime: String,
    pub pred: f64,
    pub tradetype: String,
    pub direction: String,
    pub losscut: bool,
}

impl TransactionRecord {
    pub fn timestamp(&self) -> Option<i64> {
        TimeUtils::parse_server_datetime(&self.entrytime)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlTotals {
    pub positive: f64,
    pub negative: f64,
}

impl PlTotals {
    pub fn net(&self) -> f64 {
        self.positive - self.negative
    }
}

/// Sum of winning P&L and of |losing P&L| for the totals strip.
pub fn pl_totals(records: &[TransactionRecord]) -> PlTotals {
    records.iter().fold(PlTotals::default(), |mut acc, r| {
        if r.pl >= 0.0 {
            acc.positive += r.pl;
        } else {
            acc.negative += r.pl.abs();
        }
        acc
    })
}

/// Rendering adapter: trades -> `(epoch_secs, pl)` bars, sorted ascending.
pub fn transaction_points(records: &[TransactionRecord]) -> Vec<(i64, f64)> {
    let mut out: Vec<(i64, f64)> = records
        .iter()
        .filter_map(|r| {
            let ts = r.timestamp();
            if ts.is_none() {
                log::warn!("dropping transaction with bad entrytime: {:?}", r.entrytime);
            }
            Some((ts?, r.pl))
        })
        .collect();
    out.sort_by_key(|(ts, _)| *ts);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trade(entrytime: &str, pl: f64) -> TransactionRecord {
        TransactionRecord {
            pl,
            entrytime: entrytime.into(),
            pred: 0.5,
            tradetype: "scalp".into(),
            direction: "long".into(),
            losscut: false,
        }
    }

    #[test]
    fn totals_split_wins_and_losses() {
        let records = vec![
            trade("2024-06-01T00:00:00", 10.0),
            trade("2024-06-01T01:00:00", -4.0),
            trade("2024-06-01T02:00:00", 6.0),
        ];
        let totals = pl_totals(&records);
        assert_eq!(totals.positive, 16.0);
        assert_eq!(totals.negative, 4.0);
        assert_eq!(totals.net(), 12.0);
    }

    #[test]
    fn zero_pl_counts_as_positive() {
        let totals = pl_totals(&[trade("2024-06-01T00:00:00", 0.0)]);
        assert_eq!(totals.positive, 0.0);
        assert_eq!(totals.negative, 0.0);
    }

    #[test]
    fn points_are_sorted_by_entry_time() {
        let records = vec![
            trade("2024-06-01T02:00:00", 2.0),
            trade("2024-06-01T00:00:00", 1.0),
        ];
        let points = transaction_points(&records);
        assert_eq!(points.len(), 2);
        assert!(points[0].0 < points[1].0);
        assert_eq!(points[0].1, 1.0);
    }
}
