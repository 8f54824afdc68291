use serde::Deserialize;

use crate::utils::TimeUtils;

/// One account-balance snapshot from `/account_data`.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountPoint {
    #[serde(rename = "_id")]
    pub id: String,
    pub serial: i64,
    pub date: String,
    pub cash_in: f64,
    pub cash_out: f64,
    pub amount: f64,
    pub total_assets: f64,
    pub startup_flag: i64,
}

/// Values behind the three statistics cards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalanceSummary {
    pub balance: f64,
    pub profit_loss: f64,
    pub profit_loss_pct: f64,
}

impl BalanceSummary {
    /// P/L is measured against the first point of the loaded window, for
    /// either the newest balance or the one under the pointer.
    pub fn against_first(points: &[AccountPoint], balance: f64) -> Self {
        let initial = points.first().map(|p| p.total_assets).unwrap_or(0.0);
        let profit_loss = balance - initial;
        let profit_loss_pct = if initial.abs() > f64::EPSILON {
            (profit_loss / initial) * 100.0
        } else {
            0.0
        };
        Self {
            balance,
            profit_loss,
            profit_loss_pct,
        }
    }
}

/// Rendering adapter: account snapshots -> `[epoch_secs, total_assets]`
/// points, sorted ascending with integrity logging.
pub fn balance_points(points: &[AccountPoint]) -> Vec<[f64; 2]> {
    let mut out: Vec<[f64; 2]> = points
        .iter()
        .filter_map(|p| {
            let ts = TimeUtils::parse_server_datetime(&p.date);
            if ts.is_none() {
                log::warn!("dropping account point with bad date: {:?}", p.date);
            }
            Some([ts? as f64, p.total_assets])
        })
        .collect();
    out.sort_by(|a, b| a[0].total_cmp(&b[0]));
    for (i, win) in out.windows(2).enumerate() {
        if win[1][0] < win[0][0] {
            log::warn!("data integrity issue in account series at index {}", i + 1);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(date: &str, total_assets: f64) -> AccountPoint {
        AccountPoint {
            id: "x".into(),
            serial: 0,
            date: date.into(),
            cash_in: 0.0,
            cash_out: 0.0,
            amount: 0.0,
            total_assets,
            startup_flag: 0,
        }
    }

    #[test]
    fn summary_rebases_against_first_point() {
        let points = vec![point("2024-06-01", 1000.0), point("2024-06-02", 1100.0)];
        let s = BalanceSummary::against_first(&points, 1100.0);
        assert_eq!(s.profit_loss, 100.0);
        assert!((s.profit_loss_pct - 10.0).abs() < 1e-9);
    }

    #[test]
    fn summary_with_zero_initial_avoids_div_by_zero() {
        let points = vec![point("2024-06-01", 0.0)];
        let s = BalanceSummary::against_first(&points, 50.0);
        assert_eq!(s.profit_loss_pct, 0.0);
    }

    #[test]
    fn balance_points_sorted_ascending() {
        let points = vec![
            point("2024-06-03", 3.0),
            point("2024-06-01", 1.0),
            point("2024-06-02", 2.0),
        ];
        let series = balance_points(&points);
        assert_eq!(series.len(), 3);
        assert!(series.windows(2).all(|w| w[0][0] <= w[1][0]));
        assert_eq!(series[0][1], 1.0);
    }
}
