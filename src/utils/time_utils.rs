use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

pub struct TimeUtils;

impl TimeUtils {
    pub const SECS_IN_MIN: i64 = 60;
    pub const SECS_IN_H: i64 = Self::SECS_IN_MIN * 60;
    pub const SECS_IN_D: i64 = Self::SECS_IN_H * 24;
    pub const DATE_FORMAT: &str = "%Y-%m-%d";
    pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    /// Parse a server timestamp into epoch seconds.
    ///
    /// The API sends naive timestamps with no zone marker; they are UTC by
    /// contract, so we parse them as naive and attach UTC ourselves.
    /// Accepts `2024-06-01T12:00:00`, `2024-06-01 12:00:00` (with optional
    /// fractional seconds) and bare dates.
    pub fn parse_server_datetime(raw: &str) -> Option<i64> {
        for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
                return Some(dt.and_utc().timestamp());
            }
        }
        NaiveDate::parse_from_str(raw, Self::DATE_FORMAT)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc().timestamp())
    }

    /// Epoch seconds -> `2024-06-01 12:00:00` (UTC), the format the
    /// enrichment endpoint expects for `spot_time`.
    pub fn epoch_to_spot_time(epoch_sec: i64) -> String {
        match DateTime::from_timestamp(epoch_sec, 0) {
            Some(dt) => dt.format(Self::DATETIME_FORMAT).to_string(),
            None => String::new(),
        }
    }

    /// Epoch seconds -> short axis label like `06-14 09:30`.
    pub fn epoch_to_axis_label(epoch_sec: i64) -> String {
        match DateTime::from_timestamp(epoch_sec, 0) {
            Some(dt) => dt.format("%m-%d %H:%M").to_string(),
            None => String::new(),
        }
    }

    /// Epoch seconds -> `2024-06-01` (UTC).
    pub fn epoch_to_date_string(epoch_sec: i64) -> String {
        match DateTime::from_timestamp(epoch_sec, 0) {
            Some(dt) => dt.format(Self::DATE_FORMAT).to_string(),
            None => String::new(),
        }
    }

    pub fn now_utc_string() -> String {
        Utc::now().format("%a, %d %b %Y %H:%M:%S UTC").to_string()
    }

    pub fn today_string() -> String {
        Utc::now().format(Self::DATE_FORMAT).to_string()
    }

    pub fn days_ago_string(days: i64) -> String {
        (Utc::now() - chrono::Duration::days(days))
            .format(Self::DATE_FORMAT)
            .to_string()
    }

    /// First day of the current year, for the "YTD" range button.
    pub fn year_start_string() -> String {
        format!("{}-01-01", Utc::now().year())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_t_separator_as_utc() {
        let ts = TimeUtils::parse_server_datetime("2024-06-01T00:00:00").unwrap();
        assert_eq!(ts, 1717200000);
    }

    #[test]
    fn parses_space_separator_and_fraction() {
        let plain = TimeUtils::parse_server_datetime("2024-06-01 00:00:00").unwrap();
        let frac = TimeUtils::parse_server_datetime("2024-06-01 00:00:00.250").unwrap();
        assert_eq!(plain, 1717200000);
        assert_eq!(frac, 1717200000);
    }

    #[test]
    fn parses_bare_date_as_midnight() {
        let ts = TimeUtils::parse_server_datetime("2024-06-01").unwrap();
        assert_eq!(ts, 1717200000);
    }

    #[test]
    fn rejects_garbage() {
        assert!(TimeUtils::parse_server_datetime("not a date").is_none());
    }

    #[test]
    fn spot_time_round_trips() {
        let formatted = TimeUtils::epoch_to_spot_time(1717200000);
        assert_eq!(formatted, "2024-06-01 00:00:00");
        assert_eq!(
            TimeUtils::parse_server_datetime(&formatted),
            Some(1717200000)
        );
    }
}
