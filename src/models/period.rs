use strum_macros::EnumIter;

/// Named relative time window used by the period button rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter)]
pub enum TimePeriod {
    Days7,
    Days30,
    Days90,
    Days180,
    #[default]
    All,
}

impl TimePeriod {
    /// Path segment the API expects, e.g. `/latest/period/7d`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Days7 => "7d",
            Self::Days30 => "30d",
            Self::Days90 => "90d",
            Self::Days180 => "180d",
            Self::All => "all",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Days7 => "7D",
            Self::Days30 => "30D",
            Self::Days90 => "90D",
            Self::Days180 => "180D",
            Self::All => "All",
        }
    }
}

/// Candle interval, in the minute units the API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter)]
pub enum Interval {
    Min5,
    Min15,
    Min30,
    #[default]
    Hour1,
    Hour2,
    Hour4,
    Hour12,
}

impl Interval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Min5 => "5",
            Self::Min15 => "15",
            Self::Min30 => "30",
            Self::Hour1 => "60",
            Self::Hour2 => "120",
            Self::Hour4 => "240",
            Self::Hour12 => "720",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Min5 => "5m",
            Self::Min15 => "15m",
            Self::Min30 => "30m",
            Self::Hour1 => "1h",
            Self::Hour2 => "2h",
            Self::Hour4 => "4h",
            Self::Hour12 => "12h",
        }
    }

    pub fn seconds(&self) -> i64 {
        match self {
            Self::Min5 => 5 * 60,
            Self::Min15 => 15 * 60,
            Self::Min30 => 30 * 60,
            Self::Hour1 => 60 * 60,
            Self::Hour2 => 120 * 60,
            Self::Hour4 => 240 * 60,
            Self::Hour12 => 720 * 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn period_strings_match_api_contract() {
        let all: Vec<&str> = TimePeriod::iter().map(|p| p.as_str()).collect();
        assert_eq!(all, vec!["7d", "30d", "90d", "180d", "all"]);
    }

    #[test]
    fn interval_seconds_match_minute_encoding() {
        for iv in Interval::iter() {
            let minutes: i64 = iv.as_str().parse().unwrap();
            assert_eq!(iv.seconds(), minutes * 60);
        }
    }
}
