use anyhow::{Context, Result, bail};
use serde::de::DeserializeOwned;

use crate::config::API;
use crate::models::{EnrichKey, Interval, TimePeriod};
use crate::utils::TimeUtils;

/// Builds request URLs for the trading-system API and performs the GET.
/// The API is read-only; every endpoint returns a JSON array.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn account_url(&self, period: TimePeriod) -> String {
        format!(
            "{}/api/v1/account_data/latest/period/{}",
            self.base_url,
            period.as_str()
        )
    }

    pub fn market_url(
        &self,
        symbol: &str,
        start_date: &str,
        end_date: &str,
        interval: Interval,
    ) -> String {
        format!(
            "{}/api/v1/market_data_tech/search/?start_datetime={}&end_datetime={}&symbol={}&interval={}",
            self.base_url,
            start_date,
            end_date,
            symbol,
            interval.as_str()
        )
    }

    pub fn enrichment_url(&self, key: &EnrichKey) -> String {
        let spot_time = TimeUtils::epoch_to_spot_time(key.timestamp);
        format!(
            "{}/api/v1/rolling_ai_data/around-spot-time/?spot_time={}&nstep={}&symbol={}&interval={}",
            self.base_url,
            encode_query_value(&spot_time),
            API.enrichment_nstep,
            key.symbol,
            key.interval
        )
    }

    pub fn log_tail_url(&self, entries: usize) -> String {
        format!("{}/api/v1/trading_log/latest/nsteps/{}", self.base_url, entries)
    }

    pub fn log_search_url(&self, start_date: &str, end_date: &str) -> String {
        format!(
            "{}/api/v1/trading_log/search/?start_datetime={}&end_datetime={}",
            self.base_url, start_date, end_date
        )
    }

    pub fn transactions_url(&self, period: TimePeriod, symbol: &str, interval: Interval) -> String {
        format!(
            "{}/api/v1/transaction_data/latest/period/{}?symbol={}&interval={}",
            self.base_url,
            period.as_str(),
            symbol,
            interval.as_str()
        )
    }

    pub fn model_stats_url(&self, period: TimePeriod, symbol: &str, interval: Interval) -> String {
        format!(
            "{}/api/v1/aiml_tracing/latest/period/{}?symbol={}&interval={}",
            self.base_url,
            period.as_str(),
            symbol,
            interval.as_str()
        )
    }
}

/// Minimal percent-encoding for the characters our query values can carry
/// (spot_time has spaces and colons).
fn encode_query_value(value: &str) -> String {
    value.replace(' ', "%20").replace(':', "%3A")
}

/// GET a JSON array. Non-success status and malformed bodies both surface
/// as errors; the caller keeps its previous data either way.
pub async fn get_json<T: DeserializeOwned>(url: &str) -> Result<Vec<T>> {
    let response = reqwest::get(url)
        .await
        .with_context(|| format!("request failed: {url}"))?;
    let status = response.status();
    if !status.is_success() {
        bail!("API request failed with status {status}");
    }
    response
        .json::<Vec<T>>()
        .await
        .context("malformed response body")
}

/// The enrichment endpoint returns at most one record for nstep=0; a missing
/// row is a valid outcome, not an error.
pub async fn get_enrichment(url: &str) -> Result<Option<crate::models::EnrichmentRecord>> {
    Ok(get_json::<crate::models::EnrichmentRecord>(url)
        .await?
        .into_iter()
        .next())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new("http://localhost:8000/")
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        assert_eq!(client().base_url(), "http://localhost:8000");
    }

    #[test]
    fn account_url_uses_period_segment() {
        assert_eq!(
            client().account_url(TimePeriod::Days7),
            "http://localhost:8000/api/v1/account_data/latest/period/7d"
        );
    }

    #[test]
    fn market_url_carries_all_parameters() {
        let url = client().market_url("BTCUSDT", "2024-06-01", "2024-06-15", Interval::Hour1);
        assert_eq!(
            url,
            "http://localhost:8000/api/v1/market_data_tech/search/?start_datetime=2024-06-01&end_datetime=2024-06-15&symbol=BTCUSDT&interval=60"
        );
    }

    #[test]
    fn enrichment_url_encodes_spot_time() {
        let key = EnrichKey {
            timestamp: 1717200000, // 2024-06-01 00:00:00 UTC
            symbol: "BTCUSDT".into(),
            interval: "60".into(),
        };
        let url = client().enrichment_url(&key);
        assert!(url.contains("spot_time=2024-06-01%2000%3A00%3A00"));
        assert!(url.contains("nstep=0"));
        assert!(url.ends_with("&symbol=BTCUSDT&interval=60"));
    }

    #[test]
    fn log_urls() {
        assert_eq!(
            client().log_tail_url(200),
            "http://localhost:8000/api/v1/trading_log/latest/nsteps/200"
        );
        assert_eq!(
            client().log_search_url("2024-07-01", "2024-07-14"),
            "http://localhost:8000/api/v1/trading_log/search/?start_datetime=2024-07-01&end_datetime=2024-07-14"
        );
    }
}
