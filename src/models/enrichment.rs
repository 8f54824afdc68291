use serde::Deserialize;

/// Supplemental per-timestamp model-decision annotation, fetched lazily for
/// the hovered bar and discarded when the hover moves on.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EnrichmentRecord {
    #[serde(rename = "pandl")]
    pub profit_and_loss: Option<f64>,
    pub entry_type: Option<String>,
    pub entry_price: Option<f64>,
}

/// Identity of an enrichment lookup. A response is only kept if its key
/// still equals the live hover selection when it arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichKey {
    pub timestamp: i64,
    pub symbol: String,
    pub interval: String,
}
