mod account;
mod enrichment;
mod logs;
mod market;
mod model_stats;
mod period;
mod transaction;

pub use account::{AccountPoint, BalanceSummary, balance_points};
pub use enrichment::{EnrichKey, EnrichmentRecord};
pub use logs::{LevelFilter, LogEntry, LogLevel, ScrollTracker, filter_entries, sort_entries};
pub use market::{PricePoint, TechRecord, prepare_series};
pub use model_stats::{MetricKind, ModelTracePoint, VARIANT_COUNT, variant_series};
pub use period::{Interval, TimePeriod};
pub use transaction::{PlTotals, TransactionRecord, pl_totals, transaction_points};
