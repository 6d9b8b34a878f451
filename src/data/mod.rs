//! Data layer - loading, joining and summarizing the two input datasets
//!
//! - CSV loading of the fear/greed index and the trade log
//! - Day-level join of trades to sentiment
//! - Per-classification aggregates

pub mod records;
pub mod loader;
pub mod merge;
pub mod summary;

// Re-export commonly used types
pub use records::{is_profitable, MergedTable, MergedTradeRecord, RowView, SentimentRecord, TradeRecord, TradeTable};
pub use loader::{load_sentiment, load_trades, parse_calendar_day, read_sentiment, read_trades, timestamp_span};
pub use merge::merge_trades;
pub use summary::{group_by_classification, summarize, GroupStats, SentimentSummary};
