//! Startup state shared read-only by every handler

use std::path::Path;
use tracing::info;

use crate::dashboard::DashboardLayout;
use crate::data::{load_sentiment, load_trades, merge_trades, summarize, MergedTable, SentimentSummary};
use crate::error::LoadError;

/// Merged table plus everything precomputed from it
#[derive(Debug, Clone)]
pub struct DashboardContext {
    pub table: MergedTable,
    pub summary: Vec<SentimentSummary>,
    pub layout: DashboardLayout,
}

impl DashboardContext {
    pub fn from_table(table: MergedTable) -> Self {
        let summary = summarize(table.records());
        let layout = DashboardLayout::from_table(&table);
        Self {
            table,
            summary,
            layout,
        }
    }

    /// Load both datasets and build the merged view
    pub fn load(sentiment_path: &Path, trades_path: &Path) -> Result<Self, LoadError> {
        let sentiment = load_sentiment(sentiment_path)?;
        let trades = load_trades(trades_path)?;
        let context = Self::from_table(merge_trades(trades, &sentiment));

        for row in &context.summary {
            info!(
                "{:>14}: {:>7} trades, avg PnL {:>10.2}, total PnL {:>12.2}, win rate {:.1}%",
                row.classification,
                row.trade_count,
                row.avg_pnl,
                row.total_pnl,
                row.win_rate * 100.0
            );
        }

        Ok(context)
    }
}
