use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::info;

use super::records::{is_profitable, MergedTable, MergedTradeRecord, SentimentRecord, TradeTable};

/// Join trades to the sentiment of their trade date.
///
/// Trades whose day has no sentiment record are dropped, the rest keep
/// their original order.
pub fn merge_trades(trades: TradeTable, sentiment: &[SentimentRecord]) -> MergedTable {
    let by_day: HashMap<NaiveDate, &str> = sentiment
        .iter()
        .map(|s| (s.date, s.classification.as_str()))
        .collect();

    let total = trades.records.len();
    let records: Vec<MergedTradeRecord> = trades
        .records
        .into_iter()
        .filter_map(|trade| {
            let classification = by_day.get(&trade.date)?.to_string();
            let profitable = is_profitable(trade.closed_pnl);
            Some(MergedTradeRecord {
                trade,
                classification,
                profitable,
            })
        })
        .collect();

    info!(
        "Merged {} of {} trades with sentiment ({} without a classification dropped)",
        records.len(),
        total,
        total - records.len()
    );

    MergedTable::new(&trades.columns, trades.pnl_index, records)
}
