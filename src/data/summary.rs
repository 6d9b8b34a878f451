//! Per-classification aggregates over merged trades

use serde::Serialize;
use std::collections::BTreeMap;

use super::records::{is_profitable, MergedTradeRecord};

/// Running totals for one classification group
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GroupStats {
    pub count: usize,
    pub pnl_sum: f64,
    pub wins: usize,
}

impl GroupStats {
    pub fn add(&mut self, closed_pnl: f64) {
        self.count += 1;
        self.pnl_sum += closed_pnl;
        if is_profitable(closed_pnl) {
            self.wins += 1;
        }
    }

    pub fn mean_pnl(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.pnl_sum / self.count as f64
    }

    /// Fraction of profitable trades, in [0, 1]
    pub fn win_rate(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.wins as f64 / self.count as f64
    }
}

/// Group records by classification, keyed in label order
pub fn group_by_classification<'a, I>(records: I) -> BTreeMap<&'a str, GroupStats>
where
    I: IntoIterator<Item = &'a MergedTradeRecord>,
{
    let mut groups: BTreeMap<&str, GroupStats> = BTreeMap::new();
    for record in records {
        groups
            .entry(record.classification.as_str())
            .or_default()
            .add(record.closed_pnl());
    }
    groups
}

/// Static reference row computed once over the full merged table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentSummary {
    pub classification: String,
    pub avg_pnl: f64,
    pub total_pnl: f64,
    pub win_rate: f64,
    pub trade_count: usize,
}

pub fn summarize<'a, I>(records: I) -> Vec<SentimentSummary>
where
    I: IntoIterator<Item = &'a MergedTradeRecord>,
{
    group_by_classification(records)
        .into_iter()
        .map(|(classification, stats)| SentimentSummary {
            classification: classification.to_string(),
            avg_pnl: stats.mean_pnl(),
            total_pnl: stats.pnl_sum,
            win_rate: stats.win_rate(),
            trade_count: stats.count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_table;

    #[test]
    fn test_summary_matches_reference_numbers() {
        let table = sample_table();
        let summary = summarize(table.records());
        assert_eq!(summary.len(), 2);

        let fear = &summary[0];
        assert_eq!(fear.classification, "Fear");
        assert_eq!(fear.avg_pnl, 2.5);
        assert_eq!(fear.total_pnl, 5.0);
        assert_eq!(fear.win_rate, 0.5);
        assert_eq!(fear.trade_count, 2);

        let greed = &summary[1];
        assert_eq!(greed.classification, "Greed");
        assert_eq!(greed.avg_pnl, 10.0);
        assert_eq!(greed.total_pnl, 30.0);
        assert!((greed.win_rate - 0.667).abs() < 1e-3);
        assert_eq!(greed.trade_count, 3);
    }

    #[test]
    fn test_empty_input_has_no_groups() {
        let summary = summarize(std::iter::empty());
        assert!(summary.is_empty());
    }

    #[test]
    fn test_group_stats_bounds() {
        let mut all_wins = GroupStats::default();
        all_wins.add(1.0);
        all_wins.add(3.0);
        assert_eq!(all_wins.win_rate(), 1.0);

        let mut no_wins = GroupStats::default();
        no_wins.add(0.0);
        no_wins.add(-2.0);
        assert_eq!(no_wins.win_rate(), 0.0);
        assert_eq!(no_wins.mean_pnl(), -1.0);
    }
}
