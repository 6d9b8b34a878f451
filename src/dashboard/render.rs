//! Filter + aggregate: the only dynamic behavior of the dashboard
//!
//! `render` is a pure function of the filter and the merged table. It never
//! mutates the table; the result borrows the surviving rows.

use chrono::NaiveDate;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use super::figure::{Figure, AVG_PNL_CHART, PNL_TIMESERIES_CHART, TOTAL_TRADES_CHART, WIN_RATE_CHART};
use super::layout::PAGE_SIZE;
use crate::data::{group_by_classification, MergedTable, MergedTradeRecord};

/// Current values of the dashboard controls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// `None` or an empty set keeps every coin
    pub coins: Option<BTreeSet<String>>,
    /// `None` or an empty set keeps every side
    pub sides: Option<BTreeSet<String>>,
}

impl FilterCriteria {
    pub fn between(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            coins: None,
            sides: None,
        }
    }

    /// Initial selection: the whole date range of the table, no other filters
    pub fn full_range(table: &MergedTable) -> Option<Self> {
        table
            .date_bounds()
            .map(|(start, end)| Self::between(start, end))
    }

    pub fn with_coins<I, S>(mut self, coins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.coins = Some(coins.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_sides<I, S>(mut self, sides: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sides = Some(sides.into_iter().map(Into::into).collect());
        self
    }

    pub fn matches(&self, record: &MergedTradeRecord) -> bool {
        let date = record.date();
        date >= self.start_date
            && date <= self.end_date
            && selected(&self.coins, record.coin())
            && selected(&self.sides, record.side())
    }
}

fn selected(filter: &Option<BTreeSet<String>>, value: &str) -> bool {
    match filter {
        Some(set) if !set.is_empty() => set.contains(value),
        _ => true,
    }
}

/// Filtered rows of the merged table, serialized in merged column order
#[derive(Debug, Clone)]
pub struct TableData<'a> {
    table: &'a MergedTable,
    rows: Vec<&'a MergedTradeRecord>,
}

impl<'a> TableData<'a> {
    pub fn rows(&self) -> &[&'a MergedTradeRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

struct RowsJson<'t, 'a>(&'t TableData<'a>);

impl Serialize for RowsJson<'_, '_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let data = self.0;
        serializer.collect_seq(data.rows.iter().map(|record| data.table.row(record)))
    }
}

impl Serialize for TableData<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("pageSize", &PAGE_SIZE)?;
        map.serialize_entry("totalRows", &self.rows.len())?;
        map.serialize_entry("rows", &RowsJson(self))?;
        map.end()
    }
}

/// All outputs of one filter change, produced from the same filtered rows
#[derive(Debug, Clone, Serialize)]
pub struct RenderResult<'a> {
    #[serde(rename = "avg-pnl-chart")]
    pub avg_pnl: Figure,
    #[serde(rename = "total-trades-chart")]
    pub total_trades: Figure,
    #[serde(rename = "pnl-timeseries")]
    pub pnl_timeseries: Figure,
    #[serde(rename = "win-rate-chart")]
    pub win_rate: Figure,
    #[serde(rename = "filtered-table")]
    pub table: TableData<'a>,
}

impl RenderResult<'_> {
    pub fn figures(&self) -> [&Figure; 4] {
        [
            &self.avg_pnl,
            &self.total_trades,
            &self.pnl_timeseries,
            &self.win_rate,
        ]
    }
}

/// Filter the merged table and rebuild every chart and the table rows
pub fn render<'a>(criteria: &FilterCriteria, table: &'a MergedTable) -> RenderResult<'a> {
    let rows: Vec<&MergedTradeRecord> = table
        .records()
        .iter()
        .filter(|record| criteria.matches(record))
        .collect();

    // Win rate is recomputed from PnL, not read from the stored flag
    let groups = group_by_classification(rows.iter().copied());

    let mut series: BTreeMap<&str, BTreeMap<NaiveDate, f64>> = BTreeMap::new();
    for record in rows.iter().copied() {
        *series
            .entry(record.classification.as_str())
            .or_default()
            .entry(record.date())
            .or_insert(0.0) += record.closed_pnl();
    }

    debug!(
        "Rendered {} of {} rows ({} classifications) for {}..{}",
        rows.len(),
        table.len(),
        groups.len(),
        criteria.start_date,
        criteria.end_date
    );

    RenderResult {
        avg_pnl: Figure::bars(
            AVG_PNL_CHART,
            groups.iter().map(|(name, stats)| (*name, stats.mean_pnl())),
        ),
        total_trades: Figure::bars(
            TOTAL_TRADES_CHART,
            groups.iter().map(|(name, stats)| (*name, stats.count as f64)),
        ),
        pnl_timeseries: Figure::lines(PNL_TIMESERIES_CHART, &series),
        win_rate: Figure::bars(
            WIN_RATE_CHART,
            groups.iter().map(|(name, stats)| (*name, stats.win_rate())),
        ),
        table: TableData { table, rows },
    }
}
