//! Chart figures sent to the browser

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
}

/// Static description of one graph slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartSpec {
    pub id: &'static str,
    pub title: &'static str,
    pub kind: ChartKind,
    #[serde(rename = "xLabel")]
    pub x_label: &'static str,
    #[serde(rename = "yLabel")]
    pub y_label: &'static str,
}

pub const AVG_PNL_CHART: ChartSpec = ChartSpec {
    id: "avg-pnl-chart",
    title: "Average PnL by Sentiment",
    kind: ChartKind::Bar,
    x_label: "classification",
    y_label: "Closed PnL",
};

pub const TOTAL_TRADES_CHART: ChartSpec = ChartSpec {
    id: "total-trades-chart",
    title: "Total Trades by Sentiment",
    kind: ChartKind::Bar,
    x_label: "classification",
    y_label: "Trade Count",
};

pub const PNL_TIMESERIES_CHART: ChartSpec = ChartSpec {
    id: "pnl-timeseries",
    title: "PnL Over Time by Sentiment",
    kind: ChartKind::Line,
    x_label: "date",
    y_label: "Closed PnL",
};

pub const WIN_RATE_CHART: ChartSpec = ChartSpec {
    id: "win-rate-chart",
    title: "Win Rate by Sentiment",
    kind: ChartKind::Bar,
    x_label: "classification",
    y_label: "Win Rate",
};

/// Graph slots in page order
pub const CHARTS: [ChartSpec; 4] = [
    AVG_PNL_CHART,
    TOTAL_TRADES_CHART,
    PNL_TIMESERIES_CHART,
    WIN_RATE_CHART,
];

/// One colored series, named after its classification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub name: String,
    pub x: Vec<String>,
    pub y: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    #[serde(flatten)]
    pub spec: ChartSpec,
    pub traces: Vec<Trace>,
}

impl Figure {
    /// One single-bar trace per group, colored by classification
    pub fn bars<'a, I>(spec: ChartSpec, groups: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let traces = groups
            .into_iter()
            .map(|(name, value)| Trace {
                name: name.to_string(),
                x: vec![name.to_string()],
                y: vec![value],
            })
            .collect();
        Self { spec, traces }
    }

    /// One date-ordered line per classification
    pub fn lines(spec: ChartSpec, series: &BTreeMap<&str, BTreeMap<NaiveDate, f64>>) -> Self {
        let traces = series
            .iter()
            .map(|(name, points)| Trace {
                name: name.to_string(),
                x: points.keys().map(|d| d.format("%Y-%m-%d").to_string()).collect(),
                y: points.values().copied().collect(),
            })
            .collect();
        Self { spec, traces }
    }
}

#[cfg(test)]
impl Figure {
    /// Classification names plotted in this figure
    pub fn groups(&self) -> Vec<&str> {
        self.traces.iter().map(|t| t.name.as_str()).collect()
    }

    /// Value of a single-bar trace
    pub fn value_of(&self, group: &str) -> Option<f64> {
        self.traces
            .iter()
            .find(|t| t.name == group)
            .and_then(|t| t.y.first().copied())
    }
}
