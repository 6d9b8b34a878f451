//! Static page structure derived from the merged table

use chrono::NaiveDate;
use serde::Serialize;

use super::figure::{ChartSpec, CHARTS};
use crate::data::MergedTable;

pub const PAGE_TITLE: &str = "Sentiment-Based Trader Dashboard";
pub const HEADING: &str = "Trader Performance vs Market Sentiment";
pub const TABLE_HEADING: &str = "Filtered Trade Data";
pub const DATE_DISPLAY_FORMAT: &str = "YYYY-MM-DD";
pub const PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateRangeControl {
    pub id: &'static str,
    pub label: &'static str,
    #[serde(rename = "minDate")]
    pub min_date: Option<NaiveDate>,
    #[serde(rename = "maxDate")]
    pub max_date: Option<NaiveDate>,
    #[serde(rename = "startDate")]
    pub start_date: Option<NaiveDate>,
    #[serde(rename = "endDate")]
    pub end_date: Option<NaiveDate>,
    #[serde(rename = "displayFormat")]
    pub display_format: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropdownControl {
    pub id: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub multi: bool,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableLayout {
    pub id: &'static str,
    pub heading: &'static str,
    pub columns: Vec<String>,
    #[serde(rename = "pageSize")]
    pub page_size: usize,
}

/// Everything the browser needs to build the page, no data rows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardLayout {
    pub title: &'static str,
    pub heading: &'static str,
    #[serde(rename = "dateRange")]
    pub date_range: DateRangeControl,
    #[serde(rename = "coinDropdown")]
    pub coin_dropdown: DropdownControl,
    #[serde(rename = "sideDropdown")]
    pub side_dropdown: DropdownControl,
    pub graphs: Vec<ChartSpec>,
    pub table: TableLayout,
}

impl DashboardLayout {
    pub fn from_table(table: &MergedTable) -> Self {
        let bounds = table.date_bounds();
        let min_date = bounds.map(|(min, _)| min);
        let max_date = bounds.map(|(_, max)| max);

        Self {
            title: PAGE_TITLE,
            heading: HEADING,
            date_range: DateRangeControl {
                id: "date-range",
                label: "Select Date Range:",
                min_date,
                max_date,
                start_date: min_date,
                end_date: max_date,
                display_format: DATE_DISPLAY_FORMAT,
            },
            coin_dropdown: DropdownControl {
                id: "coin-dropdown",
                label: "Select Coin:",
                placeholder: "Filter by coin",
                multi: true,
                options: table.coins(),
            },
            side_dropdown: DropdownControl {
                id: "side-dropdown",
                label: "Select Trade Side:",
                placeholder: "Filter by side",
                multi: true,
                options: table.sides(),
            },
            graphs: CHARTS.to_vec(),
            table: TableLayout {
                id: "filtered-table",
                heading: TABLE_HEADING,
                columns: table.columns().to_vec(),
                page_size: PAGE_SIZE,
            },
        }
    }
}
