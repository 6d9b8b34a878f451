use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::context::DashboardContext;
use crate::dashboard::{DashboardLayout, FilterCriteria, RenderResult};
use crate::data::{parse_calendar_day, SentimentSummary};
use crate::error::ApiError;

/// Control values as sent by the browser
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterRequest {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(default)]
    pub coins: Option<Vec<String>>,
    #[serde(default)]
    pub sides: Option<Vec<String>>,
}

impl FilterRequest {
    pub fn into_criteria(self) -> Result<FilterCriteria, ApiError> {
        let start_date = required_day(self.start_date.as_deref(), "start_date")?;
        let end_date = required_day(self.end_date.as_deref(), "end_date")?;

        Ok(FilterCriteria {
            start_date,
            end_date,
            coins: self.coins.map(|c| c.into_iter().collect::<BTreeSet<_>>()),
            sides: self.sides.map(|s| s.into_iter().collect::<BTreeSet<_>>()),
        })
    }
}

fn required_day(raw: Option<&str>, field: &str) -> Result<chrono::NaiveDate, ApiError> {
    let raw = raw.ok_or_else(|| ApiError::InvalidFilter(format!("{field} is required")))?;
    parse_calendar_day(raw)
        .ok_or_else(|| ApiError::InvalidFilter(format!("{field} '{raw}' is not a date")))
}

/// Messages from the browser over the WebSocket
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ClientMessage {
    Filter(FilterRequest),
    Layout,
    Summary,
}

/// Messages to the browser over the WebSocket
#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum WsMessage<'a> {
    Layout(&'a DashboardLayout),
    Render(RenderResult<'a>),
    Summary { summary: &'a [SentimentSummary] },
    Error { message: String },
}

/// Shared application state
pub struct AppState {
    pub context: DashboardContext,
}

impl AppState {
    pub fn new(context: DashboardContext) -> Self {
        Self { context }
    }
}
