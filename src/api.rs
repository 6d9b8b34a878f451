use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::dashboard::{render, DashboardLayout};
use crate::data::SentimentSummary;
use crate::error::ApiError;
use crate::types::{AppState, FilterRequest};

/// GET /api/layout - Page structure and control options
pub async fn get_layout(State(state): State<Arc<AppState>>) -> Json<DashboardLayout> {
    Json(state.context.layout.clone())
}

/// GET /api/summary - Per-classification aggregates over all merged trades
pub async fn get_summary(State(state): State<Arc<AppState>>) -> Json<Vec<SentimentSummary>> {
    Json(state.context.summary.clone())
}

/// POST /api/dashboard - Charts and table rows for the given filters
pub async fn post_dashboard(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FilterRequest>,
) -> Result<Response, ApiError> {
    let criteria = request.into_criteria()?;
    // Serialized here so the response does not borrow the shared table
    let response = Json(render(&criteria, &state.context.table)).into_response();
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::DashboardContext;
    use crate::test_support::sample_table;
    use axum::http::StatusCode;
    use serde_json::Value;

    fn state() -> Arc<AppState> {
        Arc::new(AppState::new(DashboardContext::from_table(sample_table())))
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn request(start: &str, end: &str, coins: Option<Vec<&str>>) -> FilterRequest {
        FilterRequest {
            start_date: Some(start.to_string()),
            end_date: Some(end.to_string()),
            coins: coins.map(|c| c.into_iter().map(String::from).collect()),
            sides: None,
        }
    }

    #[tokio::test]
    async fn test_layout_endpoint() {
        let Json(layout) = get_layout(State(state())).await;
        assert_eq!(layout.table.id, "filtered-table");
        assert_eq!(layout.coin_dropdown.options, vec!["BTC", "ETH", "SOL"]);
    }

    #[tokio::test]
    async fn test_summary_endpoint() {
        let Json(summary) = get_summary(State(state())).await;
        let classes: Vec<&str> = summary.iter().map(|s| s.classification.as_str()).collect();
        assert_eq!(classes, vec!["Fear", "Greed"]);
    }

    #[tokio::test]
    async fn test_dashboard_endpoint() {
        let response = post_dashboard(State(state()), Json(request("2024-01-01", "2024-01-02", None)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["filtered-table"]["totalRows"], 5);
        assert_eq!(json["avg-pnl-chart"]["traces"].as_array().unwrap().len(), 2);
        assert_eq!(json["pnl-timeseries"]["kind"], "line");
    }

    #[tokio::test]
    async fn test_dashboard_unknown_coin_is_empty() {
        let response = post_dashboard(
            State(state()),
            Json(request("2024-01-01", "2024-01-02", Some(vec!["DOGE"]))),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["filtered-table"]["totalRows"], 0);
        for id in ["avg-pnl-chart", "total-trades-chart", "pnl-timeseries", "win-rate-chart"] {
            assert!(json[id]["traces"].as_array().unwrap().is_empty(), "{id}");
        }
    }

    #[tokio::test]
    async fn test_dashboard_bad_date_is_400() {
        let err = post_dashboard(State(state()), Json(request("2024-13-45", "2024-01-02", None)))
            .await
            .unwrap_err();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("start_date"));
    }
}
