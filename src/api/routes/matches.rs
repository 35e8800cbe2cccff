//! Match history, newest first.

use std::cmp::Reverse;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::models::MatchRecord;

#[derive(Debug, Serialize)]
pub struct MatchSummary {
    pub id: String,
    /// ISO date, or null when the sheet's date cell was unreadable.
    pub date: Option<String>,
    pub expected_count: Option<u32>,
    pub winners: Vec<String>,
    pub losers: Vec<String>,
}

impl From<&MatchRecord> for MatchSummary {
    fn from(m: &MatchRecord) -> Self {
        Self {
            id: m.id.clone(),
            date: m.date.map(|d| d.format("%Y-%m-%d").to_string()),
            expected_count: m.expected_count,
            winners: m.winners().iter().map(|s| s.to_string()).collect(),
            losers: m.losers().iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub matches: Vec<MatchSummary>,
}

pub async fn history(State(state): State<AppState>) -> Json<HistoryResponse> {
    let dataset = state.dataset.read().await;

    let mut ordered: Vec<&MatchRecord> = dataset.matches.iter().collect();
    // Newest first; unknown dates have no defined position and go last.
    ordered.sort_by_key(|m| Reverse(m.date));

    Json(HistoryResponse {
        matches: ordered.into_iter().map(MatchSummary::from).collect(),
    })
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::api::build_router;
    use crate::api::routes::testutil::{get_json, state_from_csv, SAMPLE_CSV};

    #[tokio::test]
    async fn test_history_newest_first_unknown_last() {
        let app = build_router(state_from_csv(SAMPLE_CSV));
        let (status, json) = get_json(app, "/api/matches").await;

        assert_eq!(status, StatusCode::OK);
        let ids: Vec<&str> = json["matches"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["3", "2", "1", "4"]);

        let latest = &json["matches"][0];
        assert_eq!(latest["date"], "2025-02-07");
        assert_eq!(latest["winners"], serde_json::json!(["Bea", "Dana"]));
        assert_eq!(latest["losers"], serde_json::json!(["Ana"]));

        let undated = &json["matches"][3];
        assert!(undated["date"].is_null());
    }

    #[tokio::test]
    async fn test_history_empty() {
        let app = build_router(state_from_csv(""));
        let (status, json) = get_json(app, "/api/matches").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["matches"].as_array().unwrap().len(), 0);
    }
}
