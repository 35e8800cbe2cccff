//! Per-player detail: season stats plus partner affinity.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::{affinity_report, compute_standings};
use crate::models::{AffinityEntry, PlayerStat};

#[derive(Debug, Serialize)]
pub struct PlayerDetailResponse {
    pub player: String,
    /// Season-to-date counters, unfiltered: affinity is historical.
    pub stats: PlayerStat,
    pub best: Vec<AffinityEntry>,
    pub worst: Vec<AffinityEntry>,
}

pub async fn affinity(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<PlayerDetailResponse>, ApiError> {
    let dataset = state.dataset.read().await;
    if !dataset.roster.contains(&name) {
        return Err(ApiError::NotFound(format!("player {name}")));
    }

    let standings = compute_standings(
        &dataset.roster,
        &dataset.matches,
        state.engine.streak_window,
    );
    let stats = standings
        .into_iter()
        .find(|s| s.name == name)
        .unwrap_or_else(|| PlayerStat::new(name.clone()));

    let report = affinity_report(&name, &dataset.matches);

    Ok(Json(PlayerDetailResponse {
        player: report.player,
        stats,
        best: report.best,
        worst: report.worst,
    }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::api::build_router;
    use crate::api::routes::testutil::{get_json, state_from_csv, SAMPLE_CSV};

    #[tokio::test]
    async fn test_affinity_lists() {
        let app = build_router(state_from_csv(SAMPLE_CSV));
        let (status, json) = get_json(app, "/api/players/Ana/affinity").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["player"], "Ana");
        assert_eq!(json["stats"]["played"], 4);
        assert_eq!(json["stats"]["won"], 3);

        // Carla co-won twice with Ana, Dana once; both never co-lost.
        assert_eq!(json["best"][0]["name"], "Carla");
        assert_eq!(json["best"][0]["won"], 2);
        assert_eq!(json["best"][1]["name"], "Dana");
        assert_eq!(json["best"][1]["won"], 1);
    }

    #[tokio::test]
    async fn test_unknown_player_is_404() {
        let app = build_router(state_from_csv(SAMPLE_CSV));
        let (status, json) = get_json(app, "/api/players/Nadie/affinity").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_player_with_no_shared_outcomes() {
        // Two players who only ever faced each other: no co-wins/co-losses.
        let csv = "Num,Date,Count,Ana,Bea\n1,2025-01-10,2,2,1\n";
        let app = build_router(state_from_csv(csv));
        let (status, json) = get_json(app, "/api/players/Ana/affinity").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["best"].as_array().unwrap().len(), 0);
        assert_eq!(json["worst"].as_array().unwrap().len(), 0);
    }
}
