//! Data reload: re-fetch the sheet and swap the dataset wholesale.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::{error, info};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::parse::parse_grid;

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub matches: usize,
    pub players: usize,
}

pub async fn refresh(State(state): State<AppState>) -> Result<Json<RefreshResponse>, ApiError> {
    let grid = state.source.load().await.map_err(|e| {
        error!(source = %state.source.describe(), error = %e, "refresh failed");
        ApiError::Internal(e.to_string())
    })?;

    let dataset = parse_grid(&grid);
    let response = RefreshResponse {
        matches: dataset.matches.len(),
        players: dataset.roster.len(),
    };
    info!(
        matches = response.matches,
        players = response.players,
        "dataset reloaded"
    );

    *state.dataset.write().await = dataset;
    Ok(Json(response))
}
