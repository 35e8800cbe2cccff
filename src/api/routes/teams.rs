//! Ad-hoc team stats and balanced team generation.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::{
    compute_standings, filter_matches, generate_teams, team_stats, MonthFilter, TeamStatsReport,
};
use crate::models::TeamDraft;

#[derive(Debug, Deserialize)]
pub struct TeamsParams {
    pub month: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TeamsResponse {
    pub month: String,
    #[serde(flatten)]
    pub report: TeamStatsReport,
}

pub async fn teams(
    State(state): State<AppState>,
    Query(params): Query<TeamsParams>,
) -> Json<TeamsResponse> {
    let filter = MonthFilter::from_param(params.month.as_deref());

    let dataset = state.dataset.read().await;
    let filtered = filter_matches(&dataset.matches, &filter);
    let report = team_stats(&filtered);

    Json(TeamsResponse {
        month: match &filter {
            MonthFilter::All => "all".to_string(),
            MonthFilter::Month(key) => key.clone(),
        },
        report,
    })
}

#[derive(Debug, Deserialize)]
pub struct BalanceRequest {
    pub players: Vec<String>,
}

pub async fn balance(
    State(state): State<AppState>,
    Json(request): Json<BalanceRequest>,
) -> Result<Json<TeamDraft>, ApiError> {
    let dataset = state.dataset.read().await;
    // Drafting always weighs season-to-date form, never a month slice.
    let standings = compute_standings(
        &dataset.roster,
        &dataset.matches,
        state.engine.streak_window,
    );

    let draft = generate_teams(&request.players, &standings, state.engine.win_score_weight)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    Ok(Json(draft))
}
