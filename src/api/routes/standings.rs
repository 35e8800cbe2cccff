//! Standings table, month list, top lists and period MVP.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::{
    available_months, compute_standings, filter_matches, period_mvp, top_lists, MonthFilter,
    SortColumn, SortDirection, SortState, TopLists,
};
use crate::models::PlayerStat;

#[derive(Debug, Deserialize)]
pub struct StandingsParams {
    pub month: Option<String>,
    pub sort: Option<String>,
    pub dir: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StandingsResponse {
    pub month: String,
    pub total_matches: usize,
    pub players: Vec<PlayerStat>,
}

pub async fn standings(
    State(state): State<AppState>,
    Query(params): Query<StandingsParams>,
) -> Result<Json<StandingsResponse>, ApiError> {
    let sort = parse_sort(params.sort.as_deref(), params.dir.as_deref())?;
    let filter = MonthFilter::from_param(params.month.as_deref());

    let dataset = state.dataset.read().await;
    let filtered = filter_matches(&dataset.matches, &filter);
    let mut players = compute_standings(&dataset.roster, &filtered, state.engine.streak_window);
    sort.apply(&mut players);

    Ok(Json(StandingsResponse {
        month: month_label(&filter),
        total_matches: filtered.len(),
        players,
    }))
}

#[derive(Debug, Serialize)]
pub struct MonthsResponse {
    pub months: Vec<String>,
}

pub async fn months(State(state): State<AppState>) -> Json<MonthsResponse> {
    let dataset = state.dataset.read().await;
    Json(MonthsResponse {
        months: available_months(&dataset.matches),
    })
}

#[derive(Debug, Deserialize)]
pub struct PeriodParams {
    pub month: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TopResponse {
    pub month: String,
    pub total_matches: usize,
    #[serde(flatten)]
    pub lists: TopLists,
}

pub async fn top(
    State(state): State<AppState>,
    Query(params): Query<PeriodParams>,
) -> Json<TopResponse> {
    let filter = MonthFilter::from_param(params.month.as_deref());

    let dataset = state.dataset.read().await;
    let filtered = filter_matches(&dataset.matches, &filter);
    let players = compute_standings(&dataset.roster, &filtered, state.engine.streak_window);
    let lists = top_lists(
        &players,
        filtered.len(),
        state.engine.qualification_ratio,
        state.engine.top_n,
    );

    Json(TopResponse {
        month: month_label(&filter),
        total_matches: filtered.len(),
        lists,
    })
}

#[derive(Debug, Serialize)]
pub struct MvpResponse {
    pub month: String,
    pub mvp: Option<PlayerStat>,
}

pub async fn mvp(
    State(state): State<AppState>,
    Query(params): Query<PeriodParams>,
) -> Json<MvpResponse> {
    let filter = MonthFilter::from_param(params.month.as_deref());

    let dataset = state.dataset.read().await;
    let filtered = filter_matches(&dataset.matches, &filter);
    let players = compute_standings(&dataset.roster, &filtered, state.engine.streak_window);

    Json(MvpResponse {
        month: month_label(&filter),
        mvp: period_mvp(&players).cloned(),
    })
}

fn month_label(filter: &MonthFilter) -> String {
    match filter {
        MonthFilter::All => "all".to_string(),
        MonthFilter::Month(key) => key.clone(),
    }
}

fn parse_sort(sort: Option<&str>, dir: Option<&str>) -> Result<SortState, ApiError> {
    let column = match sort {
        None => SortColumn::Points,
        Some(raw) => SortColumn::from_param(raw)
            .ok_or_else(|| ApiError::BadRequest(format!("unknown sort column: {raw}")))?,
    };
    let direction = match dir {
        None => SortDirection::Desc,
        Some("asc") => SortDirection::Asc,
        Some("desc") => SortDirection::Desc,
        Some(other) => {
            return Err(ApiError::BadRequest(format!(
                "sort direction must be asc or desc, got {other}"
            )))
        }
    };
    Ok(SortState::new(column, direction))
}
