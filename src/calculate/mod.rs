//! Statistics calculation engine.
//!
//! Pure functions over the loaded dataset:
//! - Per-player standings, points and streaks
//! - Month filtering, qualification thresholds and top lists
//! - Partner affinity analysis
//! - Ad-hoc team (winner/loser set) aggregation
//! - Balanced team generation via snake draft
//!
//! Nothing in here caches or mutates shared state; every view is
//! recomputed from the current matches, roster and filter on each request.

pub mod affinity;
pub mod balance;
pub mod rankings;
pub mod standings;
pub mod teams;

pub use affinity::{affinity_report, PARTNER_LIMIT};
pub use balance::{generate_teams, BalanceError};
pub use rankings::{
    available_months, filter_matches, period_mvp, qualification_threshold, top_lists,
    MonthFilter, SortColumn, SortDirection, SortState, TopLists,
};
pub use standings::compute_standings;
pub use teams::{team_stats, TeamStatsReport};

/// Share of the filtered match count a player must have played to appear
/// in the top lists.
pub const QUALIFICATION_RATIO: f64 = 0.25;

/// How many recent results a streak shows.
pub const STREAK_WINDOW: usize = 5;

/// Entries per top list.
pub const TOP_N: usize = 5;

/// Weight of each win in the team-generation fairness score.
pub const WIN_SCORE_WEIGHT: f64 = 1.5;
