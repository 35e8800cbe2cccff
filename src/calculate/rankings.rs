//! Month filtering, qualification, top lists, MVP and table sorting.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::{MatchRecord, PlayerStat};

/// Which match subset a view is computed over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthFilter {
    /// The whole season, unknown dates included.
    All,
    /// One `YYYY-MM` bucket; matches with unknown dates never qualify.
    Month(String),
}

impl MonthFilter {
    /// `None`, empty or `"all"` select the whole season.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            None | Some("") | Some("all") => MonthFilter::All,
            Some(month) => MonthFilter::Month(month.to_string()),
        }
    }

    pub fn includes(&self, m: &MatchRecord) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Month(key) => m.month_key().as_deref() == Some(key),
        }
    }
}

/// Matches selected by the filter, in source order.
pub fn filter_matches(matches: &[MatchRecord], filter: &MonthFilter) -> Vec<MatchRecord> {
    matches.iter().filter(|m| filter.includes(m)).cloned().collect()
}

/// Distinct month keys present in the data, newest first. Unknown dates
/// contribute nothing.
pub fn available_months(matches: &[MatchRecord]) -> Vec<String> {
    let months: BTreeSet<String> = matches.iter().filter_map(|m| m.month_key()).collect();
    months.into_iter().rev().collect()
}

/// Matches-played floor for top-list qualification: a share of the
/// filtered match count, recomputed per filter selection.
pub fn qualification_threshold(match_count: usize, ratio: f64) -> f64 {
    match_count as f64 * ratio
}

/// The three top lists plus the threshold they were computed with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopLists {
    pub threshold: f64,
    pub points: Vec<PlayerStat>,
    pub played: Vec<PlayerStat>,
    pub percentage: Vec<PlayerStat>,
}

/// Build the top-N lists. `stats` must be in roster order: stable sorts
/// keep that order as the tie-break, so output is deterministic.
pub fn top_lists(
    stats: &[PlayerStat],
    match_count: usize,
    ratio: f64,
    top_n: usize,
) -> TopLists {
    let threshold = qualification_threshold(match_count, ratio);
    let qualified: Vec<&PlayerStat> = stats
        .iter()
        .filter(|p| p.played as f64 >= threshold)
        .collect();

    let take = |mut ranked: Vec<&PlayerStat>| -> Vec<PlayerStat> {
        ranked.truncate(top_n);
        ranked.into_iter().cloned().collect()
    };

    let mut by_points = qualified.clone();
    by_points.sort_by(|a, b| b.points.cmp(&a.points));

    let mut by_played = qualified.clone();
    by_played.sort_by(|a, b| b.played.cmp(&a.played));

    let mut by_percentage = qualified;
    by_percentage.sort_by(|a, b| {
        b.percentage
            .partial_cmp(&a.percentage)
            .unwrap_or(Ordering::Equal)
    });

    TopLists {
        threshold,
        points: take(by_points),
        played: take(by_played),
        percentage: take(by_percentage),
    }
}

/// Best player of the current selection: highest points, roster order on
/// ties. Nothing is awarded when nobody scored.
pub fn period_mvp(stats: &[PlayerStat]) -> Option<&PlayerStat> {
    let mvp = stats.iter().max_by(|a, b| {
        // max_by keeps the later of equal elements; invert equal ties so
        // the earlier roster entry wins.
        match a.points.cmp(&b.points) {
            Ordering::Equal => Ordering::Greater,
            other => other,
        }
    })?;
    (mvp.points > 0).then_some(mvp)
}

/// Sortable standings columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortColumn {
    Name,
    Played,
    Won,
    Points,
    Percentage,
}

impl SortColumn {
    pub fn from_param(param: &str) -> Option<Self> {
        match param {
            "name" => Some(SortColumn::Name),
            "played" => Some(SortColumn::Played),
            "won" => Some(SortColumn::Won),
            "points" => Some(SortColumn::Points),
            "percentage" => Some(SortColumn::Percentage),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Current table sort. Clicking a new column sorts it descending;
/// clicking the active column flips the direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            column: SortColumn::Points,
            direction: SortDirection::Desc,
        }
    }
}

impl SortState {
    pub fn new(column: SortColumn, direction: SortDirection) -> Self {
        Self { column, direction }
    }

    pub fn toggle(&mut self, column: SortColumn) {
        if self.column == column {
            self.direction = match self.direction {
                SortDirection::Asc => SortDirection::Desc,
                SortDirection::Desc => SortDirection::Asc,
            };
        } else {
            self.column = column;
            self.direction = SortDirection::Desc;
        }
    }

    /// Sort the table in place. Name compares lexicographically, every
    /// other column numerically; the sort is stable.
    pub fn apply(&self, stats: &mut [PlayerStat]) {
        stats.sort_by(|a, b| {
            let ordering = match self.column {
                SortColumn::Name => a.name.cmp(&b.name),
                SortColumn::Played => a.played.cmp(&b.played),
                SortColumn::Won => a.won.cmp(&b.won),
                SortColumn::Points => a.points.cmp(&b.points),
                SortColumn::Percentage => a
                    .percentage
                    .partial_cmp(&b.percentage)
                    .unwrap_or(Ordering::Equal),
            };
            match self.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }
}
