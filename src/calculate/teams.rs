//! Ad-hoc team aggregation: the exact winner and loser sets of each match.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{MatchRecord, TeamGroup};

/// Most-winning and most-losing team groups of a match subset. Either is
/// absent when no match produced a group for that side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamStatsReport {
    pub best: Option<TeamGroup>,
    pub worst: Option<TeamGroup>,
}

/// Group matches by their exact winner set and loser set. The key is the
/// sorted comma-joined member list, so row order never splits a group; the
/// same set of names can accumulate wins and losses across matches.
pub fn team_stats(matches: &[MatchRecord]) -> TeamStatsReport {
    let mut groups: BTreeMap<String, TeamGroup> = BTreeMap::new();

    for m in matches {
        // winners()/losers() come out of a BTreeMap, already name-sorted.
        let winners = m.winners();
        if !winners.is_empty() {
            groups
                .entry(winners.join(","))
                .or_insert_with(|| TeamGroup {
                    players: winners.iter().map(|s| s.to_string()).collect(),
                    won: 0,
                    lost: 0,
                })
                .won += 1;
        }

        let losers = m.losers();
        if !losers.is_empty() {
            groups
                .entry(losers.join(","))
                .or_insert_with(|| TeamGroup {
                    players: losers.iter().map(|s| s.to_string()).collect(),
                    won: 0,
                    lost: 0,
                })
                .lost += 1;
        }
    }

    let best = groups
        .values()
        .max_by(|a, b| {
            keep_first_on_tie(
                a.won
                    .cmp(&b.won)
                    .then_with(|| ratio_cmp(a.win_ratio(), b.win_ratio())),
            )
        })
        .cloned();

    let worst = groups
        .values()
        .max_by(|a, b| {
            keep_first_on_tie(
                a.lost
                    .cmp(&b.lost)
                    .then_with(|| ratio_cmp(a.loss_ratio(), b.loss_ratio())),
            )
        })
        .cloned();

    TeamStatsReport { best, worst }
}

fn ratio_cmp(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// `max_by` keeps the later of equal elements; treating ties as Greater
/// keeps the earlier (key-ordered) group instead, making selection
/// deterministic under input permutation.
fn keep_first_on_tie(ordering: Ordering) -> Ordering {
    match ordering {
        Ordering::Equal => Ordering::Greater,
        other => other,
    }
}
