//! Affinity analyzer: who a player wins and loses with.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::models::{AffinityEntry, AffinityReport, MatchRecord};

/// Partners shown per list.
pub const PARTNER_LIMIT: usize = 3;

/// Co-occurrence stats for one player over the full match history.
///
/// For every match the subject played, each other participant gets a win
/// counted when both won and a loss counted when both lost; mixed outcomes
/// count for neither side. Teammates with no shared outcome at all are
/// dropped before ranking.
pub fn affinity_report(player: &str, matches: &[MatchRecord]) -> AffinityReport {
    // BTreeMap so rate/count ties fall back to name order.
    let mut mates: BTreeMap<&str, (u32, u32)> = BTreeMap::new();

    for m in matches {
        let Some(mine) = m.results.get(player) else {
            continue;
        };
        for (mate, theirs) in &m.results {
            if mate == player {
                continue;
            }
            let entry = mates.entry(mate.as_str()).or_default();
            match (mine.is_win(), theirs.is_win()) {
                (true, true) => entry.0 += 1,
                (false, false) => entry.1 += 1,
                _ => {}
            }
        }
    }

    let candidates: Vec<AffinityEntry> = mates
        .into_iter()
        .filter(|(_, (won, lost))| won + lost > 0)
        .map(|(name, (won, lost))| AffinityEntry {
            name: name.to_string(),
            won,
            lost,
        })
        .collect();

    let mut best = candidates.clone();
    best.sort_by(|a, b| {
        b.win_rate()
            .partial_cmp(&a.win_rate())
            .unwrap_or(Ordering::Equal)
            .then(b.won.cmp(&a.won))
    });
    best.truncate(PARTNER_LIMIT);

    let mut worst = candidates;
    worst.sort_by(|a, b| {
        b.loss_rate()
            .partial_cmp(&a.loss_rate())
            .unwrap_or(Ordering::Equal)
            .then(b.lost.cmp(&a.lost))
    });
    worst.truncate(PARTNER_LIMIT);

    AffinityReport {
        player: player.to_string(),
        best,
        worst,
    }
}
