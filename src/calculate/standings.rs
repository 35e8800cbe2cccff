//! Stat aggregator: fold a match subset into per-player counters.

use std::collections::HashMap;

use crate::models::{MatchRecord, PlayerStat, Roster};

/// Compute per-player standings over `matches`, one record per roster
/// player (zero-played players included), returned in roster order.
///
/// Matches are processed in ascending chronological order regardless of
/// input order; that ordering is what gives the streak its direction.
/// Unknown dates sort before every known date, stable among themselves.
pub fn compute_standings(
    roster: &Roster,
    matches: &[MatchRecord],
    streak_window: usize,
) -> Vec<PlayerStat> {
    let mut stats: Vec<PlayerStat> = roster
        .names()
        .map(|n| PlayerStat::new(n.to_string()))
        .collect();
    let index: HashMap<String, usize> = stats
        .iter()
        .enumerate()
        .map(|(i, s)| (s.name.clone(), i))
        .collect();

    // One running result sequence per player; the streak is its tail.
    let mut sequences: Vec<Vec<char>> = vec![Vec::new(); stats.len()];

    let mut ordered: Vec<&MatchRecord> = matches.iter().collect();
    ordered.sort_by_key(|m| m.date);

    for m in ordered {
        for (name, outcome) in &m.results {
            let Some(&i) = index.get(name.as_str()) else {
                // Result for a name that is not on the roster; the parser
                // never produces this, but a hand-built subset might.
                continue;
            };
            let stat = &mut stats[i];
            stat.played += 1;
            stat.points += outcome.points();
            if outcome.is_win() {
                stat.won += 1;
            }
            sequences[i].push(outcome.symbol());
        }
    }

    for (stat, seq) in stats.iter_mut().zip(sequences) {
        stat.percentage = if stat.played > 0 {
            stat.won as f64 / stat.played as f64 * 100.0
        } else {
            0.0
        };
        let skip = seq.len().saturating_sub(streak_window);
        stat.streak = seq[skip..].to_vec();
    }

    stats
}
