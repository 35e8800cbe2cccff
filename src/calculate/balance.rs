//! Balanced team generation via snake draft.

use std::cmp::Ordering;
use std::collections::HashMap;

use thiserror::Error;

use crate::models::{DraftPick, PlayerStat, TeamDraft};

/// Validation failures for team generation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BalanceError {
    #[error("need at least 2 selected players, got {0}")]
    NotEnoughPlayers(usize),
}

/// Split the selected players into two teams balanced by season-to-date
/// form.
///
/// Each player scores `percentage + won × win_weight`; a selected name
/// with no recorded matches scores 0. Players are ranked by score
/// (selection order breaks ties) and dealt in pairs, alternating which
/// team picks first. The snake keeps both team sizes within one and the
/// cumulative scores close.
pub fn generate_teams(
    selected: &[String],
    standings: &[PlayerStat],
    win_weight: f64,
) -> Result<TeamDraft, BalanceError> {
    if selected.len() < 2 {
        return Err(BalanceError::NotEnoughPlayers(selected.len()));
    }

    let by_name: HashMap<&str, &PlayerStat> =
        standings.iter().map(|s| (s.name.as_str(), s)).collect();

    let mut picks: Vec<DraftPick> = selected
        .iter()
        .map(|name| match by_name.get(name.as_str()) {
            Some(stat) => DraftPick {
                name: name.clone(),
                percentage: stat.percentage,
                won: stat.won,
                score: stat.percentage + stat.won as f64 * win_weight,
            },
            None => DraftPick {
                name: name.clone(),
                percentage: 0.0,
                won: 0,
                score: 0.0,
            },
        })
        .collect();

    picks.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    let mut team_a = Vec::new();
    let mut team_b = Vec::new();
    for (i, pick) in picks.into_iter().enumerate() {
        let pair = i / 2;
        let first_of_pair = i % 2 == 0;
        // Even pairs deal A then B, odd pairs B then A.
        if (pair % 2 == 0) == first_of_pair {
            team_a.push(pick);
        } else {
            team_b.push(pick);
        }
    }

    let average_a = average_percentage(&team_a);
    let average_b = average_percentage(&team_b);

    Ok(TeamDraft {
        team_a,
        team_b,
        average_a,
        average_b,
    })
}

fn average_percentage(team: &[DraftPick]) -> f64 {
    if team.is_empty() {
        0.0
    } else {
        team.iter().map(|p| p.percentage).sum::<f64>() / team.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate::WIN_SCORE_WEIGHT;

    fn stat(name: &str, percentage: f64, won: u32) -> PlayerStat {
        PlayerStat {
            name: name.to_string(),
            played: won.max(1),
            won,
            points: 0,
            percentage,
            streak: Vec::new(),
        }
    }

    fn names(team: &[DraftPick]) -> Vec<&str> {
        team.iter().map(|p| p.name.as_str()).collect()
    }

    fn select(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_snake_draft_four_players() {
        // Scores 90/80/70/60 with zero wins so percentage is the score.
        let standings = vec![
            stat("P90", 90.0, 0),
            stat("P80", 80.0, 0),
            stat("P70", 70.0, 0),
            stat("P60", 60.0, 0),
        ];
        let draft = generate_teams(
            &select(&["P60", "P70", "P80", "P90"]),
            &standings,
            WIN_SCORE_WEIGHT,
        )
        .unwrap();

        assert_eq!(names(&draft.team_a), vec!["P90", "P60"]);
        assert_eq!(names(&draft.team_b), vec!["P80", "P70"]);
        assert_eq!(draft.average_a, 75.0);
        assert_eq!(draft.average_b, 75.0);
    }

    #[test]
    fn test_odd_count_sizes_within_one() {
        let standings = vec![
            stat("A", 90.0, 0),
            stat("B", 80.0, 0),
            stat("C", 70.0, 0),
            stat("D", 60.0, 0),
            stat("E", 50.0, 0),
        ];
        let draft = generate_teams(
            &select(&["A", "B", "C", "D", "E"]),
            &standings,
            WIN_SCORE_WEIGHT,
        )
        .unwrap();

        // Pair 0: A→a B→b; pair 1: C→b D→a; pair 2: E→a.
        assert_eq!(names(&draft.team_a), vec!["A", "D", "E"]);
        assert_eq!(names(&draft.team_b), vec!["B", "C"]);
        let diff = draft.team_a.len() as i64 - draft.team_b.len() as i64;
        assert!(diff.abs() <= 1);
    }

    #[test]
    fn test_score_includes_win_weight() {
        // Bea has a lower percentage but many wins; weighting flips the
        // draft order.
        let standings = vec![stat("Ana", 60.0, 0), stat("Bea", 55.0, 10)];
        let draft = generate_teams(&select(&["Ana", "Bea"]), &standings, WIN_SCORE_WEIGHT).unwrap();

        assert_eq!(names(&draft.team_a), vec!["Bea"]);
        assert_eq!(draft.team_a[0].score, 55.0 + 10.0 * WIN_SCORE_WEIGHT);
        assert_eq!(names(&draft.team_b), vec!["Ana"]);
    }

    #[test]
    fn test_unknown_player_scores_zero() {
        let standings = vec![stat("Ana", 50.0, 2)];
        let draft = generate_teams(
            &select(&["Ana", "Guest"]),
            &standings,
            WIN_SCORE_WEIGHT,
        )
        .unwrap();

        assert_eq!(names(&draft.team_a), vec!["Ana"]);
        let guest = &draft.team_b[0];
        assert_eq!(guest.score, 0.0);
        assert_eq!(guest.won, 0);
        assert_eq!(draft.average_b, 0.0);
    }

    #[test]
    fn test_tie_keeps_selection_order() {
        let standings = vec![
            stat("Ana", 50.0, 0),
            stat("Bea", 50.0, 0),
            stat("Carla", 50.0, 0),
            stat("Dana", 50.0, 0),
        ];
        let draft = generate_teams(
            &select(&["Dana", "Ana", "Carla", "Bea"]),
            &standings,
            WIN_SCORE_WEIGHT,
        )
        .unwrap();

        // All scores equal: the stable sort leaves selection order intact.
        assert_eq!(names(&draft.team_a), vec!["Dana", "Bea"]);
        assert_eq!(names(&draft.team_b), vec!["Ana", "Carla"]);
    }

    #[test]
    fn test_too_few_players_rejected() {
        let standings = vec![stat("Ana", 50.0, 0)];
        assert_eq!(
            generate_teams(&select(&["Ana"]), &standings, WIN_SCORE_WEIGHT).unwrap_err(),
            BalanceError::NotEnoughPlayers(1)
        );
        assert_eq!(
            generate_teams(&[], &standings, WIN_SCORE_WEIGHT).unwrap_err(),
            BalanceError::NotEnoughPlayers(0)
        );
    }
}
