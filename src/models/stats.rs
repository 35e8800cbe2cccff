//! Derived statistics models.

use serde::{Deserialize, Serialize};

/// Per-player counters over a match subset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerStat {
    pub name: String,

    /// Matches with a recorded outcome for this player.
    pub played: u32,

    /// Matches won.
    pub won: u32,

    /// Weighted participation score: 1 per loss, 2 per win.
    pub points: u32,

    /// Win percentage on a 0..=100 scale; 0 when nothing was played.
    pub percentage: f64,

    /// Chronologically last results, oldest first, capped at the streak
    /// window.
    pub streak: Vec<char>,
}

impl PlayerStat {
    /// Fresh zeroed counters for a roster player.
    pub fn new(name: String) -> Self {
        Self {
            name,
            played: 0,
            won: 0,
            points: 0,
            percentage: 0.0,
            streak: Vec::new(),
        }
    }
}

/// Co-occurrence record between a subject player and one teammate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffinityEntry {
    pub name: String,

    /// Matches both the subject and this teammate won.
    pub won: u32,

    /// Matches both lost.
    pub lost: u32,
}

impl AffinityEntry {
    /// Share of shared outcomes that were wins. Only meaningful once at
    /// least one shared outcome exists.
    pub fn win_rate(&self) -> f64 {
        let total = self.won + self.lost;
        if total == 0 {
            0.0
        } else {
            self.won as f64 / total as f64
        }
    }

    pub fn loss_rate(&self) -> f64 {
        let total = self.won + self.lost;
        if total == 0 {
            0.0
        } else {
            self.lost as f64 / total as f64
        }
    }
}

/// Best/worst partner lists for one player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffinityReport {
    pub player: String,
    pub best: Vec<AffinityEntry>,
    pub worst: Vec<AffinityEntry>,
}

/// An ad-hoc team: the exact set of players who co-won or co-lost a match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamGroup {
    /// Member names, sorted. The sorted comma-joined form is the group key.
    pub players: Vec<String>,

    /// Times this exact set was the winning side.
    pub won: u32,

    /// Times this exact set was the losing side.
    pub lost: u32,
}

impl TeamGroup {
    /// Wins over total appearances of this set. A set that never lost
    /// ranks at the ceiling.
    pub fn win_ratio(&self) -> f64 {
        let total = self.won + self.lost;
        if total == 0 {
            0.0
        } else {
            self.won as f64 / total as f64
        }
    }

    pub fn loss_ratio(&self) -> f64 {
        let total = self.won + self.lost;
        if total == 0 {
            0.0
        } else {
            self.lost as f64 / total as f64
        }
    }
}

/// One drafted player in a generated team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftPick {
    pub name: String,
    pub percentage: f64,
    pub won: u32,
    /// Fairness score the draft ordered by.
    pub score: f64,
}

/// Result of the balanced team generator: two squads and their average win
/// percentages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamDraft {
    pub team_a: Vec<DraftPick>,
    pub team_b: Vec<DraftPick>,
    pub average_a: f64,
    pub average_b: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_stat_zeroed() {
        let s = PlayerStat::new("Ana".to_string());
        assert_eq!(s.played, 0);
        assert_eq!(s.percentage, 0.0);
        assert!(s.streak.is_empty());
    }

    #[test]
    fn test_affinity_rates() {
        let e = AffinityEntry {
            name: "Bea".to_string(),
            won: 3,
            lost: 1,
        };
        assert!((e.win_rate() - 0.75).abs() < 1e-9);
        assert!((e.loss_rate() - 0.25).abs() < 1e-9);

        let empty = AffinityEntry {
            name: "Carla".to_string(),
            won: 0,
            lost: 0,
        };
        assert_eq!(empty.win_rate(), 0.0);
        assert_eq!(empty.loss_rate(), 0.0);
    }

    #[test]
    fn test_team_group_ratios() {
        let g = TeamGroup {
            players: vec!["Ana".to_string(), "Bea".to_string()],
            won: 4,
            lost: 0,
        };
        assert_eq!(g.win_ratio(), 1.0);
        assert_eq!(g.loss_ratio(), 0.0);
    }

    #[test]
    fn test_serialization_round_trip() {
        let draft = TeamDraft {
            team_a: vec![DraftPick {
                name: "Ana".to_string(),
                percentage: 75.0,
                won: 6,
                score: 84.0,
            }],
            team_b: vec![],
            average_a: 75.0,
            average_b: 0.0,
        };
        let json = serde_json::to_string(&draft).unwrap();
        let back: TeamDraft = serde_json::from_str(&json).unwrap();
        assert_eq!(back.team_a[0].name, "Ana");
        assert_eq!(back.team_a[0].won, 6);
    }
}
