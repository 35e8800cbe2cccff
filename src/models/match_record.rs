//! Match records, the roster, and the loaded dataset.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::Outcome;

/// One recorded contest from the sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Identifier exactly as it appears in the source row. Not assumed
    /// numeric or unique.
    pub id: String,

    /// When the match was played. `None` means the date cell could not be
    /// interpreted; such matches stay in the dataset but are excluded from
    /// month buckets and ordered before all dated matches.
    pub date: Option<NaiveDateTime>,

    /// Declared participant count from the sheet. Informational only, never
    /// validated against the results.
    pub expected_count: Option<u32>,

    /// Outcome per participating player. Absent key = did not play.
    pub results: BTreeMap<String, Outcome>,
}

impl MatchRecord {
    /// Month bucket key in `YYYY-MM` form, if the date is known.
    pub fn month_key(&self) -> Option<String> {
        self.date.map(|d| d.format("%Y-%m").to_string())
    }

    /// Players whose outcome in this match was a win, in name order.
    pub fn winners(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter(|(_, o)| o.is_win())
            .map(|(n, _)| n.as_str())
            .collect()
    }

    /// Players whose outcome in this match was a loss, in name order.
    pub fn losers(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter(|(_, o)| !o.is_win())
            .map(|(n, _)| n.as_str())
            .collect()
    }
}

/// The league roster: player names in header column order.
///
/// Each entry remembers its source column so that blank header cells never
/// shift the column-to-player mapping for data rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    entries: Vec<RosterEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterEntry {
    /// Zero-based column index in the source grid.
    pub column: usize,
    pub name: String,
}

impl Roster {
    pub fn new(entries: Vec<RosterEntry>) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Player names in roster (header) order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// (source column, name) pairs in roster order.
    pub fn columns(&self) -> impl Iterator<Item = (usize, &str)> {
        self.entries.iter().map(|e| (e.column, e.name.as_str()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }
}

/// The loaded dataset: every derived view is a pure function of this.
///
/// Rebuilt in full on every data (re)load; nothing derived is cached.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub matches: Vec<MatchRecord>,
    pub roster: Roster,
}

impl Dataset {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty() && self.roster.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn match_with(results: &[(&str, Outcome)]) -> MatchRecord {
        MatchRecord {
            id: "1".to_string(),
            date: None,
            expected_count: None,
            results: results
                .iter()
                .map(|(n, o)| (n.to_string(), *o))
                .collect(),
        }
    }

    #[test]
    fn test_winners_and_losers() {
        let m = match_with(&[
            ("Ana", Outcome::Win),
            ("Bea", Outcome::Loss),
            ("Carla", Outcome::Win),
        ]);
        assert_eq!(m.winners(), vec!["Ana", "Carla"]);
        assert_eq!(m.losers(), vec!["Bea"]);
    }

    #[test]
    fn test_month_key() {
        let mut m = match_with(&[]);
        assert_eq!(m.month_key(), None);

        m.date = chrono::NaiveDate::from_ymd_opt(2025, 1, 10)
            .unwrap()
            .and_hms_opt(0, 0, 0);
        assert_eq!(m.month_key(), Some("2025-01".to_string()));
    }

    #[test]
    fn test_roster_preserves_column_mapping() {
        let roster = Roster::new(vec![
            RosterEntry {
                column: 3,
                name: "Ana".to_string(),
            },
            RosterEntry {
                column: 5,
                name: "Bea".to_string(),
            },
        ]);

        assert_eq!(roster.len(), 2);
        assert!(roster.contains("Bea"));
        assert!(!roster.contains("Col"));
        assert_eq!(
            roster.columns().collect::<Vec<_>>(),
            vec![(3, "Ana"), (5, "Bea")]
        );
    }
}
