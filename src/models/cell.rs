//! Decoded spreadsheet cell values.
//!
//! The retrieval layer hands the engine a rectangular grid of these; the
//! parser never sees raw bytes or sheet internals.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A decoded sheet: one row of cells per source row, row 0 being headers.
pub type Grid = Vec<Vec<Cell>>;

/// A single decoded cell from the source sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    /// Blank or missing cell; short rows read as a run of these.
    Empty,
    /// Numeric cell, including spreadsheet date serials.
    Number(f64),
    /// Text cell.
    Text(String),
    /// A cell the decoder already resolved to a calendar timestamp.
    Date(NaiveDateTime),
}

impl Cell {
    /// True for blank cells and for text cells that trim to nothing.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// The trimmed text content, if this is a non-blank text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) if !s.trim().is_empty() => Some(s.trim()),
            _ => None,
        }
    }

    /// Numeric value of the cell, accepting numeric text.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Render the cell the way the source row showed it, for verbatim ids.
    pub fn display_value(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            Cell::Text(s) => s.trim().to_string(),
            Cell::Date(d) => d.format("%Y-%m-%d").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_detection() {
        assert!(Cell::Empty.is_blank());
        assert!(Cell::Text("   ".to_string()).is_blank());
        assert!(!Cell::Text("Ana".to_string()).is_blank());
        assert!(!Cell::Number(0.0).is_blank());
    }

    #[test]
    fn test_as_number_accepts_numeric_text() {
        assert_eq!(Cell::Number(2.0).as_number(), Some(2.0));
        assert_eq!(Cell::Text("2".to_string()).as_number(), Some(2.0));
        assert_eq!(Cell::Text(" 1 ".to_string()).as_number(), Some(1.0));
        assert_eq!(Cell::Text("x".to_string()).as_number(), None);
        assert_eq!(Cell::Empty.as_number(), None);
    }

    #[test]
    fn test_display_value_integral_number() {
        assert_eq!(Cell::Number(17.0).display_value(), "17");
        assert_eq!(Cell::Number(2.5).display_value(), "2.5");
        assert_eq!(Cell::Text(" 12b ".to_string()).display_value(), "12b");
        assert_eq!(Cell::Empty.display_value(), "");
    }
}
