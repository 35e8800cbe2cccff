//! Match parser: decoded grid → match records + roster.
//!
//! Column layout is fixed: 0 = match id, 1 = date, 2 = declared participant
//! count, 3.. = one column per player. Row 0 holds the headers.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::models::{Cell, Dataset, Grid, MatchRecord, Outcome, Roster, RosterEntry};

/// First player column in the sheet.
pub const PLAYER_START_COLUMN: usize = 3;

/// Spreadsheet serial day 0 (the 1900 epoch, lotus leap-bug included).
const SERIAL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

/// Parse a decoded grid into a dataset. Never fails: a missing or empty
/// grid yields an empty dataset and every malformed row degrades per its
/// own rule (skip, unknown date, omitted result).
pub fn parse_grid(grid: &Grid) -> Dataset {
    let Some(headers) = grid.first() else {
        return Dataset::default();
    };

    let roster = parse_roster(headers);

    let mut matches = Vec::new();
    for (row_index, row) in grid.iter().enumerate().skip(1) {
        match parse_row(row, &roster) {
            Some(record) => matches.push(record),
            None => debug!(row = row_index, "skipping row without match id"),
        }
    }

    debug!(
        matches = matches.len(),
        players = roster.len(),
        "parsed sheet"
    );

    Dataset { matches, roster }
}

/// Roster = non-blank text headers at player columns, keeping the source
/// column of each so blank header cells leave a gap instead of shifting
/// every later player.
fn parse_roster(headers: &[Cell]) -> Roster {
    let mut entries = Vec::new();
    for (column, cell) in headers.iter().enumerate().skip(PLAYER_START_COLUMN) {
        if let Some(name) = cell.as_text() {
            if entries.iter().any(|e: &RosterEntry| e.name == name) {
                debug!(name, column, "duplicate header name ignored");
                continue;
            }
            entries.push(RosterEntry {
                column,
                name: name.to_string(),
            });
        }
    }
    Roster::new(entries)
}

fn parse_row(row: &[Cell], roster: &Roster) -> Option<MatchRecord> {
    let id_cell = row.first()?;
    if is_falsy_id(id_cell) {
        return None;
    }

    let date = row.get(1).and_then(parse_date);
    let expected_count = row
        .get(2)
        .and_then(Cell::as_number)
        .filter(|n| *n >= 0.0)
        .map(|n| n.round() as u32);

    let mut results = std::collections::BTreeMap::new();
    for (column, name) in roster.columns() {
        if let Some(outcome) = row.get(column).and_then(Outcome::from_cell) {
            results.insert(name.to_string(), outcome);
        }
    }

    Some(MatchRecord {
        id: id_cell.display_value(),
        date,
        expected_count,
        results,
    })
}

/// Blank, zero or non-finite id cells mark filler rows, not matches.
/// Textual "0" is a real id.
fn is_falsy_id(cell: &Cell) -> bool {
    match cell {
        Cell::Number(n) => *n == 0.0 || !n.is_finite(),
        other => other.is_blank(),
    }
}

/// Interpret the date cell: already-decoded dates pass through, numbers are
/// spreadsheet day serials, text goes through the known formats. Anything
/// else is an unknown date.
fn parse_date(cell: &Cell) -> Option<NaiveDateTime> {
    match cell {
        Cell::Date(d) => Some(*d),
        Cell::Number(serial) => serial_to_date(*serial),
        Cell::Text(s) => parse_date_string(s.trim()),
        Cell::Empty => None,
    }
}

fn serial_to_date(serial: f64) -> Option<NaiveDateTime> {
    // Sane sheet range only; 0/negative/huge serials are data errors.
    if !serial.is_finite() || serial <= 0.0 || serial >= 300_000.0 {
        return None;
    }
    let (y, m, d) = SERIAL_EPOCH;
    let epoch = NaiveDate::from_ymd_opt(y, m, d)?.and_hms_opt(0, 0, 0)?;
    let days = serial.trunc() as i64;
    let secs = (serial.fract() * 86_400.0).round() as i64;
    epoch.checked_add_signed(Duration::days(days) + Duration::seconds(secs))
}

fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    if s.is_empty() {
        return None;
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    for fmt in ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}
