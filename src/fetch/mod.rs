//! Raw table retrieval.
//!
//! Loads the shared match sheet as CSV from a local file or over HTTP and
//! decodes it into the typed grid the parser consumes. The engine never
//! sees a partially-fetched or undecodable payload: retrieval either
//! produces a whole grid or fails here.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{debug, info};

use crate::models::{Cell, Grid};

/// Errors that can occur while retrieving or decoding the sheet.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} fetching {url}")]
    HttpStatus { status: u16, url: String },

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Where the sheet lives.
#[derive(Debug, Clone)]
pub enum SheetSource {
    /// Local CSV export.
    File(PathBuf),
    /// Remote CSV endpoint (a published sheet or a proxy in front of one).
    Remote(String),
}

impl SheetSource {
    /// Retrieve and decode the sheet.
    pub async fn load(&self) -> Result<Grid, FetchError> {
        match self {
            SheetSource::File(path) => load_grid(path),
            SheetSource::Remote(url) => fetch_grid(url).await,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            SheetSource::File(path) => path.display().to_string(),
            SheetSource::Remote(url) => url.clone(),
        }
    }
}

/// Read a CSV file into a grid.
pub fn load_grid(path: &Path) -> Result<Grid, FetchError> {
    let raw = std::fs::read_to_string(path).map_err(|source| FetchError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let grid = decode_csv(&raw)?;
    info!(path = %path.display(), rows = grid.len(), "loaded sheet from file");
    Ok(grid)
}

/// Fetch a CSV payload over HTTP and decode it. A timestamp query
/// parameter keeps intermediary caches from serving a stale sheet.
pub async fn fetch_grid(url: &str) -> Result<Grid, FetchError> {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let separator = if url.contains('?') { '&' } else { '?' };
    let busted = format!("{url}{separator}v={stamp}");

    debug!(url = busted.as_str(), "fetching sheet");
    let response = reqwest::get(&busted).await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let body = response.text().await?;
    let grid = decode_csv(&body)?;
    info!(url, rows = grid.len(), "fetched sheet");
    Ok(grid)
}

/// Decode CSV text into typed cells: blank → `Empty`, numeric → `Number`,
/// anything else → `Text`. Date strings stay text; the parser resolves
/// them. Ragged rows are allowed and come out as short rows.
pub fn decode_csv(raw: &str) -> Result<Grid, FetchError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(raw.as_bytes());

    let mut grid = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Vec<Cell> = record.iter().map(decode_field).collect();
        grid.push(row);
    }
    Ok(grid)
}

fn decode_field(field: &str) -> Cell {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Cell::Empty;
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => Cell::Number(n),
        _ => Cell::Text(trimmed.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_decode_typed_cells() {
        let grid = decode_csv("Num,Date,Count,Ana,Bea\n1,2025-01-10,2,2,1\n").unwrap();

        assert_eq!(grid.len(), 2);
        assert_eq!(grid[0][0], Cell::Text("Num".to_string()));
        assert_eq!(grid[1][0], Cell::Number(1.0));
        assert_eq!(grid[1][1], Cell::Text("2025-01-10".to_string()));
        assert_eq!(grid[1][3], Cell::Number(2.0));
    }

    #[test]
    fn test_decode_blank_cells() {
        let grid = decode_csv("Num,Date,Count,Ana\n1,, ,2\n").unwrap();
        assert_eq!(grid[1][1], Cell::Empty);
        assert_eq!(grid[1][2], Cell::Empty);
    }

    #[test]
    fn test_decode_ragged_rows() {
        let grid = decode_csv("Num,Date,Count,Ana,Bea\n1,2025-01-10\n").unwrap();
        assert_eq!(grid[0].len(), 5);
        assert_eq!(grid[1].len(), 2);
    }

    #[test]
    fn test_decode_empty_payload() {
        let grid = decode_csv("").unwrap();
        assert!(grid.is_empty());
    }

    #[test]
    fn test_load_grid_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Num,Date,Count,Ana\n1,2025-01-10,1,2\n").unwrap();

        let grid = load_grid(file.path()).unwrap();
        assert_eq!(grid.len(), 2);
        assert_eq!(grid[1][3], Cell::Number(2.0));
    }

    #[test]
    fn test_load_grid_missing_file() {
        let err = load_grid(Path::new("/nonexistent/league.csv")).unwrap_err();
        assert!(matches!(err, FetchError::Io { .. }));
    }

    #[test]
    fn test_end_to_end_with_parser() {
        let grid = decode_csv("Num,Date,Count,Ana,Bea\n1,2025-01-10,2,2,1\n").unwrap();
        let dataset = crate::parse::parse_grid(&grid);

        assert_eq!(dataset.roster.names().collect::<Vec<_>>(), vec!["Ana", "Bea"]);
        assert_eq!(dataset.matches.len(), 1);
    }
}
