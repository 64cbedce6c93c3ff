use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::debug;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::core::error::{DashboardError, Result};
use crate::core::types::PlaylistTrackRecord;
use crate::data::table::PlaylistTable;

/// Row shape as it appears in the CSV, before timestamp normalization.
#[derive(Debug, Deserialize)]
struct CsvRow {
    pid: i64,
    artist_name: String,
    album_name: String,
    track_name: String,
    track_duration_sec: f64,
    duration_sec: f64,
    num_followers: u64,
    num_edits: u64,
    num_tracks: u64,
    track_pos: i64,
    modified_at: String,
}

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// Load the dataset at `path`.
pub fn load_table<P: AsRef<Path>>(path: P) -> Result<PlaylistTable> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(DashboardError::FileNotFound(path.display().to_string()));
    }

    let file = File::open(path)?;
    let table = read_table(file)?;
    debug!("Read {} rows from {}", table.len(), path.display());
    Ok(table)
}

/// Read a headed CSV from any reader.
///
/// Columns are matched by header name and extra columns are ignored. Only
/// header names are trimmed; cell text is kept verbatim. The first bad row
/// aborts the load.
pub fn read_table<R: Read>(reader: R) -> Result<PlaylistTable> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);
    let headers = reader.headers()?.clone();
    debug!("CSV columns: {}", headers.iter().collect::<Vec<_>>().join(","));

    let mut records = Vec::new();
    for result in reader.records() {
        let raw = result?;
        let line = raw.position().map(|p| p.line()).unwrap_or_default();
        let row: CsvRow = raw.deserialize(Some(&headers))?;

        let modified_at = parse_modified_at(&row.modified_at).ok_or_else(|| {
            DashboardError::DateParse {
                line,
                value: row.modified_at.clone(),
            }
        })?;

        records.push(PlaylistTrackRecord {
            pid: row.pid,
            artist_name: row.artist_name,
            album_name: row.album_name,
            track_name: row.track_name,
            track_duration_sec: row.track_duration_sec,
            duration_sec: row.duration_sec,
            num_followers: row.num_followers,
            num_edits: row.num_edits,
            num_tracks: row.num_tracks,
            track_pos: row.track_pos,
            modified_at,
        });
    }

    Ok(PlaylistTable::from_records(records))
}

/// Parse a `modified_at` cell into a UTC timestamp.
///
/// Accepts RFC 3339, ISO-like date-times with a space or `T` separator,
/// bare dates, US `MM/DD/YYYY` dates and integer Unix seconds.
pub fn parse_modified_at(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(dt.naive_utc());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    value
        .parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.naive_utc())
}
