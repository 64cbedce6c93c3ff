use chrono::NaiveDateTime;
use serde::Serialize;

/// One (playlist, track) pairing from the dataset.
///
/// Playlist-level fields (`num_followers`, `num_edits`, `num_tracks`,
/// `duration_sec`, `modified_at`) repeat on every track row of the same
/// playlist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaylistTrackRecord {
    /// Playlist identifier, not unique per row
    pub pid: i64,
    pub artist_name: String,
    pub album_name: String,
    pub track_name: String,
    /// Duration of this track in seconds
    pub track_duration_sec: f64,
    /// Total duration of the playlist in seconds
    pub duration_sec: f64,
    pub num_followers: u64,
    pub num_edits: u64,
    pub num_tracks: u64,
    /// Position of the track within its playlist
    pub track_pos: i64,
    /// Last modification of the playlist (UTC)
    pub modified_at: NaiveDateTime,
}

impl PlaylistTrackRecord {
    /// Cells in preview-table column order.
    pub fn preview_cells(&self) -> [String; 11] {
        [
            self.pid.to_string(),
            self.artist_name.clone(),
            self.album_name.clone(),
            self.track_name.clone(),
            format_number(self.track_duration_sec),
            format_number(self.duration_sec),
            self.num_followers.to_string(),
            self.num_edits.to_string(),
            self.num_tracks.to_string(),
            self.track_pos.to_string(),
            self.modified_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]
    }
}

/// Preview-table headers, matching [`PlaylistTrackRecord::preview_cells`].
pub const PREVIEW_COLUMNS: [&str; 11] = [
    "pid",
    "artist_name",
    "album_name",
    "track_name",
    "track_duration_sec",
    "duration_sec",
    "num_followers",
    "num_edits",
    "num_tracks",
    "track_pos",
    "modified_at",
];

/// Render whole numbers without a fractional part.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}
