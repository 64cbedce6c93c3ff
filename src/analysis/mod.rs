//! The ten fixed dashboard analyses
//!
//! Every analysis is a pure function from the loaded table to a small
//! summary. None of them mutate the table, so they can run in any order
//! or in parallel.

pub mod aggregate;
pub mod histogram;

use serde::Serialize;
use std::fmt;

use crate::core::constants::charts;
use crate::data::PlaylistTable;

pub use aggregate::{MonthCount, RankedGroup, TokenCount, YearMean};
pub use histogram::{Histogram, track_pos_bin_count};

/// One of the ten dashboard charts, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Analysis {
    AvgTrackDurationByArtist,
    TopFollowedArtists,
    PlaylistsOverTime,
    AvgTrackDurationByYear,
    FollowersVsEdits,
    DurationVsTracks,
    PlaylistLengthDistribution,
    TrackPositionDistribution,
    AlbumNameCloud,
    TrackNameCloud,
}

/// The aggregated data behind one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Summary {
    Ranking(Vec<RankedGroup>),
    Monthly(Vec<MonthCount>),
    Yearly(Vec<YearMean>),
    Scatter(Vec<(f64, f64)>),
    Histogram(Histogram),
    Frequencies(Vec<TokenCount>),
}

impl Summary {
    /// Number of plotted entries (bars, points, bins or tokens).
    pub fn len(&self) -> usize {
        match self {
            Summary::Ranking(groups) => groups.len(),
            Summary::Monthly(months) => months.len(),
            Summary::Yearly(years) => years.len(),
            Summary::Scatter(points) => points.len(),
            Summary::Histogram(histogram) => histogram.bin_count(),
            Summary::Frequencies(tokens) => tokens.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Analysis {
    pub const ALL: [Analysis; 10] = [
        Analysis::AvgTrackDurationByArtist,
        Analysis::TopFollowedArtists,
        Analysis::PlaylistsOverTime,
        Analysis::AvgTrackDurationByYear,
        Analysis::FollowersVsEdits,
        Analysis::DurationVsTracks,
        Analysis::PlaylistLengthDistribution,
        Analysis::TrackPositionDistribution,
        Analysis::AlbumNameCloud,
        Analysis::TrackNameCloud,
    ];

    /// Stable identifier used for JSON keys and HTML element ids.
    pub fn slug(self) -> &'static str {
        match self {
            Analysis::AvgTrackDurationByArtist => "avg_track_duration_by_artist",
            Analysis::TopFollowedArtists => "top_followed_artists",
            Analysis::PlaylistsOverTime => "playlists_over_time",
            Analysis::AvgTrackDurationByYear => "avg_track_duration_by_year",
            Analysis::FollowersVsEdits => "followers_vs_edits",
            Analysis::DurationVsTracks => "duration_vs_tracks",
            Analysis::PlaylistLengthDistribution => "playlist_length_distribution",
            Analysis::TrackPositionDistribution => "track_position_distribution",
            Analysis::AlbumNameCloud => "album_name_cloud",
            Analysis::TrackNameCloud => "track_name_cloud",
        }
    }

    /// Card heading shown above the figure.
    pub fn heading(self) -> &'static str {
        match self {
            Analysis::AvgTrackDurationByArtist => "📊 Average Track Duration by Artist",
            Analysis::TopFollowedArtists => "👥 Top 10 Most Followed Artists",
            Analysis::PlaylistsOverTime => "🗓️ Number of Playlists Over Time",
            Analysis::AvgTrackDurationByYear => "📅 Average Track Duration by Year",
            Analysis::FollowersVsEdits => "👤 Followers vs. Edits",
            Analysis::DurationVsTracks => "📈 Playlist Duration vs num of Tracks",
            Analysis::PlaylistLengthDistribution => "🎧 Playlist Length Distribution",
            Analysis::TrackPositionDistribution => "🔢 Track Position Distribution",
            Analysis::AlbumNameCloud => "💿 Most Frequent Album Names",
            Analysis::TrackNameCloud => "🎶 Most Frequent Track Names",
        }
    }

    /// Caption drawn inside the figure. Word clouds have none.
    pub fn caption(self) -> Option<&'static str> {
        match self {
            Analysis::AvgTrackDurationByArtist => Some("Average Track Duration by Artist"),
            Analysis::TopFollowedArtists => Some("Top 10 Most Followed Artists"),
            Analysis::PlaylistsOverTime => Some("Number of Playlists Created Over Time"),
            Analysis::AvgTrackDurationByYear => Some("Average Track Duration by Year"),
            Analysis::FollowersVsEdits => {
                Some("Relationship between Number of Followers and Number of Edits")
            }
            Analysis::DurationVsTracks => {
                Some("Correlation between Playlist Duration and Number of Tracks")
            }
            Analysis::PlaylistLengthDistribution => Some("Distribution of Playlist Lengths"),
            Analysis::TrackPositionDistribution => {
                Some("Distribution of Track Positions within Playlists")
            }
            Analysis::AlbumNameCloud | Analysis::TrackNameCloud => None,
        }
    }

    /// X and Y axis descriptions.
    pub fn axis_labels(self) -> (&'static str, &'static str) {
        match self {
            Analysis::AvgTrackDurationByArtist => {
                ("Artist Name", "Average Track Duration (seconds)")
            }
            Analysis::TopFollowedArtists => ("Artist Name", "Total Followers"),
            Analysis::PlaylistsOverTime => ("Year", "Number of Playlists"),
            Analysis::AvgTrackDurationByYear => ("Year", "Average Track Duration (seconds)"),
            Analysis::FollowersVsEdits => ("Number of Followers", "Number of Edits"),
            Analysis::DurationVsTracks => ("Number of Tracks", "Playlist Duration (seconds)"),
            Analysis::PlaylistLengthDistribution => ("Number of Tracks", "Frequency"),
            Analysis::TrackPositionDistribution => ("Track Position", "Frequency"),
            Analysis::AlbumNameCloud | Analysis::TrackNameCloud => ("", ""),
        }
    }

    /// Derive this analysis' summary from the table.
    pub fn summarize(self, table: &PlaylistTable) -> Summary {
        match self {
            Analysis::AvgTrackDurationByArtist => Summary::Ranking(aggregate::top_n_by_mean(
                table
                    .iter()
                    .map(|r| (r.artist_name.as_str(), r.track_duration_sec)),
                charts::TOP_N,
            )),
            Analysis::TopFollowedArtists => Summary::Ranking(aggregate::top_n_by_sum(
                table
                    .iter()
                    .map(|r| (r.artist_name.as_str(), r.num_followers as f64)),
                charts::TOP_N,
            )),
            Analysis::PlaylistsOverTime => {
                Summary::Monthly(aggregate::count_by_month(table.iter().map(|r| r.modified_at)))
            }
            Analysis::AvgTrackDurationByYear => Summary::Yearly(aggregate::mean_by_year(
                table.iter().map(|r| (r.modified_at, r.track_duration_sec)),
            )),
            Analysis::FollowersVsEdits => Summary::Scatter(aggregate::pairs(
                table
                    .iter()
                    .map(|r| (r.num_followers as f64, r.num_edits as f64)),
            )),
            Analysis::DurationVsTracks => Summary::Scatter(aggregate::pairs(
                table.iter().map(|r| (r.num_tracks as f64, r.duration_sec)),
            )),
            Analysis::PlaylistLengthDistribution => {
                let values: Vec<f64> = table.iter().map(|r| r.num_tracks as f64).collect();
                Summary::Histogram(Histogram::build(&values, charts::PLAYLIST_LENGTH_BINS))
            }
            Analysis::TrackPositionDistribution => {
                let values: Vec<f64> = table.iter().map(|r| r.track_pos as f64).collect();
                let bins = track_pos_bin_count(table.iter().map(|r| r.track_pos).max());
                Summary::Histogram(Histogram::build(&values, bins))
            }
            Analysis::AlbumNameCloud => Summary::Frequencies(aggregate::frequency_table(
                table.iter().map(|r| r.album_name.as_str()),
            )),
            Analysis::TrackNameCloud => Summary::Frequencies(aggregate::frequency_table(
                table.iter().map(|r| r.track_name.as_str()),
            )),
        }
    }
}

impl fmt::Display for Analysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}
