//! Playlist dashboard
//!
//! Loads a playlist/track CSV into an immutable table, derives ten fixed
//! chart summaries from it and lays the rendered figures out as a single
//! dark-themed HTML page, either written to disk or served over HTTP.

pub mod analysis;
pub mod config;
pub mod core;
pub mod data;
pub mod render;
pub mod reporting;
pub mod server;
pub mod ui;

// Re-export commonly used items
pub use crate::analysis::{Analysis, Summary};
pub use crate::config::Config;
pub use crate::core::{DashboardError, PlaylistTrackRecord, Result};
pub use crate::data::{PlaylistTable, load_table};
