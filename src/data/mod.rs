//! Dataset loading
//!
//! This module reads the playlist CSV into an immutable in-memory table
//! and normalizes the `modified_at` timestamps.

pub mod loader;
pub mod table;

// Re-export commonly used items
pub use loader::{load_table, parse_modified_at, read_table};
pub use table::PlaylistTable;
