//! Report assembly and logging
//!
//! This module builds the ten charts into the HTML dashboard and provides
//! the structured logging helpers used across the application.

pub mod dashboard;
pub mod logging;

// Re-export commonly used items
pub use dashboard::{DashboardData, HtmlDashboard, RenderedChart, build_dashboard};
