/// Application-wide constants to avoid magic values throughout the codebase.
///
/// This module centralizes the fixed chart parameters, default paths and
/// other literal values used across the application.
/// Output format constants
pub mod output_formats {
    /// Text output format - one readable block per analysis
    pub const TEXT: &str = "text";
    /// JSON output format - structured output for automation
    pub const JSON: &str = "json";

    /// Default output format
    pub const DEFAULT: &str = TEXT;

    /// All valid output formats
    pub const ALL: [&str; 2] = [TEXT, JSON];
}

/// Default configuration values
pub mod defaults {
    /// Dataset read when no path is configured
    pub const DATA_PATH: &str = "spotify_data.csv";
    /// HTML report written by `render` when no path is configured
    pub const OUTPUT_PATH: &str = "dashboard.html";
    /// Address the report server binds to
    pub const BIND_ADDR: &str = "127.0.0.1:8501";
    /// Rows shown in the preview table above the charts
    pub const PREVIEW_ROWS: usize = 1000;
    /// Config file searched for in the working directory and its parents
    pub const CONFIG_FILE_NAME: &str = ".playlist-dashboard.toml";
    /// How many parent directories are searched for a config file
    pub const CONFIG_SEARCH_DEPTH: usize = 3;
}

/// Fixed chart parameters
pub mod charts {
    /// Groups kept by the top-N bar charts
    pub const TOP_N: usize = 10;
    /// Bin count of the playlist length histogram
    pub const PLAYLIST_LENGTH_BINS: usize = 20;
    /// Bin count used when the maximum track position is not positive
    pub const FALLBACK_BIN_COUNT: usize = 1;
    /// Ceiling on track position bins; larger positions share the top bin
    pub const MAX_TRACK_POS_BINS: usize = 1000;
    /// Width and height of bar and line figures
    pub const WIDE_FIGURE: (u32, u32) = (960, 480);
    /// Width and height of scatter and histogram figures
    pub const STANDARD_FIGURE: (u32, u32) = (800, 480);
    /// Longest category label drawn under a bar before it is truncated
    pub const MAX_BAR_LABEL_CHARS: usize = 14;
}

/// Word cloud layout parameters
pub mod word_cloud {
    /// Canvas width in pixels
    pub const WIDTH: u32 = 800;
    /// Canvas height in pixels
    pub const HEIGHT: u32 = 400;
    /// Most tokens placed on one cloud
    pub const MAX_WORDS: usize = 200;
    /// Font size of the most frequent token
    pub const MAX_FONT_SIZE: f64 = 72.0;
    /// Smallest font size a token may shrink to
    pub const MIN_FONT_SIZE: f64 = 8.0;
    /// Weight of relative frequency against rank when sizing tokens
    pub const RELATIVE_SCALING: f64 = 0.5;
    /// Radial step of the placement spiral per radian
    pub const SPIRAL_STEP: f64 = 1.5;
    /// Angular increment of the placement spiral
    pub const SPIRAL_ANGLE_STEP: f64 = 0.1;
    /// Horizontal padding between placed tokens
    pub const PADDING: f64 = 2.0;
}
