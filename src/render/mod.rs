//! SVG figure generation for the dashboard charts.

pub mod figure;
pub mod theme;
pub mod wordcloud;

pub use figure::render_figure;
pub use wordcloud::render_word_cloud;
