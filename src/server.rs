//! Interactive hosting of the dashboard
//!
//! Every request to `/` reloads the CSV and rebuilds all ten charts, so the
//! page always reflects the file on disk. A dataset that fails to load is
//! reported on the page with a 500 and the server keeps serving.

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use log::info;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::core::error::Result;
use crate::data::load_table;
use crate::reporting::dashboard::{HtmlDashboard, build_dashboard, escape_html};
use crate::reporting::logging;
use crate::ui::ProgressReporter;

#[derive(Debug, Clone)]
pub struct ServerState {
    data_path: Arc<PathBuf>,
    preview_rows: usize,
}

impl ServerState {
    pub fn new(data_path: PathBuf, preview_rows: usize) -> Self {
        Self {
            data_path: Arc::new(data_path),
            preview_rows,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.data_path(), config.preview_rows())
    }
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .with_state(state)
}

/// Bind the configured address and serve until the process stops
pub async fn serve(config: &Config) -> Result<()> {
    let addr = config.bind_addr()?;
    let listener = TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;

    info!("Dashboard listening on http://{local}");
    eprintln!("Serving dashboard at http://{local}");
    eprintln!("Press Ctrl+C to stop");

    serve_on(listener, ServerState::from_config(config)).await
}

/// Serve on an already bound listener
pub async fn serve_on(listener: TcpListener, state: ServerState) -> Result<()> {
    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// Load the dataset and build the full HTML page
pub fn render_page(state: &ServerState) -> Result<String> {
    let started = Instant::now();
    let table = load_table(state.data_path.as_path())?;
    let source = state.data_path.display().to_string();
    let data = build_dashboard(
        &table,
        &source,
        state.preview_rows,
        &ProgressReporter::new(false),
    )?;
    info!(
        "Rebuilt dashboard for {} rows in {}ms",
        table.len(),
        started.elapsed().as_millis()
    );
    Ok(HtmlDashboard::generate_html_content(&data))
}

async fn index(State(state): State<ServerState>) -> Response {
    let result = tokio::task::spawn_blocking(move || render_page(&state)).await;

    match result {
        Ok(Ok(page)) => Html(page).into_response(),
        Ok(Err(e)) => {
            logging::log_error("Failed to build dashboard", Some(&e));
            error_page(&e.to_string())
        }
        Err(e) => {
            logging::log_error("Dashboard build task failed", Some(&e));
            error_page("dashboard build task failed")
        }
    }
}

async fn health() -> &'static str {
    "ok"
}

fn error_page(message: &str) -> Response {
    let body = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="UTF-8"><title>Spotify Data Dashboard</title></head>
<body style="background:#0e1117;color:#fafafa;font-family:sans-serif;padding:2rem">
    <h1>Failed to build dashboard</h1>
    <pre>{}</pre>
</body>
</html>"#,
        escape_html(message)
    );
    (StatusCode::INTERNAL_SERVER_ERROR, Html(body)).into_response()
}
