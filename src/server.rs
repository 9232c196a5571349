//! HTTP front-end: an HTML page plus a JSON API over the chart specs.
//!
//! GET /             - dashboard page (Plotly renders the specs)
//! GET /api/health   - liveness
//! GET /api/layout   - control tree for the loaded table
//! GET /api/pie      - `?site=`
//! GET /api/scatter  - `?site=&low=&high=`
//! GET /api/view     - both charts, same parameters as /api/scatter

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::{Html, Json},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::chart::{pie_chart_spec, recompute_view, scatter_chart_spec, DashboardView, PieChartSpec, ScatterChartSpec};
use crate::data::model::{Controls, LaunchTable, PayloadRange, SiteSelection};
use crate::layout::DashboardLayout;

/// Application state shared read-only across handlers.
pub struct AppState {
    pub table: Arc<LaunchTable>,
    pub layout: DashboardLayout,
}

impl AppState {
    pub fn new(table: Arc<LaunchTable>) -> Self {
        let layout = DashboardLayout::for_table(&table);
        Self { table, layout }
    }
}

/// Server configuration.
pub struct ServerConfig {
    pub port: u16,
    pub open_browser: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8050,
            open_browser: true,
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/health", get(health_handler))
        .route("/api/layout", get(layout_handler))
        .route("/api/pie", get(pie_handler))
        .route("/api/scatter", get(scatter_handler))
        .route("/api/view", get(view_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the HTTP server and serve until the process is stopped.
pub async fn run_server(table: Arc<LaunchTable>, config: ServerConfig) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(table));
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    if config.open_browser {
        // Use localhost for browser URL even though we bind to 0.0.0.0
        let url = format!("http://127.0.0.1:{}", config.port);
        log::info!("Opening browser at {url}");
        #[cfg(target_os = "macos")]
        let _ = std::process::Command::new("open").arg(&url).spawn();
        #[cfg(target_os = "linux")]
        let _ = std::process::Command::new("xdg-open").arg(&url).spawn();
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Dashboard running at http://{addr}");
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Query parameters ---

#[derive(Debug, Default, Deserialize)]
pub struct ChartQuery {
    #[serde(default)]
    pub site: Option<String>,
    #[serde(default)]
    pub low: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
}

impl ChartQuery {
    /// Fill absent parameters from the layout defaults.
    fn controls(&self, layout: &DashboardLayout) -> Controls {
        let defaults = layout.default_controls();
        Controls {
            site: self
                .site
                .as_deref()
                .map(SiteSelection::from)
                .unwrap_or(defaults.site),
            payload: PayloadRange::new(
                self.low.unwrap_or(defaults.payload.low),
                self.high
                    .map(|h| layout.payload_slider.upper_value(h))
                    .unwrap_or(defaults.payload.high),
            ),
        }
    }
}

// --- Handlers ---

const EMBEDDED_INDEX_HTML: &str = include_str!("static/index.html");

async fn index_handler() -> Html<&'static str> {
    Html(EMBEDDED_INDEX_HTML)
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    launches: usize,
}

async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        launches: state.table.len(),
    })
}

async fn layout_handler(State(state): State<Arc<AppState>>) -> Json<DashboardLayout> {
    Json(state.layout.clone())
}

async fn pie_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ChartQuery>,
) -> Json<PieChartSpec> {
    let controls = query.controls(&state.layout);
    Json(pie_chart_spec(&state.table, &controls.site))
}

async fn scatter_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ChartQuery>,
) -> Json<ScatterChartSpec> {
    let controls = query.controls(&state.layout);
    Json(scatter_chart_spec(&state.table, &controls.site, &controls.payload))
}

async fn view_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ChartQuery>,
) -> Json<DashboardView> {
    let controls = query.controls(&state.layout);
    log::debug!("recompute site={} payload={:?}", controls.site, controls.payload);
    Json(recompute_view(&state.table, &controls))
}
