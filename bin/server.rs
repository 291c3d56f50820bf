// Civic Trust Score - Web Server
// JSON API over one shared simulation session and view router

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use civic_trust::{
    dashboard_router, init_logging, Dashboard, RouterState, RunOutcome, RunSummary, Session,
    SimulationConfig, ViewRouter, VERSION,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared application state
#[derive(Clone)]
struct AppState {
    session: Arc<Session<Dashboard>>,
    router: Arc<Mutex<ViewRouter>>,
}

impl AppState {
    fn router_state(&self) -> RouterState {
        self.router
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .state()
    }
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Run request; omitted fields keep whatever the input slots hold
#[derive(Debug, Default, Deserialize)]
struct RunRequest {
    name: Option<String>,
    credit: Option<String>,
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum RunResponse {
    Completed(RunSummary),
    AlreadyRunning,
}

impl From<RunOutcome> for RunResponse {
    fn from(outcome: RunOutcome) -> Self {
        match outcome {
            RunOutcome::Completed(summary) => RunResponse::Completed(summary),
            RunOutcome::AlreadyRunning => RunResponse::AlreadyRunning,
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    running: bool,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(HealthResponse {
        status: "OK",
        version: VERSION,
        running: state.session.is_running(),
    }))
}

/// GET /api/dashboard - Current state of every slot
async fn get_dashboard(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.session.snapshot()))
}

/// POST /api/run - Fill the input slots and run the demo to completion
async fn run_demo(
    State(state): State<AppState>,
    body: Option<Json<RunRequest>>,
) -> impl IntoResponse {
    let request = body.map(|Json(r)| r).unwrap_or_default();

    // Inputs of an in-flight run were already read; leave the slots alone
    if !state.session.is_running() {
        state.session.with_surface(|d| {
            if let Some(name) = request.name {
                d.name_input = name;
            }
            if let Some(credit) = request.credit {
                d.credit_input = credit;
            }
        });
    }

    let response: RunResponse = state.session.run_demo().await.into();
    (StatusCode::OK, Json(ApiResponse::ok(response)))
}

/// GET /api/views - Navigation entries, panels, breadcrumb
async fn get_views(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.router_state()))
}

/// POST /api/views/:target - Activate the entry declaring `target`
async fn activate_view(
    State(state): State<AppState>,
    Path(target): Path<String>,
) -> impl IntoResponse {
    let views = {
        let mut router = state
            .router
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        router.activate_target(&target);
        router.state()
    };

    Json(ApiResponse::ok(views))
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;

    println!("🌐 Civic Trust Score - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let config = SimulationConfig::from_env()?;
    info!(?config, "simulation config loaded");

    let mut router = dashboard_router();
    router.on_navigate(|entry| info!(view = %entry.target, label = %entry.label, "view activated"));

    // Create shared state
    let state = AppState {
        session: Arc::new(Session::new(Dashboard::new(), config)),
        router: Arc::new(Mutex::new(router)),
    };

    // Build API routes
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/dashboard", get(get_dashboard))
        .route("/run", post(run_demo))
        .route("/views", get(get_views))
        .route("/views/:target", post(activate_view))
        .with_state(state);

    // Build main router
    let app = Router::new().nest("/api", api_routes).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    // Start server
    let addr = std::env::var("CIVIC_TRUST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    println!("\n🚀 Server running on http://{}", addr);
    println!("   API: http://{}/api/dashboard", addr);
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_response_shape() {
        let json = serde_json::to_value(ApiResponse::ok("OK")).unwrap();
        assert_eq!(json, serde_json::json!({ "success": true, "data": "OK" }));
    }

    #[test]
    fn test_already_running_response() {
        let json = serde_json::to_value(RunResponse::from(RunOutcome::AlreadyRunning)).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "already_running" }));
    }
}
