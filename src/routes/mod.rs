// HTTP routes: JSON API + static frontend

mod api;
mod error;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::config::AppConfig;
use crate::journal_repo::JournalRepo;
use crate::systemctl_repo::SystemctlRepo;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) systemctl: Arc<SystemctlRepo>,
    pub(crate) journal: Arc<JournalRepo>,
}

pub fn app(systemctl: Arc<SystemctlRepo>, journal: Arc<JournalRepo>, config: AppConfig) -> Router {
    let state = AppState { systemctl, journal };
    Router::new()
        .route("/version", get(api::version_handler)) // GET /version
        .route("/api/units", get(api::units)) // GET /api/units?targets=a.target,b.target
        .route("/api/targets", get(api::targets)) // GET /api/targets
        .route("/api/timers", get(api::timers)) // GET /api/timers
        .route("/api/schedule/{unit}", get(api::schedule)) // GET /api/schedule/{unit}
        .route("/api/runs/{unit}", get(api::runs)) // GET /api/runs/{unit}?limit=N
        .route("/api/logs/{unit}/{invocation}", get(api::logs)) // GET /api/logs/{unit}/{invocation}?limit=N
        .route("/api/unit/{unit}", get(api::unit_detail)) // GET /api/unit/{unit}
        .fallback_service(ServeDir::new(&config.server.public_dir))
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
