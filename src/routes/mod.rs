pub mod health;
pub mod pages;
pub mod strategy;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::app::AppState;

/// Build the router with all pages and API routes
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        // HTML pages
        .route("/", get(pages::index))
        .route("/strategy", post(pages::submit_form))
        .route("/reset", post(pages::reset))
        // Profile collector
        .route(
            "/api/profile",
            get(strategy::get_profile).patch(strategy::update_profile),
        )
        .route("/api/profile/goals/:goal", post(strategy::toggle_goal))
        // Generation and report
        .route("/api/strategy", post(strategy::generate_strategy))
        .route(
            "/api/report",
            get(strategy::get_report).delete(strategy::reset_report),
        )
        .route("/api/report/chart", get(strategy::get_report_chart))
}
