use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub model: String,
    pub services: ServiceHealth,
}

#[derive(Serialize)]
pub struct ServiceHealth {
    pub ai_service: String,
}

/// Health check endpoint - public
///
/// The AI service is not required for the form to work, so an unreachable
/// model only degrades the status.
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<HealthResponse>) {
    let ai_result = state.generator.health_check().await;

    if let Err(e) = &ai_result {
        tracing::warn!(error = %e, "AI service health check failed");
    }

    let (status, ai_status) = if ai_result.is_ok() {
        ("healthy", "ok")
    } else {
        ("degraded", "error")
    };

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            model: state.generator.model().to_string(),
            services: ServiceHealth {
                ai_service: ai_status.to_string(),
            },
        }),
    )
}

#[cfg(test)]
mod tests {
    use crate::app::create_app;
    use crate::test_support::{report_json, state_with, ScriptedGenerator};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    #[tokio::test]
    async fn health_reports_model_and_ai_status() {
        let app = create_app(state_with(Arc::new(ScriptedGenerator::replying(report_json()))));
        let res = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["model"], "gemini-test");
        assert_eq!(json["services"]["ai_service"], "ok");
    }
}
