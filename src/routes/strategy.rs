//! JSON API over the same session: draft editing, submission and the report.

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::HeaderMap,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::api::{DataResponse, NoContent};
use crate::app::AppState;
use crate::domain::profile::{ProfilePatch, StrategicGoal};
use crate::domain::report::GeneratedReport;
use crate::error::{ApiError, ApiResult, RequestResult};
use crate::middleware::request_id::RequestIdExt;
use crate::services::session::submit;
use crate::views::chart_points;

fn current_report(state: &AppState) -> ApiResult<Arc<GeneratedReport>> {
    state
        .session
        .lock()
        .report()
        .ok_or_else(|| ApiError::NotFound("No strategy report has been generated".to_string()))
}

/// GET /api/profile
pub async fn get_profile(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let draft = state.session.lock().draft.clone();
    Json(DataResponse::new(draft))
}

/// PATCH /api/profile
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Json(patch): Json<ProfilePatch>,
) -> impl IntoResponse {
    let mut session = state.session.lock();
    session.draft.apply(patch);
    Json(DataResponse::new(session.draft.clone()))
}

/// POST /api/profile/goals/:goal
pub async fn toggle_goal(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    goal: Result<Path<StrategicGoal>, PathRejection>,
) -> RequestResult<impl IntoResponse> {
    let Path(goal) = goal.map_err(|rejection| {
        ApiError::BadRequest(format!("Unknown strategic goal: {}", rejection.body_text()))
            .for_request(headers.request_id())
    })?;

    let mut session = state.session.lock();
    session.draft.toggle_goal(goal);
    Ok(Json(DataResponse::new(session.draft.clone())))
}

/// Submit the current draft for generation.
///
/// POST /api/strategy
pub async fn generate_strategy(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> RequestResult<impl IntoResponse> {
    let request_id = headers.request_id();
    let report = submit(&state.session, &state.generator, request_id)
        .await
        .map_err(|e| e.for_request(request_id))?;
    Ok(Json(DataResponse::new(GeneratedReport::clone(&report))))
}

/// GET /api/report
pub async fn get_report(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> RequestResult<impl IntoResponse> {
    let report = current_report(&state).map_err(|e| e.for_request(headers.request_id()))?;
    Ok(Json(DataResponse::new(GeneratedReport::clone(&report))))
}

/// Flattened priority-matrix dataset for the current report.
///
/// GET /api/report/chart
pub async fn get_report_chart(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> RequestResult<impl IntoResponse> {
    let report = current_report(&state).map_err(|e| e.for_request(headers.request_id()))?;
    Ok(Json(DataResponse::new(chart_points(&report.report))))
}

/// Discard the report and return to the collector.
///
/// DELETE /api/report
pub async fn reset_report(State(state): State<Arc<AppState>>) -> NoContent {
    state.session.lock().reset();
    tracing::info!("Strategy report discarded");
    NoContent
}

#[cfg(test)]
mod tests {
    use crate::app::create_app;
    use crate::test_support::{report_json, state_with, ScriptedGenerator};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, _, value) = send_with_id(app, method, uri, body, None).await;
        (status, value)
    }

    /// Returns the status, the echoed `x-request-id` header and the JSON body.
    async fn send_with_id(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
        request_id: Option<&str>,
    ) -> (StatusCode, Option<String>, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(id) = request_id {
            builder = builder.header("x-request-id", id);
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let res = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = res.status();
        let echoed = res
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, echoed, value)
    }

    async fn fill_acme(app: &Router) {
        let (status, _) = send(
            app,
            "PATCH",
            "/api/profile",
            Some(json!({
                "name": "Acme",
                "industry": "Retail",
                "size": "SME",
                "currentTechStack": "legacy ERP",
                "challenges": "slow reporting"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(app, "POST", "/api/profile/goals/OPTIMIZATION", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn toggling_a_goal_twice_restores_the_draft() {
        let app = create_app(state_with(Arc::new(ScriptedGenerator::replying(report_json()))));

        let (_, first) = send(&app, "POST", "/api/profile/goals/INNOVATION", None).await;
        assert_eq!(first["data"]["primaryGoals"], json!(["INNOVATION"]));
        let (_, second) = send(&app, "POST", "/api/profile/goals/INNOVATION", None).await;
        assert_eq!(second["data"]["primaryGoals"], json!([]));
    }

    #[tokio::test]
    async fn unknown_goal_is_rejected() {
        let app = create_app(state_with(Arc::new(ScriptedGenerator::replying(report_json()))));
        let (status, body) = send(&app, "POST", "/api/profile/goals/GROWTH", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");
        assert!(body["message"].as_str().unwrap().starts_with("Unknown strategic goal"));

        let (_, draft) = send(&app, "GET", "/api/profile", None).await;
        assert_eq!(draft["data"]["primaryGoals"], json!([]));
    }

    #[tokio::test]
    async fn error_bodies_carry_the_request_id() {
        let app = create_app(state_with(Arc::new(ScriptedGenerator::replying(report_json()))));

        let (status, echoed, body) =
            send_with_id(&app, "GET", "/api/report", None, Some("req-7")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(echoed.as_deref(), Some("req-7"));
        assert_eq!(body["request_id"], "req-7");

        // Generated ids are echoed in both places as well
        let (status, echoed, body) =
            send_with_id(&app, "POST", "/api/profile/goals/GROWTH", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let echoed = echoed.expect("request id header");
        assert_eq!(body["request_id"], echoed.as_str());
    }

    #[tokio::test]
    async fn incomplete_draft_is_a_validation_error() {
        let backend = Arc::new(ScriptedGenerator::replying(report_json()));
        let app = create_app(state_with(backend.clone()));
        send(&app, "POST", "/api/profile/goals/OPTIMIZATION", None).await;

        let (status, body) = send(&app, "POST", "/api/strategy", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["message"], "Please indicate the size of the organization.");
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn acme_end_to_end() {
        let backend = Arc::new(ScriptedGenerator::replying(format!(
            "```json\n{}\n```",
            report_json()
        )));
        let app = create_app(state_with(backend));
        fill_acme(&app).await;

        let (status, body) = send(&app, "POST", "/api/strategy", None).await;
        assert_eq!(status, StatusCode::OK);
        let report = &body["data"]["report"];
        assert!(!report["executiveSummary"].as_str().unwrap().is_empty());
        assert!(!report["pillars"]["optimization"].as_array().unwrap().is_empty());
        assert!(!report["roadmap"].as_array().unwrap().is_empty());
        assert_eq!(body["data"]["company"], "Acme");

        let total: usize = ["optimization", "innovation", "decisions"]
            .iter()
            .map(|k| report["pillars"][k].as_array().unwrap().len())
            .sum();
        let (status, chart) = send(&app, "GET", "/api/report/chart", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(chart["data"].as_array().unwrap().len(), total);
        assert_eq!(chart["data"][0]["pillar"], "optimization");
        assert_eq!(chart["data"][0]["complexityScore"], 30.0);
        assert_eq!(chart["data"][0]["impactScore"], 80.0);
    }

    #[tokio::test]
    async fn malformed_reply_hides_details() {
        let app = create_app(state_with(Arc::new(ScriptedGenerator::replying(
            r#"{"executiveSummary":"#,
        ))));
        fill_acme(&app).await;

        let (status, body) = send(&app, "POST", "/api/strategy", None).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["code"], "GENERATION_FAILED");
        assert!(!body["message"].as_str().unwrap().contains("JSON"));

        let (status, _) = send(&app, "GET", "/api/report", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_discards_the_report() {
        let app = create_app(state_with(Arc::new(ScriptedGenerator::replying(report_json()))));
        fill_acme(&app).await;
        send(&app, "POST", "/api/strategy", None).await;

        let (status, _) = send(&app, "GET", "/api/report", None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&app, "DELETE", "/api/report", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(&app, "GET", "/api/report", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }
}
