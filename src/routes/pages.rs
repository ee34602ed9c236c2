//! HTML pages: the profile form, its submission and the dashboard reset.

use axum::{
    extract::State,
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use std::sync::Arc;

use crate::app::AppState;
use crate::domain::profile::ProfileForm;
use crate::middleware::request_id::RequestIdExt;
use crate::services::session::submit;
use crate::views::{render_dashboard, render_form};

/// Dashboard when a report exists, otherwise the form.
///
/// GET /
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let session = state.session.lock();
    match session.report() {
        Some(report) => Html(render_dashboard(&report)),
        None => Html(render_form(
            &session.draft,
            session.is_in_flight(),
            session.error(),
        )),
    }
}

/// Replaces the draft with the posted form and runs a generation.
///
/// POST /strategy
pub async fn submit_form(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<ProfileForm>,
) -> Response {
    state.session.lock().draft = form.into();

    match submit(&state.session, &state.generator, headers.request_id()).await {
        Ok(_) => Redirect::to("/").into_response(),
        Err(err) => {
            let status = err.status_code();
            let message = err.public_message();
            let session = state.session.lock();
            let page = render_form(&session.draft, session.is_in_flight(), Some(&message));
            (status, Html(page)).into_response()
        }
    }
}

/// POST /reset
pub async fn reset(State(state): State<Arc<AppState>>) -> Redirect {
    state.session.lock().reset();
    Redirect::to("/")
}
