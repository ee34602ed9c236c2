//! Top-level submission flow between the profile collector and the generator.

use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{error, info};

use super::strategy::StrategyGenerator;
use crate::domain::report::GeneratedReport;
use crate::domain::session::{Session, SubmitRejection};
use crate::error::{ApiError, ApiResult, GENERATION_FAILED_MESSAGE};

/// Clears the in-flight flag however the generation call settles.
struct InFlightGuard<'a> {
    session: &'a Mutex<Session>,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.session.lock().finish_submission();
    }
}

/// Validates the session draft and runs one generation round trip.
///
/// On failure the detailed cause is logged and the session carries the
/// generic banner; the report slot stays empty.
pub async fn submit(
    session: &Mutex<Session>,
    generator: &StrategyGenerator,
    request_id: Option<&str>,
) -> ApiResult<Arc<GeneratedReport>> {
    let profile = session.lock().begin_submission().map_err(|rejection| match rejection {
        SubmitRejection::InFlight => {
            ApiError::Conflict("A strategy is already being generated".to_string())
        }
        SubmitRejection::Invalid(e) => ApiError::Validation(e),
    })?;
    let _guard = InFlightGuard { session };

    info!(
        request_id = request_id.unwrap_or("-"),
        company = %profile.name,
        goals = profile.primary_goals.len(),
        "Submitting profile for strategy generation"
    );

    match generator.generate(&profile).await {
        Ok(report) => {
            let stored = session
                .lock()
                .store_report(GeneratedReport::new(profile.name, report));
            info!(report_id = %stored.id, "Strategy report ready");
            Ok(stored)
        }
        Err(e) => {
            error!(
                request_id = request_id.unwrap_or("-"),
                error = %e,
                "Strategy generation failed"
            );
            session.lock().set_error(GENERATION_FAILED_MESSAGE);
            Err(ApiError::Generation(e))
        }
    }
}
