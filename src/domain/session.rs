//! Per-process session state: the draft being edited, the single current
//! report slot, the in-flight flag and the error banner.

use std::sync::Arc;

use super::profile::{CompanyProfile, ProfileDraft};
use super::report::GeneratedReport;
use crate::error::ValidationError;

#[derive(Debug, Default)]
pub struct Session {
    pub draft: ProfileDraft,
    report: Option<Arc<GeneratedReport>>,
    in_flight: bool,
    error: Option<String>,
}

/// Why a submission could not start.
#[derive(Debug, PartialEq, Eq)]
pub enum SubmitRejection {
    InFlight,
    Invalid(ValidationError),
}

impl Session {
    pub fn report(&self) -> Option<Arc<GeneratedReport>> {
        self.report.clone()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Validates the draft and, if accepted, marks a generation as in flight.
    ///
    /// The previous report and banner are discarded on acceptance.
    pub fn begin_submission(&mut self) -> Result<CompanyProfile, SubmitRejection> {
        if self.in_flight {
            return Err(SubmitRejection::InFlight);
        }
        let profile = self.draft.validate().map_err(SubmitRejection::Invalid)?;

        self.in_flight = true;
        self.report = None;
        self.error = None;
        Ok(profile)
    }

    pub fn finish_submission(&mut self) {
        self.in_flight = false;
    }

    pub fn store_report(&mut self, report: GeneratedReport) -> Arc<GeneratedReport> {
        let report = Arc::new(report);
        self.report = Some(Arc::clone(&report));
        self.error = None;
        report
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Discards the report and any banner; the draft is kept for the next run.
    pub fn reset(&mut self) {
        self.report = None;
        self.error = None;
    }
}
