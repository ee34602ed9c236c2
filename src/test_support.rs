//! Shared fixtures for unit and router tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::Notify;

use crate::app::AppState;
use crate::config::Settings;
use crate::domain::profile::{CompanySize, ProfileDraft, StrategicGoal};
use crate::error::GenerationError;
use crate::services::strategy::{GenerationRequest, StrategyGenerator, TextGenerator};

/// The Acme retail profile used across tests.
pub fn acme_draft() -> ProfileDraft {
    let mut draft = ProfileDraft::default();
    draft.set_name("Acme");
    draft.set_industry("Retail");
    draft.set_size(CompanySize::Sme);
    draft.toggle_goal(StrategicGoal::Optimization);
    draft.set_current_tech_stack("legacy ERP");
    draft.set_challenges("slow reporting");
    draft
}

/// A complete, schema-conforming reply with four recommendations.
pub fn report_json() -> String {
    json!({
        "executiveSummary": "Modernize reporting before scaling AI initiatives.",
        "pillars": {
            "optimization": [
                {
                    "title": "Automated sales reporting",
                    "description": "Replace manual ERP exports with scheduled pipelines.",
                    "impactScore": 80,
                    "complexityScore": 30,
                    "roiEstimate": "35%"
                },
                {
                    "title": "Inventory forecasting",
                    "description": "Demand forecasting on store-level data.",
                    "impactScore": 70,
                    "complexityScore": 55,
                    "roiEstimate": "High"
                }
            ],
            "innovation": [
                {
                    "title": "Personalized offers",
                    "description": "Recommendation engine for loyalty members.",
                    "impactScore": 65,
                    "complexityScore": 70,
                    "roiEstimate": "Medium"
                }
            ],
            "decisions": [
                {
                    "title": "Executive KPI cockpit",
                    "description": "Daily margin and stock dashboards for leadership.",
                    "impactScore": 75,
                    "complexityScore": 40,
                    "roiEstimate": "20%"
                }
            ]
        },
        "roadmap": [
            {
                "phase": "Foundation",
                "duration": "0-3 months",
                "actions": ["Audit ERP data", "Stand up a cloud warehouse"]
            },
            {
                "phase": "Scale",
                "duration": "3-9 months",
                "actions": ["Launch forecasting", "Roll out KPI cockpit"]
            }
        ],
        "risksAndMitigation": [
            {
                "risk": "Poor data quality in the legacy ERP",
                "mitigation": "Data stewardship program before model training"
            }
        ]
    })
    .to_string()
}

/// Reply with a single optimization recommendation and empty other pillars.
pub fn single_optimization_json() -> String {
    json!({
        "executiveSummary": "Focus on efficiency.",
        "pillars": {
            "optimization": [
                {
                    "title": "Automated sales reporting",
                    "description": "Replace manual exports.",
                    "impactScore": 80,
                    "complexityScore": 30,
                    "roiEstimate": "35%"
                }
            ],
            "innovation": [],
            "decisions": []
        },
        "roadmap": [],
        "risksAndMitigation": []
    })
    .to_string()
}

enum Script {
    Reply(String),
    Fail,
}

/// `TextGenerator` that records every request and answers from a script.
pub struct ScriptedGenerator {
    script: Script,
    requests: Mutex<Vec<GenerationRequest>>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedGenerator {
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            script: Script::Reply(text.into()),
            requests: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    pub fn failing() -> Self {
        Self {
            script: Script::Fail,
            requests: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    /// Holds every reply until the gate is notified.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate_text(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        self.requests.lock().push(request.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match &self.script {
            Script::Reply(text) => Ok(text.clone()),
            Script::Fail => Err(GenerationError::Transport("connection refused".to_string())),
        }
    }
}

/// Application state wired to a scripted backend.
pub fn state_with(backend: Arc<ScriptedGenerator>) -> Arc<AppState> {
    let settings = Settings::for_tests();
    let generator = StrategyGenerator::new(backend, &settings);
    AppState::new(settings, generator)
}
