//! Strategy report models matching the JSON schema enforced on the model.
//!
//! Field names are camelCase on the wire so the schema, the prompt and these
//! types stay in lockstep.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single proposed initiative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyRecommendation {
    pub title: String,
    pub description: String,
    /// 1-100
    pub impact_score: f64,
    /// 1-100
    pub complexity_score: f64,
    pub roi_estimate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyRoadmapStep {
    pub phase: String,
    pub duration: String,
    /// Execution order.
    pub actions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskEntry {
    pub risk: String,
    pub mitigation: String,
}

/// The three strategic themes recommendations are bucketed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pillar {
    Optimization,
    Innovation,
    Decisions,
}

impl Pillar {
    /// Display order on the dashboard.
    pub const ALL: [Pillar; 3] = [Pillar::Optimization, Pillar::Innovation, Pillar::Decisions];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Optimization => "Optimization",
            Self::Innovation => "Innovation",
            Self::Decisions => "Decisions",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Optimization => "#4f46e5",
            Self::Innovation => "#10b981",
            Self::Decisions => "#f59e0b",
        }
    }
}

/// Every key is required; an empty list is fine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pillars {
    pub optimization: Vec<StrategyRecommendation>,
    pub innovation: Vec<StrategyRecommendation>,
    pub decisions: Vec<StrategyRecommendation>,
}

impl Pillars {
    pub fn get(&self, pillar: Pillar) -> &[StrategyRecommendation] {
        match pillar {
            Pillar::Optimization => &self.optimization,
            Pillar::Innovation => &self.innovation,
            Pillar::Decisions => &self.decisions,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Pillar, &StrategyRecommendation)> {
        Pillar::ALL
            .into_iter()
            .flat_map(move |pillar| self.get(pillar).iter().map(move |rec| (pillar, rec)))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut StrategyRecommendation> {
        self.optimization
            .iter_mut()
            .chain(self.innovation.iter_mut())
            .chain(self.decisions.iter_mut())
    }

    pub fn total(&self) -> usize {
        self.optimization.len() + self.innovation.len() + self.decisions.len()
    }
}

/// Structured strategy output returned by the generation step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiStrategyReport {
    pub executive_summary: String,
    pub pillars: Pillars,
    pub roadmap: Vec<StrategyRoadmapStep>,
    pub risks_and_mitigation: Vec<RiskEntry>,
}

/// The report held in the session's current-report slot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedReport {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub company: String,
    pub report: AiStrategyReport,
}

impl GeneratedReport {
    pub fn new(company: impl Into<String>, report: AiStrategyReport) -> Self {
        Self {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            company: company.into(),
            report,
        }
    }
}
