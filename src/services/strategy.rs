//! Strategy generation: prompt construction, the response schema enforced on
//! the model, and normalization/validation of the raw reply.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::config::Settings;
use crate::domain::profile::CompanyProfile;
use crate::domain::report::AiStrategyReport;
use crate::error::GenerationError;

pub const MIN_SCORE: f64 = 1.0;
pub const MAX_SCORE: f64 = 100.0;

/// Sampling and output options sent with every generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    pub temperature: f32,
    pub response_mime_type: &'static str,
    /// Zero disables the intermediate reasoning pass.
    pub thinking_budget: u32,
    pub response_schema: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub model: String,
    pub prompt: String,
    pub config: GenerationConfig,
}

/// Transport to a generative text service. Returns the raw reply text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_text(&self, request: &GenerationRequest) -> Result<String, GenerationError>;

    async fn health_check(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[derive(Clone)]
pub struct StrategyGenerator {
    backend: Arc<dyn TextGenerator>,
    model: String,
    temperature: f32,
    language: String,
}

impl StrategyGenerator {
    pub fn new(backend: Arc<dyn TextGenerator>, settings: &Settings) -> Self {
        Self {
            backend,
            model: settings.gemini_model.clone(),
            temperature: settings.ai_temperature,
            language: settings.report_language.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn health_check(&self) -> anyhow::Result<()> {
        self.backend.health_check().await
    }

    pub fn request_for(&self, profile: &CompanyProfile) -> GenerationRequest {
        GenerationRequest {
            model: self.model.clone(),
            prompt: build_prompt(profile, &self.language),
            config: GenerationConfig {
                temperature: self.temperature,
                response_mime_type: "application/json",
                thinking_budget: 0,
                response_schema: response_schema(),
            },
        }
    }

    /// One round trip: no retry, no caching.
    #[instrument(skip_all, fields(company = %profile.name, model = %self.model))]
    pub async fn generate(
        &self,
        profile: &CompanyProfile,
    ) -> Result<AiStrategyReport, GenerationError> {
        let request = self.request_for(profile);
        let text = self.backend.generate_text(&request).await?;
        let report = parse_report(&text)?;

        info!(
            recommendations = report.pillars.total(),
            roadmap_steps = report.roadmap.len(),
            "Strategy report parsed"
        );

        Ok(report)
    }
}

/// Instruction sent to the model. Profile fields are embedded verbatim.
pub fn build_prompt(profile: &CompanyProfile, language: &str) -> String {
    let goals = profile
        .primary_goals
        .iter()
        .map(|g| g.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "As a senior digital strategy consultant, produce an AI adoption plan for:
Company: {name}
Industry: {industry}
Size: {size}
Goals: {goals}
Technology: {stack}
Challenges: {challenges}

TECHNICAL INSTRUCTIONS:
1. Language: {language}.
2. Tone: executive (C-level).
3. Format: pure JSON, no markdown.
4. FOCUS: concrete actions for optimization, innovation and better decision-making.
",
        name = profile.name,
        industry = profile.industry,
        size = profile.size.label(),
        stack = profile.current_tech_stack,
        challenges = profile.challenges,
    )
}

/// Response schema in the service's OpenAPI subset, mirroring `AiStrategyReport`.
pub fn response_schema() -> Value {
    let recommendation_list = json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "title": { "type": "STRING" },
                "description": { "type": "STRING" },
                "impactScore": { "type": "NUMBER" },
                "complexityScore": { "type": "NUMBER" },
                "roiEstimate": { "type": "STRING" }
            },
            "required": ["title", "description", "impactScore", "complexityScore", "roiEstimate"]
        }
    });

    json!({
        "type": "OBJECT",
        "properties": {
            "executiveSummary": { "type": "STRING" },
            "pillars": {
                "type": "OBJECT",
                "properties": {
                    "optimization": recommendation_list.clone(),
                    "innovation": recommendation_list.clone(),
                    "decisions": recommendation_list
                },
                "required": ["optimization", "innovation", "decisions"]
            },
            "roadmap": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "phase": { "type": "STRING" },
                        "duration": { "type": "STRING" },
                        "actions": { "type": "ARRAY", "items": { "type": "STRING" } }
                    },
                    "required": ["phase", "duration", "actions"]
                }
            },
            "risksAndMitigation": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "risk": { "type": "STRING" },
                        "mitigation": { "type": "STRING" }
                    },
                    "required": ["risk", "mitigation"]
                }
            }
        },
        "required": ["executiveSummary", "pillars", "roadmap", "risksAndMitigation"]
    })
}

/// Removes a surrounding markdown code fence, with or without a language tag.
pub fn strip_markdown_fence(raw: &str) -> &str {
    let trimmed = raw.trim();

    let body = match trimmed.strip_prefix("```") {
        Some(rest) => strip_language_tag(rest),
        None => trimmed,
    };

    let body = body.trim_end();
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Drops the tag after an opening fence. `json` is matched in any case and
/// may run straight into the body; other tags must sit alone on their line.
fn strip_language_tag(rest: &str) -> &str {
    if rest.get(..4).is_some_and(|tag| tag.eq_ignore_ascii_case("json")) {
        return &rest[4..];
    }
    match rest.find('\n') {
        Some(nl) if rest[..nl].trim().chars().all(|c| c.is_ascii_alphanumeric()) => {
            &rest[nl + 1..]
        }
        _ => rest,
    }
}

/// Normalizes the raw reply and validates it into a typed report.
pub fn parse_report(raw: &str) -> Result<AiStrategyReport, GenerationError> {
    let text = strip_markdown_fence(raw);
    if text.is_empty() {
        return Err(GenerationError::EmptyReply);
    }

    let value: Value = serde_json::from_str(text).map_err(GenerationError::MalformedJson)?;
    validate_report(value)
}

/// Structural check on an already-parsed reply.
pub fn validate_report(value: Value) -> Result<AiStrategyReport, GenerationError> {
    if !value.get("pillars").is_some_and(Value::is_object) {
        return Err(GenerationError::InvalidShape(
            "reply has no `pillars` object".to_string(),
        ));
    }

    let mut report: AiStrategyReport = serde_json::from_value(value)
        .map_err(|e| GenerationError::InvalidShape(e.to_string()))?;
    clamp_scores(&mut report);
    Ok(report)
}

/// Out-of-range scores are pulled into 1-100 rather than rejected.
fn clamp_scores(report: &mut AiStrategyReport) {
    for rec in report.pillars.iter_mut() {
        for (field, score) in [
            ("impactScore", &mut rec.impact_score),
            ("complexityScore", &mut rec.complexity_score),
        ] {
            let clamped = score.clamp(MIN_SCORE, MAX_SCORE);
            if clamped != *score {
                warn!(
                    title = %rec.title,
                    field,
                    original = *score,
                    clamped,
                    "Score out of range"
                );
                *score = clamped;
            }
        }
    }
}
