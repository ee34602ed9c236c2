//! Company profile domain types
//!
//! `ProfileDraft` is the editable form state; `CompanyProfile` only exists once
//! a draft has passed validation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::error::ValidationError;

/// Strategic axis the organization wants the AI plan to focus on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrategicGoal {
    Optimization,
    Innovation,
    DecisionMaking,
}

impl StrategicGoal {
    pub const ALL: [StrategicGoal; 3] = [
        StrategicGoal::Optimization,
        StrategicGoal::Innovation,
        StrategicGoal::DecisionMaking,
    ];

    /// Wire name, as sent in prompts and form values.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Optimization => "OPTIMIZATION",
            Self::Innovation => "INNOVATION",
            Self::DecisionMaking => "DECISION_MAKING",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Optimization => "Optimization",
            Self::Innovation => "Innovation",
            Self::DecisionMaking => "Decisions",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Optimization => "#4f46e5",
            Self::Innovation => "#10b981",
            Self::DecisionMaking => "#f59e0b",
        }
    }
}

impl fmt::Display for StrategicGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompanySize {
    Startup,
    #[serde(rename = "SME")]
    Sme,
    Corporation,
    Global500,
}

impl CompanySize {
    pub const ALL: [CompanySize; 4] = [
        CompanySize::Startup,
        CompanySize::Sme,
        CompanySize::Corporation,
        CompanySize::Global500,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Startup => "Startup",
            Self::Sme => "SME",
            Self::Corporation => "Corporation",
            Self::Global500 => "Global500",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Global500 => "Global 500",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for CompanySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A profile that passed validation and is ready for generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    pub name: String,
    pub industry: String,
    pub size: CompanySize,
    pub primary_goals: BTreeSet<StrategicGoal>,
    pub current_tech_stack: String,
    pub challenges: String,
}

/// Editable profile state held by the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileDraft {
    pub name: String,
    pub industry: String,
    pub size: Option<CompanySize>,
    pub primary_goals: BTreeSet<StrategicGoal>,
    pub current_tech_stack: String,
    pub challenges: String,
}

impl ProfileDraft {
    pub fn set_name(&mut self, value: impl Into<String>) {
        self.name = value.into();
    }

    pub fn set_industry(&mut self, value: impl Into<String>) {
        self.industry = value.into();
    }

    pub fn set_size(&mut self, size: CompanySize) {
        self.size = Some(size);
    }

    pub fn set_current_tech_stack(&mut self, value: impl Into<String>) {
        self.current_tech_stack = value.into();
    }

    pub fn set_challenges(&mut self, value: impl Into<String>) {
        self.challenges = value.into();
    }

    /// Adds the goal when absent, removes it when present.
    pub fn toggle_goal(&mut self, goal: StrategicGoal) {
        if !self.primary_goals.remove(&goal) {
            self.primary_goals.insert(goal);
        }
    }

    pub fn has_goal(&self, goal: StrategicGoal) -> bool {
        self.primary_goals.contains(&goal)
    }

    /// Applies each field present in the patch, one field at a time.
    pub fn apply(&mut self, patch: ProfilePatch) {
        if let Some(name) = patch.name {
            self.set_name(name);
        }
        if let Some(industry) = patch.industry {
            self.set_industry(industry);
        }
        if let Some(size) = patch.size {
            self.set_size(size);
        }
        if let Some(goals) = patch.primary_goals {
            self.primary_goals = goals.into_iter().collect();
        }
        if let Some(stack) = patch.current_tech_stack {
            self.set_current_tech_stack(stack);
        }
        if let Some(challenges) = patch.challenges {
            self.set_challenges(challenges);
        }
    }

    /// Checks goals, then size, then the required text fields.
    pub fn validate(&self) -> Result<CompanyProfile, ValidationError> {
        if self.primary_goals.is_empty() {
            return Err(ValidationError::NoGoals);
        }
        let size = self.size.ok_or(ValidationError::MissingSize)?;

        Ok(CompanyProfile {
            name: required("name", &self.name)?,
            industry: required("industry", &self.industry)?,
            size,
            primary_goals: self.primary_goals.clone(),
            current_tech_stack: required("currentTechStack", &self.current_tech_stack)?,
            challenges: required("challenges", &self.challenges)?,
        })
    }
}

fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(value.to_string())
    }
}

/// Partial edit of a draft (JSON API).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub size: Option<CompanySize>,
    #[serde(default)]
    pub primary_goals: Option<Vec<StrategicGoal>>,
    #[serde(default)]
    pub current_tech_stack: Option<String>,
    #[serde(default)]
    pub challenges: Option<String>,
}

/// URL-encoded body of the HTML form. Checkboxes repeat `primaryGoals`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub size: Option<CompanySize>,
    #[serde(default)]
    pub primary_goals: Vec<StrategicGoal>,
    #[serde(default)]
    pub current_tech_stack: String,
    #[serde(default)]
    pub challenges: String,
}

impl From<ProfileForm> for ProfileDraft {
    fn from(form: ProfileForm) -> Self {
        Self {
            name: form.name,
            industry: form.industry,
            size: form.size,
            primary_goals: form.primary_goals.into_iter().collect(),
            current_tech_stack: form.current_tech_stack,
            challenges: form.challenges,
        }
    }
}
