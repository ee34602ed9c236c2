use anyhow::{Context, Result};
use std::env;
use url::Url;

use crate::logging::LogFormat;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Staging,
    Prod,
}

impl Environment {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "prod" | "production" => Self::Prod,
            "staging" => Self::Staging,
            _ => Self::Dev,
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub env: Environment,
    pub server_addr: String,
    pub log_format: LogFormat,

    // CORS
    pub cors_allow_origins: Vec<String>,

    // Gemini
    pub gemini_api_key: String,
    pub gemini_base_url: String,
    pub gemini_model: String,
    pub ai_timeout_seconds: u64,
    pub ai_temperature: f32,

    // Report
    pub report_language: String,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let env = Environment::from_str(&env::var("ENV").unwrap_or_else(|_| "dev".to_string()));
        let server_addr = env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let log_format = LogFormat::resolve(&env, env::var("LOG_FORMAT").ok().as_deref());

        // CORS
        let cors_allow_origins = env::var("CORS_ALLOW_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        // Gemini
        let gemini_api_key = env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("API_KEY"))
            .context("GEMINI_API_KEY (or API_KEY) must be set")?;
        let gemini_base_url = env::var("GEMINI_BASE_URL")
            .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string());
        Url::parse(&gemini_base_url)
            .with_context(|| format!("GEMINI_BASE_URL is not a valid URL: {gemini_base_url}"))?;
        let gemini_model =
            env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-3-flash-preview".to_string());
        let ai_timeout_seconds = env::var("AI_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(120); // 2 minutes default for LLM calls
        let ai_temperature = env::var("AI_TEMPERATURE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0.4);

        let report_language =
            env::var("REPORT_LANGUAGE").unwrap_or_else(|_| "English".to_string());

        Ok(Settings {
            env,
            server_addr,
            log_format,
            cors_allow_origins,
            gemini_api_key,
            gemini_base_url,
            gemini_model,
            ai_timeout_seconds,
            ai_temperature,
            report_language,
        })
    }
}

#[cfg(test)]
impl Settings {
    /// Settings suitable for router tests; nothing here reaches the network.
    pub fn for_tests() -> Self {
        Settings {
            env: Environment::Dev,
            server_addr: "127.0.0.1:0".to_string(),
            log_format: LogFormat::Pretty,
            cors_allow_origins: Vec::new(),
            gemini_api_key: "test-key".to_string(),
            gemini_base_url: "http://127.0.0.1:9".to_string(),
            gemini_model: "gemini-test".to_string(),
            ai_timeout_seconds: 5,
            ai_temperature: 0.4,
            report_language: "English".to_string(),
        }
    }
}
