//! Service layer: the Gemini client, strategy generation and the submission flow.

pub mod gemini;
pub mod session;
pub mod strategy;

pub use gemini::GeminiClient;
pub use strategy::StrategyGenerator;
