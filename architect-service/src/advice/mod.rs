//! Expert advice from a hosted text-generation model
//!
//! Questions are wrapped with a short description of the app being
//! containerized and sent to an [`AdviceProvider`]. The call is best effort:
//! there is no retry, and any failure is answered with [`FALLBACK_ANSWER`].

mod gemini;

pub use gemini::GeminiProvider;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::app_config::AppConfig;
use crate::config::AdviceConfig;
use crate::error::{Error, Result};

/// Answer returned when the provider cannot be reached or fails
pub const FALLBACK_ANSWER: &str =
    "I'm having trouble connecting to my DevOps brain. Please check your API configuration.";

/// Answer returned when the provider replies with no text
pub const EMPTY_ANSWER: &str = "No response.";

/// A text-generation backend
#[async_trait]
pub trait AdviceProvider: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &str;

    /// Generate a reply to `prompt` under the given system instruction
    async fn generate(&self, prompt: &str, system_instruction: &str) -> Result<String>;
}

/// Question sent to `/api/advice`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdviceRequest {
    pub question: String,

    /// App the question is about; the configured defaults when omitted
    #[serde(default)]
    pub config: Option<AppConfig>,
}

/// Reply shown under "Expert Advice:"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advice {
    pub answer: String,

    /// True when `answer` is the fixed fallback text
    pub fallback: bool,
}

impl Advice {
    fn fallback() -> Self {
        Self {
            answer: FALLBACK_ANSWER.to_string(),
            fallback: true,
        }
    }
}

/// Build the prompt sent to the model
pub fn build_prompt(question: &str, config: &AppConfig) -> String {
    format!(
        "Context: Generating DevOps manifests for a Node.js app named {}.\n\nUser Question: {}",
        config.app_name, question
    )
}

/// Forwards questions to a provider and applies the fallback rules
#[derive(Clone)]
pub struct AdviceService {
    provider: Arc<dyn AdviceProvider>,
    system_instruction: String,
}

impl AdviceService {
    pub fn new(provider: Arc<dyn AdviceProvider>, system_instruction: impl Into<String>) -> Self {
        Self {
            provider,
            system_instruction: system_instruction.into(),
        }
    }

    /// Service backed by the Gemini API
    pub fn from_config(config: &AdviceConfig) -> Result<Self> {
        let provider = GeminiProvider::from_config(config)?;
        Ok(Self::new(Arc::new(provider), config.system_instruction.clone()))
    }

    /// Ask a question about the given app
    ///
    /// Blank questions are rejected without calling the provider. Provider
    /// failures are logged and answered with the fallback text.
    pub async fn ask(&self, question: &str, config: &AppConfig) -> Result<Advice> {
        let question = question.trim();
        if question.is_empty() {
            return Err(Error::BadRequest("question must not be empty".to_string()));
        }

        let prompt = build_prompt(question, config);
        tracing::debug!(provider = self.provider.name(), "Requesting advice");

        match self.provider.generate(&prompt, &self.system_instruction).await {
            Ok(text) if text.is_empty() => Ok(Advice {
                answer: EMPTY_ANSWER.to_string(),
                fallback: false,
            }),
            Ok(text) => Ok(Advice {
                answer: text,
                fallback: false,
            }),
            Err(e) => {
                tracing::warn!(provider = self.provider.name(), "Advice request failed: {}", e);
                Ok(Advice::fallback())
            }
        }
    }
}

impl std::fmt::Debug for AdviceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdviceService")
            .field("provider", &self.provider.name())
            .finish()
    }
}
