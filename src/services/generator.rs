//! Quiz-content generator client and the validation applied to its output.
//!
//! Generator text is an untrusted boundary: everything that comes back is
//! code-fence stripped, parsed as JSON and shape-checked before any record
//! is built from it.

use std::time::Duration;

use async_openai::{config::OpenAIConfig, types::responses::CreateResponseArgs, Client};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use secrecy::ExposeSecret;
use serde::Deserialize;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{QuizItem, OPTIONS_PER_ITEM},
};

/// Outbound collaborator producing quiz content from a prompt. One attempt
/// per call; retry policy is deliberately absent.
#[async_trait]
pub trait QuizGenerator: Send + Sync {
    async fn complete(&self, prompt: &str) -> AppResult<String>;
}

const MAX_OUTPUT_TOKENS: u32 = 8192;

/// `QuizGenerator` backed by an OpenAI-compatible model.
pub struct OpenAiQuizGenerator {
    client: Client<OpenAIConfig>,
    model: String,
    timeout: Duration,
}

impl OpenAiQuizGenerator {
    pub fn new(config: &Config) -> Self {
        let openai_config =
            OpenAIConfig::new().with_api_key(config.openai_api_key.expose_secret());
        Self {
            client: Client::with_config(openai_config),
            model: config.generation_model.clone(),
            timeout: Duration::from_secs(config.generation_timeout_secs),
        }
    }
}

#[async_trait]
impl QuizGenerator for OpenAiQuizGenerator {
    async fn complete(&self, prompt: &str) -> AppResult<String> {
        let request = CreateResponseArgs::default()
            .model(&self.model)
            .input(prompt)
            .max_output_tokens(MAX_OUTPUT_TOKENS)
            .build()
            .map_err(|e| AppError::GenerationFailure(e.to_string()))?;

        let response = with_deadline(self.timeout, async {
            self.client
                .responses()
                .create(request)
                .await
                .map_err(|e| AppError::GenerationFailure(e.to_string()))
        })
        .await?;

        let text = response.output_text().unwrap_or_default();
        if text.trim().is_empty() {
            return Err(AppError::GenerationFailure(
                "generator returned no text".to_string(),
            ));
        }
        Ok(text)
    }
}

/// Bound a generator round-trip; an overrun surfaces as
/// `GenerationTimeout` carrying the limit in seconds.
async fn with_deadline<T, F>(limit: Duration, call: F) -> AppResult<T>
where
    F: std::future::Future<Output = AppResult<T>>,
{
    tokio::time::timeout(limit, call)
        .await
        .map_err(|_| AppError::GenerationTimeout(limit.as_secs()))?
}

/// Shape the create prompt asks for: `{title, slug, items}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuiz {
    pub title: String,
    #[serde(default)]
    pub slug: String,
    pub items: Vec<QuizItem>,
}

static CODE_FENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^```(?:json)?\n?|\n?```$").expect("CODE_FENCE_RE is a valid regex pattern")
});

/// Drop a surrounding Markdown code fence, if the model added one.
pub fn strip_code_fence(text: &str) -> String {
    CODE_FENCE_RE.replace_all(text.trim(), "").to_string()
}

/// Parse and validate a full create response.
pub fn parse_generated_quiz(raw: &str, expected_items: usize) -> AppResult<GeneratedQuiz> {
    let generated: GeneratedQuiz = serde_json::from_str(&strip_code_fence(raw))
        .map_err(|e| AppError::GenerationParseFailure(format!("invalid quiz JSON: {}", e)))?;

    if generated.title.trim().is_empty() {
        return Err(AppError::GenerationParseFailure(
            "quiz title is empty".to_string(),
        ));
    }
    validate_items(&generated.items, expected_items)?;
    Ok(generated)
}

/// Parse and validate a revise response: a bare array of items.
pub fn parse_generated_items(raw: &str, expected_items: usize) -> AppResult<Vec<QuizItem>> {
    let items: Vec<QuizItem> = serde_json::from_str(&strip_code_fence(raw))
        .map_err(|e| AppError::GenerationParseFailure(format!("invalid items JSON: {}", e)))?;

    validate_items(&items, expected_items)?;
    Ok(items)
}

fn validate_items(items: &[QuizItem], expected: usize) -> AppResult<()> {
    if items.len() != expected {
        return Err(AppError::GenerationParseFailure(format!(
            "expected {} items, got {}",
            expected,
            items.len()
        )));
    }
    for (idx, item) in items.iter().enumerate() {
        if !item.is_well_formed() {
            return Err(AppError::GenerationParseFailure(format!(
                "item {} is malformed: {} options, correct option {}",
                idx,
                item.options.len(),
                item.correct_option
            )));
        }
    }
    debug_assert!(items.iter().all(|i| i.options.len() == OPTIONS_PER_ITEM));
    Ok(())
}
