use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
};

/// Extracted content of a source page, as reported by the fetcher.
#[derive(Debug, Clone)]
pub struct PageContent {
    pub title: String,
    pub text: String,
    pub favicon: Option<String>,
}

/// Outbound collaborator that turns a URL into title/body/favicon.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> AppResult<PageContent>;
}

const EXA_CONTENTS_ENDPOINT: &str = "https://api.exa.ai/contents";

/// `PageFetcher` backed by the Exa contents API.
pub struct ExaPageFetcher {
    http: reqwest::Client,
    api_key: SecretString,
    endpoint: String,
}

impl ExaPageFetcher {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: config.exa_api_key.clone(),
            endpoint: EXA_CONTENTS_ENDPOINT.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ExaContentsResponse {
    #[serde(default)]
    results: Vec<ExaPageResult>,
}

#[derive(Debug, Deserialize)]
struct ExaPageResult {
    title: Option<String>,
    text: Option<String>,
    favicon: Option<String>,
}

#[async_trait]
impl PageFetcher for ExaPageFetcher {
    async fn fetch(&self, url: &str) -> AppResult<PageContent> {
        let response = self
            .http
            .post(&self.endpoint)
            .header("x-api-key", self.api_key.expose_secret())
            .json(&serde_json::json!({ "urls": [url], "text": true }))
            .send()
            .await
            .map_err(|e| AppError::FetchFailure(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::FetchFailure(format!(
                "contents API returned {} for '{}'",
                response.status(),
                url
            )));
        }

        let body: ExaContentsResponse = response
            .json()
            .await
            .map_err(|e| AppError::FetchFailure(e.to_string()))?;

        let result = body
            .results
            .into_iter()
            .next()
            .ok_or_else(|| AppError::FetchFailure(format!("no content returned for '{}'", url)))?;

        match (result.title, result.text) {
            (Some(title), Some(text)) => Ok(PageContent {
                title,
                text,
                favicon: result.favicon,
            }),
            _ => Err(AppError::FetchFailure(format!(
                "content for '{}' is missing a title or body",
                url
            ))),
        }
    }
}
