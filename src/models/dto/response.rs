use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{Quiz, Webpage};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuizResponse {
    pub quiz_slug: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditQuizResponse {
    pub quiz_slug: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TogglePublishResponse {
    pub published_at: Option<DateTime<Utc>>,
}

/// Summary of the source page attached to quiz reads. The page body is
/// deliberately left out of API responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSource {
    pub url: String,
    pub title: String,
    pub favicon: Option<String>,
}

/// A quiz joined with its source page, the shape returned by the read
/// endpoints.
#[derive(Debug, Serialize)]
pub struct QuizWithSource {
    #[serde(flatten)]
    pub quiz: Quiz,
    pub source: QuizSource,
}

impl QuizWithSource {
    pub fn from_parts(quiz: Quiz, webpage: &Webpage) -> Self {
        QuizWithSource {
            quiz,
            source: QuizSource {
                url: webpage.url.clone(),
                title: webpage.title.clone(),
                favicon: webpage.favicon.clone(),
            },
        }
    }
}
