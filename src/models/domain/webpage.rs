use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A captured source page. One row per distinct URL; content is treated as
/// immutable once fetched and rows are never deleted.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Webpage {
    pub id: String,
    pub url: String,
    pub title: String,
    pub text: String,
    pub favicon: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Webpage {
    pub fn new(url: &str, title: String, text: String, favicon: Option<String>) -> Self {
        Webpage {
            id: Uuid::new_v4().to_string(),
            url: url.to_string(),
            title,
            text,
            favicon,
            created_at: Utc::now(),
        }
    }
}
