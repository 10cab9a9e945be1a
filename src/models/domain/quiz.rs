use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of options every quiz item must carry.
pub const OPTIONS_PER_ITEM: usize = 4;

/// Number of items on every persisted quiz revision.
pub const ITEMS_PER_QUIZ: usize = 10;

/// A single multiple-choice question. Value type, addressed only through
/// its position in `Quiz::items`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizItem {
    pub stem: String,
    pub options: Vec<String>,
    pub correct_option: usize,
    pub source_snippet: String,
}

impl QuizItem {
    /// Shape check applied to generator output before anything is persisted.
    pub fn is_well_formed(&self) -> bool {
        !self.stem.trim().is_empty()
            && self.options.len() == OPTIONS_PER_ITEM
            && self.correct_option < self.options.len()
    }
}

/// One immutable revision in a quiz's version chain. Edits insert a new row
/// linked through `parent_id`; only `published_at` is ever updated in place.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub items: Vec<QuizItem>,
    pub deleted_items: Vec<QuizItem>,
    pub source_id: String,
    pub parent_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

impl Quiz {
    /// First revision for a source page.
    pub fn new_root(title: String, slug: String, items: Vec<QuizItem>, source_id: &str) -> Self {
        Quiz {
            id: Uuid::new_v4().to_string(),
            title,
            slug,
            items,
            deleted_items: Vec::new(),
            source_id: source_id.to_string(),
            parent_id: None,
            created_at: Utc::now(),
            published_at: None,
        }
    }

    /// Follow-up revision produced by an edit. Title and source carry over
    /// from the parent; the new row starts unpublished.
    pub fn new_revision(
        parent: &Quiz,
        slug: String,
        items: Vec<QuizItem>,
        deleted_items: Vec<QuizItem>,
    ) -> Self {
        Quiz {
            id: Uuid::new_v4().to_string(),
            title: parent.title.clone(),
            slug,
            items,
            deleted_items,
            source_id: parent.source_id.clone(),
            parent_id: Some(parent.id.clone()),
            created_at: Utc::now(),
            published_at: None,
        }
    }
}
