#![allow(dead_code)] // each test binary uses its own slice of this module

//! In-memory collaborators and fixtures shared by the integration tests.
//! Repositories mimic the persistence contract (unique URL and slug keys);
//! fetcher and generator are scripted and count their calls.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::SecretString;
use tokio::sync::{Mutex, RwLock};

use quizfeed_server::{
    app_state::AppState,
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{Quiz, Webpage},
    repositories::{QuizRepository, WebpageRepository},
    services::{PageContent, PageFetcher, QuizGenerator},
};

pub fn test_config() -> Config {
    Config {
        mongo_conn_string: "mongodb://localhost:27017".to_string(),
        mongo_db_name: "quizfeed-test".to_string(),
        exa_api_key: SecretString::from("test exa key".to_string()),
        openai_api_key: SecretString::from("test openai key".to_string()),
        generation_model: "gpt-4o".to_string(),
        generation_timeout_secs: 5,
        web_server_host: "127.0.0.1".to_string(),
        web_server_port: 8080,
    }
}

#[derive(Default)]
pub struct InMemoryWebpageRepository {
    rows: RwLock<HashMap<String, Webpage>>,
}

#[async_trait]
impl WebpageRepository for InMemoryWebpageRepository {
    async fn find_by_url(&self, url: &str) -> AppResult<Option<Webpage>> {
        Ok(self
            .rows
            .read()
            .await
            .values()
            .find(|w| w.url == url)
            .cloned())
    }

    async fn find_or_insert(&self, webpage: Webpage) -> AppResult<Webpage> {
        let mut rows = self.rows.write().await;
        if let Some(existing) = rows.values().find(|w| w.url == webpage.url) {
            return Ok(existing.clone());
        }
        rows.insert(webpage.id.clone(), webpage.clone());
        Ok(webpage)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Webpage>> {
        Ok(self.rows.read().await.get(id).cloned())
    }

    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Webpage>> {
        let rows = self.rows.read().await;
        Ok(ids.iter().filter_map(|id| rows.get(id).cloned()).collect())
    }
}

#[derive(Default)]
pub struct InMemoryQuizRepository {
    rows: RwLock<HashMap<String, Quiz>>,
}

impl InMemoryQuizRepository {
    pub async fn all(&self) -> Vec<Quiz> {
        self.rows.read().await.values().cloned().collect()
    }
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        Ok(self.rows.read().await.get(id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Quiz>> {
        Ok(self
            .rows
            .read()
            .await
            .values()
            .find(|q| q.slug == slug)
            .cloned())
    }

    async fn find_by_source_id(&self, source_id: &str) -> AppResult<Option<Quiz>> {
        Ok(self
            .rows
            .read()
            .await
            .values()
            .find(|q| q.source_id == source_id && q.parent_id.is_none())
            .cloned())
    }

    async fn list_published(&self) -> AppResult<Vec<Quiz>> {
        let mut published: Vec<Quiz> = self
            .rows
            .read()
            .await
            .values()
            .filter(|q| q.published_at.is_some())
            .cloned()
            .collect();
        published.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(published)
    }

    async fn insert(&self, quiz: Quiz) -> AppResult<Quiz> {
        let mut rows = self.rows.write().await;
        if rows.values().any(|q| q.slug == quiz.slug) {
            return Err(AppError::ConflictFailure(format!(
                "slug '{}' already taken",
                quiz.slug
            )));
        }
        // mirrors the store's partial unique index on root quizzes
        if quiz.parent_id.is_none()
            && rows
                .values()
                .any(|q| q.source_id == quiz.source_id && q.parent_id.is_none())
        {
            return Err(AppError::ConflictFailure(format!(
                "source '{}' already has a root quiz",
                quiz.source_id
            )));
        }
        rows.insert(quiz.id.clone(), quiz.clone());
        Ok(quiz)
    }

    async fn set_published_at(
        &self,
        id: &str,
        published_at: Option<DateTime<Utc>>,
    ) -> AppResult<()> {
        let mut rows = self.rows.write().await;
        let quiz = rows
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))?;
        quiz.published_at = published_at;
        Ok(())
    }
}

/// Fetcher that always returns the same page and counts how often it ran.
pub struct StubPageFetcher {
    pub content: PageContent,
    pub calls: AtomicUsize,
}

impl StubPageFetcher {
    pub fn new() -> Self {
        Self {
            content: PageContent {
                title: "The History of Rubber Ducks".to_string(),
                text: "Rubber ducks were first produced in the late 1800s.".to_string(),
                favicon: Some("https://ducks.example/favicon.ico".to_string()),
            },
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for StubPageFetcher {
    async fn fetch(&self, _url: &str) -> AppResult<PageContent> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.content.clone())
    }
}

/// Generator that replays a fixed sequence of responses.
pub struct ScriptedGenerator {
    responses: Mutex<VecDeque<String>>,
    pub calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuizGenerator for ScriptedGenerator {
    async fn complete(&self, _prompt: &str) -> AppResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .await
            .pop_front()
            .ok_or_else(|| AppError::GenerationFailure("no scripted response left".to_string()))
    }
}

/// JSON for one well-formed item whose stem carries `marker`.
pub fn item_json(marker: &str) -> String {
    format!(
        r#"{{"stem": "What about {}?", "options": ["a", "b", "c", "d"], "correctOption": 1, "sourceSnippet": "snippet {}"}}"#,
        marker, marker
    )
}

/// A create response: quiz object with items marked `prefix-0..n`.
pub fn quiz_response(title: &str, slug: &str, prefix: &str, n: usize) -> String {
    let items: Vec<String> = (0..n).map(|i| item_json(&format!("{}-{}", prefix, i))).collect();
    format!(
        r#"{{"title": "{}", "slug": "{}", "items": [{}]}}"#,
        title,
        slug,
        items.join(",")
    )
}

/// A revise response: bare array of items marked `prefix-0..n`.
pub fn items_response(prefix: &str, n: usize) -> String {
    let items: Vec<String> = (0..n).map(|i| item_json(&format!("{}-{}", prefix, i))).collect();
    format!("[{}]", items.join(","))
}

pub struct TestHarness {
    pub state: AppState,
    pub webpage_repository: Arc<InMemoryWebpageRepository>,
    pub quiz_repository: Arc<InMemoryQuizRepository>,
    pub fetcher: Arc<StubPageFetcher>,
    pub generator: Arc<ScriptedGenerator>,
}

/// Wire an `AppState` over in-memory collaborators with the given generator
/// script.
pub fn harness(responses: Vec<String>) -> TestHarness {
    let webpage_repository = Arc::new(InMemoryWebpageRepository::default());
    let quiz_repository = Arc::new(InMemoryQuizRepository::default());
    let fetcher = Arc::new(StubPageFetcher::new());
    let generator = Arc::new(ScriptedGenerator::new(responses));

    let state = AppState::with_components(
        test_config(),
        webpage_repository.clone(),
        quiz_repository.clone(),
        fetcher.clone(),
        generator.clone(),
    );

    TestHarness {
        state,
        webpage_repository,
        quiz_repository,
        fetcher,
        generator,
    }
}
