use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        MongoQuizRepository, MongoWebpageRepository, QuizRepository, WebpageRepository,
    },
    services::{
        ExaPageFetcher, OpenAiQuizGenerator, PageFetcher, QuizGenerator, QuizService,
        WebpageService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub webpage_service: Arc<WebpageService>,
    pub quiz_service: Arc<QuizService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let webpage_repository = Arc::new(MongoWebpageRepository::new(&db));
        webpage_repository.ensure_indexes().await?;

        let quiz_repository = Arc::new(MongoQuizRepository::new(&db));
        quiz_repository.ensure_indexes().await?;

        let fetcher = Arc::new(ExaPageFetcher::new(&config));
        let generator = Arc::new(OpenAiQuizGenerator::new(&config));

        Ok(Self::with_components(
            config,
            webpage_repository,
            quiz_repository,
            fetcher,
            generator,
        ))
    }

    /// Wire the services from explicitly constructed handles. Tests use this
    /// to substitute in-memory repositories and scripted collaborators.
    pub fn with_components(
        config: Config,
        webpage_repository: Arc<dyn WebpageRepository>,
        quiz_repository: Arc<dyn QuizRepository>,
        fetcher: Arc<dyn PageFetcher>,
        generator: Arc<dyn QuizGenerator>,
    ) -> Self {
        let webpage_service = Arc::new(WebpageService::new(webpage_repository.clone(), fetcher));
        let quiz_service = Arc::new(QuizService::new(
            quiz_repository,
            webpage_repository,
            generator,
        ));

        Self {
            webpage_service,
            quiz_service,
            config: Arc::new(config),
        }
    }
}
