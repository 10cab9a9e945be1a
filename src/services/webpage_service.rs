use std::sync::Arc;

use crate::{
    errors::AppResult,
    models::domain::Webpage,
    repositories::WebpageRepository,
    services::page_fetcher::PageFetcher,
};

/// Source registry: one `Webpage` row per distinct URL, fetched at most
/// once and never refreshed.
pub struct WebpageService {
    repository: Arc<dyn WebpageRepository>,
    fetcher: Arc<dyn PageFetcher>,
}

impl WebpageService {
    pub fn new(repository: Arc<dyn WebpageRepository>, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            repository,
            fetcher,
        }
    }

    /// Return the registered page for `url`, fetching and persisting it on
    /// first sight. The insert is an atomic insert-if-absent, so two
    /// concurrent requests for a new URL may both fetch but only one row
    /// ends up stored and both callers get it.
    pub async fn ingest(&self, url: &str) -> AppResult<Webpage> {
        if let Some(existing) = self.repository.find_by_url(url).await? {
            return Ok(existing);
        }

        let content = self.fetcher.fetch(url).await?;
        log::info!("captured page content for '{}'", url);

        let webpage = Webpage::new(url, content.title, content.text, content.favicon);
        self.repository.find_or_insert(webpage).await
    }

    pub async fn get_by_ids(&self, ids: &[String]) -> AppResult<Vec<Webpage>> {
        self.repository.find_by_ids(ids).await
    }
}
