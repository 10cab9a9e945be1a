use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    Collection, IndexModel,
};

use crate::{db::Database, errors::AppResult, models::domain::Webpage};

#[async_trait]
pub trait WebpageRepository: Send + Sync {
    async fn find_by_url(&self, url: &str) -> AppResult<Option<Webpage>>;
    /// Atomic insert-if-absent keyed by URL: returns the stored row, which
    /// is the existing one when another request got there first.
    async fn find_or_insert(&self, webpage: Webpage) -> AppResult<Webpage>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Webpage>>;
    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Webpage>>;
}

pub struct MongoWebpageRepository {
    collection: Collection<Webpage>,
}

impl MongoWebpageRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("webpages");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for webpages collection");

        let url_index = IndexModel::builder()
            .keys(doc! { "url": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("url_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(url_index).await?;
        Ok(())
    }
}

#[async_trait]
impl WebpageRepository for MongoWebpageRepository {
    async fn find_by_url(&self, url: &str) -> AppResult<Option<Webpage>> {
        let webpage = self.collection.find_one(doc! { "url": url }).await?;
        Ok(webpage)
    }

    async fn find_or_insert(&self, webpage: Webpage) -> AppResult<Webpage> {
        let document = mongodb::bson::to_document(&webpage)?;

        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let stored = self
            .collection
            .find_one_and_update(
                doc! { "url": &webpage.url },
                doc! { "$setOnInsert": document },
            )
            .with_options(options)
            .await?;

        stored.ok_or_else(|| {
            crate::errors::AppError::StorageFailure(
                "upsert returned no webpage document".to_string(),
            )
        })
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Webpage>> {
        let webpage = self.collection.find_one(doc! { "id": id }).await?;
        Ok(webpage)
    }

    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Webpage>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let cursor = self.collection.find(doc! { "id": { "$in": ids } }).await?;
        let webpages: Vec<Webpage> = cursor.try_collect().await?;
        Ok(webpages)
    }
}
