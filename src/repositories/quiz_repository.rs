use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{FindOptions, IndexOptions},
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::Quiz,
};

#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>>;
    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Quiz>>;
    /// The root quiz (no parent) for a source page. At most one exists,
    /// guarded by a unique index.
    async fn find_by_source_id(&self, source_id: &str) -> AppResult<Option<Quiz>>;
    /// Published quizzes, newest first.
    async fn list_published(&self) -> AppResult<Vec<Quiz>>;
    /// Insert a new revision. A slug collision surfaces as `ConflictFailure`.
    async fn insert(&self, quiz: Quiz) -> AppResult<Quiz>;
    /// The single mutable field on a quiz row.
    async fn set_published_at(
        &self,
        id: &str,
        published_at: Option<DateTime<Utc>>,
    ) -> AppResult<()>;
}

pub struct MongoQuizRepository {
    collection: Collection<Quiz>,
}

impl MongoQuizRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("quizzes");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quizzes collection");

        let slug_index = IndexModel::builder()
            .keys(doc! { "slug": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("slug_unique".to_string())
                    .build(),
            )
            .build();
        self.collection.create_index(slug_index).await?;

        // one root quiz per source page; revisions carry a parentId and
        // fall outside the partial filter
        let root_source_index = IndexModel::builder()
            .keys(doc! { "sourceId": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("root_source_unique".to_string())
                    .partial_filter_expression(doc! { "parentId": { "$type": "null" } })
                    .build(),
            )
            .build();
        self.collection.create_index(root_source_index).await?;

        Ok(())
    }
}

#[async_trait]
impl QuizRepository for MongoQuizRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        let quiz = self.collection.find_one(doc! { "id": id }).await?;
        Ok(quiz)
    }

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Quiz>> {
        let quiz = self.collection.find_one(doc! { "slug": slug }).await?;
        Ok(quiz)
    }

    async fn find_by_source_id(&self, source_id: &str) -> AppResult<Option<Quiz>> {
        let quiz = self
            .collection
            .find_one(doc! { "sourceId": source_id, "parentId": null })
            .await?;
        Ok(quiz)
    }

    async fn list_published(&self) -> AppResult<Vec<Quiz>> {
        let find_options = FindOptions::builder()
            .sort(doc! { "createdAt": -1 })
            .build();

        let cursor = self
            .collection
            .find(doc! { "publishedAt": { "$ne": null } })
            .with_options(find_options)
            .await?;
        let quizzes: Vec<Quiz> = cursor.try_collect().await?;
        Ok(quizzes)
    }

    async fn insert(&self, quiz: Quiz) -> AppResult<Quiz> {
        self.collection.insert_one(&quiz).await?;
        Ok(quiz)
    }

    async fn set_published_at(
        &self,
        id: &str,
        published_at: Option<DateTime<Utc>>,
    ) -> AppResult<()> {
        let value = mongodb::bson::to_bson(&published_at)?;
        let result = self
            .collection
            .update_one(doc! { "id": id }, doc! { "$set": { "publishedAt": value } })
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Quiz with id '{}' not found",
                id
            )));
        }
        Ok(())
    }
}
