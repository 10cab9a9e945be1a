use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{
    errors::{AppError, AppResult},
    models::domain::{Quiz, Webpage, ITEMS_PER_QUIZ},
    repositories::{QuizRepository, WebpageRepository},
    services::{
        generator::{parse_generated_items, parse_generated_quiz, QuizGenerator},
        prompting,
    },
    slug,
};

/// Quiz lifecycle: first-time generation, edit revisions and the publish
/// flag. All content rows are append-only; the only in-place update is
/// `published_at`.
pub struct QuizService {
    quiz_repository: Arc<dyn QuizRepository>,
    webpage_repository: Arc<dyn WebpageRepository>,
    generator: Arc<dyn QuizGenerator>,
}

impl QuizService {
    pub fn new(
        quiz_repository: Arc<dyn QuizRepository>,
        webpage_repository: Arc<dyn WebpageRepository>,
        generator: Arc<dyn QuizGenerator>,
    ) -> Self {
        Self {
            quiz_repository,
            webpage_repository,
            generator,
        }
    }

    /// Create the root quiz for a page, or return the one that already
    /// exists for it. One generator round-trip, no retry.
    pub async fn create_quiz(&self, webpage: &Webpage) -> AppResult<Quiz> {
        if let Some(existing) = self.quiz_repository.find_by_source_id(&webpage.id).await? {
            log::info!(
                "reusing quiz '{}' for already-ingested page '{}'",
                existing.slug,
                webpage.url
            );
            return Ok(existing);
        }

        let prompt = prompting::create_prompt(&webpage.title, &webpage.text, ITEMS_PER_QUIZ);
        let raw = self.generator.complete(&prompt).await?;
        let generated = parse_generated_quiz(&raw, ITEMS_PER_QUIZ)?;

        let base = if generated.slug.trim().is_empty() {
            &generated.title
        } else {
            &generated.slug
        };
        let slug = slug::allocate(base);

        let quiz = Quiz::new_root(generated.title, slug, generated.items, &webpage.id);
        match self.quiz_repository.insert(quiz).await {
            Ok(quiz) => Ok(quiz),
            // lost the root-per-source race to a concurrent create; the
            // winner's row is the canonical one
            Err(AppError::ConflictFailure(detail)) => {
                match self.quiz_repository.find_by_source_id(&webpage.id).await? {
                    Some(winner) => {
                        log::info!(
                            "concurrent create for page '{}' already stored quiz '{}'",
                            webpage.url,
                            winner.slug
                        );
                        Ok(winner)
                    }
                    None => Err(AppError::ConflictFailure(detail)),
                }
            }
            Err(err) => Err(err),
        }
    }

    /// Produce a new revision with the indexed items discarded and
    /// replacements generated. The parent row is left untouched.
    pub async fn edit_quiz(
        &self,
        quiz_id: &str,
        deleted_item_idxs: &[usize],
        additional_instructions: &str,
    ) -> AppResult<Quiz> {
        let parent = self
            .quiz_repository
            .find_by_id(quiz_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", quiz_id)))?;

        let deleted: BTreeSet<usize> = deleted_item_idxs.iter().copied().collect();
        if let Some(&out_of_range) = deleted.iter().find(|&&idx| idx >= parent.items.len()) {
            return Err(AppError::InvalidRequest(format!(
                "item index {} is out of range for a quiz with {} items",
                out_of_range,
                parent.items.len()
            )));
        }

        let (removed, kept): (Vec<_>, Vec<_>) = parent
            .items
            .iter()
            .cloned()
            .enumerate()
            .partition(|(idx, _)| deleted.contains(idx));
        let removed: Vec<_> = removed.into_iter().map(|(_, item)| item).collect();
        let kept: Vec<_> = kept.into_iter().map(|(_, item)| item).collect();

        if kept.len() >= ITEMS_PER_QUIZ {
            return Err(AppError::NothingToDo(
                "no items were marked for replacement".to_string(),
            ));
        }
        if kept.is_empty() {
            return Err(AppError::InvalidRequest(
                "an edit must keep at least one item; create a new quiz instead".to_string(),
            ));
        }

        let webpage = self
            .webpage_repository
            .find_by_id(&parent.source_id)
            .await?
            .ok_or_else(|| {
                AppError::StorageFailure(format!(
                    "source page '{}' missing for quiz '{}'",
                    parent.source_id, parent.id
                ))
            })?;

        // The exclusion list accumulates across the whole revision chain.
        let mut all_deleted = parent.deleted_items.clone();
        all_deleted.extend(removed);

        let needed = ITEMS_PER_QUIZ - kept.len();
        let kept_stems: Vec<String> = kept.iter().map(|item| item.stem.clone()).collect();
        let excluded_stems: Vec<String> =
            all_deleted.iter().map(|item| item.stem.clone()).collect();

        let prompt = prompting::revise_prompt(
            &webpage.title,
            &webpage.text,
            needed,
            &kept_stems,
            &excluded_stems,
            additional_instructions,
        );
        let raw = self.generator.complete(&prompt).await?;
        let new_items = parse_generated_items(&raw, needed)?;

        let mut items = kept;
        items.extend(new_items);

        let quiz = Quiz::new_revision(&parent, slug::reallocate(&parent.slug), items, all_deleted);
        self.quiz_repository.insert(quiz).await
    }

    /// Flip the publish flag: unpublished quizzes get the current timestamp,
    /// published ones go back to hidden. Returns the new value.
    pub async fn toggle_publish(&self, quiz_id: &str) -> AppResult<Option<DateTime<Utc>>> {
        let quiz = self
            .quiz_repository
            .find_by_id(quiz_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", quiz_id)))?;

        let published_at = match quiz.published_at {
            Some(_) => None,
            None => Some(Utc::now()),
        };
        self.quiz_repository
            .set_published_at(&quiz.id, published_at)
            .await?;
        Ok(published_at)
    }

    pub async fn get_quiz(&self, quiz_slug: &str) -> AppResult<(Quiz, Webpage)> {
        let quiz = self
            .quiz_repository
            .find_by_slug(quiz_slug)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Quiz with slug '{}' not found", quiz_slug))
            })?;

        let webpage = self
            .webpage_repository
            .find_by_id(&quiz.source_id)
            .await?
            .ok_or_else(|| {
                AppError::StorageFailure(format!(
                    "source page '{}' missing for quiz '{}'",
                    quiz.source_id, quiz.id
                ))
            })?;

        Ok((quiz, webpage))
    }

    /// Published quizzes joined with their source pages, newest first.
    pub async fn list_published(&self) -> AppResult<Vec<(Quiz, Webpage)>> {
        let quizzes = self.quiz_repository.list_published().await?;

        let mut source_ids: Vec<String> = quizzes.iter().map(|q| q.source_id.clone()).collect();
        source_ids.sort();
        source_ids.dedup();

        let webpages = self.webpage_repository.find_by_ids(&source_ids).await?;
        let by_id: std::collections::HashMap<&str, &Webpage> =
            webpages.iter().map(|w| (w.id.as_str(), w)).collect();

        let mut joined = Vec::with_capacity(quizzes.len());
        for quiz in quizzes {
            match by_id.get(quiz.source_id.as_str()) {
                Some(webpage) => joined.push((quiz.clone(), (*webpage).clone())),
                None => log::warn!(
                    "skipping quiz '{}': source page '{}' missing",
                    quiz.id,
                    quiz.source_id
                ),
            }
        }
        Ok(joined)
    }
}
