use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::{Database, QUIZ_RESPONSES_COLLECTION},
    errors::AppResult,
    models::domain::QuizResponse,
    repositories::map_write_error,
};

/// Responses are insert-only: there is deliberately no update method.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizResponseRepository: Send + Sync {
    async fn insert(&self, response: QuizResponse) -> AppResult<QuizResponse>;
    async fn list_by_quiz(&self, quiz_id: &str) -> AppResult<Vec<QuizResponse>>;
}

pub struct MongoQuizResponseRepository {
    collection: Collection<QuizResponse>,
}

impl MongoQuizResponseRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(QUIZ_RESPONSES_COLLECTION);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quiz_responses collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let quiz_index = IndexModel::builder()
            .keys(doc! { "quiz_id": 1, "submitted_at": -1 })
            .options(IndexOptions::builder().name("quiz_submitted".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(quiz_index).await?;

        log::info!("Successfully created indexes for quiz_responses collection");
        Ok(())
    }
}

#[async_trait]
impl QuizResponseRepository for MongoQuizResponseRepository {
    async fn insert(&self, response: QuizResponse) -> AppResult<QuizResponse> {
        self.collection
            .insert_one(&response)
            .await
            .map_err(|e| map_write_error(e, "Quiz response"))?;
        Ok(response)
    }

    async fn list_by_quiz(&self, quiz_id: &str) -> AppResult<Vec<QuizResponse>> {
        let responses = self
            .collection
            .find(doc! { "quiz_id": quiz_id })
            .sort(doc! { "submitted_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(responses)
    }
}
