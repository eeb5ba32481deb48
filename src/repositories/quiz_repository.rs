use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::{Database, QUIZZES_COLLECTION},
    errors::{AppError, AppResult},
    models::domain::Quiz,
    repositories::map_write_error,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>>;
    /// Exact, case-sensitive code match restricted to published quizzes.
    async fn find_published_by_code(&self, code: &str) -> AppResult<Option<Quiz>>;
    async fn list_by_user(&self, user_id: &str, offset: i64, limit: i64) -> AppResult<(Vec<Quiz>, i64)>;
    /// Fails with `AlreadyExists` when the id or code is taken.
    async fn insert(&self, quiz: Quiz) -> AppResult<Quiz>;
    /// Fails with `AlreadyExists` when the code is taken by another quiz.
    async fn update(&self, quiz: Quiz) -> AppResult<Quiz>;
}

pub struct MongoQuizRepository {
    collection: Collection<Quiz>,
}

impl MongoQuizRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(QUIZZES_COLLECTION);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quizzes collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        // Only quizzes that carry a code take part in the uniqueness check.
        let code_index = IndexModel::builder()
            .keys(doc! { "quiz_code": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("quiz_code_unique".to_string())
                    .partial_filter_expression(doc! { "quiz_code": { "$type": "string" } })
                    .build(),
            )
            .build();

        let user_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "created_at": -1 })
            .options(IndexOptions::builder().name("user_recent".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(code_index).await?;
        self.collection.create_index(user_index).await?;

        log::info!("Successfully created indexes for quizzes collection");
        Ok(())
    }
}

#[async_trait]
impl QuizRepository for MongoQuizRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        let quiz = self.collection.find_one(doc! { "id": id }).await?;
        Ok(quiz)
    }

    async fn find_published_by_code(&self, code: &str) -> AppResult<Option<Quiz>> {
        let quiz = self
            .collection
            .find_one(doc! { "quiz_code": code, "is_published": true })
            .await?;
        Ok(quiz)
    }

    async fn list_by_user(&self, user_id: &str, offset: i64, limit: i64) -> AppResult<(Vec<Quiz>, i64)> {
        let filter = doc! { "user_id": user_id };

        let total = self.collection.count_documents(filter.clone()).await? as i64;

        let items: Vec<Quiz> = self
            .collection
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .skip(offset as u64)
            .limit(limit)
            .await?
            .try_collect()
            .await?;

        Ok((items, total))
    }

    async fn insert(&self, quiz: Quiz) -> AppResult<Quiz> {
        self.collection
            .insert_one(&quiz)
            .await
            .map_err(|e| map_write_error(e, "Quiz"))?;
        Ok(quiz)
    }

    async fn update(&self, quiz: Quiz) -> AppResult<Quiz> {
        let result = self
            .collection
            .replace_one(doc! { "id": &quiz.id }, &quiz)
            .await
            .map_err(|e| map_write_error(e, "Quiz"))?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!("Quiz with id '{}' not found", quiz.id)));
        }
        Ok(quiz)
    }
}
