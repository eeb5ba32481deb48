use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::{Database, FEEDBACK_COLLECTION},
    errors::AppResult,
    models::domain::LessonFeedback,
    repositories::map_write_error,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    async fn create(&self, feedback: LessonFeedback) -> AppResult<LessonFeedback>;
    async fn list_by_lesson_plan(&self, lesson_plan_id: &str) -> AppResult<Vec<LessonFeedback>>;
}

pub struct MongoFeedbackRepository {
    collection: Collection<LessonFeedback>,
}

impl MongoFeedbackRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(FEEDBACK_COLLECTION);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        let plan_index = IndexModel::builder()
            .keys(doc! { "lesson_plan_id": 1, "created_at": -1 })
            .options(IndexOptions::builder().name("plan_recent".to_string()).build())
            .build();

        self.collection.create_index(plan_index).await?;
        Ok(())
    }
}

#[async_trait]
impl FeedbackRepository for MongoFeedbackRepository {
    async fn create(&self, feedback: LessonFeedback) -> AppResult<LessonFeedback> {
        self.collection
            .insert_one(&feedback)
            .await
            .map_err(|e| map_write_error(e, "Lesson feedback"))?;
        Ok(feedback)
    }

    async fn list_by_lesson_plan(&self, lesson_plan_id: &str) -> AppResult<Vec<LessonFeedback>> {
        let feedback = self
            .collection
            .find(doc! { "lesson_plan_id": lesson_plan_id })
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(feedback)
    }
}
