use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::{Database, LESSON_PLANS_COLLECTION},
    errors::AppResult,
    models::domain::LessonPlan,
    repositories::map_write_error,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LessonPlanRepository: Send + Sync {
    async fn create(&self, plan: LessonPlan) -> AppResult<LessonPlan>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<LessonPlan>>;
    /// Most recent first.
    async fn list_by_user(&self, user_id: &str, offset: i64, limit: i64) -> AppResult<(Vec<LessonPlan>, i64)>;
    async fn set_favorite(&self, id: &str, is_favorite: bool) -> AppResult<Option<LessonPlan>>;
}

pub struct MongoLessonPlanRepository {
    collection: Collection<LessonPlan>,
}

impl MongoLessonPlanRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(LESSON_PLANS_COLLECTION);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for lesson_plans collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let user_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "created_at": -1 })
            .options(IndexOptions::builder().name("user_recent".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(user_index).await?;

        log::info!("Successfully created indexes for lesson_plans collection");
        Ok(())
    }
}

#[async_trait]
impl LessonPlanRepository for MongoLessonPlanRepository {
    async fn create(&self, plan: LessonPlan) -> AppResult<LessonPlan> {
        self.collection
            .insert_one(&plan)
            .await
            .map_err(|e| map_write_error(e, "Lesson plan"))?;
        Ok(plan)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<LessonPlan>> {
        let plan = self.collection.find_one(doc! { "id": id }).await?;
        Ok(plan)
    }

    async fn list_by_user(&self, user_id: &str, offset: i64, limit: i64) -> AppResult<(Vec<LessonPlan>, i64)> {
        let filter = doc! { "user_id": user_id };
        let total = self.collection.count_documents(filter.clone()).await? as i64;

        let plans = self
            .collection
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .skip(offset as u64)
            .limit(limit)
            .await?
            .try_collect()
            .await?;

        Ok((plans, total))
    }

    async fn set_favorite(&self, id: &str, is_favorite: bool) -> AppResult<Option<LessonPlan>> {
        // Same string encoding serde uses for the stored timestamps.
        let updated_at = mongodb::bson::to_bson(&chrono::Utc::now())?;
        let plan = self
            .collection
            .find_one_and_update(
                doc! { "id": id },
                doc! { "$set": { "is_favorite": is_favorite, "updated_at": updated_at } },
            )
            .return_document(mongodb::options::ReturnDocument::After)
            .await?;
        Ok(plan)
    }
}
