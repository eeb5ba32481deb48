use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::{Database, MATERIALS_COLLECTION},
    errors::AppResult,
    models::domain::AdaptiveMaterial,
    repositories::map_write_error,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MaterialRepository: Send + Sync {
    async fn create(&self, material: AdaptiveMaterial) -> AppResult<AdaptiveMaterial>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<AdaptiveMaterial>>;
    async fn list_by_user(
        &self,
        user_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<AdaptiveMaterial>, i64)>;
}

pub struct MongoMaterialRepository {
    collection: Collection<AdaptiveMaterial>,
}

impl MongoMaterialRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(MATERIALS_COLLECTION);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for adaptive_materials collection");

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

        log::info!("Successfully created indexes for adaptive_materials collection");
        Ok(())
    }
}

#[async_trait]
impl MaterialRepository for MongoMaterialRepository {
    async fn create(&self, material: AdaptiveMaterial) -> AppResult<AdaptiveMaterial> {
        self.collection
            .insert_one(&material)
            .await
            .map_err(|e| map_write_error(e, "Adaptive material"))?;
        Ok(material)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<AdaptiveMaterial>> {
        let material = self.collection.find_one(doc! { "id": id }).await?;
        Ok(material)
    }

    async fn list_by_user(
        &self,
        user_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<AdaptiveMaterial>, i64)> {
        let filter = doc! { "user_id": user_id };
        let total = self.collection.count_documents(filter.clone()).await? as i64;

        let materials = self
            .collection
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .skip(offset as u64)
            .limit(limit)
            .await?
            .try_collect()
            .await?;

        Ok((materials, total))
    }
}
