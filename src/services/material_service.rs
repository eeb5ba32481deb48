use std::sync::Arc;

use validator::Validate;

use crate::{
    auth::{require_owner, Claims},
    constants::prompts,
    errors::{AppError, AppResult},
    models::{
        domain::{material::MaterialSpec, AdaptiveMaterial},
        dto::request::{GenerateMaterialRequest, PaginationParams},
    },
    repositories::{LessonPlanRepository, MaterialRepository},
    services::generation_service::ContentGenerator,
};

pub struct MaterialService {
    materials: Arc<dyn MaterialRepository>,
    lesson_plans: Arc<dyn LessonPlanRepository>,
    generator: Arc<dyn ContentGenerator>,
}

impl MaterialService {
    pub fn new(
        materials: Arc<dyn MaterialRepository>,
        lesson_plans: Arc<dyn LessonPlanRepository>,
        generator: Arc<dyn ContentGenerator>,
    ) -> Self {
        Self {
            materials,
            lesson_plans,
            generator,
        }
    }

    pub async fn generate(
        &self,
        claims: &Claims,
        request: GenerateMaterialRequest,
    ) -> AppResult<AdaptiveMaterial> {
        request.validate()?;

        let context = match request.lesson_plan_id.as_deref() {
            Some(plan_id) => {
                let plan = self.lesson_plans.find_by_id(plan_id).await?.ok_or_else(|| {
                    AppError::NotFound(format!("Lesson plan with id '{}' not found", plan_id))
                })?;
                require_owner(claims, &plan.user_id)?;
                Some(prompts::lesson_plan_context(&plan))
            }
            None => None,
        };

        let generated = self.generator.generate_material(&request, context).await?;
        let material = AdaptiveMaterial::from_generated(
            generated,
            claims.user_id(),
            MaterialSpec {
                title: &request.title,
                content_type: request.content_type,
                difficulty_level: request.difficulty_level,
                topic: request.topic.as_deref(),
                lesson_plan_id: request.lesson_plan_id.as_deref(),
            },
        );

        let saved = self.materials.create(material).await?;
        log::info!(
            "Saved {} material {} for user {}",
            saved.content_type.as_str(),
            saved.id,
            saved.user_id
        );
        Ok(saved)
    }

    pub async fn get(&self, claims: &Claims, id: &str) -> AppResult<AdaptiveMaterial> {
        let material = self
            .materials
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Material with id '{}' not found", id)))?;
        require_owner(claims, &material.user_id)?;
        Ok(material)
    }

    pub async fn list(
        &self,
        claims: &Claims,
        pagination: &PaginationParams,
    ) -> AppResult<(Vec<AdaptiveMaterial>, i64)> {
        self.materials
            .list_by_user(claims.user_id(), pagination.offset(), pagination.limit())
            .await
    }
}
