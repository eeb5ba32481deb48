use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    auth::{require_owner, Claims},
    errors::{AppError, AppResult},
    models::{domain::LessonFeedback, dto::request::CreateFeedbackRequest},
    repositories::{FeedbackRepository, LessonPlanRepository},
};

pub struct FeedbackService {
    feedback: Arc<dyn FeedbackRepository>,
    lesson_plans: Arc<dyn LessonPlanRepository>,
}

impl FeedbackService {
    pub fn new(feedback: Arc<dyn FeedbackRepository>, lesson_plans: Arc<dyn LessonPlanRepository>) -> Self {
        Self {
            feedback,
            lesson_plans,
        }
    }

    async fn ensure_plan_owner(&self, claims: &Claims, lesson_plan_id: &str) -> AppResult<()> {
        let plan = self
            .lesson_plans
            .find_by_id(lesson_plan_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Lesson plan with id '{}' not found", lesson_plan_id))
            })?;
        require_owner(claims, &plan.user_id)
    }

    pub async fn create(
        &self,
        claims: &Claims,
        lesson_plan_id: &str,
        request: CreateFeedbackRequest,
    ) -> AppResult<LessonFeedback> {
        request.validate()?;
        self.ensure_plan_owner(claims, lesson_plan_id).await?;

        let feedback = LessonFeedback {
            id: Uuid::new_v4().to_string(),
            user_id: claims.user_id().to_string(),
            lesson_plan_id: lesson_plan_id.to_string(),
            rating: request.rating,
            what_worked: request.what_worked,
            what_to_improve: request.what_to_improve,
            student_engagement: request.student_engagement,
            created_at: Utc::now(),
        };

        self.feedback.create(feedback).await
    }

    pub async fn list(&self, claims: &Claims, lesson_plan_id: &str) -> AppResult<Vec<LessonFeedback>> {
        self.ensure_plan_owner(claims, lesson_plan_id).await?;
        self.feedback.list_by_lesson_plan(lesson_plan_id).await
    }
}
