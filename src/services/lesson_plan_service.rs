use std::sync::Arc;

use validator::Validate;

use crate::{
    auth::{require_owner, Claims},
    errors::{AppError, AppResult},
    models::{
        domain::LessonPlan,
        dto::request::{GenerateLessonPlanRequest, PaginationParams},
    },
    repositories::LessonPlanRepository,
    services::{
        generation_service::ContentGenerator,
        local_history::{LocalHistory, LocalHistoryEntry},
    },
};

pub struct LessonPlanService {
    repository: Arc<dyn LessonPlanRepository>,
    generator: Arc<dyn ContentGenerator>,
    history: Arc<LocalHistory>,
}

impl LessonPlanService {
    pub fn new(
        repository: Arc<dyn LessonPlanRepository>,
        generator: Arc<dyn ContentGenerator>,
        history: Arc<LocalHistory>,
    ) -> Self {
        Self {
            repository,
            generator,
            history,
        }
    }

    /// Generates, stores and records a lesson plan in the local history.
    /// A history write failure is logged and does not fail the request.
    pub async fn generate(
        &self,
        claims: &Claims,
        request: GenerateLessonPlanRequest,
    ) -> AppResult<LessonPlan> {
        request.validate()?;

        let generated = self.generator.generate_lesson_plan(&request).await?;
        let plan = LessonPlan::from_generated(
            generated,
            claims.user_id(),
            &request.subject,
            &request.grade_level,
            &request.topic,
            request.duration,
        );

        let saved = self.repository.create(plan).await?;
        log::info!("Saved lesson plan {} for user {}", saved.id, saved.user_id);

        if let Err(e) = self.history.record(&saved).await {
            log::warn!("Could not record lesson plan {} in local history: {}", saved.id, e);
        }

        Ok(saved)
    }

    pub async fn get(&self, claims: &Claims, id: &str) -> AppResult<LessonPlan> {
        let plan = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Lesson plan with id '{}' not found", id)))?;
        require_owner(claims, &plan.user_id)?;
        Ok(plan)
    }

    pub async fn list(
        &self,
        claims: &Claims,
        pagination: &PaginationParams,
    ) -> AppResult<(Vec<LessonPlan>, i64)> {
        self.repository
            .list_by_user(claims.user_id(), pagination.offset(), pagination.limit())
            .await
    }

    pub async fn local_history(&self, claims: &Claims) -> Vec<LocalHistoryEntry> {
        self.history.list_for_user(claims.user_id()).await
    }

    pub async fn set_favorite(&self, claims: &Claims, id: &str, is_favorite: bool) -> AppResult<LessonPlan> {
        self.get(claims, id).await?;
        self.repository
            .set_favorite(id, is_favorite)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Lesson plan with id '{}' not found", id)))
    }

    /// Returns `(file name, markdown)` for download.
    pub async fn export_markdown(&self, claims: &Claims, id: &str) -> AppResult<(String, String)> {
        let plan = self.get(claims, id).await?;
        Ok((markdown_file_name(&plan), to_markdown(&plan)))
    }
}

pub fn markdown_file_name(plan: &LessonPlan) -> String {
    let base = if plan.title.trim().is_empty() {
        format!("{}-{}", plan.subject, plan.topic)
    } else {
        plan.title.clone()
    };
    let slug = base.split_whitespace().collect::<Vec<_>>().join("-");
    format!("{}.md", slug)
}

pub fn to_markdown(plan: &LessonPlan) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("# {}\n", plan.title));
    lines.push(format!("Subject: {}", plan.subject));
    lines.push(format!("Grade: {}", plan.grade_level));
    if !plan.topic.is_empty() {
        lines.push(format!("Topic: {}", plan.topic));
    }
    if plan.duration > 0 {
        lines.push(format!("Duration: {} minutes", plan.duration));
    }
    lines.push(String::new());

    push_list(&mut lines, "Objectives", &plan.objectives);
    push_list(&mut lines, "Materials Needed", &plan.materials_needed);
    push_section(&mut lines, "Introduction", plan.introduction.as_deref());

    if !plan.main_activities.is_empty() {
        lines.push("## Main Activities".to_string());
        for (i, activity) in plan.main_activities.iter().enumerate() {
            lines.push(format!("### Activity {}: {}", i + 1, activity.activity));
            if activity.time > 0 {
                lines.push(format!("Time: {} min", activity.time));
            }
            if !activity.description.is_empty() {
                lines.push(activity.description.clone());
            }
            lines.push(String::new());
        }
    }

    push_section(&mut lines, "Assessment", plan.assessment.as_deref());
    push_section(&mut lines, "Differentiation", plan.differentiation.as_deref());
    push_section(&mut lines, "Closure", plan.closure.as_deref());
    push_section(&mut lines, "Homework", plan.homework.as_deref());

    lines.join("\n")
}

fn push_list(lines: &mut Vec<String>, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    lines.push(format!("## {}", heading));
    lines.extend(items.iter().map(|item| format!("- {}", item)));
    lines.push(String::new());
}

fn push_section(lines: &mut Vec<String>, heading: &str, body: Option<&str>) {
    if let Some(body) = body {
        lines.push(format!("## {}", heading));
        lines.push(body.to_string());
        lines.push(String::new());
    }
}
