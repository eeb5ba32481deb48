use serde::Deserialize;
use validator::Validate;

use crate::models::domain::material::{ContentType, DifficultyLevel};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateLessonPlanRequest {
    #[validate(length(min = 1, max = 100))]
    pub subject: String,

    #[validate(length(min = 1, max = 20))]
    pub grade_level: String,

    #[validate(length(min = 1, max = 200))]
    pub topic: String,

    #[validate(range(min = 5, max = 480))]
    pub duration: u32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateQuizRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(min = 1, max = 100))]
    pub subject: String,

    #[validate(length(min = 1, max = 20))]
    pub grade_level: String,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    pub lesson_plan_id: Option<String>,

    #[validate(range(min = 1, max = 480))]
    pub duration: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateMaterialRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    pub content_type: ContentType,

    pub difficulty_level: DifficultyLevel,

    #[validate(length(min = 1, max = 200))]
    pub topic: Option<String>,

    pub lesson_plan_id: Option<String>,
}

/// Partial update of one multiple-choice question; absent fields are kept.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct McqPatch {
    pub question: Option<String>,
    pub options: Option<Vec<String>>,
    pub correct_option: Option<usize>,
    pub points: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DescriptivePatch {
    pub question: Option<String>,
    pub suggested_answer: Option<String>,
    pub points: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct McqEdit {
    pub index: usize,
    #[serde(flatten)]
    pub patch: McqPatch,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OptionEdit {
    pub question: usize,
    pub option: usize,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DescriptiveEdit {
    pub index: usize,
    #[serde(flatten)]
    pub patch: DescriptivePatch,
}

/// Indexed edits applied to a stored quiz through the editor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuizEditRequest {
    pub title: Option<String>,
    /// Minutes; zero removes the time limit.
    pub duration: Option<u32>,
    #[serde(default)]
    pub mcq_edits: Vec<McqEdit>,
    #[serde(default)]
    pub option_edits: Vec<OptionEdit>,
    #[serde(default)]
    pub descriptive_edits: Vec<DescriptiveEdit>,
    pub publish: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateFeedbackRequest {
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<u8>,

    #[validate(length(max = 2000))]
    pub what_worked: Option<String>,

    #[validate(length(max = 2000))]
    pub what_to_improve: Option<String>,

    #[validate(length(max = 2000))]
    pub student_engagement: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FavoriteRequest {
    pub is_favorite: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StudentDetailsRequest {
    #[validate(length(max = 100))]
    pub name: String,

    #[validate(length(max = 50))]
    pub roll: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SelectOptionRequest {
    pub option: usize,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DescriptiveAnswerRequest {
    #[validate(length(max = 10000))]
    pub answer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum NavigateRequest {
    Prev,
    Next,
    Jump { index: usize },
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(length(min = 1, max = 4000))]
    pub message: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PaginationParams {
    #[validate(range(min = 0))]
    pub offset: Option<i64>,

    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            offset: Some(0),
            limit: Some(20),
        }
    }
}

impl PaginationParams {
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(20).clamp(1, 100)
    }
}
