use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Copy)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Worksheet,
    Quiz,
    Reading,
    Video,
    Activity,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Copy)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Worksheet => "worksheet",
            ContentType::Quiz => "quiz",
            ContentType::Reading => "reading",
            ContentType::Video => "video",
            ContentType::Activity => "activity",
        }
    }
}

impl DifficultyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyLevel::Beginner => "beginner",
            DifficultyLevel::Intermediate => "intermediate",
            DifficultyLevel::Advanced => "advanced",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct MaterialQuestion {
    pub question: String,
    #[serde(rename = "type")]
    pub question_type: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct GeneratedMaterial {
    pub content: String,
    pub questions: Vec<MaterialQuestion>,
    pub instructions: String,
    pub duration: u32, // minutes
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AdaptiveMaterial {
    pub id: String,
    pub user_id: String,
    pub lesson_plan_id: Option<String>,
    pub title: String,
    pub content_type: ContentType,
    pub difficulty_level: DifficultyLevel,
    pub topic: Option<String>,
    pub content: String,
    pub questions: Vec<MaterialQuestion>,
    pub instructions: Option<String>,
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

pub struct MaterialSpec<'a> {
    pub title: &'a str,
    pub content_type: ContentType,
    pub difficulty_level: DifficultyLevel,
    pub topic: Option<&'a str>,
    pub lesson_plan_id: Option<&'a str>,
}

impl AdaptiveMaterial {
    pub fn from_generated(generated: GeneratedMaterial, user_id: &str, spec: MaterialSpec<'_>) -> Self {
        let now = Utc::now();
        AdaptiveMaterial {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            lesson_plan_id: spec.lesson_plan_id.map(str::to_string),
            title: spec.title.to_string(),
            content_type: spec.content_type,
            difficulty_level: spec.difficulty_level,
            topic: spec.topic.map(str::to_string),
            content: generated.content,
            questions: generated.questions,
            instructions: Some(generated.instructions).filter(|i| !i.trim().is_empty()),
            duration: Some(generated.duration).filter(|d| *d > 0),
            created_at: Some(now),
            updated_at: Some(now),
        }
    }
}
