use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct LessonActivity {
    pub activity: String,
    pub time: u32, // minutes
    pub description: String,
}

/// Structured lesson plan as returned by the generation gateway.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct GeneratedLessonPlan {
    pub title: String,
    pub objectives: Vec<String>,
    pub materials_needed: Vec<String>,
    pub introduction: String,
    pub main_activities: Vec<LessonActivity>,
    pub assessment: String,
    pub differentiation: String,
    pub closure: String,
    #[serde(default)]
    pub homework: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct LessonPlan {
    pub id: String,
    pub user_id: String,
    pub subject: String,
    pub grade_level: String,
    pub topic: String,
    pub duration: u32,
    pub title: String,
    pub objectives: Vec<String>,
    pub materials_needed: Vec<String>,
    pub introduction: Option<String>,
    pub main_activities: Vec<LessonActivity>,
    pub assessment: Option<String>,
    pub differentiation: Option<String>,
    pub closure: Option<String>,
    pub homework: Option<String>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl LessonPlan {
    /// Merges generated content with the form fields that requested it.
    pub fn from_generated(
        generated: GeneratedLessonPlan,
        user_id: &str,
        subject: &str,
        grade_level: &str,
        topic: &str,
        duration: u32,
    ) -> Self {
        let now = Utc::now();
        let title = if generated.title.trim().is_empty() {
            format!("{} - {}", subject, topic)
        } else {
            generated.title
        };

        LessonPlan {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            subject: subject.to_string(),
            grade_level: grade_level.to_string(),
            topic: topic.to_string(),
            duration,
            title,
            objectives: generated.objectives,
            materials_needed: generated.materials_needed,
            introduction: non_blank(generated.introduction),
            main_activities: generated.main_activities,
            assessment: non_blank(generated.assessment),
            differentiation: non_blank(generated.differentiation),
            closure: non_blank(generated.closure),
            homework: generated.homework.and_then(non_blank),
            is_favorite: false,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
