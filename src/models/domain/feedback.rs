use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A teacher's note on how a lesson plan went in class.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct LessonFeedback {
    pub id: String,
    pub user_id: String,
    pub lesson_plan_id: String,
    pub rating: Option<u8>,
    pub what_worked: Option<String>,
    pub what_to_improve: Option<String>,
    pub student_engagement: Option<String>,
    pub created_at: DateTime<Utc>,
}
