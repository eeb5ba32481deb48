use serde::Serialize;

use crate::models::dto::quiz_dto::StudentQuizDto;
use crate::services::quiz_runner::{McqScore, RunnerStatus};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T: Serialize> {
    pub items: Vec<T>,
    pub total: i64,
    pub offset: i64,
    pub limit: i64,
}

/// Snapshot of a student's quiz session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: String,
    pub status: RunnerStatus,
    pub quiz: StudentQuizDto,
    pub student_name: String,
    pub student_roll: Option<String>,
    pub current_index: usize,
    pub mcq_answers: Vec<Option<usize>>,
    pub descriptive_answers: Vec<String>,
    pub remaining_seconds: Option<u64>,
    pub score: Option<McqScore>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
}

#[derive(Debug, Serialize)]
pub struct ChatSuggestions {
    pub suggestions: Vec<&'static str>,
}
