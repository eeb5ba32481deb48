use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::Quiz;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizResponse {
    pub id: String,
    pub quiz_id: String,
    pub student_name: String,
    pub student_roll: Option<String>,
    pub mcq_answers: Vec<Option<usize>>,
    pub descriptive_answers: Vec<String>,
    pub time_taken: u64, // seconds
    pub submitted_at: DateTime<Utc>,
}

impl QuizResponse {
    /// Builds a response whose answer vectors match the quiz's question
    /// counts exactly: missing entries are padded, extra entries dropped.
    pub fn for_quiz(
        quiz: &Quiz,
        student_name: &str,
        student_roll: Option<&str>,
        mcq_answers: &[Option<usize>],
        descriptive_answers: &[String],
        time_taken: u64,
    ) -> Self {
        let mcq_answers = (0..quiz.mcq_questions.len())
            .map(|i| mcq_answers.get(i).copied().flatten())
            .collect();
        let descriptive_answers = (0..quiz.descriptive_questions.len())
            .map(|i| descriptive_answers.get(i).cloned().unwrap_or_default())
            .collect();

        QuizResponse {
            id: Uuid::new_v4().to_string(),
            quiz_id: quiz.id.clone(),
            student_name: student_name.trim().to_string(),
            student_roll: student_roll
                .map(str::trim)
                .filter(|roll| !roll.is_empty())
                .map(str::to_string),
            mcq_answers,
            descriptive_answers,
            time_taken,
            submitted_at: Utc::now(),
        }
    }
}
