use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::domain::quiz_question::{DescriptiveQuestion, McqQuestion};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: String,
    pub user_id: String,
    pub lesson_plan_id: Option<String>,
    pub title: String,
    pub subject: String,
    pub grade_level: String,
    pub description: Option<String>,
    pub duration: Option<u32>, // minutes
    pub mcq_questions: Vec<McqQuestion>,
    pub descriptive_questions: Vec<DescriptiveQuestion>,
    pub total_points: u32,
    pub quiz_code: Option<String>, // assigned when first published
    pub is_published: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// The editable part of a quiz. Holds no identifier: whether it is inserted
/// or updated is decided by the caller, never by the draft itself.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizDraft {
    pub title: String,
    pub subject: String,
    pub grade_level: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub lesson_plan_id: Option<String>,
    pub mcq_questions: Vec<McqQuestion>,
    pub descriptive_questions: Vec<DescriptiveQuestion>,
    #[serde(default)]
    pub is_published: bool,
}

impl QuizDraft {
    /// Saturates instead of overflowing; `check` rejects drafts whose sum
    /// does not fit.
    pub fn total_points(&self) -> u32 {
        self.points().fold(0u32, u32::saturating_add)
    }

    fn checked_total_points(&self) -> Option<u32> {
        self.points().try_fold(0u32, u32::checked_add)
    }

    fn points(&self) -> impl Iterator<Item = u32> + '_ {
        self.mcq_questions
            .iter()
            .map(|q| q.points)
            .chain(self.descriptive_questions.iter().map(|q| q.points))
    }

    pub fn check(&self) -> AppResult<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::ValidationError("Quiz title cannot be empty".to_string()));
        }
        if self.subject.trim().is_empty() || self.grade_level.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Quiz subject and grade level are required".to_string(),
            ));
        }
        for (position, question) in self.mcq_questions.iter().enumerate() {
            question.check(position)?;
        }
        for (position, question) in self.descriptive_questions.iter().enumerate() {
            question.check(position)?;
        }
        if self.checked_total_points().is_none() {
            return Err(AppError::ValidationError(
                "Quiz total points are too large".to_string(),
            ));
        }
        Ok(())
    }
}

impl Quiz {
    pub fn from_draft(draft: QuizDraft, user_id: &str) -> Self {
        let now = Utc::now();
        let total_points = draft.total_points();
        Quiz {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            lesson_plan_id: draft.lesson_plan_id,
            title: draft.title,
            subject: draft.subject,
            grade_level: draft.grade_level,
            description: draft.description,
            duration: draft.duration,
            mcq_questions: draft.mcq_questions,
            descriptive_questions: draft.descriptive_questions,
            total_points,
            quiz_code: None,
            is_published: draft.is_published,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    /// Replaces every editable field with the draft's. The code is kept.
    pub fn apply_draft(&mut self, draft: QuizDraft) {
        self.total_points = draft.total_points();
        self.lesson_plan_id = draft.lesson_plan_id;
        self.title = draft.title;
        self.subject = draft.subject;
        self.grade_level = draft.grade_level;
        self.description = draft.description;
        self.duration = draft.duration;
        self.mcq_questions = draft.mcq_questions;
        self.descriptive_questions = draft.descriptive_questions;
        self.is_published = draft.is_published;
        self.updated_at = Some(Utc::now());
    }

    pub fn to_draft(&self) -> QuizDraft {
        QuizDraft {
            title: self.title.clone(),
            subject: self.subject.clone(),
            grade_level: self.grade_level.clone(),
            description: self.description.clone(),
            duration: self.duration,
            lesson_plan_id: self.lesson_plan_id.clone(),
            mcq_questions: self.mcq_questions.clone(),
            descriptive_questions: self.descriptive_questions.clone(),
            is_published: self.is_published,
        }
    }

    /// Countdown length in seconds, if the quiz is timed.
    pub fn time_limit_seconds(&self) -> Option<u64> {
        self.duration
            .filter(|minutes| *minutes > 0)
            .map(|minutes| u64::from(minutes) * 60)
    }

    pub fn needs_code(&self) -> bool {
        self.is_published && self.quiz_code.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures;

    #[test]
    fn total_points_sums_both_question_kinds() {
        let draft = fixtures::quiz_draft();
        // 2 MCQs at 1 point plus one descriptive at 5
        assert_eq!(draft.total_points(), 7);
    }

    #[test]
    fn from_draft_assigns_identity_but_no_code() {
        let quiz = Quiz::from_draft(fixtures::quiz_draft(), "teacher-1");

        assert!(!quiz.id.is_empty());
        assert_eq!(quiz.user_id, "teacher-1");
        assert_eq!(quiz.total_points, 7);
        assert!(quiz.quiz_code.is_none());
    }

    #[test]
    fn apply_draft_keeps_code_and_recomputes_points() {
        let mut quiz = Quiz::from_draft(fixtures::quiz_draft(), "teacher-1");
        quiz.quiz_code = Some("ABCDEF".to_string());

        let mut draft = quiz.to_draft();
        draft.mcq_questions[0].points = 10;
        quiz.apply_draft(draft);

        assert_eq!(quiz.quiz_code.as_deref(), Some("ABCDEF"));
        assert_eq!(quiz.total_points, 16);
    }

    #[test]
    fn time_limit_ignores_zero_duration() {
        let mut quiz = Quiz::from_draft(fixtures::quiz_draft(), "teacher-1");
        quiz.duration = Some(10);
        assert_eq!(quiz.time_limit_seconds(), Some(600));

        quiz.duration = Some(0);
        assert_eq!(quiz.time_limit_seconds(), None);

        quiz.duration = None;
        assert_eq!(quiz.time_limit_seconds(), None);
    }

    #[test]
    fn draft_check_rejects_blank_title() {
        let mut draft = fixtures::quiz_draft();
        draft.title = "   ".to_string();
        assert!(draft.check().is_err());
    }

    #[test]
    fn oversized_points_fail_check_without_panicking() {
        let mut draft = fixtures::quiz_draft();
        draft.mcq_questions[0].points = u32::MAX;
        draft.mcq_questions[1].points = u32::MAX;

        assert_eq!(draft.total_points(), u32::MAX);
        assert!(matches!(draft.check(), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn needs_code_only_when_published_without_one() {
        let mut quiz = Quiz::from_draft(fixtures::quiz_draft(), "teacher-1");
        assert!(!quiz.needs_code());

        quiz.is_published = true;
        assert!(quiz.needs_code());

        quiz.quiz_code = Some("QWERTY".to_string());
        assert!(!quiz.needs_code());
    }
}
