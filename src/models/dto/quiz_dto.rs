use serde::Serialize;

use crate::models::domain::{DescriptiveQuestion, McqQuestion, Quiz};

/// A multiple-choice question as a student sees it: no correct answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentMcqDto {
    pub question: String,
    pub options: Vec<String>,
    pub points: u32,
}

/// A descriptive question without its suggested answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentDescriptiveDto {
    pub question: String,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentQuizDto {
    pub quiz_code: String,
    pub title: String,
    pub subject: String,
    pub grade_level: String,
    pub duration: Option<u32>,
    pub total_points: u32,
    pub mcq_questions: Vec<StudentMcqDto>,
    pub descriptive_questions: Vec<StudentDescriptiveDto>,
}

impl From<&McqQuestion> for StudentMcqDto {
    fn from(question: &McqQuestion) -> Self {
        StudentMcqDto {
            question: question.question.clone(),
            options: question.options.clone(),
            points: question.points,
        }
    }
}

impl From<&DescriptiveQuestion> for StudentDescriptiveDto {
    fn from(question: &DescriptiveQuestion) -> Self {
        StudentDescriptiveDto {
            question: question.question.clone(),
            points: question.points,
        }
    }
}

impl From<&Quiz> for StudentQuizDto {
    fn from(quiz: &Quiz) -> Self {
        StudentQuizDto {
            quiz_code: quiz.quiz_code.clone().unwrap_or_default(),
            title: quiz.title.clone(),
            subject: quiz.subject.clone(),
            grade_level: quiz.grade_level.clone(),
            duration: quiz.duration,
            total_points: quiz.total_points,
            mcq_questions: quiz.mcq_questions.iter().map(StudentMcqDto::from).collect(),
            descriptive_questions: quiz
                .descriptive_questions
                .iter()
                .map(StudentDescriptiveDto::from)
                .collect(),
        }
    }
}
