use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

pub const MIN_OPTIONS: usize = 2;
pub const MAX_POINTS: u32 = 100;

/// A multiple-choice question. The correct answer is an index into `options`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct McqQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_option: usize,
    pub points: u32,
}

/// A free-text question; `suggested_answer` is for the teacher only.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct DescriptiveQuestion {
    pub question: String,
    pub suggested_answer: String,
    pub points: u32,
}

impl McqQuestion {
    pub fn check(&self, position: usize) -> AppResult<()> {
        if self.question.trim().is_empty() {
            return Err(AppError::ValidationError(format!(
                "Multiple-choice question {} has no text",
                position + 1
            )));
        }
        if self.options.len() < MIN_OPTIONS {
            return Err(AppError::ValidationError(format!(
                "Multiple-choice question {} needs at least {} options",
                position + 1,
                MIN_OPTIONS
            )));
        }
        if self.correct_option >= self.options.len() {
            return Err(AppError::ValidationError(format!(
                "Multiple-choice question {} marks option {} as correct but has only {} options",
                position + 1,
                self.correct_option,
                self.options.len()
            )));
        }
        check_points("Multiple-choice", position, self.points)
    }

    pub fn is_correct(&self, selected: Option<usize>) -> bool {
        selected == Some(self.correct_option)
    }
}

impl DescriptiveQuestion {
    pub fn check(&self, position: usize) -> AppResult<()> {
        if self.question.trim().is_empty() {
            return Err(AppError::ValidationError(format!(
                "Descriptive question {} has no text",
                position + 1
            )));
        }
        check_points("Descriptive", position, self.points)
    }
}

fn check_points(kind: &str, position: usize, points: u32) -> AppResult<()> {
    if points > MAX_POINTS {
        return Err(AppError::ValidationError(format!(
            "{} question {} is worth {} points; the maximum is {}",
            kind,
            position + 1,
            points,
            MAX_POINTS
        )));
    }
    Ok(())
}
