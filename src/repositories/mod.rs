pub mod feedback_repository;
pub mod lesson_plan_repository;
pub mod material_repository;
pub mod quiz_repository;
pub mod quiz_response_repository;

pub use feedback_repository::{FeedbackRepository, MongoFeedbackRepository};
pub use lesson_plan_repository::{LessonPlanRepository, MongoLessonPlanRepository};
pub use material_repository::{MaterialRepository, MongoMaterialRepository};
pub use quiz_repository::{MongoQuizRepository, QuizRepository};
pub use quiz_response_repository::{MongoQuizResponseRepository, QuizResponseRepository};

use mongodb::error::{ErrorKind, WriteFailure};

use crate::errors::AppError;

const DUPLICATE_KEY: i32 = 11000;

/// Maps a unique index violation to `AlreadyExists`, anything else to a
/// database error.
pub(crate) fn map_write_error(err: mongodb::error::Error, what: &str) -> AppError {
    if let ErrorKind::Write(WriteFailure::WriteError(write_error)) = err.kind.as_ref() {
        if write_error.code == DUPLICATE_KEY {
            return AppError::AlreadyExists(format!("{} violates a unique index", what));
        }
    }
    AppError::from(err)
}
