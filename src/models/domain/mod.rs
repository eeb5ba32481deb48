pub mod feedback;
pub mod lesson_plan;
pub mod material;
pub mod quiz;
pub mod quiz_question;
pub mod quiz_response;
pub use feedback::LessonFeedback;
pub use lesson_plan::{GeneratedLessonPlan, LessonPlan};
pub use material::AdaptiveMaterial;
pub use quiz::{Quiz, QuizDraft};
pub use quiz_question::{DescriptiveQuestion, McqQuestion};
pub use quiz_response::QuizResponse;
