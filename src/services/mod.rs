pub mod assistant_service;
pub mod feedback_service;
pub mod generation_service;
pub mod lesson_plan_service;
pub mod local_history;
pub mod material_service;
pub mod quiz_code;
pub mod quiz_editor;
pub mod quiz_runner;
pub mod quiz_service;
pub mod session_service;
