pub mod assistant_handler;
pub mod health;
pub mod lesson_plan_handler;
pub mod material_handler;
pub mod quiz_handler;
pub mod student_handler;

use actix_web::web;

use crate::auth::AuthMiddleware;

/// Public student routes plus the authenticated `/api` scope.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health::health_check)
        .service(health::health_check_ready)
        .service(student_handler::get_quiz_by_code)
        .service(student_handler::start_session)
        .service(student_handler::get_session)
        .service(student_handler::set_student)
        .service(student_handler::select_option)
        .service(student_handler::answer_descriptive)
        .service(student_handler::navigate)
        .service(student_handler::submit)
        .service(student_handler::end_session)
        .service(
            web::scope("/api")
                .wrap(AuthMiddleware)
                .service(lesson_plan_handler::generate_lesson_plan)
                .service(lesson_plan_handler::list_lesson_plans)
                // Registered before `/lesson-plans/{id}` so "local" is not taken as an id.
                .service(lesson_plan_handler::list_local_lesson_plans)
                .service(lesson_plan_handler::get_lesson_plan)
                .service(lesson_plan_handler::export_lesson_plan_markdown)
                .service(lesson_plan_handler::set_favorite)
                .service(lesson_plan_handler::create_feedback)
                .service(lesson_plan_handler::list_feedback)
                .service(quiz_handler::generate_quiz)
                .service(quiz_handler::create_quiz)
                .service(quiz_handler::list_quizzes)
                .service(quiz_handler::get_quiz)
                .service(quiz_handler::replace_quiz)
                .service(quiz_handler::edit_quiz)
                .service(quiz_handler::publish_quiz)
                .service(quiz_handler::unpublish_quiz)
                .service(quiz_handler::list_quiz_responses)
                .service(material_handler::generate_material)
                .service(material_handler::list_materials)
                .service(material_handler::get_material)
                .service(assistant_handler::chat)
                .service(assistant_handler::suggestions),
        );
}
