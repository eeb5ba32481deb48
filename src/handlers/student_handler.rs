use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{
        quiz_dto::StudentQuizDto,
        request::{DescriptiveAnswerRequest, NavigateRequest, SelectOptionRequest, StudentDetailsRequest},
        response::MessageResponse,
    },
};

/// Public view of a published quiz. Correct answers are never included.
#[get("/q/{code}")]
async fn get_quiz_by_code(
    state: web::Data<AppState>,
    code: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.find_published_by_code(&code).await?;
    Ok(HttpResponse::Ok().json(StudentQuizDto::from(&quiz)))
}

#[post("/q/{code}/sessions")]
async fn start_session(
    state: web::Data<AppState>,
    code: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let view = state.session_service.start_session(&code).await?;
    Ok(HttpResponse::Created().json(view))
}

#[get("/sessions/{id}")]
async fn get_session(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let view = state.session_service.view(&id).await?;
    Ok(HttpResponse::Ok().json(view))
}

#[put("/sessions/{id}/student")]
async fn set_student(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<StudentDetailsRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;
    let view = state
        .session_service
        .set_student(&id, &request.name, request.roll.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(view))
}

#[put("/sessions/{id}/mcq/{index}")]
async fn select_option(
    state: web::Data<AppState>,
    path: web::Path<(String, usize)>,
    request: web::Json<SelectOptionRequest>,
) -> Result<HttpResponse, AppError> {
    let (id, index) = path.into_inner();
    let view = state
        .session_service
        .select_option(&id, index, request.option)
        .await?;
    Ok(HttpResponse::Ok().json(view))
}

#[put("/sessions/{id}/descriptive/{index}")]
async fn answer_descriptive(
    state: web::Data<AppState>,
    path: web::Path<(String, usize)>,
    request: web::Json<DescriptiveAnswerRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;
    let (id, index) = path.into_inner();
    let view = state
        .session_service
        .answer_descriptive(&id, index, &request.answer)
        .await?;
    Ok(HttpResponse::Ok().json(view))
}

#[post("/sessions/{id}/navigate")]
async fn navigate(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<NavigateRequest>,
) -> Result<HttpResponse, AppError> {
    let view = state
        .session_service
        .navigate(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(view))
}

#[post("/sessions/{id}/submit")]
async fn submit(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let view = state.session_service.submit(&id).await?;
    Ok(HttpResponse::Ok().json(view))
}

#[delete("/sessions/{id}")]
async fn end_session(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state.session_service.end(&id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Session ended".to_string(),
    }))
}
