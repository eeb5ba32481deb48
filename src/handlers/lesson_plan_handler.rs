use actix_web::{get, http::header, post, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::{CreateFeedbackRequest, FavoriteRequest, GenerateLessonPlanRequest, PaginationParams},
        response::PaginatedResponse,
    },
};

#[post("/lesson-plans/generate")]
async fn generate_lesson_plan(
    state: web::Data<AppState>,
    request: web::Json<GenerateLessonPlanRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let plan = state
        .lesson_plan_service
        .generate(&auth.0, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(plan))
}

#[get("/lesson-plans")]
async fn list_lesson_plans(
    state: web::Data<AppState>,
    query: web::Query<PaginationParams>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let pagination = query.into_inner();
    let (items, total) = state.lesson_plan_service.list(&auth.0, &pagination).await?;
    Ok(HttpResponse::Ok().json(PaginatedResponse {
        items,
        total,
        offset: pagination.offset(),
        limit: pagination.limit(),
    }))
}

#[get("/lesson-plans/local")]
async fn list_local_lesson_plans(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let entries = state.lesson_plan_service.local_history(&auth.0).await;
    Ok(HttpResponse::Ok().json(entries))
}

#[get("/lesson-plans/{id}")]
async fn get_lesson_plan(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let plan = state.lesson_plan_service.get(&auth.0, &id).await?;
    Ok(HttpResponse::Ok().json(plan))
}

#[get("/lesson-plans/{id}/markdown")]
async fn export_lesson_plan_markdown(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let (file_name, markdown) = state
        .lesson_plan_service
        .export_markdown(&auth.0, &id)
        .await?;
    Ok(HttpResponse::Ok()
        .content_type("text/markdown; charset=utf-8")
        .insert_header(header::ContentDisposition::attachment(file_name))
        .body(markdown))
}

#[put("/lesson-plans/{id}/favorite")]
async fn set_favorite(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<FavoriteRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let plan = state
        .lesson_plan_service
        .set_favorite(&auth.0, &id, request.is_favorite)
        .await?;
    Ok(HttpResponse::Ok().json(plan))
}

#[post("/lesson-plans/{id}/feedback")]
async fn create_feedback(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<CreateFeedbackRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let feedback = state
        .feedback_service
        .create(&auth.0, &id, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(feedback))
}

#[get("/lesson-plans/{id}/feedback")]
async fn list_feedback(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let feedback = state.feedback_service.list(&auth.0, &id).await?;
    Ok(HttpResponse::Ok().json(feedback))
}
