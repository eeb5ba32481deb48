use actix_web::{get, patch, post, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::{
        domain::QuizDraft,
        dto::{
            request::{GenerateQuizRequest, PaginationParams, QuizEditRequest},
            response::{ApiResponse, PaginatedResponse},
        },
    },
    services::quiz_editor::{QuizEditor, SaveQuiz},
};

/// Returns an unsaved draft for the editor.
#[post("/quizzes/generate")]
async fn generate_quiz(
    state: web::Data<AppState>,
    request: web::Json<GenerateQuizRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let draft = state
        .quiz_service
        .generate_draft(&auth.0, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(draft))
}

#[post("/quizzes")]
async fn create_quiz(
    state: web::Data<AppState>,
    draft: web::Json<QuizDraft>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let save = QuizEditor::new(draft.into_inner()).into_save();
    let quiz = state.quiz_service.save(&auth.0, save).await?;
    Ok(HttpResponse::Created().json(quiz))
}

#[get("/quizzes")]
async fn list_quizzes(
    state: web::Data<AppState>,
    query: web::Query<PaginationParams>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let pagination = query.into_inner();
    let (items, total) = state.quiz_service.list_for_user(&auth.0, &pagination).await?;
    Ok(HttpResponse::Ok().json(PaginatedResponse {
        items,
        total,
        offset: pagination.offset(),
        limit: pagination.limit(),
    }))
}

#[get("/quizzes/{id}")]
async fn get_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get_for_owner(&auth.0, &id).await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[put("/quizzes/{id}")]
async fn replace_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    draft: web::Json<QuizDraft>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let save = SaveQuiz::Update {
        id: id.into_inner(),
        draft: draft.into_inner(),
    };
    let quiz = state.quiz_service.save(&auth.0, save).await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[patch("/quizzes/{id}")]
async fn edit_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<QuizEditRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quiz = state
        .quiz_service
        .edit(&auth.0, &id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[post("/quizzes/{id}/publish")]
async fn publish_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.set_published(&auth.0, &id, true).await?;
    let message = format!(
        "Quiz published with code {}",
        quiz.quiz_code.as_deref().unwrap_or_default()
    );
    Ok(HttpResponse::Ok().json(ApiResponse { data: quiz, message }))
}

#[post("/quizzes/{id}/unpublish")]
async fn unpublish_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.set_published(&auth.0, &id, false).await?;
    Ok(HttpResponse::Ok().json(ApiResponse {
        data: quiz,
        message: "Quiz unpublished".to_string(),
    }))
}

#[get("/quizzes/{id}/responses")]
async fn list_quiz_responses(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let responses = state.quiz_service.list_responses(&auth.0, &id).await?;
    Ok(HttpResponse::Ok().json(responses))
}
