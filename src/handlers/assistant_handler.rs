use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState, auth::AuthenticatedUser, errors::AppError, models::dto::request::ChatRequest,
};

#[post("/assistant/chat")]
async fn chat(
    state: web::Data<AppState>,
    request: web::Json<ChatRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let reply = state
        .assistant_service
        .chat(&auth.0, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(reply))
}

#[get("/assistant/suggestions")]
async fn suggestions(state: web::Data<AppState>, _auth: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(state.assistant_service.suggestions())
}
