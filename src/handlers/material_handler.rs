use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::{GenerateMaterialRequest, PaginationParams},
        response::PaginatedResponse,
    },
};

#[post("/materials/generate")]
async fn generate_material(
    state: web::Data<AppState>,
    request: web::Json<GenerateMaterialRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let material = state
        .material_service
        .generate(&auth.0, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(material))
}

#[get("/materials")]
async fn list_materials(
    state: web::Data<AppState>,
    query: web::Query<PaginationParams>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let pagination = query.into_inner();
    let (items, total) = state.material_service.list(&auth.0, &pagination).await?;
    Ok(HttpResponse::Ok().json(PaginatedResponse {
        items,
        total,
        offset: pagination.offset(),
        limit: pagination.limit(),
    }))
}

#[get("/materials/{id}")]
async fn get_material(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let material = state.material_service.get(&auth.0, &id).await?;
    Ok(HttpResponse::Ok().json(material))
}
