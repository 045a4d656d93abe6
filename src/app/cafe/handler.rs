//! 咖啡处理器

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};

use super::{
    model::{parse_path_id, Cafe},
    service::CafeService,
};
use crate::core::error::{CoreError, ErrorResponse};

#[derive(Clone)]
pub struct AppState {
    pub cafe_service: CafeService,
}

impl AppState {
    pub fn new(cafe_service: CafeService) -> Self {
        Self { cafe_service }
    }
}

pub const ROUTE_NOT_FOUND_MESSAGE: &str = "La ruta que intenta consultar no existe";

pub async fn list_cafes(State(state): State<AppState>) -> Result<Json<Vec<Cafe>>, CoreError> {
    Ok(Json(state.cafe_service.list()?))
}

pub async fn get_cafe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Cafe>, CoreError> {
    let cafe = state.cafe_service.get(parse_path_id(&id))?;
    Ok(Json(cafe))
}

pub async fn create_cafe(
    State(state): State<AppState>,
    payload: Result<Json<Cafe>, JsonRejection>,
) -> Result<(StatusCode, Json<Vec<Cafe>>), CoreError> {
    let Json(cafe) = payload?;
    let cafes = state.cafe_service.create(cafe)?;
    Ok((StatusCode::CREATED, Json(cafes)))
}

pub async fn update_cafe(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Cafe>, JsonRejection>,
) -> Result<Json<Vec<Cafe>>, CoreError> {
    let Json(cafe) = payload?;
    let cafes = state.cafe_service.update(parse_path_id(&id), cafe)?;
    Ok(Json(cafes))
}

pub async fn delete_cafe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Cafe>>, CoreError> {
    let cafes = state.cafe_service.delete(parse_path_id(&id))?;
    Ok(Json(cafes))
}

pub async fn route_not_found() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new(ROUTE_NOT_FOUND_MESSAGE)),
    )
}
