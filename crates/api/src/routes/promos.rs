//! Promotion administration routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::{NewPromotion, PromotionView};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::SessionUser;
use crate::services::CatalogService;

/// Attach a promotion to an item.
///
/// POST /api/v1/promos
pub async fn create_promotion(
    State(state): State<AppState>,
    _user: SessionUser,
    Json(request): Json<NewPromotion>,
) -> Result<(StatusCode, Json<PromotionView>), ApiError> {
    request.validate()?;

    let view = CatalogService::new(state.pool.clone())
        .create_promotion(&request)
        .await?;

    Ok((StatusCode::CREATED, Json(view)))
}

/// Promotion by id, with its status evaluated now.
///
/// GET /api/v1/promos/:id
pub async fn get_promotion(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<PromotionView>, ApiError> {
    let view = CatalogService::new(state.pool.clone())
        .get_promotion(id)
        .await?;
    Ok(Json(view))
}
