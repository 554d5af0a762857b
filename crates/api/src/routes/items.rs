//! Catalog routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::{ItemView, NewItem, PromotionView};
use serde::Deserialize;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::SessionUser;
use crate::services::{CatalogError, CatalogService};

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::ItemNotFound => ApiError::NotFound("Item not found".to_string()),
            CatalogError::PromotionNotFound => {
                ApiError::NotFound("Promotion not found".to_string())
            }
            CatalogError::PromotionExists => {
                ApiError::Conflict("Item already has a promotion".to_string())
            }
            CatalogError::Database(e) => ApiError::from(e),
        }
    }
}

/// Paging for the item list.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ListItemsQuery {
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    #[serde(default = "default_limit")]
    pub limit: i64,

    #[validate(range(min = 0, message = "offset cannot be negative"))]
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

/// POST /api/v1/items
pub async fn create_item(
    State(state): State<AppState>,
    _user: SessionUser,
    Json(request): Json<NewItem>,
) -> Result<(StatusCode, Json<ItemView>), ApiError> {
    request.validate()?;

    let view = CatalogService::new(state.pool.clone())
        .create_item(&request)
        .await?;

    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/v1/items
pub async fn list_items(
    State(state): State<AppState>,
    Query(query): Query<ListItemsQuery>,
) -> Result<Json<Vec<ItemView>>, ApiError> {
    query.validate()?;

    let views = CatalogService::new(state.pool.clone())
        .list_items(query.limit, query.offset)
        .await?;

    Ok(Json(views))
}

/// GET /api/v1/items/:id
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ItemView>, ApiError> {
    let view = CatalogService::new(state.pool.clone()).get_item(id).await?;
    Ok(Json(view))
}

/// Current promotion for an item, with its status evaluated now.
///
/// GET /api/v1/items/:id/promo
pub async fn get_item_promotion(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<PromotionView>, ApiError> {
    CatalogService::new(state.pool.clone())
        .resolve_promotion(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("No promotion for item".to_string()))
}
