//! Order routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::Order;
use domain::services::OrderLimits;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::SessionUser;
use crate::services::{OrderRequest, OrderService, OrderServiceError};

impl From<OrderServiceError> for ApiError {
    fn from(err: OrderServiceError) -> Self {
        match err {
            OrderServiceError::Business(e) => ApiError::Business(e),
            OrderServiceError::NotFound => ApiError::NotFound("Order not found".to_string()),
            OrderServiceError::Database(e) => ApiError::from(e),
        }
    }
}

/// Request body for placing an order. Range checks live in the pricing step
/// so they carry the parameter-validation business code.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub item_id: i32,
    pub amount: i32,
    #[serde(default)]
    pub promo_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub id: String,
    pub user_id: i32,
    pub item_id: i32,
    pub promo_id: Option<i32>,
    pub item_price: Decimal,
    pub amount: i32,
    pub order_price: Decimal,
}

impl From<Order> for OrderView {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            user_id: order.user_id,
            item_id: order.item_id,
            promo_id: order.promo_id,
            item_price: order.item_price,
            amount: order.amount,
            order_price: order.order_price,
        }
    }
}

/// POST /api/v1/orders
pub async fn create_order(
    State(state): State<AppState>,
    user: SessionUser,
    Json(request): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderView>), ApiError> {
    let limits = OrderLimits {
        max_amount: state.config.orders.max_amount,
    };

    let order = OrderService::new(state.pool.clone(), limits)
        .place_order(
            user.user_id,
            OrderRequest {
                item_id: request.item_id,
                amount: request.amount,
                promo_id: request.promo_id,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(order.into())))
}

/// GET /api/v1/orders/:id
pub async fn get_order(
    State(state): State<AppState>,
    user: SessionUser,
    Path(id): Path<String>,
) -> Result<Json<OrderView>, ApiError> {
    let limits = OrderLimits {
        max_amount: state.config.orders.max_amount,
    };

    let order = OrderService::new(state.pool.clone(), limits)
        .get_order(user.user_id, &id)
        .await?;

    Ok(Json(order.into()))
}
