//! Order placement.

use chrono::Utc;
use domain::models::{Item, Order};
use domain::services::{quote_order, OrderLimits, PromotionResolver};
use domain::BusinessError;
use persistence::repositories::{ItemRepository, OrderRepository, PlaceOrderOutcome, PromoRepository};
use sqlx::PgPool;
use thiserror::Error;
use tracing::{info, warn};

use crate::middleware::metrics::record_order_created;

#[derive(Debug, Error)]
pub enum OrderServiceError {
    #[error(transparent)]
    Business(#[from] BusinessError),

    #[error("Order not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// What the client asked to buy.
#[derive(Debug, Clone, Copy)]
pub struct OrderRequest {
    pub item_id: i32,
    pub amount: i32,
    pub promo_id: Option<i32>,
}

pub struct OrderService {
    items: ItemRepository,
    orders: OrderRepository,
    resolver: PromotionResolver<PromoRepository>,
    limits: OrderLimits,
}

impl OrderService {
    pub fn new(pool: PgPool, limits: OrderLimits) -> Self {
        Self {
            items: ItemRepository::new(pool.clone()),
            orders: OrderRepository::new(pool.clone()),
            resolver: PromotionResolver::new(PromoRepository::new(pool)),
            limits,
        }
    }

    /// Price and place an order for `user_id`.
    ///
    /// The promotion is resolved at the same instant that stamps the order
    /// number.
    pub async fn place_order(
        &self,
        user_id: i32,
        request: OrderRequest,
    ) -> Result<Order, OrderServiceError> {
        let item: Item = self
            .items
            .find_by_id(request.item_id)
            .await?
            .ok_or_else(|| BusinessError::invalid("Item not found"))?
            .into();

        let now = Utc::now();
        let promo = match request.promo_id {
            Some(_) => self.resolver.resolve_at(item.id, now).await?,
            None => None,
        };

        let quote = quote_order(
            &item,
            promo.as_ref(),
            request.promo_id,
            request.amount,
            self.limits,
        )?;

        let order: Order = match self.orders.place_order(user_id, &quote, now).await? {
            PlaceOrderOutcome::Placed(entity) => entity.into(),
            PlaceOrderOutcome::OutOfStock => {
                warn!(
                    user_id,
                    item_id = item.id,
                    amount = request.amount,
                    "Order rejected: stock not enough"
                );
                return Err(BusinessError::StockNotEnough.into());
            }
        };

        record_order_created(order.promo_id.is_some());
        info!(
            order_id = %order.id,
            user_id,
            item_id = order.item_id,
            promo_id = ?order.promo_id,
            amount = order.amount,
            order_price = %order.order_price,
            "Order created"
        );

        Ok(order)
    }

    /// An order placed by `user_id`. Other users' orders read as missing.
    pub async fn get_order(&self, user_id: i32, id: &str) -> Result<Order, OrderServiceError> {
        self.orders
            .find_by_id(id)
            .await?
            .filter(|order| order.user_id == user_id)
            .map(Order::from)
            .ok_or(OrderServiceError::NotFound)
    }
}
