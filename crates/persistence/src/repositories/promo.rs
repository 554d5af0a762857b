//! Promotion repository for database operations.

use async_trait::async_trait;
use domain::models::{NewPromotion, PromotionConfig};
use domain::services::PromotionStore;
use sqlx::PgPool;

use crate::entities::PromoEntity;
use crate::metrics::QueryTimer;

/// Repository for promotion-related database operations.
#[derive(Clone)]
pub struct PromoRepository {
    pool: PgPool,
}

impl PromoRepository {
    /// Creates a new PromoRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the promotion attached to an item.
    ///
    /// `promos.item_id` is unique; the ordering only matters for databases
    /// created without that constraint, where the newest row wins.
    pub async fn fetch_by_item_id(&self, item_id: i32) -> Result<Option<PromoEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_promo_by_item_id");
        let result = sqlx::query_as::<_, PromoEntity>(
            r#"
            SELECT id, promo_name, start_date, end_date, item_id, promo_item_price
            FROM promos
            WHERE item_id = $1
            ORDER BY id DESC
            LIMIT 1
            "#,
        )
        .bind(item_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a promotion by ID.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<PromoEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_promo_by_id");
        let result = sqlx::query_as::<_, PromoEntity>(
            r#"
            SELECT id, promo_name, start_date, end_date, item_id, promo_item_price
            FROM promos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create a promotion. A second promotion for the same item violates
    /// `promos_item_unique` (SQLSTATE 23505).
    pub async fn create(&self, promo: &NewPromotion) -> Result<PromoEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_promo");
        let result = sqlx::query_as::<_, PromoEntity>(
            r#"
            INSERT INTO promos (promo_name, start_date, end_date, item_id, promo_item_price)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, promo_name, start_date, end_date, item_id, promo_item_price
            "#,
        )
        .bind(&promo.promo_name)
        .bind(promo.start_date)
        .bind(promo.end_date)
        .bind(promo.item_id)
        .bind(promo.promo_item_price)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}

#[async_trait]
impl PromotionStore for PromoRepository {
    type Error = sqlx::Error;

    async fn find_by_item_id(&self, item_id: i32) -> Result<Option<PromotionConfig>, sqlx::Error> {
        Ok(self
            .fetch_by_item_id(item_id)
            .await?
            .map(PromotionConfig::from))
    }
}
