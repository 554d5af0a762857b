//! Order repository for database operations.

use chrono::{DateTime, Utc};
use domain::models::order::format_order_number;
use domain::models::OrderQuote;
use sqlx::{PgPool, Postgres, Transaction};

use crate::entities::{OrderEntity, SequenceEntity};
use crate::metrics::QueryTimer;

/// Sequence row used for order numbers.
const ORDER_SEQUENCE: &str = "order_info";

/// Result of attempting to place an order.
#[derive(Debug)]
pub enum PlaceOrderOutcome {
    Placed(OrderEntity),
    /// Stock was lower than the requested amount; nothing was written.
    OutOfStock,
}

/// Repository for order placement and lookup.
#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    /// Creates a new OrderRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Place an order in a single transaction.
    ///
    /// Decrements stock only when enough is left, allocates an order number,
    /// inserts the order, then bumps the item's sales counter.
    pub async fn place_order(
        &self,
        user_id: i32,
        quote: &OrderQuote,
        now: DateTime<Utc>,
    ) -> Result<PlaceOrderOutcome, sqlx::Error> {
        let timer = QueryTimer::new("place_order");
        let mut tx = self.pool.begin().await?;

        let decremented = sqlx::query(
            r#"
            UPDATE items
            SET stock = stock - $2
            WHERE id = $1 AND stock >= $2
            "#,
        )
        .bind(quote.item_id)
        .bind(quote.amount)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if decremented == 0 {
            tx.rollback().await?;
            timer.record();
            return Ok(PlaceOrderOutcome::OutOfStock);
        }

        let sequence = Self::allocate_sequence(&mut tx).await?;
        let order_id = format_order_number(now, sequence, user_id);

        let order = sqlx::query_as::<_, OrderEntity>(
            r#"
            INSERT INTO orders (id, user_id, item_id, promo_id, item_price, amount, order_price, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, user_id, item_id, promo_id, item_price, amount, order_price, created_at
            "#,
        )
        .bind(&order_id)
        .bind(user_id)
        .bind(quote.item_id)
        .bind(quote.promo_id)
        .bind(quote.unit_price)
        .bind(quote.amount)
        .bind(quote.order_price)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE items SET sales = sales + $2 WHERE id = $1")
            .bind(quote.item_id)
            .bind(quote.amount)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        timer.record();
        Ok(PlaceOrderOutcome::Placed(order))
    }

    /// Take the current sequence value and advance the row, under a row lock.
    async fn allocate_sequence(tx: &mut Transaction<'_, Postgres>) -> Result<i32, sqlx::Error> {
        let sequence = sqlx::query_as::<_, SequenceEntity>(
            r#"
            SELECT name, current_value, step, init_value, max_value
            FROM sequence_info
            WHERE name = $1
            FOR UPDATE
            "#,
        )
        .bind(ORDER_SEQUENCE)
        .fetch_one(&mut **tx)
        .await?;

        sqlx::query("UPDATE sequence_info SET current_value = $2 WHERE name = $1")
            .bind(ORDER_SEQUENCE)
            .bind(sequence.next_value())
            .execute(&mut **tx)
            .await?;

        Ok(sequence.current_value)
    }

    /// Find an order by its order number.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<OrderEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_order_by_id");
        let result = sqlx::query_as::<_, OrderEntity>(
            r#"
            SELECT id, user_id, item_id, promo_id, item_price, amount, order_price, created_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}
