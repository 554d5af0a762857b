//! Item repository for database operations.

use domain::models::NewItem;
use sqlx::PgPool;

use crate::entities::ItemEntity;
use crate::metrics::QueryTimer;

/// Repository for catalog item operations.
#[derive(Clone)]
pub struct ItemRepository {
    pool: PgPool,
}

impl ItemRepository {
    /// Creates a new ItemRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an item by ID.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<ItemEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_item_by_id");
        let result = sqlx::query_as::<_, ItemEntity>(
            r#"
            SELECT id, title, price, description, stock, sales, img_url
            FROM items
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List items, best sellers first.
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<ItemEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_items");
        let result = sqlx::query_as::<_, ItemEntity>(
            r#"
            SELECT id, title, price, description, stock, sales, img_url
            FROM items
            ORDER BY sales DESC, id ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create a new item.
    pub async fn create(&self, item: &NewItem) -> Result<ItemEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_item");
        let result = sqlx::query_as::<_, ItemEntity>(
            r#"
            INSERT INTO items (title, price, description, stock, sales, img_url)
            VALUES ($1, $2, $3, $4, 0, $5)
            RETURNING id, title, price, description, stock, sales, img_url
            "#,
        )
        .bind(&item.title)
        .bind(item.price)
        .bind(&item.description)
        .bind(item.stock)
        .bind(&item.img_url)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}
