//! Item catalog with promotion-aware views.

use domain::models::{Item, ItemView, NewItem, NewPromotion, PromotionView};
use domain::services::PromotionResolver;
use persistence::repositories::{ItemRepository, PromoRepository};
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;

use crate::error::is_unique_violation;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Item not found")]
    ItemNotFound,

    #[error("Promotion not found")]
    PromotionNotFound,

    #[error("Item already has a promotion")]
    PromotionExists,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub struct CatalogService {
    items: ItemRepository,
    promos: PromoRepository,
    resolver: PromotionResolver<PromoRepository>,
}

impl CatalogService {
    pub fn new(pool: PgPool) -> Self {
        let promos = PromoRepository::new(pool.clone());
        Self {
            items: ItemRepository::new(pool),
            resolver: PromotionResolver::new(promos.clone()),
            promos,
        }
    }

    /// Item with its promotion fields filled from the current resolution.
    pub async fn get_item(&self, id: i32) -> Result<ItemView, CatalogError> {
        let item: Item = self
            .items
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::ItemNotFound)?
            .into();
        self.view(item).await
    }

    /// Items ordered by sales, best sellers first.
    pub async fn list_items(&self, limit: i64, offset: i64) -> Result<Vec<ItemView>, CatalogError> {
        let entities = self.items.list(limit, offset).await?;
        let mut views = Vec::with_capacity(entities.len());
        for entity in entities {
            views.push(self.view(entity.into()).await?);
        }
        Ok(views)
    }

    pub async fn create_item(&self, item: &NewItem) -> Result<ItemView, CatalogError> {
        let created: Item = self.items.create(item).await?.into();
        info!(item_id = created.id, stock = created.stock, "Item created");
        Ok(ItemView::new(created, None))
    }

    /// Current promotion for an item, if one is configured.
    pub async fn resolve_promotion(&self, item_id: i32) -> Result<Option<PromotionView>, CatalogError> {
        Ok(self.resolver.resolve(item_id).await?)
    }

    pub async fn get_promotion(&self, id: i32) -> Result<PromotionView, CatalogError> {
        let config = self
            .promos
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::PromotionNotFound)?;
        Ok(PromotionView::from_config(config.into(), chrono::Utc::now()))
    }

    /// Attach a promotion to an existing item. An item carries at most one.
    pub async fn create_promotion(&self, promo: &NewPromotion) -> Result<PromotionView, CatalogError> {
        if self.items.find_by_id(promo.item_id).await?.is_none() {
            return Err(CatalogError::ItemNotFound);
        }

        let created = match self.promos.create(promo).await {
            Ok(entity) => entity,
            Err(e) if is_unique_violation(&e) => return Err(CatalogError::PromotionExists),
            Err(e) => return Err(e.into()),
        };

        let view = PromotionView::from_config(created.into(), chrono::Utc::now());
        info!(
            promo_id = view.id,
            item_id = view.item_id,
            status = %view.status,
            "Promotion created"
        );
        Ok(view)
    }

    async fn view(&self, item: Item) -> Result<ItemView, CatalogError> {
        let promo = self.resolver.resolve(item.id).await?;
        Ok(ItemView::new(item, promo.as_ref()))
    }
}
