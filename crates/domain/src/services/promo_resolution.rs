//! Promotion resolution.
//!
//! Resolving a promotion means fetching the configuration attached to an item
//! and annotating it with its status at the current instant. Nothing is cached:
//! the status is recomputed on every call, so two resolutions of the same row
//! at different instants may legitimately disagree.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::models::{PromotionConfig, PromotionView};

/// Read access to stored promotion configurations.
#[async_trait]
pub trait PromotionStore: Send + Sync {
    /// Infrastructure failure type; passed through untouched by the resolver.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch the promotion attached to `item_id`, if any.
    async fn find_by_item_id(&self, item_id: i32) -> Result<Option<PromotionConfig>, Self::Error>;
}

#[async_trait]
impl<S: PromotionStore + ?Sized> PromotionStore for std::sync::Arc<S> {
    type Error = S::Error;

    async fn find_by_item_id(&self, item_id: i32) -> Result<Option<PromotionConfig>, Self::Error> {
        (**self).find_by_item_id(item_id).await
    }
}

/// Pure resolution step: classify a stored configuration at `now`.
pub fn resolve_promotion(config: PromotionConfig, now: DateTime<Utc>) -> PromotionView {
    PromotionView::from_config(config, now)
}

/// Resolves promotions for items against a [`PromotionStore`].
#[derive(Debug, Clone)]
pub struct PromotionResolver<S> {
    store: S,
}

impl<S: PromotionStore> PromotionResolver<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolve the promotion for `item_id` at the current wall-clock time.
    pub async fn resolve(&self, item_id: i32) -> Result<Option<PromotionView>, S::Error> {
        self.resolve_at(item_id, Utc::now()).await
    }

    /// Resolve the promotion for `item_id` as seen at `now`.
    ///
    /// Non-positive ids cannot reference an item and resolve to `None`
    /// without touching the store.
    pub async fn resolve_at(
        &self,
        item_id: i32,
        now: DateTime<Utc>,
    ) -> Result<Option<PromotionView>, S::Error> {
        if item_id <= 0 {
            return Ok(None);
        }

        let Some(config) = self.store.find_by_item_id(item_id).await? else {
            tracing::debug!(item_id, "No promotion configured for item");
            return Ok(None);
        };

        let view = resolve_promotion(config, now);
        tracing::debug!(
            item_id,
            promo_id = view.id,
            status = %view.status,
            "Promotion resolved"
        );
        Ok(Some(view))
    }
}

/// Promotion store held in memory. Used by tests and local fixtures.
///
/// Lookups return the most recently inserted configuration for an item.
#[derive(Debug, Default)]
pub struct InMemoryPromotionStore {
    promos: RwLock<Vec<PromotionConfig>>,
}

impl InMemoryPromotionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_promotions(promos: Vec<PromotionConfig>) -> Self {
        Self {
            promos: RwLock::new(promos),
        }
    }

    pub async fn insert(&self, promo: PromotionConfig) {
        self.promos.write().await.push(promo);
    }

    pub async fn len(&self) -> usize {
        self.promos.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.promos.read().await.is_empty()
    }
}

#[async_trait]
impl PromotionStore for InMemoryPromotionStore {
    type Error = std::convert::Infallible;

    async fn find_by_item_id(&self, item_id: i32) -> Result<Option<PromotionConfig>, Self::Error> {
        Ok(self
            .promos
            .read()
            .await
            .iter()
            .rev()
            .find(|p| p.item_id == item_id)
            .cloned())
    }
}
