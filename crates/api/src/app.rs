use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, security_headers_middleware, trace_id, OtpRateLimiter,
};
use crate::routes::{health, items, orders, promos, users};
use crate::session::{InMemorySessionStore, SessionStore};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub sessions: Arc<dyn SessionStore>,
    pub otp_limiter: Option<Arc<OtpRateLimiter>>,
}

impl AppState {
    pub fn new(config: Config, pool: PgPool, sessions: Arc<dyn SessionStore>) -> Self {
        let otp_limiter =
            OtpRateLimiter::new(config.security.otp_rate_limit_per_minute).map(Arc::new);
        Self {
            pool,
            config: Arc::new(config),
            sessions,
            otp_limiter,
        }
    }
}

/// Build the router with a fresh in-memory session store.
pub fn create_app(config: Config, pool: PgPool) -> Router {
    let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    create_router(AppState::new(config, pool, sessions))
}

pub fn create_router(state: AppState) -> Router {
    let config = state.config.clone();

    let cors = if config.security.cors_origins.is_empty() {
        // Development: allow any origin
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Handlers that need a login take the `SessionUser` extractor.
    let api_routes = Router::new()
        .route("/api/v1/users/otp", post(users::request_otp))
        .route("/api/v1/users/register", post(users::register))
        .route("/api/v1/users/login", post(users::login))
        .route("/api/v1/users/logout", post(users::logout))
        .route("/api/v1/users/me", get(users::get_current_user))
        .route("/api/v1/users/:id", get(users::get_user))
        .route(
            "/api/v1/items",
            get(items::list_items).post(items::create_item),
        )
        .route("/api/v1/items/:id", get(items::get_item))
        .route("/api/v1/items/:id/promo", get(items::get_item_promotion))
        .route("/api/v1/promos", post(promos::create_promotion))
        .route("/api/v1/promos/:id", get(promos::get_promotion))
        .route("/api/v1/orders", post(orders::create_order))
        .route("/api/v1/orders/:id", get(orders::get_order));

    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            security_headers_middleware,
        ))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
