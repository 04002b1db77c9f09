use std::sync::Arc;

use crate::config::ServerConfig;
use crate::services::gifts::GiftService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: giftlist_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Access service for the gift catalog.
    pub gifts: GiftService,
}

impl AppState {
    /// Wire the Postgres-backed gift service onto `pool`.
    pub fn new(pool: giftlist_db::DbPool, config: ServerConfig) -> Self {
        Self {
            gifts: GiftService::postgres(pool.clone()),
            pool,
            config: Arc::new(config),
        }
    }
}
