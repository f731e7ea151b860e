// src/state.rs
use sqlx::PgPool;

use crate::config::TrackerConfig;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub config: TrackerConfig,
}

impl AppState {
    pub fn new(db_pool: PgPool, config: TrackerConfig) -> Self {
        Self { db_pool, config }
    }
}
