// src/state.rs

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::config::Config;
use crate::gateways::{courses::CourseRegistry, identity::IdentityGateway};

/// Shared application state.
///
/// Collaborators (identity gateway, course registry) are injected here as
/// trait objects instead of being reached through globals, so tests and
/// alternative deployments can swap them out.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Config,
    pub identity: Arc<dyn IdentityGateway>,
    pub courses: Arc<dyn CourseRegistry>,
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
