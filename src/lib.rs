pub mod ai;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;

use std::sync::Arc;

use crate::ai::EvolutionGenerator;
use crate::db::Database;

/// Shared application state, constructed once in `main` and injected into
/// every handler through axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub generator: Arc<EvolutionGenerator>,
}
