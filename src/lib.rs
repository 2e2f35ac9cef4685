pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

use crate::config::FixtureConfig;
use crate::services::store::DocumentStore;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: FixtureConfig,
    pub store: Arc<DocumentStore>,
}

impl AppState {
    pub fn new(config: FixtureConfig) -> Self {
        let store = Arc::new(DocumentStore::new(config.upload_dir.clone()));
        Self { config, store }
    }
}

pub fn create_app(state: AppState) -> Router {
    // Method fallbacks keep the contract of "anything but these two
    // routes is a 404" (axum would otherwise answer 405 on a method
    // mismatch for a known path).
    Router::new()
        .route(
            "/config",
            get(handlers::config::get_config).fallback(handlers::not_found),
        )
        .route(
            "/upload",
            post(handlers::upload::upload_document).fallback(handlers::not_found),
        )
        .fallback(handlers::not_found)
        .with_state(state)
}
