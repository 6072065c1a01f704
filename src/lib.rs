//! Product catalog backend.
//!
//! A relational Category → SubCategory → Product schema, an administrative
//! write surface, and a read-only storefront API that lists and filters
//! active products.

pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod media;
pub mod openapi;
pub mod services;
pub mod slug;
pub mod tracing;

use axum::Router;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub services: handlers::AppServices,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>, config: config::AppConfig) -> Self {
        let services = handlers::AppServices::new(db.clone());
        Self {
            db,
            config,
            services,
        }
    }
}

/// Statically assembled route table for the versioned API.
pub fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .nest("/products", handlers::products::storefront_routes())
        .nest("/admin", handlers::admin::admin_routes())
}
