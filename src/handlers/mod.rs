pub mod admin;
pub mod common;
pub mod health;
pub mod products;

use crate::db::DbPool;
use crate::services::{CatalogService, StorefrontService};
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub catalog: Arc<CatalogService>,
    pub storefront: Arc<StorefrontService>,
}

impl AppServices {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self {
            catalog: Arc::new(CatalogService::new(db.clone())),
            storefront: Arc::new(StorefrontService::new(db)),
        }
    }
}
