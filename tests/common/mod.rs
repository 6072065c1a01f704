#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use catalog_api::{
    config::AppConfig,
    db,
    entities::{CategoryModel, ProductModel, SubCategoryModel},
    services::{CreateCategoryInput, CreateProductInput, CreateSubCategoryInput},
    AppState,
};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

/// Test harness: application state backed by an in-memory SQLite database
/// plus the real router, driven through `oneshot` requests.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    pub async fn new() -> Self {
        let mut cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        // An in-memory SQLite database lives and dies with its connection;
        // the pool must hold exactly one.
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to apply migrations");

        let state = AppState::new(Arc::new(pool), cfg);
        let router = Router::new()
            .nest("/api/v1", catalog_api::api_v1_routes())
            .layer(axum::middleware::from_fn(
                catalog_api::tracing::request_id_middleware,
            ))
            .with_state(state.clone());

        Self { router, state }
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .expect("failed to build request"),
            None => builder
                .body(Body::empty())
                .expect("failed to build request"),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("failed to read body")
            .to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request("GET", uri, None, &[]).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request("POST", uri, Some(body), &[]).await
    }

    pub async fn put_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request("PUT", uri, Some(body), &[]).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request("DELETE", uri, None, &[]).await
    }

    // ---- service-level seeding ----

    pub async fn seed_category(&self, name: &str) -> CategoryModel {
        self.state
            .services
            .catalog
            .create_category(CreateCategoryInput {
                name: name.to_string(),
                slug: None,
            })
            .await
            .expect("failed to seed category")
    }

    pub async fn seed_subcategory(&self, category_id: Uuid, name: &str) -> SubCategoryModel {
        self.state
            .services
            .catalog
            .create_subcategory(CreateSubCategoryInput {
                category_id,
                name: name.to_string(),
                slug: None,
            })
            .await
            .expect("failed to seed subcategory")
    }

    pub async fn seed_product(&self, input: CreateProductInput) -> ProductModel {
        self.state
            .services
            .catalog
            .create_product(input)
            .await
            .expect("failed to seed product")
    }
}

/// A plain in-stock, active product; tests tweak the fields they care about.
pub fn product_input(
    category_id: Uuid,
    subcategory_id: Uuid,
    name: &str,
    price: Decimal,
) -> CreateProductInput {
    CreateProductInput {
        name: name.to_string(),
        slug: None,
        category_id,
        subcategory_id,
        price,
        discount_price: None,
        size: vec!["S".to_string(), "M".to_string(), "L".to_string()],
        fit: Some("Regular".to_string()),
        colors: vec!["Black".to_string(), "White".to_string()],
        badge: None,
        image: None,
        hover_image: None,
        in_stock: true,
        is_active: true,
    }
}
