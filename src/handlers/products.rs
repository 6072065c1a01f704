//! Storefront product endpoints and the client-facing product shape.

use crate::errors::ApiError;
use crate::handlers::common::{map_service_error, success_response};
use crate::media::RequestBase;
use crate::services::storefront::{CatalogProduct, ProductFilters};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Routes for the public, read-only product surface
pub fn storefront_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products))
        .route("/:slug", get(get_product))
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ProductListQuery {
    /// Category slug, matched case-insensitively
    pub category: Option<String>,
    /// Subcategory slug, matched case-insensitively
    pub subcategory: Option<String>,
}

/// Client-facing product representation. Parent entities are flattened to
/// their display names; media paths are resolved to absolute URLs.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: Uuid,
    #[schema(example = "Classic Tee")]
    pub name: String,
    #[schema(example = "classic-tee")]
    pub slug: String,
    #[schema(example = "29.99")]
    pub price: Decimal,
    pub discount_price: Option<Decimal>,
    /// Display name of the owning category
    #[schema(example = "Men")]
    pub category: String,
    /// Display name of the owning subcategory
    #[schema(example = "Shirts")]
    pub subcategory: String,
    /// Absolute URL of the primary image, if one is set
    #[schema(example = "https://shop.example.com/media/products/classic-tee.jpg")]
    pub image: Option<String>,
    /// Absolute URL of the hover image, if one is set
    pub hover_image: Option<String>,
    pub size: Vec<String>,
    pub fit: Option<String>,
    pub colors: Vec<String>,
    pub in_stock: bool,
    pub is_active: bool,
}

impl ProductResponse {
    /// Shape a stored product for the storefront. Pure with respect to the
    /// record and the request base.
    pub fn from_catalog(entry: CatalogProduct, base: &RequestBase) -> Self {
        let CatalogProduct {
            product,
            category_name,
            subcategory_name,
        } = entry;
        Self {
            id: product.id,
            name: product.name,
            slug: product.slug,
            price: product.price,
            discount_price: product.discount_price,
            category: category_name,
            subcategory: subcategory_name,
            image: base.resolve_opt(product.image.as_deref()),
            hover_image: base.resolve_opt(product.hover_image.as_deref()),
            size: product.size.0,
            fit: product.fit,
            colors: product.colors.0,
            in_stock: product.in_stock,
            is_active: product.is_active,
        }
    }
}

/// List active products, optionally filtered by category/subcategory slug
#[utoipa::path(
    get,
    path = "/api/v1/products",
    params(ProductListQuery),
    responses(
        (status = 200, description = "Matching active products", body = Vec<ProductResponse>)
    ),
    tag = "Storefront"
)]
pub(crate) async fn list_products(
    State(state): State<AppState>,
    base: RequestBase,
    Query(query): Query<ProductListQuery>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let filters = ProductFilters {
        category: query.category,
        subcategory: query.subcategory,
    };

    let products = state
        .services
        .storefront
        .list_products(&filters)
        .await
        .map_err(map_service_error)?;

    let body: Vec<ProductResponse> = products
        .into_iter()
        .map(|entry| ProductResponse::from_catalog(entry, &base))
        .collect();

    Ok(success_response(body))
}

/// Get a single active product by slug
#[utoipa::path(
    get,
    path = "/api/v1/products/:slug",
    params(
        ("slug" = String, Path, description = "Product slug")
    ),
    responses(
        (status = 200, description = "Product retrieved", body = ProductResponse),
        (status = 404, description = "No active product with this slug", body = crate::errors::ErrorResponse)
    ),
    tag = "Storefront"
)]
pub(crate) async fn get_product(
    State(state): State<AppState>,
    base: RequestBase,
    Path(slug): Path<String>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let entry = state
        .services
        .storefront
        .get_product_by_slug(&slug)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(ProductResponse::from_catalog(entry, &base)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::product;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn sample_product(image: Option<&str>) -> CatalogProduct {
        CatalogProduct {
            product: product::Model {
                id: Uuid::new_v4(),
                name: "Classic Tee".to_string(),
                slug: "classic-tee".to_string(),
                category_id: Uuid::new_v4(),
                subcategory_id: Uuid::new_v4(),
                price: dec!(29.99),
                discount_price: None,
                size: vec!["S".to_string(), "M".to_string()].into(),
                fit: Some("Regular".to_string()),
                colors: vec!["Black".to_string()].into(),
                badge: None,
                image: image.map(str::to_string),
                hover_image: None,
                in_stock: true,
                is_active: true,
                created_at: Utc::now(),
            },
            category_name: "Men".to_string(),
            subcategory_name: "Shirts".to_string(),
        }
    }

    #[test]
    fn mapper_flattens_names_and_resolves_image() {
        let base = RequestBase::new("https", "shop.example.com", "/media");
        let response =
            ProductResponse::from_catalog(sample_product(Some("products/classic-tee.jpg")), &base);

        assert_eq!(response.category, "Men");
        assert_eq!(response.subcategory, "Shirts");
        assert_eq!(response.price, dec!(29.99));
        assert_eq!(
            response.image.as_deref(),
            Some("https://shop.example.com/media/products/classic-tee.jpg")
        );
        assert_eq!(response.hover_image, None);
    }

    #[test]
    fn mapper_never_fabricates_image_urls() {
        let base = RequestBase::new("https", "shop.example.com", "/media");
        let response = ProductResponse::from_catalog(sample_product(None), &base);
        assert_eq!(response.image, None);
    }
}
