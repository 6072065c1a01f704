//! OpenAPI description of the HTTP surface, served as JSON.

use axum::Json;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "catalog-api",
        description = "Product catalog backend: storefront reads and administrative catalog maintenance"
    ),
    paths(
        crate::handlers::products::list_products,
        crate::handlers::products::get_product,
        crate::handlers::admin::create_category,
        crate::handlers::admin::list_categories,
        crate::handlers::admin::get_category,
        crate::handlers::admin::update_category,
        crate::handlers::admin::delete_category,
        crate::handlers::admin::create_subcategory,
        crate::handlers::admin::list_subcategories,
        crate::handlers::admin::get_subcategory,
        crate::handlers::admin::update_subcategory,
        crate::handlers::admin::delete_subcategory,
        crate::handlers::admin::create_product,
        crate::handlers::admin::list_products,
        crate::handlers::admin::get_product,
        crate::handlers::admin::update_product,
        crate::handlers::admin::delete_product,
    ),
    components(schemas(
        crate::handlers::products::ProductResponse,
        crate::handlers::admin::CreateCategoryRequest,
        crate::handlers::admin::UpdateCategoryRequest,
        crate::handlers::admin::CategoryResponse,
        crate::handlers::admin::CreateSubCategoryRequest,
        crate::handlers::admin::UpdateSubCategoryRequest,
        crate::handlers::admin::SubCategoryResponse,
        crate::handlers::admin::CreateProductRequest,
        crate::handlers::admin::UpdateProductRequest,
        crate::handlers::admin::AdminProductResponse,
        crate::errors::ErrorResponse,
    )),
    tags(
        (name = "Storefront", description = "Read-only product listing for storefront clients"),
        (name = "Admin", description = "Catalog maintenance")
    )
)]
pub struct ApiDoc;

/// `GET /api/docs/openapi.json`
pub async fn serve_openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
