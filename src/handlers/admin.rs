//! Administrative catalog maintenance endpoints.
//!
//! This surface enforces request validation and delegates slug derivation
//! and the uniqueness/referential invariants to the catalog service. It is
//! deliberately separate from the storefront routes and shares no state
//! with them beyond the service layer.

use crate::entities::{category, product, subcategory, Badge};
use crate::errors::ApiError;
use crate::handlers::common::{
    created_response, map_service_error, no_content_response, success_response, validate_input,
    PaginatedResponse, PaginationParams,
};
use crate::services::catalog::{
    CreateCategoryInput, CreateProductInput, CreateSubCategoryInput, UpdateCategoryInput,
    UpdateProductInput, UpdateSubCategoryInput,
};
use crate::AppState;
use axum::{
    extract::{Json, Path, Query, State},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Routes for the administrative management surface
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", post(create_category).get(list_categories))
        .route(
            "/categories/:id",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
        .route(
            "/subcategories",
            post(create_subcategory).get(list_subcategories),
        )
        .route(
            "/subcategories/:id",
            get(get_subcategory)
                .put(update_subcategory)
                .delete(delete_subcategory),
        )
        .route("/products", post(create_product).get(list_products))
        .route(
            "/products/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

fn normalize_optional_string(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .and_then(|v| if v.is_empty() { None } else { Some(v) })
}

fn ensure_decimal_non_negative(value: &Decimal, field: &str) -> Result<(), ApiError> {
    if *value < Decimal::ZERO {
        Err(ApiError::ValidationError(format!(
            "{} cannot be negative",
            field
        )))
    } else {
        Ok(())
    }
}

// ---- categories ----

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    pub name: String,
    /// Derived from the name when omitted
    #[validate(length(max = 100))]
    pub slug: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 100))]
    pub slug: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

impl From<category::Model> for CategoryResponse {
    fn from(model: category::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            slug: model.slug,
        }
    }
}

/// Create a category
#[utoipa::path(
    post,
    path = "/api/v1/admin/categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse),
        (status = 409, description = "Slug already in use", body = crate::errors::ErrorResponse)
    ),
    tag = "Admin"
)]
pub(crate) async fn create_category(
    State(state): State<AppState>,
    Json(payload): Json<CreateCategoryRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let input = CreateCategoryInput {
        name: payload.name,
        slug: normalize_optional_string(payload.slug),
    };
    let created = state
        .services
        .catalog
        .create_category(input)
        .await
        .map_err(map_service_error)?;

    Ok(created_response(CategoryResponse::from(created)))
}

/// List all categories
#[utoipa::path(
    get,
    path = "/api/v1/admin/categories",
    responses(
        (status = 200, description = "All categories", body = Vec<CategoryResponse>)
    ),
    tag = "Admin"
)]
pub(crate) async fn list_categories(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let categories = state
        .services
        .catalog
        .list_categories()
        .await
        .map_err(map_service_error)?;
    let body: Vec<CategoryResponse> = categories.into_iter().map(CategoryResponse::from).collect();
    Ok(success_response(body))
}

/// Get a category by id
#[utoipa::path(
    get,
    path = "/api/v1/admin/categories/:id",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category retrieved", body = CategoryResponse),
        (status = 404, description = "Category not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Admin"
)]
pub(crate) async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let found = state
        .services
        .catalog
        .get_category(id)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(CategoryResponse::from(found)))
}

/// Update a category
#[utoipa::path(
    put,
    path = "/api/v1/admin/categories/:id",
    params(("id" = Uuid, Path, description = "Category ID")),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = CategoryResponse),
        (status = 404, description = "Category not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Slug already in use", body = crate::errors::ErrorResponse)
    ),
    tag = "Admin"
)]
pub(crate) async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let input = UpdateCategoryInput {
        name: normalize_optional_string(payload.name),
        slug: normalize_optional_string(payload.slug),
    };
    let updated = state
        .services
        .catalog
        .update_category(id, input)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(CategoryResponse::from(updated)))
}

/// Delete a category and, by cascade, its subcategories and products
#[utoipa::path(
    delete,
    path = "/api/v1/admin/categories/:id",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, description = "Category not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Admin"
)]
pub(crate) async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    state
        .services
        .catalog
        .delete_category(id)
        .await
        .map_err(map_service_error)?;
    Ok(no_content_response())
}

// ---- subcategories ----

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSubCategoryRequest {
    pub category_id: Uuid,
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    pub name: String,
    /// Derived from the name when omitted; unique within the category
    #[validate(length(max = 100))]
    pub slug: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateSubCategoryRequest {
    pub category_id: Option<Uuid>,
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 100))]
    pub slug: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubCategoryResponse {
    pub id: Uuid,
    pub category_id: Uuid,
    pub name: String,
    pub slug: String,
}

impl From<subcategory::Model> for SubCategoryResponse {
    fn from(model: subcategory::Model) -> Self {
        Self {
            id: model.id,
            category_id: model.category_id,
            name: model.name,
            slug: model.slug,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct SubCategoryListQuery {
    /// Restrict the listing to one category
    pub category_id: Option<Uuid>,
}

/// Create a subcategory under an existing category
#[utoipa::path(
    post,
    path = "/api/v1/admin/subcategories",
    request_body = CreateSubCategoryRequest,
    responses(
        (status = 201, description = "Subcategory created", body = SubCategoryResponse),
        (status = 409, description = "Slug already in use within the category", body = crate::errors::ErrorResponse),
        (status = 422, description = "Category does not exist", body = crate::errors::ErrorResponse)
    ),
    tag = "Admin"
)]
pub(crate) async fn create_subcategory(
    State(state): State<AppState>,
    Json(payload): Json<CreateSubCategoryRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let input = CreateSubCategoryInput {
        category_id: payload.category_id,
        name: payload.name,
        slug: normalize_optional_string(payload.slug),
    };
    let created = state
        .services
        .catalog
        .create_subcategory(input)
        .await
        .map_err(map_service_error)?;

    Ok(created_response(SubCategoryResponse::from(created)))
}

/// List subcategories, optionally restricted to one category
#[utoipa::path(
    get,
    path = "/api/v1/admin/subcategories",
    params(SubCategoryListQuery),
    responses(
        (status = 200, description = "Subcategories", body = Vec<SubCategoryResponse>)
    ),
    tag = "Admin"
)]
pub(crate) async fn list_subcategories(
    State(state): State<AppState>,
    Query(query): Query<SubCategoryListQuery>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let subcategories = state
        .services
        .catalog
        .list_subcategories(query.category_id)
        .await
        .map_err(map_service_error)?;
    let body: Vec<SubCategoryResponse> = subcategories
        .into_iter()
        .map(SubCategoryResponse::from)
        .collect();
    Ok(success_response(body))
}

/// Get a subcategory by id
#[utoipa::path(
    get,
    path = "/api/v1/admin/subcategories/:id",
    params(("id" = Uuid, Path, description = "Subcategory ID")),
    responses(
        (status = 200, description = "Subcategory retrieved", body = SubCategoryResponse),
        (status = 404, description = "Subcategory not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Admin"
)]
pub(crate) async fn get_subcategory(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let found = state
        .services
        .catalog
        .get_subcategory(id)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(SubCategoryResponse::from(found)))
}

/// Update a subcategory
#[utoipa::path(
    put,
    path = "/api/v1/admin/subcategories/:id",
    params(("id" = Uuid, Path, description = "Subcategory ID")),
    request_body = UpdateSubCategoryRequest,
    responses(
        (status = 200, description = "Subcategory updated", body = SubCategoryResponse),
        (status = 404, description = "Subcategory not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Slug already in use within the category", body = crate::errors::ErrorResponse)
    ),
    tag = "Admin"
)]
pub(crate) async fn update_subcategory(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSubCategoryRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let input = UpdateSubCategoryInput {
        category_id: payload.category_id,
        name: normalize_optional_string(payload.name),
        slug: normalize_optional_string(payload.slug),
    };
    let updated = state
        .services
        .catalog
        .update_subcategory(id, input)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(SubCategoryResponse::from(updated)))
}

/// Delete a subcategory and, by cascade, its products
#[utoipa::path(
    delete,
    path = "/api/v1/admin/subcategories/:id",
    params(("id" = Uuid, Path, description = "Subcategory ID")),
    responses(
        (status = 204, description = "Subcategory deleted"),
        (status = 404, description = "Subcategory not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Admin"
)]
pub(crate) async fn delete_subcategory(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    state
        .services
        .catalog
        .delete_subcategory(id)
        .await
        .map_err(map_service_error)?;
    Ok(no_content_response())
}

// ---- products ----

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 255, message = "name must be between 1 and 255 characters"))]
    pub name: String,
    /// Derived from the name when omitted; globally unique
    #[validate(length(max = 255))]
    pub slug: Option<String>,
    pub category_id: Uuid,
    pub subcategory_id: Uuid,
    #[schema(example = "29.99")]
    pub price: Decimal,
    pub discount_price: Option<Decimal>,
    #[serde(default)]
    pub size: Vec<String>,
    #[validate(length(max = 50))]
    pub fit: Option<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    /// One of `NEW` or `SALE`
    #[schema(value_type = Option<String>, example = "NEW")]
    pub badge: Option<Badge>,
    /// Relative media path returned by the upload pipeline
    pub image: Option<String>,
    pub hover_image: Option<String>,
    #[serde(default = "default_true")]
    pub in_stock: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(max = 255))]
    pub slug: Option<String>,
    pub category_id: Option<Uuid>,
    pub subcategory_id: Option<Uuid>,
    pub price: Option<Decimal>,
    pub discount_price: Option<Decimal>,
    pub size: Option<Vec<String>>,
    #[validate(length(max = 50))]
    pub fit: Option<String>,
    pub colors: Option<Vec<String>>,
    #[schema(value_type = Option<String>, example = "SALE")]
    pub badge: Option<Badge>,
    pub image: Option<String>,
    pub hover_image: Option<String>,
    pub in_stock: Option<bool>,
    pub is_active: Option<bool>,
}

/// Full administrative view of a product, media paths unresolved.
#[derive(Debug, Serialize, ToSchema)]
pub struct AdminProductResponse {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub category_id: Uuid,
    pub subcategory_id: Uuid,
    pub price: Decimal,
    pub discount_price: Option<Decimal>,
    pub size: Vec<String>,
    pub fit: Option<String>,
    pub colors: Vec<String>,
    #[schema(value_type = Option<String>, example = "NEW")]
    pub badge: Option<Badge>,
    pub image: Option<String>,
    pub hover_image: Option<String>,
    pub in_stock: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<product::Model> for AdminProductResponse {
    fn from(model: product::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            slug: model.slug,
            category_id: model.category_id,
            subcategory_id: model.subcategory_id,
            price: model.price,
            discount_price: model.discount_price,
            size: model.size.0,
            fit: model.fit,
            colors: model.colors.0,
            badge: model.badge,
            image: model.image,
            hover_image: model.hover_image,
            in_stock: model.in_stock,
            is_active: model.is_active,
            created_at: model.created_at,
        }
    }
}

/// Create a product
#[utoipa::path(
    post,
    path = "/api/v1/admin/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = AdminProductResponse),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse),
        (status = 409, description = "Slug already in use", body = crate::errors::ErrorResponse),
        (status = 422, description = "Category or subcategory does not exist", body = crate::errors::ErrorResponse)
    ),
    tag = "Admin"
)]
pub(crate) async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    ensure_decimal_non_negative(&payload.price, "price")?;
    if let Some(value) = payload.discount_price.as_ref() {
        ensure_decimal_non_negative(value, "discount_price")?;
    }
    // discount_price is deliberately not required to undercut price.

    let input = CreateProductInput {
        name: payload.name,
        slug: normalize_optional_string(payload.slug),
        category_id: payload.category_id,
        subcategory_id: payload.subcategory_id,
        price: payload.price,
        discount_price: payload.discount_price,
        size: payload.size,
        fit: normalize_optional_string(payload.fit),
        colors: payload.colors,
        badge: payload.badge,
        image: normalize_optional_string(payload.image),
        hover_image: normalize_optional_string(payload.hover_image),
        in_stock: payload.in_stock,
        is_active: payload.is_active,
    };
    let created = state
        .services
        .catalog
        .create_product(input)
        .await
        .map_err(map_service_error)?;

    Ok(created_response(AdminProductResponse::from(created)))
}

/// List products, newest first, inactive rows included
#[utoipa::path(
    get,
    path = "/api/v1/admin/products",
    operation_id = "admin_list_products",
    params(PaginationParams),
    responses(
        (status = 200, description = "One page of products with pagination metadata")
    ),
    tag = "Admin"
)]
pub(crate) async fn list_products(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationParams>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let page = state
        .services
        .catalog
        .list_products(pagination.per_page, pagination.offset())
        .await
        .map_err(map_service_error)?;

    let data: Vec<AdminProductResponse> = page
        .products
        .into_iter()
        .map(AdminProductResponse::from)
        .collect();

    Ok(success_response(PaginatedResponse::new(
        data,
        pagination.page,
        pagination.per_page,
        page.total,
    )))
}

/// Get a product by id, active or not
#[utoipa::path(
    get,
    path = "/api/v1/admin/products/:id",
    operation_id = "admin_get_product",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product retrieved", body = AdminProductResponse),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Admin"
)]
pub(crate) async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let found = state
        .services
        .catalog
        .get_product(id)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(AdminProductResponse::from(found)))
}

/// Update a product
#[utoipa::path(
    put,
    path = "/api/v1/admin/products/:id",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = AdminProductResponse),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Slug already in use", body = crate::errors::ErrorResponse),
        (status = 422, description = "Category or subcategory does not exist", body = crate::errors::ErrorResponse)
    ),
    tag = "Admin"
)]
pub(crate) async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    if let Some(value) = payload.price.as_ref() {
        ensure_decimal_non_negative(value, "price")?;
    }
    if let Some(value) = payload.discount_price.as_ref() {
        ensure_decimal_non_negative(value, "discount_price")?;
    }

    let input = UpdateProductInput {
        name: normalize_optional_string(payload.name),
        slug: normalize_optional_string(payload.slug),
        category_id: payload.category_id,
        subcategory_id: payload.subcategory_id,
        price: payload.price,
        discount_price: payload.discount_price,
        size: payload.size,
        fit: normalize_optional_string(payload.fit),
        colors: payload.colors,
        badge: payload.badge,
        image: normalize_optional_string(payload.image),
        hover_image: normalize_optional_string(payload.hover_image),
        in_stock: payload.in_stock,
        is_active: payload.is_active,
    };
    let updated = state
        .services
        .catalog
        .update_product(id, input)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(AdminProductResponse::from(updated)))
}

/// Delete a product outright (soft-delete is `is_active = false`)
#[utoipa::path(
    delete,
    path = "/api/v1/admin/products/:id",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Admin"
)]
pub(crate) async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    state
        .services
        .catalog
        .delete_product(id)
        .await
        .map_err(map_service_error)?;
    Ok(no_content_response())
}
