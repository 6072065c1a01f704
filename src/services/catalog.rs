//! Write path for the catalog: slug derivation, uniqueness and referential
//! checks, and row deletion (cascades run in the storage engine).

use crate::entities::{category, product, subcategory, Badge, Category, Product, SubCategory};
use crate::errors::ServiceError;
use crate::slug;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Catalog maintenance service. Every operation is a single store
/// transaction; writes persist rows and emit no events.
#[derive(Clone)]
pub struct CatalogService {
    db: Arc<DatabaseConnection>,
}

#[derive(Debug, Clone, Default)]
pub struct CreateCategoryInput {
    pub name: String,
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateCategoryInput {
    pub name: Option<String>,
    pub slug: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateSubCategoryInput {
    pub category_id: Uuid,
    pub name: String,
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateSubCategoryInput {
    pub category_id: Option<Uuid>,
    pub name: Option<String>,
    pub slug: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateProductInput {
    pub name: String,
    pub slug: Option<String>,
    pub category_id: Uuid,
    pub subcategory_id: Uuid,
    pub price: Decimal,
    pub discount_price: Option<Decimal>,
    pub size: Vec<String>,
    pub fit: Option<String>,
    pub colors: Vec<String>,
    pub badge: Option<Badge>,
    pub image: Option<String>,
    pub hover_image: Option<String>,
    pub in_stock: bool,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateProductInput {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub category_id: Option<Uuid>,
    pub subcategory_id: Option<Uuid>,
    pub price: Option<Decimal>,
    pub discount_price: Option<Decimal>,
    pub size: Option<Vec<String>>,
    pub fit: Option<String>,
    pub colors: Option<Vec<String>>,
    pub badge: Option<Badge>,
    pub image: Option<String>,
    pub hover_image: Option<String>,
    pub in_stock: Option<bool>,
    pub is_active: Option<bool>,
}

/// One page of the administrative product listing.
#[derive(Debug)]
pub struct ProductPage {
    pub products: Vec<product::Model>,
    pub total: u64,
}

impl CatalogService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    // ---- categories ----

    #[instrument(skip(self))]
    pub async fn create_category(
        &self,
        input: CreateCategoryInput,
    ) -> Result<category::Model, ServiceError> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(ServiceError::ValidationError(
                "category name cannot be blank".to_string(),
            ));
        }
        let slug = slug::resolve_slug(input.slug.as_deref(), &name);
        if slug.is_empty() {
            return Err(ServiceError::ValidationError(format!(
                "no slug can be derived from category name '{}'",
                name
            )));
        }
        self.ensure_unique_category_slug(&slug, None).await?;

        let created = category::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            slug: Set(slug),
        }
        .insert(&*self.db)
        .await?;

        info!("Created category {}", created.id);
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn update_category(
        &self,
        category_id: Uuid,
        input: UpdateCategoryInput,
    ) -> Result<category::Model, ServiceError> {
        let existing = self.get_category(category_id).await?;
        let mut active: category::ActiveModel = existing.clone().into();

        // A stored slug is never recomputed from a name change.
        if let Some(slug) = non_blank(input.slug) {
            if slug != existing.slug {
                self.ensure_unique_category_slug(&slug, Some(category_id))
                    .await?;
                active.slug = Set(slug);
            }
        }
        if let Some(name) = non_blank(input.name) {
            active.name = Set(name);
        }

        if !active.is_changed() {
            return Ok(existing);
        }
        let updated = active.update(&*self.db).await?;
        info!("Updated category {}", category_id);
        Ok(updated)
    }

    pub async fn get_category(&self, category_id: Uuid) -> Result<category::Model, ServiceError> {
        Category::find_by_id(category_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("category {} not found", category_id)))
    }

    pub async fn list_categories(&self) -> Result<Vec<category::Model>, ServiceError> {
        Category::find()
            .order_by_asc(category::Column::Name)
            .all(&*self.db)
            .await
            .map_err(Into::into)
    }

    /// Deletes a category; its subcategories and products cascade in the
    /// storage engine.
    #[instrument(skip(self))]
    pub async fn delete_category(&self, category_id: Uuid) -> Result<(), ServiceError> {
        let existing = self.get_category(category_id).await?;
        let active: category::ActiveModel = existing.into();
        active.delete(&*self.db).await?;
        info!("Deleted category {}", category_id);
        Ok(())
    }

    // ---- subcategories ----

    #[instrument(skip(self))]
    pub async fn create_subcategory(
        &self,
        input: CreateSubCategoryInput,
    ) -> Result<subcategory::Model, ServiceError> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(ServiceError::ValidationError(
                "subcategory name cannot be blank".to_string(),
            ));
        }
        self.ensure_category_exists(input.category_id).await?;

        let slug = slug::resolve_slug(input.slug.as_deref(), &name);
        if slug.is_empty() {
            return Err(ServiceError::ValidationError(format!(
                "no slug can be derived from subcategory name '{}'",
                name
            )));
        }
        self.ensure_unique_subcategory_slug(input.category_id, &slug, None)
            .await?;

        let created = subcategory::ActiveModel {
            id: Set(Uuid::new_v4()),
            category_id: Set(input.category_id),
            name: Set(name),
            slug: Set(slug),
        }
        .insert(&*self.db)
        .await?;

        info!(
            "Created subcategory {} under category {}",
            created.id, input.category_id
        );
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn update_subcategory(
        &self,
        subcategory_id: Uuid,
        input: UpdateSubCategoryInput,
    ) -> Result<subcategory::Model, ServiceError> {
        let existing = self.get_subcategory(subcategory_id).await?;

        let target_category = match input.category_id {
            Some(category_id) => {
                self.ensure_category_exists(category_id).await?;
                category_id
            }
            None => existing.category_id,
        };
        let target_slug = match non_blank(input.slug.clone()) {
            Some(slug) => slug,
            None => existing.slug.clone(),
        };

        // Re-check the pair whenever either side of it moves.
        if target_category != existing.category_id || target_slug != existing.slug {
            self.ensure_unique_subcategory_slug(target_category, &target_slug, Some(subcategory_id))
                .await?;
        }

        let mut active: subcategory::ActiveModel = existing.clone().into();
        if target_category != existing.category_id {
            active.category_id = Set(target_category);
        }
        if target_slug != existing.slug {
            active.slug = Set(target_slug);
        }
        if let Some(name) = non_blank(input.name) {
            active.name = Set(name);
        }

        if !active.is_changed() {
            return Ok(existing);
        }
        let updated = active.update(&*self.db).await?;
        info!("Updated subcategory {}", subcategory_id);
        Ok(updated)
    }

    pub async fn get_subcategory(
        &self,
        subcategory_id: Uuid,
    ) -> Result<subcategory::Model, ServiceError> {
        SubCategory::find_by_id(subcategory_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("subcategory {} not found", subcategory_id))
            })
    }

    pub async fn list_subcategories(
        &self,
        category_id: Option<Uuid>,
    ) -> Result<Vec<subcategory::Model>, ServiceError> {
        let mut query = SubCategory::find().order_by_asc(subcategory::Column::Name);
        if let Some(category_id) = category_id {
            query = query.filter(subcategory::Column::CategoryId.eq(category_id));
        }
        query.all(&*self.db).await.map_err(Into::into)
    }

    /// Deletes a subcategory; its products cascade in the storage engine.
    #[instrument(skip(self))]
    pub async fn delete_subcategory(&self, subcategory_id: Uuid) -> Result<(), ServiceError> {
        let existing = self.get_subcategory(subcategory_id).await?;
        let active: subcategory::ActiveModel = existing.into();
        active.delete(&*self.db).await?;
        info!("Deleted subcategory {}", subcategory_id);
        Ok(())
    }

    // ---- products ----

    #[instrument(skip(self))]
    pub async fn create_product(
        &self,
        input: CreateProductInput,
    ) -> Result<product::Model, ServiceError> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(ServiceError::ValidationError(
                "product name cannot be blank".to_string(),
            ));
        }
        self.ensure_category_exists(input.category_id).await?;
        self.ensure_subcategory_exists(input.subcategory_id).await?;

        let slug = slug::resolve_slug(input.slug.as_deref(), &name);
        if slug.is_empty() {
            return Err(ServiceError::ValidationError(format!(
                "no slug can be derived from product name '{}'",
                name
            )));
        }
        self.ensure_unique_product_slug(&slug, None).await?;

        let created = product::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            slug: Set(slug),
            category_id: Set(input.category_id),
            subcategory_id: Set(input.subcategory_id),
            price: Set(input.price),
            discount_price: Set(input.discount_price),
            size: Set(input.size.into()),
            fit: Set(input.fit),
            colors: Set(input.colors.into()),
            badge: Set(input.badge),
            image: Set(input.image),
            hover_image: Set(input.hover_image),
            in_stock: Set(input.in_stock),
            is_active: Set(input.is_active),
            created_at: Set(Utc::now()),
        }
        .insert(&*self.db)
        .await?;

        info!("Created product {}", created.id);
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        product_id: Uuid,
        input: UpdateProductInput,
    ) -> Result<product::Model, ServiceError> {
        let existing = self.get_product(product_id).await?;

        if let Some(category_id) = input.category_id {
            self.ensure_category_exists(category_id).await?;
        }
        if let Some(subcategory_id) = input.subcategory_id {
            self.ensure_subcategory_exists(subcategory_id).await?;
        }

        let mut active: product::ActiveModel = existing.clone().into();

        // A stored slug is never recomputed from a name change.
        if let Some(slug) = non_blank(input.slug) {
            if slug != existing.slug {
                self.ensure_unique_product_slug(&slug, Some(product_id))
                    .await?;
                active.slug = Set(slug);
            }
        }
        if let Some(name) = non_blank(input.name) {
            active.name = Set(name);
        }
        if let Some(category_id) = input.category_id {
            active.category_id = Set(category_id);
        }
        if let Some(subcategory_id) = input.subcategory_id {
            active.subcategory_id = Set(subcategory_id);
        }
        if let Some(price) = input.price {
            active.price = Set(price);
        }
        if let Some(discount_price) = input.discount_price {
            active.discount_price = Set(Some(discount_price));
        }
        if let Some(size) = input.size {
            active.size = Set(size.into());
        }
        if let Some(fit) = input.fit {
            active.fit = Set(Some(fit));
        }
        if let Some(colors) = input.colors {
            active.colors = Set(colors.into());
        }
        if let Some(badge) = input.badge {
            active.badge = Set(Some(badge));
        }
        if let Some(image) = input.image {
            active.image = Set(Some(image));
        }
        if let Some(hover_image) = input.hover_image {
            active.hover_image = Set(Some(hover_image));
        }
        if let Some(in_stock) = input.in_stock {
            active.in_stock = Set(in_stock);
        }
        if let Some(is_active) = input.is_active {
            active.is_active = Set(is_active);
        }
        // created_at stays whatever insert wrote.

        if !active.is_changed() {
            return Ok(existing);
        }
        let updated = active.update(&*self.db).await?;
        info!("Updated product {}", product_id);
        Ok(updated)
    }

    /// Administrative fetch by id, active or not.
    pub async fn get_product(&self, product_id: Uuid) -> Result<product::Model, ServiceError> {
        Product::find_by_id(product_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("product {} not found", product_id)))
    }

    /// Administrative listing: newest first, inactive rows included.
    pub async fn list_products(&self, limit: u64, offset: u64) -> Result<ProductPage, ServiceError> {
        let query = Product::find();
        let total = query.clone().count(&*self.db).await?;
        let products = query
            .order_by_desc(product::Column::CreatedAt)
            .limit(limit)
            .offset(offset)
            .all(&*self.db)
            .await?;
        Ok(ProductPage { products, total })
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, product_id: Uuid) -> Result<(), ServiceError> {
        let existing = self.get_product(product_id).await?;
        let active: product::ActiveModel = existing.into();
        active.delete(&*self.db).await?;
        info!("Deleted product {}", product_id);
        Ok(())
    }

    // ---- invariant checks ----

    async fn ensure_unique_category_slug(
        &self,
        slug: &str,
        exclude: Option<Uuid>,
    ) -> Result<(), ServiceError> {
        let mut query = Category::find().filter(category::Column::Slug.eq(slug));
        if let Some(id) = exclude {
            query = query.filter(category::Column::Id.ne(id));
        }
        if query.count(&*self.db).await? > 0 {
            return Err(ServiceError::UniquenessViolation(format!(
                "category slug '{}' is already in use",
                slug
            )));
        }
        Ok(())
    }

    async fn ensure_unique_subcategory_slug(
        &self,
        category_id: Uuid,
        slug: &str,
        exclude: Option<Uuid>,
    ) -> Result<(), ServiceError> {
        let mut query = SubCategory::find()
            .filter(subcategory::Column::CategoryId.eq(category_id))
            .filter(subcategory::Column::Slug.eq(slug));
        if let Some(id) = exclude {
            query = query.filter(subcategory::Column::Id.ne(id));
        }
        if query.count(&*self.db).await? > 0 {
            return Err(ServiceError::UniquenessViolation(format!(
                "subcategory slug '{}' is already in use within its category",
                slug
            )));
        }
        Ok(())
    }

    async fn ensure_unique_product_slug(
        &self,
        slug: &str,
        exclude: Option<Uuid>,
    ) -> Result<(), ServiceError> {
        let mut query = Product::find().filter(product::Column::Slug.eq(slug));
        if let Some(id) = exclude {
            query = query.filter(product::Column::Id.ne(id));
        }
        if query.count(&*self.db).await? > 0 {
            return Err(ServiceError::UniquenessViolation(format!(
                "product slug '{}' is already in use",
                slug
            )));
        }
        Ok(())
    }

    async fn ensure_category_exists(&self, category_id: Uuid) -> Result<(), ServiceError> {
        let found = Category::find_by_id(category_id).count(&*self.db).await?;
        if found == 0 {
            return Err(ServiceError::ReferentialIntegrityViolation(format!(
                "category {} does not exist",
                category_id
            )));
        }
        Ok(())
    }

    async fn ensure_subcategory_exists(&self, subcategory_id: Uuid) -> Result<(), ServiceError> {
        let found = SubCategory::find_by_id(subcategory_id)
            .count(&*self.db)
            .await?;
        if found == 0 {
            return Err(ServiceError::ReferentialIntegrityViolation(format!(
                "subcategory {} does not exist",
                subcategory_id
            )));
        }
        Ok(())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
