//! Read path for the storefront: active-only product queries with optional
//! case-insensitive category/subcategory slug selectors.

use crate::entities::{category, product, subcategory, Category, Product, SubCategory};
use crate::errors::ServiceError;
use sea_orm::sea_query::{Expr, Func, IntoColumnRef, SimpleExpr};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter, QuerySelect, RelationTrait,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

/// Optional storefront selectors. Slugs are matched case-insensitively; both
/// present means both must match.
#[derive(Debug, Clone, Default)]
pub struct ProductFilters {
    pub category: Option<String>,
    pub subcategory: Option<String>,
}

/// A product together with its parents' display names, ready for
/// presentation without further queries.
#[derive(Debug, Clone)]
pub struct CatalogProduct {
    pub product: product::Model,
    pub category_name: String,
    pub subcategory_name: String,
}

#[derive(Clone)]
pub struct StorefrontService {
    db: Arc<DatabaseConnection>,
}

impl StorefrontService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Active products matching the given selectors, in storage order.
    /// Unmatched selectors yield an empty list, never an error.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        filters: &ProductFilters,
    ) -> Result<Vec<CatalogProduct>, ServiceError> {
        let mut query = Product::find().filter(product::Column::IsActive.eq(true));

        if let Some(slug) = filters.category.as_deref() {
            query = query
                .join(JoinType::InnerJoin, product::Relation::Category.def())
                .filter(slug_matches(
                    (category::Entity, category::Column::Slug),
                    slug,
                ));
        }
        if let Some(slug) = filters.subcategory.as_deref() {
            query = query
                .join(JoinType::InnerJoin, product::Relation::Subcategory.def())
                .filter(slug_matches(
                    (subcategory::Entity, subcategory::Column::Slug),
                    slug,
                ));
        }

        let products = query.all(&*self.db).await?;
        self.attach_parent_names(products).await
    }

    /// The unique active product with exactly this slug. An inactive product
    /// is indistinguishable from a nonexistent one.
    #[instrument(skip(self))]
    pub async fn get_product_by_slug(&self, slug: &str) -> Result<CatalogProduct, ServiceError> {
        let product = Product::find()
            .filter(product::Column::Slug.eq(slug))
            .filter(product::Column::IsActive.eq(true))
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("product '{}' not found", slug)))?;

        let category = Category::find_by_id(product.category_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::ReferentialIntegrityViolation(format!(
                    "product '{}' references a missing category",
                    slug
                ))
            })?;
        let subcategory = SubCategory::find_by_id(product.subcategory_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::ReferentialIntegrityViolation(format!(
                    "product '{}' references a missing subcategory",
                    slug
                ))
            })?;

        Ok(CatalogProduct {
            product,
            category_name: category.name,
            subcategory_name: subcategory.name,
        })
    }

    /// Batch-resolve parent names for a listing.
    async fn attach_parent_names(
        &self,
        products: Vec<product::Model>,
    ) -> Result<Vec<CatalogProduct>, ServiceError> {
        if products.is_empty() {
            return Ok(Vec::new());
        }

        let category_ids: Vec<Uuid> = products.iter().map(|p| p.category_id).collect();
        let subcategory_ids: Vec<Uuid> = products.iter().map(|p| p.subcategory_id).collect();

        let category_names: HashMap<Uuid, String> = Category::find()
            .filter(category::Column::Id.is_in(category_ids))
            .all(&*self.db)
            .await?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();
        let subcategory_names: HashMap<Uuid, String> = SubCategory::find()
            .filter(subcategory::Column::Id.is_in(subcategory_ids))
            .all(&*self.db)
            .await?
            .into_iter()
            .map(|s| (s.id, s.name))
            .collect();

        products
            .into_iter()
            .map(|p| {
                let category_name = category_names.get(&p.category_id).cloned().ok_or_else(|| {
                    ServiceError::ReferentialIntegrityViolation(format!(
                        "product {} references a missing category",
                        p.id
                    ))
                })?;
                let subcategory_name = subcategory_names
                    .get(&p.subcategory_id)
                    .cloned()
                    .ok_or_else(|| {
                        ServiceError::ReferentialIntegrityViolation(format!(
                            "product {} references a missing subcategory",
                            p.id
                        ))
                    })?;
                Ok(CatalogProduct {
                    product: p,
                    category_name,
                    subcategory_name,
                })
            })
            .collect()
    }
}

/// `lower(column) = lower(value)`. Matching is case-insensitive but always
/// against the slug, never the display name.
fn slug_matches(column: impl IntoColumnRef, value: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column))).eq(value.to_lowercase())
}
