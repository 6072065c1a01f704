use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Catalog product. `slug` is globally unique; `is_active` soft-deletes the
/// record from storefront queries while keeping it editable.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub category_id: Uuid,
    pub subcategory_id: Uuid,
    pub price: Decimal,
    pub discount_price: Option<Decimal>,
    /// Ordered size labels, e.g. `["S", "M", "L"]`.
    #[sea_orm(column_type = "Json")]
    pub size: LabelList,
    pub fit: Option<String>,
    /// Ordered color labels, e.g. `["Black", "White"]`.
    #[sea_orm(column_type = "Json")]
    pub colors: LabelList,
    pub badge: Option<Badge>,
    /// Relative media path of the primary image.
    pub image: Option<String>,
    /// Relative media path of the hover/secondary image.
    pub hover_image: Option<String>,
    pub in_stock: bool,
    pub is_active: bool,
    /// Set once at insert, never updated.
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_delete = "Cascade"
    )]
    Category,
    #[sea_orm(
        belongs_to = "super::subcategory::Entity",
        from = "Column::SubcategoryId",
        to = "super::subcategory::Column::Id",
        on_delete = "Cascade"
    )]
    Subcategory,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::subcategory::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subcategory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Promotional badge shown on product tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "UPPERCASE")]
pub enum Badge {
    #[sea_orm(string_value = "NEW")]
    New,
    #[sea_orm(string_value = "SALE")]
    Sale,
}

/// JSON-backed list of facet labels (sizes, colors).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct LabelList(pub Vec<String>);

impl From<Vec<String>> for LabelList {
    fn from(labels: Vec<String>) -> Self {
        LabelList(labels)
    }
}
