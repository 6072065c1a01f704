use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_categories_table::Categories;
use super::m20250301_000002_create_subcategories_table::SubCategories;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20250301_000003_create_products_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Products::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Products::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Products::Slug)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Products::CategoryId).uuid().not_null())
                    .col(ColumnDef::new(Products::SubcategoryId).uuid().not_null())
                    .col(
                        ColumnDef::new(Products::Price)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Products::DiscountPrice)
                            .decimal_len(10, 2)
                            .null(),
                    )
                    .col(ColumnDef::new(Products::Size).json().not_null())
                    .col(ColumnDef::new(Products::Fit).string_len(50).null())
                    .col(ColumnDef::new(Products::Colors).json().not_null())
                    .col(ColumnDef::new(Products::Badge).string_len(20).null())
                    .col(ColumnDef::new(Products::Image).string_len(1024).null())
                    .col(ColumnDef::new(Products::HoverImage).string_len(1024).null())
                    .col(
                        ColumnDef::new(Products::InStock)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Products::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Products::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_category")
                            .from(Products::Table, Products::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_subcategory")
                            .from(Products::Table, Products::SubcategoryId)
                            .to(SubCategories::Table, SubCategories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_is_active")
                    .table(Products::Table)
                    .col(Products::IsActive)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_category_id")
                    .table(Products::Table)
                    .col(Products::CategoryId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_subcategory_id")
                    .table(Products::Table)
                    .col(Products::SubcategoryId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Products {
    Table,
    Id,
    Name,
    Slug,
    CategoryId,
    SubcategoryId,
    Price,
    DiscountPrice,
    Size,
    Fit,
    Colors,
    Badge,
    Image,
    HoverImage,
    InStock,
    IsActive,
    CreatedAt,
}
