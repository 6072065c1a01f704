use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_categories_table::Categories;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20250301_000002_create_subcategories_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SubCategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SubCategories::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SubCategories::CategoryId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubCategories::Name)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubCategories::Slug)
                            .string_len(100)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subcategories_category")
                            .from(SubCategories::Table, SubCategories::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Slugs are unique per category, not globally.
        manager
            .create_index(
                Index::create()
                    .name("idx_subcategories_category_slug")
                    .table(SubCategories::Table)
                    .col(SubCategories::CategoryId)
                    .col(SubCategories::Slug)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SubCategories::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum SubCategories {
    #[sea_orm(iden = "subcategories")]
    Table,
    Id,
    CategoryId,
    Name,
    Slug,
}
