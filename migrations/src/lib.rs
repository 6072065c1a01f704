pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_categories_table;
mod m20250301_000002_create_subcategories_table;
mod m20250301_000003_create_products_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_categories_table::Migration),
            Box::new(m20250301_000002_create_subcategories_table::Migration),
            Box::new(m20250301_000003_create_products_table::Migration),
        ]
    }
}
