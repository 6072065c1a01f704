pub mod catalog;
pub mod storefront;

pub use catalog::{
    CatalogService, CreateCategoryInput, CreateProductInput, CreateSubCategoryInput, ProductPage,
    UpdateCategoryInput, UpdateProductInput, UpdateSubCategoryInput,
};
pub use storefront::{CatalogProduct, ProductFilters, StorefrontService};
