pub mod category;
pub mod product;
pub mod subcategory;

pub use category::{Entity as Category, Model as CategoryModel};
pub use product::{Badge, Entity as Product, LabelList, Model as ProductModel};
pub use subcategory::{Entity as SubCategory, Model as SubCategoryModel};
