mod common;

use catalog_api::entities::{Product, SubCategory};
use catalog_api::errors::ServiceError;
use catalog_api::services::{
    CreateCategoryInput, CreateSubCategoryInput, UpdateCategoryInput, UpdateProductInput,
};
use common::{product_input, TestApp};
use rust_decimal_macros::dec;
use sea_orm::{EntityTrait, PaginatorTrait};
use uuid::Uuid;

#[tokio::test]
async fn derives_slug_from_name_when_absent() {
    let app = TestApp::new().await;

    let category = app
        .state
        .services
        .catalog
        .create_category(CreateCategoryInput {
            name: "Summer Sale!".to_string(),
            slug: None,
        })
        .await
        .unwrap();

    assert_eq!(category.slug, "summer-sale");
}

#[tokio::test]
async fn explicit_slug_wins_and_survives_rename() {
    let app = TestApp::new().await;

    let category = app
        .state
        .services
        .catalog
        .create_category(CreateCategoryInput {
            name: "Men".to_string(),
            slug: Some("mens-wear".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(category.slug, "mens-wear");

    // Renaming never recomputes a stored slug.
    let renamed = app
        .state
        .services
        .catalog
        .update_category(
            category.id,
            UpdateCategoryInput {
                name: Some("Menswear".to_string()),
                slug: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "Menswear");
    assert_eq!(renamed.slug, "mens-wear");

    // An explicitly supplied slug still replaces the old one.
    let reslugged = app
        .state
        .services
        .catalog
        .update_category(
            category.id,
            UpdateCategoryInput {
                name: None,
                slug: Some("gents".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(reslugged.slug, "gents");
}

#[tokio::test]
async fn duplicate_category_slug_is_rejected() {
    let app = TestApp::new().await;
    app.seed_category("Men").await;

    let result = app
        .state
        .services
        .catalog
        .create_category(CreateCategoryInput {
            name: "Menswear".to_string(),
            slug: Some("men".to_string()),
        })
        .await;

    assert!(matches!(result, Err(ServiceError::UniquenessViolation(_))));
}

#[tokio::test]
async fn subcategory_slugs_are_scoped_to_their_category() {
    let app = TestApp::new().await;
    let men = app.seed_category("Men").await;
    let women = app.seed_category("Women").await;

    app.seed_subcategory(men.id, "Shirts").await;

    // Same (category, slug) pair fails.
    let duplicate = app
        .state
        .services
        .catalog
        .create_subcategory(CreateSubCategoryInput {
            category_id: men.id,
            name: "Shirts Again".to_string(),
            slug: Some("shirts".to_string()),
        })
        .await;
    assert!(matches!(
        duplicate,
        Err(ServiceError::UniquenessViolation(_))
    ));

    // Same slug under a different category succeeds.
    let elsewhere = app
        .state
        .services
        .catalog
        .create_subcategory(CreateSubCategoryInput {
            category_id: women.id,
            name: "Shirts".to_string(),
            slug: None,
        })
        .await
        .unwrap();
    assert_eq!(elsewhere.slug, "shirts");
}

#[tokio::test]
async fn duplicate_product_slug_is_rejected() {
    let app = TestApp::new().await;
    let men = app.seed_category("Men").await;
    let shirts = app.seed_subcategory(men.id, "Shirts").await;

    app.seed_product(product_input(men.id, shirts.id, "Classic Tee", dec!(29.99)))
        .await;

    let mut clone = product_input(men.id, shirts.id, "Classic Tee Reissue", dec!(34.99));
    clone.slug = Some("classic-tee".to_string());
    let result = app.state.services.catalog.create_product(clone).await;

    assert!(matches!(result, Err(ServiceError::UniquenessViolation(_))));
}

#[tokio::test]
async fn product_write_requires_existing_parents() {
    let app = TestApp::new().await;
    let men = app.seed_category("Men").await;
    let shirts = app.seed_subcategory(men.id, "Shirts").await;

    let dangling_category = app
        .state
        .services
        .catalog
        .create_product(product_input(
            Uuid::new_v4(),
            shirts.id,
            "Orphan Tee",
            dec!(19.99),
        ))
        .await;
    assert!(matches!(
        dangling_category,
        Err(ServiceError::ReferentialIntegrityViolation(_))
    ));

    let dangling_subcategory = app
        .state
        .services
        .catalog
        .create_product(product_input(
            men.id,
            Uuid::new_v4(),
            "Orphan Tee",
            dec!(19.99),
        ))
        .await;
    assert!(matches!(
        dangling_subcategory,
        Err(ServiceError::ReferentialIntegrityViolation(_))
    ));

    let dangling_parent = app
        .state
        .services
        .catalog
        .create_subcategory(CreateSubCategoryInput {
            category_id: Uuid::new_v4(),
            name: "Nowhere".to_string(),
            slug: None,
        })
        .await;
    assert!(matches!(
        dangling_parent,
        Err(ServiceError::ReferentialIntegrityViolation(_))
    ));
}

#[tokio::test]
async fn deleting_a_category_cascades_to_subcategories_and_products() {
    let app = TestApp::new().await;
    let men = app.seed_category("Men").await;
    let shirts = app.seed_subcategory(men.id, "Shirts").await;
    app.seed_product(product_input(men.id, shirts.id, "Classic Tee", dec!(29.99)))
        .await;

    app.state
        .services
        .catalog
        .delete_category(men.id)
        .await
        .unwrap();

    let lookup = app
        .state
        .services
        .storefront
        .get_product_by_slug("classic-tee")
        .await;
    assert!(matches!(lookup, Err(ServiceError::NotFound(_))));

    assert_eq!(SubCategory::find().count(&*app.state.db).await.unwrap(), 0);
    assert_eq!(Product::find().count(&*app.state.db).await.unwrap(), 0);
}

#[tokio::test]
async fn deleting_a_subcategory_cascades_to_its_products_only() {
    let app = TestApp::new().await;
    let men = app.seed_category("Men").await;
    let shirts = app.seed_subcategory(men.id, "Shirts").await;
    let pants = app.seed_subcategory(men.id, "Pants").await;
    app.seed_product(product_input(men.id, shirts.id, "Classic Tee", dec!(29.99)))
        .await;
    app.seed_product(product_input(men.id, pants.id, "Chinos", dec!(49.99)))
        .await;

    app.state
        .services
        .catalog
        .delete_subcategory(shirts.id)
        .await
        .unwrap();

    // The sibling subcategory and its product are untouched.
    assert_eq!(SubCategory::find().count(&*app.state.db).await.unwrap(), 1);
    assert_eq!(Product::find().count(&*app.state.db).await.unwrap(), 1);
    let survivor = app
        .state
        .services
        .storefront
        .get_product_by_slug("chinos")
        .await
        .unwrap();
    assert_eq!(survivor.product.name, "Chinos");
}

#[tokio::test]
async fn update_preserves_created_at_and_untouched_fields() {
    let app = TestApp::new().await;
    let men = app.seed_category("Men").await;
    let shirts = app.seed_subcategory(men.id, "Shirts").await;
    let product = app
        .seed_product(product_input(men.id, shirts.id, "Classic Tee", dec!(29.99)))
        .await;

    let updated = app
        .state
        .services
        .catalog
        .update_product(
            product.id,
            UpdateProductInput {
                price: Some(dec!(24.99)),
                discount_price: Some(dec!(19.99)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.price, dec!(24.99));
    assert_eq!(updated.discount_price, Some(dec!(19.99)));
    assert_eq!(updated.created_at, product.created_at);
    assert_eq!(updated.slug, "classic-tee");
    assert_eq!(updated.name, "Classic Tee");
}

#[tokio::test]
async fn blank_input_slug_falls_back_to_derivation() {
    let app = TestApp::new().await;

    let category = app
        .state
        .services
        .catalog
        .create_category(CreateCategoryInput {
            name: "New Arrivals".to_string(),
            slug: Some("   ".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(category.slug, "new-arrivals");
}

#[tokio::test]
async fn unsluggable_name_is_a_validation_error() {
    let app = TestApp::new().await;

    let result = app
        .state
        .services
        .catalog
        .create_category(CreateCategoryInput {
            name: "!!!".to_string(),
            slug: None,
        })
        .await;

    assert!(matches!(result, Err(ServiceError::ValidationError(_))));
}
