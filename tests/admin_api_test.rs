mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::{json, Value};

async fn create_category(app: &TestApp, body: Value) -> (StatusCode, Value) {
    app.post_json("/api/v1/admin/categories", body).await
}

#[tokio::test]
async fn create_category_derives_slug() {
    let app = TestApp::new().await;

    let (status, body) = create_category(&app, json!({"name": "Men"})).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Men");
    assert_eq!(body["slug"], "men");
    assert!(body["id"].is_string());
}

#[tokio::test]
async fn duplicate_category_slug_is_a_conflict() {
    let app = TestApp::new().await;
    create_category(&app, json!({"name": "Men"})).await;

    let (status, body) =
        create_category(&app, json!({"name": "Menswear", "slug": "men"})).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Conflict");
    assert!(body["request_id"].is_string());
}

#[tokio::test]
async fn blank_category_name_is_a_bad_request() {
    let app = TestApp::new().await;

    let (status, _) = create_category(&app, json!({"name": ""})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn subcategory_pair_uniqueness_is_enforced_over_http() {
    let app = TestApp::new().await;
    let (_, men) = create_category(&app, json!({"name": "Men"})).await;
    let (_, women) = create_category(&app, json!({"name": "Women"})).await;

    let (status, _) = app
        .post_json(
            "/api/v1/admin/subcategories",
            json!({"category_id": men["id"], "name": "Shirts"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app
        .post_json(
            "/api/v1/admin/subcategories",
            json!({"category_id": men["id"], "name": "Shirts"}),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Same slug under another category is fine.
    let (status, _) = app
        .post_json(
            "/api/v1/admin/subcategories",
            json!({"category_id": women["id"], "name": "Shirts"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn product_with_dangling_parents_is_unprocessable() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post_json(
            "/api/v1/admin/products",
            json!({
                "name": "Orphan Tee",
                "category_id": "4f4f4f4f-0000-0000-0000-000000000000",
                "subcategory_id": "4f4f4f4f-0000-0000-0000-000000000001",
                "price": "19.99"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Unprocessable Entity");
}

#[tokio::test]
async fn negative_price_is_rejected() {
    let app = TestApp::new().await;
    let (_, men) = create_category(&app, json!({"name": "Men"})).await;
    let (_, shirts) = app
        .post_json(
            "/api/v1/admin/subcategories",
            json!({"category_id": men["id"], "name": "Shirts"}),
        )
        .await;

    let (status, _) = app
        .post_json(
            "/api/v1/admin/products",
            json!({
                "name": "Classic Tee",
                "category_id": men["id"],
                "subcategory_id": shirts["id"],
                "price": "-1.00"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn product_crud_roundtrip() {
    let app = TestApp::new().await;
    let (_, men) = create_category(&app, json!({"name": "Men"})).await;
    let (_, shirts) = app
        .post_json(
            "/api/v1/admin/subcategories",
            json!({"category_id": men["id"], "name": "Shirts"}),
        )
        .await;

    // Create: slug derived, facets and badge stored, timestamps assigned.
    let (status, created) = app
        .post_json(
            "/api/v1/admin/products",
            json!({
                "name": "Classic Tee",
                "category_id": men["id"],
                "subcategory_id": shirts["id"],
                "price": "29.99",
                "discount_price": "24.99",
                "size": ["S", "M", "L"],
                "fit": "Regular",
                "colors": ["Black", "White"],
                "badge": "NEW",
                "image": "products/classic-tee.jpg"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["slug"], "classic-tee");
    assert_eq!(created["badge"], "NEW");
    assert_eq!(created["in_stock"], true);
    assert_eq!(created["is_active"], true);
    assert!(created["created_at"].is_string());
    // Admin payloads carry the raw media path, not a resolved URL.
    assert_eq!(created["image"], "products/classic-tee.jpg");

    let id = created["id"].as_str().unwrap().to_string();

    // Read back by id.
    let (status, fetched) = app.get(&format!("/api/v1/admin/products/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "Classic Tee");
    assert_eq!(fetched["discount_price"], "24.99");

    // Update price and visibility; slug and created_at stay put.
    let (status, updated) = app
        .put_json(
            &format!("/api/v1/admin/products/{}", id),
            json!({"price": "34.99", "is_active": false}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["price"], "34.99");
    assert_eq!(updated["is_active"], false);
    assert_eq!(updated["slug"], "classic-tee");
    assert_eq!(updated["created_at"], created["created_at"]);

    // Inactive products stay visible to the admin listing.
    let (status, listing) = app.get("/api/v1/admin/products").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing["pagination"]["total"], 1);
    assert_eq!(listing["data"][0]["is_active"], false);

    // ...but not to the storefront.
    let (status, _) = app.get("/api/v1/products/classic-tee").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Delete, then the record is gone for good.
    let (status, _) = app.delete(&format!("/api/v1/admin/products/{}", id)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.get(&format!("/api/v1/admin/products/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn category_delete_cascades_over_http() {
    let app = TestApp::new().await;
    let (_, men) = create_category(&app, json!({"name": "Men"})).await;
    let (_, shirts) = app
        .post_json(
            "/api/v1/admin/subcategories",
            json!({"category_id": men["id"], "name": "Shirts"}),
        )
        .await;
    app.post_json(
        "/api/v1/admin/products",
        json!({
            "name": "Classic Tee",
            "category_id": men["id"],
            "subcategory_id": shirts["id"],
            "price": "29.99"
        }),
    )
    .await;

    let category_id = men["id"].as_str().unwrap();
    let (status, _) = app
        .delete(&format!("/api/v1/admin/categories/{}", category_id))
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app
        .get(&format!(
            "/api/v1/admin/subcategories/{}",
            shirts["id"].as_str().unwrap()
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.get("/api/v1/products/classic-tee").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, listing) = app.get("/api/v1/admin/products").await;
    assert_eq!(listing["pagination"]["total"], 0);
}

#[tokio::test]
async fn admin_product_listing_paginates() {
    let app = TestApp::new().await;
    let (_, men) = create_category(&app, json!({"name": "Men"})).await;
    let (_, shirts) = app
        .post_json(
            "/api/v1/admin/subcategories",
            json!({"category_id": men["id"], "name": "Shirts"}),
        )
        .await;

    for n in 0..5 {
        let (status, _) = app
            .post_json(
                "/api/v1/admin/products",
                json!({
                    "name": format!("Tee {}", n),
                    "category_id": men["id"],
                    "subcategory_id": shirts["id"],
                    "price": "10.00"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, page) = app
        .get("/api/v1/admin/products?page=2&per_page=2")
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["pagination"]["total"], 5);
    assert_eq!(page["pagination"]["total_pages"], 3);
    assert_eq!(page["data"].as_array().unwrap().len(), 2);
}
