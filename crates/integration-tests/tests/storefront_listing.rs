//! Integration tests for storefront listing pages.
//!
//! These tests verify that listing URLs decode into the expected state, that
//! filter actions produce canonical replacement URLs, and that the catalog
//! evaluates the state as the page describes it.

use axum::http::StatusCode;
use serde_json::{Value, json};

use flightdeck_core::listing::PricePolicy;
use flightdeck_integration_tests::TestApp;

fn handles(page: &Value) -> Vec<&str> {
    page["products"]
        .as_array()
        .expect("products array")
        .iter()
        .map(|p| p["handle"].as_str().expect("handle"))
        .collect()
}

fn chip_ids(page: &Value) -> Vec<&str> {
    page["chips"]
        .as_array()
        .expect("chips array")
        .iter()
        .map(|c| c["id"].as_str().expect("chip id"))
        .collect()
}

// =============================================================================
// Basics
// =============================================================================

#[tokio::test]
async fn test_health() {
    let mut app = TestApp::new();
    let response = app.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(&response.body[..], b"ok");
    assert!(response.header("x-request-id").is_some());
}

#[tokio::test]
async fn test_collections_index() {
    let mut app = TestApp::new();
    let body = app.get("/collections").await.json();

    let collections = body.as_array().expect("collections array");
    assert_eq!(collections.len(), 3);
    assert_eq!(collections[0]["handle"], "flight-suits");
    assert_eq!(collections[0]["products_count"], 2);
}

#[tokio::test]
async fn test_collection_defaults() {
    let mut app = TestApp::new();
    let response = app.get("/collections/flight-suits").await;
    assert_eq!(response.status, StatusCode::OK);

    let page = response.json();
    assert_eq!(page["title"], "Flight Suits");
    assert_eq!(page["url"], "/collections/flight-suits");
    assert_eq!(page["columns"], 4);
    assert_eq!(page["state"]["sort"], "featured");
    assert!(chip_ids(&page).is_empty());
    assert_eq!(handles(&page), ["alpha-flight-suit", "bravo-flight-suit"]);

    let options = page["sort_options"].as_array().expect("sort options");
    assert_eq!(options.len(), 8);
    assert!(options.iter().all(|o| o["value"] != "relevance"));
    let selected: Vec<&Value> = options.iter().filter(|o| o["selected"] == true).collect();
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0]["value"], "featured");
}

#[tokio::test]
async fn test_unknown_collection_is_not_found() {
    let mut app = TestApp::new();
    assert_eq!(
        app.get("/collections/nope").await.status,
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        app.post_json("/collections/nope", json!({"action": "clear_all"}))
            .await
            .status,
        StatusCode::NOT_FOUND
    );
}

// =============================================================================
// Decoding
// =============================================================================

#[tokio::test]
async fn test_flight_suits_scenario() {
    let mut app = TestApp::new();
    let page = app
        .get("/collections/apparel?type=Flight+Suits&type=Flight+Jackets&available=true")
        .await
        .json();

    assert_eq!(
        page["state"]["filters"],
        json!({
            "price": {"min": 0, "max": 500},
            "type": ["Flight Suits", "Flight Jackets"],
            "vendor": [],
            "available": true
        })
    );
    assert_eq!(page["state"]["sort"], "featured");
    assert_eq!(
        chip_ids(&page),
        ["type:Flight Suits", "type:Flight Jackets", "available:true"]
    );
    assert_eq!(page["chips"][2]["label"], "In Stock Only");
    // The jacket is out of stock.
    assert_eq!(handles(&page), ["alpha-flight-suit", "bravo-flight-suit"]);
    assert_eq!(page["facets"]["total"], 3);

    let response = app
        .post_json(
            "/collections/apparel?type=Flight+Suits&type=Flight+Jackets&available=true",
            json!({"action": "remove_chip", "id": "type:Flight Suits"}),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.header("hx-replace-url"),
        Some("/collections/apparel?type=Flight+Jackets&available=true")
    );
    let page = response.json();
    assert_eq!(chip_ids(&page), ["type:Flight Jackets", "available:true"]);
    assert!(handles(&page).is_empty());
}

#[tokio::test]
async fn test_price_range_and_sort() {
    let mut app = TestApp::new();
    let page = app
        .get("/products?priceMin=100&priceMax=400&sort=price-asc")
        .await
        .json();

    assert_eq!(
        handles(&page),
        ["bravo-flight-suit", "alpha-flight-suit", "alpha-flight-jacket"]
    );
    assert_eq!(page["chips"], json!([{"id": "price:range", "label": "$100 - $400"}]));
    assert_eq!(page["url"], "/products?priceMin=100&priceMax=400&sort=price-asc");
}

#[tokio::test]
async fn test_inverted_out_of_range_price_is_clamped() {
    let mut app = TestApp::new();
    let page = app.get("/products?priceMin=600&priceMax=-5").await.json();
    assert_eq!(page["state"]["filters"]["price"], json!({"min": 0, "max": 500}));
    assert_eq!(page["url"], "/products");

    let page = app.get("/products?priceMin=50&priceMax=900").await.json();
    assert_eq!(page["url"], "/products?priceMin=50&priceMax=500");
}

#[tokio::test]
async fn test_reject_policy_falls_back_to_full_range() {
    let mut app = TestApp::with_config(|config| {
        config.listing.price_policy = PricePolicy::Reject;
    });
    let page = app.get("/products?priceMin=50&priceMax=900").await.json();
    assert_eq!(page["state"]["filters"]["price"], json!({"min": 0, "max": 500}));
    assert_eq!(page["url"], "/products");
}

#[tokio::test]
async fn test_disallowed_sort_falls_back_to_default() {
    let mut app = TestApp::new();
    let page = app.get("/products?sort=relevance").await.json();
    assert_eq!(page["state"]["sort"], "featured");
    assert_eq!(page["url"], "/products");
}

#[tokio::test]
async fn test_featured_all_products_is_best_selling() {
    let mut app = TestApp::new();
    let page = app.get("/products").await.json();
    assert_eq!(
        handles(&page),
        [
            "bravo-flight-suit",
            "alpha-flight-suit",
            "alpha-flight-jacket",
            "squadron-patch",
            "pilot-helmet",
            "wings-pin"
        ]
    );
}

#[tokio::test]
async fn test_url_is_canonical() {
    let mut app = TestApp::new();
    let page = app
        .get("/products?view=3&vendor=Gentex&type=Helmets&sort=featured")
        .await
        .json();
    assert_eq!(page["url"], "/products?type=Helmets&vendor=Gentex&view=3");
    assert_eq!(page["columns"], 3);
    assert_eq!(handles(&page), ["pilot-helmet"]);
}

// =============================================================================
// Actions
// =============================================================================

#[tokio::test]
async fn test_toggle_twice_restores_url() {
    let mut app = TestApp::new();
    let action = json!({"action": "toggle_value", "kind": "type", "value": "Patches & Pins"});

    let response = app.post_json("/products", action.clone()).await;
    let url = response
        .header("hx-replace-url")
        .expect("replace url")
        .to_string();
    assert_eq!(url, "/products?type=Patches+%26+Pins");
    assert_eq!(
        handles(&response.json()),
        ["squadron-patch", "wings-pin"]
    );

    let response = app.post_json(&url, action).await;
    assert_eq!(response.header("hx-replace-url"), Some("/products"));
}

#[tokio::test]
async fn test_clear_all_keeps_view() {
    let mut app = TestApp::new();
    let response = app
        .post_json(
            "/collections/apparel?type=Flight+Jackets&available=true&sort=price-desc&view=2",
            json!({"action": "clear_all"}),
        )
        .await;

    assert_eq!(
        response.header("hx-replace-url"),
        Some("/collections/apparel?view=2")
    );
    let page = response.json();
    assert_eq!(page["state"]["sort"], "featured");
    assert_eq!(page["columns"], 2);
    assert!(chip_ids(&page).is_empty());
}

#[tokio::test]
async fn test_set_view_ignores_unknown_columns() {
    let mut app = TestApp::new();
    let response = app
        .post_json("/products", json!({"action": "set_view", "columns": 2}))
        .await;
    assert_eq!(response.header("hx-replace-url"), Some("/products?view=2"));
    assert_eq!(response.json()["columns"], 2);

    let response = app
        .post_json("/products", json!({"action": "set_view", "columns": 5}))
        .await;
    assert_eq!(response.header("hx-replace-url"), Some("/products"));
}

#[tokio::test]
async fn test_set_sort_respects_context() {
    let mut app = TestApp::new();
    let response = app
        .post_json(
            "/products",
            json!({"action": "set_sort", "sort": "created-desc"}),
        )
        .await;
    assert_eq!(
        response.header("hx-replace-url"),
        Some("/products?sort=created-desc")
    );
    assert_eq!(handles(&response.json())[0], "squadron-patch");

    let response = app
        .post_json("/products", json!({"action": "set_sort", "sort": "relevance"}))
        .await;
    assert_eq!(response.header("hx-replace-url"), Some("/products"));
}

#[tokio::test]
async fn test_price_action_matches_reloaded_url() {
    let mut app = TestApp::new();
    let response = app
        .post_json(
            "/products",
            json!({"action": "set_price_range", "min": 300, "max": 100}),
        )
        .await;
    let url = response
        .header("hx-replace-url")
        .expect("replace url")
        .to_string();
    assert_eq!(url, "/products?priceMin=100&priceMax=300");

    let posted = response.json();
    assert_eq!(posted["state"]["filters"]["price"], json!({"min": 100, "max": 300}));
    assert_eq!(handles(&posted), ["bravo-flight-suit", "alpha-flight-suit"]);

    let reloaded = app.get(&url).await.json();
    assert_eq!(reloaded["state"], posted["state"]);
    assert_eq!(reloaded["chips"], posted["chips"]);
    assert_eq!(reloaded["products"], posted["products"]);
}

#[tokio::test]
async fn test_out_of_bounds_price_action_is_clamped() {
    let mut app = TestApp::new();
    let response = app
        .post_json(
            "/products",
            json!({"action": "set_price_range", "min": -20, "max": 900}),
        )
        .await;
    assert_eq!(response.header("hx-replace-url"), Some("/products"));
    assert!(chip_ids(&response.json()).is_empty());
}

#[tokio::test]
async fn test_empty_toggle_value_is_ignored() {
    let mut app = TestApp::new();
    let response = app
        .post_json(
            "/products",
            json!({"action": "toggle_value", "kind": "type", "value": ""}),
        )
        .await;
    assert_eq!(response.header("hx-replace-url"), Some("/products"));
    assert!(chip_ids(&response.json()).is_empty());
}

#[tokio::test]
async fn test_malformed_action_is_rejected() {
    let mut app = TestApp::new();
    let response = app
        .post_json("/products", json!({"action": "explode"}))
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}

// =============================================================================
// Product Detail
// =============================================================================

#[tokio::test]
async fn test_product_detail() {
    let mut app = TestApp::new();
    let response = app.get("/products/wings-pin").await;
    assert_eq!(response.status, StatusCode::OK);

    let body = response.json();
    assert_eq!(body["product"]["title"], "Wings Pin");
    assert_eq!(body["in_compare"], false);

    assert_eq!(
        app.get("/products/nope").await.status,
        StatusCode::NOT_FOUND
    );
}
