//! Integration tests for Flightdeck.
//!
//! Tests drive the assembled storefront router in process with
//! `tower::ServiceExt::oneshot`; no network or external services are needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p flightdeck-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_listing` - Listing pages, URL state and filter actions
//! - `storefront_search` - Search page and recent searches
//! - `storefront_compare` - Compare list and its event stream
//! - `storefront_exit_popup` - Exit popup suppression

use std::path::PathBuf;
use std::time::Duration;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Method, Request, Response, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use flightdeck_storefront::catalog::{CatalogClient, CatalogSnapshot};
use flightdeck_storefront::config::{ListingSettings, StorefrontConfig};
use flightdeck_storefront::state::AppState;

/// Storefront configuration with every default and an in-memory catalog.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        host: std::net::IpAddr::from([127, 0, 0, 1]),
        port: 3000,
        base_url: "http://localhost:3000".to_string(),
        catalog_path: PathBuf::from("catalog.json"),
        listing: ListingSettings::default(),
        compare_max: 4,
        recent_searches_max: 5,
        exit_popup_suppress_days: 7,
        cache_ttl: Duration::from_secs(60),
        sentry_dsn: None,
        sentry_environment: None,
    }
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: u32,
    handle: &str,
    title: &str,
    product_type: &str,
    vendor: &str,
    price: &str,
    available: bool,
    rank: Option<u32>,
    created_at: &str,
) -> Value {
    json!({
        "id": format!("gid://shopify/Product/{id}"),
        "handle": handle,
        "title": title,
        "description": format!("{title} by {vendor}"),
        "product_type": product_type,
        "vendor": vendor,
        "tags": [],
        "available_for_sale": available,
        "created_at": created_at,
        "sales_rank": rank,
        "price_range": {
            "min_variant_price": {"amount": price, "currency_code": "USD"},
            "max_variant_price": {"amount": price, "currency_code": "USD"}
        },
        "featured_image": {
            "url": format!("https://cdn.example.com/{handle}.jpg"),
            "alt_text": title
        }
    })
}

/// A small catalog of flight gear.
///
/// | id   | handle              | type           | vendor           | price | in stock |
/// |------|---------------------|----------------|------------------|-------|----------|
/// | 1001 | alpha-flight-suit   | Flight Suits   | Alpha Industries | 240   | yes      |
/// | 1002 | bravo-flight-suit   | Flight Suits   | Bravo Gear       | 180   | yes      |
/// | 1003 | alpha-flight-jacket | Flight Jackets | Alpha Industries | 320   | no       |
/// | 1004 | squadron-patch      | Patches & Pins | Bravo Gear       | 12    | yes      |
/// | 1005 | wings-pin           | Patches & Pins | Alpha Industries | 18    | yes      |
/// | 1006 | pilot-helmet        | Helmets        | Gentex           | 950   | yes      |
///
/// Collections: `flight-suits` (1001, 1002), `apparel` (1003, 1001, 1002),
/// `accessories` (1004, 1005, 1006).
///
/// # Panics
///
/// Panics if the fixture no longer matches the snapshot format.
#[must_use]
pub fn sample_catalog() -> CatalogSnapshot {
    #[rustfmt::skip]
    let products = [
        product(1001, "alpha-flight-suit", "Alpha Flight Suit", "Flight Suits", "Alpha Industries", "240.00", true, Some(2), "2024-03-01T00:00:00Z"),
        product(1002, "bravo-flight-suit", "Bravo Flight Suit", "Flight Suits", "Bravo Gear", "180.00", true, Some(1), "2024-05-01T00:00:00Z"),
        product(1003, "alpha-flight-jacket", "Alpha Flight Jacket", "Flight Jackets", "Alpha Industries", "320.00", false, Some(3), "2024-01-15T00:00:00Z"),
        product(1004, "squadron-patch", "Squadron Patch", "Patches & Pins", "Bravo Gear", "12.00", true, Some(4), "2024-06-01T00:00:00Z"),
        product(1005, "wings-pin", "Wings Pin", "Patches & Pins", "Alpha Industries", "18.00", true, None, "2023-11-01T00:00:00Z"),
        product(1006, "pilot-helmet", "Pilot Helmet", "Helmets", "Gentex", "950.00", true, Some(5), "2024-02-01T00:00:00Z"),
    ];

    let snapshot = json!({
        "products": products,
        "collections": [
            {
                "id": "gid://shopify/Collection/1",
                "handle": "flight-suits",
                "title": "Flight Suits",
                "product_ids": ["gid://shopify/Product/1001", "gid://shopify/Product/1002"]
            },
            {
                "id": "gid://shopify/Collection/2",
                "handle": "apparel",
                "title": "Apparel",
                "product_ids": [
                    "gid://shopify/Product/1003",
                    "gid://shopify/Product/1001",
                    "gid://shopify/Product/1002"
                ]
            },
            {
                "id": "gid://shopify/Collection/3",
                "handle": "accessories",
                "title": "Accessories",
                "product_ids": [
                    "gid://shopify/Product/1004",
                    "gid://shopify/Product/1005",
                    "gid://shopify/Product/1006"
                ]
            }
        ]
    });
    serde_json::from_value(snapshot).expect("sample catalog matches the snapshot format")
}

/// A response with its body read.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    /// Parse the body as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the body is not JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is JSON")
    }

    /// A header value as a string.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// One visitor browsing the storefront.
///
/// Keeps the session cookie between requests like a browser would. Clones of
/// the router share the session store, so [`TestApp::visitor`] gives a second
/// visitor of the same running app.
#[derive(Clone)]
pub struct TestApp {
    router: Router,
    cookie: Option<String>,
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApp {
    /// App over the sample catalog with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    /// App with adjusted configuration.
    #[must_use]
    pub fn with_config(adjust: impl FnOnce(&mut StorefrontConfig)) -> Self {
        let mut config = test_config();
        adjust(&mut config);
        let catalog = CatalogClient::from_snapshot(sample_catalog(), config.cache_ttl);
        Self {
            router: flightdeck_storefront::app(AppState::new(config, catalog)),
            cookie: None,
        }
    }

    /// A new visitor without a session on the same app.
    #[must_use]
    pub fn visitor(&self) -> Self {
        Self {
            router: self.router.clone(),
            cookie: None,
        }
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post_json(&mut self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn post(&mut self, uri: &str) -> TestResponse {
        self.send(Method::POST, uri, None).await
    }

    pub async fn delete(&mut self, uri: &str) -> TestResponse {
        self.send(Method::DELETE, uri, None).await
    }

    /// Send a request and read the whole body.
    ///
    /// # Panics
    ///
    /// Panics if the router fails or the body cannot be read.
    pub async fn send(&mut self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let response = self.send_raw(method, uri, body).await;
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read response body");
        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Send a request and hand back the unread response (for streams).
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the router fails.
    pub async fn send_raw(
        &mut self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> Response<Body> {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            request = request.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(json) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => request.body(Body::empty()),
        }
        .expect("build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        if let Some(set_cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            && let Some(pair) = set_cookie.split(';').next()
        {
            self.cookie = Some(pair.to_string());
        }

        response
    }
}
