//! Integration tests for the aggregator and the fetch-insights pipeline.
//!
//! Uses `wiremock` to stand up a local storefront per test, so no real
//! network traffic is made. Covers the hard-failure contract (base page
//! unreachable), the partial-success contract (everything missing is still
//! a success), canonical-URL identity, catalog capping, pagination, and
//! sink idempotency.

use serde_json::{json, Value};
use shopsight_core::{AppConfig, Category, CategoryStatus, Platform};
use shopsight_scraper::{fetch_insights, Aggregator, FetchError, MemorySink};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config() -> AppConfig {
    AppConfig {
        log_level: "info".to_owned(),
        request_timeout_secs: 5,
        max_retries: 0,
        backoff_base_ms: 0,
        user_agent: "shopsight-test/0.1".to_owned(),
        category_timeout_secs: 5,
        catalog_max_products: 500,
        products_page_size: 250,
        inter_request_delay_ms: 0,
        search_max_candidates: 40,
        competitor_max_count: 5,
    }
}

fn aggregator() -> Aggregator {
    Aggregator::new(test_config()).expect("failed to build aggregator")
}

fn aggregator_with(config: AppConfig) -> Aggregator {
    Aggregator::new(config).expect("failed to build aggregator")
}

/// Minimal listing-endpoint product fixture.
fn listing_product(id: i64, handle: &str) -> Value {
    json!({
        "id": id,
        "title": format!("Product {id}"),
        "handle": handle,
        "vendor": "Fizzworks",
        "images": [{"src": format!("https://cdn.example.com/{handle}.jpg")}],
        "variants": [{
            "id": id * 10,
            "price": "24.00",
            "available": true,
            "position": 1
        }]
    })
}

/// A homepage exercising every homepage-driven extractor.
fn full_homepage() -> String {
    r#"<html>
      <head><meta name="description" content="Small-batch botanical sodas."></head>
      <body>
        <section class="featured-collection">
          <a href="/products/hibiscus-cooler">Hibiscus Cooler
            <img src="/cdn/hibiscus.jpg" alt="Hibiscus Cooler"></a>
        </section>
        <footer>
          <a href="https://www.instagram.com/fizzworks/">Instagram</a>
          <a href="https://x.com/fizzworks">X</a>
          <a href="/pages/faq">FAQ</a>
          <a href="/pages/contact">Contact us</a>
          <a href="mailto:hello@fizzworks.com">hello@fizzworks.com</a>
        </footer>
      </body>
    </html>"#
        .to_owned()
}

fn long_policy(marker: &str) -> String {
    format!("<main><p>{marker} {}</p></main>", "policy text ".repeat(30))
}

// ---------------------------------------------------------------------------
// Hard failure: base page unreachable
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unreachable_base_is_a_hard_error_with_no_sink_write() {
    let agg = aggregator();
    let sink = MemorySink::new();
    let cancel = CancellationToken::new();

    // Nothing listens on port 1.
    let result = fetch_insights(&agg, &sink, "http://127.0.0.1:1", &cancel).await;

    assert!(matches!(result, Err(FetchError::Unreachable { .. })));
    assert!(sink.is_empty(), "failed fetch must not write to the sink");
}

#[tokio::test]
async fn error_status_on_base_page_is_a_hard_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let agg = aggregator();
    let cancel = CancellationToken::new();
    let result = agg.aggregate(&server.uri(), &cancel).await;

    assert!(matches!(
        result,
        Err(FetchError::HttpStatus { status: 403, .. })
    ));
}

// ---------------------------------------------------------------------------
// Partial success: reachable store with nothing to extract
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bare_storefront_yields_context_with_all_categories_absent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html><body><p>hi</p></body></html>"),
        )
        .mount(&server)
        .await;
    // Every other path 404s (wiremock default).

    let agg = aggregator();
    let cancel = CancellationToken::new();
    let ctx = agg.aggregate(&server.uri(), &cancel).await.unwrap();

    assert_eq!(ctx.store_url, server.uri());
    assert_eq!(ctx.category_status.len(), Category::ALL.len());
    assert!(
        ctx.category_status
            .values()
            .all(|s| *s == CategoryStatus::NotFound),
        "expected every category absent, got: {:?}",
        ctx.category_status
    );
    assert!(ctx.product_catalog.is_empty());
    assert!(ctx.brand_text.is_none());
}

// ---------------------------------------------------------------------------
// Full store: every extractor finds its category
// ---------------------------------------------------------------------------

#[tokio::test]
async fn full_storefront_populates_every_category() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(full_homepage()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [
                listing_product(1, "hibiscus-cooler"),
                listing_product(2, "yerba-mate")
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/policies/privacy-policy"))
        .respond_with(ResponseTemplate::new(200).set_body_string(long_policy("We value privacy.")))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/policies/refund-policy"))
        .respond_with(ResponseTemplate::new(200).set_body_string(long_policy("Returns in 30 days.")))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/pages/faq"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<details><summary>Do you ship abroad?</summary><p>Yes, worldwide.</p></details>",
        ))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/pages/contact"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<main><p>Call +1 (555) 013-2447 or write support@fizzworks.com</p></main>",
        ))
        .mount(&server)
        .await;

    let agg = aggregator();
    let cancel = CancellationToken::new();
    let ctx = agg.aggregate(&server.uri(), &cancel).await.unwrap();

    assert!(
        ctx.category_status
            .values()
            .all(|s| *s == CategoryStatus::Found),
        "expected every category found, got: {:?}",
        ctx.category_status
    );

    assert_eq!(ctx.product_catalog.len(), 2);
    assert_eq!(ctx.product_catalog[0].id, "1");
    let price = ctx.product_catalog[0].price.as_ref().unwrap();
    assert_eq!(price.amount.to_string(), "24.00");
    assert_eq!(price.currency, "USD");
    assert_eq!(
        ctx.product_catalog[0].url.as_deref(),
        Some(format!("{}/products/hibiscus-cooler", server.uri()).as_str())
    );

    assert_eq!(ctx.hero_products.len(), 1);
    assert_eq!(ctx.hero_products[0].id, "hibiscus-cooler");

    assert!(ctx.privacy_policy.unwrap().contains("We value privacy."));
    assert!(ctx.return_policy.unwrap().contains("Returns in 30 days."));

    assert_eq!(ctx.faqs.len(), 1);
    assert_eq!(ctx.faqs[0].question, "Do you ship abroad?");

    assert_eq!(
        ctx.social_handles[&Platform::Instagram].handle.as_deref(),
        Some("fizzworks")
    );
    assert_eq!(
        ctx.social_handles[&Platform::Twitter].handle.as_deref(),
        Some("fizzworks")
    );

    assert!(ctx.contact_details.emails.contains("hello@fizzworks.com"));
    assert!(ctx.contact_details.emails.contains("support@fizzworks.com"));
    assert_eq!(ctx.contact_details.phones.len(), 1);

    assert_eq!(ctx.brand_text.as_deref(), Some("Small-batch botanical sodas."));

    assert!(ctx
        .important_links
        .iter()
        .any(|l| l.label == "Contact us"));
}

// ---------------------------------------------------------------------------
// Sitemap-suggested pages when fixed paths miss
// ---------------------------------------------------------------------------

#[tokio::test]
async fn sitemap_locates_policy_and_faq_pages_at_nonstandard_paths() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html><body><p>hi</p></body></html>"),
        )
        .mount(&server)
        .await;

    // The store mounts its policy and FAQ under names none of the fixed
    // probe paths cover; only the sitemap knows where they live.
    let sitemap = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
        <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
          <url><loc>{uri}/pages/privacy-notice</loc></url>
          <url><loc>{uri}/pages/shipping-faq</loc></url>
        </urlset>"#,
        uri = server.uri()
    );
    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sitemap))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/pages/privacy-notice"))
        .respond_with(ResponseTemplate::new(200).set_body_string(long_policy("We value privacy.")))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/pages/shipping-faq"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<details><summary>How fast is shipping?</summary><p>Three days.</p></details>",
        ))
        .mount(&server)
        .await;

    let agg = aggregator();
    let cancel = CancellationToken::new();
    let ctx = agg.aggregate(&server.uri(), &cancel).await.unwrap();

    assert_eq!(
        ctx.category_status[&Category::PrivacyPolicy],
        CategoryStatus::Found
    );
    assert!(ctx.privacy_policy.unwrap().contains("We value privacy."));

    assert_eq!(ctx.category_status[&Category::Faqs], CategoryStatus::Found);
    assert_eq!(ctx.faqs[0].question, "How fast is shipping?");

    // Nothing in the sitemap matches the refund keywords.
    assert_eq!(
        ctx.category_status[&Category::ReturnPolicy],
        CategoryStatus::NotFound
    );
}

// ---------------------------------------------------------------------------
// Extractor failure surfaces as an error status, not absence
// ---------------------------------------------------------------------------

#[tokio::test]
async fn malformed_listing_with_no_fallback_is_recorded_as_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html><body><p>hi</p></body></html>"),
        )
        .mount(&server)
        .await;
    // The endpoint answers, but with something that is not a catalog; the
    // fallback collection pages 404 and the homepage has no product cards.
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("definitely not json"))
        .mount(&server)
        .await;

    let agg = aggregator();
    let cancel = CancellationToken::new();
    let ctx = agg.aggregate(&server.uri(), &cancel).await.unwrap();

    assert_eq!(
        ctx.category_status[&Category::ProductCatalog],
        CategoryStatus::Error
    );
    assert!(ctx.has_errors());
    assert!(ctx.product_catalog.is_empty());
    // Every other category is ordinary absence, not an error.
    assert_eq!(
        ctx.category_status[&Category::Faqs],
        CategoryStatus::NotFound
    );
}

// ---------------------------------------------------------------------------
// Canonical identity and sink idempotency
// ---------------------------------------------------------------------------

#[tokio::test]
async fn url_variants_share_one_identity_and_one_sink_entry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>s</body></html>"))
        .mount(&server)
        .await;

    let agg = aggregator();
    let sink = MemorySink::new();
    let cancel = CancellationToken::new();

    let plain = fetch_insights(&agg, &sink, &server.uri(), &cancel)
        .await
        .unwrap();
    let variant = format!("{}/collections/all?utm_source=newsletter", server.uri());
    let with_path = fetch_insights(&agg, &sink, &variant, &cancel).await.unwrap();

    assert_eq!(plain.store_url, with_path.store_url);
    assert_eq!(sink.len(), 1, "re-fetch must upsert over the prior context");
    assert!(sink.get(&plain.store_url).is_some());
}

// ---------------------------------------------------------------------------
// Catalog cap and pagination
// ---------------------------------------------------------------------------

#[tokio::test]
async fn catalog_is_capped_with_unique_ids() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>s</body></html>"))
        .mount(&server)
        .await;

    let products: Vec<Value> = (1..=30)
        .map(|id| listing_product(id, &format!("product-{id}")))
        .collect();
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "products": products })))
        .mount(&server)
        .await;

    let mut config = test_config();
    config.catalog_max_products = 10;
    let agg = aggregator_with(config);
    let cancel = CancellationToken::new();
    let ctx = agg.aggregate(&server.uri(), &cancel).await.unwrap();

    assert_eq!(ctx.product_catalog.len(), 10);
    let mut ids: Vec<&str> = ctx.product_catalog.iter().map(|p| p.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 10, "capped catalog must keep ids unique");
}

#[tokio::test]
async fn catalog_follows_link_header_pagination() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>s</body></html>"))
        .mount(&server)
        .await;

    let next_link = format!(
        "<{}/products.json?limit=250&page_info=cursor2>; rel=\"next\"",
        server.uri()
    );
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .and(query_param_is_missing("page_info"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "products": [listing_product(1, "first")] }))
                .insert_header("Link", next_link.as_str()),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .and(query_param("page_info", "cursor2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "products": [listing_product(2, "second")] })),
        )
        .mount(&server)
        .await;

    let agg = aggregator();
    let cancel = CancellationToken::new();
    let ctx = agg.aggregate(&server.uri(), &cancel).await.unwrap();

    let ids: Vec<&str> = ctx.product_catalog.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);
}

// ---------------------------------------------------------------------------
// Catalog fallback when the listing endpoint is missing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_listing_endpoint_falls_back_to_collection_scrape() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>s</body></html>"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/collections/all"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<div class="grid">
                <a href="/products/hibiscus-cooler">Hibiscus Cooler</a>
                <a href="/products/yerba-mate">Yerba Mate</a>
            </div>"#,
        ))
        .mount(&server)
        .await;

    let agg = aggregator();
    let cancel = CancellationToken::new();
    let ctx = agg.aggregate(&server.uri(), &cancel).await.unwrap();

    assert_eq!(
        ctx.category_status[&Category::ProductCatalog],
        CategoryStatus::Found
    );
    let ids: Vec<&str> = ctx.product_catalog.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["hibiscus-cooler", "yerba-mate"]);
}

// ---------------------------------------------------------------------------
// Cancellation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cancelled_fetch_returns_cancelled_and_writes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>s</body></html>"))
        .mount(&server)
        .await;

    let agg = aggregator();
    let sink = MemorySink::new();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = fetch_insights(&agg, &sink, &server.uri(), &cancel).await;

    assert!(matches!(result, Err(FetchError::Cancelled)));
    assert!(sink.is_empty());
}

// ---------------------------------------------------------------------------
// Invalid input
// ---------------------------------------------------------------------------

#[tokio::test]
async fn invalid_url_is_rejected_before_any_fetch() {
    let agg = aggregator();
    let cancel = CancellationToken::new();
    let result = agg.aggregate("not a url at all", &cancel).await;
    assert!(matches!(result, Err(FetchError::InvalidUrl { .. })));
}
