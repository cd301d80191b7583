//! Fetching the catalog from a remote JSON endpoint.

use axum::http::StatusCode;
use tienda_core::{LoadState, ProductId};
use tienda_integration_tests::serve_catalog_json;
use tienda_storefront::catalog::{Catalog, FetchError, ProductSource};

const MOCK_BODY: &str = r#"[
    {"id": "1", "producto": "Mate imperial", "categoria": "Mates", "precio": "12345.5", "avatar": "https://img.example/1.png"},
    {"id": 2, "producto": "Termo acero", "categoria": "Termos", "descripcion": "1 litro", "precio": 30000}
]"#;

#[tokio::test]
async fn test_fetch_all_parses_remote_records() {
    let config = serve_catalog_json(StatusCode::OK, MOCK_BODY.to_string()).await;
    let source = ProductSource::new(&config).expect("client");

    let products = source.fetch_all().await.expect("catalog");
    assert_eq!(products.len(), 2);

    let first = products.first().expect("first product");
    assert_eq!(first.name, "Mate imperial");
    assert_eq!(first.price.display(), "$12.345,50");
    assert_eq!(first.image_url.as_deref(), Some("https://img.example/1.png"));

    let second = products.get(1).expect("second product");
    assert_eq!(second.id, ProductId::new("2"));
    assert_eq!(second.description(), Some("1 litro"));
}

#[tokio::test]
async fn test_error_status_is_fetch_error() {
    let config =
        serve_catalog_json(StatusCode::INTERNAL_SERVER_ERROR, "oops".to_string()).await;
    let source = ProductSource::new(&config).expect("client");

    let err = source.fetch_all().await.expect_err("server error");
    assert!(matches!(err, FetchError::Status(500)));
}

#[tokio::test]
async fn test_catalog_settles_once_from_source() {
    let config = serve_catalog_json(StatusCode::OK, MOCK_BODY.to_string()).await;
    let source = ProductSource::new(&config).expect("client");

    let catalog = Catalog::pending();
    assert!(catalog.snapshot().await.is_loading());

    catalog.start_loading(source).await.expect("fetch task");
    assert_eq!(catalog.products().await.map(|p| p.len()), Some(2));

    // Later outcomes are ignored
    catalog.settle(Ok(Vec::new())).await;
    assert_eq!(catalog.products().await.map(|p| p.len()), Some(2));
}

#[tokio::test]
async fn test_catalog_failure_is_terminal() {
    let config = serve_catalog_json(StatusCode::OK, "not json".to_string()).await;
    let source = ProductSource::new(&config).expect("client");

    let catalog = Catalog::pending();
    catalog.start_loading(source).await.expect("fetch task");

    assert!(matches!(catalog.snapshot().await, LoadState::Error(_)));
    assert!(catalog.products().await.is_none());
}
