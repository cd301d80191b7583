//! Integration tests for Tienda.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p tienda-integration-tests
//! ```
//!
//! Each test binds the storefront to an ephemeral local port and talks to it
//! with a cookie-keeping HTTP client, so sessions carry across requests like
//! in a browser. No network access is needed: the catalog is either
//! preloaded or served by a local JSON endpoint.

#![allow(clippy::expect_used, clippy::missing_panics_doc)]

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use reqwest::Client;
use tienda_core::{Price, ProductId, ProductRecord};
use tienda_storefront::catalog::Catalog;
use tienda_storefront::config::{ProductSourceConfig, StorefrontConfig};
use tienda_storefront::state::AppState;

/// A storefront running on a local port.
pub struct TestServer {
    base_url: String,
    client: Client,
}

impl TestServer {
    /// Start the storefront with `catalog`.
    pub async fn spawn(catalog: Catalog) -> Self {
        let config = StorefrontConfig::from_vars(|_| None).expect("default configuration");
        let app = tienda_storefront::app(AppState::new(config, catalog));
        let addr = serve(app).await;

        let client = Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: format!("http://{addr}"),
            client,
        }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET `path`.
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request failed")
    }

    /// GET `path` and return the body of a `200 OK` response.
    pub async fn get_page(&self, path: &str) -> String {
        let resp = self.get(path).await;
        assert_eq!(resp.status(), reqwest::StatusCode::OK, "GET {path}");
        resp.text().await.expect("Failed to read response")
    }

    /// POST a form to `path`.
    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("POST request failed")
    }

    /// Log in as `name` through the login form.
    pub async fn login(&self, name: &str) {
        let resp = self.post_form("/login", &[("name", name), ("email", "")]).await;
        assert_eq!(location(&resp), Some("/productos"));
    }
}

/// `Location` header of a redirect response.
#[must_use]
pub fn location(resp: &reqwest::Response) -> Option<&str> {
    resp.headers()
        .get(reqwest::header::LOCATION)
        .and_then(|value| value.to_str().ok())
}

/// `count` products named `Producto N`, alternating between two categories.
#[must_use]
pub fn sample_products(count: u32) -> Vec<ProductRecord> {
    (1..=count)
        .map(|n| ProductRecord {
            id: ProductId::new(n.to_string()),
            name: format!("Producto {n}"),
            category: if n % 2 == 0 { "Mates" } else { "Termos" }.to_string(),
            description: Some(format!("Descripción del producto {n}")),
            price: Price::new((n * 1500).into()),
            image_url: None,
        })
        .collect()
}

/// Serve `body` with `status` at `/productos/` on a local port.
///
/// Returns the source configuration pointing at it.
pub async fn serve_catalog_json(status: StatusCode, body: String) -> ProductSourceConfig {
    let app = Router::new().route(
        "/productos/",
        get(move || {
            let body = body.clone();
            async move { (status, body) }
        }),
    );
    let addr = serve(app).await;

    ProductSourceConfig {
        url: format!("http://{addr}/productos/")
            .parse()
            .expect("valid local URL"),
        timeout: Duration::from_secs(5),
    }
}

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to address");
    let addr = listener.local_addr().expect("local address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server error");
    });

    addr
}
