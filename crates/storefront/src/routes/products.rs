//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use tienda_core::{
    LoadState, ProductId, ProductRecord, ProductView, Route, ScrollMemory, SessionStore,
};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::{SessionKv, load_cart};
use crate::routes::NavContext;
use crate::state::AppState;

/// Message shown when the catalog could not be fetched.
pub const FETCH_FAILURE_MESSAGE: &str =
    "No se pudieron cargar los productos. Intenta nuevamente más tarde.";

/// Image shown for products without one.
const PLACEHOLDER_IMAGE: &str = "/static/img/producto.svg";

/// Product display data for templates.
#[derive(Debug, Clone)]
pub struct ProductCard {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: String,
    pub image_url: String,
    pub detail_href: String,
    pub edit_href: String,
    pub delete_href: String,
}

impl From<&ProductRecord> for ProductCard {
    fn from(product: &ProductRecord) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            category: product.category.clone(),
            description: product
                .description()
                .unwrap_or("Sin descripción disponible.")
                .to_string(),
            price: product.price.display(),
            image_url: product
                .image_url
                .clone()
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            detail_href: Route::ProductDetail(product.id.clone()).path(),
            edit_href: Route::UpdateProduct.with_product(&product.id),
            delete_href: Route::DeleteProduct.with_product(&product.id),
        }
    }
}

/// Listing query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
    /// Kept raw so a malformed page falls back to page 1.
    pub page: Option<String>,
}

impl ListQuery {
    /// Requested page; missing or unparseable values mean page 1.
    #[must_use]
    pub fn page_number(&self) -> usize {
        self.page
            .as_deref()
            .and_then(|page| page.trim().parse().ok())
            .unwrap_or(1)
    }
}

/// Detail query parameters.
#[derive(Debug, Deserialize)]
pub struct ShowQuery {
    /// List scroll offset at the moment the product was opened.
    pub scroll: Option<u32>,
}

/// One entry of the page selector.
#[derive(Debug, Clone)]
pub struct PageLink {
    pub number: usize,
    pub href: String,
    pub current: bool,
}

/// "Showing X of Y products" while searching.
#[derive(Debug, Clone)]
pub struct MatchSummary {
    pub shown: usize,
    pub total: usize,
}

/// "Showing X products (page N of M)".
#[derive(Debug, Clone)]
pub struct PageSummary {
    pub shown: usize,
    pub page: usize,
    pub total_pages: usize,
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub nav: NavContext,
    pub loading: bool,
    pub error: Option<String>,
    pub ready: bool,
    pub search_term: String,
    pub cards: Vec<ProductCard>,
    pub is_admin: bool,
    pub return_to: String,
    pub shows_paginator: bool,
    pub pages: Vec<PageLink>,
    pub match_summary: Option<MatchSummary>,
    pub page_summary: Option<PageSummary>,
    pub scroll_to: Option<u32>,
}

impl ProductsIndexTemplate {
    fn new(nav: NavContext, view: &ProductView) -> Self {
        Self {
            is_admin: nav.is_admin,
            nav,
            loading: false,
            error: None,
            ready: false,
            search_term: view.search_term().to_string(),
            cards: Vec::new(),
            return_to: list_href(view.search_term(), view.current_page()),
            shows_paginator: false,
            pages: Vec::new(),
            match_summary: None,
            page_summary: None,
            scroll_to: None,
        }
    }

    fn fill(&mut self, view: &ProductView, products: &[ProductRecord]) {
        self.ready = true;
        self.cards = view
            .page_items(products)
            .into_iter()
            .map(ProductCard::from)
            .collect();
        self.shows_paginator = view.shows_paginator(products);
        self.pages = view
            .page_numbers(products)
            .map(|number| PageLink {
                number,
                href: list_href(view.search_term(), number),
                current: number == view.current_page(),
            })
            .collect();
        self.match_summary = view
            .match_summary(products)
            .map(|(shown, total)| MatchSummary { shown, total });
        self.page_summary = view
            .page_summary(products)
            .map(|(shown, page, total_pages)| PageSummary {
                shown,
                page,
                total_pages,
            });
    }
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub nav: NavContext,
    pub card: ProductCard,
    pub is_admin: bool,
    pub return_to: String,
}

/// Listing URL for `term` on `page`.
#[must_use]
pub fn list_href(term: &str, page: usize) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    if !term.is_empty() {
        query.append_pair("q", term);
    }
    if page != 1 {
        query.append_pair("page", &page.to_string());
    }

    let query = query.finish();
    if query.is_empty() {
        Route::Products.path()
    } else {
        format!("{}?{query}", Route::Products.path())
    }
}

/// Display product listing page.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ListQuery>,
) -> Result<ProductsIndexTemplate> {
    let mut kv = SessionKv::load(&session).await?;
    let user = SessionStore::restore(&mut kv).session().clone();
    let cart = load_cart(&session).await?;

    let mut view = ProductView::new();
    view.set_search_term(query.q.as_deref().unwrap_or_default());
    view.set_page(query.page_number());

    let mut page = ProductsIndexTemplate::new(NavContext::new(&user, &cart), &view);
    match state.catalog().snapshot().await {
        LoadState::Loading => page.loading = true,
        LoadState::Error(_) => page.error = Some(FETCH_FAILURE_MESSAGE.to_string()),
        LoadState::Ready(products) => {
            page.scroll_to = ScrollMemory::new(&mut kv).restore_after_load(products.len());
            page.fill(&view, &products);
        }
    }

    kv.flush(&session).await?;
    Ok(page)
}

/// Display product detail page.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Query(query): Query<ShowQuery>,
) -> Result<ProductShowTemplate> {
    let product = find_product(&state, &ProductId::new(id)).await?;

    let mut kv = SessionKv::load(&session).await?;
    let user = SessionStore::restore(&mut kv).session().clone();
    if let Some(offset) = query.scroll {
        ScrollMemory::new(&mut kv).remember(offset);
    }
    kv.flush(&session).await?;

    let cart = load_cart(&session).await?;
    let nav = NavContext::new(&user, &cart);

    Ok(ProductShowTemplate {
        is_admin: nav.is_admin,
        nav,
        return_to: Route::ProductDetail(product.id.clone()).path(),
        card: ProductCard::from(&product),
    })
}

/// Look up a loaded product.
///
/// # Errors
///
/// `CatalogUnavailable` while the catalog is not loaded, `NotFound` for an
/// unknown ID.
pub async fn find_product(state: &AppState, id: &ProductId) -> Result<ProductRecord> {
    let products = state
        .catalog()
        .products()
        .await
        .ok_or(AppError::CatalogUnavailable)?;

    products
        .iter()
        .find(|p| &p.id == id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("producto {id}")))
}

#[cfg(test)]
mod tests {
    use tienda_core::Price;

    use super::*;

    #[test]
    fn test_list_href() {
        assert_eq!(list_href("", 1), "/productos");
        assert_eq!(list_href("", 2), "/productos?page=2");
        assert_eq!(list_href("mate amargo", 1), "/productos?q=mate+amargo");
        assert_eq!(list_href("té & café", 3), "/productos?q=t%C3%A9+%26+caf%C3%A9&page=3");
    }

    #[test]
    fn test_page_number_fallback() {
        let query = |page: Option<&str>| ListQuery {
            q: None,
            page: page.map(str::to_string),
        };

        assert_eq!(query(None).page_number(), 1);
        assert_eq!(query(Some("3")).page_number(), 3);
        assert_eq!(query(Some("0")).page_number(), 0);
        assert_eq!(query(Some("")).page_number(), 1);
        assert_eq!(query(Some("-1")).page_number(), 1);
        assert_eq!(query(Some("abc")).page_number(), 1);
    }

    #[test]
    fn test_card_defaults() {
        let product = ProductRecord {
            id: ProductId::new("4"),
            name: "Termo".to_string(),
            category: "Camping".to_string(),
            description: None,
            price: Price::new(25_000.into()),
            image_url: Some(String::new()),
        };

        let card = ProductCard::from(&product);
        assert_eq!(card.description, "Sin descripción disponible.");
        assert_eq!(card.image_url, PLACEHOLDER_IMAGE);
        assert_eq!(card.price, "$25.000,00");
        assert_eq!(card.detail_href, "/producto/4");
        assert_eq!(card.edit_href, "/actualizar-producto?id=4");
        assert_eq!(card.delete_href, "/eliminar-producto?id=4");
    }
}
