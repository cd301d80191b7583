//! Cart route handlers.
//!
//! The cart lives in the cookie session as JSON. Adding a product copies the
//! catalog record into the cart line.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::Redirect};
use serde::Deserialize;
use tienda_core::{CartLine, ProductId, Route};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::{load_cart, save_cart};
use crate::routes::NavContext;
use crate::routes::products::find_product;
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Debug, Clone)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.product.id.to_string(),
            name: line.product.name.clone(),
            quantity: line.quantity,
            price: line.product.price.display(),
            line_price: line.line_price().display(),
        }
    }
}

/// Cart form data.
#[derive(Debug, Deserialize)]
pub struct CartForm {
    pub id: String,
    /// Local path to go back to after adding.
    pub return_to: Option<String>,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub nav: NavContext,
    pub items: Vec<CartItemView>,
    pub subtotal: String,
}

/// Display cart page.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<CartShowTemplate> {
    let cart = load_cart(&session).await?;

    Ok(CartShowTemplate {
        nav: NavContext::load(&session).await?,
        items: cart.lines().iter().map(CartItemView::from).collect(),
        subtotal: cart.subtotal().display(),
    })
}

/// Add one unit of a product to the cart.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CartForm>,
) -> Result<Redirect> {
    let product = find_product(&state, &ProductId::new(form.id)).await?;

    let mut cart = load_cart(&session).await?;
    cart.add(product);
    save_cart(&session, &cart).await?;
    tracing::debug!(items = cart.item_count(), "Added product to cart");

    Ok(Redirect::to(&local_path(form.return_to.as_deref())))
}

/// Remove a product line from the cart.
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<CartForm>) -> Result<Redirect> {
    let mut cart = load_cart(&session).await?;
    if cart.remove(&ProductId::new(form.id)) {
        save_cart(&session, &cart).await?;
    }

    Ok(Redirect::to(&Route::Cart.path()))
}

/// `return_to` if it is a local path, otherwise the product list.
///
/// Browsers read `\` as `/` and drop tabs and newlines, so paths holding
/// either could still resolve to another host.
fn local_path(return_to: Option<&str>) -> String {
    match return_to {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && !path.chars().any(char::is_control) =>
        {
            path.to_string()
        }
        _ => Route::Products.path(),
    }
}
