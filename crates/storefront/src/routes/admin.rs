//! Admin-only product pages.
//!
//! Both pages receive the selected product as their payload (`?id=`) and
//! render it. Writing changes back to the remote catalog is outside this
//! storefront; the loaded catalog is never modified.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;
use tienda_core::ProductId;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::routes::NavContext;
use crate::routes::products::{ProductCard, find_product};
use crate::state::AppState;

/// Selected product payload.
#[derive(Debug, Deserialize)]
pub struct PayloadQuery {
    pub id: String,
}

/// Delete confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/delete.html")]
pub struct DeleteProductTemplate {
    pub nav: NavContext,
    pub card: ProductCard,
}

/// Edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/update.html")]
pub struct UpdateProductTemplate {
    pub nav: NavContext,
    pub card: ProductCard,
    /// Price as a plain number for the input field.
    pub price_value: String,
}

/// Display the delete confirmation for the selected product.
#[instrument(skip(state, session, _admin))]
pub async fn delete_page(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<PayloadQuery>,
) -> Result<DeleteProductTemplate> {
    let product = find_product(&state, &ProductId::new(query.id)).await?;

    Ok(DeleteProductTemplate {
        nav: NavContext::load(&session).await?,
        card: ProductCard::from(&product),
    })
}

/// Display the edit form for the selected product.
#[instrument(skip(state, session, _admin))]
pub async fn update_page(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<PayloadQuery>,
) -> Result<UpdateProductTemplate> {
    let product = find_product(&state, &ProductId::new(query.id)).await?;

    Ok(UpdateProductTemplate {
        nav: NavContext::load(&session).await?,
        price_value: product.price.amount().to_string(),
        card: ProductCard::from(&product),
    })
}
