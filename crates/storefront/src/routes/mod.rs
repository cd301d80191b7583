//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                          - Landing page
//! GET  /health                    - Health check
//!
//! # Products
//! GET  /productos?q=&page=        - Product listing with search and pagination
//! GET  /producto/{id}?scroll=     - Product detail (remembers list scroll offset)
//!
//! # Admin (name "admin" only)
//! GET  /eliminar-producto?id=     - Delete confirmation for the selected product
//! GET  /actualizar-producto?id=   - Edit form for the selected product
//!
//! # Cart
//! GET  /carrito                   - Cart page
//! POST /carrito/agregar           - Add one unit of a product
//! POST /carrito/quitar            - Remove a product line
//!
//! # Auth
//! GET  /login                     - Login page
//! POST /login                     - Login action
//! POST /logout                    - Logout action
//! ```

pub mod admin;
pub mod auth;
pub mod cart;
pub mod home;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};
use tienda_core::{Cart, Session as UserSession};
use tower_sessions::Session;

use crate::error::Result;
use crate::middleware::{current_session, load_cart};
use crate::state::AppState;

/// Header data shared by every page.
#[derive(Debug, Clone)]
pub struct NavContext {
    /// Display name while logged in.
    pub user_name: Option<String>,
    pub is_admin: bool,
    pub cart_count: u32,
}

impl NavContext {
    #[must_use]
    pub fn new(user: &UserSession, cart: &Cart) -> Self {
        let user_name = user.is_authenticated().then(|| {
            let name = &user.user().name;
            if name.is_empty() {
                "Invitado".to_string()
            } else {
                name.clone()
            }
        });

        Self {
            user_name,
            is_admin: user.is_admin(),
            cart_count: cart.item_count(),
        }
    }

    /// Build the header data for the request's session.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be read from the session.
    pub async fn load(session: &Session) -> Result<Self> {
        let user = current_session(session).await;
        let cart = load_cart(session).await?;
        Ok(Self::new(&user, &cart))
    }
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/agregar", post(cart::add))
        .route("/quitar", post(cart::remove))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Landing page
        .route("/", get(home::home))
        // Product routes
        .route("/productos", get(products::index))
        .route("/producto/{id}", get(products::show))
        // Admin payload pages
        .route("/eliminar-producto", get(admin::delete_page))
        .route("/actualizar-producto", get(admin::update_page))
        // Auth routes
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        // Cart routes
        .nest("/carrito", cart_routes())
}
