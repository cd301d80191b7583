//! Authentication route handlers.
//!
//! Login is a placeholder: whatever name is submitted becomes the session
//! user, with no credential check. Logging in as `admin` unlocks the edit and
//! delete affordances.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, response::Redirect};
use serde::Deserialize;
use tienda_core::{Route, SessionStore};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::middleware::SessionKv;
use crate::routes::NavContext;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub nav: NavContext,
}

/// Display the login page.
pub async fn login_page(session: Session) -> Result<LoginTemplate> {
    Ok(LoginTemplate {
        nav: NavContext::load(&session).await?,
    })
}

/// Handle login form submission.
#[instrument(skip(session, form), fields(name = %form.name))]
pub async fn login(session: Session, Form(form): Form<LoginForm>) -> Result<Redirect> {
    let mut kv = SessionKv::load(&session).await?;
    let is_admin = {
        let mut store = SessionStore::restore(&mut kv);
        store.login(&form.name, &form.email);
        store.is_admin()
    };
    kv.flush(&session).await?;
    session.cycle_id().await?;

    set_sentry_user(&form.name, &form.email);
    tracing::info!(is_admin, "User logged in");

    Ok(Redirect::to(&Route::Products.path()))
}

/// Handle logout.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Redirect> {
    let mut kv = SessionKv::load(&session).await?;
    let landing = SessionStore::restore(&mut kv).logout();
    kv.flush(&session).await?;

    clear_sentry_user();
    tracing::info!("User logged out");

    Ok(Redirect::to(&landing.path()))
}
