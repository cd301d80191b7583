//! Authentication extractors.
//!
//! Sessions are placeholder logins (see [`tienda_core::session`]); these
//! extractors only decide which affordances a request may see.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tienda_core::{Route, Session as UserSession, SessionStore, UserIdentity};
use tower_sessions::Session;

use super::session::SessionKv;
use crate::error::AppError;

/// Body of the `403` sent to users other than the admin.
pub const ADMIN_ONLY_MESSAGE: &str = "Solo el administrador puede realizar esta acción.";

/// Restore the user session for the current request.
///
/// Falls back to the logged-out session if the session cannot be read.
pub async fn current_session(session: &Session) -> UserSession {
    match SessionKv::load(session).await {
        Ok(kv) => SessionStore::restore(kv).session().clone(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read session; treating request as logged out");
            UserSession::default()
        }
    }
}

/// Extractor for the current user session. Never rejects.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(CurrentUser(user): CurrentUser) -> impl IntoResponse {
///     format!("admin: {}", user.is_admin())
/// }
/// ```
pub struct CurrentUser(pub UserSession);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = match parts.extensions.get::<Session>() {
            Some(session) => current_session(session).await,
            None => UserSession::default(),
        };
        Ok(Self(user))
    }
}

/// Extractor that requires the admin session.
///
/// Logged-out requests are sent to the login page; any other user gets
/// `403 Forbidden`.
pub struct RequireAdmin(pub UserIdentity);

/// Error returned when the admin session is required.
pub enum AdminRejection {
    /// Redirect to login page.
    RedirectToLogin,
    /// Logged in, but not as the admin.
    Forbidden,
}

impl IntoResponse for AdminRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to(&Route::Login.path()).into_response(),
            Self::Forbidden => AppError::Forbidden(ADMIN_ONLY_MESSAGE.to_string()).into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AdminRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Ok(CurrentUser(user)) = CurrentUser::from_request_parts(parts, state).await;

        if !user.is_authenticated() {
            return Err(AdminRejection::RedirectToLogin);
        }
        if !user.is_admin() {
            tracing::info!(user = %user.user().name, "Non-admin blocked from admin page");
            return Err(AdminRejection::Forbidden);
        }

        Ok(Self(user.user().clone()))
    }
}
