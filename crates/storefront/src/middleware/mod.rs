//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors, added in `main`)
//! 2. `TraceLayer` (request tracing)
//! 3. Session layer (tower-sessions over [`SessionMemoryStore`])

pub mod auth;
pub mod session;
pub mod session_store;

pub use auth::{AdminRejection, CurrentUser, RequireAdmin, current_session};
pub use session::{SessionKv, create_session_layer, load_cart, save_cart};
pub use session_store::{SessionMemoryStore, prune_expired_sessions};
