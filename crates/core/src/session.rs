//! Placeholder authentication and admin authorization.
//!
//! The session is restored from durable storage once, when the
//! [`SessionStore`] is built, and afterwards only changes through
//! [`SessionStore::login`] and [`SessionStore::logout`]. Both write storage
//! before touching memory, so a restore immediately afterwards observes the
//! same state.
//!
//! # Authorization
//!
//! There is no credential check and no role field. A session is an admin
//! session when the display name is exactly [`ADMIN_NAME`]. Anyone can log in
//! under that name; this gates UI affordances only and is not a security
//! boundary.

use serde::{Deserialize, Serialize};

use crate::route::Route;
use crate::storage::KeyValueStore;

/// Display name that grants admin affordances.
pub const ADMIN_NAME: &str = "admin";

/// Storage keys for the persisted session.
pub mod keys {
    /// Presence of this key is the only authentication signal.
    pub const AUTH_TOKEN: &str = "authToken";

    /// Display name of the logged-in user.
    pub const AUTH_NAME: &str = "authNombre";

    /// Email of the logged-in user (may be empty).
    pub const AUTH_EMAIL: &str = "authEmail";
}

/// Who the current user says they are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub name: String,
    pub email: String,
}

/// In-memory view of the persisted session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    authenticated: bool,
    user: UserIdentity,
}

impl Session {
    /// Whether a session token is present.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// The current user. Empty name and email when logged out.
    #[must_use]
    pub const fn user(&self) -> &UserIdentity {
        &self.user
    }

    /// Whether the display name is exactly `admin` (case-sensitive).
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user.name == ADMIN_NAME
    }
}

/// Token written on login.
///
/// Derived from the name only. It marks the session as present and carries
/// no secret.
#[must_use]
pub fn placeholder_token(name: &str) -> String {
    format!("fake-token-{name}")
}

/// Owner of the session state and its backing storage.
#[derive(Debug)]
pub struct SessionStore<S> {
    storage: S,
    session: Session,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Build the store from whatever `storage` currently holds.
    ///
    /// A missing token yields the logged-out session regardless of any
    /// leftover name or email keys.
    pub fn restore(storage: S) -> Self {
        let session = if storage.get(keys::AUTH_TOKEN).is_some() {
            Session {
                authenticated: true,
                user: UserIdentity {
                    name: storage.get(keys::AUTH_NAME).unwrap_or_default(),
                    email: storage.get(keys::AUTH_EMAIL).unwrap_or_default(),
                },
            }
        } else {
            Session::default()
        };

        Self { storage, session }
    }

    /// Log in as `name`. No validation is applied to either field.
    pub fn login(&mut self, name: &str, email: &str) {
        self.storage.set(keys::AUTH_TOKEN, &placeholder_token(name));
        self.storage.set(keys::AUTH_NAME, name);
        self.storage.set(keys::AUTH_EMAIL, email);

        self.session = Session {
            authenticated: true,
            user: UserIdentity {
                name: name.to_owned(),
                email: email.to_owned(),
            },
        };
        tracing::debug!(admin = self.session.is_admin(), "session opened");
    }

    /// Log in as `name` with an empty email.
    pub fn login_name(&mut self, name: &str) {
        self.login(name, "");
    }

    /// Clear the session and return the landing route.
    ///
    /// Navigating there is left to the caller.
    pub fn logout(&mut self) -> Route {
        self.storage.remove(keys::AUTH_TOKEN);
        self.storage.remove(keys::AUTH_NAME);
        self.storage.remove(keys::AUTH_EMAIL);

        self.session = Session::default();
        tracing::debug!("session cleared");
        Route::Products
    }
}

impl<S> SessionStore<S> {
    /// The current session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Whether a session token is present.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.session.authenticated
    }

    /// The current user.
    #[must_use]
    pub const fn user(&self) -> &UserIdentity {
        &self.session.user
    }

    /// Whether the current user is the admin.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.session.is_admin()
    }

    /// The backing storage.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Give the backing storage back.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }
}
