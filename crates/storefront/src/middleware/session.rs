//! Session middleware configuration.
//!
//! Sets up cookie sessions using tower-sessions over [`SessionMemoryStore`], and
//! adapts a request's session to the core [`KeyValueStore`] port.

use std::collections::{BTreeSet, HashMap};

use tienda_core::session::keys;
use tienda_core::{Cart, KeyValueStore, scroll::SCROLL_KEY};
use tower_sessions::{Expiry, Session, SessionManagerLayer};

use super::session_store::SessionMemoryStore;
use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "tienda_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Keys mirrored into [`SessionKv`].
const KV_KEYS: [&str; 4] = [
    keys::AUTH_TOKEN,
    keys::AUTH_NAME,
    keys::AUTH_EMAIL,
    SCROLL_KEY,
];

/// Key holding the serialized cart.
const CART_KEY: &str = "cart";

/// Create the session layer over `store`.
///
/// # Arguments
///
/// * `config` - Storefront configuration (for the `Secure` cookie flag)
/// * `store` - Session records, shared with the pruning task
#[must_use]
pub fn create_session_layer(
    config: &StorefrontConfig,
    store: SessionMemoryStore,
) -> SessionManagerLayer<SessionMemoryStore> {
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// Synchronous key-value snapshot of a request's session.
///
/// [`load`](Self::load) reads the mirrored keys up front so the core state
/// containers can run synchronously; [`flush`](Self::flush) writes back only
/// the keys that changed.
#[derive(Debug, Default)]
pub struct SessionKv {
    entries: HashMap<String, String>,
    dirty: BTreeSet<String>,
}

impl SessionKv {
    /// Read the mirrored keys from `session`.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be read.
    pub async fn load(session: &Session) -> Result<Self, tower_sessions::session::Error> {
        let mut entries = HashMap::new();
        for key in KV_KEYS {
            if let Some(value) = session.get::<String>(key).await? {
                entries.insert(key.to_owned(), value);
            }
        }

        Ok(Self {
            entries,
            dirty: BTreeSet::new(),
        })
    }

    /// Write changed keys back to `session`.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be written.
    pub async fn flush(self, session: &Session) -> Result<(), tower_sessions::session::Error> {
        for key in &self.dirty {
            match self.entries.get(key) {
                Some(value) => session.insert(key, value).await?,
                None => {
                    session.remove::<String>(key).await?;
                }
            }
        }
        Ok(())
    }
}

impl KeyValueStore for SessionKv {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_owned(), value.to_owned());
        self.dirty.insert(key.to_owned());
    }

    fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.dirty.insert(key.to_owned());
        }
    }
}

/// Load the cart from the session. A missing cart is empty.
///
/// # Errors
///
/// Returns an error if the session store cannot be read.
pub async fn load_cart(session: &Session) -> Result<Cart, tower_sessions::session::Error> {
    Ok(session.get::<Cart>(CART_KEY).await?.unwrap_or_default())
}

/// Store the cart in the session.
///
/// # Errors
///
/// Returns an error if the session store cannot be written.
pub async fn save_cart(session: &Session, cart: &Cart) -> Result<(), tower_sessions::session::Error> {
    session.insert(CART_KEY, cart).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_marks_dirty() {
        let mut kv = SessionKv::default();
        kv.set(keys::AUTH_NAME, "ana");

        assert_eq!(kv.get(keys::AUTH_NAME).as_deref(), Some("ana"));
        assert!(kv.dirty.contains(keys::AUTH_NAME));
    }

    #[test]
    fn test_removing_absent_key_is_clean() {
        let mut kv = SessionKv::default();
        kv.remove(keys::AUTH_TOKEN);
        assert!(kv.dirty.is_empty());
    }

    #[test]
    fn test_remove_after_set() {
        let mut kv = SessionKv::default();
        kv.set(SCROLL_KEY, "300");
        kv.remove(SCROLL_KEY);

        assert_eq!(kv.get(SCROLL_KEY), None);
        assert!(kv.dirty.contains(SCROLL_KEY));
    }
}
