//! Session commands.
//!
//! # Usage
//!
//! ```bash
//! tienda login ana --email ana@example.com
//! tienda whoami
//! tienda logout
//! ```

use std::path::Path;

use tienda_core::{Session, SessionStore};

use crate::store::{JsonFileStore, StoreError};

/// Log in as `name` and persist the session.
///
/// # Errors
///
/// Returns an error if the session file cannot be opened.
pub fn login(path: &Path, name: &str, email: &str) -> Result<(), StoreError> {
    let mut store = SessionStore::restore(JsonFileStore::open(path)?);
    store.login(name, email);
    tracing::info!(path = %path.display(), is_admin = store.is_admin(), "Session stored");

    print_session(store.session());
    Ok(())
}

/// Clear the persisted session.
///
/// # Errors
///
/// Returns an error if the session file cannot be opened.
pub fn logout(path: &Path) -> Result<(), StoreError> {
    let mut store = SessionStore::restore(JsonFileStore::open(path)?);
    let landing = store.logout();
    tracing::info!(path = %path.display(), landing = %landing, "Session cleared");

    print_session(store.session());
    Ok(())
}

/// Show the persisted session.
///
/// # Errors
///
/// Returns an error if the session file cannot be opened.
pub fn whoami(path: &Path) -> Result<(), StoreError> {
    let store = SessionStore::restore(JsonFileStore::open(path)?);
    print_session(store.session());
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_session(session: &Session) {
    println!("{}", describe(session));
}

fn describe(session: &Session) -> String {
    if !session.is_authenticated() {
        return "Sin sesión".to_string();
    }

    let user = session.user();
    let mut line = format!("Sesión iniciada como {}", user.name);
    if !user.email.is_empty() {
        line.push_str(&format!(" <{}>", user.email));
    }
    if session.is_admin() {
        line.push_str(" (admin)");
    }
    line
}

#[cfg(test)]
mod tests {
    use tienda_core::MemoryStore;

    use super::*;

    #[test]
    fn test_describe_logged_out() {
        assert_eq!(describe(&Session::default()), "Sin sesión");
    }

    #[test]
    fn test_describe_admin() {
        let mut store = SessionStore::restore(MemoryStore::new());
        store.login("admin", "a@b.com");
        assert_eq!(
            describe(store.session()),
            "Sesión iniciada como admin <a@b.com> (admin)"
        );
    }

    #[test]
    fn test_describe_without_email() {
        let mut store = SessionStore::restore(MemoryStore::new());
        store.login("bob", "");
        assert_eq!(describe(store.session()), "Sesión iniciada como bob");
    }
}
