//! Durable session storage backed by a JSON file.

use std::collections::BTreeMap;
use std::path::PathBuf;

use thiserror::Error;
use tienda_core::KeyValueStore;

/// Session file used when `--store` is not given.
pub const DEFAULT_STORE_FILE: &str = ".tienda-session.json";

/// Errors that can occur while opening the session file.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file exists but could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a JSON object of strings.
    #[error("Malformed session file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A flat JSON object of string keys and values.
///
/// Every `set` or `remove` rewrites the whole file. Write failures are logged
/// and otherwise ignored.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(body) => serde_json::from_str(&body).map_err(|source| StoreError::Parse {
                path: path.display().to_string(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => {
                return Err(StoreError::Io {
                    path: path.display().to_string(),
                    source,
                });
            }
        };

        Ok(Self { path, entries })
    }

    fn persist(&self) {
        let written = serde_json::to_string_pretty(&self.entries)
            .map_err(std::io::Error::from)
            .and_then(|body| std::fs::write(&self.path, body));

        if let Err(e) = written {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to write session file");
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_owned(), value.to_owned());
        self.persist();
    }

    fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.persist();
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "tienda-store-{}-{name}.json",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        path
    }

    #[test]
    fn test_missing_file_is_empty() {
        let store = JsonFileStore::open(temp_path("missing")).unwrap();
        assert_eq!(store.get("authToken"), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let path = temp_path("reopen");

        let mut store = JsonFileStore::open(&path).unwrap();
        store.set("authNombre", "ana");
        store.set("authToken", "fake-token-ana");
        store.remove("authToken");

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get("authNombre").as_deref(), Some("ana"));
        assert_eq!(reopened.get("authToken"), None);

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_malformed_file_is_rejected() {
        let path = temp_path("malformed");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let err = JsonFileStore::open(&path).unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));

        std::fs::remove_file(path).unwrap();
    }
}
