//! Scroll offset memory for returning to the product list.
//!
//! The list writes its vertical offset before the user opens a product, and
//! reads it back (once) the next time the list renders with products in it.

use crate::storage::KeyValueStore;

/// Key holding the remembered offset in ephemeral storage.
pub const SCROLL_KEY: &str = "scrollPos";

/// Remembered list scroll offset over an ephemeral store.
#[derive(Debug)]
pub struct ScrollMemory<S> {
    storage: S,
}

impl<S: KeyValueStore> ScrollMemory<S> {
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Remember `offset` before leaving the list.
    pub fn remember(&mut self, offset: u32) {
        self.storage.set(SCROLL_KEY, &offset.to_string());
    }

    /// Take the remembered offset once the list has `loaded` products.
    ///
    /// With an empty list the offset is kept for a later render.
    pub fn restore_after_load(&mut self, loaded: usize) -> Option<u32> {
        if loaded == 0 {
            return None;
        }

        let raw = self.storage.get(SCROLL_KEY)?;
        self.storage.remove(SCROLL_KEY);

        match raw.trim().parse() {
            Ok(offset) => Some(offset),
            Err(e) => {
                tracing::debug!(value = %raw, error = %e, "discarding unreadable scroll offset");
                None
            }
        }
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_restore_once() {
        let mut memory = ScrollMemory::new(MemoryStore::new());
        memory.remember(640);

        assert_eq!(memory.restore_after_load(10), Some(640));
        assert_eq!(memory.restore_after_load(10), None);
    }

    #[test]
    fn test_waits_for_products() {
        let mut memory = ScrollMemory::new(MemoryStore::new());
        memory.remember(120);

        assert_eq!(memory.restore_after_load(0), None);
        assert_eq!(memory.restore_after_load(3), Some(120));
    }

    #[test]
    fn test_nothing_remembered() {
        let mut memory = ScrollMemory::new(MemoryStore::new());
        assert_eq!(memory.restore_after_load(5), None);
    }

    #[test]
    fn test_unreadable_offset_is_cleared() {
        let storage: MemoryStore = [(SCROLL_KEY, "abc")].into_iter().collect();
        let mut memory = ScrollMemory::new(storage);

        assert_eq!(memory.restore_after_load(5), None);
        assert!(memory.into_storage().is_empty());
    }
}
