//! Single-shot load state for the remote catalog.

use core::fmt::Display;

/// Outcome of a one-time fetch.
///
/// Starts in [`Loading`](Self::Loading) and moves exactly once, to either
/// [`Ready`](Self::Ready) or [`Error`](Self::Error). Both are terminal; there
/// is no retry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState<T> {
    #[default]
    Loading,
    Error(String),
    Ready(T),
}

impl<T> LoadState<T> {
    /// Record the fetch outcome.
    ///
    /// Returns `false` and leaves the state untouched if it was already
    /// terminal.
    pub fn resolve<E: Display>(&mut self, outcome: Result<T, E>) -> bool {
        if !self.is_loading() {
            return false;
        }

        *self = match outcome {
            Ok(value) => Self::Ready(value),
            Err(e) => Self::Error(e.to_string()),
        };
        true
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub const fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}
