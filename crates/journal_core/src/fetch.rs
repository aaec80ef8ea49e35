//! crates/journal_core/src/fetch.rs
//!
//! The per-region fetch lifecycle shared by every screen. Each independently
//! fetched area of a screen (entries list, insight panel, advice cards) is
//! one `FetchState`, so an error in one region never takes down the others.

use crate::ports::{PortError, PortResult};

/// The lifecycle of one fetched region of a screen.
///
/// `Empty` and `NotFound` are deliberate non-errors: a valid response with
/// zero items renders as a neutral empty state, and a failed lookup renders
/// as a distinct "not found" message.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    /// Nothing requested yet.
    Idle,
    /// A request is outstanding; the region shows a loading indicator.
    Loading,
    /// Data arrived and is displayable.
    Ready(T),
    /// A valid response with zero items.
    Empty,
    /// The backend answered but the expected item is absent.
    NotFound(String),
    /// The fetch itself failed. Not retried automatically.
    Failed(String),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    /// The payload, if the region is displayable.
    pub fn ready(&self) -> Option<&T> {
        match self {
            FetchState::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// Maps a port error into the matching terminal region state.
    fn from_error(error: PortError) -> Self {
        match error {
            PortError::NotFound(message) => FetchState::NotFound(message),
            other => FetchState::Failed(other.to_string()),
        }
    }

    /// Builds a region from a single-item fetch result.
    pub fn from_item(result: PortResult<T>) -> Self {
        match result {
            Ok(value) => FetchState::Ready(value),
            Err(error) => Self::from_error(error),
        }
    }
}

impl<T> FetchState<Vec<T>> {
    /// Builds a region from a list fetch result. Zero items is `Empty`.
    pub fn from_list(result: PortResult<Vec<T>>) -> Self {
        match result {
            Ok(items) if items.is_empty() => FetchState::Empty,
            Ok(items) => FetchState::Ready(items),
            Err(error) => Self::from_error(error),
        }
    }
}

impl FetchState<String> {
    /// Builds a region from a fetched text blob. Blank text is `Empty`.
    pub fn from_text(result: PortResult<String>) -> Self {
        match result {
            Ok(text) if text.trim().is_empty() => FetchState::Empty,
            Ok(text) => FetchState::Ready(text),
            Err(error) => Self::from_error(error),
        }
    }
}
