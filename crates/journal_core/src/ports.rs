//! crates/journal_core/src/ports.rs
//!
//! Defines the service contract (trait) for the journaling backend.
//! This trait forms the boundary of the hexagonal architecture, allowing the core
//! to be independent of the concrete HTTP transport.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{
    AdviceCard, EmotionCatalog, Entry, EntryStimulus, Insight, TopStimulus,
};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from the underlying transport.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum PortError {
    /// The backend answered, but the requested item does not exist.
    #[error("Item not found: {0}")]
    NotFound(String),
    /// The request never produced a valid response (connection refused,
    /// timeout, non-success status).
    #[error("Network failure: {0}")]
    Network(String),
    /// The response arrived but could not be understood.
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Port (Trait)
//=========================================================================================

/// The logical operations the core needs from the JSON-over-HTTP backend.
///
/// A response with zero items is a valid result, not an error; the screens
/// decide how to surface it.
#[async_trait]
pub trait JournalApi: Send + Sync {
    // --- Journal entries ---
    async fn entries_by_date(&self, date: NaiveDate) -> PortResult<Vec<Entry>>;

    async fn entry_by_id(&self, entry_id: i64) -> PortResult<Entry>;

    // --- Stimuli and insights ---
    async fn emotion_mapping(&self) -> PortResult<EmotionCatalog>;

    async fn insights_by_stim_id(&self, stim_id: i64) -> PortResult<Vec<Insight>>;

    async fn stimuli_by_call_id(&self, call_id: i64) -> PortResult<Vec<EntryStimulus>>;

    async fn top_stimuli_this_week(&self) -> PortResult<Vec<TopStimulus>>;

    // --- Daily guidance ---
    async fn todays_affirmation(&self) -> PortResult<String>;

    async fn todays_reminders(&self) -> PortResult<String>;

    async fn todays_advice(&self) -> PortResult<Vec<AdviceCard>>;
}
