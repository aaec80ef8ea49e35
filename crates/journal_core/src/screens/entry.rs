//! crates/journal_core/src/screens/entry.rs
//!
//! The entry detail view: one journal entry plus the stimuli extracted from
//! it. An entry can be reached directly by id, or by timestamp when a deep
//! link only carries the moment the entry was written; the timestamp path
//! matches against the day's entry list and surfaces a distinct "not found"
//! state when nothing matches.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;

use crate::domain::{Entry, EntryStimulus};
use crate::fetch::FetchState;
use crate::ports::PortResult;

/// How the target entry is identified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryLookup {
    ById(i64),
    /// Resolved by matching the whole-second timestamp against the entry
    /// list of that day.
    ByTimestamp(DateTime<Utc>),
}

impl EntryLookup {
    /// The day whose entry list can resolve this lookup, when applicable.
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            EntryLookup::ById(_) => None,
            EntryLookup::ByTimestamp(ts) => Some(ts.date_naive()),
        }
    }
}

/// A token for one outstanding entry fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryRequest {
    lookup: EntryLookup,
}

impl EntryRequest {
    pub fn lookup(&self) -> EntryLookup {
        self.lookup
    }
}

/// A token for one outstanding per-entry stimuli fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StimuliRequest {
    call_id: i64,
}

impl StimuliRequest {
    pub fn call_id(&self) -> i64 {
        self.call_id
    }
}

/// State for the entry detail view.
pub struct EntryDetailScreen {
    entry: FetchState<Entry>,
    stimuli: FetchState<Vec<EntryStimulus>>,
    pending_entry: Option<EntryLookup>,
    pending_stimuli: Option<i64>,
}

impl Default for EntryDetailScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryDetailScreen {
    pub fn new() -> Self {
        Self {
            entry: FetchState::Idle,
            stimuli: FetchState::Idle,
            pending_entry: None,
            pending_stimuli: None,
        }
    }

    pub fn entry(&self) -> &FetchState<Entry> {
        &self.entry
    }

    pub fn stimuli(&self) -> &FetchState<Vec<EntryStimulus>> {
        &self.stimuli
    }

    /// Starts loading the entry identified by `lookup`. A newer open call
    /// supersedes any earlier one.
    pub fn open(&mut self, lookup: EntryLookup) -> Option<EntryRequest> {
        if self.entry.is_loading() && self.pending_entry == Some(lookup) {
            return None;
        }
        self.pending_entry = Some(lookup);
        self.entry = FetchState::Loading;
        Some(EntryRequest { lookup })
    }

    /// Starts loading the stimuli attached to the entry (keyed by the
    /// backend's call id).
    pub fn request_stimuli(&mut self, call_id: i64) -> Option<StimuliRequest> {
        if self.stimuli.is_loading() && self.pending_stimuli == Some(call_id) {
            return None;
        }
        self.pending_stimuli = Some(call_id);
        self.stimuli = FetchState::Loading;
        Some(StimuliRequest { call_id })
    }

    /// Merges a direct by-id entry response.
    pub fn apply_entry(&mut self, request: EntryRequest, result: PortResult<Entry>) -> bool {
        if !self.is_current(&request) {
            return false;
        }
        self.pending_entry = None;
        self.entry = FetchState::from_item(result);
        true
    }

    /// Merges a by-date entry list response for a timestamp lookup,
    /// matching on the whole-second timestamp. A list without a match is
    /// the canonical "not found" case: the day exists, the moment does not.
    pub fn apply_day_entries(
        &mut self,
        request: EntryRequest,
        result: PortResult<Vec<Entry>>,
    ) -> bool {
        if !self.is_current(&request) {
            return false;
        }
        let timestamp = match request.lookup {
            EntryLookup::ByTimestamp(ts) => ts,
            EntryLookup::ById(_) => return false,
        };
        self.pending_entry = None;
        self.entry = match result {
            Ok(entries) => {
                let matched = entries
                    .into_iter()
                    .find(|entry| entry.created_at.timestamp() == timestamp.timestamp());
                match matched {
                    Some(entry) => FetchState::Ready(entry),
                    None => FetchState::NotFound(format!(
                        "No entry recorded at {}",
                        timestamp.format("%Y-%m-%d %H:%M:%S")
                    )),
                }
            }
            Err(error) => FetchState::from_item(Err(error)),
        };
        true
    }

    /// Merges a per-entry stimuli response.
    pub fn apply_stimuli(
        &mut self,
        request: StimuliRequest,
        result: PortResult<Vec<EntryStimulus>>,
    ) -> bool {
        if self.pending_stimuli != Some(request.call_id) {
            debug!(call_id = request.call_id, "discarding stale stimuli response");
            return false;
        }
        self.pending_stimuli = None;
        self.stimuli = FetchState::from_list(result);
        true
    }

    fn is_current(&self, request: &EntryRequest) -> bool {
        if self.pending_entry != Some(request.lookup) {
            debug!(lookup = ?request.lookup, "discarding stale entry response");
            return false;
        }
        true
    }
}
