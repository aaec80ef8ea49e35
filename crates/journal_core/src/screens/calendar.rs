//! crates/journal_core/src/screens/calendar.rs
//!
//! The calendar screen: a `CalendarNavigator` plus the date-scoped entry
//! list it drives. Every successful date selection supersedes any entry
//! fetch still in flight; responses for a date that is no longer selected
//! are discarded at merge time.

use chrono::NaiveDate;
use tracing::debug;

use crate::domain::Entry;
use crate::fetch::FetchState;
use crate::navigator::CalendarNavigator;
use crate::ports::PortResult;

/// A token for one outstanding entries fetch, keyed by the date it was
/// issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntriesRequest {
    date: NaiveDate,
}

impl EntriesRequest {
    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

/// State for the journal calendar view.
pub struct CalendarScreen {
    navigator: CalendarNavigator,
    entries: FetchState<Vec<Entry>>,
    /// The date an entries response is currently expected for.
    pending: Option<NaiveDate>,
    /// Index of the entry card whose insight is expanded, if any.
    expanded_entry: Option<usize>,
}

impl CalendarScreen {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            navigator: CalendarNavigator::new(today),
            entries: FetchState::Idle,
            pending: None,
            expanded_entry: None,
        }
    }

    pub fn navigator(&self) -> &CalendarNavigator {
        &self.navigator
    }

    pub fn entries(&self) -> &FetchState<Vec<Entry>> {
        &self.entries
    }

    pub fn expanded_entry(&self) -> Option<usize> {
        self.expanded_entry
    }

    /// Requests entries for the currently selected date. Used on screen
    /// entry and after the selection changes. Suppressed while a fetch for
    /// the same date is already outstanding.
    pub fn refresh(&mut self) -> Option<EntriesRequest> {
        let date = self.navigator.selected_date();
        if self.pending == Some(date) {
            return None;
        }
        self.pending = Some(date);
        self.entries = FetchState::Loading;
        self.expanded_entry = None;
        Some(EntriesRequest { date })
    }

    /// Selects a date. A successful selection triggers an entries fetch for
    /// it; a rejected (future) date changes nothing and fetches nothing.
    pub fn select_date(&mut self, date: NaiveDate) -> Option<EntriesRequest> {
        if !self.navigator.select_date(date) {
            return None;
        }
        self.refresh()
    }

    /// Selects a weekday of the visible week, with the same fetch semantics
    /// as `select_date`.
    pub fn select_weekday(&mut self, weekday: usize) -> Option<EntriesRequest> {
        if !self.navigator.select_weekday(weekday) {
            return None;
        }
        self.refresh()
    }

    /// Shifts the visible week. The selection does not move, so no fetch is
    /// triggered.
    pub fn shift_week(&mut self, direction: i32) -> bool {
        self.navigator.shift_week(direction)
    }

    pub fn toggle_calendar_expanded(&mut self) {
        self.navigator.toggle_calendar_expanded();
    }

    /// Expands the entry card at `index`, or collapses it when it is the
    /// one already expanded.
    pub fn toggle_entry(&mut self, index: usize) {
        let within_list = self
            .entries
            .ready()
            .map(|entries| index < entries.len())
            .unwrap_or(false);
        if !within_list {
            return;
        }
        self.expanded_entry = if self.expanded_entry == Some(index) {
            None
        } else {
            Some(index)
        };
    }

    /// Merges an entries response. Last write wins by date, not by
    /// completion order: a response for a superseded date is discarded and
    /// the method returns false.
    pub fn apply_entries(
        &mut self,
        request: EntriesRequest,
        result: PortResult<Vec<Entry>>,
    ) -> bool {
        if request.date != self.navigator.selected_date() {
            debug!(
                fetched = %request.date,
                selected = %self.navigator.selected_date(),
                "discarding stale entries response"
            );
            return false;
        }
        self.pending = None;
        self.entries = FetchState::from_list(result);
        self.expanded_entry = None;
        true
    }
}
