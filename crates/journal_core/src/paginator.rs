//! crates/journal_core/src/paginator.rs
//!
//! The stimulus/insight pagination state machine. A single cursor pages the
//! snapshot list and the insight list in lockstep; the insight list may be
//! shorter, in which case positions past its end simply have no insight.

use crate::domain::{EmotionCatalog, Insight, StimulusSnapshot};

/// Owns the selected stimulus, its ordered snapshot and insight lists, and
/// the shared cursor, with the invariant `cursor < max(1, snapshots.len())`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StimulusPaginator {
    stimulus_key: Option<String>,
    snapshots: Vec<StimulusSnapshot>,
    insights: Vec<Insight>,
    cursor: usize,
}

impl StimulusPaginator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stimulus_key(&self) -> Option<&str> {
        self.stimulus_key.as_deref()
    }

    pub fn snapshots(&self) -> &[StimulusSnapshot] {
        &self.snapshots
    }

    pub fn insights(&self) -> &[Insight] {
        &self.insights
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether there is anything to page through. While false, `advance` is
    /// a no-op and the screen renders an empty state.
    pub fn has_data(&self) -> bool {
        !self.snapshots.is_empty()
    }

    /// Selects a stimulus from the catalog, resetting the cursor and
    /// clearing the insight list. Returns the stimulus id to fetch insights
    /// for, or `None` when the key is empty or unknown (a no-data state,
    /// not an error).
    pub fn select_stimulus(&mut self, key: &str, catalog: &EmotionCatalog) -> Option<i64> {
        self.cursor = 0;
        self.insights.clear();
        if key.is_empty() {
            self.stimulus_key = None;
            self.snapshots.clear();
            return None;
        }
        self.stimulus_key = Some(key.to_string());
        match catalog.series(key) {
            Some(series) => {
                let mut snapshots = series.snapshots.clone();
                // Stable sort keeps the backend order for equal timestamps,
                // so re-sorting an already sorted list is idempotent.
                snapshots.sort_by_key(|s| s.created_at);
                let stim_id = snapshots.first().map(|s| s.stim_id);
                self.snapshots = snapshots;
                stim_id
            }
            None => {
                self.snapshots.clear();
                None
            }
        }
    }

    /// Enters this view with a pre-selected target, which may be a stimulus
    /// name or a stimulus id from a deep link. Resolution order: exact name
    /// match, then any series containing a snapshot with that id, then the
    /// first available stimulus.
    pub fn initialize_from_hint(&mut self, hint: &str, catalog: &EmotionCatalog) -> Option<i64> {
        let resolved = Self::resolve_hint(hint, catalog)?.to_string();
        self.select_stimulus(&resolved, catalog)
    }

    fn resolve_hint<'a>(hint: &str, catalog: &'a EmotionCatalog) -> Option<&'a str> {
        if let Some(series) = catalog.series(hint) {
            return Some(series.name.as_str());
        }
        if let Ok(stim_id) = hint.parse::<i64>() {
            let by_id = catalog
                .stimuli
                .iter()
                .find(|series| series.snapshots.iter().any(|s| s.stim_id == stim_id));
            if let Some(series) = by_id {
                return Some(series.name.as_str());
            }
        }
        catalog.first_name()
    }

    /// Replaces the insight list. The backend's sort order is not trusted
    /// where the lockstep cursor depends on it.
    pub fn set_insights(&mut self, mut insights: Vec<Insight>) {
        insights.sort_by_key(|i| i.created_at);
        self.insights = insights;
    }

    /// Moves the cursor one step backward (negative) or forward (positive),
    /// clamped to the snapshot list. No-op at either boundary or while no
    /// snapshots are loaded. Returns whether the cursor moved.
    pub fn advance(&mut self, direction: i32) -> bool {
        if self.snapshots.is_empty() {
            return false;
        }
        let last = self.snapshots.len() - 1;
        let next = match direction {
            d if d < 0 => {
                if self.cursor == 0 {
                    return false;
                }
                self.cursor - 1
            }
            d if d > 0 => {
                if self.cursor == last {
                    return false;
                }
                self.cursor + 1
            }
            _ => return false,
        };
        self.cursor = next;
        true
    }

    pub fn current_snapshot(&self) -> Option<&StimulusSnapshot> {
        self.snapshots.get(self.cursor)
    }

    /// The insight at the shared cursor. `None` past the end of the insight
    /// list means "no insight for this point", not an error.
    pub fn current_insight(&self) -> Option<&Insight> {
        self.insights.get(self.cursor)
    }

    /// A "2 / 5" style position label for the snapshot pager.
    pub fn position_label(&self) -> String {
        format!("{} / {}", self.cursor + 1, self.snapshots.len().max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EmotionVector, StimulusSeries};
    use chrono::{DateTime, Utc};

    fn ts(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    fn snapshot(stim_id: i64, secs: i64) -> StimulusSnapshot {
        StimulusSnapshot {
            stim_id,
            created_at: ts(secs),
            emotions: EmotionVector::default(),
        }
    }

    fn catalog() -> EmotionCatalog {
        EmotionCatalog {
            stimuli: vec![
                StimulusSeries {
                    name: "rain".to_string(),
                    snapshots: vec![snapshot(11, 300), snapshot(12, 100), snapshot(13, 200)],
                },
                StimulusSeries {
                    name: "work".to_string(),
                    snapshots: vec![snapshot(21, 400)],
                },
            ],
        }
    }

    fn insight(secs: i64, text: &str) -> Insight {
        Insight {
            created_at: ts(secs),
            text: text.to_string(),
        }
    }

    #[test]
    fn selecting_a_stimulus_sorts_snapshots_and_resets_the_cursor() {
        let mut pager = StimulusPaginator::new();
        let stim_id = pager.select_stimulus("rain", &catalog());
        assert_eq!(stim_id, Some(12)); // earliest snapshot after the sort
        assert_eq!(pager.cursor(), 0);
        let times: Vec<_> = pager.snapshots().iter().map(|s| s.created_at).collect();
        assert_eq!(times, vec![ts(100), ts(200), ts(300)]);
    }

    #[test]
    fn snapshot_sort_is_idempotent() {
        let mut pager = StimulusPaginator::new();
        pager.select_stimulus("rain", &catalog());
        let first = pager.snapshots().to_vec();
        pager.select_stimulus("rain", &catalog());
        assert_eq!(pager.snapshots(), first.as_slice());
    }

    #[test]
    fn empty_key_yields_a_no_data_state() {
        let mut pager = StimulusPaginator::new();
        pager.select_stimulus("rain", &catalog());
        assert!(pager.has_data());
        assert_eq!(pager.select_stimulus("", &catalog()), None);
        assert!(!pager.has_data());
        assert_eq!(pager.stimulus_key(), None);
        assert!(!pager.advance(1));
    }

    #[test]
    fn unknown_key_yields_a_no_data_state() {
        let mut pager = StimulusPaginator::new();
        assert_eq!(pager.select_stimulus("volcano", &catalog()), None);
        assert_eq!(pager.stimulus_key(), Some("volcano"));
        assert!(!pager.has_data());
    }

    #[test]
    fn advance_clamps_to_the_snapshot_range() {
        let mut pager = StimulusPaginator::new();
        pager.select_stimulus("rain", &catalog());
        assert!(!pager.advance(-1)); // already at the left boundary
        assert!(pager.advance(1));
        assert!(pager.advance(1));
        assert_eq!(pager.cursor(), 2);
        assert!(!pager.advance(1)); // right boundary
        assert_eq!(pager.cursor(), 2);
        assert_eq!(pager.position_label(), "3 / 3");
    }

    #[test]
    fn lockstep_cursor_tolerates_a_shorter_insight_list() {
        let mut pager = StimulusPaginator::new();
        pager.select_stimulus("rain", &catalog());
        pager.set_insights(vec![insight(100, "only one")]);
        assert!(pager.advance(1));
        assert!(pager.advance(1));
        assert_eq!(pager.cursor(), 2);
        assert!(pager.current_snapshot().is_some());
        assert_eq!(pager.current_insight(), None);
    }

    #[test]
    fn insights_are_sorted_defensively() {
        let mut pager = StimulusPaginator::new();
        pager.select_stimulus("rain", &catalog());
        pager.set_insights(vec![insight(200, "later"), insight(100, "earlier")]);
        assert_eq!(pager.current_insight().unwrap().text, "earlier");
    }

    #[test]
    fn hint_resolution_prefers_exact_name() {
        let mut pager = StimulusPaginator::new();
        pager.initialize_from_hint("work", &catalog());
        assert_eq!(pager.stimulus_key(), Some("work"));
    }

    #[test]
    fn hint_resolution_falls_back_to_stim_id() {
        let mut pager = StimulusPaginator::new();
        pager.initialize_from_hint("13", &catalog());
        assert_eq!(pager.stimulus_key(), Some("rain"));
    }

    #[test]
    fn hint_resolution_falls_back_to_the_first_stimulus() {
        let mut pager = StimulusPaginator::new();
        pager.initialize_from_hint("no-such-stimulus", &catalog());
        assert_eq!(pager.stimulus_key(), Some("rain"));
    }

    #[test]
    fn hint_resolution_on_an_empty_catalog_selects_nothing() {
        let mut pager = StimulusPaginator::new();
        assert_eq!(
            pager.initialize_from_hint("rain", &EmotionCatalog::default()),
            None
        );
        assert_eq!(pager.stimulus_key(), None);
    }
}
