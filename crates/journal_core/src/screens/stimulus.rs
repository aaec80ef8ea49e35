//! crates/journal_core/src/screens/stimulus.rs
//!
//! The stimulus/emotion exploration screen. The emotion catalog is fetched
//! once per visit; selecting a stimulus pages its snapshots out of the
//! catalog and triggers a fetch of the matching insights. The insight list
//! and the snapshot list share one cursor, so an insights response is only
//! merged while its stimulus is still the selected one.

use tracing::debug;

use crate::domain::{EmotionCatalog, Insight, StimulusSnapshot};
use crate::fetch::FetchState;
use crate::paginator::StimulusPaginator;
use crate::ports::PortResult;

/// A token for the one-per-visit catalog fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogRequest;

/// A token for one outstanding insights fetch, keyed by the stimulus it was
/// issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightsRequest {
    stimulus: String,
    stim_id: i64,
}

impl InsightsRequest {
    pub fn stimulus(&self) -> &str {
        &self.stimulus
    }

    pub fn stim_id(&self) -> i64 {
        self.stim_id
    }
}

/// Status of the insight panel. The insight list itself lives in the
/// paginator so the lockstep cursor has one owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsightPanel {
    Idle,
    Loading,
    Ready,
    /// Valid response, zero insights for this stimulus.
    Empty,
    Failed(String),
}

/// State for the stimulus-to-emotion mapping view.
pub struct StimulusScreen {
    catalog: FetchState<EmotionCatalog>,
    paginator: StimulusPaginator,
    insight_panel: InsightPanel,
    /// The stimulus an insights response is currently expected for.
    pending_insights: Option<String>,
}

impl Default for StimulusScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl StimulusScreen {
    pub fn new() -> Self {
        Self {
            catalog: FetchState::Idle,
            paginator: StimulusPaginator::new(),
            insight_panel: InsightPanel::Idle,
            pending_insights: None,
        }
    }

    pub fn catalog(&self) -> &FetchState<EmotionCatalog> {
        &self.catalog
    }

    pub fn paginator(&self) -> &StimulusPaginator {
        &self.paginator
    }

    pub fn insight_panel(&self) -> &InsightPanel {
        &self.insight_panel
    }

    /// The stimulus names available in the picker, in catalog order.
    pub fn stimulus_names(&self) -> Vec<&str> {
        match self.catalog.ready() {
            Some(catalog) => catalog.names().collect(),
            None => Vec::new(),
        }
    }

    pub fn current_snapshot(&self) -> Option<&StimulusSnapshot> {
        self.paginator.current_snapshot()
    }

    pub fn current_insight(&self) -> Option<&Insight> {
        self.paginator.current_insight()
    }

    /// Requests the emotion catalog. Suppressed while already loading.
    pub fn open(&mut self) -> Option<CatalogRequest> {
        if self.catalog.is_loading() {
            return None;
        }
        self.catalog = FetchState::Loading;
        Some(CatalogRequest)
    }

    /// Merges the catalog response and picks the initial stimulus: the
    /// deep-link hint when one was given, the first catalog entry
    /// otherwise. Returns the follow-up insights fetch, if any.
    pub fn apply_catalog(
        &mut self,
        _request: CatalogRequest,
        result: PortResult<EmotionCatalog>,
        hint: Option<&str>,
    ) -> Option<InsightsRequest> {
        let catalog = match result {
            Ok(catalog) if catalog.is_empty() => {
                self.catalog = FetchState::Empty;
                return None;
            }
            Ok(catalog) => catalog,
            Err(error) => {
                self.catalog = FetchState::from_item(Err(error));
                return None;
            }
        };
        let stim_id = match hint {
            Some(hint) => self.paginator.initialize_from_hint(hint, &catalog),
            None => match catalog.first_name() {
                Some(first) => {
                    let first = first.to_string();
                    self.paginator.select_stimulus(&first, &catalog)
                }
                None => None,
            },
        };
        self.catalog = FetchState::Ready(catalog);
        self.begin_insights(stim_id)
    }

    /// Selects a stimulus from the loaded catalog, resetting the cursor and
    /// triggering an insights fetch. An empty or unknown key leaves the
    /// screen in a no-data state without fetching.
    pub fn select_stimulus(&mut self, key: &str) -> Option<InsightsRequest> {
        let catalog = match &self.catalog {
            FetchState::Ready(catalog) => catalog,
            _ => return None,
        };
        let stim_id = self.paginator.select_stimulus(key, catalog);
        self.begin_insights(stim_id)
    }

    fn begin_insights(&mut self, stim_id: Option<i64>) -> Option<InsightsRequest> {
        let (stim_id, stimulus) = match (stim_id, self.paginator.stimulus_key()) {
            (Some(id), Some(key)) => (id, key.to_string()),
            _ => {
                self.insight_panel = InsightPanel::Idle;
                self.pending_insights = None;
                return None;
            }
        };
        // One outstanding fetch per stimulus; a different stimulus
        // supersedes, the same one is suppressed.
        if self.insight_panel == InsightPanel::Loading
            && self.pending_insights.as_deref() == Some(stimulus.as_str())
        {
            return None;
        }
        self.pending_insights = Some(stimulus.clone());
        self.insight_panel = InsightPanel::Loading;
        Some(InsightsRequest { stimulus, stim_id })
    }

    /// Merges an insights response. A response for a stimulus that is no
    /// longer selected is discarded and the method returns false.
    pub fn apply_insights(
        &mut self,
        request: InsightsRequest,
        result: PortResult<Vec<Insight>>,
    ) -> bool {
        if Some(request.stimulus.as_str()) != self.paginator.stimulus_key() {
            debug!(
                fetched = %request.stimulus,
                selected = self.paginator.stimulus_key().unwrap_or("<none>"),
                "discarding stale insights response"
            );
            return false;
        }
        self.pending_insights = None;
        match result {
            Ok(insights) if insights.is_empty() => {
                self.paginator.set_insights(Vec::new());
                self.insight_panel = InsightPanel::Empty;
            }
            Ok(insights) => {
                self.paginator.set_insights(insights);
                self.insight_panel = InsightPanel::Ready;
            }
            Err(error) => {
                self.paginator.set_insights(Vec::new());
                self.insight_panel = InsightPanel::Failed(error.to_string());
            }
        }
        true
    }

    /// Moves the shared cursor. No-op while no snapshots are loaded.
    pub fn advance(&mut self, direction: i32) -> bool {
        self.paginator.advance(direction)
    }
}
