//! services/client/src/adapters/mock.rs
//!
//! An in-memory `JournalApi` implementation with canned data, used by the
//! integration tests and for running the shell without a backend.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use journal_core::domain::{
    AdviceCard, EmotionCatalog, Entry, EntryStimulus, Insight, TopStimulus,
};
use journal_core::ports::{JournalApi, PortError, PortResult};

/// A deterministic adapter backed by plain maps. Builder-style setters keep
/// test setup short; the `fail_*` switches simulate a dead backend per
/// operation.
#[derive(Default)]
pub struct MockJournalApi {
    entries_by_day: HashMap<NaiveDate, Vec<Entry>>,
    catalog: EmotionCatalog,
    insights_by_stim: HashMap<i64, Vec<Insight>>,
    stimuli_by_call: HashMap<i64, Vec<EntryStimulus>>,
    top_stimuli: Vec<TopStimulus>,
    affirmation: String,
    reminders: String,
    advice: Vec<AdviceCard>,
    pub fail_entries: bool,
    pub fail_insights: bool,
    pub fail_advice: bool,
}

impl MockJournalApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(mut self, date: NaiveDate, entries: Vec<Entry>) -> Self {
        self.entries_by_day.insert(date, entries);
        self
    }

    pub fn with_catalog(mut self, catalog: EmotionCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_insights(mut self, stim_id: i64, insights: Vec<Insight>) -> Self {
        self.insights_by_stim.insert(stim_id, insights);
        self
    }

    pub fn with_entry_stimuli(mut self, call_id: i64, stimuli: Vec<EntryStimulus>) -> Self {
        self.stimuli_by_call.insert(call_id, stimuli);
        self
    }

    pub fn with_top_stimuli(mut self, top: Vec<TopStimulus>) -> Self {
        self.top_stimuli = top;
        self
    }

    pub fn with_guidance(mut self, affirmation: &str, reminders: &str) -> Self {
        self.affirmation = affirmation.to_string();
        self.reminders = reminders.to_string();
        self
    }

    pub fn with_advice(mut self, advice: Vec<AdviceCard>) -> Self {
        self.advice = advice;
        self
    }
}

#[async_trait]
impl JournalApi for MockJournalApi {
    async fn entries_by_date(&self, date: NaiveDate) -> PortResult<Vec<Entry>> {
        if self.fail_entries {
            return Err(PortError::Network("mock backend offline".to_string()));
        }
        Ok(self.entries_by_day.get(&date).cloned().unwrap_or_default())
    }

    async fn entry_by_id(&self, entry_id: i64) -> PortResult<Entry> {
        if self.fail_entries {
            return Err(PortError::Network("mock backend offline".to_string()));
        }
        self.entries_by_day
            .values()
            .flatten()
            .find(|entry| entry.id == entry_id)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("Entry {} not found", entry_id)))
    }

    async fn emotion_mapping(&self) -> PortResult<EmotionCatalog> {
        Ok(self.catalog.clone())
    }

    async fn insights_by_stim_id(&self, stim_id: i64) -> PortResult<Vec<Insight>> {
        if self.fail_insights {
            return Err(PortError::Network("mock backend offline".to_string()));
        }
        Ok(self
            .insights_by_stim
            .get(&stim_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn stimuli_by_call_id(&self, call_id: i64) -> PortResult<Vec<EntryStimulus>> {
        Ok(self
            .stimuli_by_call
            .get(&call_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn top_stimuli_this_week(&self) -> PortResult<Vec<TopStimulus>> {
        Ok(self.top_stimuli.clone())
    }

    async fn todays_affirmation(&self) -> PortResult<String> {
        Ok(self.affirmation.clone())
    }

    async fn todays_reminders(&self) -> PortResult<String> {
        Ok(self.reminders.clone())
    }

    async fn todays_advice(&self) -> PortResult<Vec<AdviceCard>> {
        if self.fail_advice {
            return Err(PortError::Network("mock backend offline".to_string()));
        }
        Ok(self.advice.clone())
    }
}
