//! crates/journal_core/src/screens/home.rs
//!
//! The home screen: today's affirmation, reminders, advice cards and the
//! weekly top stimuli. All four regions are independent; a failure in one
//! leaves the others intact. Nothing here can go stale (the screen has no
//! selection key), so the whole screen loads in one pass.

use crate::domain::{AdviceCard, TopStimulus};
use crate::fetch::FetchState;
use crate::ports::JournalApi;

/// State for the home view.
pub struct HomeScreen {
    affirmation: FetchState<String>,
    reminders: FetchState<String>,
    advice: FetchState<Vec<AdviceCard>>,
    top_stimuli: FetchState<Vec<TopStimulus>>,
}

impl Default for HomeScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl HomeScreen {
    pub fn new() -> Self {
        Self {
            affirmation: FetchState::Idle,
            reminders: FetchState::Idle,
            advice: FetchState::Idle,
            top_stimuli: FetchState::Idle,
        }
    }

    pub fn affirmation(&self) -> &FetchState<String> {
        &self.affirmation
    }

    pub fn reminders(&self) -> &FetchState<String> {
        &self.reminders
    }

    pub fn advice(&self) -> &FetchState<Vec<AdviceCard>> {
        &self.advice
    }

    pub fn top_stimuli(&self) -> &FetchState<Vec<TopStimulus>> {
        &self.top_stimuli
    }

    /// The stimulus name behind top card `index`, used to deep link into
    /// the stimulus screen.
    pub fn stimulus_hint(&self, index: usize) -> Option<&str> {
        self.top_stimuli
            .ready()
            .and_then(|top| top.get(index))
            .map(|stim| stim.name.as_str())
    }

    /// Fetches all four regions. Each result lands in its own region, so a
    /// single failing endpoint degrades only its own card.
    pub async fn load(&mut self, api: &dyn JournalApi) {
        self.affirmation = FetchState::Loading;
        self.reminders = FetchState::Loading;
        self.advice = FetchState::Loading;
        self.top_stimuli = FetchState::Loading;

        self.affirmation = FetchState::from_text(api.todays_affirmation().await);
        self.reminders = FetchState::from_text(api.todays_reminders().await);
        self.advice = FetchState::from_list(api.todays_advice().await);
        self.top_stimuli = FetchState::from_list(api.top_stimuli_this_week().await);
    }
}
