//! crates/journal_core/src/domain.rs
//!
//! Defines the pure, core data structures for the journaling client.
//! These structs are independent of any transport or serialization format.

use chrono::{DateTime, Utc};

/// The fixed emotion labels used across the domain, in display order.
pub const EMOTION_LABELS: [&str; 6] = ["anger", "fear", "joy", "love", "sadness", "surprise"];

/// One intensity value per emotion label, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EmotionVector {
    pub anger: f64,
    pub fear: f64,
    pub joy: f64,
    pub love: f64,
    pub sadness: f64,
    pub surprise: f64,
}

impl EmotionVector {
    /// Returns the intensities paired with their labels, in `EMOTION_LABELS` order.
    pub fn labeled(&self) -> [(&'static str, f64); 6] {
        [
            ("anger", self.anger),
            ("fear", self.fear),
            ("joy", self.joy),
            ("love", self.love),
            ("sadness", self.sadness),
            ("surprise", self.surprise),
        ]
    }
}

/// Represents one journal record. The backend owns these; the client holds a
/// read-only, date-scoped list.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub raw_text: String,
    pub insight: String,
}

/// One emotion measurement for a stimulus at a point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct StimulusSnapshot {
    pub stim_id: i64,
    pub created_at: DateTime<Utc>,
    pub emotions: EmotionVector,
}

/// A short textual reflection tied to a stimulus occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct Insight {
    pub created_at: DateTime<Utc>,
    pub text: String,
}

/// All snapshots recorded for one named stimulus.
#[derive(Debug, Clone, PartialEq)]
pub struct StimulusSeries {
    pub name: String,
    pub snapshots: Vec<StimulusSnapshot>,
}

/// The full stimulus-to-snapshots mapping, order-preserving so that "the
/// first stimulus in the catalog" is deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmotionCatalog {
    pub stimuli: Vec<StimulusSeries>,
}

impl EmotionCatalog {
    pub fn is_empty(&self) -> bool {
        self.stimuli.is_empty()
    }

    /// Looks up a series by its stimulus name.
    pub fn series(&self, name: &str) -> Option<&StimulusSeries> {
        self.stimuli.iter().find(|s| s.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.stimuli.iter().map(|s| s.name.as_str())
    }

    pub fn first_name(&self) -> Option<&str> {
        self.stimuli.first().map(|s| s.name.as_str())
    }
}

/// A weekly aggregate for one stimulus: how often it was mentioned and the
/// averaged, normalized emotion profile.
#[derive(Debug, Clone, PartialEq)]
pub struct TopStimulus {
    pub name: String,
    pub mentions: u32,
    pub emotions: EmotionVector,
}

/// A stimulus summary attached to a single journal entry.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryStimulus {
    pub name: String,
    pub emotions: EmotionVector,
}

/// One titled piece of generated advice shown on the home screen.
#[derive(Debug, Clone, PartialEq)]
pub struct AdviceCard {
    pub title: String,
    pub body: String,
}
