pub mod domain;
pub mod fetch;
pub mod navigator;
pub mod paginator;
pub mod ports;
pub mod screens;

pub use domain::{
    AdviceCard, EmotionCatalog, EmotionVector, Entry, EntryStimulus, Insight, StimulusSeries,
    StimulusSnapshot, TopStimulus, EMOTION_LABELS,
};
pub use fetch::FetchState;
pub use navigator::{week_start_of, CalendarNavigator, VisibleDay, WEEKDAY_NAMES};
pub use paginator::StimulusPaginator;
pub use ports::{JournalApi, PortError, PortResult};
pub use screens::{
    CalendarScreen, EntryDetailScreen, EntryLookup, HomeScreen, StimulusScreen,
};
