//! crates/journal_core/src/screens/mod.rs
//!
//! Screen controllers: one per view of the client. Each controller owns its
//! own state and exposes a small command set; the hosting layer wires
//! commands to input events and passes state to presentation. The
//! controllers never share state with each other.
//!
//! Fetches follow a request/apply protocol. A mutating command returns a
//! request token carrying the key it was issued for (date, stimulus name,
//! entry reference); the host performs the port call and hands the result
//! back to the matching `apply_*` method. At apply time the token's key is
//! compared against the current selection and stale responses are
//! discarded, so correctness never depends on cancelling in-flight
//! requests or on completion order.

pub mod calendar;
pub mod entry;
pub mod home;
pub mod stimulus;

pub use calendar::{CalendarScreen, EntriesRequest};
pub use entry::{EntryDetailScreen, EntryLookup, EntryRequest, StimuliRequest};
pub use home::HomeScreen;
pub use stimulus::{CatalogRequest, InsightsRequest, StimulusScreen};
