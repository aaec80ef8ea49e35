//! services/client/src/lib.rs
//!
//! The client service: configuration, the HTTP and mock adapters for the
//! `JournalApi` port, and the shell hosting the screen controllers.

pub mod adapters;
pub mod config;
pub mod error;
pub mod shell;
