//! # triage-history
//!
//! Local, persisted client state for the triage desk.
//!
//! - [`cache::HistoryCache`] — the ten most recent cases, replayable
//! - [`state::ClientState`]  — language preference plus history, write-through
//! - [`store`]               — file-backed and in-memory `StateStore`s

pub mod cache;
pub mod state;
pub mod store;

pub use cache::HistoryCache;
pub use state::ClientState;
pub use store::{FileStateStore, InMemoryStateStore};
