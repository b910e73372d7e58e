//! Persisted client state: language preference and case history.
//!
//! Both records are read once when the client starts and written through on
//! every mutation. Nothing else in the client touches the store.

use serde_json::Value;
use tracing::{info, warn};

use triage_contracts::{
    error::{DeskError, DeskResult},
    history::HistoryRecord,
    language::Language,
};
use triage_core::traits::StateStore;

use crate::cache::HistoryCache;

/// Store key of the language preference.
pub const LANGUAGE_KEY: &str = "triageLang";
/// Store key of the history snapshot (a JSON array, newest first).
pub const HISTORY_KEY: &str = "triageHistory";

pub struct ClientState {
    store: Box<dyn StateStore>,
    language: Language,
    history: HistoryCache,
}

impl ClientState {
    /// Read both records from `store`.
    ///
    /// Never fails: an unreadable or corrupt history is logged and treated as
    /// empty, and an unknown language falls back to English.
    pub fn load(store: Box<dyn StateStore>) -> Self {
        let language = load_language(store.as_ref());
        let history = load_history(store.as_ref());
        info!(language = %language, cases = history.len(), "client state loaded");
        Self { store, language, history }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn history(&self) -> &HistoryCache {
        &self.history
    }

    /// Switch language and persist the choice.
    pub fn set_language(&mut self, language: Language) -> DeskResult<()> {
        self.language = language;
        let encoded = encode(&language.code())?;
        self.store.save(LANGUAGE_KEY, &encoded)
    }

    /// Add a completed case and persist the full history snapshot.
    ///
    /// The in-memory history is updated even when the write fails.
    pub fn record_case(&mut self, record: HistoryRecord) -> DeskResult<()> {
        self.history.insert(record);
        let encoded = encode(self.history.list())?;
        self.store.save(HISTORY_KEY, &encoded)
    }
}

fn encode<T: serde::Serialize + ?Sized>(value: &T) -> DeskResult<String> {
    serde_json::to_string(value).map_err(|e| DeskError::Storage {
        reason: format!("failed to encode state: {}", e),
    })
}

// Accepts a JSON string (`"hi"`) or a bare code (`hi`).
fn load_language(store: &dyn StateStore) -> Language {
    let raw = match store.load(LANGUAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Language::default(),
        Err(e) => {
            warn!(error = %e, "language preference unreadable; using default");
            return Language::default();
        }
    };
    let code = serde_json::from_str::<String>(&raw).unwrap_or_else(|_| raw.clone());
    Language::from_code(&code).unwrap_or_else(|| {
        warn!(code = %code, "unknown language code; using default");
        Language::default()
    })
}

fn load_history(store: &dyn StateStore) -> HistoryCache {
    let raw = match store.load(HISTORY_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return HistoryCache::new(),
        Err(e) => {
            warn!(error = %e, "case history unreadable; starting empty");
            return HistoryCache::new();
        }
    };

    let items = match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Array(items)) => items,
        Ok(_) => {
            warn!("case history is not a list; starting empty");
            return HistoryCache::new();
        }
        Err(e) => {
            warn!(error = %e, "case history is corrupt; starting empty");
            return HistoryCache::new();
        }
    };

    let total = items.len();
    let records: Vec<HistoryRecord> = items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();
    if records.len() < total {
        warn!(skipped = total - records.len(), "ignored malformed history entries");
    }
    HistoryCache::from_records(records)
}
