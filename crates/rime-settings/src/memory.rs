//! In-memory configuration store.
//!
//! Holds a flat key map and hands out snapshots on `open`. Handles share
//! state, so a clone kept by a test can change values, take the store
//! offline, and inspect which keys the resolver asked for.

use crate::source::{ConfigProvider, ConfigSource};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::debug;

/// A scalar stored in a [`MemoryConfigProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    Bool(bool),
    String(String),
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}

#[derive(Debug, Clone, Error)]
#[error("config source unavailable: {0}")]
pub struct MemoryOpenError(pub String);

#[derive(Debug)]
struct MemoryState {
    values: HashMap<String, ConfigValue>,
    available: bool,
    opens: usize,
    closes: usize,
    queried: Vec<String>,
}

/// Shared handle to an in-memory store.
#[derive(Debug, Clone)]
pub struct MemoryConfigProvider {
    state: Arc<Mutex<MemoryState>>,
}

impl Default for MemoryConfigProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryConfigProvider {
    /// An empty, available store.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MemoryState {
                values: HashMap::new(),
                available: true,
                opens: 0,
                closes: 0,
                queried: Vec::new(),
            })),
        }
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store a value at a flat key.
    pub fn set<V: Into<ConfigValue>>(&self, key: &str, value: V) {
        self.state().values.insert(key.to_string(), value.into());
    }

    /// Builder-style [`set`](Self::set).
    pub fn with<V: Into<ConfigValue>>(self, key: &str, value: V) -> Self {
        self.set(key, value);
        self
    }

    pub fn remove(&self, key: &str) {
        self.state().values.remove(key);
    }

    /// When unavailable, `open` fails.
    pub fn set_available(&self, available: bool) {
        self.state().available = available;
    }

    /// Number of successful opens so far.
    pub fn open_count(&self) -> usize {
        self.state().opens
    }

    /// Number of explicit closes so far.
    pub fn close_count(&self) -> usize {
        self.state().closes
    }

    /// Every key read through an opened source, in query order.
    pub fn queried_keys(&self) -> Vec<String> {
        self.state().queried.clone()
    }

    pub fn clear_queried_keys(&self) {
        self.state().queried.clear();
    }
}

impl ConfigProvider for MemoryConfigProvider {
    type Source = MemoryConfigSource;
    type Error = MemoryOpenError;

    fn open(&self, name: &str) -> Result<Self::Source, Self::Error> {
        let mut state = self.state();
        if !state.available {
            return Err(MemoryOpenError(name.to_string()));
        }
        state.opens += 1;
        debug!(source = name, keys = state.values.len(), "Opened in-memory config source");
        Ok(MemoryConfigSource {
            values: state.values.clone(),
            state: Arc::clone(&self.state),
        })
    }
}

/// Snapshot of a [`MemoryConfigProvider`] taken at `open`.
#[derive(Debug)]
pub struct MemoryConfigSource {
    values: HashMap<String, ConfigValue>,
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryConfigSource {
    fn record(&self, key: &str) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .queried
            .push(key.to_string());
    }
}

impl ConfigSource for MemoryConfigSource {
    fn get_bool(&self, key: &str) -> Option<bool> {
        self.record(key);
        match self.values.get(key) {
            Some(ConfigValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    fn get_string(&self, key: &str) -> Option<String> {
        self.record(key);
        match self.values.get(key) {
            Some(ConfigValue::String(s)) => Some(s.clone()),
            _ => None,
        }
    }

    fn has_item(&self, key: &str) -> bool {
        self.record(key);
        let prefix = format!("{key}/");
        self.values
            .keys()
            .any(|k| k == key || k.starts_with(&prefix))
    }

    fn close(self) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .closes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_reads() {
        let provider = MemoryConfigProvider::new()
            .with("style/horizontal", true)
            .with("style/cursor_type", "select");
        let source = provider.open("ibus_rime").unwrap();

        assert_eq!(source.get_bool("style/horizontal"), Some(true));
        assert_eq!(source.get_string("style/cursor_type"), Some("select".into()));
        // Wrong type reads as absent.
        assert_eq!(source.get_string("style/horizontal"), None);
        assert_eq!(source.get_bool("style/cursor_type"), None);
        assert_eq!(source.get_bool("style/missing"), None);
    }

    #[test]
    fn test_has_item_matches_sections() {
        let provider =
            MemoryConfigProvider::new().with("app_options/foo/style/inline_preedit", false);
        let source = provider.open("ibus_rime").unwrap();

        assert!(source.has_item("app_options/foo"));
        assert!(source.has_item("app_options"));
        assert!(source.has_item("app_options/foo/style/inline_preedit"));
        assert!(!source.has_item("app_options/fo"));
        assert!(!source.has_item("app_options/bar"));
    }

    #[test]
    fn test_unavailable_open_fails() {
        let provider = MemoryConfigProvider::new();
        provider.set_available(false);
        assert!(provider.open("ibus_rime").is_err());
        assert_eq!(provider.open_count(), 0);

        provider.set_available(true);
        assert!(provider.open("ibus_rime").is_ok());
        assert_eq!(provider.open_count(), 1);
    }

    #[test]
    fn test_source_is_a_snapshot() {
        let provider = MemoryConfigProvider::new().with("style/inline_preedit", true);
        let source = provider.open("ibus_rime").unwrap();
        provider.set("style/inline_preedit", false);

        assert_eq!(source.get_bool("style/inline_preedit"), Some(true));
        source.close();
        assert_eq!(provider.close_count(), 1);
        assert_eq!(provider.queried_keys(), vec!["style/inline_preedit".to_string()]);
    }
}
