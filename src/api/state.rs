//! Application state for the Timesheet Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::calculation::TimesheetEngine;
use crate::config::ConfigLoader;
use crate::store::{InMemoryRecordStore, RecordStore};

/// Shared application state.
///
/// Contains the loaded configuration, the calculators built from it, and
/// the record store.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    engine: Arc<TimesheetEngine>,
    store: Arc<dyn RecordStore>,
}

impl AppState {
    /// Creates a new application state backed by an in-memory record store.
    pub fn new(config: ConfigLoader) -> Self {
        Self::with_store(config, Arc::new(InMemoryRecordStore::new()))
    }

    /// Creates a new application state with the given record store.
    pub fn with_store(config: ConfigLoader, store: Arc<dyn RecordStore>) -> Self {
        let engine = TimesheetEngine::new(config.config());
        Self {
            config: Arc::new(config),
            engine: Arc::new(engine),
            store,
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the calculation engine.
    pub fn engine(&self) -> &TimesheetEngine {
        &self.engine
    }

    /// Returns the record store.
    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }
}
