//! Record storage.
//!
//! The calculators never persist anything. The HTTP layer keeps the records
//! a user saved behind the [`RecordStore`] trait so a durable backend can
//! replace the in-memory one.

use std::sync::RwLock;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::TimesheetRecord;

/// Storage for timesheet records.
pub trait RecordStore: Send + Sync {
    /// All stored records, in insertion order.
    fn load(&self) -> EngineResult<Vec<TimesheetRecord>>;

    /// Replaces every stored record.
    fn save(&self, records: &[TimesheetRecord]) -> EngineResult<()>;

    /// Removes every stored record.
    fn clear(&self) -> EngineResult<()>;

    /// Appends one record.
    fn append(&self, record: TimesheetRecord) -> EngineResult<()> {
        let mut records = self.load()?;
        records.push(record);
        self.save(&records)
    }
}

/// Process-local store, lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    records: RwLock<Vec<TimesheetRecord>>,
}

impl InMemoryRecordStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> EngineError {
    EngineError::StoreError {
        message: "record store lock poisoned".to_string(),
    }
}

impl RecordStore for InMemoryRecordStore {
    fn load(&self) -> EngineResult<Vec<TimesheetRecord>> {
        let records = self.records.read().map_err(|_| poisoned())?;
        Ok(records.clone())
    }

    fn save(&self, records: &[TimesheetRecord]) -> EngineResult<()> {
        let mut stored = self.records.write().map_err(|_| poisoned())?;
        *stored = records.to_vec();
        debug!(count = stored.len(), "Saved records");
        Ok(())
    }

    fn clear(&self) -> EngineResult<()> {
        self.records.write().map_err(|_| poisoned())?.clear();
        Ok(())
    }

    fn append(&self, record: TimesheetRecord) -> EngineResult<()> {
        self.records.write().map_err(|_| poisoned())?.push(record);
        Ok(())
    }
}
