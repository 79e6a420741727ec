//! In-memory audit log for tests.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::AlertRecord;
use crate::error::{Error, Result};
use crate::port::AuditLog;

/// Append-only in-memory log; appends can be switched to fail to
/// exercise the coordinator's degraded path.
#[derive(Default)]
pub struct MemoryAuditLog {
    records: Mutex<Vec<AlertRecord>>,
    fail_appends: AtomicBool,
}

impl MemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_appends(&self, fail: bool) {
        self.fail_appends.store(fail, Ordering::SeqCst);
    }

    pub fn records(&self) -> Vec<AlertRecord> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl AuditLog for MemoryAuditLog {
    async fn append(&self, record: &AlertRecord) -> Result<()> {
        if self.fail_appends.load(Ordering::SeqCst) {
            return Err(Error::LogSink("scripted failure".into()));
        }
        self.records.lock().push(record.clone());
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<AlertRecord>> {
        Ok(self.records())
    }
}
