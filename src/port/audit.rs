//! Audit log port.

use async_trait::async_trait;

use crate::domain::AlertRecord;
use crate::error::Result;

/// Append-only, insertion-ordered store of alert attempts.
///
/// The engine appends exactly one row per firing decision and never
/// reads its own history when deciding whether to fire; `read_all` only
/// serves reporting.
#[async_trait]
pub trait AuditLog: Send + Sync {
    /// Append one row. Rows are never mutated or deleted.
    async fn append(&self, record: &AlertRecord) -> Result<()>;

    /// All rows, oldest first.
    async fn read_all(&self) -> Result<Vec<AlertRecord>>;
}
