//! Common types used across regionscout modules.

/// Timestamp wrapper for consistent serialization.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Get current UTC timestamp.
pub fn now() -> Timestamp {
    chrono::Utc::now()
}

/// Identifier of a single reconciliation run, carried in logs and reports.
pub type RunId = uuid::Uuid;

/// Allocate a fresh run identifier.
pub fn new_run_id() -> RunId {
    uuid::Uuid::new_v4()
}
