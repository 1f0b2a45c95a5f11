//! Audit trail
//!
//! Every mutation the storage engine commits is recorded in an append-only
//! JSONL file: expense creates/updates/deletes, config and goal upserts,
//! imports and clears.
//!
//! - `AuditEntry`: one record with timestamp, operation, entity and
//!   the record itself for creates and deletes, a change summary for updates.
//! - `AuditLogger`: appends entries and reads them back.
//! - `describe_changes`: field-level summary for updates.

mod diff;
mod entry;
mod logger;

pub use diff::describe_changes;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
