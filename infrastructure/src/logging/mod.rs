//! Audit trail persistence.
//!
//! Provides [`JsonlAuditLogger`], an append-only JSONL writer implementing the
//! [`AuditLogger`](council_application::AuditLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlAuditLogger;
