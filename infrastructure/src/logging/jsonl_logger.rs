//! Append-only JSONL audit trail.
//!
//! Every [`AuditEvent`] becomes one JSON line carrying its payload plus
//! `type` and `timestamp`. The file is opened in append mode so successive
//! runs accumulate into the same trail.

use council_application::ports::audit_logger::{AuditEvent, AuditLogger};
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Audit logger writing one JSON object per line.
pub struct JsonlAuditLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlAuditLogger {
    /// Open (or create) the trail at `path`, creating parent directories.
    ///
    /// Returns `None` when the file cannot be opened; auditing is then
    /// skipped rather than aborting the consultation.
    pub fn open(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create audit log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open audit log {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(event: AuditEvent) -> Value {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        let mut record = match event.payload {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        record.insert("type".to_string(), Value::from(event.event_type));
        record.insert("timestamp".to_string(), Value::from(timestamp));
        Value::Object(record)
    }
}

impl AuditLogger for JsonlAuditLogger {
    fn log(&self, event: AuditEvent) {
        let Ok(line) = serde_json::to_string(&Self::record(event)) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            if let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
                warn!("Could not write audit event to {}: {}", self.path.display(), e);
            }
        }
    }
}

impl Drop for JsonlAuditLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_line_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");
        let logger = JsonlAuditLogger::open(&path).unwrap();

        logger.log(AuditEvent::new(
            "diagnostic_interaction",
            json!({
                "agent": "Dr. Primary",
                "patient_id": "P-001",
                "diagnosis": "Acute Coronary Syndrome",
                "confidence": 75.0,
            }),
        ));
        logger.log(AuditEvent::new(
            "stage_completed",
            json!({"stage": "primary", "confidence": 75.0}),
        ));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["type"], "diagnostic_interaction");
        assert_eq!(records[0]["patient_id"], "P-001");
        assert_eq!(records[0]["confidence"], 75.0);
        assert!(records[0]["timestamp"].is_string());
        assert_eq!(records[1]["stage"], "primary");
    }

    #[test]
    fn test_non_object_payload_is_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");
        let logger = JsonlAuditLogger::open(&path).unwrap();

        logger.log(AuditEvent::new("note", json!("manual review requested")));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records[0]["type"], "note");
        assert_eq!(records[0]["data"], "manual review requested");
    }

    #[test]
    fn test_reopening_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("audit.jsonl");

        for _ in 0..2 {
            let logger = JsonlAuditLogger::open(&path).unwrap();
            logger.log(AuditEvent::new("transcript_entry", json!({"agent": "System"})));
        }

        assert_eq!(read_lines(&path).len(), 2);
    }

    #[test]
    fn test_unwritable_location_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();

        assert!(JsonlAuditLogger::open(blocker.join("audit.jsonl")).is_none());
    }
}
