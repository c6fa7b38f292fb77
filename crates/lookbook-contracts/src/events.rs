use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};

/// Everything a stylist session writes to its event log.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    SessionStarted,
    PreferencesUpdated,
    ChatReply,
    ChatFailed,
    OutfitsGenerated,
    FilterToggled,
}

impl SessionEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SessionStarted => "session_started",
            Self::PreferencesUpdated => "preferences_updated",
            Self::ChatReply => "chat_reply",
            Self::ChatFailed => "chat_failed",
            Self::OutfitsGenerated => "outfits_generated",
            Self::FilterToggled => "filter_toggled",
        }
    }
}

/// Session log in JSON Lines form.
///
/// Every line starts with `type`, `session_id` and `ts`; payload fields follow
/// and cannot shadow those three. The file is opened on the first write and
/// kept open for the rest of the session.
#[derive(Debug)]
pub struct EventLog {
    path: PathBuf,
    session_id: String,
    file: Mutex<Option<File>>,
}

impl EventLog {
    pub fn new(path: impl Into<PathBuf>, session_id: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            session_id: session_id.into(),
            file: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Appends one event. A non-object payload is stored under `data`.
    pub fn record(&self, event: SessionEvent, payload: Value) -> Result<Value> {
        let mut line = Map::new();
        line.insert("type".to_string(), Value::String(event.as_str().to_string()));
        line.insert(
            "session_id".to_string(),
            Value::String(self.session_id.clone()),
        );
        line.insert("ts".to_string(), Value::String(now_utc_iso()));
        match payload {
            Value::Object(fields) => {
                for (key, value) in fields {
                    line.entry(key).or_insert(value);
                }
            }
            Value::Null => {}
            other => {
                line.insert("data".to_string(), other);
            }
        }
        let line = Value::Object(line);
        let encoded = serde_json::to_string(&line)?;

        let mut guard = self
            .file
            .lock()
            .map_err(|_| anyhow::anyhow!("event log lock poisoned"))?;
        if guard.is_none() {
            *guard = Some(self.open()?);
        }
        if let Some(file) = guard.as_mut() {
            writeln!(file, "{encoded}")
                .with_context(|| format!("failed to append to {}", self.path.display()))?;
        }
        Ok(line)
    }

    fn open(&self) -> Result<File> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("failed to open event log {}", self.path.display()))
    }
}

pub(crate) fn now_utc_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use chrono::DateTime;
    use serde_json::{json, Value};

    use super::{EventLog, SessionEvent};

    fn read_lines(log: &EventLog) -> anyhow::Result<Vec<Value>> {
        fs::read_to_string(log.path())?
            .lines()
            .map(|line| serde_json::from_str(line).map_err(anyhow::Error::from))
            .collect()
    }

    #[test]
    fn record_writes_header_then_payload() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let log = EventLog::new(temp.path().join("logs").join("events.jsonl"), "session-123");

        let written = log.record(
            SessionEvent::FilterToggled,
            json!({ "category": "style", "value": "boho" }),
        )?;

        let lines = read_lines(&log)?;
        assert_eq!(lines, vec![written]);
        assert_eq!(lines[0]["type"], json!("filter_toggled"));
        assert_eq!(lines[0]["session_id"], json!("session-123"));
        assert_eq!(lines[0]["value"], json!("boho"));
        DateTime::parse_from_rfc3339(lines[0]["ts"].as_str().unwrap_or(""))?;
        Ok(())
    }

    #[test]
    fn payload_cannot_shadow_header_fields() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let log = EventLog::new(temp.path().join("events.jsonl"), "session-123");

        let written = log.record(
            SessionEvent::ChatReply,
            json!({ "type": "spoofed", "session_id": "other", "chars": 12 }),
        )?;
        assert_eq!(written["type"], json!("chat_reply"));
        assert_eq!(written["session_id"], json!("session-123"));
        assert_eq!(written["chars"], json!(12));
        Ok(())
    }

    #[test]
    fn events_append_in_order() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let log = EventLog::new(temp.path().join("events.jsonl"), "session-123");

        log.record(SessionEvent::SessionStarted, Value::Null)?;
        log.record(SessionEvent::ChatFailed, json!("timeout"))?;

        let lines = read_lines(&log)?;
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["type"], json!("session_started"));
        assert_eq!(lines[1]["type"], json!("chat_failed"));
        assert_eq!(lines[1]["data"], json!("timeout"));
        Ok(())
    }
}
