//! JSONL file writer for activities.
//!
//! Each [`Activity`] is serialized as a single JSON line with a `type` field
//! and `timestamp`, appended to the file via a buffered writer. An activity
//! id already written by this log is skipped.

use async_trait::async_trait;
use stamp_application::{ActivitySink, CollaboratorError};
use stamp_domain::Activity;
use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL activity log that writes one JSON object per line.
///
/// Thread-safe via a `Mutex` around the writer. Flushes after every record
/// and on `Drop`.
pub struct JsonlActivityLog {
    state: Mutex<LogState>,
    path: PathBuf,
}

struct LogState {
    writer: BufWriter<File>,
    written: HashSet<String>,
}

impl JsonlActivityLog {
    /// Open the log at the given path, appending to an existing file.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create activity log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open activity log file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            state: Mutex::new(LogState {
                writer: BufWriter::new(file),
                written: HashSet::new(),
            }),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn line(activity: &Activity) -> Result<String, CollaboratorError> {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let mut record = serde_json::to_value(activity)
            .map_err(|e| CollaboratorError::ActivitySink(e.to_string()))?;
        if let serde_json::Value::Object(map) = &mut record {
            map.insert(
                "type".to_string(),
                serde_json::Value::String("activity".to_string()),
            );
            map.insert(
                "timestamp".to_string(),
                serde_json::Value::String(timestamp),
            );
        }

        serde_json::to_string(&record).map_err(|e| CollaboratorError::ActivitySink(e.to_string()))
    }
}

#[async_trait]
impl ActivitySink for JsonlActivityLog {
    async fn record(&self, activity: &Activity) -> Result<(), CollaboratorError> {
        let mut state = self.state.lock().map_err(|_| {
            CollaboratorError::ActivitySink("activity log lock poisoned".to_string())
        })?;
        if state.written.contains(&activity.id) {
            return Ok(());
        }

        let line = Self::line(activity)?;
        writeln!(state.writer, "{}", line)
            .and_then(|()| state.writer.flush())
            .map_err(|e| {
                CollaboratorError::ActivitySink(format!("{}: {}", self.path.display(), e))
            })?;
        state.written.insert(activity.id.clone());
        Ok(())
    }
}

impl Drop for JsonlActivityLog {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.lock() {
            let _ = state.writer.flush();
        }
    }
}
