use crate::domain::audit::AuditEntry;
use crate::domain::ports::AuditSink;
use crate::error::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Append-only audit log on the local filesystem.
///
/// Entries go to `<log_dir>/<YYYY-MM-DD>_<type>.log` as pretty-printed JSON
/// followed by a newline. Each entry is also echoed to the tracing output so
/// hosts with ephemeral disks keep the trail in their runtime logs.
pub struct FileAuditSink {
    log_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl FileAuditSink {
    /// Opens the sink, creating `log_dir` if needed.
    ///
    /// Falls back to the current directory when `log_dir` cannot be created.
    pub async fn open<P: AsRef<Path>>(log_dir: P) -> Self {
        let requested = log_dir.as_ref();
        let log_dir = match tokio::fs::create_dir_all(requested).await {
            Ok(()) => requested.to_path_buf(),
            Err(e) => {
                warn!(
                    log_dir = %requested.display(),
                    error = %e,
                    "Could not create log directory, falling back to current directory"
                );
                PathBuf::from(".")
            }
        };

        Self {
            log_dir,
            write_lock: Mutex::new(()),
        }
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Path of today's file for entries of `kind`.
    pub fn file_for(&self, kind: &str) -> PathBuf {
        let date = Utc::now().format("%Y-%m-%d");
        self.log_dir.join(format!("{}_{}.log", date, kind))
    }
}

#[async_trait]
impl AuditSink for FileAuditSink {
    async fn record(&self, entry: AuditEntry) -> Result<()> {
        let mut json = serde_json::to_string_pretty(&entry)?;
        info!(
            request_id = %entry.request_id,
            "LOG_ENTRY[{}]: {}",
            entry.kind.as_str(),
            json
        );

        json.push('\n');
        let path = self.file_for(entry.kind.as_str());

        let _guard = self.write_lock.lock().await;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;
        file.write_all(json.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}
