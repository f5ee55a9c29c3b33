use crate::domain::audit::{AuditEntry, AuditKind};
use crate::domain::ports::AuditSink;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory audit sink.
///
/// Keeps every entry in arrival order. Cloning shares the underlying buffer,
/// so a clone can be handed to the pipeline while the original is inspected.
#[derive(Default, Clone)]
pub struct MemoryAuditSink {
    entries: Arc<RwLock<Vec<AuditEntry>>>,
}

impl MemoryAuditSink {
    /// Creates a new, empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn entries(&self) -> Vec<AuditEntry> {
        self.entries.read().await.clone()
    }

    /// Entries of one kind, in arrival order.
    pub async fn entries_of(&self, kind: AuditKind) -> Vec<AuditEntry> {
        let entries = self.entries.read().await;
        entries.iter().filter(|e| e.kind == kind).cloned().collect()
    }

    /// Entries recorded for one request id, in arrival order.
    pub async fn entries_for(&self, request_id: &str) -> Vec<AuditEntry> {
        let entries = self.entries.read().await;
        entries
            .iter()
            .filter(|e| e.request_id == request_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl AuditSink for MemoryAuditSink {
    async fn record(&self, entry: AuditEntry) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.push(entry);
        Ok(())
    }
}
