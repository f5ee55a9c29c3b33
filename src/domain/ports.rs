use super::audit::AuditEntry;
use super::delivery::{OutboundRequest, TransportResponse};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Performs exactly one HTTP round trip.
///
/// Any response, whatever its status, is `Ok`. `Err` means no response was
/// received.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &OutboundRequest) -> Result<TransportResponse>;
}

/// Destination for audit entries.
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn record(&self, entry: AuditEntry) -> Result<()>;
}

pub type TransportBox = Box<dyn Transport>;
pub type AuditSinkRef = Arc<dyn AuditSink>;
