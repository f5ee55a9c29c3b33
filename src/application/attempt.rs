use crate::domain::audit::AuditEntry;
use crate::domain::delivery::{AttemptResult, Headers, OutboundRequest};
use crate::domain::ports::{AuditSinkRef, TransportBox};
use tracing::warn;

pub const USER_AGENT: &str = "Order-Bridge/1.0";

/// Identifies the webhook a delivery belongs to, for audit correlation only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryContext {
    pub request_id: String,
    pub order_id: String,
}

/// Request headers for a SOAP 1.1 call. The action is sent quoted.
pub fn soap_headers(soap_action: &str) -> Headers {
    let mut headers = Headers::new();
    headers.insert(
        "Content-Type".to_string(),
        vec!["text/xml; charset=utf-8".to_string()],
    );
    headers.insert("SOAPAction".to_string(), vec![format!("\"{}\"", soap_action)]);
    headers.insert("User-Agent".to_string(), vec![USER_AGENT.to_string()]);
    headers
}

/// One audited round trip to the remote endpoint.
pub struct DeliveryAttempt {
    transport: TransportBox,
    audit: AuditSinkRef,
}

impl DeliveryAttempt {
    pub fn new(transport: TransportBox, audit: AuditSinkRef) -> Self {
        Self { transport, audit }
    }

    /// Sends `request` once and classifies the result.
    ///
    /// Records an `outgoing_soap` entry before sending and a `soap_response`
    /// entry afterwards, whether or not a response arrived.
    pub async fn attempt(&self, request: &OutboundRequest, ctx: &DeliveryContext) -> AttemptResult {
        self.record(AuditEntry::outgoing_soap(&ctx.request_id, request, &ctx.order_id))
            .await;

        match self.transport.send(request).await {
            Ok(response) => {
                self.record(AuditEntry::soap_response(
                    &ctx.request_id,
                    Ok(&response),
                    &ctx.order_id,
                ))
                .await;
                if response.is_success() {
                    AttemptResult::Ok {
                        status_code: response.status_code,
                        body: response.body,
                    }
                } else {
                    AttemptResult::HttpError {
                        status_code: response.status_code,
                        body: response.body,
                    }
                }
            }
            Err(e) => {
                let cause = e.to_string();
                self.record(AuditEntry::soap_response(
                    &ctx.request_id,
                    Err(&cause),
                    &ctx.order_id,
                ))
                .await;
                AttemptResult::TransportError { cause }
            }
        }
    }

    async fn record(&self, entry: AuditEntry) {
        let request_id = entry.request_id.clone();
        if let Err(e) = self.audit.record(entry).await {
            warn!(request_id = %request_id, error = %e, "Failed to write audit entry");
        }
    }
}
