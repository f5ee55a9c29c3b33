use super::attempt::{DeliveryAttempt, DeliveryContext, soap_headers};
use super::coordinator::{DeliveryCoordinator, RetryPolicy};
use super::mapper;
use crate::domain::audit::AuditEntry;
use crate::domain::delivery::{DeliveryOutcome, Headers, OutboundRequest};
use crate::domain::inbound::InboundOrder;
use crate::domain::ports::{AuditSinkRef, TransportBox};
use crate::error::{BridgeError, Result};
use crate::interfaces::soap::envelope;
use tracing::{info, warn};

/// Where and how orders are delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryTarget {
    pub endpoint: String,
    pub soap_action: String,
}

/// The transform-and-deliver pipeline: map, encode, then deliver with retries.
///
/// A single `Pipeline` is shared by every inbound request. It keeps no
/// per-request state, so invocations are independent of each other.
pub struct Pipeline {
    target: DeliveryTarget,
    coordinator: DeliveryCoordinator,
    audit: AuditSinkRef,
}

impl Pipeline {
    pub fn new(
        target: DeliveryTarget,
        policy: RetryPolicy,
        transport: TransportBox,
        audit: AuditSinkRef,
    ) -> Self {
        let attempt = DeliveryAttempt::new(transport, audit.clone());
        Self {
            target,
            coordinator: DeliveryCoordinator::new(attempt, policy),
            audit,
        }
    }

    pub fn target(&self) -> &DeliveryTarget {
        &self.target
    }

    pub fn policy(&self) -> RetryPolicy {
        self.coordinator.policy()
    }

    /// Parses a raw webhook body and records its receipt.
    ///
    /// A body that is not a structurally valid order is rejected with
    /// [`BridgeError::MalformedPayload`] and nothing is recorded.
    pub async fn receive(
        &self,
        request_id: &str,
        headers: Headers,
        raw_body: &[u8],
    ) -> Result<InboundOrder> {
        let order = InboundOrder::from_slice(raw_body).map_err(BridgeError::MalformedPayload)?;

        info!(
            request_id = %request_id,
            order_id = order.id,
            order_number = order.order_number,
            "Processing order"
        );

        let entry = AuditEntry::incoming_webhook(request_id, headers, raw_body, &order.id.to_string());
        if let Err(e) = self.audit.record(entry).await {
            warn!(request_id = %request_id, error = %e, "Failed to write audit entry");
        }

        Ok(order)
    }

    /// Maps, encodes and delivers one order.
    ///
    /// Runs to a terminal outcome: delivered on the first 2xx, failed once the
    /// attempt budget is spent.
    pub async fn deliver(&self, order: &InboundOrder, request_id: &str) -> DeliveryOutcome {
        let outbound = mapper::map(order);
        let request = OutboundRequest {
            endpoint: self.target.endpoint.clone(),
            headers: soap_headers(&self.target.soap_action),
            body: envelope::encode(&outbound),
        };
        let ctx = DeliveryContext {
            request_id: request_id.to_string(),
            order_id: outbound.order_id,
        };

        self.coordinator.deliver(&request, &ctx).await
    }
}
