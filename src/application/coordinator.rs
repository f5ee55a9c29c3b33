use super::attempt::{DeliveryAttempt, DeliveryContext};
use crate::domain::delivery::{AttemptFailure, AttemptResult, DeliveryOutcome, OutboundRequest};
use std::time::Duration;
use tracing::{debug, error, info, warn};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Fixed attempt budget with linear backoff.
///
/// The wait after failed attempt `k` is `k * base_delay`. There is no jitter
/// and no cap, and every failure is retried the same way whatever its status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Delay between attempt `attempt` and attempt `attempt + 1`.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }
}

/// States of a single delivery.
#[derive(Debug, Clone, PartialEq)]
pub enum DeliveryState {
    Pending,
    Attempting {
        attempt: u32,
    },
    Succeeded {
        attempts: u32,
        status_code: u16,
        body: String,
    },
    Exhausted {
        attempts: u32,
        last_error: AttemptFailure,
    },
}

impl DeliveryState {
    /// The outcome of a terminal state, `None` while still in flight.
    pub fn outcome(&self) -> Option<DeliveryOutcome> {
        match self {
            DeliveryState::Succeeded {
                attempts,
                status_code,
                body,
            } => Some(DeliveryOutcome::Delivered {
                status_code: *status_code,
                response_body: body.clone(),
                attempts: *attempts,
            }),
            DeliveryState::Exhausted {
                attempts,
                last_error,
            } => Some(DeliveryOutcome::Failed {
                last_error: last_error.clone(),
                attempts_made: *attempts,
            }),
            DeliveryState::Pending | DeliveryState::Attempting { .. } => None,
        }
    }
}

/// Drives [`DeliveryAttempt`]s until one succeeds or the budget runs out.
///
/// Holds no per-delivery state, so one coordinator serves concurrent
/// deliveries. Attempts within one delivery are strictly sequential.
pub struct DeliveryCoordinator {
    attempt: DeliveryAttempt,
    policy: RetryPolicy,
}

impl DeliveryCoordinator {
    pub fn new(attempt: DeliveryAttempt, policy: RetryPolicy) -> Self {
        Self { attempt, policy }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    pub async fn deliver(&self, request: &OutboundRequest, ctx: &DeliveryContext) -> DeliveryOutcome {
        let mut state = DeliveryState::Pending;
        loop {
            if let Some(outcome) = state.outcome() {
                return outcome;
            }
            let next = self.step(state, request, ctx).await;
            debug!(request_id = %ctx.request_id, state = ?next, "Delivery state transition");
            state = next;
        }
    }

    async fn step(
        &self,
        state: DeliveryState,
        request: &OutboundRequest,
        ctx: &DeliveryContext,
    ) -> DeliveryState {
        let attempt = match state {
            DeliveryState::Pending => return DeliveryState::Attempting { attempt: 1 },
            DeliveryState::Attempting { attempt } => attempt,
            terminal => return terminal,
        };

        info!(
            request_id = %ctx.request_id,
            endpoint = %request.endpoint,
            attempt,
            "Sending SOAP request"
        );

        let failure = match self.attempt.attempt(request, ctx).await {
            AttemptResult::Ok { status_code, body } => {
                info!(
                    request_id = %ctx.request_id,
                    order_id = %ctx.order_id,
                    attempt,
                    status_code,
                    "Order delivered to ERP"
                );
                return DeliveryState::Succeeded {
                    attempts: attempt,
                    status_code,
                    body,
                };
            }
            AttemptResult::TransportError { cause } => AttemptFailure::Transport { cause },
            AttemptResult::HttpError { status_code, body } => {
                AttemptFailure::Http { status_code, body }
            }
        };

        if attempt >= self.policy.max_attempts {
            error!(
                request_id = %ctx.request_id,
                order_id = %ctx.order_id,
                attempts = attempt,
                error = %failure,
                "Delivery attempts exhausted"
            );
            return DeliveryState::Exhausted {
                attempts: attempt,
                last_error: failure,
            };
        }

        let delay = self.policy.delay_after(attempt);
        warn!(
            request_id = %ctx.request_id,
            attempt,
            delay_ms = delay.as_millis() as u64,
            error = %failure,
            "Attempt failed, retrying"
        );
        tokio::time::sleep(delay).await;

        DeliveryState::Attempting {
            attempt: attempt + 1,
        }
    }
}
