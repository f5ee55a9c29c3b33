//! Application layer containing the transform-and-deliver pipeline.
//!
//! `mapper` turns inbound orders into the ERP's shape, `attempt` performs one
//! audited round trip, `coordinator` runs the retry state machine, and
//! `pipeline` wires them together for a single webhook.

pub mod attempt;
pub mod coordinator;
pub mod mapper;
pub mod pipeline;
