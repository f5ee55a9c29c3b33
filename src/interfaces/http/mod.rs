//! Inbound HTTP surface: the webhook listener and informational endpoints.

pub mod webhook;
