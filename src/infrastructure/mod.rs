//! Adapters for the domain ports: HTTP transport and audit sinks.

pub mod file_audit;
pub mod http_transport;
pub mod in_memory;
