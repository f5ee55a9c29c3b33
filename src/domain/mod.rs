//! Domain types: the inbound and outbound order shapes, delivery results,
//! audit entries, and the ports the application layer drives.

pub mod audit;
pub mod delivery;
pub mod inbound;
pub mod outbound;
pub mod ports;
