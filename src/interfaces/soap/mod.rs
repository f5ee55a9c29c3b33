//! SOAP wire format for the ERP `CreateOrder` operation.

pub mod envelope;
