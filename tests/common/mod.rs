#![allow(dead_code)]

use order_bridge::application::coordinator::RetryPolicy;
use order_bridge::application::pipeline::{DeliveryTarget, Pipeline};
use order_bridge::infrastructure::http_transport::ReqwestTransport;
use order_bridge::infrastructure::in_memory::MemoryAuditSink;
use std::sync::Arc;
use std::time::Duration;

pub const SOAP_ACTION: &str = "http://tempuri.org/CreateOrder";

pub const MINIMAL_ORDER: &str = r#"{
    "id": 12345,
    "order_number": 1001,
    "total_price": "150.00",
    "line_items": [{"sku": "TEST-SKU-001", "quantity": 2, "price": "65.00"}]
}"#;

pub fn full_order() -> String {
    serde_json::json!({
        "id": 820982911946154508_i64,
        "order_number": 1234,
        "email": "jon@example.com",
        "created_at": "2024-03-01T10:00:00-05:00",
        "total_price": "199.65",
        "subtotal_price": "179.65",
        "total_tax": "20.00",
        "currency": "USD",
        "financial_status": "paid",
        "fulfillment_status": null,
        "customer": {"id": 1, "first_name": "Jon", "last_name": "Snow", "phone": "555-0100"},
        "line_items": [
            {"sku": "A-1", "title": "Fish & Chips", "quantity": 1, "price": "9.99", "variant_title": "Large"},
            {"sku": "B-2", "title": "<Special>", "quantity": 3, "price": "5.00", "variant_title": null},
            {"sku": "C-3", "title": "Tom's \"Best\"", "quantity": 0, "price": "0.00"}
        ],
        "shipping_address": {
            "first_name": "Jon", "last_name": "Snow", "address1": "1 Wall St",
            "city": "Winterfell", "province": "North", "zip": "00001", "country": "Westeros"
        },
        "billing_address": {"first_name": "", "last_name": "Stark", "company": "Stark & Sons"}
    })
    .to_string()
}

pub fn pipeline_for(endpoint: String, sink: &MemoryAuditSink, max_attempts: u32) -> Pipeline {
    Pipeline::new(
        DeliveryTarget {
            endpoint,
            soap_action: SOAP_ACTION.to_string(),
        },
        RetryPolicy::new(max_attempts, Duration::from_millis(10)),
        Box::new(ReqwestTransport::new(Duration::from_secs(5)).expect("Failed to build client")),
        Arc::new(sink.clone()),
    )
}
