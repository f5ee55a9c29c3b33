use order_bridge::domain::audit::AuditKind;
use order_bridge::domain::delivery::{AttemptFailure, DeliveryOutcome, Headers};
use order_bridge::domain::inbound::InboundOrder;
use order_bridge::infrastructure::in_memory::MemoryAuditSink;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

async fn bodies(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .map(|r| String::from_utf8(r.body).unwrap())
        .collect()
}

#[tokio::test]
async fn test_minimal_order_delivered_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/soap"))
        .and(header("SOAPAction", "\"http://tempuri.org/CreateOrder\""))
        .and(header("Content-Type", "text/xml; charset=utf-8"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<ok/>"))
        .expect(1)
        .mount(&server)
        .await;

    let sink = MemoryAuditSink::new();
    let pipeline = common::pipeline_for(format!("{}/soap", server.uri()), &sink, 3);
    let order = InboundOrder::from_slice(common::MINIMAL_ORDER.as_bytes()).unwrap();

    let outcome = pipeline.deliver(&order, "req-min").await;

    assert_eq!(
        outcome,
        DeliveryOutcome::Delivered {
            status_code: 200,
            response_body: "<ok/>".to_string(),
            attempts: 1
        }
    );

    let body = &bodies(&server).await[0];
    assert_eq!(body.matches("<tem:Item>").count(), 1);
    assert!(body.contains("<tem:OrderID>12345</tem:OrderID>"));
    assert!(body.contains("<tem:OrderNumber>1001</tem:OrderNumber>"));
    assert!(body.contains("<tem:TotalAmount>150.00</tem:TotalAmount>"));
    assert!(body.contains("<tem:SKU>TEST-SKU-001</tem:SKU>"));
    assert!(body.contains("<tem:Quantity>2</tem:Quantity>"));
    assert!(body.contains("<tem:UnitPrice>65.00</tem:UnitPrice>"));
}

#[tokio::test]
async fn test_success_on_second_of_three_attempts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("accepted"))
        .mount(&server)
        .await;

    let sink = MemoryAuditSink::new();
    let pipeline = common::pipeline_for(server.uri(), &sink, 3);
    let order = InboundOrder::from_slice(common::MINIMAL_ORDER.as_bytes()).unwrap();

    let outcome = pipeline.deliver(&order, "req-retry").await;

    assert!(outcome.is_delivered());
    assert_eq!(outcome.attempts(), 2);
    assert_eq!(bodies(&server).await.len(), 2);

    let statuses: Vec<_> = sink
        .entries_of(AuditKind::SoapResponse)
        .await
        .into_iter()
        .map(|e| e.status_code)
        .collect();
    assert_eq!(statuses, vec![Some(503), Some(200)]);
}

#[tokio::test]
async fn test_always_rejecting_endpoint_exhausts_budget() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad request"))
        .expect(3)
        .mount(&server)
        .await;

    let sink = MemoryAuditSink::new();
    let pipeline = common::pipeline_for(server.uri(), &sink, 3);
    let order = InboundOrder::from_slice(common::MINIMAL_ORDER.as_bytes()).unwrap();

    let outcome = pipeline.deliver(&order, "req-exhaust").await;

    assert_eq!(
        outcome,
        DeliveryOutcome::Failed {
            last_error: AttemptFailure::Http {
                status_code: 400,
                body: "bad request".to_string()
            },
            attempts_made: 3
        }
    );

    // Every attempt resends the identical envelope.
    let sent = bodies(&server).await;
    assert!(sent.iter().all(|b| b == &sent[0]));
    assert_eq!(sink.entries_of(AuditKind::OutgoingSoap).await.len(), 3);
}

#[tokio::test]
async fn test_unreachable_endpoint_fails_with_transport_error() {
    let sink = MemoryAuditSink::new();
    let pipeline = common::pipeline_for("http://127.0.0.1:1/soap".to_string(), &sink, 2);
    let order = InboundOrder::from_slice(common::MINIMAL_ORDER.as_bytes()).unwrap();

    let outcome = pipeline.deliver(&order, "req-down").await;

    assert!(matches!(
        outcome,
        DeliveryOutcome::Failed {
            last_error: AttemptFailure::Transport { .. },
            attempts_made: 2
        }
    ));
    let responses = sink.entries_of(AuditKind::SoapResponse).await;
    assert_eq!(responses.len(), 2);
    assert!(responses.iter().all(|e| e.status_code == Some(0) && e.error.is_some()));
}

#[tokio::test]
async fn test_full_order_is_escaped_and_ordered() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let sink = MemoryAuditSink::new();
    let pipeline = common::pipeline_for(server.uri(), &sink, 3);
    let raw = common::full_order();

    let order = pipeline
        .receive("req-full", Headers::new(), raw.as_bytes())
        .await
        .unwrap();
    pipeline.deliver(&order, "req-full").await;

    let body = &bodies(&server).await[0];
    assert!(body.contains("<tem:OrderID>820982911946154508</tem:OrderID>"));
    assert!(body.contains("<tem:CustomerName>Jon Snow</tem:CustomerName>"));
    assert!(body.contains("<tem:FulfillmentStatus></tem:FulfillmentStatus>"));
    assert!(body.contains("<tem:ProductName>Fish &amp; Chips</tem:ProductName>"));
    assert!(body.contains("<tem:ProductName>&lt;Special&gt;</tem:ProductName>"));
    assert!(body.contains("<tem:ProductName>Tom&#39;s &#34;Best&#34;</tem:ProductName>"));
    assert!(body.contains("<tem:Name> Stark</tem:Name>"));
    assert!(body.contains("<tem:Company>Stark &amp; Sons</tem:Company>"));
    assert!(body.contains("<tem:State>North</tem:State>"));
    assert!(body.contains("<tem:Quantity>0</tem:Quantity>"));

    let a = body.find("<tem:SKU>A-1</tem:SKU>").unwrap();
    let b = body.find("<tem:SKU>B-2</tem:SKU>").unwrap();
    let c = body.find("<tem:SKU>C-3</tem:SKU>").unwrap();
    assert!(a < b && b < c);

    let trail: Vec<_> = sink
        .entries_for("req-full")
        .await
        .into_iter()
        .map(|e| e.kind)
        .collect();
    assert_eq!(
        trail,
        vec![
            AuditKind::IncomingWebhook,
            AuditKind::OutgoingSoap,
            AuditKind::SoapResponse
        ]
    );
}

#[tokio::test]
async fn test_same_order_encodes_identically_apart_from_timestamp() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let sink = MemoryAuditSink::new();
    let pipeline = common::pipeline_for(server.uri(), &sink, 3);
    let order = InboundOrder::from_slice(common::full_order().as_bytes()).unwrap();

    pipeline.deliver(&order, "req-a").await;
    pipeline.deliver(&order.clone(), "req-b").await;

    let without_timestamp = |body: &String| -> Vec<String> {
        body.lines()
            .filter(|line| !line.contains("<tem:Timestamp>"))
            .map(str::to_string)
            .collect()
    };
    let sent = bodies(&server).await;
    assert_eq!(sent.len(), 2);
    assert_eq!(without_timestamp(&sent[0]), without_timestamp(&sent[1]));
}
