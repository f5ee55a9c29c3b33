use super::delivery::{Headers, OutboundRequest, TransportResponse};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AuditKind {
    IncomingWebhook,
    OutgoingSoap,
    SoapResponse,
}

impl AuditKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditKind::IncomingWebhook => "incoming_webhook",
            AuditKind::OutgoingSoap => "outgoing_soap",
            AuditKind::SoapResponse => "soap_response",
        }
    }
}

/// One audit record. All records for a single webhook share `request_id`.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct AuditEntry {
    pub request_id: String,
    pub timestamp: String,
    #[serde(rename = "type")]
    pub kind: AuditKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<Headers>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

impl AuditEntry {
    fn new(kind: AuditKind, request_id: &str) -> Self {
        Self {
            request_id: request_id.to_string(),
            timestamp: now(),
            kind,
            method: None,
            url: None,
            headers: None,
            body: None,
            status_code: None,
            error: None,
            order_id: None,
        }
    }

    /// Receipt of a webhook. The body is embedded as JSON when it parses,
    /// otherwise as a string.
    pub fn incoming_webhook(
        request_id: &str,
        headers: Headers,
        raw_body: &[u8],
        order_id: &str,
    ) -> Self {
        let body = serde_json::from_slice(raw_body)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(raw_body).into_owned()));
        Self {
            method: Some("POST".to_string()),
            url: Some("/webhook".to_string()),
            headers: Some(headers),
            body: Some(body),
            order_id: non_empty(order_id),
            ..Self::new(AuditKind::IncomingWebhook, request_id)
        }
    }

    pub fn outgoing_soap(request_id: &str, request: &OutboundRequest, order_id: &str) -> Self {
        Self {
            method: Some("POST".to_string()),
            url: Some(request.endpoint.clone()),
            headers: Some(request.headers.clone()),
            body: Some(Value::String(request.body.clone())),
            order_id: non_empty(order_id),
            ..Self::new(AuditKind::OutgoingSoap, request_id)
        }
    }

    /// A response from the remote endpoint, or a transport failure that
    /// produced none (status 0 with the cause as `error`).
    pub fn soap_response(
        request_id: &str,
        response: Result<&TransportResponse, &str>,
        order_id: &str,
    ) -> Self {
        let entry = Self {
            order_id: non_empty(order_id),
            ..Self::new(AuditKind::SoapResponse, request_id)
        };
        match response {
            Ok(response) => Self {
                status_code: Some(response.status_code),
                headers: Some(response.headers.clone()),
                body: non_empty(&response.body).map(Value::String),
                ..entry
            },
            Err(cause) => Self {
                status_code: Some(0),
                error: Some(cause.to_string()),
                ..entry
            },
        }
    }
}
