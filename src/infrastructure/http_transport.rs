use crate::domain::delivery::{Headers, OutboundRequest, TransportResponse, headers_from};
use crate::domain::ports::Transport;
use crate::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::HeaderMap;
use std::time::Duration;
use tracing::warn;

/// [`Transport`] backed by a pooled `reqwest` client.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Builds a client whose requests fail after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

fn collect_headers(map: &HeaderMap) -> Headers {
    headers_from(map.iter().map(|(name, value)| (name.as_str(), value.as_bytes())))
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &OutboundRequest) -> Result<TransportResponse> {
        let mut builder = self.client.post(&request.endpoint);
        for (name, values) in &request.headers {
            for value in values {
                builder = builder.header(name.as_str(), value.as_str());
            }
        }

        let response = builder.body(request.body.clone()).send().await?;

        let status_code = response.status().as_u16();
        let headers = collect_headers(response.headers());
        // A body that fails to stream still counts as a received response.
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(
                    endpoint = %request.endpoint,
                    status_code,
                    error = %e,
                    "Failed to read response body"
                );
                String::new()
            }
        };

        Ok(TransportResponse {
            status_code,
            headers,
            body,
        })
    }
}
