use crate::application::coordinator::RetryPolicy;
use crate::application::pipeline::DeliveryTarget;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ERP_ENDPOINT: &str = "https://httpbin.org/post";
pub const DEFAULT_SOAP_ACTION: &str = "http://tempuri.org/CreateOrder";

/// Runtime configuration. Every flag falls back to an environment variable,
/// then to a default.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(author, version, about = "Forwards commerce order webhooks to an ERP SOAP endpoint", long_about = None)]
pub struct BridgeConfig {
    /// Port the webhook listener binds to
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// ERP SOAP endpoint orders are posted to
    #[arg(long, env = "ERP_ENDPOINT", default_value = DEFAULT_ERP_ENDPOINT)]
    pub erp_endpoint: String,

    /// SOAPAction header value identifying the ERP operation
    #[arg(long, env = "SOAP_ACTION", default_value = DEFAULT_SOAP_ACTION)]
    pub soap_action: String,

    /// Directory for the per-day audit log files
    #[arg(long, env = "LOG_DIR", default_value = "./logs")]
    pub log_dir: PathBuf,

    /// Delivery attempts per order before giving up
    #[arg(
        long,
        env = "MAX_RETRIES",
        default_value_t = 3,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub max_attempts: u32,

    /// Base backoff in milliseconds; attempt k waits k times this
    #[arg(long, env = "RETRY_DELAY_MS", default_value_t = 2000)]
    pub retry_delay_ms: u64,

    /// Per-request timeout for calls to the ERP, in seconds
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,
}

impl BridgeConfig {
    pub fn target(&self) -> DeliveryTarget {
        DeliveryTarget {
            endpoint: self.erp_endpoint.clone(),
            soap_action: self.soap_action.clone(),
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, Duration::from_millis(self.retry_delay_ms))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
