use clap::Parser;
use miette::{IntoDiagnostic, Result};
use order_bridge::application::pipeline::Pipeline;
use order_bridge::config::BridgeConfig;
use order_bridge::domain::ports::{AuditSinkRef, TransportBox};
use order_bridge::infrastructure::file_audit::FileAuditSink;
use order_bridge::infrastructure::http_transport::ReqwestTransport;
use order_bridge::interfaces::http::webhook;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = BridgeConfig::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let audit: AuditSinkRef = Arc::new(FileAuditSink::open(&config.log_dir).await);
    let transport: TransportBox =
        Box::new(ReqwestTransport::new(config.request_timeout()).into_diagnostic()?);
    let pipeline = Arc::new(Pipeline::new(
        config.target(),
        config.retry_policy(),
        transport,
        audit,
    ));

    let target = pipeline.target();
    let policy = pipeline.policy();
    info!(
        port = config.port,
        erp_endpoint = %target.endpoint,
        soap_action = %target.soap_action,
        log_dir = %config.log_dir.display(),
        max_attempts = policy.max_attempts,
        retry_delay_ms = policy.base_delay.as_millis() as u64,
        "Starting order bridge"
    );

    let listener = TcpListener::bind(("0.0.0.0", config.port))
        .await
        .into_diagnostic()?;
    axum::serve(listener, webhook::router(pipeline))
        .await
        .into_diagnostic()?;

    Ok(())
}
