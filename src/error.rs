use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Malformed payload: {0}")]
    MalformedPayload(#[source] serde_json::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BridgeError>;
