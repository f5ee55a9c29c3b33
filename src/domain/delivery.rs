use std::collections::BTreeMap;
use std::fmt;

/// Multi-valued header map, ordered by name for stable audit output.
pub type Headers = BTreeMap<String, Vec<String>>;

/// Flattens `(name, raw value)` header pairs into [`Headers`].
///
/// Names are kept as given. Repeated names accumulate their values in
/// order, and values that are not valid UTF-8 are converted lossily.
pub fn headers_from<'a, I>(pairs: I) -> Headers
where
    I: IntoIterator<Item = (&'a str, &'a [u8])>,
{
    let mut headers = Headers::new();
    for (name, value) in pairs {
        headers
            .entry(name.to_string())
            .or_default()
            .push(String::from_utf8_lossy(value).into_owned());
    }
    headers
}

/// A single HTTP POST to the remote endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundRequest {
    pub endpoint: String,
    pub headers: Headers,
    pub body: String,
}

/// Whatever the remote endpoint answered, regardless of status.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransportResponse {
    pub status_code: u16,
    pub headers: Headers,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// Classification of one delivery attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptResult {
    /// A 2xx response. The body is not inspected.
    Ok { status_code: u16, body: String },
    /// No response was received (connection refused, timeout, DNS failure).
    TransportError { cause: String },
    /// A response outside 200..=299.
    HttpError { status_code: u16, body: String },
}

/// The failure half of [`AttemptResult`], kept as the last error once the
/// retry budget runs out.
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptFailure {
    Transport { cause: String },
    Http { status_code: u16, body: String },
}

impl fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptFailure::Transport { cause } => write!(f, "transport error: {}", cause),
            AttemptFailure::Http { status_code, body } => {
                write!(f, "status {}: {}", status_code, body)
            }
        }
    }
}

/// Terminal result of one pipeline invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum DeliveryOutcome {
    Delivered {
        status_code: u16,
        response_body: String,
        attempts: u32,
    },
    Failed {
        last_error: AttemptFailure,
        attempts_made: u32,
    },
}

impl DeliveryOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryOutcome::Delivered { .. })
    }

    pub fn attempts(&self) -> u32 {
        match self {
            DeliveryOutcome::Delivered { attempts, .. } => *attempts,
            DeliveryOutcome::Failed { attempts_made, .. } => *attempts_made,
        }
    }
}
