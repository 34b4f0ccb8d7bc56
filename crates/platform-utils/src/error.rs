//! Failures of an HTTP exchange.

use thiserror::Error;

/// What went wrong with a request, reduced to the cases callers act on.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum HttpError {
    /// The url could not be turned into a request
    #[error("Invalid url: {0}")]
    InvalidUrl(String),
    /// The server answered with a non-2xx status
    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Request timed out: {0}")]
    Timeout(String),
    /// No connection to the server could be made
    #[error("Connection failed: {0}")]
    Connect(String),
    /// The body is not the expected JSON
    #[error("Invalid JSON body: {0}")]
    Json(String),
    #[error("HTTP error: {0}")]
    Other(String),
}

impl HttpError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(not(all(target_family = "wasm", target_os = "unknown")))]
impl From<bitreq::Error> for HttpError {
    fn from(err: bitreq::Error) -> Self {
        let description = format!("{err:?}");
        match err {
            bitreq::Error::IoError(io_err) if io_err.kind() == std::io::ErrorKind::TimedOut => {
                Self::Timeout(description)
            }
            bitreq::Error::IoError(_) | bitreq::Error::AddressNotFound => {
                Self::Connect(description)
            }
            bitreq::Error::InvalidUrl(_) => Self::InvalidUrl(description),
            bitreq::Error::Other(msg) => Self::Other(msg.to_string()),
            _ => Self::Other(description),
        }
    }
}

#[cfg(all(target_family = "wasm", target_os = "unknown"))]
impl From<reqwest::Error> for HttpError {
    fn from(err: reqwest::Error) -> Self {
        let mut description = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            description.push_str(&format!(" : {cause}"));
            source = cause.source();
        }
        if let Some(status) = err.status() {
            Self::Status {
                status: status.as_u16(),
                body: description,
            }
        } else if err.is_builder() {
            Self::InvalidUrl(description)
        } else if err.is_timeout() {
            Self::Timeout(description)
        } else if err.is_connect() {
            Self::Connect(description)
        } else {
            Self::Other(description)
        }
    }
}
