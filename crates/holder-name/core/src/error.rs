use platform_utils::HttpError;
use thiserror::Error;

/// Error type for the holder name controller
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HolderNameError {
    /// A request could not be completed, or the server answered with an
    /// unexpected status
    #[error("Service connectivity error: {0}")]
    ServiceConnectivity(HttpError),

    /// The session endpoint claimed JSON but sent something else
    #[error("Invalid session payload: {0}")]
    InvalidSession(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Error: {0}")]
    Generic(String),
}

impl From<HttpError> for HolderNameError {
    fn from(e: HttpError) -> Self {
        HolderNameError::ServiceConnectivity(e)
    }
}

impl From<String> for HolderNameError {
    fn from(s: String) -> Self {
        Self::Generic(s)
    }
}

impl From<&str> for HolderNameError {
    fn from(s: &str) -> Self {
        Self::Generic(s.to_string())
    }
}
