//! Clients of the holder name server endpoints.

mod message;
mod session;

pub use message::{MESSAGE_PATH, MessageService};
pub use session::{
    SAVE_SESSION_PATH, SESSION_PATH, ServerVerdict, SessionFetch, SessionService,
    VALIDATE_NAME_PATH,
};

use url::Url;

use crate::HolderNameError;

/// Resolves endpoint paths against the configured base url.
///
/// Paths keep the base's own path as a prefix, so a deployment under
/// `https://host/app/` reaches `https://host/app/holderName/session`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    base_url: Url,
}

impl Endpoints {
    pub fn new(base_url: &str) -> Result<Self, HolderNameError> {
        let mut url = Url::parse(base_url).map_err(|e| {
            HolderNameError::InvalidConfig(format!("invalid base url '{base_url}': {e}"))
        })?;
        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(HolderNameError::InvalidConfig(format!(
                "base url must be an absolute http(s) url, got '{base_url}'"
            )));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(HolderNameError::InvalidConfig(format!(
                "base url must not carry a query or fragment, got '{base_url}'"
            )));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(Endpoints { base_url: url })
    }

    pub fn url(&self, path: &str) -> Result<Url, HolderNameError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| HolderNameError::Generic(format!("invalid endpoint path '{path}': {e}")))
    }
}
