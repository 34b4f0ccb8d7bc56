use std::collections::HashMap;
use std::sync::Arc;

use platform_utils::HttpClient;
use tracing::{debug, warn};

use super::Endpoints;
use crate::csrf::CsrfToken;
use crate::utils::percent_encode::encode_pairs;
use crate::validation::ValidatedHolderName;
use crate::{Field, FieldError, HolderNameError, Navigation, SessionContext};

pub const SESSION_PATH: &str = "/holderName/session";
pub const SAVE_SESSION_PATH: &str = SESSION_PATH;
pub const VALIDATE_NAME_PATH: &str = "/holderName/valName";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_CONTENT_TYPE: &str = "application/json";

/// What the session endpoint answered on page load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionFetch {
    Loaded(SessionContext),
    /// A 2xx answer that is not JSON, e.g. a login redirect
    Redirect(Navigation),
    /// A non-2xx answer; the form starts empty
    Unavailable { status: u16 },
}

/// Server-side verdict on a syntactically valid name.
///
/// The endpoint answers with an empty body on success, or
/// `<messageId>[:<FIELD>]` on failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ServerVerdict {
    Accepted,
    /// Rejected for a specific field; the submission stops
    Rejected(FieldError),
    /// Rejected without a field; shown on the first name and the
    /// submission continues
    Unscoped(FieldError),
    /// A field marker that is neither `FIRST` nor `LAST`; nothing is shown
    /// and the submission continues
    UnknownField { message_id: String, field: String },
}

impl ServerVerdict {
    pub fn parse(body: &str) -> Self {
        if body.is_empty() {
            return ServerVerdict::Accepted;
        }
        let mut parts = body.split(':');
        let message_id = parts.next().unwrap_or_default();
        match parts.next() {
            None => ServerVerdict::Unscoped(FieldError::new(None, message_id)),
            Some(field) => match field.parse::<Field>() {
                Ok(field) => ServerVerdict::Rejected(FieldError::new(Some(field), message_id)),
                Err(_) => ServerVerdict::UnknownField {
                    message_id: message_id.to_string(),
                    field: field.to_string(),
                },
            },
        }
    }
}

/// Client of the `/holderName/*` endpoints.
pub struct SessionService {
    http_client: Arc<dyn HttpClient>,
    endpoints: Endpoints,
    csrf: Option<CsrfToken>,
}

impl SessionService {
    pub(crate) fn new(
        http_client: Arc<dyn HttpClient>,
        endpoints: Endpoints,
        csrf: Option<CsrfToken>,
    ) -> Self {
        if csrf.is_none() {
            warn!("No CSRF token available, state-changing requests are sent without it");
        }
        SessionService {
            http_client,
            endpoints,
            csrf,
        }
    }

    fn form_headers(&self) -> HashMap<String, String> {
        let mut headers = HashMap::from([(
            "Content-Type".to_string(),
            FORM_CONTENT_TYPE.to_string(),
        )]);
        if let Some(csrf) = &self.csrf {
            headers.insert(csrf.header_name.clone(), csrf.token.clone());
        }
        headers
    }

    pub async fn fetch_session(&self) -> Result<SessionFetch, HolderNameError> {
        let response = self
            .http_client
            .get(self.endpoints.url(SESSION_PATH)?.into(), None)
            .await?;
        if !response.is_success() {
            warn!("Session fetch answered with status {}", response.status);
            return Ok(SessionFetch::Unavailable {
                status: response.status,
            });
        }

        let is_json = response
            .header("content-type")
            .is_some_and(|content_type| content_type.contains(JSON_CONTENT_TYPE));
        if !is_json {
            let navigation = match response.header("location") {
                Some(location) if !location.is_empty() => Navigation::Redirect {
                    location: location.to_string(),
                },
                _ => Navigation::CommonError,
            };
            debug!("Session fetch is not JSON, navigating to {}", navigation.location());
            return Ok(SessionFetch::Redirect(navigation));
        }

        let session = response
            .json::<SessionContext>()
            .map_err(|e| HolderNameError::InvalidSession(e.to_string()))?;
        Ok(SessionFetch::Loaded(session))
    }

    /// Asks the server for its semantic check of the name. Only the body is
    /// read, whatever the status.
    pub async fn validate_name(
        &self,
        name: &ValidatedHolderName,
    ) -> Result<ServerVerdict, HolderNameError> {
        let response = self
            .http_client
            .post(
                self.endpoints.url(VALIDATE_NAME_PATH)?.into(),
                Some(self.form_headers()),
                Some(encode_pairs(name.form_fields())),
            )
            .await?;
        if !response.is_success() {
            warn!("Name check answered with status {}", response.status);
        }
        let verdict = ServerVerdict::parse(&response.body);
        debug!("Server verdict: {verdict:?}");
        Ok(verdict)
    }

    /// Stores the name in the server session. The answer is not inspected.
    pub async fn save_holder_name(&self, name: &ValidatedHolderName) -> Result<(), HolderNameError> {
        let response = self
            .http_client
            .post(
                self.endpoints.url(SAVE_SESSION_PATH)?.into(),
                Some(self.form_headers()),
                Some(encode_pairs(name.form_fields())),
            )
            .await?;
        if !response.is_success() {
            warn!("Saving the holder name answered with status {}", response.status);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use macros::test_all;

    use super::ServerVerdict;
    use crate::{Field, FieldError};

    #[cfg(feature = "browser-tests")]
    wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

    #[test_all]
    fn test_parse_verdict() {
        assert_eq!(ServerVerdict::parse(""), ServerVerdict::Accepted);
        assert_eq!(
            ServerVerdict::parse("MEC01AEW99:LAST"),
            ServerVerdict::Rejected(FieldError::new(Some(Field::Last), "MEC01AEW99"))
        );
        assert_eq!(
            ServerVerdict::parse("MEC01AEW98:FIRST"),
            ServerVerdict::Rejected(FieldError::new(Some(Field::First), "MEC01AEW98"))
        );
        assert_eq!(
            ServerVerdict::parse("MEC01AEW99"),
            ServerVerdict::Unscoped(FieldError::new(None, "MEC01AEW99"))
        );
        assert_eq!(
            ServerVerdict::parse("MEC01AEW99:MIDDLE:X"),
            ServerVerdict::UnknownField {
                message_id: "MEC01AEW99".to_string(),
                field: "MIDDLE".to_string()
            }
        );
        // Field markers are matched exactly
        assert_eq!(
            ServerVerdict::parse("MEC01AEW99:last"),
            ServerVerdict::UnknownField {
                message_id: "MEC01AEW99".to_string(),
                field: "last".to_string()
            }
        );
    }
}
