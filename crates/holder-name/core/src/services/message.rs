use std::sync::Arc;

use platform_utils::HttpClient;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Endpoints;
use crate::HolderNameError;

pub const MESSAGE_PATH: &str = "/api/message";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MessageResponse {
    #[serde(default)]
    pub(crate) message_text: Option<String>,
}

/// Looks up localized message texts by id.
pub struct MessageService {
    http_client: Arc<dyn HttpClient>,
    endpoints: Endpoints,
}

impl MessageService {
    pub(crate) fn new(http_client: Arc<dyn HttpClient>, endpoints: Endpoints) -> Self {
        MessageService {
            http_client,
            endpoints,
        }
    }

    /// Returns the message text, or `None` when the server knows no text for
    /// the id. The response status is not checked, only the body is.
    pub async fn lookup(
        &self,
        message_id: &str,
        locale: &str,
    ) -> Result<Option<String>, HolderNameError> {
        let mut url = self.endpoints.url(MESSAGE_PATH)?;
        url.query_pairs_mut()
            .append_pair("messageIds", message_id)
            .append_pair("locale", locale);
        let response = self.http_client.get(url.into(), None).await?;
        let message = response.json::<MessageResponse>()?;
        debug!("Resolved message {message_id} ({locale}): {message:?}");
        Ok(message.message_text.filter(|text| !text.is_empty()))
    }
}
