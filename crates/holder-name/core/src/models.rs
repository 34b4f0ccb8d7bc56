use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Maximum combined length of the first and last name.
pub const MAX_TOTAL_LENGTH: usize = 22;

/// Message shown when a message text cannot be looked up.
pub const DEFAULT_FALLBACK_MESSAGE: &str = "エラーが発生しました";

/// Locale used when the surface does not report one.
pub const DEFAULT_LOCALE: &str = "ja";

/// Runtime configuration of the holder name form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Origin every endpoint path is resolved against, e.g. `https://card.example.com`
    pub base_url: String,
    pub default_locale: String,
    pub fallback_message: String,
}

/// Returns the configuration for a server at `base_url`.
pub fn default_config(base_url: &str) -> Config {
    Config {
        base_url: base_url.to_string(),
        default_locale: DEFAULT_LOCALE.to_string(),
        fallback_message: DEFAULT_FALLBACK_MESSAGE.to_string(),
    }
}

/// The printed cardholder name as exchanged with the session endpoints.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolderName {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Presentation overrides supplied by the session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Design {
    #[serde(default)]
    pub name_img: Option<String>,
    #[serde(default)]
    pub name_font_color: Option<String>,
}

/// Snapshot of the server session, fetched once per page load.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionContext {
    #[serde(default)]
    pub holder_name: Option<HolderName>,
    #[serde(default)]
    pub transaction_type: Option<String>,
    #[serde(default)]
    pub design: Option<Design>,
}

/// One of the two name inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Field {
    First,
    Last,
}

impl Field {
    pub fn other(self) -> Self {
        match self {
            Field::First => Field::Last,
            Field::Last => Field::First,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::First => write!(f, "FIRST"),
            Field::Last => write!(f, "LAST"),
        }
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FIRST" => Ok(Field::First),
            "LAST" => Ok(Field::Last),
            other => Err(format!("Unknown field: {other}")),
        }
    }
}

/// A validation failure, optionally scoped to one input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub field: Option<Field>,
    pub message_id: String,
}

impl FieldError {
    pub fn new(field: Option<Field>, message_id: &str) -> Self {
        FieldError {
            field,
            message_id: message_id.to_string(),
        }
    }
}

/// Where the surface has to move the browser next.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Navigation {
    /// The PIN setup step, reached after the name was stored
    PinSetup,
    /// Location announced by a non-JSON session response
    Redirect { location: String },
    /// Generic error page, used when a redirect carries no location
    CommonError,
}

impl Navigation {
    pub fn location(&self) -> &str {
        match self {
            Navigation::PinSetup => "/pinSetup",
            Navigation::Redirect { location } => location,
            Navigation::CommonError => "/commonError",
        }
    }
}

/// Result of loading the page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BootstrapOutcome {
    /// The form is populated and waits for input
    Ready,
    Navigate { navigation: Navigation },
}

/// Result of pressing the continue button.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SubmitOutcome {
    /// The client-side syntax check failed for at least one field
    Invalid { errors: Vec<FieldError> },
    /// The server rejected the name for a specific field
    Rejected { error: FieldError },
    /// The name was stored, the surface should navigate
    Completed { navigation: Navigation },
}

/// A single formatted log line forwarded to an app-provided [`Logger`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LogEntry {
    pub line: String,
    pub level: String,
}

/// Receives log statements of level INFO and above.
pub trait Logger: Send + Sync {
    fn log(&self, l: LogEntry);
}
