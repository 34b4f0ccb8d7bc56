use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

#[derive(Clone, Debug, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub base_url: String,
    pub default_locale: String,
    pub fallback_message: String,
}

impl From<Config> for holder_name::Config {
    fn from(val: Config) -> Self {
        holder_name::Config {
            base_url: val.base_url,
            default_locale: val.default_locale,
            fallback_message: val.fallback_message,
        }
    }
}

impl From<holder_name::Config> for Config {
    fn from(val: holder_name::Config) -> Self {
        Config {
            base_url: val.base_url,
            default_locale: val.default_locale,
            fallback_message: val.fallback_message,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct FormContext {
    pub csrf_header: Option<String>,
    pub csrf_token: Option<String>,
    pub locale: Option<String>,
    pub first_name_placeholder: String,
    pub last_name_placeholder: String,
}

impl From<FormContext> for holder_name::FormContext {
    fn from(val: FormContext) -> Self {
        let csrf = match (val.csrf_header, val.csrf_token) {
            (Some(header_name), Some(token)) => {
                Some(holder_name::CsrfToken::new(&header_name, &token))
            }
            _ => None,
        };
        holder_name::FormContext {
            csrf,
            locale: val.locale,
            first_name_placeholder: val.first_name_placeholder,
            last_name_placeholder: val.last_name_placeholder,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "UPPERCASE")]
pub enum Field {
    First,
    Last,
}

impl From<Field> for holder_name::Field {
    fn from(val: Field) -> Self {
        match val {
            Field::First => holder_name::Field::First,
            Field::Last => holder_name::Field::Last,
        }
    }
}

impl From<holder_name::Field> for Field {
    fn from(val: holder_name::Field) -> Self {
        match val {
            holder_name::Field::First => Field::First,
            holder_name::Field::Last => Field::Last,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub field: Option<Field>,
    pub message_id: String,
}

impl From<holder_name::FieldError> for FieldError {
    fn from(val: holder_name::FieldError) -> Self {
        FieldError {
            field: val.field.map(Into::into),
            message_id: val.message_id,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct ErrorSlot {
    pub message: String,
    pub shown: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct NameField {
    pub value: String,
    pub placeholder: String,
    pub errored: bool,
    pub error: ErrorSlot,
}

impl From<holder_name::NameField> for NameField {
    fn from(val: holder_name::NameField) -> Self {
        NameField {
            value: val.value,
            placeholder: val.placeholder,
            errored: val.errored,
            error: ErrorSlot {
                message: val.error.message,
                shown: val.error.shown,
            },
        }
    }
}

/// Snapshot of the form, as rendered by the page.
#[derive(Clone, Debug, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    pub first_name: NameField,
    pub last_name: NameField,
    pub name_label: String,
    pub guide_image: Option<String>,
    pub name_font_color: Option<String>,
    pub transaction_type: Option<String>,
}

impl From<holder_name::NameEntryForm> for FormState {
    fn from(val: holder_name::NameEntryForm) -> Self {
        FormState {
            first_name: val.first_name.into(),
            last_name: val.last_name.into(),
            name_label: val.name_label,
            guide_image: val.guide_image,
            name_font_color: val.name_font_color,
            transaction_type: val.transaction_type,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Navigation {
    PinSetup,
    Redirect { location: String },
    CommonError,
}

impl From<holder_name::Navigation> for Navigation {
    fn from(val: holder_name::Navigation) -> Self {
        match val {
            holder_name::Navigation::PinSetup => Navigation::PinSetup,
            holder_name::Navigation::Redirect { location } => Navigation::Redirect { location },
            holder_name::Navigation::CommonError => Navigation::CommonError,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BootstrapOutcome {
    Ready,
    Navigate { location: String },
}

impl From<holder_name::BootstrapOutcome> for BootstrapOutcome {
    fn from(val: holder_name::BootstrapOutcome) -> Self {
        match val {
            holder_name::BootstrapOutcome::Ready => BootstrapOutcome::Ready,
            holder_name::BootstrapOutcome::Navigate { navigation } => BootstrapOutcome::Navigate {
                location: navigation.location().to_string(),
            },
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SubmitOutcome {
    Invalid { errors: Vec<FieldError> },
    Rejected { error: FieldError },
    Completed { navigation: Navigation, location: String },
}

impl From<holder_name::SubmitOutcome> for SubmitOutcome {
    fn from(val: holder_name::SubmitOutcome) -> Self {
        match val {
            holder_name::SubmitOutcome::Invalid { errors } => SubmitOutcome::Invalid {
                errors: errors.into_iter().map(Into::into).collect(),
            },
            holder_name::SubmitOutcome::Rejected { error } => SubmitOutcome::Rejected {
                error: error.into(),
            },
            holder_name::SubmitOutcome::Completed { navigation } => SubmitOutcome::Completed {
                location: navigation.location().to_string(),
                navigation: navigation.into(),
            },
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct LogEntry {
    pub line: String,
    pub level: String,
}
