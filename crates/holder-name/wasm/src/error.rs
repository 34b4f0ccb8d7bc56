use std::fmt::Display;

use holder_name::HolderNameError;
use serde::Serialize;
use wasm_bindgen::{JsError, JsValue};

/// Rejection value of the exported functions.
///
/// Controller failures reach JavaScript as `{ kind, message, status }`
/// objects so the page can tell a dropped connection from a bad config.
/// DOM failures keep the value web-sys raised.
#[derive(Clone, Debug)]
pub struct WasmError(JsValue);

pub type WasmResult<T> = Result<T, WasmError>;

impl WasmError {
    pub fn new<T: Display>(val: T) -> Self {
        WasmError(JsError::new(&val.to_string()).into())
    }
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct ControllerFailure {
    kind: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
}

impl From<&HolderNameError> for ControllerFailure {
    fn from(err: &HolderNameError) -> Self {
        let (kind, status) = match err {
            HolderNameError::ServiceConnectivity(http) => ("serviceConnectivity", http.status()),
            HolderNameError::InvalidSession(_) => ("invalidSession", None),
            HolderNameError::InvalidConfig(_) => ("invalidConfig", None),
            HolderNameError::Generic(_) => ("generic", None),
        };
        ControllerFailure {
            kind,
            message: err.to_string(),
            status,
        }
    }
}

impl From<HolderNameError> for WasmError {
    fn from(err: HolderNameError) -> Self {
        let failure = ControllerFailure::from(&err);
        match serde_wasm_bindgen::to_value(&failure) {
            Ok(value) => WasmError(value),
            Err(_) => WasmError::new(failure.message),
        }
    }
}

impl From<WasmError> for JsValue {
    fn from(err: WasmError) -> Self {
        err.0
    }
}

impl From<JsValue> for WasmError {
    fn from(err: JsValue) -> Self {
        Self(err)
    }
}
