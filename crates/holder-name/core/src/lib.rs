//! Capture and validation of the cardholder's printed name.
//!
//! [`HolderNameController`] runs the page workflow against the
//! `/holderName/*` endpoints; surfaces render its [`NameEntryForm`].

mod controller;
mod csrf;
mod error;
mod form;
#[cfg(not(all(target_family = "wasm", target_os = "unknown")))]
mod logger;
mod models;
mod services;
mod utils;
pub mod validation;
pub mod viewer;

pub use controller::{FormContext, HolderNameController};
pub use csrf::{CSRF_HEADER_META, CSRF_TOKEN_META, CsrfToken};
pub use error::HolderNameError;
pub use form::{ErrorSlot, NameEntryForm, NameField};
#[cfg(not(all(target_family = "wasm", target_os = "unknown")))]
pub use logger::init_logging;
pub use models::*;
pub use services::{
    Endpoints, MESSAGE_PATH, SAVE_SESSION_PATH, SESSION_PATH, ServerVerdict, VALIDATE_NAME_PATH,
};
pub use validation::ValidatedHolderName;
pub use viewer::{HtmlContent, LocalHtmlViewer};

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

#[cfg(test)]
mod tests;
