//! Browser bindings of the holder name page.
//!
//! [`page::mount_holder_name_page`] wires the controller to the page's DOM.
//! [`form::HolderNameForm`] exposes the same workflow to JavaScript for pages
//! that render themselves.

mod error;
mod form;
mod logger;
mod models;
mod page;

pub use error::{WasmError, WasmResult};
pub use form::HolderNameForm;
