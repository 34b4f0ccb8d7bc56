//! Platform-specific plumbing shared by the holder-name crates.
//!
//! The HTTP client is the only platform-dependent piece: bitreq on native
//! targets, reqwest (backed by the browser's `fetch`) on WASM.

mod error;
pub mod http;

pub use error::HttpError;
pub use http::{DefaultHttpClient, HttpClient, HttpResponse, REQUEST_TIMEOUT, create_http_client};
