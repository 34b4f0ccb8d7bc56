//! Anti-forgery token attached to state-changing requests.

use regex_lite::Regex;

use crate::HolderNameError;

/// `name` of the meta tag carrying the token value.
pub const CSRF_TOKEN_META: &str = "_csrf";
/// `name` of the meta tag carrying the header name.
pub const CSRF_HEADER_META: &str = "_csrf_header";

const META_TAG_PATTERN: &str = r"(?i)<meta\b[^>]*>";
const ATTRIBUTE_PATTERN: &str = r#"(?i)\b(name|content)\s*=\s*(?:"([^"]*)"|'([^']*)')"#;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsrfToken {
    pub header_name: String,
    pub token: String,
}

impl CsrfToken {
    pub fn new(header_name: &str, token: &str) -> Self {
        CsrfToken {
            header_name: header_name.to_string(),
            token: token.to_string(),
        }
    }

    /// Reads the token from the `_csrf` and `_csrf_header` meta tags of a page.
    ///
    /// Returns `Ok(None)` when either tag is missing.
    pub fn from_html(html: &str) -> Result<Option<Self>, HolderNameError> {
        let meta_re = Regex::new(META_TAG_PATTERN)
            .map_err(|e| HolderNameError::Generic(format!("failed to compile regex: {e}")))?;
        let attr_re = Regex::new(ATTRIBUTE_PATTERN)
            .map_err(|e| HolderNameError::Generic(format!("failed to compile regex: {e}")))?;

        let mut token = None;
        let mut header_name = None;
        for tag in meta_re.find_iter(html) {
            let mut name = None;
            let mut content = None;
            for caps in attr_re.captures_iter(tag.as_str()) {
                let value = caps
                    .get(2)
                    .or_else(|| caps.get(3))
                    .map(|m| m.as_str().to_string());
                match caps.get(1).map(|m| m.as_str().to_ascii_lowercase()).as_deref() {
                    Some("name") => name = value,
                    Some("content") => content = value,
                    _ => {}
                }
            }
            match name.as_deref() {
                Some(CSRF_TOKEN_META) => token = content,
                Some(CSRF_HEADER_META) => header_name = content,
                _ => {}
            }
        }

        Ok(match (header_name, token) {
            (Some(header_name), Some(token)) => Some(CsrfToken { header_name, token }),
            _ => None,
        })
    }
}
