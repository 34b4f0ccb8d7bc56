//! Normalization and client-side syntax checks of the holder name.

use regex_lite::Regex;

use crate::{Field, FieldError, HolderNameError, MAX_TOTAL_LENGTH};

/// Characters allowed on the card: uppercase latin letters, period, hyphen,
/// slash and space.
pub const ALLOWED_NAME_PATTERN: &str = r"^[A-Z.\-/ ]+$";

/// Message id of an empty name field.
pub const EMPTY_NAME_MESSAGE_ID: &str = "MEC01AEW01";

/// Message id of a name containing characters outside [`ALLOWED_NAME_PATTERN`].
pub const INVALID_CHARACTERS_MESSAGE_ID: &str = "MEC01AEW02";

/// Ideographic space produced by East-Asian input methods.
pub const FULL_WIDTH_SPACE: char = '\u{3000}';

/// Strips leading and trailing full-width spaces. Other whitespace is kept.
pub fn strip_full_width_spaces(value: &str) -> &str {
    value.trim_matches(FULL_WIDTH_SPACE)
}

/// Truncates `value` from the end so that together with a sibling field of
/// `other_len` characters the combined length stays within [`MAX_TOTAL_LENGTH`].
///
/// Lengths are Unicode scalar values, not UTF-16 units, so a character outside
/// the BMP counts once. When the sibling alone is over the limit the result
/// is empty rather than shortened by the overflow.
pub fn cap_length(value: &str, other_len: usize) -> String {
    let remaining = MAX_TOTAL_LENGTH.saturating_sub(other_len);
    if value.chars().count() > remaining {
        value.chars().take(remaining).collect()
    } else {
        value.to_string()
    }
}

/// Formats the preview shown on the card image.
///
/// Each part falls back to its placeholder when the trimmed value is empty.
pub fn preview_label(
    first_name: &str,
    first_placeholder: &str,
    last_name: &str,
    last_placeholder: &str,
) -> String {
    let part = |value: &str, placeholder: &str| {
        let value = value.trim().to_uppercase();
        if value.is_empty() {
            placeholder.to_uppercase()
        } else {
            value
        }
    };
    format!(
        "{} {}",
        part(first_name, first_placeholder),
        part(last_name, last_placeholder)
    )
    .trim()
    .to_string()
}

/// Compiled form of [`ALLOWED_NAME_PATTERN`].
#[derive(Clone, Debug)]
pub struct NameValidator {
    allowed: Regex,
}

impl NameValidator {
    pub fn new() -> Result<Self, HolderNameError> {
        let allowed = Regex::new(ALLOWED_NAME_PATTERN)
            .map_err(|e| HolderNameError::Generic(format!("failed to compile name pattern: {e}")))?;
        Ok(NameValidator { allowed })
    }

    /// True iff `value` is non-empty and only uses allowed characters.
    pub fn is_valid_name(&self, value: &str) -> bool {
        !value.is_empty() && self.allowed.is_match(value)
    }

    /// Returns the message id describing why `value` is rejected, if it is.
    pub fn check(&self, value: &str) -> Option<&'static str> {
        if value.is_empty() {
            Some(EMPTY_NAME_MESSAGE_ID)
        } else if !self.allowed.is_match(value) {
            Some(INVALID_CHARACTERS_MESSAGE_ID)
        } else {
            None
        }
    }

    /// Checks both raw input values independently.
    ///
    /// Full-width spaces around each value are stripped first. On failure all
    /// field errors are returned, first name before last name.
    pub fn validate(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<ValidatedHolderName, Vec<FieldError>> {
        let first_name = strip_full_width_spaces(first_name);
        let last_name = strip_full_width_spaces(last_name);

        let errors: Vec<FieldError> = [(Field::First, first_name), (Field::Last, last_name)]
            .into_iter()
            .filter_map(|(field, value)| {
                self.check(value)
                    .map(|message_id| FieldError::new(Some(field), message_id))
            })
            .collect();

        if errors.is_empty() {
            Ok(ValidatedHolderName {
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
            })
        } else {
            Err(errors)
        }
    }
}

/// A holder name that passed the client-side syntax check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedHolderName {
    first_name: String,
    last_name: String,
}

impl ValidatedHolderName {
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// The name as `application/x-www-form-urlencoded` pairs.
    pub fn form_fields(&self) -> [(&str, &str); 2] {
        [
            ("firstName", self.first_name.as_str()),
            ("lastName", self.last_name.as_str()),
        ]
    }
}
