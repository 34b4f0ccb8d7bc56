//! In-memory model of the name entry page.
//!
//! Mirrors what the page shows: both inputs with their placeholders, the
//! per-field error slots, the preview label and the design overrides.
//! Operations here are synchronous; the controller performs the network
//! calls and feeds their results in.

use serde::{Deserialize, Serialize};

use crate::validation::{cap_length, preview_label};
use crate::{Design, Field, HolderName};

/// Error slot under an input.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorSlot {
    pub message: String,
    /// The slot's "show" style hook
    pub shown: bool,
}

/// One text input with its error slot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameField {
    pub value: String,
    pub placeholder: String,
    /// The input's "error" style hook
    pub errored: bool,
    pub error: ErrorSlot,
}

impl NameField {
    fn with_placeholder(placeholder: &str) -> Self {
        NameField {
            placeholder: placeholder.to_string(),
            ..NameField::default()
        }
    }

    fn len(&self) -> usize {
        self.value.chars().count()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameEntryForm {
    pub first_name: NameField,
    pub last_name: NameField,
    pub name_label: String,
    /// Source of the guide image, when overridden by the session
    pub guide_image: Option<String>,
    /// Font color of the preview label, when overridden by the session
    pub name_font_color: Option<String>,
    pub transaction_type: Option<String>,
}

impl NameEntryForm {
    pub fn new(first_placeholder: &str, last_placeholder: &str) -> Self {
        let mut form = NameEntryForm {
            first_name: NameField::with_placeholder(first_placeholder),
            last_name: NameField::with_placeholder(last_placeholder),
            ..NameEntryForm::default()
        };
        form.update_name_label();
        form
    }

    pub fn field(&self, field: Field) -> &NameField {
        match field {
            Field::First => &self.first_name,
            Field::Last => &self.last_name,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut NameField {
        match field {
            Field::First => &mut self.first_name,
            Field::Last => &mut self.last_name,
        }
    }

    /// Pre-fills the inputs from a stored name. Missing or empty parts leave
    /// the current value untouched.
    pub fn set_input_values(&mut self, holder_name: &HolderName) {
        if let Some(first_name) = holder_name.first_name.as_deref().filter(|v| !v.is_empty()) {
            self.first_name.value = first_name.to_string();
        }
        if let Some(last_name) = holder_name.last_name.as_deref().filter(|v| !v.is_empty()) {
            self.last_name.value = last_name.to_string();
        }
        self.update_name_label();
    }

    pub fn apply_design(&mut self, design: &Design) {
        if let Some(name_img) = design.name_img.as_deref().filter(|v| !v.is_empty()) {
            self.guide_image = Some(name_img.to_string());
        }
        if let Some(color) = design.name_font_color.as_deref().filter(|v| !v.is_empty()) {
            self.name_font_color = Some(color.to_string());
        }
    }

    /// Handles an edit of `field`, capping it against the other field's length.
    /// Returns the value the input must display.
    pub fn input(&mut self, field: Field, value: &str) -> &str {
        let other_len = self.field(field.other()).len();
        let target = self.field_mut(field);
        target.value = cap_length(value, other_len);
        &target.value
    }

    /// Handles focus loss: upper-cases the value and refreshes the label.
    pub fn blur(&mut self, field: Field) -> &str {
        let target = self.field_mut(field);
        target.value = target.value.to_uppercase();
        self.update_name_label();
        &self.field(field).value
    }

    pub fn update_name_label(&mut self) {
        self.name_label = preview_label(
            &self.first_name.value,
            &self.first_name.placeholder,
            &self.last_name.value,
            &self.last_name.placeholder,
        );
    }

    /// Shows `message` under `field`. `mark_input` also sets the input's error hook.
    pub fn show_error(&mut self, field: Field, message: &str, mark_input: bool) {
        let target = self.field_mut(field);
        target.error.message = message.to_string();
        target.error.shown = true;
        if mark_input {
            target.errored = true;
        }
    }

    pub fn hide_error(&mut self, field: Field) {
        let target = self.field_mut(field);
        target.error = ErrorSlot::default();
        target.errored = false;
    }

    pub fn total_len(&self) -> usize {
        self.first_name.len().saturating_add(self.last_name.len())
    }
}
