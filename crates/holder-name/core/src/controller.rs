//! The name entry workflow: load the session, track edits, validate and
//! store the name.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use platform_utils::HttpClient;
use tracing::{debug, info, warn};

use crate::csrf::CsrfToken;
use crate::form::NameEntryForm;
use crate::services::{Endpoints, MessageService, ServerVerdict, SessionFetch, SessionService};
use crate::validation::{NameValidator, strip_full_width_spaces};
use crate::{
    BootstrapOutcome, Config, Field, FieldError, HolderNameError, Navigation, SubmitOutcome,
};

/// Page-level values the controller needs besides its configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormContext {
    pub csrf: Option<CsrfToken>,
    /// Locale reported by the surface, e.g. `navigator.language`
    pub locale: Option<String>,
    pub first_name_placeholder: String,
    pub last_name_placeholder: String,
}

/// Drives one name entry page.
///
/// Form state sits behind a lock that is only held between await points, so
/// a surface can keep a shared reference and read [`Self::form`] at any time.
pub struct HolderNameController {
    config: Config,
    locale: String,
    validator: NameValidator,
    session_service: SessionService,
    message_service: MessageService,
    form: Mutex<NameEntryForm>,
}

impl HolderNameController {
    pub fn new(
        config: Config,
        context: FormContext,
        http_client: Arc<dyn HttpClient>,
    ) -> Result<Self, HolderNameError> {
        let endpoints = Endpoints::new(&config.base_url)?;
        let locale = context
            .locale
            .filter(|locale| !locale.is_empty())
            .unwrap_or_else(|| config.default_locale.clone());
        let form = NameEntryForm::new(
            &context.first_name_placeholder,
            &context.last_name_placeholder,
        );

        Ok(HolderNameController {
            locale,
            validator: NameValidator::new()?,
            session_service: SessionService::new(
                http_client.clone(),
                endpoints.clone(),
                context.csrf,
            ),
            message_service: MessageService::new(http_client, endpoints),
            form: Mutex::new(form),
            config,
        })
    }

    fn lock_form(&self) -> MutexGuard<'_, NameEntryForm> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// A copy of the current form state, for rendering.
    pub fn form(&self) -> NameEntryForm {
        self.lock_form().clone()
    }

    /// Loads the session and populates the form.
    pub async fn bootstrap(&self) -> Result<BootstrapOutcome, HolderNameError> {
        let fetch = self.session_service.fetch_session().await?;
        let mut form = self.lock_form();
        let outcome = match fetch {
            SessionFetch::Loaded(session) => {
                if let Some(holder_name) = &session.holder_name {
                    form.set_input_values(holder_name);
                }
                if let Some(design) = &session.design {
                    form.apply_design(design);
                }
                form.transaction_type = session.transaction_type;
                BootstrapOutcome::Ready
            }
            SessionFetch::Unavailable { .. } => BootstrapOutcome::Ready,
            SessionFetch::Redirect(navigation) => BootstrapOutcome::Navigate { navigation },
        };
        form.update_name_label();
        info!("Form bootstrapped: {outcome:?}");
        Ok(outcome)
    }

    /// Handles an edit. Returns the value the input must show after capping.
    pub fn on_input(&self, field: Field, value: &str) -> String {
        self.lock_form().input(field, value).to_string()
    }

    /// Recomputes the preview label from the current values.
    pub fn refresh_label(&self) {
        self.lock_form().update_name_label();
    }

    /// Handles focus loss: upper-cases the value, refreshes the preview label
    /// and clears the field's error once the value is acceptable.
    pub fn on_blur(&self, field: Field) -> String {
        let mut form = self.lock_form();
        let value = form.blur(field).to_string();
        if self.validator.is_valid_name(strip_full_width_spaces(&value)) {
            form.hide_error(field);
        }
        value
    }

    /// Runs the full submission: client check, server check, save.
    pub async fn submit(&self) -> Result<SubmitOutcome, HolderNameError> {
        let (first_name, last_name) = {
            let mut form = self.lock_form();
            form.hide_error(Field::First);
            form.hide_error(Field::Last);
            (form.first_name.value.clone(), form.last_name.value.clone())
        };

        let name = match self.validator.validate(&first_name, &last_name) {
            Ok(name) => name,
            Err(errors) => {
                debug!("Client-side check failed: {errors:?}");
                for error in &errors {
                    self.show_error(error.field.unwrap_or(Field::First), &error.message_id)
                        .await;
                }
                return Ok(SubmitOutcome::Invalid { errors });
            }
        };

        match self.session_service.validate_name(&name).await? {
            ServerVerdict::Accepted => {}
            ServerVerdict::Rejected(error) => {
                self.show_error(error.field.unwrap_or(Field::First), &error.message_id)
                    .await;
                return Ok(SubmitOutcome::Rejected { error });
            }
            ServerVerdict::Unscoped(error) => {
                // Shown on the first name, but the name is still stored
                self.show_error(Field::First, &error.message_id).await;
            }
            ServerVerdict::UnknownField { message_id, field } => {
                warn!("Ignoring server verdict {message_id} for unknown field {field}");
            }
        }

        self.session_service.save_holder_name(&name).await?;
        info!("Holder name stored");
        Ok(SubmitOutcome::Completed {
            navigation: Navigation::PinSetup,
        })
    }

    /// Looks up the message text and shows it under `field`. Lookup failures
    /// show the fallback message without marking the input.
    async fn show_error(&self, field: Field, message_id: &str) {
        let lookup = self.message_service.lookup(message_id, &self.locale).await;
        let mut form = self.lock_form();
        match lookup {
            Ok(text) => {
                let text = text.unwrap_or_else(|| self.config.fallback_message.clone());
                form.show_error(field, &text, true);
            }
            Err(e) => {
                warn!("Failed to look up message {message_id}: {e}");
                form.show_error(field, &self.config.fallback_message, false);
            }
        }
    }

    /// Client-side errors of the current values, without touching the form.
    pub fn check(&self) -> Vec<FieldError> {
        let form = self.lock_form();
        self.validator
            .validate(&form.first_name.value, &form.last_name.value)
            .err()
            .unwrap_or_default()
    }
}
