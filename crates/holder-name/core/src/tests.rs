use std::sync::Arc;

use macros::async_test_all;
use platform_utils::HttpError;
use serde_json::json;

use crate::test_utils::mock_rest_client::{MockResponse, MockRestClient};
use crate::validation::{EMPTY_NAME_MESSAGE_ID, INVALID_CHARACTERS_MESSAGE_ID};
use crate::{
    BootstrapOutcome, CsrfToken, DEFAULT_FALLBACK_MESSAGE, Field, FieldError, FormContext,
    HolderNameController, HolderNameError, Navigation, SubmitOutcome, default_config,
};

#[cfg(feature = "browser-tests")]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

const BASE_URL: &str = "https://card.example.com";
const SESSION_URL: &str = "https://card.example.com/holderName/session";
const VALIDATE_URL: &str = "https://card.example.com/holderName/valName";

fn form_context(locale: Option<&str>) -> FormContext {
    FormContext {
        csrf: Some(CsrfToken::new("X-CSRF-TOKEN", "csrf-token")),
        locale: locale.map(ToString::to_string),
        first_name_placeholder: "Taro".to_string(),
        last_name_placeholder: "Yamada".to_string(),
    }
}

fn create_controller(mock_rest_client: &Arc<MockRestClient>) -> HolderNameController {
    HolderNameController::new(
        default_config(BASE_URL),
        form_context(Some("en-US")),
        mock_rest_client.clone(),
    )
    .unwrap()
}

fn message_url(message_id: &str, locale: &str) -> String {
    format!("{BASE_URL}/api/message?messageIds={message_id}&locale={locale}")
}

fn mock_message(mock_rest_client: &MockRestClient, text: &str) {
    mock_rest_client.add_response(MockResponse::json(
        json!({ "messageText": text }).to_string(),
    ));
}

fn fill(controller: &HolderNameController, first_name: &str, last_name: &str) {
    controller.on_input(Field::First, first_name);
    controller.on_blur(Field::First);
    controller.on_input(Field::Last, last_name);
    controller.on_blur(Field::Last);
}

#[async_test_all]
async fn test_bootstrap_populates_form() {
    let mock_rest_client = Arc::new(MockRestClient::new());
    mock_rest_client.add_response(MockResponse::json(
        json!({
            "holderName": { "firstName": "TARO", "lastName": "YAMADA" },
            "transactionType": "NEW",
            "design": { "name_img": "/img/guide_blue.png", "name_font_color": "#ffffff" }
        })
        .to_string(),
    ));
    let controller = create_controller(&mock_rest_client);

    let outcome = controller.bootstrap().await.unwrap();

    assert_eq!(outcome, BootstrapOutcome::Ready);
    assert_eq!(mock_rest_client.urls(), vec![SESSION_URL.to_string()]);
    let form = controller.form();
    assert_eq!(form.first_name.value, "TARO");
    assert_eq!(form.last_name.value, "YAMADA");
    assert_eq!(form.name_label, "TARO YAMADA");
    assert_eq!(form.guide_image.as_deref(), Some("/img/guide_blue.png"));
    assert_eq!(form.name_font_color.as_deref(), Some("#ffffff"));
    assert_eq!(form.transaction_type.as_deref(), Some("NEW"));
}

#[async_test_all]
async fn test_bootstrap_with_partial_session_keeps_placeholders() {
    let mock_rest_client = Arc::new(MockRestClient::new());
    mock_rest_client.add_response(MockResponse::json(
        json!({ "holderName": { "firstName": null, "lastName": "SATO" } }).to_string(),
    ));
    let controller = create_controller(&mock_rest_client);

    controller.bootstrap().await.unwrap();

    let form = controller.form();
    assert_eq!(form.first_name.value, "");
    assert_eq!(form.name_label, "TARO SATO");
    assert_eq!(form.guide_image, None);
}

#[async_test_all]
async fn test_bootstrap_follows_redirect() {
    let mock_rest_client = Arc::new(MockRestClient::new());
    mock_rest_client.add_response(
        MockResponse::new(200, "<html></html>".to_string())
            .with_header("Content-Type", "text/html")
            .with_header("Location", "/login"),
    );
    mock_rest_client.add_response(MockResponse::new(200, String::new()));
    let controller = create_controller(&mock_rest_client);

    assert_eq!(
        controller.bootstrap().await.unwrap(),
        BootstrapOutcome::Navigate {
            navigation: Navigation::Redirect {
                location: "/login".to_string()
            }
        }
    );
    // Without a location the generic error page is used
    assert_eq!(
        controller.bootstrap().await.unwrap(),
        BootstrapOutcome::Navigate {
            navigation: Navigation::CommonError
        }
    );
    assert_eq!(Navigation::CommonError.location(), "/commonError");
}

#[async_test_all]
async fn test_bootstrap_with_failed_session_starts_empty() {
    let mock_rest_client = Arc::new(MockRestClient::new());
    mock_rest_client.add_response(MockResponse::new(500, "error".to_string()));
    let controller = create_controller(&mock_rest_client);

    assert_eq!(controller.bootstrap().await.unwrap(), BootstrapOutcome::Ready);
    assert_eq!(controller.form().name_label, "TARO YAMADA");
}

#[async_test_all]
async fn test_bootstrap_with_broken_json() {
    let mock_rest_client = Arc::new(MockRestClient::new());
    mock_rest_client.add_response(MockResponse::json("{not json".to_string()));
    let controller = create_controller(&mock_rest_client);

    assert!(matches!(
        controller.bootstrap().await,
        Err(HolderNameError::InvalidSession(_))
    ));
}

#[async_test_all]
async fn test_on_input_caps_combined_length() {
    let mock_rest_client = Arc::new(MockRestClient::new());
    let controller = create_controller(&mock_rest_client);

    assert_eq!(controller.on_input(Field::Last, "YAMADA"), "YAMADA");
    assert_eq!(
        controller.on_input(Field::First, "abcdefghijklmnopqrstuvwxyz"),
        "abcdefghijklmnop"
    );
    assert_eq!(controller.on_blur(Field::First), "ABCDEFGHIJKLMNOP");
    assert!(mock_rest_client.requests().is_empty());
}

#[async_test_all]
async fn test_submit_empty_first_name_halts() {
    let mock_rest_client = Arc::new(MockRestClient::new());
    mock_message(&mock_rest_client, "Please enter your first name");
    let controller = create_controller(&mock_rest_client);
    fill(&controller, "", "YAMADA");

    let outcome = controller.submit().await.unwrap();

    assert_eq!(
        outcome,
        SubmitOutcome::Invalid {
            errors: vec![FieldError::new(Some(Field::First), EMPTY_NAME_MESSAGE_ID)]
        }
    );
    let requests = mock_rest_client.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].url, message_url(EMPTY_NAME_MESSAGE_ID, "en-US"));

    let form = controller.form();
    assert_eq!(form.first_name.error.message, "Please enter your first name");
    assert!(form.first_name.error.shown);
    assert!(form.first_name.errored);
    assert!(!form.last_name.error.shown);
}

#[async_test_all]
async fn test_submit_disallowed_character_in_last_name() {
    let mock_rest_client = Arc::new(MockRestClient::new());
    mock_message(&mock_rest_client, "Only A-Z . - / and spaces are allowed");
    let controller = create_controller(&mock_rest_client);
    fill(&controller, "JOHN", "O'BRIEN");

    let outcome = controller.submit().await.unwrap();

    assert_eq!(
        outcome,
        SubmitOutcome::Invalid {
            errors: vec![FieldError::new(
                Some(Field::Last),
                INVALID_CHARACTERS_MESSAGE_ID
            )]
        }
    );
    assert_eq!(
        mock_rest_client.urls(),
        vec![message_url(INVALID_CHARACTERS_MESSAGE_ID, "en-US")]
    );
    let form = controller.form();
    assert!(form.last_name.errored);
    assert!(!form.first_name.errored);
}

#[async_test_all]
async fn test_submit_reports_both_fields() {
    let mock_rest_client = Arc::new(MockRestClient::new());
    mock_message(&mock_rest_client, "first");
    mock_message(&mock_rest_client, "last");
    let controller = create_controller(&mock_rest_client);
    fill(&controller, "\u{3000}", "TANAKA1");

    let outcome = controller.submit().await.unwrap();

    assert!(matches!(outcome, SubmitOutcome::Invalid { errors } if errors.len() == 2));
    assert_eq!(
        mock_rest_client.urls(),
        vec![
            message_url(EMPTY_NAME_MESSAGE_ID, "en-US"),
            message_url(INVALID_CHARACTERS_MESSAGE_ID, "en-US"),
        ]
    );
    let form = controller.form();
    assert_eq!(form.first_name.error.message, "first");
    assert_eq!(form.last_name.error.message, "last");
}

#[async_test_all]
async fn test_submit_success_saves_and_navigates() {
    let mock_rest_client = Arc::new(MockRestClient::new());
    mock_rest_client.add_response(MockResponse::new(200, String::new()));
    mock_rest_client.add_response(MockResponse::new(200, String::new()));
    let controller = create_controller(&mock_rest_client);
    fill(&controller, "\u{3000}taro\u{3000}", "de la cruz");

    let outcome = controller.submit().await.unwrap();

    assert_eq!(
        outcome,
        SubmitOutcome::Completed {
            navigation: Navigation::PinSetup
        }
    );
    let requests = mock_rest_client.requests();
    assert_eq!(requests.len(), 2);
    for (request, url) in requests.iter().zip([VALIDATE_URL, SESSION_URL]) {
        assert_eq!(request.method, "POST");
        assert_eq!(request.url, url);
        assert_eq!(
            request.body.as_deref(),
            Some("firstName=TARO&lastName=DE%20LA%20CRUZ")
        );
        assert_eq!(
            request.headers.get("X-CSRF-TOKEN").map(String::as_str),
            Some("csrf-token")
        );
        assert_eq!(
            request.headers.get("Content-Type").map(String::as_str),
            Some("application/x-www-form-urlencoded")
        );
    }
    assert_eq!(Navigation::PinSetup.location(), "/pinSetup");
}

#[async_test_all]
async fn test_server_rejection_on_last_name_stops() {
    let mock_rest_client = Arc::new(MockRestClient::new());
    mock_rest_client.add_response(MockResponse::new(200, "MEC01AEW99:LAST".to_string()));
    mock_message(&mock_rest_client, "This name cannot be printed");
    let controller = create_controller(&mock_rest_client);
    fill(&controller, "TARO", "YAMADA");

    let outcome = controller.submit().await.unwrap();

    assert_eq!(
        outcome,
        SubmitOutcome::Rejected {
            error: FieldError::new(Some(Field::Last), "MEC01AEW99")
        }
    );
    assert_eq!(
        mock_rest_client.urls(),
        vec![VALIDATE_URL.to_string(), message_url("MEC01AEW99", "en-US")]
    );
    let form = controller.form();
    assert_eq!(form.last_name.error.message, "This name cannot be printed");
    assert!(form.last_name.errored);
}

#[async_test_all]
async fn test_server_rejection_without_field_still_saves() {
    let mock_rest_client = Arc::new(MockRestClient::new());
    mock_rest_client.add_response(MockResponse::new(200, "MEC01AEW99".to_string()));
    mock_message(&mock_rest_client, "Please check the name");
    mock_rest_client.add_response(MockResponse::new(200, String::new()));
    let controller = create_controller(&mock_rest_client);
    fill(&controller, "TARO", "YAMADA");

    let outcome = controller.submit().await.unwrap();

    assert_eq!(
        outcome,
        SubmitOutcome::Completed {
            navigation: Navigation::PinSetup
        }
    );
    assert_eq!(
        mock_rest_client.urls(),
        vec![
            VALIDATE_URL.to_string(),
            message_url("MEC01AEW99", "en-US"),
            SESSION_URL.to_string(),
        ]
    );
    let form = controller.form();
    assert_eq!(form.first_name.error.message, "Please check the name");
    assert!(form.first_name.errored);
}

#[async_test_all]
async fn test_server_verdict_with_unknown_field_is_ignored() {
    let mock_rest_client = Arc::new(MockRestClient::new());
    mock_rest_client.add_response(MockResponse::new(200, "MEC01AEW99:MIDDLE".to_string()));
    mock_rest_client.add_response(MockResponse::new(200, String::new()));
    let controller = create_controller(&mock_rest_client);
    fill(&controller, "TARO", "YAMADA");

    let outcome = controller.submit().await.unwrap();

    assert!(matches!(outcome, SubmitOutcome::Completed { .. }));
    assert_eq!(
        mock_rest_client.urls(),
        vec![VALIDATE_URL.to_string(), SESSION_URL.to_string()]
    );
    assert!(!controller.form().first_name.error.shown);
}

#[async_test_all]
async fn test_server_check_status_is_not_inspected() {
    let mock_rest_client = Arc::new(MockRestClient::new());
    mock_rest_client.add_response(MockResponse::new(500, String::new()));
    mock_rest_client.add_response(MockResponse::new(200, String::new()));
    let controller = create_controller(&mock_rest_client);
    fill(&controller, "TARO", "YAMADA");

    let outcome = controller.submit().await.unwrap();

    assert_eq!(
        outcome,
        SubmitOutcome::Completed {
            navigation: Navigation::PinSetup
        }
    );
    assert_eq!(
        mock_rest_client.urls(),
        vec![VALIDATE_URL.to_string(), SESSION_URL.to_string()]
    );
}

#[async_test_all]
async fn test_server_check_error_body_is_read_on_failure_status() {
    let mock_rest_client = Arc::new(MockRestClient::new());
    mock_rest_client.add_response(MockResponse::new(400, "MEC01AEW99:FIRST".to_string()));
    mock_message(&mock_rest_client, "This name cannot be printed");
    let controller = create_controller(&mock_rest_client);
    fill(&controller, "TARO", "YAMADA");

    let outcome = controller.submit().await.unwrap();

    assert_eq!(
        outcome,
        SubmitOutcome::Rejected {
            error: FieldError::new(Some(Field::First), "MEC01AEW99")
        }
    );
    assert!(controller.form().first_name.errored);
}

#[async_test_all]
async fn test_server_check_transport_failure_is_an_error() {
    let mock_rest_client = Arc::new(MockRestClient::new());
    mock_rest_client.add_error(HttpError::Timeout("timed out".to_string()));
    let controller = create_controller(&mock_rest_client);
    fill(&controller, "TARO", "YAMADA");

    let result = controller.submit().await;

    assert_eq!(
        result,
        Err(HolderNameError::ServiceConnectivity(HttpError::Timeout(
            "timed out".to_string()
        )))
    );
    assert_eq!(mock_rest_client.urls(), vec![VALIDATE_URL.to_string()]);
}

#[async_test_all]
async fn test_failed_save_does_not_navigate() {
    let mock_rest_client = Arc::new(MockRestClient::new());
    mock_rest_client.add_response(MockResponse::new(200, String::new()));
    mock_rest_client.add_error(HttpError::Connect("connection refused".to_string()));
    let controller = create_controller(&mock_rest_client);
    fill(&controller, "TARO", "YAMADA");

    assert!(matches!(
        controller.submit().await,
        Err(HolderNameError::ServiceConnectivity(HttpError::Connect(_)))
    ));
}

#[async_test_all]
async fn test_save_status_is_not_inspected() {
    let mock_rest_client = Arc::new(MockRestClient::new());
    mock_rest_client.add_response(MockResponse::new(200, String::new()));
    mock_rest_client.add_response(MockResponse::new(503, String::new()));
    let controller = create_controller(&mock_rest_client);
    fill(&controller, "TARO", "YAMADA");

    assert_eq!(
        controller.submit().await.unwrap(),
        SubmitOutcome::Completed {
            navigation: Navigation::PinSetup
        }
    );
}

#[async_test_all]
async fn test_message_lookup_failures_use_fallback() {
    let mock_rest_client = Arc::new(MockRestClient::new());
    mock_rest_client.add_error(HttpError::Timeout("timed out".to_string()));
    mock_rest_client.add_response(MockResponse::new(500, "<html/>".to_string()));
    let controller = create_controller(&mock_rest_client);
    fill(&controller, "", "");

    controller.submit().await.unwrap();

    let form = controller.form();
    for field in [form.first_name, form.last_name] {
        assert_eq!(field.error.message, DEFAULT_FALLBACK_MESSAGE);
        assert!(field.error.shown);
        assert!(!field.errored);
    }
}

#[async_test_all]
async fn test_message_without_text_uses_fallback() {
    let mock_rest_client = Arc::new(MockRestClient::new());
    mock_rest_client.add_response(MockResponse::json("{}".to_string()));
    let controller = create_controller(&mock_rest_client);
    fill(&controller, "", "YAMADA");

    controller.submit().await.unwrap();

    let form = controller.form();
    assert_eq!(form.first_name.error.message, DEFAULT_FALLBACK_MESSAGE);
    assert!(form.first_name.errored);
}

#[async_test_all]
async fn test_locale_defaults_to_configured_locale() {
    let mock_rest_client = Arc::new(MockRestClient::new());
    mock_message(&mock_rest_client, "名を入力してください");
    let controller = HolderNameController::new(
        default_config(BASE_URL),
        form_context(None),
        mock_rest_client.clone(),
    )
    .unwrap();
    fill(&controller, "", "YAMADA");

    controller.submit().await.unwrap();

    assert_eq!(
        mock_rest_client.urls(),
        vec![message_url(EMPTY_NAME_MESSAGE_ID, "ja")]
    );
}

#[async_test_all]
async fn test_blur_clears_error_once_fixed() {
    let mock_rest_client = Arc::new(MockRestClient::new());
    mock_message(&mock_rest_client, "invalid");
    let controller = create_controller(&mock_rest_client);
    fill(&controller, "JOHN", "O'BRIEN");
    controller.submit().await.unwrap();
    assert!(controller.form().last_name.error.shown);

    // Still invalid, the error stays
    controller.on_input(Field::Last, "o'brien");
    controller.on_blur(Field::Last);
    assert!(controller.form().last_name.error.shown);

    controller.on_input(Field::Last, "obrien");
    assert_eq!(controller.on_blur(Field::Last), "OBRIEN");
    let form = controller.form();
    assert!(!form.last_name.error.shown);
    assert!(!form.last_name.errored);
    assert_eq!(form.last_name.error.message, "");
}

#[async_test_all]
async fn test_refresh_label_follows_typed_values() {
    let mock_rest_client = Arc::new(MockRestClient::new());
    let controller = create_controller(&mock_rest_client);

    controller.on_input(Field::First, "hanako");
    assert_eq!(controller.form().name_label, "TARO YAMADA");

    controller.refresh_label();
    let form = controller.form();
    assert_eq!(form.name_label, "HANAKO YAMADA");
    assert_eq!(form.first_name.value, "hanako");
}

#[async_test_all]
async fn test_blur_does_not_clear_error_of_empty_field() {
    let mock_rest_client = Arc::new(MockRestClient::new());
    mock_message(&mock_rest_client, "required");
    let controller = create_controller(&mock_rest_client);
    fill(&controller, "", "YAMADA");
    controller.submit().await.unwrap();

    controller.on_blur(Field::First);

    assert!(controller.form().first_name.error.shown);
}

#[async_test_all]
async fn test_saved_name_round_trips_through_session() {
    let mock_rest_client = Arc::new(MockRestClient::new());
    mock_rest_client.add_response(MockResponse::new(200, String::new()));
    mock_rest_client.add_response(MockResponse::new(200, String::new()));
    let controller = create_controller(&mock_rest_client);
    fill(&controller, "mary-ann", "smith");
    controller.submit().await.unwrap();
    let saved_label = controller.form().name_label;

    let saved_body = mock_rest_client.requests()[1].body.clone().unwrap();
    assert_eq!(saved_body, "firstName=MARY-ANN&lastName=SMITH");

    let reloaded_client = Arc::new(MockRestClient::new());
    reloaded_client.add_response(MockResponse::json(
        json!({ "holderName": { "firstName": "MARY-ANN", "lastName": "SMITH" } }).to_string(),
    ));
    let reloaded = create_controller(&reloaded_client);
    reloaded.bootstrap().await.unwrap();

    assert_eq!(reloaded.form().name_label, saved_label);
    assert_eq!(saved_label, "MARY-ANN SMITH");
}

#[async_test_all]
async fn test_invalid_base_url_is_rejected() {
    for base_url in ["card.example.com", "https://card.example.com/app?tenant=a"] {
        let result = HolderNameController::new(
            default_config(base_url),
            FormContext::default(),
            Arc::new(MockRestClient::new()),
        );
        assert!(matches!(result, Err(HolderNameError::InvalidConfig(_))));
    }
}

#[async_test_all]
async fn test_endpoints_resolve_under_base_path() {
    let mock_rest_client = Arc::new(MockRestClient::new());
    mock_rest_client.add_response(MockResponse::new(404, String::new()));
    mock_message(&mock_rest_client, "required");
    let controller = HolderNameController::new(
        default_config("https://card.example.com/app/"),
        form_context(Some("en-US")),
        mock_rest_client.clone(),
    )
    .unwrap();
    controller.bootstrap().await.unwrap();
    fill(&controller, "", "YAMADA");
    controller.submit().await.unwrap();

    assert_eq!(
        mock_rest_client.urls(),
        vec![
            "https://card.example.com/app/holderName/session".to_string(),
            "https://card.example.com/app/api/message?messageIds=MEC01AEW01&locale=en-US"
                .to_string(),
        ]
    );
}
