//! DOM wiring of the holder name page.

use std::{rc::Rc, sync::Arc};

use holder_name::{
    BootstrapOutcome, CSRF_HEADER_META, CSRF_TOKEN_META, CsrfToken, Field, FormContext,
    HolderNameController, NameEntryForm, NameField, SubmitOutcome,
};
use platform_utils::HttpClient;
use tracing::{debug, error, warn};
use wasm_bindgen::{JsCast, prelude::*};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, HtmlElement, HtmlImageElement, HtmlInputElement, Window};

use crate::{
    error::{WasmError, WasmResult},
    models::Config,
};

const FIRST_NAME_ID: &str = "firstName";
const LAST_NAME_ID: &str = "lastName";
const FIRST_NAME_ERROR_ID: &str = "firstNameError";
const LAST_NAME_ERROR_ID: &str = "lastNameError";
const NAME_LABEL_ID: &str = "nameLabel";
const GUIDE_IMAGE_ID: &str = "guideImage";
const CONTINUE_BUTTON_ID: &str = "continueButton";

const SHOW_CLASS: &str = "show";
const ERROR_CLASS: &str = "error";

struct PageElements {
    first_name: HtmlInputElement,
    last_name: HtmlInputElement,
    first_name_error: Element,
    last_name_error: Element,
    name_label: HtmlElement,
    guide_image: Option<HtmlImageElement>,
    continue_button: Element,
}

impl PageElements {
    fn find(document: &Document) -> WasmResult<Self> {
        Ok(PageElements {
            first_name: element_by_id(document, FIRST_NAME_ID)?,
            last_name: element_by_id(document, LAST_NAME_ID)?,
            first_name_error: element_by_id(document, FIRST_NAME_ERROR_ID)?,
            last_name_error: element_by_id(document, LAST_NAME_ERROR_ID)?,
            name_label: element_by_id(document, NAME_LABEL_ID)?,
            guide_image: element_by_id(document, GUIDE_IMAGE_ID).ok(),
            continue_button: element_by_id(document, CONTINUE_BUTTON_ID)?,
        })
    }

    fn input(&self, field: Field) -> &HtmlInputElement {
        match field {
            Field::First => &self.first_name,
            Field::Last => &self.last_name,
        }
    }

    fn error_slot(&self, field: Field) -> &Element {
        match field {
            Field::First => &self.first_name_error,
            Field::Last => &self.last_name_error,
        }
    }

    fn render(&self, form: &NameEntryForm) -> WasmResult<()> {
        for field in [Field::First, Field::Last] {
            self.render_field(field, form.field(field))?;
        }
        self.name_label.set_text_content(Some(&form.name_label));
        if let Some(color) = &form.name_font_color {
            self.name_label.style().set_property("color", color)?;
        }
        if let (Some(image), Some(src)) = (&self.guide_image, &form.guide_image) {
            image.set_src(src);
        }
        Ok(())
    }

    fn render_field(&self, field: Field, state: &NameField) -> WasmResult<()> {
        let input = self.input(field);
        if input.value() != state.value {
            input.set_value(&state.value);
        }
        input
            .class_list()
            .toggle_with_force(ERROR_CLASS, state.errored)?;

        let slot = self.error_slot(field);
        slot.set_text_content(Some(&state.error.message));
        slot.class_list()
            .toggle_with_force(SHOW_CLASS, state.error.shown)?;
        Ok(())
    }
}

fn window() -> WasmResult<Window> {
    web_sys::window().ok_or_else(|| WasmError::new("No window available"))
}

fn element_by_id<T: JsCast>(document: &Document, id: &str) -> WasmResult<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| WasmError::new(format!("Missing element #{id}")))?
        .dyn_into::<T>()
        .map_err(|_| WasmError::new(format!("Element #{id} has an unexpected type")))
}

fn meta_content(document: &Document, name: &str) -> WasmResult<Option<String>> {
    Ok(document
        .query_selector(&format!("meta[name=\"{name}\"]"))?
        .and_then(|meta| meta.get_attribute("content")))
}

fn read_context(window: &Window, document: &Document, elements: &PageElements) -> WasmResult<FormContext> {
    let csrf = match (
        meta_content(document, CSRF_HEADER_META)?,
        meta_content(document, CSRF_TOKEN_META)?,
    ) {
        (Some(header_name), Some(token)) => Some(CsrfToken::new(&header_name, &token)),
        _ => None,
    };
    Ok(FormContext {
        csrf,
        locale: window.navigator().language(),
        first_name_placeholder: elements.first_name.placeholder(),
        last_name_placeholder: elements.last_name.placeholder(),
    })
}

fn navigate(window: &Window, location: &str) {
    debug!("Navigating to {location}");
    if let Err(e) = window.location().set_href(location) {
        error!("Failed to navigate to {location}: {e:?}");
    }
}

pub(crate) struct Page {
    window: Window,
    elements: PageElements,
    controller: HolderNameController,
}

impl Page {
    fn render(&self) {
        if let Err(e) = self.elements.render(&self.controller.form()) {
            warn!("Failed to render the form: {e:?}");
        }
    }

    /// Feeds the DOM value of `field` into the controller. The browser may
    /// fill inputs without an `input` event, e.g. on form restore or autofill.
    fn sync_input(&self, field: Field) {
        let input = self.elements.input(field);
        let value = input.value();
        let capped = self.controller.on_input(field, &value);
        if capped != value {
            input.set_value(&capped);
        }
    }

    fn sync_inputs(&self) {
        for field in [Field::First, Field::Last] {
            self.sync_input(field);
        }
    }

    /// Loads the session. Returns `false` when the page navigated away.
    ///
    /// Inputs the session did not pre-fill keep whatever the DOM holds once
    /// the request is done.
    async fn bootstrap(&self) -> bool {
        self.sync_inputs();
        let before = self.controller.form();
        let outcome = self.controller.bootstrap().await;
        let after = self.controller.form();
        for field in [Field::First, Field::Last] {
            if after.field(field).value == before.field(field).value {
                self.sync_input(field);
            }
        }
        self.controller.refresh_label();
        match outcome {
            Ok(BootstrapOutcome::Ready) => {
                self.render();
                true
            }
            Ok(BootstrapOutcome::Navigate { navigation }) => {
                navigate(&self.window, navigation.location());
                false
            }
            Err(e) => {
                error!("Failed to load the session: {e}");
                self.render();
                true
            }
        }
    }

    fn on_blur(&self, field: Field) {
        self.sync_input(field);
        self.controller.on_blur(field);
        self.render();
    }

    async fn submit(&self) {
        self.sync_inputs();
        let outcome = self.controller.submit().await;
        self.render();
        match outcome {
            Ok(SubmitOutcome::Completed { navigation }) => {
                navigate(&self.window, navigation.location());
            }
            Ok(outcome) => debug!("Submission stopped: {outcome:?}"),
            Err(e) => error!("Failed to submit the holder name: {e}"),
        }
    }
}

fn listen(target: &Element, event: &str, handler: impl FnMut(Event) + 'static) -> WasmResult<()> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    // Listeners live as long as the page
    closure.forget();
    Ok(())
}

fn attach_listeners(page: &Rc<Page>) -> WasmResult<()> {
    for field in [Field::First, Field::Last] {
        let input: &Element = page.elements.input(field);
        let on_input = page.clone();
        listen(input, "input", move |_| on_input.sync_input(field))?;
        let on_blur = page.clone();
        listen(input, "blur", move |_| on_blur.on_blur(field))?;
    }
    let on_click = page.clone();
    listen(&page.elements.continue_button, "click", move |_| {
        let page = on_click.clone();
        spawn_local(async move { page.submit().await });
    })
}

/// Builds the page, loads the session and, unless the page navigated away,
/// attaches the listeners.
pub(crate) async fn mount_page(
    window: Window,
    config: Option<holder_name::Config>,
    http_client: Arc<dyn HttpClient>,
) -> WasmResult<Option<Rc<Page>>> {
    let document = window
        .document()
        .ok_or_else(|| WasmError::new("No document available"))?;
    let elements = PageElements::find(&document)?;
    let context = read_context(&window, &document, &elements)?;
    let config = match config {
        Some(config) => config,
        None => holder_name::default_config(&window.location().origin()?),
    };
    let controller = HolderNameController::new(config, context, http_client)?;
    let page = Rc::new(Page {
        window,
        elements,
        controller,
    });

    if !page.bootstrap().await {
        return Ok(None);
    }
    attach_listeners(&page)?;
    Ok(Some(page))
}

/// Wires the controller to the current page and loads the session.
///
/// Without a config, paths are resolved against the page's origin.
#[wasm_bindgen(js_name = "mountHolderNamePage")]
pub async fn mount_holder_name_page(config: Option<Config>) -> WasmResult<()> {
    let http_client = Arc::from(platform_utils::create_http_client(None));
    mount_page(window()?, config.map(Into::into), http_client).await?;
    Ok(())
}
