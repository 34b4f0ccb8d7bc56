use std::{rc::Rc, sync::Arc};

use holder_name::HolderNameController;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use wasm_bindgen::prelude::*;

use crate::{
    error::WasmResult,
    logger::{Logger, WasmTracingLayer},
    models::*,
};

const DEFAULT_LOG_FILTER: &str = "debug";

#[wasm_bindgen(js_name = "initLogging")]
pub fn init_logging(logger: Logger, filter: Option<String>) -> WasmResult<()> {
    crate::logger::WASM_LOGGER.set(Some(logger));

    let filter = EnvFilter::new(filter.unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()));
    tracing_subscriber::registry()
        .with(filter)
        .with(WasmTracingLayer {})
        .try_init()
        .map_err(crate::error::WasmError::new)?;

    Ok(())
}

#[wasm_bindgen(js_name = "defaultConfig")]
pub fn default_config(base_url: &str) -> Config {
    holder_name::default_config(base_url).into()
}

/// The name entry workflow, for pages that render the form themselves.
#[wasm_bindgen]
pub struct HolderNameForm {
    pub(crate) controller: Rc<HolderNameController>,
}

#[wasm_bindgen]
impl HolderNameForm {
    #[wasm_bindgen(constructor)]
    pub fn new(config: Config, context: FormContext) -> WasmResult<HolderNameForm> {
        let http_client = Arc::from(platform_utils::create_http_client(None));
        let controller = HolderNameController::new(config.into(), context.into(), http_client)?;
        Ok(HolderNameForm {
            controller: Rc::new(controller),
        })
    }

    #[wasm_bindgen(js_name = "bootstrap")]
    pub async fn bootstrap(&self) -> WasmResult<BootstrapOutcome> {
        Ok(self.controller.bootstrap().await?.into())
    }

    /// Returns the value the input has to show after the length cap.
    #[wasm_bindgen(js_name = "input")]
    pub fn input(&self, field: Field, value: &str) -> String {
        self.controller.on_input(field.into(), value)
    }

    #[wasm_bindgen(js_name = "blur")]
    pub fn blur(&self, field: Field) -> String {
        self.controller.on_blur(field.into())
    }

    #[wasm_bindgen(js_name = "submit")]
    pub async fn submit(&self) -> WasmResult<SubmitOutcome> {
        Ok(self.controller.submit().await?.into())
    }

    #[wasm_bindgen(js_name = "state")]
    pub fn state(&self) -> FormState {
        self.controller.form().into()
    }
}
