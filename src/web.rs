//! Browser entry point.
//!
//! ```js
//! import init, { start_mascot } from "./howl.js";
//! await init();
//! start_mascot(JSON.stringify({ container_id: "canvas-container" }));
//! ```

use wasm_bindgen::prelude::*;

use crate::app::winit::App;
use crate::config::MascotSettings;
use crate::errors::HowlError;

impl From<HowlError> for JsValue {
    fn from(e: HowlError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

pub(crate) fn window_and_document() -> Option<(web_sys::Window, web_sys::Document)> {
    let window = web_sys::window()?;
    let document = window.document()?;
    Some((window, document))
}

/// Page element with the given id, if any.
pub(crate) fn find_element(id: &str) -> Option<web_sys::Element> {
    window_and_document().and_then(|(_, document)| document.get_element_by_id(id))
}

/// Mounts the mascot into the page. `settings_json` overrides the defaults;
/// pass nothing to use them as is.
///
/// Does nothing, not even start an event loop, when the page has no
/// element with the configured `container_id`.
#[wasm_bindgen]
pub fn start_mascot(settings_json: Option<String>) -> Result<(), JsValue> {
    crate::init_logging();

    let settings = match settings_json.as_deref() {
        Some(json) => MascotSettings::from_json(json)?,
        None => MascotSettings::default(),
    };

    if find_element(&settings.container_id).is_none() {
        log::info!("Container '{}' not found, mascot not mounted", settings.container_id);
        return Ok(());
    }

    App::new(settings).run()?;
    Ok(())
}
