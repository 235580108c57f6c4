//! Browser entry point.

use crate::SystemDesignApp;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Id of the `<canvas>` element the editor attaches to.
const CANVAS_ID: &str = "the_canvas_id";

/// Starts the editor on the page's canvas once the wasm module loads.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    if let Err(err) = eframe::WebLogger::init(log::LevelFilter::Debug) {
        web_sys::console::warn_1(&format!("logger already set: {err}").into());
    }

    let canvas = find_canvas(CANVAS_ID)?;
    wasm_bindgen_futures::spawn_local(async move {
        let started = eframe::WebRunner::new()
            .start(
                canvas,
                eframe::WebOptions::default(),
                Box::new(|cc| Ok(Box::new(SystemDesignApp::new(cc)))),
            )
            .await;
        if let Err(err) = started {
            log::error!("failed to start editor: {err:?}");
        }
    });
    Ok(())
}

fn find_canvas(id: &str) -> Result<web_sys::HtmlCanvasElement, JsValue> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document on window"))?;
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("no element with id '{id}'")))?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .map_err(|_| JsValue::from_str(&format!("element '{id}' is not a canvas")))
}
