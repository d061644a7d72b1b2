//! Errors surfaced to JavaScript.

use giftforge_mesh::MeshError;
use thiserror::Error;
use wasm_bindgen::JsValue;

/// Anything that can go wrong between the JS host and the core.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error("Invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// World matrices are 16 column-major floats (Three.js `matrixWorld.elements`).
    #[error("World matrix must have 16 elements, got {0}")]
    WorldMatrix(usize),
}

/// Logs `err` to the browser console and converts it to a JS error string.
pub(crate) fn to_js(err: BridgeError) -> JsValue {
    let message = err.to_string();
    #[cfg(target_arch = "wasm32")]
    web_sys::console::error_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}
