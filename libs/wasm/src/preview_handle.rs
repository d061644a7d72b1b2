//! # Preview Handle
//!
//! WASM-friendly snapshot of the composed scene for the viewport.

use giftforge_mesh::Preview;
use wasm_bindgen::prelude::*;

use crate::error::BridgeError;

/// Display-space buffers for one preview frame.
///
/// Both solids are non-indexed, so every nine floats form one triangle.
///
/// # Example (JavaScript)
///
/// ```javascript
/// const frame = workbench.preview();
/// const geometry = new THREE.BufferGeometry();
/// geometry.setAttribute('position', new THREE.BufferAttribute(frame.subjectPositions(), 3));
/// geometry.computeVertexNormals();
/// for (const label of JSON.parse(frame.labelsJson())) {
///   addText(label.text, label.position, label.fontSize, label.rotationX);
/// }
/// ```
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct PreviewHandle {
    subject: Vec<f32>,
    pedestal: Vec<f32>,
    labels_json: String,
}

#[wasm_bindgen]
impl PreviewHandle {
    /// Subject positions as a Float32Array.
    #[wasm_bindgen(js_name = subjectPositions)]
    pub fn subject_positions(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(&self.subject[..])
    }

    /// Pedestal positions as a Float32Array.
    #[wasm_bindgen(js_name = pedestalPositions)]
    pub fn pedestal_positions(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(&self.pedestal[..])
    }

    /// Engraving labels as a JSON array.
    #[wasm_bindgen(js_name = labelsJson)]
    pub fn labels_json(&self) -> String {
        self.labels_json.clone()
    }

    /// Triangles that the export would contain.
    #[wasm_bindgen(getter, js_name = triangleCount)]
    pub fn triangle_count(&self) -> u32 {
        u32::try_from((self.subject.len() + self.pedestal.len()) / 9).unwrap_or(u32::MAX)
    }
}

impl PreviewHandle {
    /// Creates a handle from a core preview.
    pub fn from_preview(preview: &Preview) -> Result<Self, BridgeError> {
        Ok(Self {
            subject: preview.scene.subject().triangles().to_f32(),
            pedestal: preview.scene.pedestal().triangles().to_f32(),
            labels_json: serde_json::to_string(preview.overlay.labels())?,
        })
    }

    /// Subject positions without crossing into JavaScript.
    pub fn subject_slice(&self) -> &[f32] {
        &self.subject
    }

    /// Pedestal positions without crossing into JavaScript.
    pub fn pedestal_slice(&self) -> &[f32] {
        &self.pedestal
    }
}
