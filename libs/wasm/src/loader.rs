//! # Subject Loader
//!
//! Collects the primitives the JavaScript asset loader found into the typed
//! [`RawMesh`] the core accepts. The core never walks a scene graph itself.

use giftforge_mesh::normalize::{PositionBuffer, RawMesh, RawPrimitive};
use glam::DMat4;
use wasm_bindgen::prelude::*;

use crate::error::{to_js, BridgeError};

/// Builder for one loaded subject mesh.
///
/// # Example (JavaScript)
///
/// ```javascript
/// const loader = new SubjectLoader(url);
/// gltf.scene.traverse((node) => {
///   if (!node.isMesh) return;
///   const pos = node.geometry.attributes.position;
///   const data = pos.isInterleavedBufferAttribute ? pos.data.array : pos.array;
///   const stride = pos.isInterleavedBufferAttribute ? pos.data.stride : pos.itemSize;
///   loader.pushPrimitive(data, pos.itemSize, stride, pos.offset ?? 0, pos.normalized,
///     node.geometry.index?.array, node.matrixWorld.elements);
/// });
/// ```
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct SubjectLoader {
    mesh: RawMesh,
}

#[wasm_bindgen]
impl SubjectLoader {
    /// Starts a mesh with the given identity, usually the asset URL.
    #[wasm_bindgen(constructor)]
    pub fn new(id: String) -> Self {
        Self {
            mesh: RawMesh::new(id),
        }
    }

    /// Adds one primitive.
    ///
    /// # Errors
    ///
    /// A JavaScript error string if `world` is present but not 16 floats.
    #[wasm_bindgen(js_name = pushPrimitive)]
    #[allow(clippy::too_many_arguments)]
    pub fn push_primitive(
        &mut self,
        positions: Vec<f32>,
        item_size: usize,
        stride: usize,
        offset: usize,
        normalized: bool,
        indices: Option<Vec<u32>>,
        world: Option<Vec<f64>>,
    ) -> Result<(), JsValue> {
        self.push_primitive_internal(positions, item_size, stride, offset, normalized, indices, world)
            .map_err(to_js)
    }

    /// Number of primitives collected so far.
    #[wasm_bindgen(js_name = primitiveCount)]
    pub fn primitive_count(&self) -> usize {
        self.mesh.primitives.len()
    }
}

impl SubjectLoader {
    /// Host-side version of [`SubjectLoader::push_primitive`].
    #[allow(clippy::too_many_arguments)]
    pub fn push_primitive_internal(
        &mut self,
        positions: Vec<f32>,
        item_size: usize,
        stride: usize,
        offset: usize,
        normalized: bool,
        indices: Option<Vec<u32>>,
        world: Option<Vec<f64>>,
    ) -> Result<(), BridgeError> {
        let buffer = PositionBuffer {
            data: positions,
            item_size,
            stride,
            offset,
            normalized,
        };
        let mut primitive = RawPrimitive::new(buffer);
        if let Some(indices) = indices {
            primitive = primitive.with_indices(indices);
        }
        if let Some(world) = world {
            if world.len() != 16 {
                return Err(BridgeError::WorldMatrix(world.len()));
            }
            primitive = primitive.with_world(DMat4::from_cols_slice(&world));
        }
        self.mesh.push(primitive);
        Ok(())
    }

    /// The collected mesh.
    pub fn raw(&self) -> &RawMesh {
        &self.mesh
    }
}
