//! WASM-facing entry points for the gift workbench.
//!
//! This crate is compiled to a `cdylib` and consumed from JavaScript via
//! `wasm-bindgen`. Native tests use the `*_internal` helpers, which return
//! Rust errors instead of JS values.
//!
//! ```
//! let json = giftforge_wasm::default_settings_json();
//! assert!(json.contains("\"shape\":\"box\""));
//! ```

use giftforge_mesh::{ChangeOrigin, LoadOutcome, PedestalSettings, Workbench};
use wasm_bindgen::prelude::*;

mod error;
mod loader;
mod preview_handle;

pub use error::BridgeError;
pub use loader::SubjectLoader;
pub use preview_handle::PreviewHandle;

use error::to_js;

/// Installs a panic hook that forwards Rust panics to the browser console.
///
/// # Examples
/// ```no_run
/// // In JavaScript: import and call once at startup.
/// // import { init_panic_hook } from "giftforge-wasm";
/// // init_panic_hook();
/// ```
#[wasm_bindgen]
pub fn init_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Default pedestal settings as JSON, for initializing the controls.
#[wasm_bindgen]
pub fn default_settings_json() -> String {
    serde_json::to_string(&PedestalSettings::default()).unwrap_or_default()
}

/// One editing session: settings, subject and the auto-fit latch.
///
/// # Examples
/// ```no_run
/// // In JavaScript:
/// // const bench = new Workbench();
/// // const outcome = JSON.parse(bench.loadSubject(loader));
/// // bench.updateSettingsJson(JSON.stringify({ ...settings, height: 15 }));
/// // const stl = bench.exportStl(); // Uint8Array
/// ```
#[wasm_bindgen(js_name = Workbench)]
#[derive(Debug, Default)]
pub struct WorkbenchHandle {
    inner: Workbench,
}

#[wasm_bindgen(js_class = Workbench)]
impl WorkbenchHandle {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes and stores the subject; returns the load outcome as JSON.
    #[wasm_bindgen(js_name = loadSubject)]
    pub fn load_subject(&mut self, loader: &SubjectLoader) -> Result<String, JsValue> {
        let outcome = self.load_subject_internal(loader).map_err(to_js)?;
        serde_json::to_string(&outcome).map_err(|err| to_js(err.into()))
    }

    /// Current settings as JSON.
    #[wasm_bindgen(js_name = settingsJson)]
    pub fn settings_json(&self) -> String {
        serde_json::to_string(self.inner.settings()).unwrap_or_default()
    }

    /// Replaces the settings with a user edit.
    #[wasm_bindgen(js_name = updateSettingsJson)]
    pub fn update_settings_json(&mut self, json: &str) -> Result<(), JsValue> {
        self.update_settings_json_internal(json, false).map_err(to_js)
    }

    /// Replaces the settings with slider values, clamped to their ranges.
    #[wasm_bindgen(js_name = applySliderJson)]
    pub fn apply_slider_json(&mut self, json: &str) -> Result<(), JsValue> {
        self.update_settings_json_internal(json, true).map_err(to_js)
    }

    /// Fits the subject again to the current pedestal width.
    pub fn refit(&mut self) -> bool {
        self.inner.refit()
    }

    /// `"user"`, `"autoFit"`, or undefined before the first change.
    #[wasm_bindgen(js_name = lastChange)]
    pub fn last_change(&self) -> Option<String> {
        self.inner.last_change().map(|origin| {
            match origin {
                ChangeOrigin::User => "user",
                ChangeOrigin::AutoFit => "autoFit",
            }
            .to_string()
        })
    }

    /// Composed scene and engraving labels for the viewport.
    pub fn preview(&self) -> Result<PreviewHandle, JsValue> {
        self.preview_internal().map_err(to_js)
    }

    /// Binary STL of the current scene (millimetres, Z up).
    #[wasm_bindgen(js_name = exportStl)]
    pub fn export_stl(&self) -> Result<Vec<u8>, JsValue> {
        self.inner
            .export_stl()
            .map_err(|err| to_js(err.into()))
    }
}

impl WorkbenchHandle {
    /// The wrapped session.
    pub fn inner(&self) -> &Workbench {
        &self.inner
    }

    /// Host-side version of [`WorkbenchHandle::load_subject`].
    pub fn load_subject_internal(
        &mut self,
        loader: &SubjectLoader,
    ) -> Result<LoadOutcome, BridgeError> {
        Ok(self.inner.load_subject(loader.raw())?)
    }

    /// Host-side version of the settings updates.
    pub fn update_settings_json_internal(
        &mut self,
        json: &str,
        clamp: bool,
    ) -> Result<(), BridgeError> {
        let mut settings: PedestalSettings = serde_json::from_str(json)?;
        if clamp {
            settings = settings.clamped();
        }
        self.inner.update_settings(settings)?;
        Ok(())
    }

    /// Host-side version of [`WorkbenchHandle::preview`].
    pub fn preview_internal(&self) -> Result<PreviewHandle, BridgeError> {
        PreviewHandle::from_preview(&self.inner.preview()?)
    }
}
