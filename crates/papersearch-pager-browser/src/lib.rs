//! Browser DOM layer for the papersearch result pager.
//!
//! Implements the `papersearch-pager` host traits over `web-sys` and wires
//! the four paging buttons to a `Paginator`. It assumes a
//! `wasm32-unknown-unknown` target environment.
//!
//! # Usage from the result page
//!
//! ```js
//! import init, { mount } from "./papersearch_pager_browser.js";
//!
//! await init();
//! const pager = mount(); // or mount({ page_size: 20 })
//! ```
//!
//! `mount` returns `undefined` on pages without paging controls.
//!
//! Everything past the `papersearch_pager` re-export only exists on
//! `wasm32-unknown-unknown`; native builds of the workspace see an empty crate.

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
pub mod dom;
#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
pub mod mount;

pub use papersearch_pager;

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
pub use dom::{BrowserButton, BrowserHost, BrowserItems};
#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
pub use mount::{MountedPager, mount};

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
use papersearch_pager::{Control, PagerConfig};
#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
use wasm_bindgen::prelude::*;

/// Install the panic hook and console logging.
#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    use tracing::Level;
    use tracing::subscriber::set_global_default;
    use tracing_subscriber::Registry;
    use tracing_subscriber::layer::SubscriberExt;

    let console_level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let wasm_layer = tracing_wasm::WASMLayer::new(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(console_level)
            .build(),
    );

    let _ = set_global_default(Registry::default().with(wasm_layer));
}

/// Pagination mounted on the current page, exposed to JavaScript.
///
/// Listeners stay attached until `free()` is called.
#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
#[wasm_bindgen]
pub struct JsPager {
    mounted: MountedPager,
}

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
#[wasm_bindgen]
impl JsPager {
    /// Apply a click by control name (`next-paper`, `prev-paper`,
    /// `next-author`, `prev-author`). Returns whether the window moved.
    pub fn click(&self, control: &str) -> Result<bool, JsError> {
        let control: Control = control.parse().map_err(|e| JsError::new(&format!("{e}")))?;
        let transition = self
            .mounted
            .click(control)
            .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(matches!(transition, papersearch_pager::Transition::Moved(_)))
    }

    /// Current state of both lists, papers first.
    pub fn snapshot(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&self.mounted.snapshot())
            .map_err(|e| JsError::new(&format!("Snapshot serialization failed: {}", e)))
    }
}

/// Mount pagination on `window.document`.
///
/// `config` is an optional object with the fields of `PagerConfig`; missing
/// fields take the stock template's values.
#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
#[wasm_bindgen(js_name = mount)]
pub fn mount_page(config: JsValue) -> Result<Option<JsPager>, JsError> {
    let config: PagerConfig = if config.is_undefined() || config.is_null() {
        PagerConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsError::new(&format!("Invalid pager config: {}", e)))?
    };

    let window = web_sys::window().ok_or_else(|| JsError::new("no window"))?;
    let document = window.document().ok_or_else(|| JsError::new("no document"))?;

    let mounted = mount(&document, &config).map_err(|e| JsError::new(&e.to_string()))?;
    Ok(mounted.map(|mounted| JsPager { mounted }))
}
