//! WASM bindings for the case review client
//!
//! Routing, fetching and view state all live in Rust. JavaScript renders the
//! JSON snapshots and forwards clicks.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { CaseReviewApp } from './pkg/case_review_wasm.js';
//!
//! await init();
//!
//! const app = new CaseReviewApp("http://localhost:8000");
//! app.setOnChange(() => render(JSON.parse(app.caseListView())));
//! app.navigate("/cases");
//! app.setSearch("Chen");
//!
//! // later, from a row click
//! app.navigate("/cases/case-001");
//! const detail = JSON.parse(app.caseDetailView());
//! ```

pub mod app;
pub mod fetch;
pub mod snapshot;

use wasm_bindgen::prelude::*;

pub use app::CaseReviewApp;
pub use fetch::FetchRepository;

/// Initialize the WASM module
/// Called automatically by wasm-bindgen
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Get the library version
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Log to the browser console
pub(crate) fn console_log(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}
