//! WASM bindings for mathfence
//!
//! JavaScript-accessible functions for finding math in text and expanding
//! macros.

#[cfg(feature = "wasm")]
use std::sync::{Arc, Mutex};

#[cfg(feature = "wasm")]
use indexmap::IndexMap;
#[cfg(feature = "wasm")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use crate::{DelimiterSpec, Fences, RenderOptions};

/// Rendering options (exposed to WASM)
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AutoRenderOptions {
    /// Explicit delimiter list; takes precedence over `fences`
    #[serde(default)]
    pub delimiters: Option<Vec<DelimiterSpec>>,
    /// Preset key: `$`, `(`, `$+`, `(+`, `ams` or `all`
    #[serde(default)]
    pub fences: Option<String>,
    /// Seed macros, name → body
    #[serde(default)]
    pub macros: IndexMap<String, String>,
    /// Expansion steps allowed per math region
    #[serde(default)]
    pub max_expand: Option<usize>,
}

#[cfg(feature = "wasm")]
impl AutoRenderOptions {
    fn into_render_options(self) -> RenderOptions {
        let mut options = RenderOptions {
            delimiters: self.delimiters,
            fences: self.fences.as_deref().map(Fences::from_key),
            macros: self.macros,
            ..RenderOptions::default()
        };
        if let Some(max_expand) = self.max_expand {
            options.max_expand = max_expand;
        }
        options
    }
}

/// Rendering result with the failures reported along the way
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered output
    pub output: String,
    /// Whether the pass completed
    pub success: bool,
    /// Error message if the pass aborted
    pub error: Option<String>,
    /// One message per math region left as written
    pub failures: Vec<String>,
}

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

#[cfg(feature = "wasm")]
fn parse_options(options: JsValue) -> AutoRenderOptions {
    if options.is_undefined() || options.is_null() {
        return AutoRenderOptions::default();
    }
    serde_wasm_bindgen::from_value(options).unwrap_or_default()
}

/// Split text into text and math segments
///
/// # Returns
/// An array of `{type: "text", content}` and
/// `{type: "math", content, raw, display}` objects
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "splitAtDelimiters")]
pub fn split_at_delimiters_wasm(text: &str, options: JsValue) -> JsValue {
    let options = parse_options(options).into_render_options();
    let delimiters = options.resolved_delimiters();
    let segments = crate::split_at_delimiters(text, &delimiters);
    serde_wasm_bindgen::to_value(&segments).unwrap_or(JsValue::UNDEFINED)
}

/// Render every math region of `text` to expanded TeX
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "renderMathInText")]
pub fn render_math_in_text_wasm(text: &str, options: JsValue) -> JsValue {
    let failures = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&failures);
    let options = parse_options(options)
        .into_render_options()
        .with_error_callback(move |message, _| {
            if let Ok(mut list) = sink.lock() {
                list.push(message.to_string());
            }
        });

    let rendered = crate::render_text(text, &options);
    let failures = failures.lock().map(|list| list.clone()).unwrap_or_default();

    let result = match rendered {
        Ok(output) => RenderResult {
            output,
            success: true,
            error: None,
            failures,
        },
        Err(err) => RenderResult {
            output: String::new(),
            success: false,
            error: Some(err.to_string()),
            failures,
        },
    };

    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::UNDEFINED)
}

/// Expand macros in a single math formula (without delimiters)
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "expandMacros")]
pub fn expand_macros_wasm(source: &str) -> JsValue {
    let result = match crate::expand_formula(source) {
        Ok(output) => RenderResult {
            output,
            success: true,
            error: None,
            failures: vec![],
        },
        Err(err) => RenderResult {
            output: String::new(),
            success: false,
            error: Some(format!("ParseError: {}", err)),
            failures: vec![],
        },
    };

    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::UNDEFINED)
}

/// Get the library version
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "getVersion")]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
