//! # mathfence
//!
//! Find math in plain text and expand TeX macros inside it.
//!
//! ## Features
//!
//! - **Delimiter Segmentation**: split text at configurable math delimiters,
//!   respecting nested braces and backslash escapes
//! - **Fence Presets**: `$`, `(`, `$+`, `(+`, `ams`, `all` and the basic default
//! - **Macro Expansion**: a token-level TeX macro expander with an injectable,
//!   mutable macro table
//! - **Built-in Library**: amsmath/mathtools/braket/upgreek aliases plus the
//!   procedural macros (`\char`, `\dots`, `\@ifnextchar`, `\newextarrow`, …)
//! - **Per-region Error Recovery**: a formula that fails to parse is reported
//!   and left as written
//! - **WASM Support**: compiles to WebAssembly for browser usage
//!
//! ## Usage Examples
//!
//! ### Splitting Text
//!
//! ```rust
//! use mathfence::{split_at_delimiters, DelimiterSpec, Segment};
//!
//! let delimiters = vec![DelimiterSpec::display("$$", "$$")];
//! let segments = split_at_delimiters("see $$ a{$$}b $$", &delimiters);
//! assert_eq!(segments[1], Segment::Math {
//!     content: " a{$$}b ",
//!     raw: "$$ a{$$}b $$",
//!     display: true,
//! });
//! ```
//!
//! ### Expanding Macros
//!
//! ```rust
//! use mathfence::{expand_macros, MacroTable};
//!
//! let mut table = MacroTable::with_builtins();
//! let tex = expand_macros(r"\char'101", &mut table).unwrap();
//! assert_eq!(tex, r"\@char{65}");
//! ```
//!
//! ### Rendering a Document
//!
//! ```rust
//! use mathfence::{render_text, RenderOptions};
//!
//! let out = render_text(r"Let $\bra{\psi}$ be a state.", &RenderOptions::dollars()).unwrap();
//! assert_eq!(out, r"Let \( \mathinner{\langle{\psi}|} \) be a state.");
//! ```

/// Core modules: delimiters, scanning, rendering
pub mod core;

/// Data layer - static tables
pub mod data;

/// Feature modules - macro expansion
pub mod features;

/// Utility modules
pub mod utils;

/// WASM bindings (feature-gated)
#[cfg(feature = "wasm")]
pub mod wasm;

pub use core::delimiters::{resolve_delimiters, DelimiterSource, DelimiterSpec, Fences};
pub use core::options::RenderOptions;
pub use core::render::{
    render_math_in_text, render_to_tex, Fragment, MathRenderer, RenderedMath, TexRenderer,
};
pub use core::scanner::{split_at_delimiters, MathScanner, Segment};
pub use core::tree::{render_math_in_element, Element, Node};

pub use features::macros;
pub use features::macros::{expand_macros, MacroDefinition, MacroExpander, MacroTable};

pub use utils::error::{DelimiterError, ParseError, ParseResult, RenderError};

/// Render every math region of `text` with the built-in TeX renderer.
///
/// A fresh macro table (built-ins plus `options.macros`) is shared by all
/// regions of the call.
pub fn render_text(text: &str, options: &RenderOptions) -> Result<String, RenderError> {
    let mut macros = options.macro_table();
    render_to_tex(text, options, &mut macros)
}

/// Expand `source` as a single math formula against a fresh built-in table
pub fn expand_formula(source: &str) -> ParseResult<String> {
    let mut table = MacroTable::with_builtins();
    expand_macros(source, &mut table)
}
