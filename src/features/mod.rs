//! Feature modules
//!
//! - Macro expansion: tokens, the expansion context and the built-in library

pub mod macros;

pub use macros::{expand_macros, MacroDefinition, MacroExpander, MacroTable};
