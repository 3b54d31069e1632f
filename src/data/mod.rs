//! Data layer - Static tables
//!
//! - Built-in macro templates
//! - amsmath dots lookahead tables
//! - Math symbol classes

pub mod dots;
pub mod symbols;
pub mod templates;

pub use dots::{DOTS_BY_TOKEN, SPACE_AFTER_DOTS};
pub use symbols::{symbol_group, SymbolGroup, MATH_SYMBOL_GROUPS};
pub use templates::{get_template, TEMPLATES};
