//! Core modules
//!
//! - `delimiters`: delimiter specs and the `fences` presets
//! - `scanner`: splitting text into text and math segments
//! - `options`: render options
//! - `render`: the per-region rendering driver and the built-in TeX renderer
//! - `tree`: rendering math inside a content tree

pub mod delimiters;
pub mod options;
pub mod render;
pub mod scanner;
pub mod tree;

pub use delimiters::{basic_delimiters, resolve_delimiters, DelimiterSource, DelimiterSpec, Fences};
pub use options::RenderOptions;
pub use render::{
    render_math_in_text, render_to_tex, Fragment, MathRenderer, RenderedMath, TexRenderer,
};
pub use scanner::{find_end_of_math, split_at_delimiters, MathScanner, Segment};
pub use tree::{render_math_in_element, Element, Node};
