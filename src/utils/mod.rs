//! Utility modules

pub mod error;

pub use error::{DelimiterError, ParseError, ParseResult, RenderError};
