//! Error handling for mathfence
//!
//! Two families of failure exist:
//!
//! - [`ParseError`]: malformed macro usage or malformed math source. These are
//!   recoverable at the granularity of one math region.
//! - Everything else ([`RenderError::Fatal`], [`DelimiterError`]): environment
//!   or programming faults that abort a whole pass.
//!
//! An unterminated delimiter is *not* an error; the scanner degrades to plain
//! text instead.

use thiserror::Error;

/// Error raised while expanding macros or parsing a math source
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input ended before a macro argument was complete
    #[error("Unexpected end of input in a macro argument, expected '}}'")]
    MissingArgument,

    /// A `}` appeared where an argument was expected
    #[error("Extra }}")]
    ExtraCloseBrace,

    /// `\char` found no valid digit for the selected base
    #[error("Invalid base-{base} digit {digit}")]
    InvalidDigit { base: u32, digit: String },

    /// `\char`` reached the end of input
    #[error("\\char` missing argument")]
    MissingCharArgument,

    /// `\char` digits name a code above U+10FFFF
    #[error("Character code too large in \\char")]
    CharCodeTooLarge,

    /// A second `\tag` in the same formula
    #[error("Multiple \\tag")]
    DuplicateTag,

    /// `\newextarrow` spacing argument is not `lspace,rspace`
    #[error("Invalid lspace,rspace in \\newextarrow.")]
    InvalidArrowSpacing,

    /// `\newextarrow` character code is not numeric
    #[error("Invalid Unicode character code in \\newextarrow.")]
    InvalidArrowCharCode,

    /// `\newextarrow` first argument does not name a macro
    #[error("Invalid arrow name in \\newextarrow.")]
    InvalidArrowName,

    /// Expansion step budget exhausted
    #[error("Too many expansions: infinite loop or need to increase maxExpand setting (limit {limit})")]
    TooManyExpansions { limit: usize },

    /// `#` followed by something other than `#` or a digit `1..9`
    #[error("Not a valid argument number")]
    InvalidArgumentNumber,

    /// A definition macro did not receive a macro name
    #[error("Expected a control sequence to define")]
    InvalidMacroName,

    /// `\newcommand[n]` with a non-numeric `n`
    #[error("Invalid number of arguments: {0}")]
    InvalidArgumentCount(String),

    /// `\newcommand` on an existing name
    #[error("\\newcommand{{{0}}} attempting to redefine {0}; use \\renewcommand")]
    MacroAlreadyDefined(String),

    /// `\renewcommand` on an unknown name
    #[error("\\renewcommand{{{0}}} when command {0} does not yet exist; use \\newcommand")]
    MacroNotDefined(String),
}

impl ParseError {
    pub fn invalid_digit(base: u32, digit: impl Into<String>) -> Self {
        ParseError::InvalidDigit {
            base,
            digit: digit.into(),
        }
    }
}

/// Result type for expansion operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Error returned by a math renderer
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    /// The math source was malformed; the region can be skipped
    #[error("ParseError: {0}")]
    Parse(#[from] ParseError),

    /// Anything else; aborts the pass
    #[error("Render failed: {message}")]
    Fatal { message: String },
}

impl RenderError {
    pub fn fatal(message: impl Into<String>) -> Self {
        RenderError::Fatal {
            message: message.into(),
        }
    }

    /// Whether the error is confined to a single math region
    pub fn is_recoverable(&self) -> bool {
        matches!(self, RenderError::Parse(_))
    }
}

/// Error building a scanner from a delimiter list
#[derive(Debug, Error)]
pub enum DelimiterError {
    /// A delimiter with an empty left side would match everywhere
    #[error("Delimiter at position {index} has an empty left side")]
    EmptyLeft { index: usize },

    /// The alternation pattern could not be compiled
    #[error("Invalid delimiter pattern: {0}")]
    Pattern(#[from] regex::Error),
}
