//! TeX Macro Expansion Module
//!
//! This module models TeX's macro language on a token stream:
//!
//! - [`MacroContext`]: the token-level primitives a macro may use (lookahead,
//!   argument consumption, one-step expansion, access to the macro table)
//! - [`MacroTable`]: an injectable name → definition registry, seeded with the
//!   built-in library and writable during expansion
//! - [`MacroExpander`]: the concrete context driving expansion of one source
//! - [`builtins`]: the built-in macro library
//!
//! ## Example
//!
//! ```rust
//! use mathfence::macros::{expand_macros, MacroTable};
//!
//! let mut table = MacroTable::with_builtins();
//! let out = expand_macros(r"\@firstoftwo{a}{b}", &mut table).unwrap();
//! assert_eq!(out, "a");
//! ```

use std::borrow::Cow;
use std::fmt;

use fxhash::FxHashMap;
use indexmap::IndexMap;

use crate::utils::error::{ParseError, ParseResult};

pub mod builtins;
pub mod definitions;
pub mod expander;
pub mod numeral;
pub mod token;

pub use builtins::BUILTIN_MACROS;
pub use expander::{expand_macros, MacroExpander, DEFAULT_MAX_EXPAND};
pub use token::{tokenize, tokens_to_string, Token};

/// Typesetting mode the expander is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Math,
    Text,
}

/// A token list plus the number of arguments it takes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MacroExpansion {
    /// Body tokens in reading order; `#` `n` pairs are placeholders
    pub tokens: Vec<Token>,
    pub num_args: usize,
}

impl MacroExpansion {
    pub fn new(tokens: Vec<Token>, num_args: usize) -> Self {
        Self { tokens, num_args }
    }

    /// Lex `body`, counting the `#1`, `#2`, … placeholders it uses
    pub fn from_text(body: &str) -> Self {
        Self::new(token::tokenize(body), count_args(body))
    }
}

/// Number of consecutive `#n` placeholders present in `body`
pub fn count_args(body: &str) -> usize {
    if !body.contains('#') {
        return 0;
    }
    let stripped = body.replace("##", "");
    let mut num_args = 0;
    while num_args < 9 && stripped.contains(&format!("#{}", num_args + 1)) {
        num_args += 1;
    }
    num_args
}

/// What a procedural macro produces
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MacroValue {
    /// Ready-made tokens
    Expansion(MacroExpansion),
    /// Source text, lexed and treated like a text template
    Text(Cow<'static, str>),
}

impl MacroValue {
    pub fn empty() -> Self {
        MacroValue::Text(Cow::Borrowed(""))
    }

    pub fn tokens(tokens: Vec<Token>) -> Self {
        MacroValue::Expansion(MacroExpansion::new(tokens, 0))
    }

    pub fn text(text: impl Into<Cow<'static, str>>) -> Self {
        MacroValue::Text(text.into())
    }
}

/// Signature of a procedural macro
pub type MacroFn = fn(&mut dyn MacroContext) -> ParseResult<MacroValue>;

/// A macro definition
#[derive(Clone)]
pub enum MacroDefinition {
    /// Template source with `#1..#9` placeholders
    Text(Cow<'static, str>),
    /// Pre-lexed template
    Tokens(MacroExpansion),
    /// Code consulting the expansion context
    Procedure(MacroFn),
}

impl MacroDefinition {
    pub fn text(body: impl Into<Cow<'static, str>>) -> Self {
        MacroDefinition::Text(body.into())
    }
}

impl fmt::Debug for MacroDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MacroDefinition::Text(body) => f.debug_tuple("Text").field(body).finish(),
            MacroDefinition::Tokens(exp) => f.debug_tuple("Tokens").field(exp).finish(),
            MacroDefinition::Procedure(_) => f.write_str("Procedure(..)"),
        }
    }
}

/// Name → definition registry.
///
/// Lookups consult the table's own definitions first and then, if enabled,
/// the built-in library. Definitions made during expansion land in the
/// table's own layer and shadow built-ins.
#[derive(Debug, Clone, Default)]
pub struct MacroTable {
    defined: FxHashMap<String, MacroDefinition>,
    builtins: bool,
}

impl MacroTable {
    /// An empty table without the built-in library
    pub fn new() -> Self {
        Self::default()
    }

    /// A table backed by the built-in library
    pub fn with_builtins() -> Self {
        Self {
            defined: FxHashMap::default(),
            builtins: true,
        }
    }

    /// A built-in backed table seeded with user definitions
    pub fn with_user_macros(macros: &IndexMap<String, String>) -> Self {
        let mut table = Self::with_builtins();
        for (name, body) in macros {
            table.define(name.clone(), MacroDefinition::text(body.clone()));
        }
        table
    }

    pub fn get(&self, name: &str) -> Option<&MacroDefinition> {
        self.defined.get(name).or_else(|| {
            if self.builtins {
                BUILTIN_MACROS.get(name)
            } else {
                None
            }
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Define or redefine `name`
    pub fn define(&mut self, name: impl Into<String>, definition: MacroDefinition) {
        let name = name.into();
        tracing::debug!(name = %name, "defining macro");
        self.defined.insert(name, definition);
    }

    /// Remove a definition made on this table; built-ins stay visible
    pub fn undefine(&mut self, name: &str) -> Option<MacroDefinition> {
        self.defined.remove(name)
    }

    /// Names defined on this table (not counting built-ins)
    pub fn defined_names(&self) -> impl Iterator<Item = &str> {
        self.defined.keys().map(String::as_str)
    }

    pub fn has_builtins(&self) -> bool {
        self.builtins
    }
}

/// Token-level primitives available to procedural macros.
///
/// Token order is always logical reading order: the front is the next token
/// to be read.
pub trait MacroContext {
    /// Remove and return the next token, or the EOF sentinel
    fn pop_token(&mut self) -> Token;

    /// Peek the next token without consuming or expanding it
    fn future(&self) -> Token;

    /// Put tokens back in front of the input, first token read first
    fn push_tokens(&mut self, tokens: Vec<Token>);

    /// Expand the next token one step if it is a macro.
    ///
    /// Returns `Some(token)` when the token was left in place unexpanded.
    /// With `expandable_only`, tokens that are not expandable are never touched.
    fn expand_once(&mut self, expandable_only: bool) -> ParseResult<Option<Token>>;

    /// Expand until a non-macro token is on top, then peek it
    fn expand_after_future(&mut self) -> ParseResult<Token>;

    /// Read `n` undelimited arguments
    fn consume_args(&mut self, n: usize) -> ParseResult<Vec<Vec<Token>>>;

    /// Discard contiguous space tokens
    fn consume_spaces(&mut self);

    /// Whether `name` currently has a macro definition
    fn is_expandable(&self, name: &str) -> bool;

    fn mode(&self) -> Mode;

    fn set_mode(&mut self, mode: Mode);

    /// The macro table, writable mid-expansion
    fn macros(&mut self) -> &mut MacroTable;

    /// Read a single argument
    fn consume_arg(&mut self) -> ParseResult<Vec<Token>> {
        let mut args = self.consume_args(1)?;
        args.pop().ok_or(ParseError::MissingArgument)
    }
}
