//! Concrete expansion context
//!
//! [`MacroExpander`] owns the token stack for one math source and borrows the
//! macro table mutably for its lifetime, so at most one expansion can write to
//! a table at a time.

use std::collections::VecDeque;

use super::token::{tokenize, tokens_to_string, Token};
use super::{MacroContext, MacroDefinition, MacroExpansion, MacroTable, MacroValue, Mode};
use crate::utils::error::{ParseError, ParseResult};

/// Default expansion step budget per source
pub const DEFAULT_MAX_EXPAND: usize = 1000;

/// Expands macros in a token stream
#[derive(Debug)]
pub struct MacroExpander<'m> {
    /// Pending input, front is read next
    stack: VecDeque<Token>,
    macros: &'m mut MacroTable,
    mode: Mode,
    expansion_count: usize,
    max_expand: usize,
}

impl<'m> MacroExpander<'m> {
    pub fn new(input: &str, macros: &'m mut MacroTable, mode: Mode) -> Self {
        Self {
            stack: tokenize(input).into(),
            macros,
            mode,
            expansion_count: 0,
            max_expand: DEFAULT_MAX_EXPAND,
        }
    }

    /// Limit the number of expansion steps; exceeding it is a parse error
    pub fn with_max_expand(mut self, max_expand: usize) -> Self {
        self.max_expand = max_expand;
        self
    }

    /// Append more source after the pending input
    pub fn feed(&mut self, input: &str) {
        self.stack.extend(tokenize(input));
    }

    pub fn expansion_count(&self) -> usize {
        self.expansion_count
    }

    fn count_expansion(&mut self) -> ParseResult<()> {
        self.expansion_count += 1;
        if self.expansion_count > self.max_expand {
            return Err(ParseError::TooManyExpansions {
                limit: self.max_expand,
            });
        }
        Ok(())
    }

    /// Resolve `name` to its expansion, running procedural macros
    fn get_expansion(&mut self, name: &str) -> ParseResult<Option<MacroExpansion>> {
        // Cloned so a procedure may redefine entries while it runs
        let Some(definition) = self.macros.get(name).cloned() else {
            return Ok(None);
        };

        let expansion = match definition {
            MacroDefinition::Text(body) => MacroExpansion::from_text(&body),
            MacroDefinition::Tokens(expansion) => expansion,
            MacroDefinition::Procedure(procedure) => match procedure(self)? {
                MacroValue::Expansion(expansion) => expansion,
                MacroValue::Text(body) => MacroExpansion::from_text(&body),
            },
        };
        Ok(Some(expansion))
    }

    /// Expand until an unexpandable token is on top, then pop it.
    ///
    /// A token marked by `\noexpand` comes out as `\relax`.
    pub fn expand_next_token(&mut self) -> ParseResult<Token> {
        loop {
            if let Some(token) = self.expand_once(false)? {
                if token.is_eof() && self.stack.is_empty() {
                    return Ok(token);
                }
                let mut token = self.pop_token();
                if token.treat_as_relax {
                    token.text = "\\relax".to_string();
                }
                return Ok(token);
            }
        }
    }

    /// Expand the whole input into unexpandable tokens
    pub fn expand_fully(&mut self) -> ParseResult<Vec<Token>> {
        let mut out = Vec::new();
        loop {
            let token = self.expand_next_token()?;
            if token.is_eof() && self.stack.is_empty() {
                break;
            }
            out.push(token);
        }
        Ok(out)
    }

    fn consume_single_arg(&mut self) -> ParseResult<Vec<Token>> {
        self.consume_spaces();
        let starts_with_brace = self.future().text == "{";
        let mut tokens = Vec::new();
        let mut depth: i32 = 0;

        loop {
            if self.stack.is_empty() {
                return Err(ParseError::MissingArgument);
            }
            let token = self.pop_token();
            if token.text == "{" {
                depth += 1;
            } else if token.text == "}" {
                depth -= 1;
                if depth < 0 {
                    return Err(ParseError::ExtraCloseBrace);
                }
            }
            tokens.push(token);
            if depth == 0 {
                break;
            }
        }

        if starts_with_brace {
            tokens.pop();
            tokens.remove(0);
        }
        Ok(tokens)
    }
}

/// Replace `#n` with argument `n` and `##` with `#`
fn substitute_args(body: Vec<Token>, args: &[Vec<Token>]) -> ParseResult<Vec<Token>> {
    let mut out = Vec::with_capacity(body.len());
    let mut tokens = body.into_iter();

    while let Some(token) = tokens.next() {
        if token.text != "#" {
            out.push(token);
            continue;
        }
        let next = tokens.next().ok_or(ParseError::InvalidArgumentNumber)?;
        if next.text == "#" {
            out.push(next);
            continue;
        }
        let index = match next.text.as_bytes() {
            [digit @ b'1'..=b'9'] => usize::from(digit - b'1'),
            _ => return Err(ParseError::InvalidArgumentNumber),
        };
        let arg = args.get(index).ok_or(ParseError::InvalidArgumentNumber)?;
        out.extend(arg.iter().cloned());
    }

    Ok(out)
}

impl MacroContext for MacroExpander<'_> {
    fn pop_token(&mut self) -> Token {
        self.stack.pop_front().unwrap_or_else(Token::eof)
    }

    fn future(&self) -> Token {
        self.stack.front().cloned().unwrap_or_else(Token::eof)
    }

    fn push_tokens(&mut self, tokens: Vec<Token>) {
        for token in tokens.into_iter().rev() {
            self.stack.push_front(token);
        }
    }

    fn expand_once(&mut self, expandable_only: bool) -> ParseResult<Option<Token>> {
        let Some(top) = self.stack.pop_front() else {
            return Ok(Some(Token::eof()));
        };

        let expansion = if top.noexpand || (expandable_only && !self.is_expandable(&top.text)) {
            None
        } else {
            self.get_expansion(&top.text)?
        };

        let Some(expansion) = expansion else {
            self.stack.push_front(top.clone());
            return Ok(Some(top));
        };

        self.count_expansion()?;
        tracing::trace!(name = %top.text, args = expansion.num_args, "expanding macro");

        let tokens = if expansion.num_args > 0 {
            let args = self.consume_args(expansion.num_args)?;
            substitute_args(expansion.tokens, &args)?
        } else {
            expansion.tokens
        };
        self.push_tokens(tokens);
        Ok(None)
    }

    fn expand_after_future(&mut self) -> ParseResult<Token> {
        while self.expand_once(false)?.is_none() {}
        Ok(self.future())
    }

    fn consume_args(&mut self, n: usize) -> ParseResult<Vec<Vec<Token>>> {
        (0..n).map(|_| self.consume_single_arg()).collect()
    }

    fn consume_spaces(&mut self) {
        while self.stack.front().is_some_and(Token::is_space) {
            self.stack.pop_front();
        }
    }

    fn is_expandable(&self, name: &str) -> bool {
        self.macros.contains(name)
    }

    fn mode(&self) -> Mode {
        self.mode
    }

    fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    fn macros(&mut self) -> &mut MacroTable {
        &mut *self.macros
    }
}

/// Expand every macro in `source` (math mode) and return the resulting TeX
pub fn expand_macros(source: &str, macros: &mut MacroTable) -> ParseResult<String> {
    let tokens = MacroExpander::new(source, macros, Mode::Math).expand_fully()?;
    Ok(tokens_to_string(&tokens))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_pop_and_future_at_eof() {
        let mut table = MacroTable::new();
        let mut exp = MacroExpander::new("a", &mut table, Mode::Math);
        assert_eq!(exp.future().text, "a");
        assert_eq!(exp.pop_token().text, "a");
        assert!(exp.future().is_eof());
        assert!(exp.pop_token().is_eof());
        assert!(exp.pop_token().is_eof());
    }

    #[test]
    fn test_consume_args_groups_and_single_tokens() {
        let mut table = MacroTable::new();
        let mut exp = MacroExpander::new("{a{b}c} x{}", &mut table, Mode::Math);
        let args = exp.consume_args(3).unwrap();
        assert_eq!(texts(&args[0]), vec!["a", "{", "b", "}", "c"]);
        assert_eq!(texts(&args[1]), vec!["x"]);
        assert!(args[2].is_empty());
    }

    #[test]
    fn test_consume_args_missing() {
        let mut table = MacroTable::new();
        let mut exp = MacroExpander::new("{a", &mut table, Mode::Math);
        assert_eq!(exp.consume_args(1), Err(ParseError::MissingArgument));

        let mut table = MacroTable::new();
        let mut exp = MacroExpander::new("a", &mut table, Mode::Math);
        assert_eq!(exp.consume_args(2), Err(ParseError::MissingArgument));
    }

    #[test]
    fn test_consume_args_extra_brace() {
        let mut table = MacroTable::new();
        let mut exp = MacroExpander::new("}", &mut table, Mode::Math);
        assert_eq!(exp.consume_args(1), Err(ParseError::ExtraCloseBrace));
    }

    #[test]
    fn test_consume_spaces() {
        let mut table = MacroTable::new();
        let mut exp = MacroExpander::new("   x", &mut table, Mode::Math);
        exp.consume_spaces();
        assert_eq!(exp.future().text, "x");
    }

    #[test]
    fn test_template_substitution() {
        let mut table = MacroTable::new();
        table.define("\\pair", MacroDefinition::text("(#1,#2)"));
        assert_eq!(expand_macros(r"\pair{a}{bc}", &mut table).unwrap(), "(a,bc)");
    }

    #[test]
    fn test_double_hash_collapses() {
        let mut table = MacroTable::new();
        table.define("\\h", MacroDefinition::text("#1##"));
        assert_eq!(expand_macros(r"\h x", &mut table).unwrap(), "x#");
    }

    #[test]
    fn test_expand_once_leaves_non_macro() {
        let mut table = MacroTable::new();
        let mut exp = MacroExpander::new(r"\undefined", &mut table, Mode::Math);
        let left = exp.expand_once(true).unwrap();
        assert_eq!(left.map(|t| t.text), Some("\\undefined".to_string()));
        assert_eq!(exp.future().text, "\\undefined");
    }

    #[test]
    fn test_expand_once_single_step() {
        let mut table = MacroTable::new();
        table.define("\\a", MacroDefinition::text("\\b"));
        table.define("\\b", MacroDefinition::text("c"));
        let mut exp = MacroExpander::new(r"\a", &mut table, Mode::Math);
        assert_eq!(exp.expand_once(false).unwrap(), None);
        assert_eq!(exp.future().text, "\\b");
        assert_eq!(exp.expand_after_future().unwrap().text, "c");
    }

    #[test]
    fn test_recursive_macro_hits_limit() {
        let mut table = MacroTable::new();
        table.define("\\loop", MacroDefinition::text("\\loop"));
        let result = MacroExpander::new(r"\loop", &mut table, Mode::Math)
            .with_max_expand(50)
            .expand_fully();
        assert_eq!(result, Err(ParseError::TooManyExpansions { limit: 50 }));
    }

    #[test]
    fn test_invalid_argument_number() {
        let mut table = MacroTable::new();
        table.define("\\bad", MacroDefinition::text("#1#x"));
        assert_eq!(
            expand_macros(r"\bad a", &mut table),
            Err(ParseError::InvalidArgumentNumber)
        );
    }

    #[test]
    fn test_feed_appends_input() {
        let mut table = MacroTable::new();
        let mut exp = MacroExpander::new("a", &mut table, Mode::Math);
        exp.feed("b");
        let tokens = exp.expand_fully().unwrap();
        assert_eq!(texts(&tokens), vec!["a", "b"]);
    }

    #[test]
    fn test_mode_switch() {
        let mut table = MacroTable::new();
        let mut exp = MacroExpander::new("", &mut table, Mode::Math);
        exp.set_mode(Mode::Text);
        assert_eq!(exp.mode(), Mode::Text);
    }
}
