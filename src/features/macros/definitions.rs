//! Macro definition commands: `\def`, `\gdef`, `\newcommand` and friends
//!
//! Definitions are written straight into the context's macro table, so they
//! stay visible to every later expansion that shares the table. There is no
//! group scoping: `\def` behaves like `\gdef`.

use super::token::Token;
use super::{MacroContext, MacroDefinition, MacroExpansion, MacroValue};
use crate::data::symbols::symbol_group;
use crate::utils::error::{ParseError, ParseResult};

fn is_valid_name(token: &Token) -> bool {
    !token.is_eof() && !matches!(token.text.as_str(), "{" | "}" | "#" | " ")
}

/// `\def\name#1#2{body}`
///
/// Parameter text must be `#1`, `#2`, … in order; delimited parameters are
/// not supported.
pub fn def(ctx: &mut dyn MacroContext) -> ParseResult<MacroValue> {
    let name = ctx.pop_token();
    if !is_valid_name(&name) {
        return Err(ParseError::InvalidMacroName);
    }

    let mut num_args = 0;
    loop {
        ctx.consume_spaces();
        let next = ctx.future();
        if next.text == "{" {
            break;
        }
        if next.is_eof() {
            return Err(ParseError::MissingArgument);
        }
        let hash = ctx.pop_token();
        let digit = ctx.pop_token();
        if hash.text != "#" || digit.text != (num_args + 1).to_string() {
            return Err(ParseError::InvalidArgumentNumber);
        }
        num_args += 1;
    }

    let body = ctx.consume_arg()?;
    ctx.macros().define(
        name.text,
        MacroDefinition::Tokens(MacroExpansion::new(body, num_args)),
    );
    Ok(MacroValue::empty())
}

/// Read the `[n]` argument count of `\newcommand`, if present
fn consume_arg_count(ctx: &mut dyn MacroContext) -> ParseResult<usize> {
    ctx.consume_spaces();
    if ctx.future().text != "[" {
        return Ok(0);
    }
    ctx.pop_token();

    let mut text = String::new();
    loop {
        let token = ctx.pop_token();
        if token.text == "]" {
            break;
        }
        if token.is_eof() {
            return Err(ParseError::InvalidArgumentCount(text));
        }
        text.push_str(&token.text);
    }

    match text.trim().parse::<usize>() {
        Ok(n) if n <= 9 => Ok(n),
        _ => Err(ParseError::InvalidArgumentCount(text)),
    }
}

/// `\newcommand{\name}[n]{body}` and its variants.
///
/// `EXISTS_OK`: the name may already be defined.
/// `NON_EXISTS_OK`: the name may be new.
/// `\providecommand` accepts both but leaves an existing definition alone.
fn new_command<const EXISTS_OK: bool, const NON_EXISTS_OK: bool>(
    ctx: &mut dyn MacroContext,
) -> ParseResult<MacroValue> {
    let arg = ctx.consume_arg()?;
    let name = match arg.as_slice() {
        [token] if is_valid_name(token) => token.text.clone(),
        _ => return Err(ParseError::InvalidMacroName),
    };

    let exists = ctx.is_expandable(&name) || symbol_group(&name).is_some();
    if exists && !EXISTS_OK {
        return Err(ParseError::MacroAlreadyDefined(name));
    }
    if !exists && !NON_EXISTS_OK {
        return Err(ParseError::MacroNotDefined(name));
    }

    let num_args = consume_arg_count(ctx)?;
    let body = ctx.consume_arg()?;

    if exists && NON_EXISTS_OK {
        return Ok(MacroValue::empty());
    }
    ctx.macros().define(
        name,
        MacroDefinition::Tokens(MacroExpansion::new(body, num_args)),
    );
    Ok(MacroValue::empty())
}

pub fn newcommand(ctx: &mut dyn MacroContext) -> ParseResult<MacroValue> {
    new_command::<false, true>(ctx)
}

pub fn renewcommand(ctx: &mut dyn MacroContext) -> ParseResult<MacroValue> {
    new_command::<true, false>(ctx)
}

pub fn providecommand(ctx: &mut dyn MacroContext) -> ParseResult<MacroValue> {
    new_command::<true, true>(ctx)
}
