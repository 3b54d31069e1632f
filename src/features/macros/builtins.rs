//! Built-in macro library
//!
//! [`BUILTIN_MACROS`] combines the static templates of
//! [`crate::data::templates`] with the procedural macros defined here. Every
//! [`MacroTable`](super::MacroTable) created with built-ins falls back to it.

use std::borrow::Cow;

use fxhash::FxHashMap;
use lazy_static::lazy_static;

use super::token::{string_from_tokens, Token};
use super::{definitions, numeral};
use super::{MacroContext, MacroDefinition, MacroExpansion, MacroFn, MacroValue, Mode};
use crate::data::dots::{DOTS_BY_TOKEN, SPACE_AFTER_DOTS};
use crate::data::symbols::symbol_group;
use crate::data::templates::TEMPLATES;
use crate::utils::error::{ParseError, ParseResult};

/// Sentinel macro holding the current formula's tag
pub const TAG_MACRO: &str = "\\df@tag";

// ============================================================================
// Macro tools
// ============================================================================

/// `\noexpand`: the next token is not expanded, and means `\relax` if it is a
/// macro
fn noexpand(ctx: &mut dyn MacroContext) -> ParseResult<MacroValue> {
    let mut token = ctx.pop_token();
    if ctx.is_expandable(&token.text) {
        token.noexpand = true;
        token.treat_as_relax = true;
    }
    Ok(MacroValue::tokens(vec![token]))
}

/// `\expandafter`: hold the next token aside, expand the one after it once,
/// then put the held token back in front
fn expandafter(ctx: &mut dyn MacroContext) -> ParseResult<MacroValue> {
    let token = ctx.pop_token();
    ctx.expand_once(true)?;
    Ok(MacroValue::tokens(vec![token]))
}

fn first_of_two(ctx: &mut dyn MacroContext) -> ParseResult<MacroValue> {
    let mut args = ctx.consume_args(2)?;
    args.truncate(1);
    Ok(MacroValue::tokens(args.pop().unwrap_or_default()))
}

fn second_of_two(ctx: &mut dyn MacroContext) -> ParseResult<MacroValue> {
    let mut args = ctx.consume_args(2)?;
    Ok(MacroValue::tokens(args.pop().unwrap_or_default()))
}

/// `\@ifnextchar{c}{then}{else}`: peek past spaces without consuming
fn if_next_char(ctx: &mut dyn MacroContext) -> ParseResult<MacroValue> {
    let args = ctx.consume_args(3)?;
    ctx.consume_spaces();
    let next = ctx.future();
    let [symbol, then, otherwise]: [Vec<Token>; 3] = args
        .try_into()
        .map_err(|_| ParseError::MissingArgument)?;

    let matches = matches!(symbol.as_slice(), [only] if only.text == next.text);
    Ok(MacroValue::tokens(if matches { then } else { otherwise }))
}

/// `\TextOrMath{text}{math}`
fn text_or_math(ctx: &mut dyn MacroContext) -> ParseResult<MacroValue> {
    let mut args = ctx.consume_args(2)?;
    let math = args.pop().unwrap_or_default();
    let text = args.pop().unwrap_or_default();
    Ok(MacroValue::tokens(match ctx.mode() {
        Mode::Text => text,
        Mode::Math => math,
    }))
}

// ============================================================================
// Dots
// ============================================================================

/// `\dots`: pick an ellipsis from the (expanded) following token
fn dots(ctx: &mut dyn MacroContext) -> ParseResult<MacroValue> {
    let next = ctx.expand_after_future()?;
    let next = next.text.as_str();

    let selected = if let Some(variant) = DOTS_BY_TOKEN.get(next) {
        *variant
    } else if next.starts_with("\\not") {
        "\\dotsb"
    } else if symbol_group(next).is_some_and(|group| group.is_operator_like()) {
        "\\dotsb"
    } else {
        "\\dotso"
    };
    Ok(MacroValue::text(selected))
}

fn dotso(ctx: &mut dyn MacroContext) -> ParseResult<MacroValue> {
    let next = ctx.future();
    if SPACE_AFTER_DOTS.contains(next.text.as_str()) {
        Ok(MacroValue::text("\\ldots\\,"))
    } else {
        Ok(MacroValue::text("\\ldots"))
    }
}

/// Like `\dotso`, except a following comma adds no space
fn dotsc(ctx: &mut dyn MacroContext) -> ParseResult<MacroValue> {
    let next = ctx.future();
    if next.text != "," && SPACE_AFTER_DOTS.contains(next.text.as_str()) {
        Ok(MacroValue::text("\\ldots\\,"))
    } else {
        Ok(MacroValue::text("\\ldots"))
    }
}

fn cdots(ctx: &mut dyn MacroContext) -> ParseResult<MacroValue> {
    let next = ctx.future();
    if SPACE_AFTER_DOTS.contains(next.text.as_str()) {
        Ok(MacroValue::text("\\@cdots\\,"))
    } else {
        Ok(MacroValue::text("\\@cdots"))
    }
}

// ============================================================================
// Tags and arrows
// ============================================================================

/// `\tag@literal{content}`: register the formula's tag, at most once
fn tag_literal(ctx: &mut dyn MacroContext) -> ParseResult<MacroValue> {
    if ctx.macros().contains(TAG_MACRO) {
        return Err(ParseError::DuplicateTag);
    }
    let content = ctx.consume_arg()?;

    let mut body = Vec::with_capacity(content.len() + 3);
    body.push(Token::new("\\text"));
    body.push(Token::new("{"));
    body.extend(content);
    body.push(Token::new("}"));
    ctx.macros().define(
        TAG_MACRO,
        MacroDefinition::Tokens(MacroExpansion::new(body, 0)),
    );
    Ok(MacroValue::empty())
}

/// Whether `text` reads as a finite number: decimal (optionally signed or
/// fractional) or a `0x` / `0o` / `0b` integer
fn is_numeric(text: &str) -> bool {
    let text = text.trim();
    if text.is_empty() {
        return false;
    }
    let radix = match text.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    match radix {
        Some(radix) => u64::from_str_radix(&text[2..], radix).is_ok(),
        None => {
            // Rust also accepts "inf"/"nan"; only plain digits count here
            text.chars().any(|c| c.is_ascii_digit())
                && text.parse::<f64>().is_ok_and(f64::is_finite)
        }
    }
}

/// `\newextarrow{\name}{lspace,rspace}{charcode}`: define a new extensible
/// arrow macro taking its label as `#1`
fn new_ext_arrow(ctx: &mut dyn MacroContext) -> ParseResult<MacroValue> {
    let args = ctx.consume_args(3)?;
    let name = args[0]
        .first()
        .filter(|token| !token.is_space())
        .ok_or(ParseError::InvalidArrowName)?
        .text
        .clone();

    let spacing = string_from_tokens(&args[1]);
    let (lspace, rspace) = match spacing.split(',').collect::<Vec<_>>().as_slice() {
        [l, r] if is_numeric(l) && is_numeric(r) => (l.trim().to_string(), r.trim().to_string()),
        _ => return Err(ParseError::InvalidArrowSpacing),
    };

    let code = string_from_tokens(&args[2]);
    if !is_numeric(&code) {
        return Err(ParseError::InvalidArrowCharCode);
    }

    let body = format!(
        "\\ext@arrow{{{}}}{{{}}}{{{}}}{{#1}}",
        lspace,
        rspace,
        code.trim()
    );
    ctx.macros().define(name, MacroDefinition::text(body));
    Ok(MacroValue::empty())
}

// ============================================================================
// Registry
// ============================================================================

const PROCEDURES: &[(&str, MacroFn)] = &[
    ("\\noexpand", noexpand),
    ("\\expandafter", expandafter),
    ("\\@firstoftwo", first_of_two),
    ("\\@secondoftwo", second_of_two),
    ("\\@ifnextchar", if_next_char),
    ("\\TextOrMath", text_or_math),
    ("\\char", numeral::char_macro),
    ("\\dots", dots),
    ("\\dotso", dotso),
    ("\\dotsc", dotsc),
    ("\\cdots", cdots),
    ("\\tag@literal", tag_literal),
    ("\\newextarrow", new_ext_arrow),
    ("\\def", definitions::def),
    ("\\gdef", definitions::def),
    ("\\newcommand", definitions::newcommand),
    ("\\renewcommand", definitions::renewcommand),
    ("\\providecommand", definitions::providecommand),
];

lazy_static! {
    /// Every built-in macro by name
    pub static ref BUILTIN_MACROS: FxHashMap<&'static str, MacroDefinition> = {
        let mut m = FxHashMap::default();
        for (name, body) in TEMPLATES.entries() {
            m.insert(*name, MacroDefinition::Text(Cow::Borrowed(*body)));
        }
        for (name, procedure) in PROCEDURES {
            m.insert(*name, MacroDefinition::Procedure(*procedure));
        }
        m
    };
}
