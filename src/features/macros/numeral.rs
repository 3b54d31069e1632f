//! Character-code numerals for `\char`
//!
//! TeX accepts (The TeXbook, p. 43):
//!
//! ```text
//! \char123    decimal
//! \char'123   octal
//! \char"123   hex
//! \char`x     the code of x
//! \char`\x    the code of x, for characters that cannot be written directly
//! ```

use super::{MacroContext, MacroValue};
use crate::utils::error::{ParseError, ParseResult};

/// Value of a hex digit (`0-9`, `a-f`, `A-F`)
pub fn digit_to_number(c: char) -> Option<u32> {
    match c {
        '0'..='9' => Some(c as u32 - '0' as u32),
        'a'..='f' => Some(c as u32 - 'a' as u32 + 10),
        'A'..='F' => Some(c as u32 - 'A' as u32 + 10),
        _ => None,
    }
}

/// Largest Unicode scalar value
pub const MAX_CHAR_CODE: u32 = 0x10FFFF;

/// Append every character of `text` as a digit of `number`.
///
/// `Ok(None)` if `text` is empty or holds a character that is not a digit in
/// `base`; an error if the digits push the code past [`MAX_CHAR_CODE`].
fn append_digits(number: u32, text: &str, base: u32) -> ParseResult<Option<u32>> {
    if text.is_empty() || !text.chars().all(|c| digit_to_number(c).is_some_and(|d| d < base)) {
        return Ok(None);
    }
    text.chars()
        .filter_map(digit_to_number)
        .try_fold(number, |acc, digit| {
            acc.checked_mul(base)
                .and_then(|value| value.checked_add(digit))
                .filter(|value| *value <= MAX_CHAR_CODE)
                .ok_or(ParseError::CharCodeTooLarge)
        })
        .map(Some)
}

/// Code of the character named by the token after a backtick
fn backtick_code(text: &str) -> Option<u32> {
    let mut chars = text.chars();
    let c = if text.starts_with('\\') {
        chars.nth(1)
    } else {
        chars.next()
    };
    c.map(u32::from)
}

/// Read a character code from the context, consuming only what belongs to it
pub fn parse_char_code(ctx: &mut dyn MacroContext) -> ParseResult<u32> {
    let token = ctx.pop_token();
    let (base, token) = match token.text.as_str() {
        "'" => (8, ctx.pop_token()),
        "\"" => (16, ctx.pop_token()),
        "`" => {
            let token = ctx.pop_token();
            if token.is_eof() {
                return Err(ParseError::MissingCharArgument);
            }
            return backtick_code(&token.text).ok_or(ParseError::MissingCharArgument);
        }
        _ => (10, token),
    };

    if token.is_eof() {
        return Err(ParseError::invalid_digit(base, token.text));
    }
    let mut number = append_digits(0, &token.text, base)?
        .ok_or_else(|| ParseError::invalid_digit(base, token.text.clone()))?;

    loop {
        let next = ctx.future();
        if next.is_eof() {
            break;
        }
        match append_digits(number, &next.text, base)? {
            Some(value) => {
                number = value;
                ctx.pop_token();
            }
            None => break,
        }
    }

    Ok(number)
}

/// `\char`: rewrite to `\@char{<code>}`
pub fn char_macro(ctx: &mut dyn MacroContext) -> ParseResult<MacroValue> {
    let code = parse_char_code(ctx)?;
    Ok(MacroValue::text(format!("\\@char{{{}}}", code)))
}
