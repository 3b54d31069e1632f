//! Tokens and the TeX lexer feeding the macro expander

use std::fmt;

/// Text of the sentinel token returned once input is exhausted
pub const EOF_TEXT: &str = "EOF";

/// A single input token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    /// Set by `\noexpand`: the token must not be expanded again
    pub noexpand: bool,
    /// Set by `\noexpand`: the token means `\relax` when finally emitted
    pub treat_as_relax: bool,
}

impl Token {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            noexpand: false,
            treat_as_relax: false,
        }
    }

    pub fn eof() -> Self {
        Self::new(EOF_TEXT)
    }

    pub fn is_eof(&self) -> bool {
        self.text == EOF_TEXT
    }

    pub fn is_space(&self) -> bool {
        self.text == " "
    }

    /// `\` followed by letters (or `@`)
    pub fn is_control_word(&self) -> bool {
        is_control_word(&self.text)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for Token {
    fn from(text: &str) -> Self {
        Token::new(text)
    }
}

fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '@'
}

fn is_control_word(text: &str) -> bool {
    let mut chars = text.chars();
    chars.next() == Some('\\') && chars.next().is_some_and(is_letter)
}

/// Split TeX source into tokens.
///
/// - `\` + letters is one control word; spaces and newlines after it are dropped
/// - `\` + any other character is a control symbol
/// - a run of whitespace becomes a single `" "` token
/// - `%` starts a comment running to the end of the line
/// - every other character is its own token
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        match c {
            '\\' => match chars.peek().copied() {
                Some((_, next)) if is_letter(next) => {
                    let mut end = start + 1;
                    while let Some(&(i, ch)) = chars.peek() {
                        if !is_letter(ch) {
                            break;
                        }
                        end = i + ch.len_utf8();
                        chars.next();
                    }
                    tokens.push(Token::new(&input[start..end]));
                    while chars.peek().is_some_and(|&(_, ch)| matches!(ch, ' ' | '\t' | '\r' | '\n')) {
                        chars.next();
                    }
                }
                Some((i, next)) => {
                    chars.next();
                    tokens.push(Token::new(&input[start..i + next.len_utf8()]));
                }
                None => tokens.push(Token::new("\\")),
            },
            '%' => {
                for (_, ch) in chars.by_ref() {
                    if ch == '\n' {
                        break;
                    }
                }
            }
            c if c.is_whitespace() => {
                while chars.peek().is_some_and(|&(_, ch)| ch.is_whitespace()) {
                    chars.next();
                }
                tokens.push(Token::new(" "));
            }
            c => tokens.push(Token::new(c.to_string())),
        }
    }

    tokens
}

/// Join tokens back into TeX source.
///
/// A space is inserted between a control word and a following letter so that
/// `\relax` + `b` does not read back as `\relaxb`.
pub fn tokens_to_string<'a>(tokens: impl IntoIterator<Item = &'a Token>) -> String {
    let mut out = String::new();
    let mut after_control_word = false;

    for token in tokens {
        if after_control_word && token.text.chars().next().is_some_and(is_letter) {
            out.push(' ');
        }
        out.push_str(&token.text);
        after_control_word = token.is_control_word();
    }

    out
}

/// Concatenate token texts with no separator, as TeX's `\string` would
pub fn string_from_tokens(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.text.as_str()).collect()
}
