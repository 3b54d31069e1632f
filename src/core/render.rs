//! Rendering math regions found in text
//!
//! [`render_math_in_text`] drives the per-region policy: each math segment is
//! handed to a [`MathRenderer`]; a region that fails to parse is reported
//! through the error callback and kept as its original text, while any other
//! failure aborts the pass.
//!
//! [`TexRenderer`] is the built-in renderer. It expands macros and emits
//! normalized TeX.
//!
//! ## Example
//!
//! ```rust
//! use mathfence::core::options::RenderOptions;
//! use mathfence::core::render::render_to_tex;
//!
//! let options = RenderOptions::default();
//! let mut macros = options.macro_table();
//! let out = render_to_tex(r"gap \(a\quad b\)", &options, &mut macros).unwrap();
//! assert_eq!(out, r"gap \( a\hskip1em\relax b \)");
//! ```

use std::borrow::Cow;
use std::fmt;

use super::options::RenderOptions;
use super::scanner::{split_at_delimiters, Segment};
use crate::features::macros::builtins::TAG_MACRO;
use crate::features::macros::{
    tokens_to_string, MacroDefinition, MacroExpander, MacroTable, Mode, Token,
};
use crate::utils::error::{ParseError, RenderError};

/// Turns one math source into a rendered value
pub trait MathRenderer {
    type Output;

    /// Render `source`; `macros` is shared by every region of the pass
    fn render(
        &self,
        source: &str,
        display: bool,
        macros: &mut MacroTable,
        options: &RenderOptions,
    ) -> Result<Self::Output, RenderError>;
}

/// A piece of rendered text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment<M> {
    Text(String),
    Math(M),
}

impl<M: fmt::Display> fmt::Display for Fragment<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fragment::Text(text) => f.write_str(text),
            Fragment::Math(math) => math.fmt(f),
        }
    }
}

/// Output of [`TexRenderer`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RenderedMath {
    /// Fully expanded TeX
    pub tex: String,
    pub display: bool,
    /// Content registered by `\tag`, if any
    pub tag: Option<String>,
}

impl fmt::Display for RenderedMath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (open, close) = if self.display {
            ("\\[", "\\]")
        } else {
            ("\\(", "\\)")
        };
        write!(f, "{} {}", open, self.tex)?;
        if let Some(tag) = &self.tag {
            write!(f, " \\tag*{{{}}}", tag)?;
        }
        write!(f, " {}", close)
    }
}

/// Expands macros and checks brace balance
#[derive(Debug, Clone, Copy, Default)]
pub struct TexRenderer;

fn check_balance(tokens: &[Token]) -> Result<(), ParseError> {
    let mut depth: i64 = 0;
    for token in tokens {
        match token.text.as_str() {
            "{" => depth += 1,
            "}" => {
                depth -= 1;
                if depth < 0 {
                    return Err(ParseError::ExtraCloseBrace);
                }
            }
            _ => {}
        }
    }
    if depth > 0 {
        return Err(ParseError::MissingArgument);
    }
    Ok(())
}

fn tag_text(definition: MacroDefinition) -> Option<String> {
    match definition {
        MacroDefinition::Tokens(expansion) => Some(tokens_to_string(&expansion.tokens)),
        MacroDefinition::Text(body) => Some(body.into_owned()),
        MacroDefinition::Procedure(_) => None,
    }
}

impl MathRenderer for TexRenderer {
    type Output = RenderedMath;

    fn render(
        &self,
        source: &str,
        display: bool,
        macros: &mut MacroTable,
        options: &RenderOptions,
    ) -> Result<RenderedMath, RenderError> {
        let tokens = MacroExpander::new(source, macros, Mode::Math)
            .with_max_expand(options.max_expand)
            .expand_fully();
        // A tag belongs to one formula
        let tag = macros.undefine(TAG_MACRO).and_then(tag_text);

        let tokens = tokens?;
        check_balance(&tokens)?;

        Ok(RenderedMath {
            tex: tokens_to_string(&tokens).trim().to_string(),
            display,
            tag,
        })
    }
}

/// Render every math region of `text`.
///
/// Returns `Ok(None)` when `text` holds no math, so callers can leave it
/// untouched.
pub fn render_math_in_text<R>(
    text: &str,
    options: &RenderOptions,
    macros: &mut MacroTable,
    renderer: &R,
) -> Result<Option<Vec<Fragment<R::Output>>>, RenderError>
where
    R: MathRenderer + ?Sized,
{
    let delimiters = options.resolved_delimiters();
    let segments = split_at_delimiters(text, &delimiters);
    if !segments.iter().any(Segment::is_math) {
        return Ok(None);
    }

    let mut fragments = Vec::with_capacity(segments.len());
    for segment in segments {
        let (content, raw, display) = match segment {
            Segment::Text { content } => {
                fragments.push(Fragment::Text(content.to_string()));
                continue;
            }
            Segment::Math {
                content,
                raw,
                display,
            } => (content, raw, display),
        };

        let source = match &options.pre_process {
            Some(hook) => Cow::Owned(hook(content)),
            None => Cow::Borrowed(content),
        };

        match renderer.render(&source, display, macros, options) {
            Ok(math) => fragments.push(Fragment::Math(math)),
            Err(err) if err.is_recoverable() => {
                let message = format!("Failed to parse `{}` with {}", content, err);
                tracing::debug!(region = raw, "{}", message);
                options.report_error(&message, &err);
                fragments.push(Fragment::Text(raw.to_string()));
            }
            Err(err) => return Err(err),
        }
    }

    Ok(Some(fragments))
}

/// Render `text` with [`TexRenderer`] and join the result
pub fn render_to_tex(
    text: &str,
    options: &RenderOptions,
    macros: &mut MacroTable,
) -> Result<String, RenderError> {
    match render_math_in_text(text, options, macros, &TexRenderer)? {
        Some(fragments) => Ok(fragments.iter().map(ToString::to_string).collect()),
        None => Ok(text.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::delimiters::DelimiterSpec;
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};

    fn render(source: &str) -> Result<RenderedMath, RenderError> {
        let options = RenderOptions::default();
        let mut macros = options.macro_table();
        TexRenderer.render(source, false, &mut macros, &options)
    }

    /// Fails on any source containing `!`, fatally on `?`
    struct PickyRenderer;

    impl MathRenderer for PickyRenderer {
        type Output = String;

        fn render(
            &self,
            source: &str,
            _display: bool,
            _macros: &mut MacroTable,
            _options: &RenderOptions,
        ) -> Result<String, RenderError> {
            if source.contains('?') {
                Err(RenderError::fatal("renderer crashed"))
            } else if source.contains('!') {
                Err(ParseError::MissingArgument.into())
            } else {
                Ok(source.to_uppercase())
            }
        }
    }

    #[test]
    fn test_tex_renderer_expands() {
        let math = render(r"\argmin_x").unwrap();
        assert_eq!(
            math.tex,
            r"\relax\operatornamewithlimits{arg\mskip+3mu\relax min}_x"
        );
        assert_eq!(math.tag, None);
    }

    #[test]
    fn test_tex_renderer_brace_balance() {
        assert!(matches!(
            render("a}"),
            Err(RenderError::Parse(ParseError::ExtraCloseBrace))
        ));
        assert!(matches!(
            render("{a"),
            Err(RenderError::Parse(ParseError::MissingArgument))
        ));
    }

    #[test]
    fn test_tag_is_per_formula() {
        let options = RenderOptions::default();
        let mut macros = options.macro_table();
        let first = TexRenderer
            .render(r"x\tag{1}", true, &mut macros, &options)
            .unwrap();
        assert_eq!(first.tag.as_deref(), Some(r"\text{({1})}"));
        assert_eq!(first.to_string(), r"\[ x \tag*{\text{({1})}} \]");

        let second = TexRenderer
            .render(r"y\tag{2}", true, &mut macros, &options)
            .unwrap();
        assert_eq!(second.tag.as_deref(), Some(r"\text{({2})}"));
    }

    #[test]
    fn test_max_expand_is_applied() {
        let mut options = RenderOptions::default().with_macro("\\loop", "\\loop");
        options.max_expand = 10;
        let mut macros = options.macro_table();
        let err = TexRenderer
            .render(r"\loop", false, &mut macros, &options)
            .unwrap_err();
        assert!(matches!(
            err,
            RenderError::Parse(ParseError::TooManyExpansions { limit: 10 })
        ));
    }

    #[test]
    fn test_no_math_returns_none() {
        let options = RenderOptions::default();
        let mut macros = options.macro_table();
        let out = render_math_in_text("plain prose", &options, &mut macros, &PickyRenderer).unwrap();
        assert_eq!(out, None);
    }

    #[test]
    fn test_fragments_in_order() {
        let options = RenderOptions::dollars();
        let mut macros = options.macro_table();
        let out = render_math_in_text("a $x$ b $$y$$", &options, &mut macros, &PickyRenderer)
            .unwrap()
            .unwrap();
        assert_eq!(
            out,
            vec![
                Fragment::Text("a ".to_string()),
                Fragment::Math("X".to_string()),
                Fragment::Text(" b ".to_string()),
                Fragment::Math("Y".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_error_keeps_raw_and_continues() {
        let messages = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&messages);
        let options = RenderOptions::dollars().with_error_callback(move |msg, _| {
            sink.lock().unwrap().push(msg.to_string());
        });
        let mut macros = options.macro_table();
        let out = render_math_in_text("$bad!$ and $ok$", &options, &mut macros, &PickyRenderer)
            .unwrap()
            .unwrap();
        assert_eq!(
            out,
            vec![
                Fragment::Text("$bad!$".to_string()),
                Fragment::Text(" and ".to_string()),
                Fragment::Math("OK".to_string()),
            ]
        );
        let messages = messages.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("Failed to parse `bad!` with ParseError:"));
    }

    #[test]
    fn test_fatal_error_aborts() {
        let options = RenderOptions::dollars();
        let mut macros = options.macro_table();
        let result = render_math_in_text("$ok$ $boom?$", &options, &mut macros, &PickyRenderer);
        assert!(matches!(result, Err(RenderError::Fatal { .. })));
    }

    #[test]
    fn test_pre_process_hook() {
        let options = RenderOptions::default()
            .with_delimiters(vec![DelimiterSpec::inline("[[", "]]")])
            .with_pre_process(|src| src.replace("ab", "xy"));
        let mut macros = options.macro_table();
        let out = render_math_in_text("[[ab]]", &options, &mut macros, &PickyRenderer)
            .unwrap()
            .unwrap();
        assert_eq!(out, vec![Fragment::Math("XY".to_string())]);
    }

    #[test]
    fn test_gdef_shared_across_regions() {
        let options = RenderOptions::parens();
        let mut macros = options.macro_table();
        let out = render_to_tex(r"\(\gdef\R{\mathbb{R}}\) then \(x\in\R\)", &options, &mut macros)
            .unwrap();
        assert_eq!(out, r"\(  \) then \( x\in\mathbb{R} \)");
    }

    #[test]
    fn test_render_to_tex_without_math() {
        let options = RenderOptions::default();
        let mut macros = options.macro_table();
        assert_eq!(render_to_tex("no math", &options, &mut macros).unwrap(), "no math");
    }
}
