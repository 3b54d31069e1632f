//! Integration tests for mathfence: scanning, macro expansion and rendering

use mathfence::{
    expand_formula, expand_macros, render_math_in_element, render_math_in_text, render_text,
    resolve_delimiters, split_at_delimiters, DelimiterError, DelimiterSource, DelimiterSpec,
    Element, Fences, Fragment, MacroTable, MathRenderer, MathScanner, Node, ParseError,
    RenderError, RenderOptions, RenderedMath, Segment, TexRenderer,
};
use pretty_assertions::assert_eq;
use std::sync::{Arc, Mutex};

fn rebuild(segments: &[Segment<'_>]) -> String {
    segments.iter().map(Segment::original).collect()
}

/// Options whose error callback records every message
fn recording(options: RenderOptions) -> (RenderOptions, Arc<Mutex<Vec<String>>>) {
    let messages = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&messages);
    let options = options.with_error_callback(move |msg, _| {
        sink.lock().unwrap().push(msg.to_string());
    });
    (options, messages)
}

// ============================================================================
// Scanner
// ============================================================================

mod scanning {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_round_trip_for_every_preset() {
        let inputs = [
            "",
            "plain prose, $5 and $6",
            r"mixed $a$ and \(b\) and $$c$$ and \[d\]",
            r"env \begin{equation}x=1\end{equation} ref \eqref{e} end",
            "$$ a{$$}b $$ trailing $x",
            r"escaped $a\$b$ then $`c`$",
            "{unbalanced $x{$ text",
        ];
        let presets = [
            Fences::Basic,
            Fences::Dollar,
            Fences::Paren,
            Fences::DollarAms,
            Fences::ParenAms,
            Fences::Ams,
            Fences::All,
        ];

        for preset in presets {
            let delimiters = preset.delimiters();
            for input in inputs {
                let segments = split_at_delimiters(input, &delimiters);
                assert_eq!(rebuild(&segments), input, "preset {} on {:?}", preset, input);
            }
        }
    }

    #[test]
    fn test_no_math_identity() {
        let text = "Prices rose by 5% this year.";
        let segments = split_at_delimiters(text, &Fences::All.delimiters());
        assert_eq!(segments, vec![Segment::Text { content: text }]);
    }

    #[test]
    fn test_brace_nesting() {
        let segments = split_at_delimiters(
            "$$ a{$$}b $$",
            &[DelimiterSpec::display("$$", "$$")],
        );
        assert_eq!(
            segments,
            vec![Segment::Math {
                content: " a{$$}b ",
                raw: "$$ a{$$}b $$",
                display: true,
            }]
        );
    }

    #[test]
    fn test_escaped_right_delimiter() {
        let segments = split_at_delimiters(r"$a\$b$", &[DelimiterSpec::inline("$", "$")]);
        assert_eq!(
            segments,
            vec![Segment::Math {
                content: r"a\$b",
                raw: r"$a\$b$",
                display: false,
            }]
        );
    }

    #[test]
    fn test_unterminated_falls_back() {
        let text = "text $unterminated";
        let segments = split_at_delimiters(text, &[DelimiterSpec::inline("$", "$")]);
        assert_eq!(segments, vec![Segment::Text { content: text }]);
    }

    #[test]
    fn test_scanner_reuse() {
        let scanner = MathScanner::new(&Fences::Paren.delimiters()).unwrap();
        let first = scanner.split(r"\(a\)");
        let second = scanner.split(r"x \[b\]");
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 2);
        assert!(second[1].is_math());
    }

    #[test]
    fn test_empty_left_delimiter_rejected() {
        let result = MathScanner::new(&[DelimiterSpec::inline("$", "$"), DelimiterSpec::inline("", "$")]);
        assert!(matches!(result, Err(DelimiterError::EmptyLeft { index: 1 })));
    }
}

// ============================================================================
// Delimiter presets
// ============================================================================

mod fences {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_keys_round_trip() {
        for key in ["$", "(", "$+", "(+", "ams", "all"] {
            assert_eq!(Fences::from_key(key).key(), key);
        }
    }

    #[test]
    fn test_unknown_key_is_basic() {
        assert_eq!(Fences::from_key("latex"), Fences::Basic);
        assert_eq!(
            resolve_delimiters(DelimiterSource::Key("nope")),
            Fences::Basic.delimiters()
        );
    }

    #[test]
    fn test_explicit_source_used_verbatim() {
        let list = vec![DelimiterSpec::inline("<m>", "</m>")];
        assert_eq!(resolve_delimiters(DelimiterSource::Explicit(&list)), list);
    }

    #[test]
    fn test_dollar_preset_catches_single_dollar() {
        let basic = split_at_delimiters("cost $x$", &Fences::Basic.delimiters());
        let dollar = split_at_delimiters("cost $x$", &Fences::Dollar.delimiters());
        assert_eq!(basic.len(), 1);
        assert_eq!(dollar.len(), 2);
    }

    #[test]
    fn test_dollar_preset_backtick_form() {
        let segments = split_at_delimiters("see $`x`$ now", &Fences::Dollar.delimiters());
        assert_eq!(
            segments[1],
            Segment::Math {
                content: "x",
                raw: "$`x`$",
                display: false,
            }
        );

        // Without the backtick pair, single `$` takes the backticks as content
        let plain = split_at_delimiters("see $`x`$ now", &[DelimiterSpec::inline("$", "$")]);
        assert_eq!(
            plain[1],
            Segment::Math {
                content: "`x`",
                raw: "$`x`$",
                display: false,
            }
        );
    }

    #[test]
    fn test_all_preset_covers_every_family() {
        let text = r"\(a\) $b$ \begin{align}c\end{align}";
        let segments = split_at_delimiters(text, &Fences::All.delimiters());
        let math: Vec<&str> = segments
            .iter()
            .filter_map(|s| match s {
                Segment::Math { content, .. } => Some(*content),
                Segment::Text { .. } => None,
            })
            .collect();
        assert_eq!(math, vec!["a", "b", r"\begin{align}c\end{align}"]);
    }
}

// ============================================================================
// Macro expansion
// ============================================================================

mod expansion {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_char_numerals() {
        for source in [r"\char65", r"\char`A", r"\char'101", "\\char\"41"] {
            assert_eq!(expand_formula(source).unwrap(), r"\@char{65}", "{}", source);
        }
    }

    #[test]
    fn test_char_bad_digit() {
        assert!(matches!(
            expand_formula(r"\char'9"),
            Err(ParseError::InvalidDigit { base: 8, .. })
        ));
    }

    #[test]
    fn test_char_code_too_large() {
        assert_eq!(
            expand_formula(r"\char99999999999"),
            Err(ParseError::CharCodeTooLarge)
        );
        assert_eq!(
            expand_formula("\\char\"10FFFF").unwrap(),
            r"\@char{1114111}"
        );
    }

    #[test]
    fn test_dots_variants() {
        assert_eq!(expand_formula(r"a\dots+b").unwrap(), expand_formula(r"a\dotsb+b").unwrap());
        assert_eq!(expand_formula(r"a\dots,b").unwrap(), expand_formula(r"a\dotsc,b").unwrap());
        assert_eq!(expand_formula(r"a\dots x").unwrap(), expand_formula(r"a\dotso x").unwrap());
    }

    #[test]
    fn test_newextarrow() {
        let mut table = MacroTable::with_builtins();
        expand_macros(r"\newextarrow{\foo}{2,2}{0x2192}", &mut table).unwrap();
        assert!(table.contains("\\foo"));

        let mut table = MacroTable::with_builtins();
        assert_eq!(
            expand_macros(r"\newextarrow{\foo}{x,2}{0x2192}", &mut table),
            Err(ParseError::InvalidArrowSpacing)
        );
        assert!(!table.contains("\\foo"));
    }

    #[test]
    fn test_duplicate_tag() {
        assert_eq!(
            expand_formula(r"x\tag{1}\tag{2}"),
            Err(ParseError::DuplicateTag)
        );
    }

    #[test]
    fn test_tables_are_isolated() {
        let mut first = MacroTable::with_builtins();
        let mut second = MacroTable::with_builtins();
        expand_macros(r"\gdef\E{e}", &mut first).unwrap();
        assert_eq!(expand_macros(r"\E", &mut first).unwrap(), "e");
        assert_eq!(expand_macros(r"\E", &mut second).unwrap(), r"\E");
    }

    #[test]
    fn test_empty_table_has_no_builtins() {
        let mut table = MacroTable::new();
        assert!(!table.has_builtins());
        assert_eq!(expand_macros(r"a\quad b", &mut table).unwrap(), r"a\quad b");
    }

    #[test]
    fn test_newcommand_with_arguments() {
        let mut table = MacroTable::with_builtins();
        expand_macros(r"\newcommand{\pair}[2]{(#1,#2)}", &mut table).unwrap();
        assert_eq!(expand_macros(r"\pair{a}{b}", &mut table).unwrap(), "(a,b)");
    }

    #[test]
    fn test_newcommand_redefinition_rules() {
        let mut table = MacroTable::with_builtins();
        assert_eq!(
            expand_macros(r"\newcommand{\quad}{q}", &mut table),
            Err(ParseError::MacroAlreadyDefined("\\quad".to_string()))
        );
        assert_eq!(
            expand_macros(r"\renewcommand{\nothere}{q}", &mut table),
            Err(ParseError::MacroNotDefined("\\nothere".to_string()))
        );
        expand_macros(r"\renewcommand{\quad}{Q}", &mut table).unwrap();
        assert_eq!(expand_macros(r"\quad", &mut table).unwrap(), "Q");
    }

    #[test]
    fn test_self_reference_is_bounded() {
        let mut table = MacroTable::with_builtins();
        let result = expand_macros(r"\gdef\loop{\loop}\loop", &mut table);
        assert!(matches!(result, Err(ParseError::TooManyExpansions { .. })));
    }
}

// ============================================================================
// Rendering
// ============================================================================

mod rendering {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_text_dollars() {
        let out = render_text(r"Cost is $x+1$ and $$\frac{a}{b}$$", &RenderOptions::dollars())
            .unwrap();
        assert_eq!(out, r"Cost is \( x+1 \) and \[ \frac{a}{b} \]");
    }

    #[test]
    fn test_render_text_without_math_is_identity() {
        let text = "Nothing but words.";
        assert_eq!(render_text(text, &RenderOptions::default()).unwrap(), text);
    }

    #[test]
    fn test_seed_macros() {
        let options = RenderOptions::parens()
            .with_macro("\\RR", "\\mathbb{R}")
            .with_macro("\\abs", "\\left|#1\\right|");
        let out = render_text(r"\(x\in\RR\) and \(\abs{y}\)", &options).unwrap();
        assert_eq!(out, r"\( x\in\mathbb{R} \) and \( \left|y\right| \)");
    }

    #[test]
    fn test_definitions_persist_across_regions() {
        let out = render_text(
            r"\(\newcommand{\half}{\frac12}\) \(\half\)",
            &RenderOptions::parens(),
        )
        .unwrap();
        assert_eq!(out, r"\(  \) \( \frac12 \)");
    }

    #[test]
    fn test_each_pass_starts_fresh() {
        let options = RenderOptions::parens();
        render_text(r"\(\gdef\E{e}\)", &options).unwrap();
        assert_eq!(render_text(r"\(\E\)", &options).unwrap(), r"\( \E \)");
    }

    #[test]
    fn test_failed_region_reported_and_kept() {
        let (options, messages) = recording(RenderOptions::parens());
        let out = render_text(r"\(\char`\) and \(y\)", &options).unwrap();
        assert_eq!(out, r"\(\char`\) and \( y \)");

        let messages = messages.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with(r"Failed to parse `\char`` with ParseError:"));
    }

    #[test]
    fn test_oversized_char_code_kept_raw() {
        let (options, messages) = recording(RenderOptions::parens());
        let out = render_text(r"\(\char99999999999\) and \(z\)", &options).unwrap();
        assert_eq!(out, r"\(\char99999999999\) and \( z \)");
        assert_eq!(messages.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_duplicate_tag_does_not_leak() {
        let (options, messages) = recording(RenderOptions::parens());
        let out = render_text(r"\[a\tag{1}\tag{2}\] \[b\tag{3}\]", &options).unwrap();
        assert_eq!(out, r"\[a\tag{1}\tag{2}\] \[ b \tag*{\text{({3})}} \]");
        assert_eq!(messages.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_runaway_macro_reported() {
        let (mut options, messages) = recording(RenderOptions::dollars().with_macro("\\loop", "\\loop"));
        options.max_expand = 50;
        let out = render_text(r"$\loop$ then $z$", &options).unwrap();
        assert_eq!(out, r"$\loop$ then \( z \)");
        assert_eq!(messages.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_renderer_fragments() {
        let options = RenderOptions::dollars();
        let mut macros = options.macro_table();
        let fragments = render_math_in_text("a $x$", &options, &mut macros, &TexRenderer)
            .unwrap()
            .unwrap();
        assert_eq!(
            fragments,
            vec![
                Fragment::Text("a ".to_string()),
                Fragment::Math(RenderedMath {
                    tex: "x".to_string(),
                    display: false,
                    tag: None,
                }),
            ]
        );
    }

    /// Always fails with a non-parse error
    struct BrokenRenderer;

    impl MathRenderer for BrokenRenderer {
        type Output = ();

        fn render(
            &self,
            _source: &str,
            _display: bool,
            _macros: &mut MacroTable,
            _options: &RenderOptions,
        ) -> Result<(), RenderError> {
            Err(RenderError::fatal("out of memory"))
        }
    }

    #[test]
    fn test_fatal_error_propagates() {
        let (options, messages) = recording(RenderOptions::dollars());
        let mut macros = options.macro_table();
        let result = render_math_in_text("$x$", &options, &mut macros, &BrokenRenderer);
        assert!(matches!(result, Err(RenderError::Fatal { .. })));
        assert!(messages.lock().unwrap().is_empty());
    }
}

// ============================================================================
// Content tree traversal
// ============================================================================

mod tree {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_nested_document() {
        let mut root = Element::new("article")
            .with_child(
                Element::new("section")
                    .with_text(r"Define \(\gdef\v#1{\vec{#1}}\)")
                    .with_child(Element::new("pre").with_text(r"\(raw\)")),
            )
            .with_child(Element::new("p").with_text(r"use \(\v{x}\)"));

        render_math_in_element(&mut root, &RenderOptions::default(), &TexRenderer).unwrap();

        let Node::Element(section) = &root.children[0] else {
            panic!("expected section");
        };
        let Node::Element(pre) = &section.children[2] else {
            panic!("expected pre");
        };
        assert_eq!(pre.children, vec![Node::Text(r"\(raw\)".to_string())]);

        let Node::Element(p) = &root.children[1] else {
            panic!("expected paragraph");
        };
        assert_eq!(
            p.children,
            vec![
                Node::Text("use ".to_string()),
                Node::Math(RenderedMath {
                    tex: r"\vec{x}".to_string(),
                    display: false,
                    tag: None,
                }),
            ]
        );
    }

    #[test]
    fn test_ignored_class() {
        let mut root = Element::new("div")
            .with_child(Element::new("span").with_class("raw").with_text("$$x$$"));
        let mut options = RenderOptions::default();
        options.ignored_classes.push("raw".to_string());
        render_math_in_element(&mut root, &options, &TexRenderer).unwrap();

        let Node::Element(span) = &root.children[0] else {
            panic!("expected span");
        };
        assert_eq!(span.children, vec![Node::Text("$$x$$".to_string())]);
    }
}
