//! Delimiter specifications and the preset tables behind the `fences` option
//!
//! A delimiter list is ordered: the scanner tries specs in list order and the
//! first whose `left` matches wins. Lists containing both `$$` and `$` must
//! therefore put `$$` first, which every preset here does.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// One `left … right` pair and the display mode it implies
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DelimiterSpec {
    pub left: Cow<'static, str>,
    pub right: Cow<'static, str>,
    pub display: bool,
}

impl DelimiterSpec {
    pub fn new(left: impl Into<String>, right: impl Into<String>, display: bool) -> Self {
        Self {
            left: Cow::Owned(left.into()),
            right: Cow::Owned(right.into()),
            display,
        }
    }

    const fn fixed(left: &'static str, right: &'static str, display: bool) -> Self {
        Self {
            left: Cow::Borrowed(left),
            right: Cow::Borrowed(right),
            display,
        }
    }

    pub fn inline(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self::new(left, right, false)
    }

    pub fn display(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self::new(left, right, true)
    }
}

const AMS_DELIMITERS: &[DelimiterSpec] = &[
    DelimiterSpec::fixed("\\begin{equation}", "\\end{equation}", true),
    DelimiterSpec::fixed("\\begin{equation*}", "\\end{equation*}", true),
    DelimiterSpec::fixed("\\begin{align}", "\\end{align}", true),
    DelimiterSpec::fixed("\\begin{align*}", "\\end{align*}", true),
    DelimiterSpec::fixed("\\begin{alignat}", "\\end{alignat}", true),
    DelimiterSpec::fixed("\\begin{alignat*}", "\\end{alignat*}", true),
    DelimiterSpec::fixed("\\begin{gather}", "\\end{gather}", true),
    DelimiterSpec::fixed("\\begin{gather*}", "\\end{gather*}", true),
    DelimiterSpec::fixed("\\begin{CD}", "\\end{CD}", true),
    DelimiterSpec::fixed("\\ref{", "}", false),
    DelimiterSpec::fixed("\\eqref{", "}", false),
];

const DOLLAR_DELIMITERS: &[DelimiterSpec] = &[
    DelimiterSpec::fixed("$$", "$$", true),
    DelimiterSpec::fixed("$`", "`$", false),
    DelimiterSpec::fixed("$", "$", false),
];

const PAREN_DELIMITERS: &[DelimiterSpec] = &[
    DelimiterSpec::fixed("\\[", "\\]", true),
    DelimiterSpec::fixed("\\(", "\\)", false),
];

/// Preset delimiter families selectable through the `fences` option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fences {
    /// `$$`, `\(\)`, AMS environments, `\ref`/`\eqref`, `\[\]`
    #[default]
    Basic,
    /// `$$`, `` $`…`$ ``, `$`
    Dollar,
    /// `\[\]`, `\(\)`
    Paren,
    /// Dollar preset followed by the AMS preset
    DollarAms,
    /// Paren preset followed by the AMS preset
    ParenAms,
    /// AMS environments and references only
    Ams,
    /// Paren, dollar and AMS presets together
    All,
}

impl Fences {
    /// Resolve a configuration key; unknown keys select [`Fences::Basic`]
    pub fn from_key(key: &str) -> Self {
        match key {
            "$" => Fences::Dollar,
            "(" => Fences::Paren,
            "$+" => Fences::DollarAms,
            "(+" => Fences::ParenAms,
            "ams" => Fences::Ams,
            "all" => Fences::All,
            "basic" | "default" | "" => Fences::Basic,
            other => {
                tracing::debug!(key = other, "unknown fences key, using basic delimiters");
                Fences::Basic
            }
        }
    }

    /// The configuration key for this preset
    pub fn key(&self) -> &'static str {
        match self {
            Fences::Basic => "basic",
            Fences::Dollar => "$",
            Fences::Paren => "(",
            Fences::DollarAms => "$+",
            Fences::ParenAms => "(+",
            Fences::Ams => "ams",
            Fences::All => "all",
        }
    }

    /// The ordered delimiter list for this preset
    pub fn delimiters(&self) -> Vec<DelimiterSpec> {
        match self {
            Fences::Basic => basic_delimiters(),
            Fences::Dollar => DOLLAR_DELIMITERS.to_vec(),
            Fences::Paren => PAREN_DELIMITERS.to_vec(),
            Fences::DollarAms => [DOLLAR_DELIMITERS, AMS_DELIMITERS].concat(),
            Fences::ParenAms => [PAREN_DELIMITERS, AMS_DELIMITERS].concat(),
            Fences::Ams => AMS_DELIMITERS.to_vec(),
            Fences::All => [PAREN_DELIMITERS, DOLLAR_DELIMITERS, AMS_DELIMITERS].concat(),
        }
    }
}

impl FromStr for Fences {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Fences::from_key(s))
    }
}

impl fmt::Display for Fences {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The default delimiter list.
///
/// Single `$` is left out on purpose: it ruins ordinary dollar amounts in prose.
pub fn basic_delimiters() -> Vec<DelimiterSpec> {
    let mut list = Vec::with_capacity(AMS_DELIMITERS.len() + 3);
    list.push(DelimiterSpec::fixed("$$", "$$", true));
    list.push(DelimiterSpec::fixed("\\(", "\\)", false));
    list.extend_from_slice(AMS_DELIMITERS);
    list.push(DelimiterSpec::fixed("\\[", "\\]", true));
    list
}

/// Where a delimiter list comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DelimiterSource<'a> {
    /// A caller-supplied list, used as-is
    Explicit(&'a [DelimiterSpec]),
    /// A preset key such as `"$+"`
    Key(&'a str),
}

/// Resolve a key or explicit list into an ordered delimiter list
pub fn resolve_delimiters(source: DelimiterSource<'_>) -> Vec<DelimiterSpec> {
    match source {
        DelimiterSource::Explicit(list) => list.to_vec(),
        DelimiterSource::Key(key) => Fences::from_key(key).delimiters(),
    }
}
