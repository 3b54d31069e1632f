//! Render options
//!
//! [`RenderOptions`] carries everything a rendering pass needs besides the
//! renderer itself: which delimiters to look for, which elements to skip,
//! seed macros and the error callback.

use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use indexmap::IndexMap;

use super::delimiters::{DelimiterSpec, Fences};
use crate::features::macros::{MacroTable, DEFAULT_MAX_EXPAND};
use crate::utils::error::RenderError;

/// Called with a message and the error for every math region that fails
pub type ErrorCallback = Arc<dyn Fn(&str, &RenderError) + Send + Sync>;

/// Applied to a region's math source before it is rendered
pub type PreProcess = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Elements whose contents are never scanned for math
pub const DEFAULT_IGNORED_TAGS: &[&str] = &[
    "script", "noscript", "style", "textarea", "pre", "code", "option",
];

/// Default error callback: report on stderr and through `tracing`
fn log_error(message: &str, error: &RenderError) {
    tracing::error!(error = %error, "{}", message);
    // Without a subscriber the event above goes nowhere
    let _ = write_error(&mut io::stderr().lock(), message);
}

fn write_error(out: &mut impl Write, message: &str) -> io::Result<()> {
    writeln!(out, "[mathfence] Error: {}", message)
}

/// Options for rendering math in text and content trees
#[derive(Clone)]
pub struct RenderOptions {
    /// Explicit delimiter list; overrides `fences` when set
    pub delimiters: Option<Vec<DelimiterSpec>>,

    /// Preset delimiter family
    /// Default: basic (`$$`, `\(\)`, `\[\]`, AMS environments)
    pub fences: Option<Fences>,

    /// Lower-case tag names whose contents are skipped
    pub ignored_tags: Vec<String>,

    /// Class names whose elements are skipped
    /// Default: empty
    pub ignored_classes: Vec<String>,

    /// Seed macros, name → body. Definitions made while rendering land in
    /// the pass's shared table and stay visible to later regions.
    pub macros: IndexMap<String, String>,

    /// Expansion steps allowed per math region
    /// Default: 1000
    pub max_expand: usize,

    /// Reports regions that failed to parse
    /// Default: print to stderr, emit a `tracing` error event and continue
    pub error_callback: ErrorCallback,

    /// Hook applied to math source before rendering
    pub pre_process: Option<PreProcess>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            delimiters: None,
            fences: None,
            ignored_tags: DEFAULT_IGNORED_TAGS.iter().map(|t| t.to_string()).collect(),
            ignored_classes: Vec::new(),
            macros: IndexMap::new(),
            max_expand: DEFAULT_MAX_EXPAND,
            error_callback: Arc::new(log_error),
            pre_process: None,
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// `$$`, `` $`…`$ `` and single `$`
    pub fn dollars() -> Self {
        Self {
            fences: Some(Fences::Dollar),
            ..Self::default()
        }
    }

    /// `\[…\]` and `\(…\)` only
    pub fn parens() -> Self {
        Self {
            fences: Some(Fences::Paren),
            ..Self::default()
        }
    }

    /// AMS environments and `\ref`/`\eqref` only
    pub fn ams() -> Self {
        Self {
            fences: Some(Fences::Ams),
            ..Self::default()
        }
    }

    pub fn with_delimiters(mut self, delimiters: Vec<DelimiterSpec>) -> Self {
        self.delimiters = Some(delimiters);
        self
    }

    pub fn with_macro(mut self, name: impl Into<String>, body: impl Into<String>) -> Self {
        self.macros.insert(name.into(), body.into());
        self
    }

    pub fn with_error_callback(
        mut self,
        callback: impl Fn(&str, &RenderError) + Send + Sync + 'static,
    ) -> Self {
        self.error_callback = Arc::new(callback);
        self
    }

    pub fn with_pre_process(mut self, hook: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.pre_process = Some(Arc::new(hook));
        self
    }

    /// The delimiter list in effect: explicit list, then `fences`, then basic
    pub fn resolved_delimiters(&self) -> Vec<DelimiterSpec> {
        match (&self.delimiters, self.fences) {
            (Some(list), _) => list.clone(),
            (None, Some(fences)) => fences.delimiters(),
            (None, None) => Fences::Basic.delimiters(),
        }
    }

    /// A fresh macro table with built-ins and the seed macros
    pub fn macro_table(&self) -> MacroTable {
        MacroTable::with_user_macros(&self.macros)
    }

    pub fn is_ignored_tag(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        self.ignored_tags.iter().any(|t| *t == tag)
    }

    pub fn is_ignored_class(&self, class: &str) -> bool {
        self.ignored_classes.iter().any(|c| c == class)
    }

    pub(crate) fn report_error(&self, message: &str, error: &RenderError) {
        (self.error_callback)(message, error);
    }
}

impl fmt::Debug for RenderOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderOptions")
            .field("delimiters", &self.delimiters)
            .field("fences", &self.fences)
            .field("ignored_tags", &self.ignored_tags)
            .field("ignored_classes", &self.ignored_classes)
            .field("macros", &self.macros)
            .field("max_expand", &self.max_expand)
            .field("pre_process", &self.pre_process.is_some())
            .finish_non_exhaustive()
    }
}
