//! Math symbol classes
//!
//! Only the class of a symbol matters here: `\dots` picks centered dots when
//! the following symbol is a binary operator or a relation.

use phf::phf_map;

/// TeX atom class of a math symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolGroup {
    Ord,
    Op,
    Bin,
    Rel,
    Open,
    Close,
    Punct,
}

impl SymbolGroup {
    /// Binary operators and relations
    pub fn is_operator_like(self) -> bool {
        matches!(self, SymbolGroup::Bin | SymbolGroup::Rel)
    }
}

pub static MATH_SYMBOL_GROUPS: phf::Map<&'static str, SymbolGroup> = phf_map! {
    // Binary operators
    "\\pm" => SymbolGroup::Bin,
    "\\mp" => SymbolGroup::Bin,
    "\\times" => SymbolGroup::Bin,
    "\\div" => SymbolGroup::Bin,
    "\\cdot" => SymbolGroup::Bin,
    "\\ast" => SymbolGroup::Bin,
    "\\star" => SymbolGroup::Bin,
    "\\circ" => SymbolGroup::Bin,
    "\\bullet" => SymbolGroup::Bin,
    "\\cap" => SymbolGroup::Bin,
    "\\cup" => SymbolGroup::Bin,
    "\\uplus" => SymbolGroup::Bin,
    "\\sqcap" => SymbolGroup::Bin,
    "\\sqcup" => SymbolGroup::Bin,
    "\\vee" => SymbolGroup::Bin,
    "\\lor" => SymbolGroup::Bin,
    "\\wedge" => SymbolGroup::Bin,
    "\\land" => SymbolGroup::Bin,
    "\\setminus" => SymbolGroup::Bin,
    "\\smallsetminus" => SymbolGroup::Bin,
    "\\wr" => SymbolGroup::Bin,
    "\\diamond" => SymbolGroup::Bin,
    "\\oplus" => SymbolGroup::Bin,
    "\\ominus" => SymbolGroup::Bin,
    "\\otimes" => SymbolGroup::Bin,
    "\\oslash" => SymbolGroup::Bin,
    "\\odot" => SymbolGroup::Bin,
    "\\bigcirc" => SymbolGroup::Bin,
    "\\dagger" => SymbolGroup::Bin,
    "\\ddagger" => SymbolGroup::Bin,
    "\\amalg" => SymbolGroup::Bin,
    "\\triangleleft" => SymbolGroup::Bin,
    "\\triangleright" => SymbolGroup::Bin,
    "\\bigtriangleup" => SymbolGroup::Bin,
    "\\bigtriangledown" => SymbolGroup::Bin,
    "\\boxplus" => SymbolGroup::Bin,
    "\\boxminus" => SymbolGroup::Bin,
    "\\boxtimes" => SymbolGroup::Bin,
    "\\boxdot" => SymbolGroup::Bin,
    "\\dotplus" => SymbolGroup::Bin,
    "\\divideontimes" => SymbolGroup::Bin,
    "\\ltimes" => SymbolGroup::Bin,
    "\\rtimes" => SymbolGroup::Bin,
    "\\intercal" => SymbolGroup::Bin,
    "\\barwedge" => SymbolGroup::Bin,
    "\\veebar" => SymbolGroup::Bin,
    "\\curlywedge" => SymbolGroup::Bin,
    "\\curlyvee" => SymbolGroup::Bin,
    "\\centerdot" => SymbolGroup::Bin,

    // Relations
    "\\leq" => SymbolGroup::Rel,
    "\\le" => SymbolGroup::Rel,
    "\\geq" => SymbolGroup::Rel,
    "\\ge" => SymbolGroup::Rel,
    "\\neq" => SymbolGroup::Rel,
    "\\ne" => SymbolGroup::Rel,
    "\\equiv" => SymbolGroup::Rel,
    "\\sim" => SymbolGroup::Rel,
    "\\simeq" => SymbolGroup::Rel,
    "\\approx" => SymbolGroup::Rel,
    "\\cong" => SymbolGroup::Rel,
    "\\propto" => SymbolGroup::Rel,
    "\\ll" => SymbolGroup::Rel,
    "\\gg" => SymbolGroup::Rel,
    "\\prec" => SymbolGroup::Rel,
    "\\succ" => SymbolGroup::Rel,
    "\\preceq" => SymbolGroup::Rel,
    "\\succeq" => SymbolGroup::Rel,
    "\\subset" => SymbolGroup::Rel,
    "\\supset" => SymbolGroup::Rel,
    "\\subseteq" => SymbolGroup::Rel,
    "\\supseteq" => SymbolGroup::Rel,
    "\\sqsubseteq" => SymbolGroup::Rel,
    "\\sqsupseteq" => SymbolGroup::Rel,
    "\\in" => SymbolGroup::Rel,
    "\\ni" => SymbolGroup::Rel,
    "\\notin" => SymbolGroup::Rel,
    "\\vdash" => SymbolGroup::Rel,
    "\\dashv" => SymbolGroup::Rel,
    "\\models" => SymbolGroup::Rel,
    "\\perp" => SymbolGroup::Rel,
    "\\mid" => SymbolGroup::Rel,
    "\\parallel" => SymbolGroup::Rel,
    "\\bowtie" => SymbolGroup::Rel,
    "\\smile" => SymbolGroup::Rel,
    "\\frown" => SymbolGroup::Rel,
    "\\asymp" => SymbolGroup::Rel,
    "\\to" => SymbolGroup::Rel,
    "\\gets" => SymbolGroup::Rel,
    "\\rightarrow" => SymbolGroup::Rel,
    "\\leftarrow" => SymbolGroup::Rel,
    "\\leftrightarrow" => SymbolGroup::Rel,
    "\\Rightarrow" => SymbolGroup::Rel,
    "\\Leftarrow" => SymbolGroup::Rel,
    "\\Leftrightarrow" => SymbolGroup::Rel,
    "\\uparrow" => SymbolGroup::Rel,
    "\\downarrow" => SymbolGroup::Rel,
    "\\nearrow" => SymbolGroup::Rel,
    "\\searrow" => SymbolGroup::Rel,
    "\\swarrow" => SymbolGroup::Rel,
    "\\nwarrow" => SymbolGroup::Rel,
    "\\leadsto" => SymbolGroup::Rel,
    "\\coloneqq" => SymbolGroup::Rel,
    "\\Coloneqq" => SymbolGroup::Rel,
    "\\eqqcolon" => SymbolGroup::Rel,
    "\\eqcolon" => SymbolGroup::Rel,
    "\\dblcolon" => SymbolGroup::Rel,
    "\\leqslant" => SymbolGroup::Rel,
    "\\geqslant" => SymbolGroup::Rel,
    "\\lesssim" => SymbolGroup::Rel,
    "\\gtrsim" => SymbolGroup::Rel,
    "\\triangleq" => SymbolGroup::Rel,

    // Large operators
    "\\lim" => SymbolGroup::Op,
    "\\bigstar" => SymbolGroup::Op,

    // Delimiters
    "(" => SymbolGroup::Open,
    "[" => SymbolGroup::Open,
    "\\langle" => SymbolGroup::Open,
    "\\lbrace" => SymbolGroup::Open,
    "\\lceil" => SymbolGroup::Open,
    "\\lfloor" => SymbolGroup::Open,
    ")" => SymbolGroup::Close,
    "]" => SymbolGroup::Close,
    "\\rangle" => SymbolGroup::Close,
    "\\rbrace" => SymbolGroup::Close,
    "\\rceil" => SymbolGroup::Close,
    "\\rfloor" => SymbolGroup::Close,

    // Punctuation
    ";" => SymbolGroup::Punct,
    "\\ldotp" => SymbolGroup::Punct,

    // Ordinary symbols
    "\\infty" => SymbolGroup::Ord,
    "\\partial" => SymbolGroup::Ord,
    "\\nabla" => SymbolGroup::Ord,
    "\\emptyset" => SymbolGroup::Ord,
    "\\forall" => SymbolGroup::Ord,
    "\\exists" => SymbolGroup::Ord,
    "\\alpha" => SymbolGroup::Ord,
    "\\beta" => SymbolGroup::Ord,
    "\\gamma" => SymbolGroup::Ord,
    "\\pi" => SymbolGroup::Ord,
};

/// Class of `name`, if it is a known math symbol
pub fn symbol_group(name: &str) -> Option<SymbolGroup> {
    MATH_SYMBOL_GROUPS.get(name).copied()
}
