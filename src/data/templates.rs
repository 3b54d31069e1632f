//! Static macro templates
//!
//! Every built-in macro that is a plain token rewrite lives here. Bodies may
//! contain `#1..#9` placeholders; the argument count is derived from the body.
//! Procedural built-ins are registered separately in
//! [`crate::features::macros::builtins`].

use phf::phf_map;

/// Control sequence (or single character) → replacement source
pub static TEMPLATES: phf::Map<&'static str, &'static str> = phf_map! {
    // Conditionals and boxes
    "\\@ifstar" => "\\@ifnextchar *{\\@firstoftwo{#1}}",
    "\\hbox" => "\\text{#1}",

    // Grouping
    "\\bgroup" => "{",
    "\\egroup" => "}",

    // latex.ltx symbols
    "~" => "\\nobreakspace",
    "\\lq" => "`",
    "\\rq" => "'",
    "\\aa" => "\\r a",
    "\\AA" => "\\r A",
    "\\Bbbk" => "\\Bbb{k}",

    // Overlapping boxes render their contents in text mode
    "\\llap" => "\\mathllap{\\textrm{#1}}",
    "\\rlap" => "\\mathrlap{\\textrm{#1}}",
    "\\clap" => "\\mathclap{\\textrm{#1}}",

    "\\mathstrut" => "\\vphantom{(}",
    "\\underbar" => "\\underline{\\text{#1}}",

    // LaTeX 2e
    "\\vdots" => "\\mathord{\\varvdots\\rule{0pt}{15pt}}",
    "\u{22ee}" => "\\vdots",

    // amsmath
    "\\operatorname" => "\\@ifstar\\operatornamewithlimits\\operatorname@",
    "\\substack" => "\\begin{subarray}{c}#1\\end{subarray}",
    "\\colon" => "\\nobreak\\mskip2mu\\mathpunct{}\\mathchoice{\\mkern-3mu}{\\mkern-3mu}{}{}{:}\\mskip6mu",
    "\\boxed" => "\\fbox{$\\displaystyle{#1}$}",
    "\\iff" => "\\DOTSB\\;\\Longleftrightarrow\\;",
    "\\implies" => "\\DOTSB\\;\\Longrightarrow\\;",
    "\\impliedby" => "\\DOTSB\\;\\Longleftarrow\\;",

    // Dots variants
    "\\dotsb" => "\\cdots",
    "\\dotsm" => "\\cdots",
    "\\dotsi" => "\\!\\cdots",
    "\\idotsint" => "\\dotsi",
    "\\dotsx" => "\\ldots\\,",
    "\\DOTSI" => "\\relax",
    "\\DOTSB" => "\\relax",
    "\\DOTSX" => "\\relax",

    // Spacing (amsmath overrides)
    "\\tmspace" => "\\TextOrMath{\\kern#1#3}{\\mskip#1#2}\\relax",
    "\\," => "\\tmspace+{3mu}{.1667em}",
    "\\thinspace" => "\\,",
    "\\>" => "\\mskip{4mu}",
    "\\:" => "\\tmspace+{4mu}{.2222em}",
    "\\medspace" => "\\:",
    "\\;" => "\\tmspace+{5mu}{.2777em}",
    "\\thickspace" => "\\;",
    "\\!" => "\\tmspace-{3mu}{.1667em}",
    "\\negthinspace" => "\\!",
    "\\negmedspace" => "\\tmspace-{4mu}{.2222em}",
    "\\negthickspace" => "\\tmspace-{5mu}{.277em}",
    "\\enspace" => "\\kern.5em ",
    "\\enskip" => "\\hskip.5em\\relax",
    "\\quad" => "\\hskip1em\\relax",
    "\\qquad" => "\\hskip2em\\relax",

    // Equation tags
    "\\tag" => "\\@ifstar\\tag@literal\\tag@paren",
    "\\tag@paren" => "\\tag@literal{({#1})}",

    // Modular arithmetic
    "\\bmod" => "\\mathchoice{\\mskip1mu}{\\mskip1mu}{\\mskip5mu}{\\mskip5mu}\\mathbin{\\rm mod}\\mathchoice{\\mskip1mu}{\\mskip1mu}{\\mskip5mu}{\\mskip5mu}",
    "\\pod" => "\\allowbreak\\mathchoice{\\mkern18mu}{\\mkern8mu}{\\mkern8mu}{\\mkern8mu}(#1)",
    "\\pmod" => "\\pod{{\\rm mod}\\mkern6mu#1}",
    "\\mod" => "\\allowbreak\\mathchoice{\\mkern18mu}{\\mkern12mu}{\\mkern12mu}{\\mkern12mu}{\\rm mod}\\,\\,#1",
    "\\pmb" => "\\mathbf{#1}",

    // LaTeX source2e
    "\\newline" => "\\\\\\relax",
    "\\TeX" => "\\textrm{T}\\kern-.1667em\\raisebox{-.5ex}{E}\\kern-.125em\\textrm{X}",
    "\\LaTeX" => "\\textrm{L}\\kern-.35em\\raisebox{0.2em}{\\scriptstyle A}\\kern-.15em\\TeX",
    "\\Temml" => "\\textrm{T}\\kern-0.2em\\lower{0.2em}\\textrm{E}\\kern-0.08em{\\textrm{M}\\kern-0.08em\\raise{0.2em}\\textrm{M}\\kern-0.08em\\textrm{L}}",
    "\\hspace" => "\\@ifstar\\@hspacer\\@hspace",
    "\\@hspace" => "\\hskip #1\\relax",
    "\\@hspacer" => "\\rule{0pt}{0pt}\\hskip #1\\relax",

    // mathtools
    "\\prescript" => "\\pres@cript{_{#1}^{#2}}{}{#3}",
    "\\ordinarycolon" => ":",
    "\\vcentcolon" => "\\mathrel{\\mathop\\ordinarycolon}",
    "\\coloneq" => "\\mathop{\\char\"3a\\char\"2212}",
    "\\Coloneq" => "\\mathop{\\char\"2237\\char\"2212}",
    "\\Eqqcolon" => "\\mathop{\\char\"3d\\char\"2237}",
    "\\Eqcolon" => "\\mathop{\\char\"2212\\char\"2237}",
    "\\colonapprox" => "\\mathop{\\char\"3a\\char\"2248}",
    "\\Colonapprox" => "\\mathop{\\char\"2237\\char\"2248}",
    "\\colonsim" => "\\mathop{\\char\"3a\\char\"223c}",
    "\\Colonsim" => "\\mathop{\\char\"2237\\char\"223c}",

    // colonequals aliases
    "\\ratio" => "\\vcentcolon",
    "\\coloncolon" => "\\dblcolon",
    "\\colonequals" => "\\coloneqq",
    "\\coloncolonequals" => "\\Coloneqq",
    "\\equalscolon" => "\\eqqcolon",
    "\\equalscoloncolon" => "\\Eqqcolon",
    "\\colonminus" => "\\coloneq",
    "\\coloncolonminus" => "\\Coloneq",
    "\\minuscolon" => "\\eqcolon",
    "\\minuscoloncolon" => "\\Eqcolon",
    "\\coloncolonapprox" => "\\Colonapprox",
    "\\coloncolonsim" => "\\Colonsim",

    // newtxmath / txfonts
    "\\notni" => "\\mathrel{\\char`\u{220C}}",
    "\\limsup" => "\\DOTSB\\operatorname*{lim\\,sup}",
    "\\liminf" => "\\DOTSB\\operatorname*{lim\\,inf}",

    // amsopn
    "\\injlim" => "\\DOTSB\\operatorname*{inj\\,lim}",
    "\\projlim" => "\\DOTSB\\operatorname*{proj\\,lim}",
    "\\varlimsup" => "\\DOTSB\\operatorname*{\\overline{\\text{lim}}}",
    "\\varliminf" => "\\DOTSB\\operatorname*{\\underline{\\text{lim}}}",
    "\\varinjlim" => "\\DOTSB\\operatorname*{\\underrightarrow{\\text{lim}}}",
    "\\varprojlim" => "\\DOTSB\\operatorname*{\\underleftarrow{\\text{lim}}}",

    // statmath
    "\\argmin" => "\\DOTSB\\operatorname*{arg\\,min}",
    "\\argmax" => "\\DOTSB\\operatorname*{arg\\,max}",
    "\\plim" => "\\DOTSB\\mathop{\\operatorname{plim}}\\limits",

    // braket
    "\\bra" => "\\mathinner{\\langle{#1}|}",
    "\\ket" => "\\mathinner{|{#1}\\rangle}",
    "\\braket" => "\\mathinner{\\langle{#1}\\rangle}",
    "\\Bra" => "\\left\\langle#1\\right|",
    "\\Ket" => "\\left|#1\\right\\rangle",

    // actuarialangle
    "\\angln" => "{\\angl n}",

    // upgreek
    "\\upalpha" => "\\up@greek{\\alpha}",
    "\\upbeta" => "\\up@greek{\\beta}",
    "\\upgamma" => "\\up@greek{\\gamma}",
    "\\updelta" => "\\up@greek{\\delta}",
    "\\upepsilon" => "\\up@greek{\\epsilon}",
    "\\upzeta" => "\\up@greek{\\zeta}",
    "\\upeta" => "\\up@greek{\\eta}",
    "\\uptheta" => "\\up@greek{\\theta}",
    "\\upiota" => "\\up@greek{\\iota}",
    "\\upkappa" => "\\up@greek{\\kappa}",
    "\\uplambda" => "\\up@greek{\\lambda}",
    "\\upmu" => "\\up@greek{\\mu}",
    "\\upnu" => "\\up@greek{\\nu}",
    "\\upxi" => "\\up@greek{\\xi}",
    "\\upomicron" => "\\up@greek{\\omicron}",
    "\\uppi" => "\\up@greek{\\pi}",
    "\\uprho" => "\\up@greek{\\rho}",
    "\\upsigma" => "\\up@greek{\\sigma}",
    "\\uptau" => "\\up@greek{\\tau}",
    "\\upupsilon" => "\\up@greek{\\upsilon}",
    "\\upphi" => "\\up@greek{\\phi}",
    "\\upchi" => "\\up@greek{\\chi}",
    "\\uppsi" => "\\up@greek{\\psi}",
    "\\upomega" => "\\up@greek{\\omega}",

    // chemstyle
    "\\standardstate" => "{\\tiny\\char`\u{29B5}}",
};

/// Template body for `name`, if it is a static built-in
pub fn get_template(name: &str) -> Option<&'static str> {
    TEMPLATES.get(name).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spacing_chain() {
        assert_eq!(get_template("\\thinspace"), Some("\\,"));
        assert_eq!(get_template("\\,"), Some("\\tmspace+{3mu}{.1667em}"));
        assert_eq!(get_template("\\enspace"), Some("\\kern.5em "));
    }

    #[test]
    fn test_non_ascii_keys() {
        assert_eq!(get_template("⋮"), Some("\\vdots"));
        assert_eq!(get_template("\\standardstate"), Some("{\\tiny\\char`⦵}"));
        assert_eq!(get_template("\\notni"), Some("\\mathrel{\\char`∌}"));
    }

    #[test]
    fn test_procedural_names_absent() {
        assert_eq!(get_template("\\dots"), None);
        assert_eq!(get_template("\\char"), None);
        assert_eq!(get_template("\\tag@literal"), None);
    }
}
