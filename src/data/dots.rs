//! Lookahead tables for amsmath's automatic dots

use phf::{phf_map, phf_set};

/// Following token → ellipsis variant picked by `\dots`
pub static DOTS_BY_TOKEN: phf::Map<&'static str, &'static str> = phf_map! {
    "," => "\\dotsc",
    "\\not" => "\\dotsb",
    // \keybin@
    "+" => "\\dotsb",
    "=" => "\\dotsb",
    "<" => "\\dotsb",
    ">" => "\\dotsb",
    "-" => "\\dotsb",
    "*" => "\\dotsb",
    ":" => "\\dotsb",
    // Defined as \DOTSB ...
    "\\DOTSB" => "\\dotsb",
    "\\coprod" => "\\dotsb",
    "\\bigvee" => "\\dotsb",
    "\\bigwedge" => "\\dotsb",
    "\\biguplus" => "\\dotsb",
    "\\bigcap" => "\\dotsb",
    "\\bigcup" => "\\dotsb",
    "\\prod" => "\\dotsb",
    "\\sum" => "\\dotsb",
    "\\bigotimes" => "\\dotsb",
    "\\bigoplus" => "\\dotsb",
    "\\bigodot" => "\\dotsb",
    "\\bigsqcap" => "\\dotsb",
    "\\bigsqcup" => "\\dotsb",
    "\\And" => "\\dotsb",
    "\\longrightarrow" => "\\dotsb",
    "\\Longrightarrow" => "\\dotsb",
    "\\longleftarrow" => "\\dotsb",
    "\\Longleftarrow" => "\\dotsb",
    "\\longleftrightarrow" => "\\dotsb",
    "\\Longleftrightarrow" => "\\dotsb",
    "\\mapsto" => "\\dotsb",
    "\\longmapsto" => "\\dotsb",
    "\\hookrightarrow" => "\\dotsb",
    "\\doteq" => "\\dotsb",
    // Defined as \mathbin / \mathrel ...
    "\\mathbin" => "\\dotsb",
    "\\mathrel" => "\\dotsb",
    "\\relbar" => "\\dotsb",
    "\\Relbar" => "\\dotsb",
    "\\xrightarrow" => "\\dotsb",
    "\\xleftarrow" => "\\dotsb",
    // Defined as \DOTSI ...
    "\\DOTSI" => "\\dotsi",
    "\\int" => "\\dotsi",
    "\\oint" => "\\dotsi",
    "\\iint" => "\\dotsi",
    "\\iiint" => "\\dotsi",
    "\\iiiint" => "\\dotsi",
    "\\idotsint" => "\\dotsi",
    // Defined as \DOTSX ...
    "\\DOTSX" => "\\dotsx",
};

/// Tokens after which low/centered dots get a trailing thin space
pub static SPACE_AFTER_DOTS: phf::Set<&'static str> = phf_set! {
    // \rightdelim@
    ")",
    "]",
    "\\rbrack",
    "\\}",
    "\\rbrace",
    "\\rangle",
    "\\rceil",
    "\\rfloor",
    "\\rgroup",
    "\\rmoustache",
    "\\right",
    "\\bigr",
    "\\biggr",
    "\\Bigr",
    "\\Biggr",
    // \extra@
    "$",
    // \extrap@
    ";",
    ".",
    ",",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dots_table() {
        assert_eq!(DOTS_BY_TOKEN.get("+"), Some(&"\\dotsb"));
        assert_eq!(DOTS_BY_TOKEN.get(","), Some(&"\\dotsc"));
        assert_eq!(DOTS_BY_TOKEN.get("\\iint"), Some(&"\\dotsi"));
        assert_eq!(DOTS_BY_TOKEN.get("x"), None);
    }

    #[test]
    fn test_space_after_dots() {
        assert!(SPACE_AFTER_DOTS.contains("\\right"));
        assert!(SPACE_AFTER_DOTS.contains(","));
        assert!(!SPACE_AFTER_DOTS.contains("x"));
    }
}
