//! Character classification tables used by the normalizer.
//!
//! PDF text extraction produces a predictable family of artifacts:
//! ligature glyphs, soft hyphens, non-breaking spaces, typographic quotes
//! and dashes, and Greek letters in formulas. The tables here map each of
//! those onto the canonical form the matcher searches over.

/// The seven standard Latin ligature glyphs and their expansions.
pub fn expand_ligature(ch: char) -> Option<&'static str> {
    match ch {
        '\u{FB00}' => Some("ff"),
        '\u{FB01}' => Some("fi"),
        '\u{FB02}' => Some("fl"),
        '\u{FB03}' => Some("ffi"),
        '\u{FB04}' => Some("ffl"),
        '\u{FB05}' => Some("ft"),
        '\u{FB06}' => Some("st"),
        _ => None,
    }
}

/// Transliterate Greek letters to ASCII words, as they commonly appear in
/// extracted formula text. Case is irrelevant downstream (everything is
/// lowercased), so upper and lower case map to the same word.
pub fn greek_word(ch: char) -> Option<&'static str> {
    match ch {
        'α' | 'Α' => Some("alpha"),
        'β' | 'Β' => Some("beta"),
        'γ' | 'Γ' => Some("gamma"),
        'δ' | 'Δ' => Some("delta"),
        'ε' | 'Ε' => Some("epsilon"),
        'ζ' | 'Ζ' => Some("zeta"),
        'η' | 'Η' => Some("eta"),
        'θ' | 'Θ' => Some("theta"),
        'ι' | 'Ι' => Some("iota"),
        'κ' | 'Κ' => Some("kappa"),
        'λ' | 'Λ' => Some("lambda"),
        // U+00B5 is the micro sign, which extractors emit interchangeably
        // with the Greek letter.
        'μ' | 'Μ' | '\u{00B5}' => Some("mu"),
        'ν' | 'Ν' => Some("nu"),
        'ξ' | 'Ξ' => Some("xi"),
        'ο' | 'Ο' => Some("omicron"),
        'π' | 'Π' => Some("pi"),
        'ρ' | 'Ρ' => Some("rho"),
        'σ' | 'ς' | 'Σ' => Some("sigma"),
        'τ' | 'Τ' => Some("tau"),
        'υ' | 'Υ' => Some("upsilon"),
        'φ' | 'Φ' => Some("phi"),
        'χ' | 'Χ' => Some("chi"),
        'ψ' | 'Ψ' => Some("psi"),
        'ω' | 'Ω' => Some("omega"),
        _ => None,
    }
}

/// Characters dropped entirely: zero-width code points and the soft hyphen.
/// These produce no output and no position-map entry.
pub fn is_dropped(ch: char) -> bool {
    matches!(
        ch,
        '\u{00AD}' // soft hyphen
            | '\u{200B}' // zero-width space
            | '\u{200C}' // zero-width non-joiner
            | '\u{200D}' // zero-width joiner
            | '\u{2060}' // word joiner
            | '\u{FEFF}' // BOM / zero-width no-break space
    )
}

/// Hyphen shapes that can carry a hyphenated line break.
pub fn is_hyphen(ch: char) -> bool {
    matches!(
        ch,
        '-' | '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2212}'
    )
}

/// Characters treated as word separators: quotes, dashes, brackets,
/// sentence punctuation, and math/operator symbols. Each collapses to a
/// single space in the normalized stream.
pub fn is_separator(ch: char) -> bool {
    if ch.is_ascii_punctuation() {
        return true;
    }
    if is_hyphen(ch) {
        return true;
    }
    matches!(
        ch,
        // typographic quotes
        '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}'
            | '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}'
            | '\u{2039}' | '\u{203A}' | '\u{00AB}' | '\u{00BB}'
            // dashes not in the hyphen set
            | '\u{2015}'
            // angle brackets
            | '\u{2329}' | '\u{232A}' | '\u{27E8}' | '\u{27E9}' | '\u{3008}' | '\u{3009}'
            // math and operator symbols
            | '\u{00D7}' // ×
            | '\u{00F7}' // ÷
            | '\u{00B1}' // ±
            | '\u{2217}' // ∗
            | '\u{2219}' // ∙
            | '\u{22C5}' // ⋅
            | '\u{2264}' // ≤
            | '\u{2265}' // ≥
            | '\u{2044}' // fraction slash (NFKD output of vulgar fractions)
            // bullets and middle dot
            | '\u{2022}' | '\u{00B7}'
            // horizontal ellipsis
            | '\u{2026}'
    )
}
