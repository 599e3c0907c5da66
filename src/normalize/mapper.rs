//! Canonical text forms with position maps back to the original string.
//!
//! `normalize` is the single entry point: it produces an [`IndexedText`]
//! whose `text` is the canonical form and whose per-byte maps recover the
//! original byte span that produced any normalized span. The compact and
//! alnum variants are derived by filtering the normalized stream in
//! lockstep with its maps, so every form can translate a hit back to
//! original offsets on its own.

use crate::normalize::tables;
use memchr::memmem;
use std::ops::Range;
use unicode_normalization::char::{decompose_compatible, is_combining_mark};

/// A normalized text plus the mapping from each normalized byte back to
/// the original character that produced it.
///
/// Invariants (checked by `debug_assert_well_formed` and the fuzz target):
/// - `origin.len() == origin_end.len() == text.len()`
/// - both maps are non-decreasing
/// - `origin[k] <= origin_end[k]` for every `k`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedText {
    pub(crate) text: String,
    /// Original byte offset of the character that produced normalized byte k.
    pub(crate) origin: Vec<u32>,
    /// Exclusive original end of that character.
    pub(crate) origin_end: Vec<u32>,
}

impl IndexedText {
    pub(crate) fn from_parts(text: String, origin: Vec<u32>, origin_end: Vec<u32>) -> Self {
        let out = Self {
            text,
            origin,
            origin_end,
        };
        out.debug_assert_well_formed();
        out
    }

    /// The normalized text itself.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in bytes of the normalized text.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Length in characters of the normalized text.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// First occurrence of `needle` in the normalized text.
    pub fn find(&self, needle: &str) -> Option<usize> {
        memmem::find(self.text.as_bytes(), needle.as_bytes())
    }

    /// First occurrence of `needle` at or after byte offset `from`.
    pub fn find_from(&self, needle: &str, from: usize) -> Option<usize> {
        if from > self.text.len() {
            return None;
        }
        memmem::find(&self.text.as_bytes()[from..], needle.as_bytes()).map(|p| p + from)
    }

    /// Translate a half-open normalized byte span into the half-open
    /// original byte span that produced it.
    pub fn to_original(&self, span: Range<usize>) -> Range<usize> {
        debug_assert!(span.end <= self.origin.len());
        if span.start >= span.end {
            let at = self.origin.get(span.start).copied().unwrap_or(0) as usize;
            return at..at;
        }
        let start = self.origin[span.start] as usize;
        let end = self.origin_end[span.end - 1] as usize;
        start..end
    }

    /// Variant with all spaces removed.
    pub fn compact(&self) -> IndexedText {
        self.retain(|ch| ch != ' ')
    }

    /// Variant with everything outside `[a-z0-9]` removed.
    pub fn alnum(&self) -> IndexedText {
        self.retain(|ch| ch.is_ascii_alphanumeric())
    }

    fn retain(&self, keep: impl Fn(char) -> bool) -> IndexedText {
        let mut text = String::with_capacity(self.text.len());
        let mut origin = Vec::with_capacity(self.origin.len());
        let mut origin_end = Vec::with_capacity(self.origin_end.len());
        for (i, ch) in self.text.char_indices() {
            if keep(ch) {
                text.push(ch);
                for k in i..i + ch.len_utf8() {
                    origin.push(self.origin[k]);
                    origin_end.push(self.origin_end[k]);
                }
            }
        }
        IndexedText {
            text,
            origin,
            origin_end,
        }
    }

    /// Concatenate two indexed texts, shifting `b`'s maps by `shift` so
    /// the result maps into a virtual concatenation of the two original
    /// texts. The optional separator space maps to the zero-width point
    /// `shift..shift`, so it can never claim original characters of
    /// either side.
    pub(crate) fn concat_shifted(
        a: &IndexedText,
        b: &IndexedText,
        shift: u32,
        separator: bool,
    ) -> IndexedText {
        let sep = separator && !a.text.is_empty() && !b.text.is_empty();
        let mut text = String::with_capacity(a.text.len() + b.text.len() + 1);
        let mut origin = Vec::with_capacity(a.origin.len() + b.origin.len() + 1);
        let mut origin_end = Vec::with_capacity(origin.capacity());
        text.push_str(&a.text);
        origin.extend_from_slice(&a.origin);
        origin_end.extend_from_slice(&a.origin_end);
        if sep {
            text.push(' ');
            origin.push(shift);
            origin_end.push(shift);
        }
        text.push_str(&b.text);
        origin.extend(b.origin.iter().map(|&v| v + shift));
        origin_end.extend(b.origin_end.iter().map(|&v| v + shift));
        IndexedText::from_parts(text, origin, origin_end)
    }

    pub(crate) fn debug_assert_well_formed(&self) {
        debug_assert_eq!(self.origin.len(), self.text.len());
        debug_assert_eq!(self.origin_end.len(), self.text.len());
        debug_assert!(self.origin.windows(2).all(|w| w[0] <= w[1]));
        debug_assert!(
            self.origin
                .iter()
                .zip(&self.origin_end)
                .all(|(s, e)| s <= e)
        );
    }
}

/// Normalize `raw` into its canonical matching form.
///
/// Applied per original character, left to right:
/// - zero-width characters and soft hyphens are dropped outright;
/// - Greek letters become ASCII words, ligatures their letter sequences;
/// - hyphenated line breaks (`alnum + hyphen + optional whitespace +
///   alnum`) collapse to the joined letters;
/// - everything else is NFKD-decomposed (which also folds sub/superscript
///   digit and letter forms to their base characters), combining marks are
///   stripped, separators and whitespace collapse to single spaces, and
///   the rest is lowercased.
///
/// The result is trimmed, never contains two consecutive spaces, and is
/// idempotent: normalizing the normalized text reproduces it.
pub fn normalize(raw: &str) -> IndexedText {
    let mut out = Builder::default();
    let mut chars = raw.char_indices().peekable();
    while let Some((pos, ch)) = chars.next() {
        let range = pos..pos + ch.len_utf8();
        if tables::is_dropped(ch) {
            continue;
        }
        if tables::is_hyphen(ch) && out.ends_in_alnum() {
            // Hyphenated break: drop the hyphen and any following
            // whitespace so the two halves fuse.
            let mut ahead = chars.clone();
            let mut next_solid = None;
            while let Some(&(_, nc)) = ahead.peek() {
                if nc.is_whitespace() {
                    ahead.next();
                } else {
                    next_solid = Some(nc);
                    break;
                }
            }
            if next_solid.is_some_and(char::is_alphanumeric) {
                while chars.peek().is_some_and(|&(_, nc)| nc.is_whitespace()) {
                    chars.next();
                }
                continue;
            }
        }
        if let Some(word) = tables::greek_word(ch) {
            out.push_str(word, &range);
            continue;
        }
        if let Some(expansion) = tables::expand_ligature(ch) {
            out.push_str(expansion, &range);
            continue;
        }
        emit_folded(&mut out, ch, &range);
    }
    out.finish()
}

/// Fold a single character through NFKD, routing every decomposed piece
/// back through the classification tables. NFKD maps the math-alphabet
/// and symbol variants onto plain Greek letters and ligatures, so one
/// level of re-routing keeps the output idempotent.
fn emit_folded(out: &mut Builder, ch: char, range: &Range<usize>) {
    if ch.is_whitespace() || tables::is_separator(ch) {
        out.push_space(range);
        return;
    }
    decompose_compatible(ch, |d| {
        if is_combining_mark(d) {
            return;
        }
        if d.is_whitespace() || tables::is_separator(d) {
            out.push_space(range);
            return;
        }
        if let Some(word) = tables::greek_word(d) {
            out.push_str(word, range);
            return;
        }
        if let Some(expansion) = tables::expand_ligature(d) {
            out.push_str(expansion, range);
            return;
        }
        for lower in d.to_lowercase() {
            out.push_char(lower, range);
        }
    });
}

/// Accumulates normalized output with space collapsing and map tracking.
#[derive(Default)]
struct Builder {
    text: String,
    origin: Vec<u32>,
    origin_end: Vec<u32>,
    /// Original span of the first separator seen since the last solid
    /// character; emitted as one space when the next solid char arrives.
    pending_space: Option<(u32, u32)>,
}

impl Builder {
    fn push_char(&mut self, ch: char, range: &Range<usize>) {
        if let Some((s, e)) = self.pending_space.take() {
            self.text.push(' ');
            self.origin.push(s);
            self.origin_end.push(e);
        }
        self.text.push(ch);
        for _ in 0..ch.len_utf8() {
            self.origin.push(range.start as u32);
            self.origin_end.push(range.end as u32);
        }
    }

    fn push_str(&mut self, s: &str, range: &Range<usize>) {
        for ch in s.chars() {
            self.push_char(ch, range);
        }
    }

    fn push_space(&mut self, range: &Range<usize>) {
        // Leading separators are trimmed; interior runs collapse to the
        // span of the first separator in the run.
        if self.text.is_empty() || self.pending_space.is_some() {
            return;
        }
        self.pending_space = Some((range.start as u32, range.end as u32));
    }

    /// True when the last emitted character is alphanumeric with no
    /// separator pending after it.
    fn ends_in_alnum(&self) -> bool {
        self.pending_space.is_none()
            && self.text.chars().next_back().is_some_and(char::is_alphanumeric)
    }

    fn finish(self) -> IndexedText {
        // Dropping a pending space trims the trailing separator run.
        IndexedText::from_parts(self.text, self.origin, self.origin_end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(s: &str) -> IndexedText {
        normalize(s)
    }

    #[test]
    fn folds_diacritics() {
        assert_eq!(norm("naïve").text(), "naive");
        assert_eq!(norm("Ångström").text(), "angstrom");
    }

    #[test]
    fn expands_ligatures() {
        assert_eq!(norm("e\u{FB03}cient").text(), "efficient");
        assert_eq!(norm("\u{FB01}rst \u{FB02}oor").text(), "first floor");
    }

    #[test]
    fn transliterates_greek() {
        assert_eq!(norm("the α decay").text(), "the alpha decay");
        assert_eq!(norm("Σ x").text(), "sigma x");
    }

    #[test]
    fn folds_math_and_symbol_greek_variants() {
        // Math-alphabet and symbol code points decompose to plain Greek,
        // which must still transliterate.
        assert_eq!(norm("\u{1D6FC} decay").text(), "alpha decay");
        assert_eq!(norm("\u{03D1} bound").text(), "theta bound");
        assert_eq!(norm("\u{03D0} meson").text(), "beta meson");
    }

    #[test]
    fn maps_super_and_subscripts() {
        assert_eq!(norm("x² y₃").text(), "x2 y3");
        assert_eq!(norm("H₂O").text(), "h2o");
    }

    #[test]
    fn collapses_whitespace_and_trims() {
        assert_eq!(norm("  a \t\n b\u{00A0} c  ").text(), "a b c");
        assert_eq!(norm("\n\n").text(), "");
    }

    #[test]
    fn joins_hyphenated_line_breaks() {
        assert_eq!(norm("ver-\nsion").text(), "version");
        assert_eq!(norm("well-known").text(), "wellknown");
        // separator-adjacent hyphens are not joins
        assert_eq!(norm("a - b").text(), "a b");
    }

    #[test]
    fn punctuation_and_math_become_separators() {
        assert_eq!(norm("a+b=c").text(), "a b c");
        assert_eq!(norm("f(x); g[y]").text(), "f x g y");
        assert_eq!(norm("3×4÷2").text(), "3 4 2");
        assert_eq!(norm("“quoted”").text(), "quoted");
    }

    #[test]
    fn drops_soft_hyphens_and_zero_width() {
        assert_eq!(norm("in\u{00AD}ter\u{200B}nal").text(), "internal");
    }

    #[test]
    fn idempotent() {
        let samples = [
            "Naïve ﬁrst-\nclass α² text… with  ODD   spacing!",
            "H₂O + NaCl ≤ 3×10⁴",
            "\u{1D6FC} \u{03D1} \u{03D0} math variants",
            "plain ascii already normal",
            "",
        ];
        for s in samples {
            let once = normalize(s);
            let twice = normalize(once.text());
            assert_eq!(once.text(), twice.text(), "not idempotent for {s:?}");
        }
    }

    #[test]
    fn maps_are_monotone_and_in_range() {
        let raw = "Le cœur naïf — ﬁnalement, 3×4 ans.";
        let idx = norm(raw);
        assert_eq!(idx.origin.len(), idx.len());
        assert!(idx.origin.windows(2).all(|w| w[0] <= w[1]));
        assert!(idx.origin_end.iter().all(|&e| e as usize <= raw.len()));
    }

    #[test]
    fn to_original_recovers_source_spans() {
        let raw = "The ﬁrst step";
        let idx = norm(raw);
        // "first" in normalized space
        let at = idx.find("first").unwrap();
        let orig = idx.to_original(at..at + "first".len());
        assert_eq!(&raw[orig], "ﬁrst");
    }

    #[test]
    fn compact_and_alnum_keep_maps_aligned() {
        let idx = norm("a b, c1 – d");
        let compact = idx.compact();
        assert_eq!(compact.text(), "abc1d");
        compact.debug_assert_well_formed();
        let alnum = idx.alnum();
        assert_eq!(alnum.text(), "abc1d");
        let at = alnum.find("c1").unwrap();
        let orig = alnum.to_original(at..at + 2);
        assert_eq!(orig.len(), 2);
    }

    #[test]
    fn find_from_respects_offset() {
        let idx = norm("one two one two");
        let first = idx.find("one").unwrap();
        assert_eq!(first, 0);
        let second = idx.find_from("one", 1).unwrap();
        assert_eq!(second, 8);
        assert_eq!(idx.find_from("one", 9), None);
    }
}
