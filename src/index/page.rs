use crate::index::types::{MatchMethod, MatchResult, PageNumber};
use crate::normalize::{IndexedText, normalize};
use std::ops::Range;
use std::sync::OnceLock;

/// Which derived form of a page's text a hit was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextForm {
    Normalized,
    Compact,
    Alnum,
}

/// One page of extracted document text plus its lazily built derived
/// indices.
///
/// The indices are built on first access and cached for the lifetime of
/// the page; `OnceLock` serializes a concurrent first build, and the
/// cached values are immutable afterwards, so concurrent readers need no
/// further locking.
#[derive(Debug)]
pub struct Page {
    number: PageNumber,
    raw: String,
    normalized: OnceLock<IndexedText>,
    compact: OnceLock<IndexedText>,
    alnum: OnceLock<IndexedText>,
}

impl Page {
    pub fn new(number: PageNumber, raw: impl Into<String>) -> Self {
        Self {
            number,
            raw: raw.into(),
            normalized: OnceLock::new(),
            compact: OnceLock::new(),
            alnum: OnceLock::new(),
        }
    }

    /// 1-based page number.
    pub fn number(&self) -> PageNumber {
        self.number
    }

    /// The page text exactly as extracted.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized form with position map; built on first access.
    pub fn normalized(&self) -> &IndexedText {
        self.normalized.get_or_init(|| normalize(&self.raw))
    }

    /// Space-stripped form, derived from the normalized index.
    pub fn compact(&self) -> &IndexedText {
        self.compact.get_or_init(|| self.normalized().compact())
    }

    /// `[a-z0-9]`-only form, derived from the normalized index.
    pub fn alnum(&self) -> &IndexedText {
        self.alnum.get_or_init(|| self.normalized().alnum())
    }

    pub fn form(&self, form: TextForm) -> &IndexedText {
        match form {
            TextForm::Normalized => self.normalized(),
            TextForm::Compact => self.compact(),
            TextForm::Alnum => self.alnum(),
        }
    }

    /// Build all three indices now instead of on first use.
    pub fn warm(&self) {
        self.alnum();
        self.compact();
    }

    /// Turn a span found in one of this page's derived forms into a
    /// [`MatchResult`] carrying original offsets and text.
    pub(crate) fn result(
        &self,
        form: TextForm,
        span: Range<usize>,
        method: MatchMethod,
    ) -> MatchResult {
        let orig = self.form(form).to_original(span);
        self.result_original(orig, method)
    }

    /// As [`Page::result`], for a span already in original offsets.
    pub(crate) fn result_original(&self, span: Range<usize>, method: MatchMethod) -> MatchResult {
        debug_assert!(span.end <= self.raw.len());
        MatchResult {
            page: self.number,
            start: span.start,
            end: span.end,
            matched_text: self.raw[span.clone()].to_string(),
            method,
        }
    }
}
