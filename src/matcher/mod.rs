//! Single-page fragment matching.
//!
//! The cascade is an ordered list of strategies, each of which
//! either locates the query in one of the haystack's derived forms or
//! passes. Strategies are pure and never panic; a fragment that defeats
//! every strategy simply yields `None`.

pub(crate) mod anchors;
pub(crate) mod ellipsis;
pub(crate) mod stitch;
pub(crate) mod strategies;

use crate::index::page::{Page, TextForm};
use crate::index::types::{EngineConfig, MatchMethod, MatchResult};
use crate::normalize::{IndexedText, normalize};
use std::ops::Range;

/// The three derived forms of one searchable text, borrowed either from a
/// page's caches or from a temporary concatenation.
pub(crate) struct Haystack<'a> {
    pub normalized: &'a IndexedText,
    pub compact: &'a IndexedText,
    pub alnum: &'a IndexedText,
}

impl<'a> Haystack<'a> {
    pub(crate) fn of_page(page: &'a Page) -> Self {
        Self {
            normalized: page.normalized(),
            compact: page.compact(),
            alnum: page.alnum(),
        }
    }
}

/// A fragment with its derived query forms, computed once per fragment
/// and shared across every page it is tried against.
pub(crate) struct FragmentQuery {
    pub norm: IndexedText,
    pub compact_text: String,
    pub alnum_text: String,
    pub word_count: usize,
    /// Normalization changed nothing: a hit is `Exact`, not `Normalized`.
    pub verbatim: bool,
}

impl FragmentQuery {
    pub(crate) fn new(raw: &str) -> Self {
        let norm = normalize(raw);
        let compact_text = norm.compact().text().to_string();
        let alnum_text = norm.alnum().text().to_string();
        let word_count = anchors::word_starts(norm.text()).len();
        let verbatim = raw == norm.text();
        Self {
            norm,
            compact_text,
            alnum_text,
            word_count,
            verbatim,
        }
    }

    pub(crate) fn is_blank(&self) -> bool {
        self.norm.is_empty()
    }
}

/// A span located by one strategy, in the coordinates of the form it was
/// found in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StrategyHit {
    pub form: TextForm,
    pub span: Range<usize>,
    pub method: MatchMethod,
}

pub(crate) trait MatchStrategy: Sync {
    fn try_match(
        &self,
        hay: &Haystack,
        query: &FragmentQuery,
        cfg: &EngineConfig,
    ) -> Option<StrategyHit>;
}

/// The cascade, strongest evidence first. Normalized-form strategies come
/// before compact-form ones, which come before the alnum fallback.
pub(crate) static CASCADE: &[&dyn MatchStrategy] = &[
    &strategies::ExactNormalized,
    &strategies::WordAnchored,
    &strategies::ExactCompact,
    &strategies::CompactBlob,
    &strategies::ExactAlnum,
];

/// Runs the strategy cascade against one haystack.
pub(crate) struct FragmentMatcher<'c> {
    cfg: &'c EngineConfig,
}

impl<'c> FragmentMatcher<'c> {
    pub(crate) fn new(cfg: &'c EngineConfig) -> Self {
        Self { cfg }
    }

    /// First strategy that locates the query wins.
    pub(crate) fn find(&self, hay: &Haystack, query: &FragmentQuery) -> Option<StrategyHit> {
        if query.is_blank() {
            return None;
        }
        CASCADE
            .iter()
            .find_map(|strategy| strategy.try_match(hay, query, self.cfg))
    }

    /// Run the cascade against one page and translate the hit into
    /// original offsets.
    pub(crate) fn find_in_page(&self, page: &Page, query: &FragmentQuery) -> Option<MatchResult> {
        self.find(&Haystack::of_page(page), query)
            .map(|hit| page.result(hit.form, hit.span, hit.method))
    }
}
