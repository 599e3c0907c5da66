//! Cross-page stitching for long fragments that silently straddle a page
//! boundary.
//!
//! The extraction layer splits a sentence mid-word when it crosses pages,
//! so the single-page cascade fails on both halves. Stitching re-runs the
//! cascade over the concatenation of each adjacent page pair, and when the
//! winning span strictly straddles the boundary it re-anchors each half
//! independently against its own page. Both halves must re-anchor or the
//! boundary attempt is discarded.

use crate::index::document::DocumentIndex;
use crate::index::page::{Page, TextForm};
use crate::index::types::{MatchMethod, MatchResult};
use crate::matcher::{FragmentMatcher, FragmentQuery, Haystack};
use crate::normalize::IndexedText;

/// Try every adjacent page boundary in document order; first one where
/// both halves re-anchor wins.
pub(crate) fn resolve(
    doc: &DocumentIndex,
    query: &FragmentQuery,
    matcher: &FragmentMatcher,
) -> Option<(MatchResult, MatchResult)> {
    doc.pages()
        .windows(2)
        .find_map(|pair| try_boundary(&pair[0], &pair[1], query, matcher))
}

/// Attempt a stitch across the boundary between pages `a` and `b`.
pub(crate) fn try_boundary(
    a: &Page,
    b: &Page,
    query: &FragmentQuery,
    matcher: &FragmentMatcher,
) -> Option<(MatchResult, MatchResult)> {
    if a.normalized().is_empty() || b.normalized().is_empty() {
        return None;
    }
    let shift = a.raw().len() as u32;
    let normalized = IndexedText::concat_shifted(a.normalized(), b.normalized(), shift, true);
    let compact = IndexedText::concat_shifted(a.compact(), b.compact(), shift, false);
    let alnum = IndexedText::concat_shifted(a.alnum(), b.alnum(), shift, false);
    let hay = Haystack {
        normalized: &normalized,
        compact: &compact,
        alnum: &alnum,
    };

    let hit = matcher.find(&hay, query)?;
    // Boundary position and separator width in the coordinates of the
    // form the hit came from.
    let (boundary, sep) = match hit.form {
        TextForm::Normalized => (a.normalized().len(), 1),
        TextForm::Compact => (a.compact().len(), 0),
        TextForm::Alnum => (a.alnum().len(), 0),
    };
    if hit.span.start >= boundary || hit.span.end <= boundary + sep {
        // Entirely on one page; a plain per-page scan already covers it.
        return None;
    }

    let left = a.form(hit.form).to_original(hit.span.start..boundary);
    let right_start = hit.span.start.max(boundary + sep) - boundary - sep;
    let right_end = hit.span.end - boundary - sep;
    let right = b.form(hit.form).to_original(right_start..right_end);

    let part_a = a.raw()[left].trim();
    let part_b = b.raw()[right].trim();

    // Re-anchor each half against its own page rather than trusting the
    // raw split offsets.
    let query_a = FragmentQuery::new(part_a);
    let query_b = FragmentQuery::new(part_b);
    let mut result_a = matcher.find_in_page(a, &query_a)?;
    let mut result_b = matcher.find_in_page(b, &query_b)?;
    result_a.method = MatchMethod::CrossPage;
    result_b.method = MatchMethod::CrossPage;
    Some((result_a, result_b))
}
