//! The public matching orchestrator.

use crate::index::document::DocumentIndex;
use crate::index::types::MatchResult;
use crate::matcher::{FragmentMatcher, FragmentQuery, ellipsis, stitch};
use ahash::AHashSet;
use rayon::prelude::*;

/// Runs fragments against a [`DocumentIndex`], applying the strategy
/// cascade per page and falling back to the ellipsis resolver or the
/// cross-page stitcher as each fragment calls for.
///
/// Fragments are independent: no strategy ever errors, a fragment that
/// cannot be located simply yields an empty group, and results do not
/// depend on the order fragments are processed in.
pub struct AnchorEngine<'a> {
    doc: &'a DocumentIndex,
}

impl<'a> AnchorEngine<'a> {
    pub fn new(doc: &'a DocumentIndex) -> Self {
        Self { doc }
    }

    /// Locate every fragment; one result group per fragment, in input
    /// order, possibly empty.
    pub fn match_all<S: AsRef<str>>(&self, fragments: &[S]) -> Vec<Vec<MatchResult>> {
        fragments
            .iter()
            .map(|f| self.match_fragment(f.as_ref()))
            .collect()
    }

    /// As [`AnchorEngine::match_all`], with fragments fanned out over the
    /// rayon pool. Page indices are warmed first so the per-page
    /// build-once guards don't serialize the workers; output is identical
    /// to the sequential path.
    pub fn match_all_parallel<S: AsRef<str> + Sync>(&self, fragments: &[S]) -> Vec<Vec<MatchResult>> {
        self.doc.warm();
        fragments
            .par_iter()
            .map(|f| self.match_fragment(f.as_ref()))
            .collect()
    }

    /// Locate a single fragment. Blank fragments yield no results, as do
    /// fragments defeated by every strategy; neither is an error.
    pub fn match_fragment(&self, fragment: &str) -> Vec<MatchResult> {
        let cfg = self.doc.config();
        let query = FragmentQuery::new(fragment);
        if query.is_blank() {
            return Vec::new();
        }
        let matcher = FragmentMatcher::new(cfg);
        let is_ellipsis = ellipsis::is_ellipsis_fragment(fragment);

        let mut results = Vec::new();
        for page in self.doc.pages() {
            if let Some(result) = matcher.find_in_page(page, &query) {
                results.push(result);
                if !is_ellipsis {
                    // Non-ellipsis fragments stop at the first page hit.
                    return results;
                }
            }
        }

        if is_ellipsis {
            results.extend(ellipsis::resolve(self.doc, fragment));
            let mut seen = AHashSet::new();
            results.retain(|r| seen.insert((r.page, r.start, r.end)));
            results.sort_by_key(|r| (r.page, r.start, r.end));
            return results;
        }

        if results.is_empty() && query.norm.char_count() > cfg.cross_page_min_len {
            if let Some((left, right)) = stitch::resolve(self.doc, &query, &matcher) {
                return vec![left, right];
            }
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::types::MatchMethod;

    fn doc() -> DocumentIndex {
        DocumentIndex::new([
            "The committee convened in March. Results were inconclusive at best.",
            "A second meeting produced the final report on schedule.",
        ])
    }

    #[test]
    fn blank_fragments_yield_no_results() {
        let doc = doc();
        let engine = AnchorEngine::new(&doc);
        assert!(engine.match_fragment("").is_empty());
        assert!(engine.match_fragment("   \t\n").is_empty());
        assert!(engine.match_fragment("?!...").is_empty());
    }

    #[test]
    fn first_page_hit_wins_for_plain_fragments() {
        let doc = DocumentIndex::new(["shared phrase here", "shared phrase here too"]);
        let engine = AnchorEngine::new(&doc);
        let results = engine.match_fragment("shared phrase here");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].page, 1);
        assert_eq!(results[0].method, MatchMethod::Exact);
    }

    #[test]
    fn unmatched_fragment_is_an_empty_group_not_an_error() {
        let doc = doc();
        let engine = AnchorEngine::new(&doc);
        let results = engine.match_all(&["entirely unrelated sentence about volcanoes"]);
        assert_eq!(results.len(), 1);
        assert!(results[0].is_empty());
    }

    #[test]
    fn groups_come_back_in_input_order() {
        let doc = doc();
        let engine = AnchorEngine::new(&doc);
        let results = engine.match_all(&[
            "the final report",
            "no such text anywhere",
            "convened in March",
        ]);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0][0].page, 2);
        assert!(results[1].is_empty());
        assert_eq!(results[2][0].page, 1);
    }

    #[test]
    fn parallel_matches_sequential() {
        let doc = doc();
        let engine = AnchorEngine::new(&doc);
        let fragments = [
            "the committee convened",
            "final report",
            "missing entirely",
            "results were inconclusive ... the final report",
        ];
        assert_eq!(
            engine.match_all(&fragments),
            engine.match_all_parallel(&fragments)
        );
    }
}
