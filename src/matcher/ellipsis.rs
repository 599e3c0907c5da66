//! Ellipsis fragment resolution.
//!
//! A fragment like `"the quick brown fox ... ran away"` elides interior
//! text, often across a page break, so it can never match as one span.
//! The resolver anchors the first and last segments independently and
//! emits one result per page the resolved span touches.

use crate::index::document::DocumentIndex;
use crate::index::page::Page;
use crate::index::types::{EngineConfig, MatchMethod, MatchResult};
use crate::matcher::anchors::{self, ELLIPSIS_CHAR_LADDER, ELLIPSIS_WORD_LADDER};
use crate::normalize::{IndexedText, normalize};
use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

/// Matches `...` (three or more dots) and `…` (optionally dot-suffixed).
fn marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\.{3,}|…\.?").expect("static pattern"))
}

pub(crate) fn is_ellipsis_fragment(raw: &str) -> bool {
    marker_regex().is_match(raw)
}

/// First and last non-blank segments around the markers. `None` when the
/// fragment has no marker or fewer than two usable segments.
pub(crate) fn split_segments(raw: &str) -> Option<(&str, &str)> {
    if !is_ellipsis_fragment(raw) {
        return None;
    }
    let segments: Vec<&str> = marker_regex()
        .split(raw)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if segments.len() < 2 {
        return None;
    }
    Some((segments[0], segments[segments.len() - 1]))
}

/// One anchor candidate in both searchable spellings.
struct Anchor<'a> {
    norm: &'a str,
    compact: String,
}

impl Anchor<'_> {
    /// Search one page, normalized form first, compact second, returning
    /// original offsets of the hit at or after `min_orig_start`.
    fn find_on_page(&self, page: &Page, min_orig_start: usize) -> Option<Range<usize>> {
        find_original(page.normalized(), self.norm, min_orig_start)
            .or_else(|| find_original(page.compact(), &self.compact, min_orig_start))
    }
}

/// First occurrence of `needle` in `idx` whose ORIGINAL start offset is at
/// or after `min_orig_start`. Scanning in original space keeps ordering
/// comparable across the normalized and compact forms.
fn find_original(idx: &IndexedText, needle: &str, min_orig_start: usize) -> Option<Range<usize>> {
    if needle.is_empty() {
        return None;
    }
    let mut from = 0;
    while let Some(p) = idx.find_from(needle, from) {
        let orig = idx.to_original(p..p + needle.len());
        if orig.start >= min_orig_start {
            return Some(orig);
        }
        from = p + 1;
    }
    None
}

/// Anchor candidates for one side: the word ladder (full word count
/// prepended, short entries dropped) followed by the character ladder.
fn side_anchors<'a>(text: &'a str, cfg: &EngineConfig, suffix: bool) -> Vec<Anchor<'a>> {
    let word_count = anchors::word_starts(text).len();
    let mut ladder = Vec::with_capacity(ELLIPSIS_WORD_LADDER.len() + 1);
    ladder.push(word_count);
    ladder.extend_from_slice(&ELLIPSIS_WORD_LADDER);

    let mut slices = if suffix {
        anchors::word_suffixes(text, &ladder, cfg.min_anchor_chars, cfg.min_anchor_words)
    } else {
        anchors::word_prefixes(text, &ladder, cfg.min_anchor_chars, cfg.min_anchor_words)
    };
    for &len in &ELLIPSIS_CHAR_LADDER {
        let slice = if suffix {
            anchors::char_suffix(text, len)
        } else {
            anchors::char_prefix(text, len)
        };
        if slice.chars().count() >= cfg.min_anchor_chars && !slices.contains(&slice) {
            slices.push(slice);
        }
    }
    slices
        .into_iter()
        .map(|s| Anchor {
            norm: s,
            compact: s.replace(' ', ""),
        })
        .collect()
}

/// A resolved prefix/suffix pairing, in page indices and per-page
/// original offsets.
#[derive(Debug, PartialEq, Eq)]
struct ResolvedSpan {
    start_page: usize,
    start: usize,
    end_page: usize,
    end: usize,
}

/// Resolve an ellipsis fragment against the document. Returns no results
/// when no ordered prefix/suffix pairing exists anywhere.
pub(crate) fn resolve(doc: &DocumentIndex, fragment: &str) -> Vec<MatchResult> {
    let cfg = doc.config();
    let Some((prefix, suffix)) = split_segments(fragment) else {
        return Vec::new();
    };
    let prefix_norm = normalize(prefix);
    let suffix_norm = normalize(suffix);
    let prefix_anchors = side_anchors(prefix_norm.text(), cfg, false);
    let suffix_anchors = side_anchors(suffix_norm.text(), cfg, true);
    if prefix_anchors.is_empty() || suffix_anchors.is_empty() {
        return Vec::new();
    }

    match phase_a(doc, &prefix_anchors, &suffix_anchors, cfg)
        .or_else(|| phase_b(doc, &prefix_anchors, &suffix_anchors))
    {
        Some(span) => emit(doc, &span, cfg),
        None => Vec::new(),
    }
}

/// Greedy per-page scan: anchor the prefix on the first page that has it,
/// then scan up to `ellipsis_page_lookahead` pages ahead for a suffix
/// ordered after it. Scanning pages in ascending order makes the first
/// pairing the smallest-page-distance one.
fn phase_a(
    doc: &DocumentIndex,
    prefix_anchors: &[Anchor],
    suffix_anchors: &[Anchor],
    cfg: &EngineConfig,
) -> Option<ResolvedSpan> {
    let pages = doc.pages();
    let (prefix_page, prefix_orig) = pages.iter().enumerate().find_map(|(i, page)| {
        prefix_anchors
            .iter()
            .find_map(|anchor| anchor.find_on_page(page, 0))
            .map(|orig| (i, orig))
    })?;

    let last = (prefix_page + cfg.ellipsis_page_lookahead as usize).min(pages.len() - 1);
    for j in prefix_page..=last {
        let min_start = if j == prefix_page { prefix_orig.end } else { 0 };
        for anchor in suffix_anchors {
            if let Some(suffix_orig) = anchor.find_on_page(&pages[j], min_start) {
                return Some(ResolvedSpan {
                    start_page: prefix_page,
                    start: prefix_orig.start,
                    end_page: j,
                    end: suffix_orig.end,
                });
            }
        }
    }
    None
}

/// Whole-document index for the global fallback: every page's normalized
/// text joined by single separator spaces, mapped into a virtual
/// concatenation of the original page texts. Each separator maps to the
/// zero-width boundary point between its pages, so original offsets stay
/// unambiguous.
struct GlobalIndex {
    norm: IndexedText,
    compact: IndexedText,
    /// Virtual original-offset range of each page.
    page_ranges: Vec<Range<usize>>,
}

fn build_global(doc: &DocumentIndex) -> GlobalIndex {
    let mut text = String::new();
    let mut origin = Vec::new();
    let mut origin_end = Vec::new();
    let mut page_ranges = Vec::with_capacity(doc.page_count());
    let mut cursor = 0u32;
    for page in doc.pages() {
        let norm = page.normalized();
        if !text.is_empty() && !norm.is_empty() {
            text.push(' ');
            origin.push(cursor);
            origin_end.push(cursor);
        }
        text.push_str(norm.text());
        origin.extend(norm.origin.iter().map(|&v| v + cursor));
        origin_end.extend(norm.origin_end.iter().map(|&v| v + cursor));
        let start = cursor as usize;
        cursor += page.raw().len() as u32;
        page_ranges.push(start..cursor as usize);
    }
    let norm = IndexedText::from_parts(text, origin, origin_end);
    let compact = norm.compact();
    GlobalIndex {
        norm,
        compact,
        page_ranges,
    }
}

/// Global fallback: catches anchors that themselves straddle a page
/// boundary, which the per-page scan can never see.
fn phase_b(
    doc: &DocumentIndex,
    prefix_anchors: &[Anchor],
    suffix_anchors: &[Anchor],
) -> Option<ResolvedSpan> {
    let global = build_global(doc);
    let prefix_virt = prefix_anchors.iter().find_map(|anchor| {
        find_original(&global.norm, anchor.norm, 0)
            .or_else(|| find_original(&global.compact, &anchor.compact, 0))
    })?;
    let suffix_virt = suffix_anchors.iter().find_map(|anchor| {
        find_original(&global.norm, anchor.norm, prefix_virt.end)
            .or_else(|| find_original(&global.compact, &anchor.compact, prefix_virt.end))
    })?;

    let start_page = page_index_of(&global.page_ranges, prefix_virt.start)?;
    let end_page = page_index_of(&global.page_ranges, suffix_virt.end.checked_sub(1)?)?;
    Some(ResolvedSpan {
        start_page,
        start: prefix_virt.start - global.page_ranges[start_page].start,
        end_page,
        end: suffix_virt.end - global.page_ranges[end_page].start,
    })
}

fn page_index_of(ranges: &[Range<usize>], virt: usize) -> Option<usize> {
    ranges.iter().position(|r| r.contains(&virt))
}

/// Emit one result per touched page: the tail of the start page, whole
/// middle pages, the head of the end page. Oversized segments are chunked
/// so a consumer can apply them incrementally.
fn emit(doc: &DocumentIndex, span: &ResolvedSpan, cfg: &EngineConfig) -> Vec<MatchResult> {
    let pages = doc.pages();
    let mut out = Vec::new();
    for k in span.start_page..=span.end_page {
        let page = &pages[k];
        let start = if k == span.start_page { span.start } else { 0 };
        let end = if k == span.end_page {
            span.end
        } else {
            page.raw().len()
        };
        if start >= end {
            continue;
        }
        emit_chunks(page, start..end, cfg, &mut out);
    }
    out
}

fn emit_chunks(page: &Page, span: Range<usize>, cfg: &EngineConfig, out: &mut Vec<MatchResult>) {
    let text = &page.raw()[span.clone()];
    let total_chars = text.chars().count();
    if total_chars <= cfg.chunk_size {
        out.push(page.result_original(span, MatchMethod::EllipsisSpan));
        return;
    }
    // Byte offset of every char boundary, including the end.
    let boundaries: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain([text.len()])
        .collect();
    let mut start_char = 0;
    loop {
        let end_char = (start_char + cfg.chunk_size).min(total_chars);
        let chunk = span.start + boundaries[start_char]..span.start + boundaries[end_char];
        out.push(page.result_original(chunk, MatchMethod::EllipsisSpan));
        if end_char == total_chars {
            break;
        }
        start_char = end_char - cfg.chunk_overlap;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_marker_spellings() {
        assert!(is_ellipsis_fragment("a ... b"));
        assert!(is_ellipsis_fragment("a … b"));
        assert!(is_ellipsis_fragment("a …. b"));
        assert!(is_ellipsis_fragment("a ....... b"));
        assert!(!is_ellipsis_fragment("a .. b"));
        assert!(!is_ellipsis_fragment("plain text"));
    }

    #[test]
    fn split_uses_first_and_last_segments() {
        assert_eq!(
            split_segments("start here ... middle part ... end there"),
            Some(("start here", "end there"))
        );
        assert_eq!(split_segments("lonely ..."), None);
        assert_eq!(split_segments("no marker"), None);
    }

    #[test]
    fn resolves_span_across_a_page_break() {
        let doc = DocumentIndex::new([
            "Some earlier sentence appears first. Then the quick brown fox jumps over the lazy dog",
            "and then ran away into the forest. More follows afterwards.",
        ]);
        let results = resolve(&doc, "the quick brown fox ... ran away into the forest");
        assert_eq!(results.len(), 2);

        let first = &results[0];
        assert_eq!(first.page, 1);
        assert!(first.matched_text.starts_with("the quick brown fox"));
        assert_eq!(first.end, doc.page(1).unwrap().raw().len());
        assert_eq!(first.method, MatchMethod::EllipsisSpan);

        let second = &results[1];
        assert_eq!(second.page, 2);
        assert_eq!(second.start, 0);
        assert!(second.matched_text.ends_with("ran away into the forest"));
        assert_eq!(second.method, MatchMethod::EllipsisSpan);
    }

    #[test]
    fn same_page_pairing_stays_on_one_page() {
        let doc = DocumentIndex::new([
            "the opening statement of the theorem holds while the closing remark concludes it",
        ]);
        let results = resolve(&doc, "the opening statement ... the closing remark concludes it");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].page, 1);
        assert!(results[0].matched_text.starts_with("the opening statement"));
        assert!(results[0].matched_text.ends_with("concludes it"));
    }

    #[test]
    fn unordered_pairing_yields_nothing() {
        // Suffix text only occurs BEFORE the prefix text.
        let doc = DocumentIndex::new([
            "the closing remark concludes it and later the opening statement of the theorem",
        ]);
        let results = resolve(&doc, "the opening statement of the theorem ... closing remark text absent");
        assert!(results.is_empty());
    }

    #[test]
    fn global_fallback_finds_anchors_straddling_pages() {
        // The prefix anchor itself is split across the boundary, so no
        // single page contains it.
        let doc = DocumentIndex::new([
            "intro words here. alpha beta gamma",
            "delta epsilon zeta continues until the final conclusion statement appears",
        ]);
        let results = resolve(
            &doc,
            "alpha beta gamma delta epsilon zeta ... the final conclusion statement appears",
        );
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].page, 1);
        assert!(results[0].matched_text.starts_with("alpha beta gamma"));
        assert_eq!(results[1].page, 2);
        assert!(
            results[1]
                .matched_text
                .ends_with("the final conclusion statement appears")
        );
    }

    #[test]
    fn oversized_segments_are_chunked_with_overlap() {
        let filler = "lorem ipsum dolor sit amet consectetur adipiscing elit ".repeat(80);
        let text = format!("unique opening marker here {filler} unique closing marker here");
        let mut config = EngineConfig::default();
        config.chunk_size = 1000;
        config.chunk_overlap = 30;
        let doc = DocumentIndex::with_config([text], config);

        let results = resolve(&doc, "unique opening marker here ... unique closing marker here");
        assert!(results.len() > 1, "expected chunked output");
        for pair in results.windows(2) {
            // Consecutive chunks overlap by the configured amount.
            assert_eq!(pair[0].end - pair[1].start, 30);
        }
        assert!(results[0].matched_text.starts_with("unique opening marker"));
        assert!(
            results
                .last()
                .unwrap()
                .matched_text
                .ends_with("unique closing marker here")
        );
    }
}
