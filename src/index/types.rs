use serde::{Deserialize, Serialize};

/// 1-based page number, matching the page order handed in by the
/// extraction layer.
pub type PageNumber = u32;

/// How a span was located, from strongest to weakest evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMethod {
    /// Fragment found verbatim (normalization changed nothing).
    Exact,
    /// Fragment found as a literal substring of the normalized page.
    Normalized,
    /// Located via word-ladder prefix/suffix anchors.
    Anchored,
    /// Located on the space-stripped form of the page.
    Compact,
    /// One segment of a resolved ellipsis fragment.
    EllipsisSpan,
    /// One side of a match straddling a page boundary.
    CrossPage,
}

/// A located span of a fragment, in ORIGINAL page-text byte offsets
/// (half-open). This is the only thing the rendering layer consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub page: PageNumber,
    pub start: usize,
    pub end: usize,
    /// The original text covered by `start..end`, as extracted.
    pub matched_text: String,
    pub method: MatchMethod,
}

/// Tunables for the matching cascade. The defaults are the values the
/// engine was calibrated with; they rarely need changing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Anchor pairings producing spans longer than this (normalized bytes)
    /// are rejected outright.
    pub max_anchored_span: usize,
    /// Minimum normalized length before the cross-page stitcher is tried.
    pub cross_page_min_len: usize,
    /// Minimum compact length for the compact-blob strategy.
    pub compact_blob_min_len: usize,
    /// Anchor candidates shorter than this many normalized characters are
    /// too ambiguous to use.
    pub min_anchor_chars: usize,
    /// Minimum word count for ellipsis word-ladder candidates.
    pub min_anchor_words: usize,
    /// How many pages past the prefix page the ellipsis resolver scans
    /// for a suffix anchor.
    pub ellipsis_page_lookahead: u32,
    /// Maximum size (original characters) of one emitted ellipsis segment;
    /// larger segments are chunked.
    pub chunk_size: usize,
    /// Overlap (original characters) between consecutive chunks.
    pub chunk_overlap: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_anchored_span: 20_000,
            cross_page_min_len: 120,
            compact_blob_min_len: 20,
            min_anchor_chars: 12,
            min_anchor_words: 5,
            ellipsis_page_lookahead: 10,
            chunk_size: 3_500,
            chunk_overlap: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&MatchMethod::EllipsisSpan).unwrap(),
            "\"ellipsis-span\""
        );
        assert_eq!(
            serde_json::to_string(&MatchMethod::CrossPage).unwrap(),
            "\"cross-page\""
        );
    }

    #[test]
    fn result_round_trips_through_json() {
        let result = MatchResult {
            page: 3,
            start: 10,
            end: 42,
            matched_text: "some original text".to_string(),
            method: MatchMethod::Anchored,
        };
        let json = serde_json::to_string(&result).unwrap();
        let back: MatchResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
