//! The strategies of the matching cascade.

use crate::index::page::TextForm;
use crate::index::types::{EngineConfig, MatchMethod};
use crate::matcher::anchors::{self, ANCHOR_WORD_LADDER};
use crate::matcher::{FragmentQuery, Haystack, MatchStrategy, StrategyHit};

/// Literal substring of the normalized haystack.
pub(crate) struct ExactNormalized;

impl MatchStrategy for ExactNormalized {
    fn try_match(
        &self,
        hay: &Haystack,
        query: &FragmentQuery,
        _cfg: &EngineConfig,
    ) -> Option<StrategyHit> {
        let needle = query.norm.text();
        let start = hay.normalized.find(needle)?;
        let method = if query.verbatim {
            MatchMethod::Exact
        } else {
            MatchMethod::Normalized
        };
        Some(StrategyHit {
            form: TextForm::Normalized,
            span: start..start + needle.len(),
            method,
        })
    }
}

/// Prefix/suffix anchor pairing over the word ladder. Needs at least
/// three words to have distinct anchors worth pairing.
pub(crate) struct WordAnchored;

impl MatchStrategy for WordAnchored {
    fn try_match(
        &self,
        hay: &Haystack,
        query: &FragmentQuery,
        cfg: &EngineConfig,
    ) -> Option<StrategyHit> {
        if query.word_count < 3 {
            return None;
        }
        let text = query.norm.text();
        let prefixes = anchors::word_prefixes(text, &ANCHOR_WORD_LADDER, cfg.min_anchor_chars, 1);
        let suffixes = anchors::word_suffixes(text, &ANCHOR_WORD_LADDER, cfg.min_anchor_chars, 1);

        // Tightest span wins; ties break on earliest start.
        let mut best: Option<std::ops::Range<usize>> = None;
        for prefix in &prefixes {
            let Some(p) = hay.normalized.find(prefix) else {
                continue;
            };
            for suffix in &suffixes {
                let Some(s) = hay.normalized.find_from(suffix, p + prefix.len()) else {
                    continue;
                };
                let span = p..s + suffix.len();
                if span.len() > cfg.max_anchored_span {
                    continue;
                }
                let better = match &best {
                    None => true,
                    Some(b) => {
                        span.len() < b.len() || (span.len() == b.len() && span.start < b.start)
                    }
                };
                if better {
                    best = Some(span);
                }
            }
        }
        best.map(|span| StrategyHit {
            form: TextForm::Normalized,
            span,
            method: MatchMethod::Anchored,
        })
    }
}

/// Literal substring of the space-stripped haystack. Catches fragments
/// whose word boundaries were mangled by extraction.
pub(crate) struct ExactCompact;

impl MatchStrategy for ExactCompact {
    fn try_match(
        &self,
        hay: &Haystack,
        query: &FragmentQuery,
        _cfg: &EngineConfig,
    ) -> Option<StrategyHit> {
        if query.compact_text.is_empty() {
            return None;
        }
        let start = hay.compact.find(&query.compact_text)?;
        Some(StrategyHit {
            form: TextForm::Compact,
            span: start..start + query.compact_text.len(),
            method: MatchMethod::Compact,
        })
    }
}

/// Short queries without enough words for anchoring: bound the span with
/// literal prefix/suffix slices of the compact text.
pub(crate) struct CompactBlob;

impl MatchStrategy for CompactBlob {
    fn try_match(
        &self,
        hay: &Haystack,
        query: &FragmentQuery,
        cfg: &EngineConfig,
    ) -> Option<StrategyHit> {
        if query.word_count >= 3 {
            return None;
        }
        let compact = query.compact_text.as_str();
        let len = compact.chars().count();
        if len < cfg.compact_blob_min_len {
            return None;
        }
        let anchor_len = (len / 3).clamp(10, 25);
        let prefix = anchors::char_prefix(compact, anchor_len);
        let suffix = anchors::char_suffix(compact, anchor_len);

        let p = hay.compact.find(prefix)?;
        let s = hay.compact.find_from(suffix, p + prefix.len())?;
        Some(StrategyHit {
            form: TextForm::Compact,
            span: p..s + suffix.len(),
            method: MatchMethod::Compact,
        })
    }
}

/// Last resort: literal substring of the `[a-z0-9]`-only haystack.
pub(crate) struct ExactAlnum;

impl MatchStrategy for ExactAlnum {
    fn try_match(
        &self,
        hay: &Haystack,
        query: &FragmentQuery,
        _cfg: &EngineConfig,
    ) -> Option<StrategyHit> {
        if query.alnum_text.is_empty() {
            return None;
        }
        let start = hay.alnum.find(&query.alnum_text)?;
        Some(StrategyHit {
            form: TextForm::Alnum,
            span: start..start + query.alnum_text.len(),
            method: MatchMethod::Compact,
        })
    }
}
