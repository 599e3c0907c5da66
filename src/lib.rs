//! # fragmatch - fragment-to-document text anchoring
//!
//! fragmatch locates approximately-quoted text fragments in the per-page
//! plain text extracted from a document (typically a PDF), tolerating the
//! usual extraction noise: ligatures, hyphenated line breaks, diacritics,
//! math symbols, collapsed or exploded whitespace, and sentences split
//! across page boundaries.
//!
//! ## Architecture
//!
//! - [`normalize`] - canonical text forms with position maps back to the
//!   original offsets
//! - [`index`] - per-page cached indices ([`DocumentIndex`], [`Page`])
//! - [`matcher`] - the strategy cascade, cross-page stitching, and
//!   ellipsis span resolution
//! - [`engine`] - the public orchestrator ([`AnchorEngine`])
//!
//! ## Quick start
//!
//! ```
//! use fragmatch::{AnchorEngine, DocumentIndex};
//!
//! let doc = DocumentIndex::new([
//!     "The quick brown fox jumps over the lazy dog.",
//!     "It then ran away into the forest.",
//! ]);
//! let engine = AnchorEngine::new(&doc);
//! let groups = engine.match_all(&["quick brown fox", "ran away into the forest"]);
//!
//! assert_eq!(groups[0][0].page, 1);
//! assert_eq!(groups[1][0].page, 2);
//! ```
//!
//! All offsets in a [`MatchResult`] are byte offsets into the original
//! page text, half-open, so the rendering layer can slice the raw page
//! directly. A fragment that cannot be located yields an empty group,
//! never an error.

pub mod engine;
pub mod index;
pub mod matcher;
pub mod normalize;

pub use engine::AnchorEngine;
pub use index::{DocumentIndex, EngineConfig, MatchMethod, MatchResult, Page, PageNumber};
pub use normalize::{IndexedText, normalize};

/// One-shot convenience: build a [`DocumentIndex`] and match a batch of
/// fragments against it. Prefer holding the index when running several
/// batches against the same document.
pub fn match_all<P, S>(pages: impl IntoIterator<Item = P>, fragments: &[S]) -> Vec<Vec<MatchResult>>
where
    P: Into<String>,
    S: AsRef<str>,
{
    let doc = DocumentIndex::new(pages);
    AnchorEngine::new(&doc).match_all(fragments)
}
