//! Anchor candidate construction.
//!
//! A candidate is a prefix or suffix slice of a fragment's normalized
//! text, taken by word count or by character count. Candidates are tried
//! longest first, so the first hit is the most specific one available;
//! anything shorter than the configured minimum is too ambiguous to trust.

/// Word-count ladder for the word-anchored strategy.
pub(crate) const ANCHOR_WORD_LADDER: [usize; 10] = [40, 30, 20, 15, 12, 10, 8, 6, 5, 3];

/// Word-count ladder for ellipsis prefix/suffix anchors (the fragment's
/// full word count is prepended by the caller).
pub(crate) const ELLIPSIS_WORD_LADDER: [usize; 7] = [20, 16, 12, 10, 8, 6, 5];

/// Character-count ladder for ellipsis anchors, tried after the word
/// ladder is exhausted.
pub(crate) const ELLIPSIS_CHAR_LADDER: [usize; 7] = [140, 120, 100, 80, 60, 45, 30];

/// Byte offsets of word starts in normalized text (single-space separated).
pub(crate) fn word_starts(text: &str) -> Vec<usize> {
    if text.is_empty() {
        return Vec::new();
    }
    let mut starts = vec![0];
    for (i, b) in text.bytes().enumerate() {
        if b == b' ' {
            starts.push(i + 1);
        }
    }
    starts
}

/// Prefix slices of `text` covering the ladder's word counts, longest
/// first, deduplicated, each at least `min_chars` characters long.
/// Ladder entries under `min_words` are skipped.
pub(crate) fn word_prefixes<'a>(
    text: &'a str,
    ladder: &[usize],
    min_chars: usize,
    min_words: usize,
) -> Vec<&'a str> {
    let starts = word_starts(text);
    let count = starts.len();
    let mut out: Vec<&str> = Vec::new();
    for &n in ladder {
        let n = n.min(count);
        if n == 0 || n < min_words {
            continue;
        }
        let end = if n == count { text.len() } else { starts[n] - 1 };
        let slice = &text[..end];
        push_candidate(&mut out, slice, min_chars);
    }
    out
}

/// Suffix slices, symmetric to [`word_prefixes`].
pub(crate) fn word_suffixes<'a>(
    text: &'a str,
    ladder: &[usize],
    min_chars: usize,
    min_words: usize,
) -> Vec<&'a str> {
    let starts = word_starts(text);
    let count = starts.len();
    let mut out: Vec<&str> = Vec::new();
    for &n in ladder {
        let n = n.min(count);
        if n == 0 || n < min_words {
            continue;
        }
        let slice = &text[starts[count - n]..];
        push_candidate(&mut out, slice, min_chars);
    }
    out
}

/// The first `len_chars` characters of `text` (all of it when shorter).
pub(crate) fn char_prefix(text: &str, len_chars: usize) -> &str {
    match text.char_indices().nth(len_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// The last `len_chars` characters of `text` (all of it when shorter).
pub(crate) fn char_suffix(text: &str, len_chars: usize) -> &str {
    let total = text.chars().count();
    if total <= len_chars {
        return text;
    }
    let (start, _) = text.char_indices().nth(total - len_chars).unwrap();
    &text[start..]
}

fn push_candidate<'a>(out: &mut Vec<&'a str>, slice: &'a str, min_chars: usize) {
    if slice.chars().count() < min_chars {
        return;
    }
    if out.last() == Some(&slice) {
        return;
    }
    out.push(slice);
}
