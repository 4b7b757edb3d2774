//! Boundary-aware substring spans

use crate::boundary::{is_word_char, skip_boundary_check};
use memchr::memmem;

/// One match occurrence: inclusive byte offsets into the scanned text
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MatchSpan {
    /// Offset of the first matched byte
    pub start: usize,

    /// Offset of the last matched byte
    pub end: usize,
}

impl MatchSpan {
    /// Create a span from inclusive offsets
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of bytes covered
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Spans always cover at least one byte
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether two spans share at least one byte
    pub fn overlaps(&self, other: &MatchSpan) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

/// Every occurrence of `needle` in `text`
///
/// Matching is exact and case-sensitive; callers lowercase both sides. A
/// hit is kept only when the characters on either side are not word
/// characters, unless the needle's script skips boundary checks. Kept hits
/// do not overlap each other.
pub fn collect_match_spans(text: &str, needle: &str) -> Vec<MatchSpan> {
    let hay = text.as_bytes();
    let pattern = needle.as_bytes();
    if pattern.is_empty() || pattern.len() > hay.len() {
        return Vec::new();
    }

    let check_boundaries = !skip_boundary_check(needle);
    let finder = memmem::Finder::new(pattern);
    let mut spans = Vec::new();
    let mut pos = 0;

    while let Some(offset) = finder.find(&hay[pos..]) {
        let start = pos + offset;
        let end = start + pattern.len() - 1;

        if check_boundaries && !is_standalone(hay, start, end) {
            pos = start + 1;
            continue;
        }

        spans.push(MatchSpan::new(start, end));
        pos = end + 1;
        if pos >= hay.len() {
            break;
        }
    }

    spans
}

fn is_standalone(hay: &[u8], start: usize, end: usize) -> bool {
    let clear_before = start == 0 || !is_word_char(hay, start - 1, true);
    let clear_after = end + 1 >= hay.len() || !is_word_char(hay, end + 1, false);
    clear_before && clear_after
}

/// Collapse overlapping and adjacent spans into disjoint ones
///
/// Spans are sorted by start and swept left to right; a span that shares a
/// byte with the current run, or starts right after it, extends it. The
/// result has at least one byte of gap between consecutive spans.
pub fn merge_spans(mut spans: Vec<MatchSpan>) -> Vec<MatchSpan> {
    spans.sort_unstable();
    let mut merged: Vec<MatchSpan> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(current) if span.start <= current.end.saturating_add(1) => {
                current.end = current.end.max(span.end);
            }
            _ => merged.push(span),
        }
    }
    merged
}
