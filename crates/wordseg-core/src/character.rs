// Codepoint helpers over UTF-8 byte offsets
//
// The segmentation graph is indexed by byte offset, but fallback edges and
// run statistics work in codepoints. These helpers bridge the two.

/// Byte width of the codepoint starting at `offset` in `text`.
///
/// Returns 0 when `offset` is at or past the end of the text. `offset` must
/// lie on a character boundary; otherwise the width of the next boundary-
/// aligned step (1 byte) is returned so callers always make progress.
pub fn codepoint_width(text: &str, offset: usize) -> usize {
    if offset >= text.len() {
        return 0;
    }
    match text.get(offset..).and_then(|rest| rest.chars().next()) {
        Some(c) => c.len_utf8(),
        None => 1,
    }
}

/// Number of codepoints in `text[start..end]`.
///
/// Both offsets must be character boundaries.
pub fn codepoint_count(text: &str, start: usize, end: usize) -> usize {
    text.get(start..end).map_or(0, |s| s.chars().count())
}
