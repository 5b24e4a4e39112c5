// Dictionary match and weighted word value types

// ---------------------------------------------------------------------------
// PrefixMatch
// ---------------------------------------------------------------------------

/// A dictionary entry found as a prefix of a query string.
///
/// `word` borrows from the queried string, so `word.len()` is also the byte
/// length of the edge it produces in the segmentation graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrefixMatch<'a> {
    /// The matched word.
    pub word: &'a str,

    /// Canonical index of the word in its dictionary (dense, `0..len`).
    pub index: usize,
}

impl<'a> PrefixMatch<'a> {
    pub fn new(word: &'a str, index: usize) -> Self {
        Self { word, index }
    }
}

// ---------------------------------------------------------------------------
// WordWeight
// ---------------------------------------------------------------------------

/// A word paired with its path cost.
///
/// The weight is `-log2` of the word's unigram probability: it is never
/// negative, and a lower weight means a more probable word.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WordWeight<'a> {
    /// The matched word, borrowed from the queried string.
    pub word: &'a str,

    /// Additive path cost of the word.
    pub weight: f32,
}

impl<'a> WordWeight<'a> {
    pub fn new(word: &'a str, weight: f32) -> Self {
        Self { word, weight }
    }

    /// Byte length of the word.
    #[inline]
    pub fn len(&self) -> usize {
        self.word.len()
    }

    /// Whether the word is empty. Dictionaries never return empty words.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_match_borrows_query() {
        let query = String::from("名字叫");
        let m = PrefixMatch::new(&query[..6], 3);
        assert_eq!(m.word, "名字");
        assert_eq!(m.index, 3);
    }

    #[test]
    fn word_weight_len_is_bytes() {
        let w = WordWeight::new("儿子", 2.7);
        assert_eq!(w.len(), 6);
        assert!(!w.is_empty());
    }

    #[test]
    fn word_weight_copy() {
        let w = WordWeight::new("的", 3.5);
        let copied = w;
        assert_eq!(w, copied);
    }
}
