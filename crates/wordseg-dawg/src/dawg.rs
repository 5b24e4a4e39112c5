// Frozen DAWG with prefix search and perfect-hash word indices

use wordseg_core::PrefixMatch;

use crate::PrefixDictionary;

/// Frozen node: a slice of the edge table plus the size of its right language.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Node {
    pub(crate) first_edge: u32,
    pub(crate) edge_count: u32,
    pub(crate) is_final: bool,
    /// Number of words reachable from this node (including itself if final).
    pub(crate) words: u32,
}

/// Frozen edge, sorted by label within its node.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Edge {
    pub(crate) label: u8,
    pub(crate) target: u32,
    /// Number of words that sort before every word continuing through this
    /// edge, counted from the edge's source node: one if the source is final,
    /// plus the words under all lower-labelled sibling edges.
    pub(crate) preceding: u32,
}

/// Minimal acyclic word graph over UTF-8 bytes.
///
/// Each word has a canonical index equal to its rank in byte order, which is
/// also the order the words were added in. The index is computed while
/// walking, from per-edge counts, so no per-word table is stored.
#[derive(Clone)]
pub struct Dawg {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    root: u32,
}

impl std::fmt::Debug for Dawg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dawg")
            .field("word_count", &self.len())
            .field("node_count", &self.nodes.len())
            .field("edge_count", &self.edges.len())
            .finish()
    }
}

impl Dawg {
    pub(crate) fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>, root: u32) -> Self {
        Self { nodes, edges, root }
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.nodes[self.root as usize].words as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn edges_of(&self, node: u32) -> &[Edge] {
        let n = &self.nodes[node as usize];
        let start = n.first_edge as usize;
        &self.edges[start..start + n.edge_count as usize]
    }

    fn transition(&self, node: u32, label: u8) -> Option<&Edge> {
        let edges = self.edges_of(node);
        edges
            .binary_search_by_key(&label, |e| e.label)
            .ok()
            .map(|i| &edges[i])
    }

    /// Canonical index of `word`, or `None` if it is not in the dictionary.
    pub fn index_of(&self, word: &str) -> Option<usize> {
        let mut node = self.root;
        let mut index = 0usize;
        for &label in word.as_bytes() {
            let edge = self.transition(node, label)?;
            index += edge.preceding as usize;
            node = edge.target;
        }
        if !word.is_empty() && self.nodes[node as usize].is_final {
            Some(index)
        } else {
            None
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index_of(word).is_some()
    }

    /// Find every word that is a prefix of `text`, shortest first.
    pub fn find_prefixes<'a>(&self, text: &'a str) -> Vec<PrefixMatch<'a>> {
        let mut matches = Vec::new();
        let mut node = self.root;
        let mut index = 0usize;
        for (i, &label) in text.as_bytes().iter().enumerate() {
            let Some(edge) = self.transition(node, label) else {
                break;
            };
            index += edge.preceding as usize;
            node = edge.target;
            if self.nodes[node as usize].is_final {
                // Words are valid UTF-8, so a match always ends on a boundary.
                if let Some(word) = text.get(..=i) {
                    matches.push(PrefixMatch::new(word, index));
                }
            }
        }
        matches
    }

    /// All words in canonical index order.
    pub fn words(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.len());
        let mut path: Vec<u8> = Vec::new();
        // (node, next edge cursor)
        let mut stack: Vec<(u32, usize)> = vec![(self.root, 0)];
        while let Some(top) = stack.last_mut() {
            let (node, cursor) = *top;
            let edges = self.edges_of(node);
            if cursor < edges.len() {
                top.1 += 1;
                let edge = edges[cursor];
                path.push(edge.label);
                if self.nodes[edge.target as usize].is_final {
                    if let Ok(word) = String::from_utf8(path.clone()) {
                        out.push(word);
                    }
                }
                stack.push((edge.target, 0));
            } else {
                stack.pop();
                if !stack.is_empty() {
                    path.pop();
                }
            }
        }
        out
    }
}

impl PrefixDictionary for Dawg {
    fn find_prefixes<'a>(&self, text: &'a str) -> Vec<PrefixMatch<'a>> {
        Dawg::find_prefixes(self, text)
    }

    fn index_of(&self, word: &str) -> Option<usize> {
        Dawg::index_of(self, word)
    }

    fn len(&self) -> usize {
        Dawg::len(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DawgBuilder;
    use proptest::prelude::*;

    /// The dictionary used throughout the segmenter examples, in sorted order.
    const WORDS: &[&str] = &[
        "他", "儿", "儿子", "叫", "名", "名字", "四", "子", "字", "岁", "的",
    ];

    fn build(words: &[&str]) -> Dawg {
        let mut builder = DawgBuilder::new();
        for w in words {
            builder.add(w).unwrap();
        }
        builder.finish()
    }

    #[test]
    fn index_matches_insertion_order() {
        let dawg = build(WORDS);
        for (i, w) in WORDS.iter().enumerate() {
            assert_eq!(dawg.index_of(w), Some(i), "index of {w}");
        }
    }

    #[test]
    fn missing_words() {
        let dawg = build(WORDS);
        assert_eq!(dawg.index_of("我"), None);
        assert_eq!(dawg.index_of("儿子们"), None);
        assert_eq!(dawg.index_of(""), None);
        assert!(!dawg.contains("Zack"));
    }

    #[test]
    fn find_prefixes_shortest_first() {
        let dawg = build(WORDS);
        let matches = dawg.find_prefixes("儿子四岁");
        assert_eq!(
            matches,
            vec![PrefixMatch::new("儿", 1), PrefixMatch::new("儿子", 2)]
        );
    }

    #[test]
    fn find_prefixes_no_match() {
        let dawg = build(WORDS);
        assert!(dawg.find_prefixes("我儿子").is_empty());
        assert!(dawg.find_prefixes("").is_empty());
    }

    #[test]
    fn find_prefixes_stops_at_end_of_text() {
        let dawg = build(&["ab", "abc"]);
        assert_eq!(dawg.find_prefixes("ab"), vec![PrefixMatch::new("ab", 0)]);
    }

    #[test]
    fn words_round_trip() {
        let dawg = build(WORDS);
        assert_eq!(dawg.words(), WORDS);
    }

    #[test]
    fn trait_object_dispatch() {
        let dawg = build(WORDS);
        let dict: &dyn PrefixDictionary = &dawg;
        assert_eq!(dict.len(), WORDS.len());
        assert_eq!(dict.find_prefixes("名字叫").len(), 2);
        assert_eq!(dict.index_of("名字"), Some(5));
        assert_eq!(dict.index_of("名字叫"), None);
    }

    #[test]
    fn debug_shows_counts() {
        let dawg = build(&["a"]);
        let s = format!("{dawg:?}");
        assert!(s.contains("word_count: 1"));
    }

    proptest! {
        #[test]
        fn indices_are_ranks(set in prop::collection::btree_set("[a-c\u{4e00}-\u{4e02}]{1,5}", 0..40)) {
            let words: Vec<&str> = set.iter().map(String::as_str).collect();
            let dawg = build(&words);
            prop_assert_eq!(dawg.len(), words.len());
            for (i, w) in words.iter().enumerate() {
                prop_assert_eq!(dawg.index_of(w), Some(i));
            }
            prop_assert_eq!(dawg.words(), words.iter().map(|w| w.to_string()).collect::<Vec<_>>());
        }

        #[test]
        fn prefixes_match_naive_scan(
            set in prop::collection::btree_set("[ab\u{4e00}]{1,4}", 0..20),
            text in "[ab\u{4e00}]{0,8}",
        ) {
            let words: Vec<&str> = set.iter().map(String::as_str).collect();
            let dawg = build(&words);
            let mut expected: Vec<(usize, usize)> = words
                .iter()
                .enumerate()
                .filter(|(_, w)| text.starts_with(**w))
                .map(|(i, w)| (w.len(), i))
                .collect();
            expected.sort();
            let found: Vec<(usize, usize)> = dawg
                .find_prefixes(&text)
                .iter()
                .map(|m| (m.word.len(), m.index))
                .collect();
            prop_assert_eq!(found, expected);
        }
    }
}
