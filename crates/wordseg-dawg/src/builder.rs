// Incremental DAWG construction from sorted input
//
// Words arrive in strictly increasing byte order. Only the path of the most
// recently added word is still mutable; everything left of it is already
// minimized and registered. Adding a word first minimizes the part of the
// previous path that is not shared with the new word, then appends the new
// suffix. `finish` minimizes what is left and freezes the graph.

use std::cmp::Ordering;

use hashbrown::HashMap;

use crate::DawgError;
use crate::dawg::{Dawg, Edge, Node};

const ROOT: u32 = 0;

/// Marks a node not yet reached by the freezing traversal.
const UNVISITED: u32 = u32::MAX;

/// Marks a node on the freezing traversal stack.
const VISITING: u32 = u32::MAX - 1;

/// Mutable node used during construction.
///
/// Equality and hashing cover the whole right language of the node (finality
/// plus outgoing edges to already-registered children), which is what the
/// register deduplicates on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
struct BuildNode {
    is_final: bool,
    /// Outgoing `(label, child)` edges, sorted by label.
    edges: Vec<(u8, u32)>,
}

/// An edge on the path of the last added word that has not been minimized.
#[derive(Debug, Clone, Copy)]
struct UncheckedEdge {
    parent: u32,
    label: u8,
    child: u32,
}

/// Builder for a [`Dawg`].
///
/// ```
/// use wordseg_dawg::DawgBuilder;
///
/// let mut builder = DawgBuilder::new();
/// for word in ["儿", "儿子", "名字"] {
///     builder.add(word).unwrap();
/// }
/// let dawg = builder.finish();
/// assert_eq!(dawg.index_of("儿子"), Some(1));
/// ```
#[derive(Debug)]
pub struct DawgBuilder {
    nodes: Vec<BuildNode>,
    /// Indices of nodes dropped during minimization, reused for new nodes.
    free: Vec<u32>,
    register: HashMap<BuildNode, u32>,
    unchecked: Vec<UncheckedEdge>,
    previous: String,
    word_count: usize,
}

impl Default for DawgBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DawgBuilder {
    pub fn new() -> Self {
        Self {
            nodes: vec![BuildNode::default()],
            free: Vec::new(),
            register: HashMap::new(),
            unchecked: Vec::new(),
            previous: String::new(),
            word_count: 0,
        }
    }

    /// Number of words added so far.
    pub fn len(&self) -> usize {
        self.word_count
    }

    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    /// Add a word.
    ///
    /// The word must be non-empty and strictly greater (in byte order, which
    /// for UTF-8 is codepoint order) than every word added before it. On
    /// error the builder is left unchanged.
    pub fn add(&mut self, word: &str) -> Result<(), DawgError> {
        if word.is_empty() {
            return Err(DawgError::EmptyWord);
        }
        if self.word_count > 0 {
            match word.as_bytes().cmp(self.previous.as_bytes()) {
                Ordering::Greater => {}
                Ordering::Equal => {
                    return Err(DawgError::Duplicate {
                        word: word.to_string(),
                    });
                }
                Ordering::Less => {
                    return Err(DawgError::OutOfOrder {
                        previous: self.previous.clone(),
                        word: word.to_string(),
                    });
                }
            }
        }

        let bytes = word.as_bytes();
        let common = common_prefix_len(self.previous.as_bytes(), bytes);
        self.minimize(common);

        let mut node = self.unchecked.last().map_or(ROOT, |e| e.child);
        for &label in &bytes[common..] {
            let child = self.alloc();
            self.nodes[node as usize].edges.push((label, child));
            self.unchecked.push(UncheckedEdge {
                parent: node,
                label,
                child,
            });
            node = child;
        }
        self.nodes[node as usize].is_final = true;

        self.previous.clear();
        self.previous.push_str(word);
        self.word_count += 1;
        Ok(())
    }

    /// Minimize the remaining path and freeze the graph.
    pub fn finish(mut self) -> Dawg {
        self.minimize(0);
        self.freeze()
    }

    fn alloc(&mut self) -> u32 {
        match self.free.pop() {
            Some(idx) => {
                self.nodes[idx as usize] = BuildNode::default();
                idx
            }
            None => {
                self.nodes.push(BuildNode::default());
                (self.nodes.len() - 1) as u32
            }
        }
    }

    /// Replace unchecked nodes deeper than `down_to` with equivalent
    /// registered nodes, registering the ones that have no equivalent yet.
    fn minimize(&mut self, down_to: usize) {
        while self.unchecked.len() > down_to {
            let Some(edge) = self.unchecked.pop() else {
                break;
            };
            let existing = self.register.get(&self.nodes[edge.child as usize]).copied();
            match existing {
                Some(equivalent) => {
                    let parent = &mut self.nodes[edge.parent as usize];
                    if let Some(last) = parent.edges.last_mut() {
                        debug_assert_eq!(last.0, edge.label);
                        last.1 = equivalent;
                    }
                    self.free.push(edge.child);
                }
                None => {
                    let key = self.nodes[edge.child as usize].clone();
                    self.register.insert(key, edge.child);
                }
            }
        }
    }

    /// Renumber reachable nodes in post-order and compute, for every node,
    /// the number of words in its right language.
    ///
    /// Post-order puts every child before its parents, so word counts can be
    /// filled in a single forward pass.
    fn freeze(self) -> Dawg {
        let mut new_id = vec![UNVISITED; self.nodes.len()];
        let mut order: Vec<u32> = Vec::new();
        let mut stack: Vec<(u32, usize)> = vec![(ROOT, 0)];
        new_id[ROOT as usize] = VISITING;

        while let Some(top) = stack.last_mut() {
            let (node, cursor) = *top;
            let edges = &self.nodes[node as usize].edges;
            if cursor < edges.len() {
                top.1 += 1;
                let child = edges[cursor].1;
                if new_id[child as usize] == UNVISITED {
                    new_id[child as usize] = VISITING;
                    stack.push((child, 0));
                }
            } else {
                new_id[node as usize] = order.len() as u32;
                order.push(node);
                stack.pop();
            }
        }

        let mut nodes: Vec<Node> = Vec::with_capacity(order.len());
        let mut edges: Vec<Edge> = Vec::new();
        for &old in &order {
            let build = &self.nodes[old as usize];
            let first_edge = edges.len() as u32;
            let mut words = u32::from(build.is_final);
            for &(label, child) in &build.edges {
                let target = new_id[child as usize];
                edges.push(Edge {
                    label,
                    target,
                    preceding: words,
                });
                words += nodes[target as usize].words;
            }
            nodes.push(Node {
                first_edge,
                edge_count: build.edges.len() as u32,
                is_final: build.is_final,
                words,
            });
        }

        let root = new_id[ROOT as usize];
        Dawg::from_parts(nodes, edges, root)
    }
}

fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(words: &[&str]) -> Dawg {
        let mut builder = DawgBuilder::new();
        for w in words {
            builder.add(w).unwrap();
        }
        builder.finish()
    }

    #[test]
    fn sorted_words_are_accepted() {
        let mut builder = DawgBuilder::new();
        builder.add("a").unwrap();
        builder.add("ab").unwrap();
        builder.add("b").unwrap();
        assert_eq!(builder.len(), 3);
    }

    #[test]
    fn duplicate_is_rejected() {
        let mut builder = DawgBuilder::new();
        builder.add("名字").unwrap();
        let err = builder.add("名字").unwrap_err();
        assert_eq!(
            err,
            DawgError::Duplicate {
                word: "名字".to_string()
            }
        );
    }

    #[test]
    fn out_of_order_is_rejected() {
        let mut builder = DawgBuilder::new();
        builder.add("b").unwrap();
        let err = builder.add("a").unwrap_err();
        assert!(matches!(err, DawgError::OutOfOrder { .. }));
    }

    #[test]
    fn prefix_after_extension_is_out_of_order() {
        let mut builder = DawgBuilder::new();
        builder.add("儿子").unwrap();
        assert!(matches!(
            builder.add("儿").unwrap_err(),
            DawgError::OutOfOrder { .. }
        ));
    }

    #[test]
    fn empty_word_is_rejected() {
        let mut builder = DawgBuilder::new();
        assert_eq!(builder.add("").unwrap_err(), DawgError::EmptyWord);
    }

    #[test]
    fn failed_add_leaves_builder_unchanged() {
        let mut builder = DawgBuilder::new();
        builder.add("b").unwrap();
        let _ = builder.add("a");
        builder.add("c").unwrap();
        let dawg = builder.finish();
        assert_eq!(dawg.len(), 2);
        assert!(!dawg.contains("a"));
        assert_eq!(dawg.index_of("c"), Some(1));
    }

    #[test]
    fn shared_suffixes_are_merged() {
        // Minimal automaton: root -t-> A; A -a,o-> B; B -p-> C*; C -s-> D*
        let dawg = build(&["tap", "taps", "top", "tops"]);
        assert_eq!(dawg.node_count(), 5);
        assert_eq!(dawg.edge_count(), 5);
        assert_eq!(dawg.len(), 4);
    }

    #[test]
    fn empty_builder_gives_empty_dawg() {
        let dawg = DawgBuilder::new().finish();
        assert!(dawg.is_empty());
        assert_eq!(dawg.node_count(), 1);
        assert_eq!(dawg.edge_count(), 0);
    }

    #[test]
    fn freed_nodes_are_reused() {
        let mut builder = DawgBuilder::new();
        for w in ["ca", "cb", "da", "db", "ea", "eb"] {
            builder.add(w).unwrap();
        }
        // Final leaves of later words collapse into the first one, so the
        // arena stays far below one node per byte.
        assert!(builder.nodes.len() < 10);
        let dawg = builder.finish();
        assert_eq!(dawg.words(), vec!["ca", "cb", "da", "db", "ea", "eb"]);
    }
}
