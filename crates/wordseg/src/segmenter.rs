// Segmenter: shortest weighted path over the implicit word graph
//
// Nodes are byte offsets 0..=len. Edges leave an offset for every dictionary
// word starting there, weighted by the word's cost. Offsets without any
// dictionary word get one zero-cost edge spanning a single codepoint, so the
// end of the input is always reachable. The graph is discovered lazily while
// Dijkstra's algorithm runs; since weights are non-negative, the first time
// the end offset is popped its distance is optimal.
//
// Tie-breaking: a predecessor is only replaced by a strictly cheaper path,
// so among equally cheap paths the first one relaxed wins. The queue pops by
// (distance, offset), and matches at one offset are relaxed shortest first,
// which makes the order of relaxations (and so the result) deterministic.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::trace;
use wordseg_core::NodeStatus;
use wordseg_core::character::{codepoint_count, codepoint_width};

use crate::loader::{LoadError, ModelLoader};
use crate::model::{WeightedModel, WordModel};

/// Counters describing one segmentation call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Offsets popped from the queue and expanded (never more than `len + 1`).
    pub expanded: usize,
    /// Edges relaxed, fallback edges included.
    pub relaxed: usize,
    /// Expanded offsets where no dictionary word started.
    pub unrecognized: usize,
}

/// Splits text into words using a [`WeightedModel`].
///
/// The segmenter keeps no state between calls; all per-call graph data
/// lives in a scratch structure dropped at the end of [`segment`](Self::segment).
/// With `M = &WordModel` or `M = Arc<WordModel>` any number of segmenters
/// can share one finished model across threads.
#[derive(Debug, Clone)]
pub struct Segmenter<M> {
    model: M,
}

impl Segmenter<WordModel> {
    /// Create a segmenter over a model obtained from `loader`.
    pub fn from_loader<L: ModelLoader + ?Sized>(loader: &L) -> Result<Self, LoadError> {
        Ok(Self::new(loader.load()?))
    }
}

impl<M: WeightedModel> Segmenter<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Split `input` into words, unrecognized runs, and punctuation.
    ///
    /// The segments borrow from `input` and concatenate back to it exactly.
    /// An empty input gives no segments.
    pub fn segment<'a>(&self, input: &'a str) -> Vec<&'a str> {
        self.segment_with_stats(input).0
    }

    /// Same as [`segment`](Self::segment), returning owned strings.
    pub fn segment_owned(&self, input: &str) -> Vec<String> {
        self.segment(input).into_iter().map(str::to_owned).collect()
    }

    /// Same as [`segment`](Self::segment), also returning search counters.
    pub fn segment_with_stats<'a>(&self, input: &'a str) -> (Vec<&'a str>, SearchStats) {
        if input.is_empty() {
            return (Vec::new(), SearchStats::default());
        }

        let mut search = Search::new(input.len());
        search.run(&self.model, input);
        let segments = search.reconstruct(input);

        trace!(
            bytes = input.len(),
            codepoints = codepoint_count(input, 0, input.len()),
            segments = segments.len(),
            expanded = search.stats.expanded,
            relaxed = search.stats.relaxed,
            unrecognized = search.stats.unrecognized,
            "segmented input"
        );
        (segments, search.stats)
    }
}

/// Priority queue entry, ordered so that `BinaryHeap` pops the smallest
/// distance first and, among equal distances, the smallest offset.
#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    dist: f32,
    offset: usize,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.offset.cmp(&self.offset))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

/// Per-call graph state, indexed by byte offset.
struct Search {
    /// Best known distance; `INFINITY` until an edge reaches the offset.
    dist: Vec<f32>,
    /// Start offset of the last edge on the best path to each offset.
    prev: Vec<usize>,
    status: Vec<NodeStatus>,
    /// Offsets already popped and expanded.
    expanded: Vec<bool>,
    queue: BinaryHeap<QueueEntry>,
    stats: SearchStats,
}

impl Search {
    fn new(len: usize) -> Self {
        Self {
            dist: vec![f32::INFINITY; len + 1],
            prev: vec![0; len + 1],
            status: vec![NodeStatus::Undiscovered; len + 1],
            expanded: vec![false; len + 1],
            queue: BinaryHeap::new(),
            stats: SearchStats::default(),
        }
    }

    fn run<M: WeightedModel>(&mut self, model: &M, input: &str) {
        let len = input.len();
        self.dist[0] = 0.0;
        self.status[0] = NodeStatus::Queued;
        self.queue.push(QueueEntry {
            dist: 0.0,
            offset: 0,
        });

        while let Some(QueueEntry { dist, offset }) = self.queue.pop() {
            // Entries superseded by a cheaper push are skipped.
            if self.expanded[offset] || dist > self.dist[offset] {
                continue;
            }
            if offset == len {
                break;
            }
            self.expanded[offset] = true;
            self.stats.expanded += 1;

            let suffix = &input[offset..];
            let mut matched = false;
            for word in model.find_prefixes_with_weight(suffix) {
                let to = offset + word.len();
                let candidate = dist + word.weight;
                // Only real, non-empty prefixes whose path cost stays finite
                // are edges.
                if word.is_empty()
                    || !candidate.is_finite()
                    || !suffix.starts_with(word.word)
                {
                    continue;
                }
                matched = true;
                self.relax(offset, to, candidate);
            }

            if !matched {
                self.status[offset] = NodeStatus::Unrecognized;
                self.stats.unrecognized += 1;
                let width = codepoint_width(input, offset);
                self.relax(offset, offset + width, dist);
            }
        }
    }

    fn relax(&mut self, from: usize, to: usize, candidate: f32) {
        self.stats.relaxed += 1;
        if !self.status[to].is_discovered() {
            self.status[to] = NodeStatus::Queued;
        }
        if candidate < self.dist[to] {
            self.dist[to] = candidate;
            self.prev[to] = from;
            self.queue.push(QueueEntry {
                dist: candidate,
                offset: to,
            });
        }
    }

    /// Walk predecessors back from the end, merging consecutive
    /// unrecognized codepoints into one segment.
    fn reconstruct<'a>(&self, input: &'a str) -> Vec<&'a str> {
        let mut segments = Vec::new();
        let mut to = input.len();
        while to > 0 {
            let mut from = self.prev[to];
            while from > 0
                && self.status[from].is_unrecognized()
                && self.status[self.prev[from]].is_unrecognized()
            {
                from = self.prev[from];
            }
            segments.push(&input[from..to]);
            to = from;
        }
        segments.reverse();
        segments
    }
}
