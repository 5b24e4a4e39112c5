// Shared enums: segmentation graph node status

/// Status of a byte offset in the per-call segmentation graph.
///
/// Every offset is in exactly one state. An offset becomes `Queued` the first
/// time an edge reaches it, and `Unrecognized` once it has been expanded and
/// no dictionary word started there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NodeStatus {
    /// No edge has reached this offset yet.
    #[default]
    Undiscovered,
    /// The offset has been reached and placed in the priority queue.
    Queued,
    /// The offset was expanded without any dictionary match; only the
    /// single-codepoint fallback edge leaves it.
    Unrecognized,
}

impl NodeStatus {
    /// Whether any edge has reached this offset.
    pub fn is_discovered(self) -> bool {
        self != NodeStatus::Undiscovered
    }

    /// Whether this offset starts an unrecognized codepoint.
    pub fn is_unrecognized(self) -> bool {
        self == NodeStatus::Unrecognized
    }
}
