//! Huffman tree construction.
//!
//! Leaves enter a min-heap in ascending intensity order. The two
//! lowest-frequency nodes are popped, the first becoming the left child,
//! and their parent is pushed back. Ties resolve first-in first-out by
//! insertion sequence, so the encoder and a decoder that rebuilds the tree
//! from the same frequency table always agree.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::FrequencyTable;

/// A node of a strict binary Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    Leaf {
        symbol: u8,
        freq: u64,
    },
    Internal {
        freq: u64,
        left: Box<HuffmanNode>,
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    pub fn freq(&self) -> u64 {
        match self {
            HuffmanNode::Leaf { freq, .. } | HuffmanNode::Internal { freq, .. } => *freq,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanNode::Leaf { .. })
    }
}

/// Heap entry ordered so that `BinaryHeap` pops the lowest frequency first,
/// then the earliest insertion.
struct QueueEntry {
    freq: u64,
    seq: u64,
    node: HuffmanNode,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .freq
            .cmp(&self.freq)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.freq == other.freq && self.seq == other.seq
    }
}

impl Eq for QueueEntry {}

/// Build the tree for a frequency table.
///
/// Returns `None` when no intensity occurs. A single occurring intensity
/// yields a lone leaf as the root.
pub fn build_tree(frequencies: &FrequencyTable) -> Option<HuffmanNode> {
    let mut heap = BinaryHeap::new();
    let mut seq = 0u64;

    for (symbol, count) in frequencies.present() {
        heap.push(QueueEntry {
            freq: count as u64,
            seq,
            node: HuffmanNode::Leaf {
                symbol,
                freq: count as u64,
            },
        });
        seq += 1;
    }

    while heap.len() > 1 {
        let (Some(left), Some(right)) = (heap.pop(), heap.pop()) else {
            break;
        };
        let freq = left.freq + right.freq;
        heap.push(QueueEntry {
            freq,
            seq,
            node: HuffmanNode::Internal {
                freq,
                left: Box::new(left.node),
                right: Box::new(right.node),
            },
        });
        seq += 1;
    }

    heap.pop().map(|entry| entry.node)
}
