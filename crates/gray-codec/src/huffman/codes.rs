//! Prefix-code generation from a Huffman tree.

use std::fmt;

use super::{FrequencyTable, HuffmanNode};

/// Longest code a [`PrefixCode`] can hold.
///
/// Trees built from u32 counts over 256 symbols stay well below this depth.
pub const MAX_CODE_LEN: u8 = 64;

/// A prefix code: `len` bits stored in the low bits of `value`, first bit
/// most significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrefixCode {
    pub value: u64,
    pub len: u8,
}

impl PrefixCode {
    /// Code bits, first to last.
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).rev().map(move |i| (self.value >> i) & 1 == 1)
    }

    /// Whether `self` is a (non-strict) prefix of `other`.
    pub fn is_prefix_of(&self, other: &PrefixCode) -> bool {
        self.len <= other.len && other.value >> (other.len - self.len) == self.value
    }

    fn child(&self, bit: u64) -> Self {
        debug_assert!(self.len < MAX_CODE_LEN, "Huffman tree deeper than 64 levels");
        Self {
            value: (self.value << 1) | bit,
            len: self.len + 1,
        }
    }
}

impl fmt::Display for PrefixCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Code for every intensity that occurs in the image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: [Option<PrefixCode>; 256],
}

impl CodeTable {
    #[inline]
    pub fn get(&self, symbol: u8) -> Option<PrefixCode> {
        self.codes[symbol as usize]
    }

    /// `(symbol, code)` pairs, ascending by symbol.
    pub fn iter(&self) -> impl Iterator<Item = (u8, PrefixCode)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(s, code)| code.map(|c| (s as u8, c)))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Longest code length in the table (0 for an empty table).
    pub fn max_len(&self) -> u8 {
        self.iter().map(|(_, c)| c.len).max().unwrap_or(0)
    }

    /// Total encoded bits for an image with these frequencies.
    pub fn encoded_bits(&self, frequencies: &FrequencyTable) -> u64 {
        self.iter()
            .map(|(s, c)| frequencies.get(s) as u64 * c.len as u64)
            .sum()
    }
}

/// Walk the tree assigning `0` to left edges and `1` to right edges.
///
/// A root that is itself a leaf gets the one-bit code `0` so every pixel
/// still occupies at least one bit.
pub fn generate_codes(root: &HuffmanNode) -> CodeTable {
    let mut codes = [None; 256];
    match root {
        HuffmanNode::Leaf { symbol, .. } => {
            codes[*symbol as usize] = Some(PrefixCode { value: 0, len: 1 });
        }
        HuffmanNode::Internal { .. } => {
            assign(root, PrefixCode { value: 0, len: 0 }, &mut codes);
        }
    }
    CodeTable { codes }
}

fn assign(node: &HuffmanNode, prefix: PrefixCode, codes: &mut [Option<PrefixCode>; 256]) {
    match node {
        HuffmanNode::Leaf { symbol, .. } => codes[*symbol as usize] = Some(prefix),
        HuffmanNode::Internal { left, right, .. } => {
            assign(left, prefix.child(0), codes);
            assign(right, prefix.child(1), codes);
        }
    }
}
