//! MSB-first bit packing for Huffman code streams.

use super::PrefixCode;

/// Growable bit buffer. Bits fill each byte from the most significant end.
#[derive(Debug, Default)]
pub struct BitWriter {
    bytes: Vec<u8>,
    bit_len: u64,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity_bits(bits: u64) -> Self {
        Self {
            bytes: Vec::with_capacity(bits.div_ceil(8) as usize),
            bit_len: 0,
        }
    }

    pub fn push_bit(&mut self, bit: bool) {
        let offset = (self.bit_len % 8) as u8;
        if offset == 0 {
            self.bytes.push(0);
        }
        if bit {
            if let Some(last) = self.bytes.last_mut() {
                *last |= 0x80 >> offset;
            }
        }
        self.bit_len += 1;
    }

    pub fn push_code(&mut self, code: PrefixCode) {
        for bit in code.bits() {
            self.push_bit(bit);
        }
    }

    pub fn bit_len(&self) -> u64 {
        self.bit_len
    }

    /// Packed bytes and the exact bit count. Padding bits are zero.
    pub fn finish(self) -> (Vec<u8>, u64) {
        (self.bytes, self.bit_len)
    }
}

/// Reads back the first `bit_len` bits of a packed buffer.
#[derive(Debug)]
pub struct BitReader<'a> {
    bytes: &'a [u8],
    bit_len: u64,
    pos: u64,
}

impl<'a> BitReader<'a> {
    /// `bit_len` must not exceed `bytes.len() * 8`.
    pub fn new(bytes: &'a [u8], bit_len: u64) -> Self {
        debug_assert!(bit_len <= bytes.len() as u64 * 8);
        Self {
            bytes,
            bit_len,
            pos: 0,
        }
    }

    /// Next bit, or `None` once `bit_len` bits have been read.
    pub fn read_bit(&mut self) -> Option<bool> {
        if self.pos >= self.bit_len {
            return None;
        }
        let byte = *self.bytes.get((self.pos / 8) as usize)?;
        let bit = byte & (0x80 >> (self.pos % 8)) != 0;
        self.pos += 1;
        Some(bit)
    }

    /// Bits consumed so far.
    pub fn position(&self) -> u64 {
        self.pos
    }

    pub fn remaining(&self) -> u64 {
        self.bit_len - self.pos
    }
}
