//! Saturating varint: the integer encoding used for dimensions and run lengths.
//!
//! A value is written as a run of `255` saturation bytes followed by one
//! final byte holding the remainder. The final byte lies in `1..=255` for
//! every non-zero value (so exact multiples of 255 end in `255`), and
//! `0` encodes as the single byte `[0]`:
//!
//! ```text
//!   0   -> [0]
//!   7   -> [7]
//!   255 -> [255]
//!   300 -> [255, 45]
//!   510 -> [255, 255]
//! ```
//!
//! Decoding is `255 * (len - 1) + last`. The encoding is not self-delimiting
//! inside a larger stream, so callers always hand [`decode`] a complete
//! segment.

use crate::api::CodecError;

const SATURATED: u8 = u8::MAX;

/// Encode `n` into a fresh buffer.
pub fn encode(n: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(n));
    encode_into(n, &mut out);
    out
}

/// Append the encoding of `n` to `out`.
pub fn encode_into(n: u64, out: &mut Vec<u8>) {
    let mut remaining = n;
    while remaining > SATURATED as u64 {
        out.push(SATURATED);
        remaining -= SATURATED as u64;
    }
    out.push(remaining as u8);
}

/// Number of bytes [`encode`] produces for `n`.
pub fn encoded_len(n: u64) -> usize {
    if n == 0 {
        1
    } else {
        ((n - 1) / SATURATED as u64 + 1) as usize
    }
}

/// Decode one complete varint segment.
pub fn decode(bytes: &[u8]) -> Result<u64, CodecError> {
    let (&last, saturated) = bytes
        .split_last()
        .ok_or_else(|| CodecError::malformed("empty varint"))?;

    if saturated.iter().any(|&b| b != SATURATED) {
        return Err(CodecError::malformed("varint saturation byte is not 255"));
    }
    if !saturated.is_empty() && last == 0 {
        return Err(CodecError::malformed("varint ends in a zero remainder"));
    }

    (saturated.len() as u64)
        .checked_mul(SATURATED as u64)
        .and_then(|n| n.checked_add(last as u64))
        .ok_or_else(|| CodecError::malformed("varint overflows u64"))
}
