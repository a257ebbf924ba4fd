//! Unified error type for the gray-codec public API.
//!
//! Every failure is terminal for the call that produced it: decoders never
//! hand back a partially reconstructed image.

use crate::api::Scheme;
use thiserror::Error;

/// Error type shared by all codecs and the [`Compressor`](crate::Compressor) facade.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// A side is zero, the pixel buffer does not match the dimensions, or the
    /// pixel count does not fit the codec's u32 counters.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u64, height: u64 },

    /// A varint, run-length stream, frequency table or bit-stream is
    /// truncated or inconsistent with the header.
    #[error("malformed artifact: {0}")]
    MalformedArtifact(String),

    /// The prefix-code scanner read past the longest known code without a match.
    #[error("no prefix code matched after {bits} bits at bit offset {offset}")]
    UnmatchedCode { bits: u8, offset: u64 },

    /// Nothing to code: the image or the frequency table holds no pixels.
    #[error("image contains no pixels")]
    EmptyImage,

    /// Bit-plane index outside 0..8.
    #[error("invalid bit-plane index {0} (expected 0-7)")]
    InvalidBitPlane(u8),

    /// An artifact was handed to a codec for a different scheme.
    #[error("expected a {expected} artifact, got {found}")]
    SchemeMismatch { expected: Scheme, found: Scheme },
}

impl CodecError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        CodecError::MalformedArtifact(reason.into())
    }
}
