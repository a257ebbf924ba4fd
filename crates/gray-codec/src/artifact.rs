//! Compressed artifacts: what `compress` returns and `decompress` consumes.
//!
//! Every artifact starts with a [`Header`] holding the image width and
//! height as saturating varints, followed by a scheme-specific payload:
//!
//! ```text
//! Huffman:       [width][height][frequency table][packed code bits]
//! RleGrayscale:  [width][height][(run length, intensity) ...]
//! RleBitPlane:   [width][height][plane 0 stream] ... [plane 7 stream]
//! ```
//!
//! Segments are kept separate rather than concatenated into one buffer,
//! since a saturating varint cannot mark its own end.

use crate::api::{CodecError, Scheme};
use crate::bitplane::PLANE_COUNT;
use crate::grid::pixel_count;
use crate::varint;

/// Image dimensions as varint segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub width: Vec<u8>,
    pub height: Vec<u8>,
}

impl Header {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: varint::encode(width as u64),
            height: varint::encode(height as u64),
        }
    }

    /// Decode and validate the dimensions.
    pub fn dimensions(&self) -> Result<(u32, u32), CodecError> {
        let width = varint::decode(&self.width)?;
        let height = varint::decode(&self.height)?;
        let invalid = CodecError::InvalidDimensions { width, height };
        let (Ok(w), Ok(h)) = (u32::try_from(width), u32::try_from(height)) else {
            return Err(invalid);
        };
        pixel_count(w, h)?;
        Ok((w, h))
    }

    /// Bytes taken by both varints.
    pub fn encoded_len(&self) -> usize {
        self.width.len() + self.height.len()
    }
}

/// Huffman-coded intensities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanArtifact {
    pub header: Header,
    /// Serialized [`FrequencyTable`](crate::huffman::FrequencyTable).
    pub table: Vec<u8>,
    /// Packed code bits, most significant bit first.
    pub bits: Vec<u8>,
    /// Number of meaningful bits in `bits`; the tail of the last byte is padding.
    pub bit_len: u64,
}

/// Run-length coded intensities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RleGrayscaleArtifact {
    pub header: Header,
    /// Interleaved `(run length, intensity)` byte pairs.
    pub runs: Vec<u8>,
}

/// Run-length coded bit-planes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RleBitPlaneArtifact {
    pub header: Header,
    /// One alternating-run stream per plane, plane 0 = least significant bit.
    pub planes: [Vec<u8>; PLANE_COUNT],
}

/// Output of any codec, tagged with the scheme that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompressedArtifact {
    Huffman(HuffmanArtifact),
    RleGrayscale(RleGrayscaleArtifact),
    RleBitPlane(RleBitPlaneArtifact),
}

impl CompressedArtifact {
    pub fn scheme(&self) -> Scheme {
        match self {
            CompressedArtifact::Huffman(_) => Scheme::Huffman,
            CompressedArtifact::RleGrayscale(_) => Scheme::RleGrayscale,
            CompressedArtifact::RleBitPlane(_) => Scheme::RleBitPlane,
        }
    }

    pub fn header(&self) -> &Header {
        match self {
            CompressedArtifact::Huffman(a) => &a.header,
            CompressedArtifact::RleGrayscale(a) => &a.header,
            CompressedArtifact::RleBitPlane(a) => &a.header,
        }
    }

    pub fn dimensions(&self) -> Result<(u32, u32), CodecError> {
        self.header().dimensions()
    }

    /// Total size of all segments in bytes.
    pub fn compressed_len(&self) -> usize {
        let payload = match self {
            CompressedArtifact::Huffman(a) => a.table.len() + a.bits.len(),
            CompressedArtifact::RleGrayscale(a) => a.runs.len(),
            CompressedArtifact::RleBitPlane(a) => a.planes.iter().map(Vec::len).sum(),
        };
        self.header().encoded_len() + payload
    }

    /// Original size divided by compressed size, in each scheme's own units.
    ///
    /// - Huffman: `W*H*8` bits over code bits plus header bits. The
    ///   frequency table is not counted.
    /// - RLE grayscale: `W*H` bytes over header and run bytes.
    /// - RLE bit-plane: `8*W*H` plane bits over header and stream bytes.
    pub fn compression_ratio(&self) -> Result<f64, CodecError> {
        let (width, height) = self.dimensions()?;
        let pixels = width as f64 * height as f64;
        let header = self.header().encoded_len() as f64;

        let (original, compressed) = match self {
            CompressedArtifact::Huffman(a) => (pixels * 8.0, a.bit_len as f64 + header * 8.0),
            CompressedArtifact::RleGrayscale(a) => (pixels, header + a.runs.len() as f64),
            CompressedArtifact::RleBitPlane(a) => {
                let streams: usize = a.planes.iter().map(Vec::len).sum();
                (pixels * PLANE_COUNT as f64, header + streams as f64)
            }
        };
        Ok(original / compressed)
    }
}
