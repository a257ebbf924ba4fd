//! Run-length coding of the eight bit-planes.
//!
//! Each plane becomes a byte stream of run lengths with implicit,
//! alternating colour. Streams start on a white (`true`) run; a plane that
//! starts with `false` gets a leading `0` byte, an empty white run. Long runs
//! are written as their saturating varint with a `0` byte (an empty run of
//! the opposite colour) after every saturation byte:
//!
//! ```text
//! [1, 1, 0, 0, 1]   -> [2, 2, 1]
//! [0, 1, 0, 1]      -> [0, 1, 1, 1, 1]
//! 300 x true        -> [255, 0, 45]
//! ```
//!
//! The decoder treats every byte as one run of the current colour and
//! flips after it.

use super::runs;
use crate::api::{Codec, CodecError, Scheme};
use crate::artifact::{CompressedArtifact, Header, RleBitPlaneArtifact};
use crate::bitplane::{self, PLANE_COUNT};
use crate::grid::{pixel_count, traversal, PixelGrid, PixelSource};
use crate::varint;

/// Run-length codec over bit-planes.
#[derive(Debug, Clone, Copy, Default)]
pub struct RleBitPlaneCodec;

impl RleBitPlaneCodec {
    /// Encode one plane into an alternating-run stream.
    pub fn encode_plane(plane: &[bool]) -> Vec<u8> {
        let mut out = Vec::new();
        if plane.first() == Some(&false) {
            out.push(0);
        }
        for (_, len) in runs(plane) {
            let bytes = varint::encode(len as u64);
            let last = bytes.len() - 1;
            for (i, byte) in bytes.into_iter().enumerate() {
                out.push(byte);
                if i < last {
                    out.push(0);
                }
            }
        }
        out
    }

    /// Replay an alternating-run stream into exactly `pixel_count` bits.
    pub fn decode_plane(stream: &[u8], pixel_count: usize) -> Result<Vec<bool>, CodecError> {
        let mut out = Vec::with_capacity(pixel_count);
        let mut bit = true;
        for &len in stream {
            let len = len as usize;
            if out.len() + len > pixel_count {
                return Err(CodecError::malformed(format!(
                    "plane runs overflow the {pixel_count}-pixel image"
                )));
            }
            out.resize(out.len() + len, bit);
            bit = !bit;
        }

        if out.len() != pixel_count {
            return Err(CodecError::malformed(format!(
                "plane runs cover {} of {} pixels",
                out.len(),
                pixel_count
            )));
        }
        Ok(out)
    }
}

impl Codec for RleBitPlaneCodec {
    fn scheme(&self) -> Scheme {
        Scheme::RleBitPlane
    }

    fn compress(&self, source: &dyn PixelSource) -> Result<CompressedArtifact, CodecError> {
        let (width, height) = (source.width(), source.height());
        pixel_count(width, height)?;

        let planes = bitplane::extract(&traversal::column_major(source));
        Ok(CompressedArtifact::RleBitPlane(RleBitPlaneArtifact {
            header: Header::new(width, height),
            planes: std::array::from_fn(|i| Self::encode_plane(&planes[i])),
        }))
    }

    fn decompress(&self, artifact: &CompressedArtifact) -> Result<PixelGrid, CodecError> {
        let CompressedArtifact::RleBitPlane(artifact) = artifact else {
            return Err(CodecError::SchemeMismatch {
                expected: self.scheme(),
                found: artifact.scheme(),
            });
        };

        let (width, height) = artifact.header.dimensions()?;
        let count = pixel_count(width, height)?;

        let mut planes: [Vec<bool>; PLANE_COUNT] = Default::default();
        for (plane, stream) in planes.iter_mut().zip(&artifact.planes) {
            *plane = Self::decode_plane(stream, count)?;
        }
        traversal::from_column_major(width, height, &bitplane::recombine(&planes)?)
    }
}
