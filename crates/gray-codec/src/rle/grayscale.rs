//! Run-length coding of raw intensity bytes.
//!
//! Each maximal run becomes `(length, intensity)`. Runs longer than 255 are
//! split into consecutive runs of the same intensity, so every length fits
//! in one byte and the decoder reads exactly one pair per run. A run of
//! 300 therefore becomes `(255, v) (45, v)`, which is the run's saturating
//! varint with the intensity repeated after each byte.

use super::runs;
use crate::api::{Codec, CodecError, Scheme};
use crate::artifact::{CompressedArtifact, Header, RleGrayscaleArtifact};
use crate::grid::{pixel_count, traversal, PixelGrid, PixelSource};

const MAX_RUN: usize = u8::MAX as usize;

/// Run-length codec over grayscale intensities.
#[derive(Debug, Clone, Copy, Default)]
pub struct RleGrayscaleCodec;

impl RleGrayscaleCodec {
    /// Encode intensities (already in traversal order) into run pairs.
    pub fn encode(intensities: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        for (value, mut len) in runs(intensities) {
            while len > 0 {
                let chunk = len.min(MAX_RUN);
                out.push(chunk as u8);
                out.push(value);
                len -= chunk;
            }
        }
        out
    }

    /// Replay run pairs into exactly `pixel_count` intensities.
    pub fn decode(runs: &[u8], pixel_count: usize) -> Result<Vec<u8>, CodecError> {
        if runs.len() % 2 != 0 {
            return Err(CodecError::malformed(
                "run stream ends inside a (length, intensity) pair",
            ));
        }

        let mut out = Vec::with_capacity(pixel_count);
        for pair in runs.chunks_exact(2) {
            let (len, value) = (pair[0] as usize, pair[1]);
            if len == 0 {
                return Err(CodecError::malformed("zero-length intensity run"));
            }
            if out.len() + len > pixel_count {
                return Err(CodecError::malformed(format!(
                    "runs overflow the {pixel_count}-pixel image"
                )));
            }
            out.resize(out.len() + len, value);
        }

        if out.len() != pixel_count {
            return Err(CodecError::malformed(format!(
                "runs cover {} of {} pixels",
                out.len(),
                pixel_count
            )));
        }
        Ok(out)
    }
}

impl Codec for RleGrayscaleCodec {
    fn scheme(&self) -> Scheme {
        Scheme::RleGrayscale
    }

    fn compress(&self, source: &dyn PixelSource) -> Result<CompressedArtifact, CodecError> {
        let (width, height) = (source.width(), source.height());
        pixel_count(width, height)?;

        let intensities = traversal::column_major(source);
        Ok(CompressedArtifact::RleGrayscale(RleGrayscaleArtifact {
            header: Header::new(width, height),
            runs: Self::encode(&intensities),
        }))
    }

    fn decompress(&self, artifact: &CompressedArtifact) -> Result<PixelGrid, CodecError> {
        let CompressedArtifact::RleGrayscale(artifact) = artifact else {
            return Err(CodecError::SchemeMismatch {
                expected: self.scheme(),
                found: artifact.scheme(),
            });
        };

        let (width, height) = artifact.header.dimensions()?;
        let values = Self::decode(&artifact.runs, pixel_count(width, height)?)?;
        traversal::from_column_major(width, height, &values)
    }
}
