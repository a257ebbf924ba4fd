//! Scheme selection and the trait every codec implements.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::api::CodecError;
use crate::artifact::CompressedArtifact;
use crate::grid::{PixelGrid, PixelSource};

/// The three interchangeable compression schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// Run-length coding of raw intensity bytes.
    RleGrayscale,
    /// Run-length coding of each of the eight bit-planes.
    RleBitPlane,
    /// Huffman coding of intensity bytes.
    Huffman,
}

impl Scheme {
    /// Every scheme, in menu order.
    pub const ALL: [Scheme; 3] = [Scheme::RleGrayscale, Scheme::RleBitPlane, Scheme::Huffman];

    /// Stable lowercase name, used in config files and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Scheme::RleGrayscale => "rle-grayscale",
            Scheme::RleBitPlane => "rle-bitplane",
            Scheme::Huffman => "huffman",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned by [`Scheme::from_str`] for an unknown name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown compression scheme '{0}' (expected rle-grayscale, rle-bitplane or huffman)")]
pub struct ParseSchemeError(pub String);

impl FromStr for Scheme {
    type Err = ParseSchemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scheme::ALL
            .into_iter()
            .find(|scheme| scheme.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseSchemeError(s.to_string()))
    }
}

/// A lossless grayscale codec.
///
/// Implementations hold no state between calls: every `compress` builds its
/// working structures from scratch, and the artifact is the only thing that
/// must survive until `decompress`.
pub trait Codec {
    /// The scheme whose artifacts this codec reads and writes.
    fn scheme(&self) -> Scheme;

    /// Compress a non-empty grayscale image.
    fn compress(&self, source: &dyn PixelSource) -> Result<CompressedArtifact, CodecError>;

    /// Rebuild the exact image. Fails with
    /// [`CodecError::SchemeMismatch`] for another scheme's artifact.
    fn decompress(&self, artifact: &CompressedArtifact) -> Result<PixelGrid, CodecError>;
}
