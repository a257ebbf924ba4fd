//! Compressor facade -- the primary entry point for the crate.
//!
//! [`Compressor`] picks a codec for the configured [`Scheme`], times each
//! call and reports the compression ratio alongside the artifact.

use std::time::Instant;

use super::{Codec, CodecError, Scheme};
use crate::artifact::CompressedArtifact;
use crate::grid::{PixelGrid, PixelSource};
use crate::huffman::{HuffmanCodec, HuffmanDecoder};
use crate::rle::{RleBitPlaneCodec, RleGrayscaleCodec};

/// Result of [`Compressor::compress`].
#[derive(Debug, Clone)]
pub struct Compressed {
    pub artifact: CompressedArtifact,
    /// See [`CompressedArtifact::compression_ratio`].
    pub ratio: f64,
    /// Wall-clock time spent compressing.
    pub elapsed_nanos: u64,
}

/// Result of [`Compressor::decompress`].
#[derive(Debug, Clone)]
pub struct Decompressed {
    pub grid: PixelGrid,
    /// Wall-clock time spent decompressing.
    pub elapsed_nanos: u64,
}

/// Uniform entry point over the three codecs.
///
/// The facade is a cheap value: it holds configuration only, so one
/// instance can be shared or cloned across threads, each call owning its
/// own working state.
///
/// # Example
///
/// ```
/// use gray_codec::{Compressor, PixelGrid, Scheme};
///
/// let grid = PixelGrid::from_raw(2, 2, vec![10, 20, 10, 20]).unwrap();
/// let compressor = Compressor::new(Scheme::RleGrayscale);
///
/// let compressed = compressor.compress(&grid).unwrap();
/// assert!(compressed.ratio > 0.0);
///
/// let decompressed = compressor.decompress(&compressed.artifact).unwrap();
/// assert_eq!(decompressed.grid, grid);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Compressor {
    scheme: Scheme,
    huffman_decoder: HuffmanDecoder,
}

impl Compressor {
    pub fn new(scheme: Scheme) -> Self {
        Self {
            scheme,
            huffman_decoder: HuffmanDecoder::default(),
        }
    }

    /// Set the Huffman decoding strategy.
    #[inline]
    pub fn huffman_decoder(mut self, decoder: HuffmanDecoder) -> Self {
        self.huffman_decoder = decoder;
        self
    }

    #[inline]
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    fn codec(&self, scheme: Scheme) -> Box<dyn Codec> {
        match scheme {
            Scheme::RleGrayscale => Box::new(RleGrayscaleCodec),
            Scheme::RleBitPlane => Box::new(RleBitPlaneCodec),
            Scheme::Huffman => Box::new(HuffmanCodec::new().decoder(self.huffman_decoder)),
        }
    }

    /// Compress with the configured scheme.
    pub fn compress(&self, source: &dyn PixelSource) -> Result<Compressed, CodecError> {
        let start = Instant::now();
        let artifact = self.codec(self.scheme).compress(source)?;
        let ratio = artifact.compression_ratio()?;
        let elapsed_nanos = elapsed_nanos(start);

        tracing::debug!(
            scheme = %self.scheme,
            width = source.width(),
            height = source.height(),
            compressed_bytes = artifact.compressed_len(),
            ratio,
            elapsed_nanos,
            "Compressed image"
        );

        Ok(Compressed {
            artifact,
            ratio,
            elapsed_nanos,
        })
    }

    /// Decompress an artifact of any scheme.
    ///
    /// Dispatch follows the artifact's own tag, not the configured scheme.
    pub fn decompress(&self, artifact: &CompressedArtifact) -> Result<Decompressed, CodecError> {
        let start = Instant::now();
        let result = self.codec(artifact.scheme()).decompress(artifact);
        let elapsed_nanos = elapsed_nanos(start);

        match result {
            Ok(grid) => {
                tracing::debug!(
                    scheme = %artifact.scheme(),
                    width = grid.width(),
                    height = grid.height(),
                    elapsed_nanos,
                    "Decompressed image"
                );
                Ok(Decompressed {
                    grid,
                    elapsed_nanos,
                })
            }
            Err(e) => {
                tracing::warn!(scheme = %artifact.scheme(), error = %e, "Decompression failed");
                Err(e)
            }
        }
    }
}

fn elapsed_nanos(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_nanos()).unwrap_or(u64::MAX)
}
