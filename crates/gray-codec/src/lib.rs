//! gray-codec: lossless compression for 8-bit grayscale images
//!
//! Three interchangeable schemes share one contract: `compress(image)`
//! yields a [`CompressedArtifact`] and a compression ratio, and
//! `decompress(artifact)` yields the identical image back.
//!
//! # Quick Start
//!
//! The [`Compressor`] facade is the primary entry point:
//!
//! ```
//! use gray_codec::{Compressor, PixelGrid, Scheme};
//!
//! let grid = PixelGrid::from_raw(4, 1, vec![0, 0, 0, 255]).unwrap();
//!
//! let compressor = Compressor::new(Scheme::Huffman);
//! let compressed = compressor.compress(&grid).unwrap();
//! let restored = compressor.decompress(&compressed.artifact).unwrap();
//!
//! assert_eq!(restored.grid, grid);
//! ```
//!
//! # Schemes
//!
//! | Scheme | Payload | Good at |
//! |--------|---------|---------|
//! | [`Scheme::RleGrayscale`] | `(length, intensity)` byte pairs | flat regions |
//! | [`Scheme::RleBitPlane`] | alternating run lengths per bit-plane | images with few grey levels |
//! | [`Scheme::Huffman`] | frequency table + packed prefix codes | skewed histograms |
//!
//! # Pixel Order
//!
//! All codecs flatten the image column by column (x outer, y inner) and
//! rebuild it in the same order; see [`grid::traversal`].
//!
//! # Image Surfaces
//!
//! Compression reads through the [`PixelSource`] trait, so any grayscale
//! surface can be compressed without copying it into a [`PixelGrid`]
//! first. Decoded images are always returned as [`PixelGrid`].

pub mod api;
pub mod artifact;
pub mod bitplane;
pub mod grid;
pub mod huffman;
pub mod rle;
pub mod varint;

#[cfg(test)]
mod domain_tests;

pub use api::{Codec, CodecError, Compressed, Compressor, Decompressed, ParseSchemeError, Scheme};
pub use artifact::{CompressedArtifact, Header};
pub use grid::{PixelGrid, PixelSink, PixelSource};
pub use huffman::{HuffmanCodec, HuffmanDecoder};
pub use rle::{RleBitPlaneCodec, RleGrayscaleCodec};
