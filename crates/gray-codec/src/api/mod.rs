//! Public API for the gray-codec crate.
//!
//! This module provides the [`Compressor`] facade, the [`Codec`] trait
//! and [`Scheme`] selector, and the [`CodecError`] error type.

mod compressor;
mod error;
mod scheme;

pub use compressor::{Compressed, Compressor, Decompressed};
pub use error::CodecError;
pub use scheme::{Codec, ParseSchemeError, Scheme};
