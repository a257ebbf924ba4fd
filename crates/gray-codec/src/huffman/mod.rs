//! Huffman coding of intensity bytes.
//!
//! # Pipeline
//!
//! ```text
//! intensities -> FrequencyTable -> build_tree -> generate_codes -> BitWriter
//!                     |                                               |
//!                 to_bytes()                                   (bits, bit_len)
//!                     |                                               |
//!                     +------------------> HuffmanArtifact <----------+
//! ```
//!
//! Decoding reverses the left half: the serialized table is parsed, the
//! tree rebuilt, and the bit-stream read back with a [`HuffmanDecoder`].

mod bitstream;
mod codec;
mod codes;
mod frequency;
mod tree;

pub use bitstream::{BitReader, BitWriter};
pub use codec::{HuffmanCodec, HuffmanDecoder};
pub use codes::{generate_codes, CodeTable, PrefixCode, MAX_CODE_LEN};
pub use frequency::FrequencyTable;
pub use tree::{build_tree, HuffmanNode};
