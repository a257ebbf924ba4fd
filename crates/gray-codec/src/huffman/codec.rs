//! Huffman codec: frequency table, tree, codes, packed bit-stream.
//!
//! The artifact carries the frequency table rather than the codes. The
//! decoder rebuilds the identical tree from it (tie-breaking is
//! deterministic) and then reads the bit-stream with one of two
//! equivalent strategies, see [`HuffmanDecoder`].

use std::collections::HashMap;

use super::bitstream::{BitReader, BitWriter};
use super::{build_tree, generate_codes, CodeTable, FrequencyTable, HuffmanNode};
use crate::api::{Codec, CodecError, Scheme};
use crate::artifact::{CompressedArtifact, Header, HuffmanArtifact};
use crate::grid::{pixel_count, traversal, PixelGrid, PixelSource};

/// How the decoder turns bits back into intensities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HuffmanDecoder {
    /// Grow a candidate code one bit at a time (lengths 1, 2, 3, ...) and look
    /// each `(length, value)` pair up in a reverse code table. The
    /// prefix-free property makes the first hit the right one.
    #[default]
    LengthScan,
    /// Walk the rebuilt tree from the root, one bit per edge.
    TreeWalk,
}

/// Frequency-driven prefix-code codec over intensity bytes.
///
/// # Example
///
/// ```
/// use gray_codec::{Codec, HuffmanCodec, HuffmanDecoder, PixelGrid};
///
/// let grid = PixelGrid::from_raw(2, 2, vec![8, 8, 8, 200]).unwrap();
/// let codec = HuffmanCodec::new().decoder(HuffmanDecoder::TreeWalk);
///
/// let artifact = codec.compress(&grid).unwrap();
/// assert_eq!(codec.decompress(&artifact).unwrap(), grid);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HuffmanCodec {
    decoder: HuffmanDecoder,
}

impl HuffmanCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the decoding strategy.
    #[inline]
    pub fn decoder(mut self, decoder: HuffmanDecoder) -> Self {
        self.decoder = decoder;
        self
    }

    /// Append each intensity's code to one bit-stream.
    ///
    /// Fails with [`CodecError::MalformedArtifact`] if `codes` has no entry
    /// for one of the intensities.
    pub fn encode(intensities: &[u8], codes: &CodeTable) -> Result<(Vec<u8>, u64), CodecError> {
        let mut total_bits = 0u64;
        for &v in intensities {
            let code = codes.get(v).ok_or_else(|| missing_code(v))?;
            total_bits += code.len as u64;
        }
        let mut writer = BitWriter::with_capacity_bits(total_bits);
        for &v in intensities {
            writer.push_code(codes.get(v).ok_or_else(|| missing_code(v))?);
        }
        Ok(writer.finish())
    }
}

fn missing_code(intensity: u8) -> CodecError {
    CodecError::malformed(format!("code table has no entry for intensity {intensity}"))
}

impl Codec for HuffmanCodec {
    fn scheme(&self) -> Scheme {
        Scheme::Huffman
    }

    fn compress(&self, source: &dyn PixelSource) -> Result<CompressedArtifact, CodecError> {
        let (width, height) = (source.width(), source.height());
        pixel_count(width, height)?;

        let intensities = traversal::column_major(source);
        let frequencies = FrequencyTable::from_intensities(&intensities);
        let root = build_tree(&frequencies).ok_or(CodecError::EmptyImage)?;
        let codes = generate_codes(&root);

        let (bits, bit_len) = Self::encode(&intensities, &codes)?;
        tracing::trace!(
            symbols = codes.len(),
            max_code_len = codes.max_len(),
            bit_len,
            "Huffman stream encoded"
        );

        Ok(CompressedArtifact::Huffman(HuffmanArtifact {
            header: Header::new(width, height),
            table: frequencies.to_bytes(),
            bits,
            bit_len,
        }))
    }

    fn decompress(&self, artifact: &CompressedArtifact) -> Result<PixelGrid, CodecError> {
        let CompressedArtifact::Huffman(artifact) = artifact else {
            return Err(CodecError::SchemeMismatch {
                expected: self.scheme(),
                found: artifact.scheme(),
            });
        };

        let (width, height) = artifact.header.dimensions()?;
        let count = pixel_count(width, height)?;

        let frequencies = FrequencyTable::from_bytes(&artifact.table)?;
        let root = build_tree(&frequencies).ok_or(CodecError::EmptyImage)?;
        if frequencies.total() != count as u64 {
            return Err(CodecError::malformed(format!(
                "frequency table counts {} pixels, header says {}",
                frequencies.total(),
                count
            )));
        }
        if artifact.bits.len() as u64 != artifact.bit_len.div_ceil(8) {
            return Err(CodecError::malformed(format!(
                "{} packed bytes cannot hold exactly {} bits",
                artifact.bits.len(),
                artifact.bit_len
            )));
        }

        let values = if let HuffmanNode::Leaf { symbol, .. } = root {
            // One intensity, one bit per pixel: nothing to scan
            if artifact.bit_len != count as u64 {
                return Err(CodecError::malformed(format!(
                    "single-intensity stream has {} bits for {} pixels",
                    artifact.bit_len, count
                )));
            }
            vec![symbol; count]
        } else {
            let mut reader = BitReader::new(&artifact.bits, artifact.bit_len);
            let values = match self.decoder {
                HuffmanDecoder::LengthScan => {
                    scan_decode(&generate_codes(&root), &mut reader, count)?
                }
                HuffmanDecoder::TreeWalk => walk_decode(&root, &mut reader, count)?,
            };
            if reader.remaining() != 0 {
                return Err(CodecError::malformed(format!(
                    "{} unused bits after the last pixel",
                    reader.remaining()
                )));
            }
            values
        };

        traversal::from_column_major(width, height, &values)
    }
}

fn exhausted(decoded: usize, count: usize) -> CodecError {
    CodecError::malformed(format!(
        "bit-stream exhausted after {decoded} of {count} pixels"
    ))
}

/// Decode by trying candidate lengths 1, 2, 3, ... against a
/// `(length, value) -> intensity` lookup.
///
/// Giving up after the longest code in the table reports
/// [`CodecError::UnmatchedCode`].
pub(crate) fn scan_decode(
    codes: &CodeTable,
    reader: &mut BitReader<'_>,
    count: usize,
) -> Result<Vec<u8>, CodecError> {
    let lookup: HashMap<(u8, u64), u8> = codes
        .iter()
        .map(|(symbol, code)| ((code.len, code.value), symbol))
        .collect();
    let max_len = codes.max_len();

    let mut out = Vec::with_capacity(count);
    while out.len() < count {
        let offset = reader.position();
        let (mut value, mut len) = (0u64, 0u8);
        loop {
            if len >= max_len {
                return Err(CodecError::UnmatchedCode { bits: len, offset });
            }
            let bit = reader
                .read_bit()
                .ok_or_else(|| exhausted(out.len(), count))?;
            value = (value << 1) | bit as u64;
            len += 1;
            if let Some(&symbol) = lookup.get(&(len, value)) {
                out.push(symbol);
                break;
            }
        }
    }
    Ok(out)
}

/// Decode by walking the tree, left on `0`, right on `1`.
pub(crate) fn walk_decode(
    root: &HuffmanNode,
    reader: &mut BitReader<'_>,
    count: usize,
) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::with_capacity(count);
    while out.len() < count {
        let mut node = root;
        loop {
            match node {
                HuffmanNode::Leaf { symbol, .. } => {
                    out.push(*symbol);
                    break;
                }
                HuffmanNode::Internal { left, right, .. } => {
                    let bit = reader
                        .read_bit()
                        .ok_or_else(|| exhausted(out.len(), count))?;
                    node = if bit { right } else { left };
                }
            }
        }
    }
    Ok(out)
}
