//! Intensity frequency table and its serialized form.
//!
//! The decoder rebuilds the exact same tree from this table, so it travels
//! with every Huffman artifact:
//!
//! ```text
//! [32-byte presence bitmap][u32 big-endian count for each present symbol]
//! ```
//!
//! Bit `s % 8` of bitmap byte `s / 8` (least significant first) marks symbol
//! `s` as present. Counts follow in ascending symbol order.

use crate::api::CodecError;

const SYMBOLS: usize = 256;
const BITMAP_LEN: usize = SYMBOLS / 8;

/// Occurrence count for each of the 256 intensities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u32; SYMBOLS],
}

impl FrequencyTable {
    /// Count intensities.
    ///
    /// Callers guarantee fewer than `u32::MAX` values (see
    /// [`PixelGrid::new`](crate::PixelGrid::new)).
    pub fn from_intensities(intensities: &[u8]) -> Self {
        let mut counts = [0u32; SYMBOLS];
        for &v in intensities {
            counts[v as usize] += 1;
        }
        Self { counts }
    }

    pub fn from_counts(counts: [u32; SYMBOLS]) -> Self {
        Self { counts }
    }

    #[inline]
    pub fn get(&self, symbol: u8) -> u32 {
        self.counts[symbol as usize]
    }

    /// Sum of all counts, i.e. the pixel count.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }

    /// Number of intensities that occur at least once.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// `(symbol, count)` for every present symbol, ascending by symbol.
    pub fn present(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(|(s, &c)| (s as u8, c))
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = vec![0u8; BITMAP_LEN];
        for (symbol, _) in self.present() {
            out[symbol as usize / 8] |= 1 << (symbol % 8);
        }
        for (_, count) in self.present() {
            out.extend_from_slice(&count.to_be_bytes());
        }
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        if bytes.len() < BITMAP_LEN {
            return Err(CodecError::malformed("frequency table bitmap truncated"));
        }
        let (bitmap, mut rest) = bytes.split_at(BITMAP_LEN);

        let mut counts = [0u32; SYMBOLS];
        for (symbol, count) in counts.iter_mut().enumerate() {
            if bitmap[symbol / 8] & (1 << (symbol % 8)) == 0 {
                continue;
            }
            let Some((chunk, tail)) = rest.split_first_chunk::<4>() else {
                return Err(CodecError::malformed("frequency table counts truncated"));
            };
            *count = u32::from_be_bytes(*chunk);
            if *count == 0 {
                return Err(CodecError::malformed(format!(
                    "intensity {symbol} marked present with a zero count"
                )));
            }
            rest = tail;
        }

        if !rest.is_empty() {
            return Err(CodecError::malformed("trailing bytes after frequency table"));
        }
        Ok(Self { counts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let table = FrequencyTable::from_intensities(&[3, 3, 3, 9]);
        assert_eq!(table.get(3), 3);
        assert_eq!(table.get(9), 1);
        assert_eq!(table.get(0), 0);
        assert_eq!(table.total(), 4);
        assert_eq!(table.distinct(), 2);
        assert_eq!(table.present().collect::<Vec<_>>(), vec![(3, 3), (9, 1)]);
    }

    #[test]
    fn test_serialized_layout() {
        let table = FrequencyTable::from_intensities(&[0, 0, 9, 255]);
        let bytes = table.to_bytes();

        assert_eq!(bytes.len(), 32 + 3 * 4);
        assert_eq!(bytes[0], 0b0000_0001);
        assert_eq!(bytes[1], 0b0000_0010);
        assert_eq!(bytes[31], 0b1000_0000);
        assert_eq!(&bytes[32..36], &[0, 0, 0, 2]);
        assert_eq!(FrequencyTable::from_bytes(&bytes).unwrap(), table);
    }

    #[test]
    fn test_from_bytes_truncated() {
        let bytes = FrequencyTable::from_intensities(&[1, 2]).to_bytes();
        assert!(FrequencyTable::from_bytes(&bytes[..10]).is_err());
        assert!(FrequencyTable::from_bytes(&bytes[..bytes.len() - 1]).is_err());
    }

    #[test]
    fn test_from_bytes_trailing() {
        let mut bytes = FrequencyTable::from_intensities(&[1]).to_bytes();
        bytes.push(0);
        assert!(FrequencyTable::from_bytes(&bytes).is_err());
    }

    #[test]
    fn test_from_bytes_zero_count() {
        let mut bytes = vec![0u8; 32];
        bytes[0] = 1;
        bytes.extend_from_slice(&[0, 0, 0, 0]);
        assert!(FrequencyTable::from_bytes(&bytes).is_err());
    }
}
