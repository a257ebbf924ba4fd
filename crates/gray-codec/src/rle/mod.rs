//! Run-length codecs.
//!
//! Two flavours share the run scanner below:
//!
//! - [`RleGrayscaleCodec`]: runs of equal intensity bytes, each stored as a
//!   `(length, intensity)` pair.
//! - [`RleBitPlaneCodec`]: runs of equal bits within each of the eight
//!   bit-planes, stored as alternating-colour run lengths.

mod bitplane;
mod grayscale;

pub use bitplane::RleBitPlaneCodec;
pub use grayscale::RleGrayscaleCodec;

/// Iterator over maximal runs of equal values, yielding `(value, length)`.
pub(crate) struct Runs<'a, T> {
    values: &'a [T],
}

impl<'a, T: PartialEq + Copy> Iterator for Runs<'a, T> {
    type Item = (T, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (&first, _) = self.values.split_first()?;
        let len = self
            .values
            .iter()
            .position(|&v| v != first)
            .unwrap_or(self.values.len());
        self.values = &self.values[len..];
        Some((first, len))
    }
}

pub(crate) fn runs<T: PartialEq + Copy>(values: &[T]) -> Runs<'_, T> {
    Runs { values }
}
