//! The fixed pixel order shared by every encoder and decoder.
//!
//! Pixels are visited column by column: x is the outer loop, y the inner
//! loop. Encode and decode must agree on this order or the image comes back
//! transposed.

use super::{PixelGrid, PixelSink, PixelSource};
use crate::api::CodecError;

/// Flatten a source into column-major order.
pub fn column_major(source: &dyn PixelSource) -> Vec<u8> {
    let (width, height) = (source.width(), source.height());
    let mut out = Vec::with_capacity(width as usize * height as usize);
    for x in 0..width {
        for y in 0..height {
            out.push(source.intensity(x, y));
        }
    }
    out
}

/// Rebuild a grid from column-major intensities.
pub fn from_column_major(width: u32, height: u32, values: &[u8]) -> Result<PixelGrid, CodecError> {
    let mut grid = PixelGrid::new(width, height)?;
    if values.len() != grid.len() {
        return Err(CodecError::malformed(format!(
            "decoded {} pixels for a {}x{} image",
            values.len(),
            width,
            height
        )));
    }
    let mut values = values.iter();
    for x in 0..width {
        for y in 0..height {
            if let Some(&v) = values.next() {
                grid.set_intensity(x, y, v);
            }
        }
    }
    Ok(grid)
}
