//! Bit-plane decomposition of 8-bit intensities.
//!
//! Plane `i` holds bit `i` of every pixel, so plane 0 is the least
//! significant bit and plane 7 the most significant. The extractor, the
//! bit-plane run-length codec and [`recombine`] all use this numbering.

use crate::api::CodecError;
use crate::grid::{PixelGrid, PixelSink, PixelSource};

/// Number of planes in an 8-bit image.
pub const PLANE_COUNT: usize = 8;

/// Split intensities into eight boolean planes, preserving pixel order.
pub fn extract(intensities: &[u8]) -> [Vec<bool>; PLANE_COUNT] {
    std::array::from_fn(|plane| {
        intensities
            .iter()
            .map(|&v| (v >> plane) & 1 == 1)
            .collect()
    })
}

/// Reassemble intensities from eight planes of equal length.
pub fn recombine(planes: &[Vec<bool>; PLANE_COUNT]) -> Result<Vec<u8>, CodecError> {
    let len = planes[0].len();
    if planes.iter().any(|p| p.len() != len) {
        return Err(CodecError::malformed("bit-planes differ in length"));
    }

    let mut out = vec![0u8; len];
    for (index, plane) in planes.iter().enumerate() {
        for (value, &bit) in out.iter_mut().zip(plane) {
            if bit {
                *value |= 1 << index;
            }
        }
    }
    Ok(out)
}

/// Clear the given planes from every pixel.
///
/// Plane indices are 0-based. An empty list returns an unchanged copy.
pub fn remove_planes(source: &dyn PixelSource, planes: &[u8]) -> Result<PixelGrid, CodecError> {
    let mut mask = u8::MAX;
    for &plane in planes {
        if plane as usize >= PLANE_COUNT {
            return Err(CodecError::InvalidBitPlane(plane));
        }
        mask &= !(1 << plane);
    }

    let mut grid = PixelGrid::new(source.width(), source.height())?;
    for x in 0..source.width() {
        for y in 0..source.height() {
            grid.set_intensity(x, y, source.intensity(x, y) & mask);
        }
    }
    Ok(grid)
}
