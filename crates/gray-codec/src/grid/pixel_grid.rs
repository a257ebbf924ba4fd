//! PixelGrid: the owned single-channel image the codecs produce.

use crate::api::CodecError;

/// Read access to a grayscale image.
///
/// Any image surface can be compressed as long as it can report its
/// dimensions and hand out one byte-valued intensity per coordinate.
pub trait PixelSource {
    /// Width in pixels.
    fn width(&self) -> u32;
    /// Height in pixels.
    fn height(&self) -> u32;
    /// Intensity at `(x, y)`. Callers stay within `width() x height()`.
    fn intensity(&self, x: u32, y: u32) -> u8;
}

/// Write access used to construct decoded images.
pub trait PixelSink {
    fn set_intensity(&mut self, x: u32, y: u32, value: u8);
}

/// An 8-bit grayscale image stored row-major.
///
/// # Example
///
/// ```
/// use gray_codec::{PixelGrid, PixelSink, PixelSource};
///
/// let mut grid = PixelGrid::new(3, 2).unwrap();
/// grid.set_intensity(2, 1, 200);
///
/// assert_eq!(grid.intensity(2, 1), 200);
/// assert_eq!(grid.as_raw(), &[0, 0, 0, 0, 0, 200]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    /// One intensity per pixel, row-major.
    data: Vec<u8>,
}

impl PixelGrid {
    /// Create a black grid.
    pub fn new(width: u32, height: u32) -> Result<Self, CodecError> {
        let len = pixel_count(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![0; len],
        })
    }

    /// Wrap an existing row-major buffer.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, CodecError> {
        let len = pixel_count(width, height)?;
        if data.len() != len {
            return Err(CodecError::InvalidDimensions {
                width: width as u64,
                height: height as u64,
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Copy any [`PixelSource`] into an owned grid.
    pub fn from_source(source: &dyn PixelSource) -> Result<Self, CodecError> {
        let mut grid = Self::new(source.width(), source.height())?;
        for y in 0..grid.height {
            for x in 0..grid.width {
                grid.set_intensity(x, y, source.intensity(x, y));
            }
        }
        Ok(grid)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false for a constructed grid; provided for API symmetry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row-major intensities.
    #[inline]
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// First coordinate where two grids differ, or `None` when they match.
    ///
    /// Grids of different dimensions report `(0, 0)`.
    pub fn first_mismatch(&self, other: &PixelGrid) -> Option<(u32, u32)> {
        if self.width != other.width || self.height != other.height {
            return Some((0, 0));
        }
        self.data
            .iter()
            .zip(&other.data)
            .position(|(a, b)| a != b)
            .map(|i| ((i % self.width as usize) as u32, (i / self.width as usize) as u32))
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl PixelSource for PixelGrid {
    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn intensity(&self, x: u32, y: u32) -> u8 {
        self.data[self.offset(x, y)]
    }
}

impl PixelSink for PixelGrid {
    #[inline]
    fn set_intensity(&mut self, x: u32, y: u32, value: u8) {
        let offset = self.offset(x, y);
        self.data[offset] = value;
    }
}

/// Validate dimensions and return the pixel count.
///
/// The count must fit in u32 because per-intensity frequencies are stored
/// as u32 in the Huffman table.
pub(crate) fn pixel_count(width: u32, height: u32) -> Result<usize, CodecError> {
    let invalid = || CodecError::InvalidDimensions {
        width: width as u64,
        height: height as u64,
    };
    if width == 0 || height == 0 {
        return Err(invalid());
    }
    let count = (width as u64) * (height as u64);
    if count > u32::MAX as u64 {
        return Err(invalid());
    }
    usize::try_from(count).map_err(|_| invalid())
}
