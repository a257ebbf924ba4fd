//! Grayscale pixel grids and the traversal order the codecs share.

mod pixel_grid;
pub mod traversal;

pub use pixel_grid::{PixelGrid, PixelSink, PixelSource};
pub(crate) use pixel_grid::pixel_count;
