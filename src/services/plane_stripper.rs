use std::path::Path;

use gray_codec::bitplane::{self, PLANE_COUNT};
use gray_codec::PixelGrid;

use crate::error::AppError;
use crate::imaging;

/// Clear the given bit-planes (0 = least significant) in a PNG and save the result.
pub fn strip_planes(input: &Path, output: &Path, planes: &[u8]) -> Result<PixelGrid, AppError> {
    let grid = imaging::load_grayscale(input)?;
    let stripped = bitplane::remove_planes(&grid, planes)?;
    imaging::save_grayscale(output, &stripped)?;

    let kept = PLANE_COUNT - count_distinct(planes);
    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        ?planes,
        kept,
        "Stripped bit-planes"
    );
    Ok(stripped)
}

fn count_distinct(planes: &[u8]) -> usize {
    let mut seen = [false; PLANE_COUNT];
    for &plane in planes {
        if let Some(slot) = seen.get_mut(plane as usize) {
            *slot = true;
        }
    }
    seen.iter().filter(|&&s| s).count()
}
