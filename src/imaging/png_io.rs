//! PNG loading and saving for grayscale grids.

use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::Path;

use gray_codec::PixelGrid;

use crate::error::AppError;

/// Load a PNG file as an 8-bit grayscale grid.
///
/// Palette images are expanded and 16-bit samples stripped to 8 bits.
/// Colour pixels are reduced with truncated luma weights (see [`luma`]);
/// alpha is ignored.
pub fn load_grayscale(path: &Path) -> Result<PixelGrid, AppError> {
    let file = File::open(path)?;
    read_grayscale(BufReader::new(file), path)
}

/// Decode an in-memory PNG as an 8-bit grayscale grid.
pub fn decode_grayscale(bytes: &[u8]) -> Result<PixelGrid, AppError> {
    read_grayscale(Cursor::new(bytes), Path::new("<memory>"))
}

fn read_grayscale<R: Read>(reader: R, origin: &Path) -> Result<PixelGrid, AppError> {
    let decode_error = |e: png::DecodingError| AppError::PngDecode {
        path: origin.to_path_buf(),
        message: e.to_string(),
    };

    let mut decoder = png::Decoder::new(reader);
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info().map_err(decode_error)?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).map_err(decode_error)?;
    if info.bit_depth != png::BitDepth::Eight {
        return Err(AppError::UnsupportedPng(format!(
            "{}: {:?} bit samples after expansion",
            origin.display(),
            info.bit_depth
        )));
    }

    let channels = match info.color_type {
        png::ColorType::Grayscale => 1,
        png::ColorType::GrayscaleAlpha => 2,
        png::ColorType::Rgb => 3,
        png::ColorType::Rgba => 4,
        png::ColorType::Indexed => {
            return Err(AppError::UnsupportedPng(format!(
                "{}: palette was not expanded",
                origin.display()
            )))
        }
    };

    let (width, height) = (info.width, info.height);
    let row_bytes = width as usize * channels;
    let mut data = Vec::with_capacity(width as usize * height as usize);
    for row in buf[..info.buffer_size()].chunks_exact(info.line_size) {
        for pixel in row[..row_bytes].chunks_exact(channels) {
            data.push(match channels {
                1 | 2 => pixel[0],
                _ => luma(pixel[0], pixel[1], pixel[2]),
            });
        }
    }

    tracing::debug!(
        path = %origin.display(),
        width,
        height,
        color = ?info.color_type,
        "Loaded PNG"
    );

    Ok(PixelGrid::from_raw(width, height, data)?)
}

/// Grayscale value of an RGB pixel: `⌊0.299R⌋ + ⌊0.587G⌋ + ⌊0.114B⌋`.
///
/// Each term is truncated separately, so pure white maps to 254.
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let red = (r as f64 * 0.299) as u32;
    let green = (g as f64 * 0.587) as u32;
    let blue = (b as f64 * 0.114) as u32;
    (red + green + blue).min(255) as u8
}

/// Encode a grid as an 8-bit grayscale PNG.
pub fn encode_grayscale(grid: &PixelGrid) -> Result<Vec<u8>, AppError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, grid.width(), grid.height());
        encoder.set_color(png::ColorType::Grayscale);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|e| AppError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(grid.as_raw())
            .map_err(|e| AppError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Write a grid to `path` as an 8-bit grayscale PNG.
pub fn save_grayscale(path: &Path, grid: &PixelGrid) -> Result<(), AppError> {
    let bytes = encode_grayscale(grid)?;
    std::fs::write(path, &bytes)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Wrote PNG");
    Ok(())
}
