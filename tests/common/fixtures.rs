//! Test fixtures: synthetic images and files on disk.

use std::path::{Path, PathBuf};

use gray_codec::PixelGrid;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Fixed seed so randomized fixtures are reproducible
pub const SEED: u64 = 0x5eed_cafe;

/// Horizontal ramp from black to white
pub fn gradient(width: u32, height: u32) -> PixelGrid {
    let step = (width - 1).max(1);
    let data = (0..height)
        .flat_map(|_| (0..width).map(move |x| (x * 255 / step) as u8))
        .collect();
    PixelGrid::from_raw(width, height, data).unwrap()
}

/// Uniformly random intensities
pub fn noise(width: u32, height: u32) -> PixelGrid {
    let mut rng = StdRng::seed_from_u64(SEED);
    let data = (0..width * height).map(|_| rng.gen()).collect();
    PixelGrid::from_raw(width, height, data).unwrap()
}

/// Two-tone image with long flat runs, typical of scanned text
pub fn scanned_page(width: u32, height: u32) -> PixelGrid {
    let mut rng = StdRng::seed_from_u64(SEED);
    let mut data = vec![255u8; (width * height) as usize];
    for _ in 0..(width * height / 200).max(1) {
        let start = rng.gen_range(0..data.len());
        let len = rng.gen_range(1..=12).min(data.len() - start);
        data[start..start + len].fill(0);
    }
    PixelGrid::from_raw(width, height, data).unwrap()
}

/// Every pixel the same intensity
pub fn flat(width: u32, height: u32, value: u8) -> PixelGrid {
    PixelGrid::from_raw(width, height, vec![value; (width * height) as usize]).unwrap()
}

/// Write a grid as PNG into `dir` and return its path
pub fn write_png(dir: &Path, name: &str, grid: &PixelGrid) -> PathBuf {
    let path = dir.join(name);
    graypack::imaging::save_grayscale(&path, grid).unwrap();
    path
}

/// Write a config file into `dir` and return its path
pub fn write_config(dir: &Path, yaml: &str) -> PathBuf {
    let path = dir.join("graypack.yaml");
    std::fs::write(&path, yaml).unwrap();
    path
}
