pub mod png_io;

pub use png_io::{decode_grayscale, encode_grayscale, load_grayscale, luma, save_grayscale};
