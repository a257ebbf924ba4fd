use std::path::PathBuf;

use gray_codec::{CodecError, Scheme};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG decode error in {path}: {message}")]
    PngDecode { path: PathBuf, message: String },

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Unsupported PNG layout: {0}")]
    UnsupportedPng(String),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Round trip failed for {scheme}: first differing pixel at ({}, {})", first_mismatch.0, first_mismatch.1)]
    RoundTrip {
        scheme: Scheme,
        first_mismatch: (u32, u32),
    },
}
