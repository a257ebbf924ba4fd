use gray_codec::Scheme;
use serde::Serialize;

/// Outcome of one scheme on one image
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CompressionReport {
    /// Scheme name as used on the command line
    pub scheme: String,
    pub width: u32,
    pub height: u32,

    /// One byte per pixel
    pub original_bytes: u64,

    /// Header, tables and payload together
    pub compressed_bytes: u64,

    /// Ratio in the scheme's own units
    pub ratio: f64,

    pub compress_nanos: u64,
    pub decompress_nanos: u64,

    /// Whether the decoded image was compared against the source
    pub verified: bool,
}

impl CompressionReport {
    pub fn new(scheme: Scheme, width: u32, height: u32) -> Self {
        Self {
            scheme: scheme.to_string(),
            width,
            height,
            original_bytes: width as u64 * height as u64,
            compressed_bytes: 0,
            ratio: 0.0,
            compress_nanos: 0,
            decompress_nanos: 0,
            verified: false,
        }
    }

    /// Compressed size as a percentage of the raw 8-bit image
    pub fn size_percent(&self) -> f64 {
        if self.original_bytes == 0 {
            return 0.0;
        }
        self.compressed_bytes as f64 * 100.0 / self.original_bytes as f64
    }
}
