use gray_codec::{Compressor, HuffmanDecoder, PixelGrid, Scheme};

use crate::error::AppError;
use crate::models::{AppConfig, CompressionReport};

/// Result of running one scheme over an image
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub report: CompressionReport,
    /// The image as rebuilt from the artifact
    pub decoded: PixelGrid,
}

/// Runs the configured schemes over an image and reports on each
pub struct CompressionService {
    config: AppConfig,
}

impl CompressionService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Compress and decompress `grid` with every configured scheme.
    ///
    /// With `verify` set, the first scheme whose output differs from the
    /// source aborts the run with [`AppError::RoundTrip`].
    pub fn run(&self, grid: &PixelGrid) -> Result<Vec<RunOutcome>, AppError> {
        if self.config.schemes.is_empty() {
            return Err(AppError::Config("no schemes selected".to_string()));
        }

        let decoder = HuffmanDecoder::from(self.config.huffman_decoder);
        self.config
            .schemes
            .iter()
            .map(|&scheme| self.run_scheme(Compressor::new(scheme).huffman_decoder(decoder), grid))
            .collect()
    }

    /// Run a single scheme with the configured decoder.
    pub fn run_one(&self, scheme: Scheme, grid: &PixelGrid) -> Result<RunOutcome, AppError> {
        let decoder = HuffmanDecoder::from(self.config.huffman_decoder);
        self.run_scheme(Compressor::new(scheme).huffman_decoder(decoder), grid)
    }

    fn run_scheme(&self, compressor: Compressor, grid: &PixelGrid) -> Result<RunOutcome, AppError> {
        let scheme = compressor.scheme();
        let compressed = compressor.compress(grid)?;
        let decompressed = compressor.decompress(&compressed.artifact)?;

        if self.config.verify {
            if let Some(first_mismatch) = decompressed.grid.first_mismatch(grid) {
                tracing::error!(
                    %scheme,
                    x = first_mismatch.0,
                    y = first_mismatch.1,
                    "Decoded image differs from source"
                );
                return Err(AppError::RoundTrip {
                    scheme,
                    first_mismatch,
                });
            }
        }

        let mut report = CompressionReport::new(scheme, grid.width(), grid.height());
        report.compressed_bytes = compressed.artifact.compressed_len() as u64;
        report.ratio = compressed.ratio;
        report.compress_nanos = compressed.elapsed_nanos;
        report.decompress_nanos = decompressed.elapsed_nanos;
        report.verified = self.config.verify;

        tracing::info!(
            %scheme,
            width = report.width,
            height = report.height,
            compressed_bytes = report.compressed_bytes,
            ratio = report.ratio,
            verified = report.verified,
            "Scheme finished"
        );

        Ok(RunOutcome {
            report,
            decoded: decompressed.grid,
        })
    }
}
