//! Assertion helpers for tests.

use gray_codec::PixelGrid;
use graypack::models::CompressionReport;
use graypack::services::RunOutcome;
use pretty_assertions::assert_eq;

/// Assert two grids are identical, reporting the first differing pixel
pub fn assert_same_image(actual: &PixelGrid, expected: &PixelGrid) {
    assert_eq!(
        (actual.width(), actual.height()),
        (expected.width(), expected.height()),
        "Image dimensions differ"
    );
    assert_eq!(
        actual.first_mismatch(expected),
        None,
        "Images differ"
    );
}

/// Assert a report is internally consistent for an image of the given size
pub fn assert_valid_report(report: &CompressionReport, width: u32, height: u32) {
    assert_eq!((report.width, report.height), (width, height));
    assert_eq!(report.original_bytes, width as u64 * height as u64);
    assert!(report.compressed_bytes > 0, "Empty artifact: {report:?}");
    assert!(
        report.ratio.is_finite() && report.ratio > 0.0,
        "Bad ratio: {report:?}"
    );
}

/// Assert every outcome decoded back to `source`
pub fn assert_lossless(outcomes: &[RunOutcome], source: &PixelGrid) {
    for outcome in outcomes {
        assert_valid_report(&outcome.report, source.width(), source.height());
        assert_eq!(
            outcome.decoded.first_mismatch(source),
            None,
            "Scheme {} was not lossless",
            outcome.report.scheme
        );
    }
}
