pub mod config;
pub mod report;

pub use config::{AppConfig, DecoderChoice};
pub use report::CompressionReport;
