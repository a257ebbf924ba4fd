pub mod compression_service;
pub mod plane_stripper;

pub use compression_service::{CompressionService, RunOutcome};
pub use plane_stripper::strip_planes;
