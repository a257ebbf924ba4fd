//! Graypack - lossless grayscale image compression workbench
//!
//! Loads PNG images, runs them through the `gray-codec` schemes and
//! reports how each one does. This library exposes modules for
//! integration testing.

pub mod error;
pub mod imaging;
pub mod models;
pub mod services;
