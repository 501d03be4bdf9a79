//! Configuration errors surfaced at construction time.
//!
//! Rendering itself is infallible; every invalid input is rejected
//! while the configuration is being built.

use crate::color::ColorParseError;
use thiserror::Error;

/// Reasons a `ShimmerConfig` cannot be built.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("sweep_seconds must be positive (got {0})")]
    NonPositiveSweep(f64),

    #[error("band_width must be positive (got {0})")]
    NonPositiveBandWidth(f64),

    #[error("invalid {field} color {value:?}: {source}")]
    InvalidColor {
        field: &'static str,
        value: String,
        #[source]
        source: ColorParseError,
    },

    #[error("unsupported color mode {0:?} (expected \"indexed256\" or \"truecolor\")")]
    UnsupportedColorMode(String),

    #[error("invalid value for {name}: {value:?}")]
    InvalidNumber { name: &'static str, value: String },
}
