//! Core rendering for the shimmer terminal animation.
//!
//! This crate provides the pure parts of the glow-sweep effect:
//! - Tagged color values (palette index or RGB triple)
//! - Validated animation configuration
//! - The `render` function that styles one line of text for a given
//!   clock sample
//!
//! The surrounding driver owns the clock, frame pacing, and terminal
//! output; nothing in here performs I/O.

pub mod color;
pub mod config;
pub mod error;
pub mod render;

pub use color::ColorValue;
pub use config::{ColorMode, ShimmerConfig, ShimmerConfigBuilder};
pub use error::ConfigError;
pub use render::render;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::color::ColorValue;
    pub use crate::config::{ColorMode, ShimmerConfig, ShimmerConfigBuilder};
    pub use crate::error::ConfigError;
    pub use crate::render::render;
}
