//! Animation configuration with construction-time validation.
//!
//! Environment variables are read exactly once, through
//! [`ShimmerConfigBuilder::from_env`]; the renderer itself never
//! touches ambient state.

use crate::color::ColorValue;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// How interpolated colors are emitted to the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// 256-color palette (`ESC[38;5;{n}m`); the palette scalar is
    /// interpolated directly, without RGB decomposition.
    Indexed256,
    /// 24-bit color (`ESC[38;2;{r};{g};{b}m`); each channel is
    /// interpolated independently.
    TrueColor,
}

impl FromStr for ColorMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "indexed256" | "indexed" | "256" => Ok(Self::Indexed256),
            "truecolor" | "24bit" | "rgb" => Ok(Self::TrueColor),
            _ => Err(ConfigError::UnsupportedColorMode(s.to_string())),
        }
    }
}

/// Validated, immutable animation parameters.
///
/// Constructed through [`ShimmerConfig::builder`]; a value of this
/// type always satisfies `sweep_seconds > 0` and `band_width > 0`.
#[derive(Debug, Clone, Serialize)]
pub struct ShimmerConfig {
    base_color: ColorValue,
    highlight_color: ColorValue,
    sweep_seconds: f64,
    padding: usize,
    band_width: f64,
    color_mode: ColorMode,
}

impl ShimmerConfig {
    /// Start building a configuration from the built-in defaults.
    pub fn builder() -> ShimmerConfigBuilder {
        ShimmerConfigBuilder::default()
    }

    /// Color rendered where the glow intensity is zero.
    pub fn base_color(&self) -> ColorValue {
        self.base_color
    }

    /// Color rendered at the center of the glow band.
    pub fn highlight_color(&self) -> ColorValue {
        self.highlight_color
    }

    /// Duration of one full sweep cycle, in seconds.
    pub fn sweep_seconds(&self) -> f64 {
        self.sweep_seconds
    }

    /// Virtual runway characters before and after the text.
    pub fn padding(&self) -> usize {
        self.padding
    }

    /// Half-width of the glow band, in character units.
    pub fn band_width(&self) -> f64 {
        self.band_width
    }

    /// Emission mode for interpolated colors.
    pub fn color_mode(&self) -> ColorMode {
        self.color_mode
    }
}

/// Builder for [`ShimmerConfig`].
///
/// Fields are public so a config file can deserialize straight into
/// the builder; [`ShimmerConfigBuilder::build`] is still the only way
/// to obtain a `ShimmerConfig`, so validation cannot be bypassed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShimmerConfigBuilder {
    pub base_color: ColorValue,
    pub highlight_color: ColorValue,
    pub sweep_seconds: f64,
    pub padding: usize,
    pub band_width: f64,
    pub color_mode: ColorMode,
}

impl Default for ShimmerConfigBuilder {
    fn default() -> Self {
        Self {
            base_color: ColorValue::Rgb(0x69, 0x69, 0x69),
            highlight_color: ColorValue::Rgb(0xFF, 0xFF, 0xFF),
            sweep_seconds: 2.0,
            padding: 10,
            band_width: 5.0,
            color_mode: ColorMode::TrueColor,
        }
    }
}

impl ShimmerConfigBuilder {
    /// Build a builder from the `SHIMMER_*` environment variables.
    ///
    /// Unset (or empty) variables keep their defaults; set-but-invalid
    /// values are errors. The environment is read here and nowhere
    /// else.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = Self::default();

        if let Some(value) = non_empty_var("SHIMMER_BASE_COLOR") {
            builder.base_color = parse_color("base", &value)?;
        }
        if let Some(value) = non_empty_var("SHIMMER_HIGHLIGHT_COLOR") {
            builder.highlight_color = parse_color("highlight", &value)?;
        }
        if let Some(value) = non_empty_var("SHIMMER_SWEEP_SECONDS") {
            builder.sweep_seconds = parse_number("SHIMMER_SWEEP_SECONDS", &value)?;
        }
        if let Some(value) = non_empty_var("SHIMMER_PADDING") {
            builder.padding = parse_number("SHIMMER_PADDING", &value)?;
        }
        if let Some(value) = non_empty_var("SHIMMER_BAND_WIDTH") {
            builder.band_width = parse_number("SHIMMER_BAND_WIDTH", &value)?;
        }
        if let Some(value) = non_empty_var("SHIMMER_COLOR_MODE") {
            builder.color_mode = value.parse()?;
        }

        Ok(builder)
    }

    pub fn base_color(mut self, color: ColorValue) -> Self {
        self.base_color = color;
        self
    }

    pub fn highlight_color(mut self, color: ColorValue) -> Self {
        self.highlight_color = color;
        self
    }

    pub fn sweep_seconds(mut self, seconds: f64) -> Self {
        self.sweep_seconds = seconds;
        self
    }

    pub fn padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }

    pub fn band_width(mut self, width: f64) -> Self {
        self.band_width = width;
        self
    }

    pub fn color_mode(mut self, mode: ColorMode) -> Self {
        self.color_mode = mode;
        self
    }

    /// Validate and freeze the configuration.
    pub fn build(self) -> Result<ShimmerConfig, ConfigError> {
        if !self.sweep_seconds.is_finite() || self.sweep_seconds <= 0.0 {
            return Err(ConfigError::NonPositiveSweep(self.sweep_seconds));
        }
        if !self.band_width.is_finite() || self.band_width <= 0.0 {
            return Err(ConfigError::NonPositiveBandWidth(self.band_width));
        }

        Ok(ShimmerConfig {
            base_color: self.base_color,
            highlight_color: self.highlight_color,
            sweep_seconds: self.sweep_seconds,
            padding: self.padding,
            band_width: self.band_width,
            color_mode: self.color_mode,
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_color(field: &'static str, value: &str) -> Result<ColorValue, ConfigError> {
    value.parse().map_err(|source| ConfigError::InvalidColor {
        field,
        value: value.to_string(),
        source,
    })
}

fn parse_number<T: FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        name,
        value: value.to_string(),
    })
}
