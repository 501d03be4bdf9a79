//! The pure glow-sweep renderer.
//!
//! `render` is a pure function of `(text, now, sweep_start, config)`.
//! The caller owns the clock and frame pacing, so repeated calls with
//! monotonically increasing `now` produce the animation; there is no
//! state carried between calls and nothing here can fail.

use crate::config::{ColorMode, ShimmerConfig};
use std::f64::consts::PI;

/// Style reset emitted once, after the last glyph.
const RESET: &str = "\x1b[0m";

/// Render one styled line for the given clock sample.
///
/// Each character is wrapped in a foreground-color sequence whose
/// color interpolates between the configured base and highlight,
/// driven by the character's distance from the glow band's current
/// center. Empty text yields the reset sequence alone.
///
/// `now` and `sweep_start` are high-resolution seconds from the same
/// clock. `now >= sweep_start` is the expected case, but any real
/// difference works: the phase wraps via floored modulo, so the sweep
/// loops seamlessly however long the caller has been running.
pub fn render(text: &str, now: f64, sweep_start: f64, config: &ShimmerConfig) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(chars.len() * 16 + RESET.len());

    if !chars.is_empty() {
        // Virtual track: padding on both sides lets the band enter and
        // leave the visible text smoothly.
        let period = (chars.len() + 2 * config.padding()) as f64;
        let phase =
            (now - sweep_start).rem_euclid(config.sweep_seconds()) / config.sweep_seconds();
        let center = phase * period;

        for (i, ch) in chars.into_iter().enumerate() {
            let track = (i + config.padding()) as f64;
            let dist = (track - center).abs();
            let intensity = band_intensity(dist, config.band_width());
            push_styled(&mut out, ch, intensity, config);
        }
    }

    out.push_str(RESET);
    out
}

/// Raised-cosine falloff: 1.0 at the band center, exactly 0.0 from
/// `band_width` outward.
///
/// Compact support keeps everything outside the band at the base color
/// without a clamp step, and the cosine avoids the edge discontinuity
/// a linear falloff would have.
fn band_intensity(dist: f64, band_width: f64) -> f64 {
    if dist >= band_width {
        return 0.0;
    }
    0.5 * (1.0 + (PI * dist / band_width).cos())
}

/// Append one glyph wrapped in its foreground sequence.
fn push_styled(out: &mut String, ch: char, intensity: f64, config: &ShimmerConfig) {
    match config.color_mode() {
        ColorMode::Indexed256 => {
            // The palette scalar interpolates directly; no RGB
            // decomposition in this mode.
            let index = lerp_channel(
                config.base_color().to_index(),
                config.highlight_color().to_index(),
                intensity,
            );
            out.push_str(&format!("\x1b[38;5;{index}m"));
        }
        ColorMode::TrueColor => {
            let (br, bg, bb) = config.base_color().to_rgb();
            let (hr, hg, hb) = config.highlight_color().to_rgb();
            let r = lerp_channel(br, hr, intensity);
            let g = lerp_channel(bg, hg, intensity);
            let b = lerp_channel(bb, hb, intensity);
            out.push_str(&format!("\x1b[38;2;{r};{g};{b}m"));
        }
    }
    out.push(ch);
}

/// Linear interpolation of one 8-bit value, rounded to nearest and
/// clamped to the representable range.
fn lerp_channel(base: u8, highlight: u8, intensity: f64) -> u8 {
    let value = f64::from(base) + intensity * (f64::from(highlight) - f64::from(base));
    value.round().clamp(0.0, 255.0) as u8
}
