//! Terminal glow-sweep animation driver.
//!
//! Redraws one shimmering line per frame while some longer-running
//! work happens elsewhere. The renderer in `shimmer-core` is pure;
//! this binary owns the clock, frame pacing, terminal capability
//! detection, and output.
//!
//! Configuration precedence: command-line flag, then `SHIMMER_*`
//! environment variable, then built-in default.

use anyhow::{Context, Result};
use clap::Parser;
use shimmer_core::prelude::*;
use std::env;
use std::io::{self, Write};
use std::thread;
use std::time::{Duration, Instant};

#[derive(Debug, Parser)]
#[command(name = "shimmer", about = "Animate a glowing sweep across a line of text")]
struct Cli {
    /// Text to animate
    #[arg(default_value = "Thinking")]
    text: String,

    /// Base (dim) color: palette index, #RRGGBB, or r,g,b
    #[arg(long)]
    base: Option<ColorValue>,

    /// Highlight color at the band center (same formats as --base)
    #[arg(long)]
    highlight: Option<ColorValue>,

    /// Seconds per full sweep
    #[arg(long)]
    sweep: Option<f64>,

    /// Virtual runway characters on each side of the text
    #[arg(long)]
    padding: Option<usize>,

    /// Half-width of the glow band, in characters
    #[arg(long)]
    band_width: Option<f64>,

    /// Color mode: truecolor or indexed256 (auto-detected when omitted)
    #[arg(long)]
    mode: Option<ColorMode>,

    /// Frames per second
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..=240))]
    fps: u32,

    /// Render this many frames, then exit (0 = run until killed)
    #[arg(long, default_value_t = 0)]
    frames: u64,

    /// Disable the spinner glyph prefix
    #[arg(long)]
    no_spinner: bool,
}

/// Braille spinner glyphs, advanced once per frame.
struct Spinner {
    frames: &'static [&'static str],
    idx: usize,
}

impl Spinner {
    fn new() -> Self {
        Self {
            frames: &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"],
            idx: 0,
        }
    }

    fn advance(&mut self) -> &'static str {
        let glyph = self.frames[self.idx];
        self.idx = (self.idx + 1) % self.frames.len();
        glyph
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    log::debug!("resolved config: {config:?}, fps={}, frames={}", cli.fps, cli.frames);
    run(&cli, &config)
}

/// Merge environment defaults with command-line overrides.
fn resolve_config(cli: &Cli) -> Result<ShimmerConfig> {
    let mut builder = ShimmerConfigBuilder::from_env()
        .context("invalid SHIMMER_* environment configuration")?;

    if let Some(color) = cli.base {
        builder = builder.base_color(color);
    }
    if let Some(color) = cli.highlight {
        builder = builder.highlight_color(color);
    }
    if let Some(seconds) = cli.sweep {
        builder = builder.sweep_seconds(seconds);
    }
    if let Some(padding) = cli.padding {
        builder = builder.padding(padding);
    }
    if let Some(width) = cli.band_width {
        builder = builder.band_width(width);
    }
    if let Some(mode) = cli.mode {
        builder = builder.color_mode(mode);
    } else if env::var_os("SHIMMER_COLOR_MODE").is_none() {
        builder = builder.color_mode(detect_color_mode());
    }

    Ok(builder.build()?)
}

/// Decide the color mode when neither `--mode` nor the environment
/// pins one, from the usual terminal capability hints.
fn detect_color_mode() -> ColorMode {
    if let Ok(colorterm) = env::var("COLORTERM") {
        let value = colorterm.to_ascii_lowercase();
        if value.contains("truecolor") || value.contains("24bit") {
            return ColorMode::TrueColor;
        }
    }

    if let Ok(term) = env::var("TERM")
        && (term.contains("truecolor") || term.contains("24bit"))
    {
        return ColorMode::TrueColor;
    }

    if let Ok(program) = env::var("TERM_PROGRAM") {
        let known_truecolor = [
            "iTerm.app",
            "Hyper",
            "vscode",
            "Alacritty",
            "kitty",
            "WezTerm",
            "Ghostty",
        ];
        if known_truecolor.iter().any(|p| program.contains(p)) {
            return ColorMode::TrueColor;
        }
    }

    ColorMode::Indexed256
}

/// The frame loop: sample the clock, render, redraw the line, sleep.
fn run(cli: &Cli, config: &ShimmerConfig) -> Result<()> {
    let frame_delay = Duration::from_secs_f64(1.0 / f64::from(cli.fps));
    let sweep_start = Instant::now();
    let mut spinner = Spinner::new();
    let mut stdout = io::stdout().lock();
    let mut frame = 0u64;

    loop {
        let now = sweep_start.elapsed().as_secs_f64();
        let line = render(&cli.text, now, 0.0, config);

        if cli.no_spinner {
            write!(stdout, "\r{line}").context("failed to write frame")?;
        } else {
            let glyph = spinner.advance();
            write!(stdout, "\r{glyph} {line}").context("failed to write frame")?;
        }
        stdout.flush().context("failed to flush frame")?;

        frame += 1;
        if cli.frames != 0 && frame >= cli.frames {
            break;
        }
        thread::sleep(frame_delay);
    }

    writeln!(stdout)?;
    Ok(())
}
