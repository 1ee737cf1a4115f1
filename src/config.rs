//! Run configuration and per-variant defaults.

use std::path::PathBuf;

use crate::{
    foundation::core::{Canvas, Rgba8},
    foundation::error::{HiscoreError, HiscoreResult},
    player::{LoopOptions, PacingMode},
    text::LineStyle,
    timeline::{
        DebugFrames, Timeline,
        phases::{PhaseCycle, PhaseCycleConfig},
        scanline::{ScanlineConfig, ScanlineScroll},
        ticker::{DEFAULT_SEPARATOR, Ticker, TickerConfig},
    },
};

/// Font shipped next to the binary.
pub const DEFAULT_FONT_FILE: &str = "C64_Pro_Mono_v1.0-STYLE.ttf";

/// Which animation to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Single-row marquee over every line.
    Ticker,
    /// Perspective scroll-through of all pairs.
    Scanline,
    /// Build-up / hold / exit cycle, one pair at a time.
    Phases,
}

/// Defaults a variant starts from before command-line overrides.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VariantDefaults {
    /// Canvas size.
    pub canvas: Canvas,
    /// Target frame rate.
    pub fps: u32,
    /// Pixels or frames advanced per tick.
    pub speed: u32,
    /// Size of the first line in pixels.
    pub font_size: u32,
    /// Second line size relative to the first.
    pub font_size_factor: f64,
    /// Score file read when none is given.
    pub text_file: &'static str,
    /// Empty when the position is derived from the canvas.
    pub y_positions: &'static [i64],
}

impl Variant {
    /// Starting values for this variant.
    pub fn defaults(self) -> VariantDefaults {
        match self {
            Variant::Ticker => VariantDefaults {
                canvas: Canvas {
                    width: 320,
                    height: 240,
                },
                fps: 100,
                speed: 1,
                font_size: 36,
                font_size_factor: 1.0,
                text_file: "scoroller.txt",
                y_positions: &[],
            },
            Variant::Scanline => VariantDefaults {
                canvas: Canvas {
                    width: 800,
                    height: 600,
                },
                fps: 30,
                speed: 3,
                font_size: 44,
                font_size_factor: 0.7,
                text_file: "ocm-scores.txt",
                y_positions: &[360],
            },
            Variant::Phases => VariantDefaults {
                canvas: Canvas {
                    width: 800,
                    height: 600,
                },
                fps: 30,
                speed: 3,
                font_size: 44,
                font_size_factor: 0.7,
                text_file: "ocm-scores.txt",
                y_positions: &[240, 320],
            },
        }
    }
}

/// Colors used for text, background and the area around the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorScheme {
    /// Glyph color.
    pub text: Rgba8,
    /// Canvas fill.
    pub background: Rgba8,
    /// Fills display area outside the canvas.
    pub debug: Rgba8,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            text: Rgba8::WHITE,
            background: Rgba8::BLACK,
            debug: Rgba8::opaque(0xc0, 0x00, 0x00),
        }
    }
}

/// Everything a run needs, after defaults and overrides are merged.
#[derive(Clone, Debug, PartialEq)]
pub struct RunConfig {
    /// Animation to run.
    pub variant: Variant,
    /// Canvas size in pixels.
    pub canvas: Canvas,
    /// One or two explicit baselines; missing ones fall back to the variant.
    pub y_positions: Vec<i64>,
    /// Target frame rate.
    pub fps: u32,
    /// Report the measured frame rate while running.
    pub show_fps: bool,
    /// How the loop waits between frames.
    pub pacing: PacingMode,
    /// Pixels or frames advanced per tick.
    pub speed: u32,
    /// Size of the first line in pixels.
    pub font_size: u32,
    /// Second line size relative to the first.
    pub font_size_factor: f64,
    /// Title/score text file.
    pub text_file: PathBuf,
    /// TrueType font used for both lines.
    pub font_file: PathBuf,
    /// Start at a random pair.
    pub random_start: bool,
    /// Cycle start/end overrides.
    pub debug: DebugFrames,
    /// Text, background and surround colors.
    pub colors: ColorScheme,
    /// Size the canvas from the whole display.
    pub fullscreen: bool,
    /// Accepted for compatibility; no effect on the available displays.
    pub hw_surface: bool,
    /// Stop after this many ticks.
    pub max_frames: Option<u64>,
}

impl RunConfig {
    /// Variant defaults with no overrides applied.
    pub fn new(variant: Variant) -> Self {
        let d = variant.defaults();
        Self {
            variant,
            canvas: d.canvas,
            y_positions: Vec::new(),
            fps: d.fps,
            show_fps: false,
            pacing: PacingMode::Sleep,
            speed: d.speed,
            font_size: d.font_size,
            font_size_factor: d.font_size_factor,
            text_file: PathBuf::from(d.text_file),
            font_file: PathBuf::from(DEFAULT_FONT_FILE),
            random_start: false,
            debug: DebugFrames::default(),
            colors: ColorScheme::default(),
            fullscreen: false,
            hw_surface: false,
            max_frames: None,
        }
    }

    /// Reject settings the loop cannot run with.
    pub fn validate(&self) -> HiscoreResult<()> {
        if self.fps == 0 {
            return Err(HiscoreError::config("fps must be > 0"));
        }
        if self.y_positions.len() > 2 {
            return Err(HiscoreError::config(format!(
                "expected at most 2 y positions, got {}",
                self.y_positions.len()
            )));
        }
        if self.font_size == 0 {
            return Err(HiscoreError::config("font size must be > 0"));
        }
        if !(self.font_size_factor.is_finite() && self.font_size_factor > 0.0) {
            return Err(HiscoreError::config(format!(
                "font size factor must be a positive number, got {}",
                self.font_size_factor
            )));
        }
        if let (Some(start), Some(end)) = (self.debug.start, self.debug.end)
            && end <= start
        {
            return Err(HiscoreError::config(format!(
                "debug end frame {end} must come after start frame {start}"
            )));
        }
        Ok(())
    }

    /// Font sizes and colors for the timelines.
    pub fn line_style(&self) -> LineStyle {
        LineStyle::from_factor(
            self.font_size,
            self.font_size_factor,
            self.colors.text,
            self.colors.background,
        )
    }

    /// First and second baselines.
    pub fn baselines(&self) -> (i64, i64) {
        let defaults = self.variant.defaults().y_positions;
        let derived = (self.canvas.height_i64() - i64::from(self.font_size)) / 2;
        let pick = |i: usize| {
            self.y_positions
                .get(i)
                .or_else(|| defaults.get(i))
                .copied()
                .unwrap_or(derived)
        };
        (pick(0), pick(1))
    }

    /// Loop settings derived from this config.
    pub fn loop_options(&self) -> LoopOptions {
        LoopOptions {
            fps: self.fps,
            pacing: self.pacing,
            show_fps: self.show_fps,
            max_frames: self.max_frames,
        }
    }

    /// Timeline for the configured variant.
    pub fn build_timeline(&self) -> HiscoreResult<Box<dyn Timeline>> {
        self.validate()?;
        let style = self.line_style();
        let (y0, y1) = self.baselines();

        let timeline: Box<dyn Timeline> = match self.variant {
            Variant::Ticker => Box::new(Ticker::new(TickerConfig {
                canvas: self.canvas,
                y: y0,
                speed: i64::from(self.speed),
                separator: DEFAULT_SEPARATOR.to_owned(),
                style,
            })),
            Variant::Scanline => Box::new(ScanlineScroll::new(ScanlineConfig {
                canvas: self.canvas,
                y: y0,
                speed: u64::from(self.speed),
                style,
                debug: self.debug,
            })),
            Variant::Phases => Box::new(PhaseCycle::new(PhaseCycleConfig {
                canvas: self.canvas,
                title_y: y0,
                score_y: y1,
                speed: u64::from(self.speed),
                style,
                debug: self.debug,
                random_start: self.random_start,
            })),
        };
        Ok(timeline)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
