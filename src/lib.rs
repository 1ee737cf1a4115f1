//! Hiscore renders an unattended, looping arcade-style high-score display.
//!
//! A text file holds title/score pairs, one line each. Three animations are provided:
//!
//! - **Ticker**: every line scrolls past in one continuous horizontal marquee.
//! - **Scanline**: all pairs are stacked into a tall scroll that is revealed row by
//!   row in faux perspective.
//! - **Phases**: one pair at a time; the title scrolls by while the score line is
//!   built from two halves, held, then thrown off screen.
//!
//! # Frame pipeline
//!
//! 1. **Advance**: a [`Timeline`] steps its state and emits a [`FramePlan`] of placements
//! 2. **Compose**: [`Compositor`] draws the placements from the timeline's line buffers
//! 3. **Present**: a [`Display`] shows the frame (terminal or PNG sequence)
//! 4. **Pace**: [`Pacer`] holds the target frame rate
//!
//! [`FrameLoop`] runs these steps until the display reports [`DisplayEvent::Quit`] or a
//! frame limit is reached. Timelines are deterministic for a given text file and
//! [`GlyphRenderer`], which keeps them testable without a font or a terminal.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod foundation;
mod player;
mod raster;
mod render;
mod source;
mod text;
mod timeline;

pub use config::{ColorScheme, DEFAULT_FONT_FILE, RunConfig, Variant, VariantDefaults};
pub use foundation::core::{Canvas, PixelRect, Rgba8};
pub use foundation::error::{HiscoreError, HiscoreResult};
pub use player::{FpsMeter, FrameLoop, LoopOptions, LoopStats, Pacer, PacingMode};
pub use raster::bitmap::Bitmap;
pub use raster::composite::{PremulRgba8, over, unpremultiply};
pub use render::png::PngSequenceDisplay;
pub use render::terminal::{CellColors, TerminalDisplay, sample_cells};
pub use render::{Compositor, Display, DisplayEvent};
pub use source::fingerprint::{ChangeDetector, Fingerprint, FsChangeDetector};
pub use source::text::{ScoreEntry, TextSource, parse_lines};
pub use text::parley_cpu::{ParleyGlyphRenderer, TextBrushRgba8};
pub use text::{GlyphRenderer, LineStyle};
pub use timeline::phases::{
    EXIT_ACCEL, EXIT_SPEED, ExitMotion, LEFT_HALF, Phase, PhaseCycle, PhaseCycleConfig,
    RIGHT_HALF, SCORE_LINE, TITLE, phase_for, quarter, start_skip,
};
pub use timeline::scanline::{
    SCAN_WINDOW, SCROLL, ScanlineConfig, ScanlineScroll, scan_placements, scroll_height,
    stack_entries,
};
pub use timeline::ticker::{DEFAULT_SEPARATOR, Ticker, TickerConfig};
pub use timeline::{
    AnimationState, BufferId, DebugFrames, FramePlan, Placement, SceneContext, Timeline,
    centered_line, centered_x, step_frame,
};

#[cfg(test)]
#[path = "../tests/unit/support.rs"]
pub(crate) mod test_support;
