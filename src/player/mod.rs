//! The tick loop: poll, advance, compose, present, pace.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::{
    foundation::core::{Canvas, Rgba8},
    foundation::error::{HiscoreError, HiscoreResult},
    render::{Compositor, Display, DisplayEvent},
    source::text::TextSource,
    text::GlyphRenderer,
    timeline::{SceneContext, Timeline},
};

/// How [`Pacer::pace`] waits for the next frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PacingMode {
    /// Yield to the OS until the deadline.
    #[default]
    Sleep,
    /// Spin until the deadline; steadier, burns a core.
    BusyLoop,
    /// Do not wait at all.
    Unpaced,
}

/// Caps the tick rate to a target frame rate.
#[derive(Debug)]
pub struct Pacer {
    mode: PacingMode,
    frame_time: Duration,
    last: Option<Instant>,
}

impl Pacer {
    /// Pacer for `fps` frames per second; `fps` must be > 0.
    pub fn new(mode: PacingMode, fps: u32) -> HiscoreResult<Self> {
        if fps == 0 {
            return Err(HiscoreError::config("fps must be > 0"));
        }
        Ok(Self {
            mode,
            frame_time: Duration::from_secs(1) / fps,
            last: None,
        })
    }

    /// Target duration of one frame.
    pub fn frame_time(&self) -> Duration {
        self.frame_time
    }

    /// Wait until one frame time has passed since the previous call.
    ///
    /// Returns the time since the previous call (zero on the first).
    pub fn pace(&mut self) -> Duration {
        let Some(last) = self.last else {
            self.last = Some(Instant::now());
            return Duration::ZERO;
        };

        let deadline = last + self.frame_time;
        match self.mode {
            PacingMode::Sleep => {
                let now = Instant::now();
                if now < deadline {
                    std::thread::sleep(deadline - now);
                }
            }
            PacingMode::BusyLoop => {
                while Instant::now() < deadline {
                    std::hint::spin_loop();
                }
            }
            PacingMode::Unpaced => {}
        }

        let now = Instant::now();
        self.last = Some(now);
        now - last
    }
}

const FPS_WINDOW: usize = 10;

/// Frame rate averaged over the last ten tick intervals.
#[derive(Debug, Default)]
pub struct FpsMeter {
    intervals: VecDeque<Duration>,
}

impl FpsMeter {
    /// Add one tick interval; zero intervals are ignored.
    pub fn record(&mut self, interval: Duration) {
        if interval.is_zero() {
            return;
        }
        if self.intervals.len() == FPS_WINDOW {
            self.intervals.pop_front();
        }
        self.intervals.push_back(interval);
    }

    /// Average frame rate, 0 until an interval is recorded.
    pub fn fps(&self) -> f64 {
        let total: Duration = self.intervals.iter().sum();
        if total.is_zero() {
            return 0.0;
        }
        self.intervals.len() as f64 / total.as_secs_f64()
    }
}

/// Settings for a [`FrameLoop`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoopOptions {
    /// Target frame rate.
    pub fps: u32,
    /// How to wait between frames.
    pub pacing: PacingMode,
    /// Report the measured frame rate to the display.
    pub show_fps: bool,
    /// Stop after this many ticks.
    pub max_frames: Option<u64>,
}

/// Summary of a finished run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoopStats {
    /// Ticks completed.
    pub frames: u64,
}

/// Drives one timeline against one display until quit or the frame limit.
pub struct FrameLoop<D: Display> {
    display: D,
    compositor: Compositor,
    pacer: Pacer,
    meter: FpsMeter,
    options: LoopOptions,
}

impl<D: Display> FrameLoop<D> {
    /// Loop presenting to `display` on a `canvas` cleared to `background`.
    pub fn new(
        display: D,
        canvas: Canvas,
        background: Rgba8,
        options: LoopOptions,
    ) -> HiscoreResult<Self> {
        Ok(Self {
            display,
            compositor: Compositor::new(canvas, background),
            pacer: Pacer::new(options.pacing, options.fps)?,
            meter: FpsMeter::default(),
            options,
        })
    }

    /// The display frames are presented to.
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Give the display back.
    pub fn into_display(self) -> D {
        self.display
    }

    /// Ticks between two FPS reports.
    pub fn report_every(&self) -> u64 {
        u64::from(self.options.fps / 3).max(1)
    }

    /// Tick until the display asks to quit or `max_frames` is reached.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run(
        &mut self,
        timeline: &mut dyn Timeline,
        source: &mut TextSource,
        glyphs: &mut dyn GlyphRenderer,
    ) -> HiscoreResult<LoopStats> {
        let report_every = self.report_every();
        let mut stats = LoopStats::default();

        loop {
            if self.options.max_frames.is_some_and(|max| stats.frames >= max) {
                break;
            }
            if self.display.poll_events()?.contains(&DisplayEvent::Quit) {
                tracing::info!(frames = stats.frames, "quit requested");
                break;
            }

            let plan = {
                let mut ctx = SceneContext {
                    source: &mut *source,
                    glyphs: &mut *glyphs,
                };
                timeline.advance(&mut ctx)?
            };
            let frame = self.compositor.compose(&plan, &*timeline)?;
            self.display.present(frame)?;

            let dt = self.pacer.pace();
            self.meter.record(dt);
            stats.frames += 1;

            if self.options.show_fps && stats.frames % report_every == 0 {
                self.display.report_fps(self.meter.fps())?;
            }
        }
        Ok(stats)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/player/mod.rs"]
mod tests;
