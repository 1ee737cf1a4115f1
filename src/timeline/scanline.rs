use crate::{
    foundation::core::{Canvas, PixelRect, Rgba8},
    foundation::error::HiscoreResult,
    raster::bitmap::Bitmap,
    text::LineStyle,
    timeline::{
        BufferId, DebugFrames, FramePlan, Placement, SceneContext, Timeline, centered_x,
        step_frame,
    },
};

/// Raster rows sampled per frame.
pub const SCAN_WINDOW: u64 = 400;
/// Width of the first (farthest) scanline.
pub const START_WIDTH: i64 = 200;
/// Growth of the drawn width per scanline.
pub const WIDTH_STEP: i64 = 2;
/// Vertical step between the first two scanlines.
pub const START_STEP: f64 = 0.4;
/// Growth of the vertical step per scanline.
pub const STEP_ACCEL: f64 = 0.001;

const TITLE_GAP: u32 = 3;
const SCORE_GAP: u32 = 3;
const PAIR_GAP: u32 = 30;
/// Counted in the height but never stacked into; leaves a blank band at the end.
const PAIR_RESERVE: u32 = 30;

/// The stacked scroll buffer.
pub const SCROLL: BufferId = BufferId(0);

/// Settings for a [`ScanlineScroll`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScanlineConfig {
    /// Canvas size.
    pub canvas: Canvas,
    /// Screen row of the farthest scanline.
    pub y: i64,
    /// Frames advanced per tick.
    pub speed: u64,
    /// Font sizes and colors.
    pub style: LineStyle,
    /// Cycle start/end overrides.
    pub debug: DebugFrames,
}

/// Vertical scroll-through of the whole score list in faux perspective.
///
/// All pairs are stacked into one tall "scroll" buffer at each cycle start. Every
/// frame samples a window of [`SCAN_WINDOW`] rows from it, stretching each row to
/// a width that grows toward the viewer, with accelerating row spacing.
pub struct ScanlineScroll {
    config: ScanlineConfig,
    frame: u64,
    frames_max: u64,
    needs_reset: bool,
    scroll: Bitmap,
}

impl ScanlineScroll {
    /// Scroll that stacks the text source on its first advance.
    pub fn new(config: ScanlineConfig) -> Self {
        Self {
            config,
            frame: 0,
            frames_max: SCAN_WINDOW,
            needs_reset: true,
            scroll: Bitmap::new(config.canvas.width, 0, config.style.background),
        }
    }

    /// Current frame.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Frames in one pass, scroll height plus the scan window.
    pub fn frames_max(&self) -> u64 {
        self.frames_max
    }

    /// Height of the stacked scroll buffer.
    pub fn scroll_height(&self) -> u32 {
        self.scroll.height()
    }

    #[tracing::instrument(level = "debug", skip_all)]
    fn reset(&mut self, ctx: &mut SceneContext<'_>) -> HiscoreResult<()> {
        ctx.source.refresh()?;

        let style = self.config.style;
        let mut rendered = Vec::with_capacity(ctx.source.pair_count());
        for entry in ctx.source.entries() {
            let title = ctx.glyphs.rasterize(entry.title, style.primary_px, style.text)?;
            let score = ctx.glyphs.rasterize(entry.score, style.secondary_px, style.text)?;
            rendered.push((title, score));
        }

        self.scroll = stack_entries(self.config.canvas.width, &rendered, style.background);
        self.frames_max = u64::from(self.scroll.height()) + SCAN_WINDOW;
        self.frame = self.config.debug.start.unwrap_or(0);
        self.needs_reset = false;

        tracing::debug!(
            pairs = rendered.len(),
            scroll_height = self.scroll.height(),
            frames_max = self.frames_max,
            "scroll rebuilt"
        );
        Ok(())
    }
}

impl Timeline for ScanlineScroll {
    fn advance(&mut self, ctx: &mut SceneContext<'_>) -> HiscoreResult<FramePlan> {
        if self.needs_reset {
            self.reset(ctx)?;
        }

        let plan = FramePlan {
            frame: self.frame,
            placements: scan_placements(
                self.frame,
                self.scroll.height(),
                self.config.canvas.width,
                self.config.y,
            ),
        };

        let (next, wrapped) =
            step_frame(self.frame, self.config.speed, self.frames_max, self.config.debug);
        self.frame = next;
        self.needs_reset = wrapped;
        Ok(plan)
    }

    fn buffer(&self, id: BufferId) -> Option<&Bitmap> {
        (id == SCROLL).then_some(&self.scroll)
    }
}

/// Height of the scroll for rendered `(title, score)` pairs.
pub fn scroll_height(rendered: &[(Bitmap, Bitmap)]) -> u32 {
    rendered
        .iter()
        .map(|(title, score)| {
            title.height() + TITLE_GAP + score.height() + SCORE_GAP + PAIR_GAP + PAIR_RESERVE
        })
        .sum()
}

/// Stack each title then its score, both horizontally centered, top to bottom.
pub fn stack_entries(width: u32, rendered: &[(Bitmap, Bitmap)], background: Rgba8) -> Bitmap {
    let mut scroll = Bitmap::new(width, scroll_height(rendered), background);
    let mut y = 0i64;
    for (title, score) in rendered {
        scroll.blit(title, centered_x(width, title.width()), y, None);
        y += i64::from(title.height() + TITLE_GAP);
        scroll.blit(score, centered_x(width, score.width()), y, None);
        y += i64::from(score.height() + SCORE_GAP + PAIR_GAP);
    }
    scroll
}

/// Placements of every visible scanline for `frame`.
///
/// Row `frame - SCAN_WINDOW + scan_row` of the scroll is drawn for each scan row
/// that falls inside it. Width and step restart from their initial values every
/// frame and accumulate once per scan row, drawn or not.
pub fn scan_placements(frame: u64, scroll_height: u32, canvas_width: u32, y0: i64) -> Vec<Placement> {
    let mut out = Vec::new();
    let mut w = START_WIDTH;
    let mut y = y0 as f64;
    let mut a = START_STEP;

    for scan_row in 0..SCAN_WINDOW {
        let row = frame as i64 - SCAN_WINDOW as i64 + scan_row as i64;
        if row >= 0 && row < i64::from(scroll_height) {
            let x = (i64::from(canvas_width) - w).div_euclid(2);
            out.push(
                Placement::at(SCROLL, x, y.floor() as i64)
                    .with_source(PixelRect::row(row, canvas_width))
                    .scaled_to(w as u32, 1),
            );
        }

        y += a;
        a += STEP_ACCEL;
        w += WIDTH_STEP;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/scanline.rs"]
mod tests;
