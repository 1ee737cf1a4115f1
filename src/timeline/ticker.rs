use crate::{
    foundation::core::Canvas,
    foundation::error::HiscoreResult,
    raster::bitmap::Bitmap,
    text::LineStyle,
    timeline::{BufferId, FramePlan, Placement, SceneContext, Timeline},
};

/// Separator between consecutive lines.
pub const DEFAULT_SEPARATOR: &str = " \u{2022}\u{2022}\u{2022} ";

/// Settings for a [`Ticker`].
#[derive(Clone, Debug, PartialEq)]
pub struct TickerConfig {
    /// Canvas size.
    pub canvas: Canvas,
    /// Top row of the marquee.
    pub y: i64,
    /// Pixels scrolled per frame; 0 freezes the marquee.
    pub speed: i64,
    /// Appended after every line.
    pub separator: String,
    /// Font size and colors.
    pub style: LineStyle,
}

/// Continuous single-row marquee over every line of the source.
///
/// Buffer `i` holds line `i` followed by the separator. The file is re-checked
/// every frame; a change restarts the marquee from the right edge.
pub struct Ticker {
    config: TickerConfig,
    x_pos: i64,
    text_pos: usize,
    frame: u64,
    chunks: Vec<Bitmap>,
    content_width: u64,
}

impl Ticker {
    /// Marquee starting at the right edge of the canvas.
    pub fn new(config: TickerConfig) -> Self {
        let x_pos = config.canvas.width_i64();
        Self {
            config,
            x_pos,
            text_pos: 0,
            frame: 0,
            chunks: Vec::new(),
            content_width: 0,
        }
    }

    /// Left edge of the chunk for [`Ticker::text_pos`] on the next frame.
    pub fn x_pos(&self) -> i64 {
        self.x_pos
    }

    /// Line whose chunk is drawn first on the next frame.
    pub fn text_pos(&self) -> usize {
        self.text_pos
    }

    fn rebuild(&mut self, ctx: &mut SceneContext<'_>) -> HiscoreResult<()> {
        let style = self.config.style;
        let mut chunks = Vec::with_capacity(ctx.source.lines().len());
        for line in ctx.source.lines() {
            let text = format!("{line}{}", self.config.separator);
            chunks.push(ctx.glyphs.rasterize(&text, style.primary_px, style.text)?);
        }
        self.content_width = chunks.iter().map(|c| u64::from(c.width())).sum();
        self.chunks = chunks;
        self.text_pos = 0;
        self.x_pos = self.config.canvas.width_i64();
        tracing::debug!(chunks = self.chunks.len(), "ticker rebuilt");
        Ok(())
    }
}

impl Timeline for Ticker {
    fn advance(&mut self, ctx: &mut SceneContext<'_>) -> HiscoreResult<FramePlan> {
        if ctx.source.refresh()? {
            self.rebuild(ctx)?;
        }

        let width = self.config.canvas.width_i64();
        let mut plan = FramePlan::new(self.frame);
        let n = self.chunks.len();

        if n > 0 && self.content_width > 0 {
            let mut x = self.x_pos;
            let mut t = self.text_pos;
            while x < width {
                plan.push(Placement::at(BufferId(t as u32), x, self.config.y));
                x += i64::from(self.chunks[t].width());
                if x < 0 {
                    // chunk fully scrolled out: the next one becomes the head
                    self.text_pos = (self.text_pos + 1) % n;
                    self.x_pos = x;
                } else if x >= width {
                    break;
                }
                t = (t + 1) % n;
            }
        }

        self.x_pos -= self.config.speed;
        self.frame += 1;
        Ok(plan)
    }

    fn buffer(&self, id: BufferId) -> Option<&Bitmap> {
        self.chunks.get(id.0 as usize)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/ticker.rs"]
mod tests;
