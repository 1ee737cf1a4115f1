//! Frame-driven animation timelines.
//!
//! A timeline owns its animation state and the line buffers it draws from. Each
//! call to [`Timeline::advance`] returns the placement list for the current frame
//! and then steps the state to the next frame. Placements refer to buffers by
//! [`BufferId`]; the compositor resolves them through [`Timeline::buffer`].

pub(crate) mod phases;
pub(crate) mod scanline;
pub(crate) mod ticker;

use crate::{
    foundation::core::{PixelRect, Rgba8},
    foundation::error::HiscoreResult,
    raster::bitmap::Bitmap,
    source::text::TextSource,
    text::GlyphRenderer,
};

/// Handle to a buffer owned by a timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BufferId(pub u32);

/// One draw instruction: put (part of) a buffer on the canvas at `(x, y)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Buffer to draw from.
    pub buffer: BufferId,
    /// Canvas column of the left edge.
    pub x: i64,
    /// Canvas row of the top edge.
    pub y: i64,
    /// Area of the buffer to sample; whole buffer when `None`.
    pub source: Option<PixelRect>,
    /// Resample the sampled area to this size before drawing.
    pub scale_to: Option<(u32, u32)>,
}

impl Placement {
    /// Whole `buffer` with its top-left corner at `(x, y)`.
    pub fn at(buffer: BufferId, x: i64, y: i64) -> Self {
        Self {
            buffer,
            x,
            y,
            source: None,
            scale_to: None,
        }
    }

    /// Sample only `rect` of the buffer.
    pub fn with_source(mut self, rect: PixelRect) -> Self {
        self.source = Some(rect);
        self
    }

    /// Resample to `width` x `height` before drawing.
    pub fn scaled_to(mut self, width: u32, height: u32) -> Self {
        self.scale_to = Some((width, height));
        self
    }
}

/// Everything drawn for one frame, in paint order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FramePlan {
    /// Frame index the plan was produced for.
    pub frame: u64,
    /// Draw instructions, first painted first.
    pub placements: Vec<Placement>,
}

impl FramePlan {
    /// Empty plan for `frame`.
    pub fn new(frame: u64) -> Self {
        Self {
            frame,
            placements: Vec::new(),
        }
    }

    /// Append a placement on top of the previous ones.
    pub fn push(&mut self, p: Placement) {
        self.placements.push(p);
    }

    /// True when nothing is drawn.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// Collaborators a timeline may use while advancing.
pub struct SceneContext<'a> {
    /// Score text, reloaded at cycle boundaries.
    pub source: &'a mut TextSource,
    /// Rasterizer for new line buffers.
    pub glyphs: &'a mut dyn GlyphRenderer,
}

/// A frame-stepped animation that owns its line buffers.
pub trait Timeline {
    /// Placements for the current frame; afterwards the state is on the next frame.
    fn advance(&mut self, ctx: &mut SceneContext<'_>) -> HiscoreResult<FramePlan>;

    /// Buffer named by a placement, if the timeline currently holds it.
    fn buffer(&self, id: BufferId) -> Option<&Bitmap>;
}

/// Optional frame overrides for deterministic runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DebugFrames {
    /// Frame each cycle starts at instead of its computed start.
    pub start: Option<u64>,
    /// Reaching this frame ends the cycle immediately.
    pub end: Option<u64>,
}

/// Frame counter and current pair of a cycle-based timeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnimationState {
    /// Current frame of the cycle.
    pub frame: u64,
    /// Index of the current title line; always even.
    pub cycle_pos: usize,
}

/// Step a cycle frame counter by `speed`.
///
/// Returns the next frame and whether the cycle ended (the counter is then 0).
pub fn step_frame(frame: u64, speed: u64, frames_max: u64, debug: DebugFrames) -> (u64, bool) {
    let mut next = frame.saturating_add(speed);
    if debug.end.is_some_and(|end| next >= end) {
        next = frames_max;
    }
    if next >= frames_max {
        (0, true)
    } else {
        (next, false)
    }
}

/// A `width`-wide buffer filled with `background` holding `text` horizontally centered.
pub fn centered_line(width: u32, text: &Bitmap, background: Rgba8) -> Bitmap {
    let mut line = Bitmap::new(width, text.height(), background);
    let x = centered_x(width, text.width());
    line.blit(text, x, 0, None);
    line
}

/// Left edge that centers `content` in `container`, rounding toward negative infinity.
pub fn centered_x(container: u32, content: u32) -> i64 {
    (i64::from(container) - i64::from(content)).div_euclid(2)
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/mod.rs"]
mod tests;
