//! Frame composition and presentation.
//!
//! [`Compositor`] turns a [`FramePlan`] into a canvas-sized [`Bitmap`]; a [`Display`]
//! shows it and reports user input.

pub(crate) mod png;
pub(crate) mod terminal;

use std::io::Write as _;

use crate::{
    foundation::core::{Canvas, PixelRect, Rgba8},
    foundation::error::{HiscoreError, HiscoreResult},
    raster::bitmap::Bitmap,
    timeline::{FramePlan, Timeline},
};

/// Input observed by a display since the previous poll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayEvent {
    /// Window closed, Escape pressed or similar.
    Quit,
}

/// Shows composed frames and reports user input.
pub trait Display {
    /// Input received since the previous poll; never blocks.
    fn poll_events(&mut self) -> HiscoreResult<Vec<DisplayEvent>>;

    /// Show one composed frame.
    fn present(&mut self, frame: &Bitmap) -> HiscoreResult<()>;

    /// Show the measured frame rate.
    fn report_fps(&mut self, fps: f64) -> HiscoreResult<()> {
        let mut out = std::io::stdout();
        write!(out, "{fps:8.4}\r")
            .and_then(|()| out.flush())
            .map_err(|e| HiscoreError::render(format!("report fps: {e}")))
    }
}

/// Owns the frame canvas and paints placements onto it.
pub struct Compositor {
    frame: Bitmap,
    background: Rgba8,
}

impl Compositor {
    /// Compositor for `canvas`, cleared to `background` before every frame.
    pub fn new(canvas: Canvas, background: Rgba8) -> Self {
        Self {
            frame: Bitmap::new(canvas.width, canvas.height, background),
            background,
        }
    }

    /// The last composed frame.
    pub fn frame(&self) -> &Bitmap {
        &self.frame
    }

    /// Clear to the background and draw `plan` in order.
    ///
    /// Every placement must name a buffer the timeline currently owns.
    pub fn compose(&mut self, plan: &FramePlan, timeline: &dyn Timeline) -> HiscoreResult<&Bitmap> {
        self.frame.fill(self.background);

        for p in &plan.placements {
            let buffer = timeline.buffer(p.buffer).ok_or_else(|| {
                HiscoreError::render(format!(
                    "frame {} references unknown buffer {}",
                    plan.frame, p.buffer.0
                ))
            })?;

            match p.scale_to {
                None => self.frame.blit(buffer, p.x, p.y, p.source),
                Some((w, h)) => {
                    let area = p
                        .source
                        .unwrap_or(PixelRect::new(0, 0, buffer.width(), buffer.height()));
                    let scaled = buffer.crop(area).scale(w, h);
                    self.frame.blit(&scaled, p.x, p.y, None);
                }
            }
        }
        Ok(&self.frame)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/mod.rs"]
mod tests;
