//! Turning strings into measured pixel bitmaps.

pub(crate) mod parley_cpu;

use crate::{foundation::core::Rgba8, foundation::error::HiscoreResult, raster::bitmap::Bitmap};

/// Rasterizes one line of text into a bitmap that exactly fits it.
///
/// The bitmap background is transparent; only glyph coverage is painted.
pub trait GlyphRenderer {
    /// Rasterize `text` at `size_px` in `color`.
    fn rasterize(&mut self, text: &str, size_px: f32, color: Rgba8) -> HiscoreResult<Bitmap>;
}

/// Font sizes and colors used by every timeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineStyle {
    /// Size of the first line (titles, ticker chunks).
    pub primary_px: f32,
    /// Size of the second line (scores).
    pub secondary_px: f32,
    /// Glyph color.
    pub text: Rgba8,
    /// Canvas fill behind the lines.
    pub background: Rgba8,
}

impl LineStyle {
    /// Secondary size is `round(primary * factor)`.
    pub fn from_factor(font_size: u32, factor: f64, text: Rgba8, background: Rgba8) -> Self {
        Self {
            primary_px: font_size as f32,
            secondary_px: (f64::from(font_size) * factor).round() as f32,
            text,
            background,
        }
    }
}
