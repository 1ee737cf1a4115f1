//! Shared fakes for unit tests.

use std::path::PathBuf;

use crate::{
    foundation::core::Rgba8, foundation::error::HiscoreResult, raster::bitmap::Bitmap,
    text::GlyphRenderer,
};

/// Monospace stand-in for a font: every char is `advance` px wide, lines are
/// `size_px` tall, and glyph cells are solid `color`.
pub struct CellGlyphs {
    pub advance: u32,
    pub rendered: Vec<String>,
}

impl CellGlyphs {
    pub fn new(advance: u32) -> Self {
        Self {
            advance,
            rendered: Vec::new(),
        }
    }
}

impl GlyphRenderer for CellGlyphs {
    fn rasterize(&mut self, text: &str, size_px: f32, color: Rgba8) -> HiscoreResult<Bitmap> {
        self.rendered.push(text.to_owned());
        let width = text.chars().count() as u32 * self.advance;
        Ok(Bitmap::new(width, size_px.ceil() as u32, color))
    }
}

/// Write `contents` to a per-test file under `target/`.
pub fn fixture(group: &str, name: &str, contents: &str) -> PathBuf {
    let dir = PathBuf::from("target").join(group);
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}
