use std::path::{Path, PathBuf};

use crate::{
    foundation::error::{HiscoreError, HiscoreResult},
    raster::bitmap::Bitmap,
    render::{Display, DisplayEvent},
};

/// Writes every presented frame as `frame_NNNNNN.png` into a directory.
///
/// Headless; never reports input events.
pub struct PngSequenceDisplay {
    dir: PathBuf,
    next: u64,
}

impl PngSequenceDisplay {
    /// Create `dir` if needed; frames are numbered from 0.
    pub fn create(dir: impl Into<PathBuf>) -> HiscoreResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| HiscoreError::file_unavailable(&dir, e))?;
        Ok(Self { dir, next: 0 })
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Number of frames written so far.
    pub fn written(&self) -> u64 {
        self.next
    }

    /// Path frame `index` is written to.
    pub fn frame_path(&self, index: u64) -> PathBuf {
        self.dir.join(format!("frame_{index:06}.png"))
    }
}

impl Display for PngSequenceDisplay {
    fn poll_events(&mut self) -> HiscoreResult<Vec<DisplayEvent>> {
        Ok(Vec::new())
    }

    fn present(&mut self, frame: &Bitmap) -> HiscoreResult<()> {
        let path = self.frame_path(self.next);
        image::save_buffer_with_format(
            &path,
            &frame.to_straight_rgba8(),
            frame.width(),
            frame.height(),
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| HiscoreError::render(format!("write png '{}': {e}", path.display())))?;

        tracing::trace!(path = %path.display(), "frame written");
        self.next += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/png.rs"]
mod tests;
