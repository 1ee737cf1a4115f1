use crate::{
    foundation::core::{PixelRect, Rgba8},
    foundation::error::{HiscoreError, HiscoreResult},
    raster::composite::{PremulRgba8, over, unpremultiply},
};

/// Owned premultiplied RGBA8 pixel buffer, row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl std::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl Bitmap {
    /// New buffer filled with `fill`.
    pub fn new(width: u32, height: u32, fill: Rgba8) -> Self {
        let px = fill.to_premul();
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for _ in 0..(width as usize * height as usize) {
            data.extend_from_slice(&px);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Wrap existing premultiplied RGBA8 bytes; the length must be `width * height * 4`.
    pub fn from_premul_rgba8(width: u32, height: u32, data: Vec<u8>) -> HiscoreResult<Self> {
        if data.len() != width as usize * height as usize * 4 {
            return Err(HiscoreError::render("bitmap byte length mismatch"));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Premultiplied RGBA8 bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// True when the bitmap has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Premultiplied pixel at `(x, y)`, `None` outside.
    pub fn pixel(&self, x: u32, y: u32) -> Option<PremulRgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.offset(x, y);
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Overwrite every pixel with `color`.
    pub fn fill(&mut self, color: Rgba8) {
        let px = color.to_premul();
        for chunk in self.data.chunks_exact_mut(4) {
            chunk.copy_from_slice(&px);
        }
    }

    /// Composite `src` (or the `source` area of it) with its top-left corner at `(x, y)`.
    ///
    /// The source area is clipped to `src`, the destination to `self`.
    pub fn blit(&mut self, src: &Bitmap, x: i64, y: i64, source: Option<PixelRect>) {
        let area = source.unwrap_or(PixelRect::new(0, 0, src.width, src.height));
        if area.is_empty() {
            return;
        }

        let sx0 = area.x.max(0);
        let sy0 = area.y.max(0);
        let sx1 = (area.x + i64::from(area.width)).min(i64::from(src.width));
        let sy1 = (area.y + i64::from(area.height)).min(i64::from(src.height));
        if sx0 >= sx1 || sy0 >= sy1 {
            return;
        }

        // Destination origin of the clipped source area.
        let dx0 = x + (sx0 - area.x);
        let dy0 = y + (sy0 - area.y);

        let cx0 = dx0.max(0);
        let cy0 = dy0.max(0);
        let cx1 = (dx0 + (sx1 - sx0)).min(i64::from(self.width));
        let cy1 = (dy0 + (sy1 - sy0)).min(i64::from(self.height));
        if cx0 >= cx1 || cy0 >= cy1 {
            return;
        }

        for dy in cy0..cy1 {
            let sy = (sy0 + (dy - dy0)) as u32;
            for dx in cx0..cx1 {
                let sx = (sx0 + (dx - dx0)) as u32;
                let si = src.offset(sx, sy);
                let s = [
                    src.data[si],
                    src.data[si + 1],
                    src.data[si + 2],
                    src.data[si + 3],
                ];
                let di = self.offset(dx as u32, dy as u32);
                let d = [
                    self.data[di],
                    self.data[di + 1],
                    self.data[di + 2],
                    self.data[di + 3],
                ];
                self.data[di..di + 4].copy_from_slice(&over(d, s));
            }
        }
    }

    /// Copy of `rect`; pixels outside `self` come out transparent.
    pub fn crop(&self, rect: PixelRect) -> Bitmap {
        let mut out = Bitmap::new(rect.width, rect.height, Rgba8::TRANSPARENT);
        out.blit(self, 0, 0, Some(rect));
        out
    }

    /// Nearest-neighbour resample to `width` x `height`.
    pub fn scale(&self, width: u32, height: u32) -> Bitmap {
        let mut out = Bitmap::new(width, height, Rgba8::TRANSPARENT);
        if self.is_empty() || width == 0 || height == 0 {
            return out;
        }

        for y in 0..height {
            let sy = (u64::from(y) * u64::from(self.height) / u64::from(height)) as u32;
            for x in 0..width {
                let sx = (u64::from(x) * u64::from(self.width) / u64::from(width)) as u32;
                let si = self.offset(sx, sy);
                let di = out.offset(x, y);
                out.data[di..di + 4].copy_from_slice(&self.data[si..si + 4]);
            }
        }
        out
    }

    /// Pixels converted to straight alpha, for encoders.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len());
        for px in self.data.chunks_exact(4) {
            out.extend_from_slice(&unpremultiply([px[0], px[1], px[2], px[3]]));
        }
        out
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/bitmap.rs"]
mod tests;
