use crate::foundation::error::{HiscoreError, HiscoreResult};

/// Drawable area in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Canvas of `width` x `height`; both must be > 0.
    pub fn new(width: u32, height: u32) -> HiscoreResult<Self> {
        if width == 0 || height == 0 {
            return Err(HiscoreError::config("canvas width and height must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// Parse a `WIDTHxHEIGHT` geometry string. Only `^\d+x\d+$` is accepted.
    pub fn parse_geometry(s: &str) -> HiscoreResult<Self> {
        let bad = || HiscoreError::config(format!("geometry '{s}' is not [width]x[height]"));

        let (w, h) = s.split_once('x').ok_or_else(bad)?;
        let is_digits = |v: &str| !v.is_empty() && v.bytes().all(|b| b.is_ascii_digit());
        if !is_digits(w) || !is_digits(h) {
            return Err(bad());
        }

        let width: u32 = w
            .parse()
            .map_err(|_| HiscoreError::config(format!("geometry width '{w}' out of range")))?;
        let height: u32 = h
            .parse()
            .map_err(|_| HiscoreError::config(format!("geometry height '{h}' out of range")))?;
        Self::new(width, height)
    }

    /// Width as a signed coordinate.
    pub fn width_i64(self) -> i64 {
        i64::from(self.width)
    }

    /// Height as a signed coordinate.
    pub fn height_i64(self) -> i64 {
        i64::from(self.height)
    }
}

impl std::fmt::Display for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque black.
    pub const BLACK: Self = Self::opaque(0x00, 0x00, 0x00);
    /// Opaque white.
    pub const WHITE: Self = Self::opaque(0xff, 0xff, 0xff);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    /// Fully opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    /// Premultiplied `[r, g, b, a]` bytes.
    pub fn to_premul(self) -> [u8; 4] {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        [
            premul(self.r, self.a),
            premul(self.g, self.a),
            premul(self.b, self.a),
            self.a,
        ]
    }
}

/// Integer pixel rectangle, origin top-left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelRect {
    /// Left edge.
    pub x: i64,
    /// Top edge.
    pub y: i64,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelRect {
    /// Rectangle with its top-left corner at `(x, y)`.
    pub fn new(x: i64, y: i64, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// One pixel tall strip spanning `width` columns at row `y`.
    pub fn row(y: i64, width: u32) -> Self {
        Self::new(0, y, width, 1)
    }

    /// True when the rectangle covers no pixels.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
