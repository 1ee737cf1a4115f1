/// Premultiplied `[r, g, b, a]` pixel.
pub type PremulRgba8 = [u8; 4];

/// Source-over for premultiplied pixels.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    match src[3] {
        0 => dst,
        255 => src,
        sa => {
            let inv = 255u16 - u16::from(sa);
            let mut out = [0u8; 4];
            for i in 0..4 {
                out[i] = add_sat_u8(u16::from(src[i]), mul_div255(u16::from(dst[i]), inv));
            }
            out
        }
    }
}

/// Straight-alpha copy of a premultiplied pixel.
pub fn unpremultiply(px: PremulRgba8) -> [u8; 4] {
    match px[3] {
        0 => [0, 0, 0, 0],
        255 => px,
        a => {
            let a = u16::from(a);
            let f = |c: u8| ((u16::from(c) * 255 + a / 2) / a).min(255) as u8;
            [f(px[0]), f(px[1]), f(px[2]), px[3]]
        }
    }
}

fn mul_div255(x: u16, y: u16) -> u16 {
    let p = u32::from(x) * u32::from(y);
    ((p + 127) / 255) as u16
}

fn add_sat_u8(a: u16, b: u16) -> u8 {
    (a + b).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/raster/composite.rs"]
mod tests;
