use std::path::Path;

use crate::{
    foundation::core::Rgba8,
    foundation::error::{HiscoreError, HiscoreResult},
    raster::bitmap::Bitmap,
    text::GlyphRenderer,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Shapes text with Parley and rasterizes glyph runs with `vello_cpu`.
///
/// One font face is registered at construction; every call lays out a single
/// unwrapped line with it.
pub struct ParleyGlyphRenderer {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
    font: vello_cpu::peniko::FontData,
}

impl ParleyGlyphRenderer {
    /// Load and register the font at `path`.
    pub fn from_file(path: &Path) -> HiscoreResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| HiscoreError::file_unavailable(path, e))?;
        Self::from_bytes(bytes)
    }

    /// Register a font from raw TTF/OTF bytes; the first family found is used.
    pub fn from_bytes(font_bytes: Vec<u8>) -> HiscoreResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.clone()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| HiscoreError::render("no font families registered from font bytes"))?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| HiscoreError::render("registered font family has no name"))?
            .to_string();

        tracing::debug!(family = %family_name, "font registered");

        let font = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), 0);
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font,
        })
    }

    /// Family name of the registered face.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> parley::Layout<TextBrushRgba8> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }
}

impl GlyphRenderer for ParleyGlyphRenderer {
    fn rasterize(&mut self, text: &str, size_px: f32, color: Rgba8) -> HiscoreResult<Bitmap> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(HiscoreError::render("text size_px must be finite and > 0"));
        }

        let layout = self.layout_line(text, size_px, color.into());

        let mut w = 0.0f64;
        let mut h = 0.0f64;
        for line in layout.lines() {
            let m = line.metrics();
            w = w.max(f64::from(m.advance));
            h += f64::from(m.ascent + m.descent + m.leading);
        }
        if h <= 0.0 {
            h = f64::from(size_px);
        }

        let to_u16 = |v: f64, what: &str| -> HiscoreResult<u16> {
            let v = v.ceil().max(1.0);
            if v > f64::from(u16::MAX) {
                return Err(HiscoreError::render(format!("text {what} exceeds u16")));
            }
            Ok(v as u16)
        };
        let height = to_u16(h, "height")?;
        if text.is_empty() {
            return Ok(Bitmap::new(1, u32::from(height), Rgba8::TRANSPARENT));
        }
        let width = to_u16(w, "width")?;

        let mut ctx = vello_cpu::RenderContext::new(width, height);
        let runs = layout.lines().flat_map(|line| line.items()).filter_map(|item| match item {
            parley::layout::PositionedLayoutItem::GlyphRun(run) => Some(run),
            parley::layout::PositionedLayoutItem::InlineBox(_) => None,
        });
        for run in runs {
            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));
            // pen positions already include the run offset and the line baseline
            let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(&self.font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.render_to_pixmap(&mut pixmap);

        Bitmap::from_premul_rgba8(
            u32::from(width),
            u32::from(height),
            pixmap.data_as_u8_slice().to_vec(),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/parley_cpu.rs"]
mod tests;
