//! Raster drawing surface over `vello_cpu`.

use kurbo::Shape;

use crate::bitmap_font;
use crate::error::{PreviewError, PreviewResult};
use crate::style::{Canvas, Rgba8};
use crate::text::TextRun;

/// A rendered frame as RGBA8 pixels.
///
/// Frames come out of the rasterizer premultiplied; the flag makes that
/// explicit at the encoder boundary.
#[derive(Clone, Debug)]
pub struct FrameRgba {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

/// One frame's worth of drawing state.
pub struct Surface {
    ctx: vello_cpu::RenderContext,
    width: u16,
    height: u16,
}

impl Surface {
    pub fn new(canvas: Canvas) -> PreviewResult<Self> {
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| PreviewError::validation("canvas width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| PreviewError::validation("canvas height exceeds u16"))?;
        Ok(Self {
            ctx: vello_cpu::RenderContext::new(width, height),
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    /// Fill the whole canvas.
    pub fn clear(&mut self, color: Rgba8) {
        self.fill_rect(0.0, 0.0, f64::from(self.width), f64::from(self.height), color);
    }

    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba8) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.set_paint(color);
        self.ctx
            .fill_rect(&vello_cpu::kurbo::Rect::new(x, y, x + w, y + h));
    }

    pub fn fill_round_rect(&mut self, x: f64, y: f64, w: f64, h: f64, radius: f64, color: Rgba8) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.set_paint(color);
        let rr = kurbo::RoundedRect::new(x, y, x + w, y + h, radius);
        let mut path = vello_cpu::kurbo::BezPath::new();
        for el in rr.path_elements(0.1) {
            path.push(el);
        }
        self.ctx.fill_path(&path);
    }

    /// Rounded rectangle with an inward border, the way the screen draws its
    /// terminal shell and panels: border-color fill underneath, body fill
    /// inset by the border width.
    #[allow(clippy::too_many_arguments)]
    pub fn bordered_round_rect(
        &mut self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        radius: f64,
        border: f64,
        fill: Rgba8,
        border_color: Rgba8,
    ) {
        self.fill_round_rect(x, y, w, h, radius, border_color);
        let inner_radius = (radius - border).max(0.0);
        self.fill_round_rect(
            x + border,
            y + border,
            (w - 2.0 * border).max(0.0),
            (h - 2.0 * border).max(0.0),
            inner_radius,
            fill,
        );
    }

    /// Place a shaped run with its top-left corner at `(x, y)`. No wrapping,
    /// no clipping.
    pub fn text(&mut self, x: f64, y: f64, run: &TextRun) {
        match run {
            TextRun::Shaped { layout, font } => {
                self.ctx
                    .set_transform(vello_cpu::kurbo::Affine::translate((x, y)));
                for line in layout.lines() {
                    for item in line.items() {
                        let parley::layout::PositionedLayoutItem::GlyphRun(glyph_run) = item
                        else {
                            continue;
                        };
                        let brush = glyph_run.style().brush;
                        self.set_paint(brush);
                        let glyphs = glyph_run.glyphs().map(|g| vello_cpu::Glyph {
                            id: g.id,
                            x: g.x,
                            y: g.y,
                        });
                        self.ctx
                            .glyph_run(font)
                            .font_size(glyph_run.run().font_size())
                            .fill_glyphs(glyphs);
                    }
                }
            }
            TextRun::Bitmap { text, color, scale } => {
                self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                self.set_paint(*color);
                let s = f64::from(*scale);
                let mut pen_x = x;
                for ch in text.chars() {
                    let rows = bitmap_font::glyph(ch);
                    for row in 0..bitmap_font::GLYPH_ROWS {
                        let bits = rows[row as usize];
                        for col in 0..bitmap_font::GLYPH_COLS {
                            if bits & (0x10u8 >> col) != 0 {
                                let px = pen_x + f64::from(col) * s;
                                let py = y + f64::from(row) * s;
                                self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                                    px,
                                    py,
                                    px + s,
                                    py + s,
                                ));
                            }
                        }
                    }
                    pen_x += f64::from(bitmap_font::CELL_COLS) * s;
                }
            }
        }
    }

    /// Flush drawing and read the frame back.
    pub fn finish(mut self) -> FrameRgba {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        FrameRgba {
            width: self.width(),
            height: self.height(),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }

    fn set_paint(&mut self, color: Rgba8) {
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(
                color.r, color.g, color.b, color.a,
            ));
    }
}
