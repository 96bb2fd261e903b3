//! Text shaping.
//!
//! Loaded fonts go through Parley and come back as glyph layouts; the
//! built-in bitmap face skips shaping entirely and is drawn as scaled dot
//! cells. A font that fails to register degrades to the bitmap face rather
//! than failing the run.

use crate::bitmap_font;
use crate::error::{PreviewError, PreviewResult};
use crate::font::FontSource;
use crate::style::Rgba8;

/// One string prepared for drawing at a fixed size and color.
pub enum TextRun {
    /// Parley glyph layout plus the face to draw it with.
    Shaped {
        layout: parley::Layout<Rgba8>,
        font: vello_cpu::peniko::FontData,
    },
    /// Built-in 5x7 bitmap rendering at an integer dot scale.
    Bitmap {
        text: String,
        color: Rgba8,
        scale: u32,
    },
}

impl TextRun {
    pub fn is_bitmap(&self) -> bool {
        matches!(self, Self::Bitmap { .. })
    }
}

/// Stateful shaper owning the Parley contexts for the whole run.
pub struct TextShaper {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgba8>,
    /// Registered family name and drawable face, absent for the bitmap face.
    resolved: Option<(String, vello_cpu::peniko::FontData)>,
}

impl TextShaper {
    pub fn new(source: FontSource) -> Self {
        let mut font_ctx = parley::FontContext::default();
        let resolved = match &source {
            FontSource::Loaded { bytes, index, origin } => {
                match register_face(&mut font_ctx, bytes, *index) {
                    Ok((family, font)) => {
                        tracing::debug!(?origin, family = %family, "registered loaded font");
                        Some((family, font))
                    }
                    Err(err) => {
                        tracing::warn!(%err, "font registration failed, using built-in face");
                        None
                    }
                }
            }
            FontSource::Builtin => None,
        };
        Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            resolved,
        }
    }

    /// True when text will be drawn with the embedded bitmap face.
    pub fn uses_builtin(&self) -> bool {
        self.resolved.is_none()
    }

    /// Shape one line of text. Never wraps; the screen uses absolute
    /// coordinates and single-line strings only.
    pub fn shape(&mut self, text: &str, size_px: f32, color: Rgba8) -> TextRun {
        match &self.resolved {
            Some((family, font)) => {
                let mut builder = self
                    .layout_ctx
                    .ranged_builder(&mut self.font_ctx, text, 1.0, true);
                builder.push_default(parley::style::StyleProperty::FontStack(
                    parley::style::FontStack::Source(std::borrow::Cow::Owned(family.clone())),
                ));
                builder.push_default(parley::style::StyleProperty::FontSize(size_px));
                builder.push_default(parley::style::StyleProperty::Brush(color));

                let mut layout: parley::Layout<Rgba8> = builder.build(text);
                layout.break_all_lines(None);

                TextRun::Shaped {
                    layout,
                    font: font.clone(),
                }
            }
            None => TextRun::Bitmap {
                text: text.to_string(),
                color,
                scale: bitmap_font::dot_scale(size_px),
            },
        }
    }
}

fn register_face(
    font_ctx: &mut parley::FontContext,
    bytes: &[u8],
    index: u32,
) -> PreviewResult<(String, vello_cpu::peniko::FontData)> {
    let families = font_ctx
        .collection
        .register_fonts(parley::fontique::Blob::from(bytes.to_vec()), None);
    let family_id = families
        .first()
        .map(|(id, _)| *id)
        .ok_or_else(|| PreviewError::text("no font families registered from font bytes"))?;

    let family_name = font_ctx
        .collection
        .family_name(family_id)
        .ok_or_else(|| PreviewError::text("registered font family has no name"))?
        .to_string();

    let font =
        vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes.to_vec()), index);
    Ok((family_name, font))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{font_size, palette};

    #[test]
    fn builtin_source_shapes_to_bitmap_runs() {
        let mut shaper = TextShaper::new(FontSource::Builtin);
        assert!(shaper.uses_builtin());

        let run = shaper.shape("RepoSherlock", font_size::TITLE, palette::ACCENT);
        match run {
            TextRun::Bitmap { text, color, scale } => {
                assert_eq!(text, "RepoSherlock");
                assert_eq!(color, palette::ACCENT);
                assert_eq!(scale, 3);
            }
            TextRun::Shaped { .. } => panic!("expected a bitmap run"),
        }
    }

    #[test]
    fn garbage_font_bytes_degrade_to_bitmap() {
        let source = FontSource::Loaded {
            bytes: std::sync::Arc::new(b"not an sfnt".to_vec()),
            index: 0,
            origin: crate::font::FontOrigin::Candidate,
        };
        let mut shaper = TextShaper::new(source);
        assert!(shaper.uses_builtin());
        assert!(
            shaper
                .shape("x", font_size::BODY, palette::TEXT)
                .is_bitmap()
        );
    }
}
