//! Frame sinks and the animated GIF encoder.
//!
//! The renderer pushes frames through the [`FrameSink`] seam in schedule
//! order; [`GifSink`] is the production sink, [`InMemorySink`] serves tests.
//! GIF stores delays in centiseconds, so the schedule's 70ms and 90ms
//! durations encode exactly.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};

use crate::error::{PreviewError, PreviewResult};
use crate::style::Rgba8;
use crate::surface::FrameRgba;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
}

/// Sink contract for consuming rendered frames.
///
/// Ordering contract: `push_frame` is called in schedule order, each frame
/// paired with its display duration.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> PreviewResult<()>;
    /// Push one frame with its display duration.
    fn push_frame(&mut self, frame: &FrameRgba, delay_ms: u32) -> PreviewResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> PreviewResult<()>;
}

/// Palette sampling factor for the GIF quantizer: 1 is slowest/best,
/// 30 fastest. The flat dark artwork quantizes cleanly well below best.
const GIF_SPEED: i32 = 10;

/// Writes an infinitely looping animated GIF.
pub struct GifSink {
    out_path: PathBuf,
    bg: Rgba8,
    cfg: Option<SinkConfig>,
    encoder: Option<GifEncoder<File>>,
}

impl GifSink {
    /// `bg` is the opaque background frames are flattened onto before
    /// quantization.
    pub fn new(out_path: impl Into<PathBuf>, bg: Rgba8) -> Self {
        Self {
            out_path: out_path.into(),
            bg,
            cfg: None,
            encoder: None,
        }
    }

    pub fn out_path(&self) -> &Path {
        &self.out_path
    }
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> PreviewResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(PreviewError::validation(
                "sink width/height must be non-zero",
            ));
        }

        ensure_parent_dir(&self.out_path)?;
        let file = File::create(&self.out_path).with_context(|| {
            format!("failed to create output file '{}'", self.out_path.display())
        })?;

        let mut encoder = GifEncoder::new_with_speed(file, GIF_SPEED);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| PreviewError::encode(format!("failed to set gif loop count: {e}")))?;

        self.cfg = Some(cfg);
        self.encoder = Some(encoder);
        Ok(())
    }

    fn push_frame(&mut self, frame: &FrameRgba, delay_ms: u32) -> PreviewResult<()> {
        let Some(cfg) = self.cfg else {
            return Err(PreviewError::encode("gif sink is not started"));
        };
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(PreviewError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        let expected_len = (frame.width as usize) * (frame.height as usize) * 4;
        if frame.data.len() != expected_len {
            return Err(PreviewError::validation(
                "frame.data size mismatch with width*height*4",
            ));
        }

        let mut rgba = vec![0u8; frame.data.len()];
        flatten_to_opaque_rgba8(
            &mut rgba,
            &frame.data,
            frame.premultiplied,
            [self.bg.r, self.bg.g, self.bg.b, 255],
        )?;

        let buffer = RgbaImage::from_raw(frame.width, frame.height, rgba)
            .ok_or_else(|| PreviewError::encode("frame buffer has the wrong length"))?;
        let gif_frame = Frame::from_parts(buffer, 0, 0, Delay::from_numer_denom_ms(delay_ms, 1));

        let Some(encoder) = self.encoder.as_mut() else {
            return Err(PreviewError::encode("gif sink is already finalized"));
        };
        encoder
            .encode_frame(gif_frame)
            .map_err(|e| PreviewError::encode(format!("failed to encode gif frame: {e}")))?;
        Ok(())
    }

    fn end(&mut self) -> PreviewResult<()> {
        if self.encoder.take().is_none() {
            return Err(PreviewError::encode("gif sink is not started"));
        }
        tracing::debug!(path = %self.out_path.display(), "gif written");
        Ok(())
    }
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameRgba, u32)>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Captured `(frame, delay_ms)` pairs in push order.
    pub fn frames(&self) -> &[(FrameRgba, u32)] {
        &self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> PreviewResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, frame: &FrameRgba, delay_ms: u32) -> PreviewResult<()> {
        self.frames.push((frame.clone(), delay_ms));
        Ok(())
    }

    fn end(&mut self) -> PreviewResult<()> {
        Ok(())
    }
}

pub fn ensure_parent_dir(path: &Path) -> PreviewResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| {
            format!("failed to create output directory '{}'", parent.display())
        })?;
    }
    Ok(())
}

fn flatten_to_opaque_rgba8(
    dst: &mut [u8],
    src: &[u8],
    src_is_premul: bool,
    bg_rgba: [u8; 4],
) -> PreviewResult<()> {
    if dst.len() != src.len() || dst.len() % 4 != 0 {
        return Err(PreviewError::validation(
            "flatten_to_opaque_rgba8 expects equal-length rgba8 buffers",
        ));
    }

    let bg_r = u16::from(bg_rgba[0]);
    let bg_g = u16::from(bg_rgba[1]);
    let bg_b = u16::from(bg_rgba[2]);

    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = u16::from(s[3]);
        if a == 255 {
            d.copy_from_slice(s);
            d[3] = 255;
            continue;
        }

        let inv = 255u16 - a;

        let (r, g, b) = if src_is_premul {
            (
                u16::from(s[0]) + mul_div255(bg_r, inv),
                u16::from(s[1]) + mul_div255(bg_g, inv),
                u16::from(s[2]) + mul_div255(bg_b, inv),
            )
        } else {
            (
                mul_div255(u16::from(s[0]), a) + mul_div255(bg_r, inv),
                mul_div255(u16::from(s[1]), a) + mul_div255(bg_g, inv),
                mul_div255(u16::from(s[2]), a) + mul_div255(bg_b, inv),
            )
        };

        d[0] = r.min(255) as u8;
        d[1] = g.min(255) as u8;
        d[2] = b.min(255) as u8;
        d[3] = 255;
    }

    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}
