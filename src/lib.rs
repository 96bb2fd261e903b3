//! Procedural renderer for the RepoSherlock CLI preview animation.
//!
//! Everything about the output is fixed at compile time: the canvas, the
//! palette, the text, and the 28-frame loop. The pipeline is:
//!
//! - Resolve a monospace font with [`resolve_font`]; when nothing loads,
//!   rendering degrades to a builtin bitmap face instead of failing
//! - Rasterize one [`ProgressSnapshot`] at a time with [`ScreenRenderer`]
//! - Stream the whole schedule into a [`FrameSink`] via [`render_preview`]
#![forbid(unsafe_code)]

pub(crate) mod bitmap_font;
pub mod encode;
pub mod error;
pub mod font;
pub mod screen;
pub mod style;
pub mod surface;
pub(crate) mod text;
pub mod timeline;

pub use crate::encode::{FrameSink, GifSink, InMemorySink, SinkConfig};
pub use crate::error::{PreviewError, PreviewResult};
pub use crate::font::{FontLoadOpts, FontOrigin, FontSource, resolve_font};
pub use crate::screen::{ProgressSnapshot, ScreenRenderer};
pub use crate::style::{CANVAS, Canvas, Rgba8};
pub use crate::surface::FrameRgba;
pub use crate::timeline::{RenderStats, ScheduledFrame, render_preview, schedule};
