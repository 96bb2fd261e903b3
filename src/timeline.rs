//! Frame schedule for the preview loop and the render driver.
//!
//! The animation is three spinner phases followed by a settle hold:
//! 6 + 6 + 8 frames at 70ms stepping through the braille spinner, then
//! 8 identical frames at 90ms with everything finished. The settle hold
//! repeats one image, so the driver renders it once and re-pushes the
//! pixels for the remaining frames.

use crate::encode::{FrameSink, SinkConfig};
use crate::error::PreviewResult;
use crate::screen::{ProgressSnapshot, ScreenRenderer};
use crate::style::CANVAS;
use crate::surface::FrameRgba;

/// Braille spinner cycle, in display order.
pub const SPINNER_GLYPHS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Glyph shown on the active step once the run has settled.
pub const SETTLE_GLYPH: char = '⠿';

const SPIN_DELAY_MS: u32 = 70;
const SETTLE_DELAY_MS: u32 = 90;
const SETTLE_FRAMES: usize = 8;

struct Phase {
    frames: usize,
    active_step: usize,
    done_steps: usize,
    stages_done: usize,
}

const SPIN_PHASES: [Phase; 3] = [
    Phase {
        frames: 6,
        active_step: 0,
        done_steps: 0,
        stages_done: 0,
    },
    Phase {
        frames: 6,
        active_step: 1,
        done_steps: 1,
        stages_done: 2,
    },
    Phase {
        frames: 8,
        active_step: 2,
        done_steps: 2,
        stages_done: 4,
    },
];

/// One frame of the schedule: what to draw and how long to show it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduledFrame {
    pub snapshot: ProgressSnapshot,
    pub delay_ms: u32,
}

/// Builds the full 28-frame loop. The spinner restarts from its first
/// glyph at each phase boundary.
pub fn schedule() -> Vec<ScheduledFrame> {
    let mut frames = Vec::with_capacity(
        SPIN_PHASES.iter().map(|p| p.frames).sum::<usize>() + SETTLE_FRAMES,
    );

    for phase in &SPIN_PHASES {
        for i in 0..phase.frames {
            frames.push(ScheduledFrame {
                snapshot: ProgressSnapshot {
                    spinner: SPINNER_GLYPHS[i % SPINNER_GLYPHS.len()],
                    active_step: phase.active_step,
                    done_steps: phase.done_steps,
                    stages_done: phase.stages_done,
                },
                delay_ms: SPIN_DELAY_MS,
            });
        }
    }

    let settled = ProgressSnapshot {
        spinner: SETTLE_GLYPH,
        active_step: 2,
        done_steps: 3,
        stages_done: 6,
    };
    for _ in 0..SETTLE_FRAMES {
        frames.push(ScheduledFrame {
            snapshot: settled,
            delay_ms: SETTLE_DELAY_MS,
        });
    }

    frames
}

/// Counters for one preview render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames delivered to the sink.
    pub frames_total: u64,
    /// Frames that went through the rasterizer.
    pub frames_rendered: u64,
    /// Frames reused from the previous render because the snapshot
    /// did not change.
    pub frames_elided: u64,
}

/// Renders the whole schedule into `sink` and returns the counters.
///
/// Consecutive frames with equal snapshots are rasterized once; the sink
/// still receives every frame, in schedule order, with its own delay.
#[tracing::instrument(skip(renderer, sink))]
pub fn render_preview(
    renderer: &mut ScreenRenderer,
    sink: &mut dyn FrameSink,
) -> PreviewResult<RenderStats> {
    sink.begin(SinkConfig {
        width: CANVAS.width,
        height: CANVAS.height,
    })?;

    let mut stats = RenderStats::default();
    let mut last: Option<(ProgressSnapshot, FrameRgba)> = None;

    for scheduled in schedule() {
        stats.frames_total += 1;

        match &last {
            Some((snapshot, frame)) if *snapshot == scheduled.snapshot => {
                stats.frames_elided += 1;
                sink.push_frame(frame, scheduled.delay_ms)?;
            }
            _ => {
                let frame = renderer.render(&scheduled.snapshot)?;
                stats.frames_rendered += 1;
                sink.push_frame(&frame, scheduled.delay_ms)?;
                last = Some((scheduled.snapshot, frame));
            }
        }
    }

    sink.end()?;
    tracing::debug!(?stats, "preview rendered");
    Ok(stats)
}
