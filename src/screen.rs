//! The preview screen: one frame of the mock RepoSherlock progress UI.
//!
//! Every coordinate and string below is part of the artwork. The only
//! per-frame inputs are the four progress parameters in
//! [`ProgressSnapshot`]; everything else is fixed.

use crate::error::{PreviewError, PreviewResult};
use crate::font::FontSource;
use crate::style::{CANVAS, Rgba8, font_size, palette};
use crate::surface::{FrameRgba, Surface};
use crate::text::TextShaper;

const TITLE: &str = "RepoSherlock v0.1.0";
const SUBTITLE: &str = "Drop a repo URL. Get answers fast.";

const RUN_PLAN_LINES: [&str; 3] = [
    "Target: https://github.com/octocat/Hello-World",
    "LLM: enabled (mandatory)   Provider: openai   Model: gpt-5.2",
    "Try-Run: enabled           PR Draft: enabled",
];
const CONFIRM_LINE: &str = "✓ Starting analysis...";

const THINKING_STEPS: [&str; 3] = [
    "Validating repository target and runtime profile",
    "Planning scan strategy and safe execution path",
    "Preparing architecture, risk, and issue synthesis",
];
const NOTE_LINE: &str = "note: parsing modules and collecting risk signals...";

const STAGE_LINES: [&str; 6] = [
    "[RepoSherlock] A) Ingest done in 812ms",
    "[RepoSherlock] B) Scan + Understand done in 56ms",
    "[RepoSherlock] C) Risk Analysis done in 31ms",
    "[RepoSherlock] D) Actionable Issues done in 7ms",
    "[RepoSherlock] E) Try-Run Sandbox Pass done in 4.2s",
    "[RepoSherlock] F) LLM Polish Pass done in 3.1s",
];

const FOOTER: &str = "reposherlock -- analyze <target>";

const SHELL_INSET: f64 = 24.0;
const SHELL_RADIUS: f64 = 14.0;
const PANEL_RADIUS: f64 = 10.0;
const BORDER_WIDTH: f64 = 2.0;

/// Progress parameters for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgressSnapshot {
    /// Spinner glyph shown on the active thinking step.
    pub spinner: char,
    /// Index of the thinking step carrying the spinner, 0..=2.
    pub active_step: usize,
    /// Thinking steps already completed, 0..=3.
    pub done_steps: usize,
    /// Stage lines already completed, 0..=6.
    pub stages_done: usize,
}

impl ProgressSnapshot {
    pub fn validate(&self) -> PreviewResult<()> {
        if self.active_step >= THINKING_STEPS.len() {
            return Err(PreviewError::validation(format!(
                "active_step must be < {}, got {}",
                THINKING_STEPS.len(),
                self.active_step
            )));
        }
        if self.done_steps > THINKING_STEPS.len() {
            return Err(PreviewError::validation(format!(
                "done_steps must be <= {}, got {}",
                THINKING_STEPS.len(),
                self.done_steps
            )));
        }
        if self.stages_done > STAGE_LINES.len() {
            return Err(PreviewError::validation(format!(
                "stages_done must be <= {}, got {}",
                STAGE_LINES.len(),
                self.stages_done
            )));
        }
        Ok(())
    }
}

/// Thinking line: done wins over active, active wins over pending.
fn step_line(
    index: usize,
    text: &str,
    spinner: char,
    active_step: usize,
    done_steps: usize,
) -> (String, Rgba8) {
    if index < done_steps {
        (format!("✓ {text}"), palette::OK)
    } else if index == active_step {
        (format!("▶ {spinner} {text}"), palette::ACCENT)
    } else {
        (format!("• {text}"), palette::DIM)
    }
}

/// Stage line: done or pending, split at `stages_done`.
fn stage_line(index: usize, text: &str, stages_done: usize) -> (String, Rgba8) {
    if index < stages_done {
        (format!("✓ {text}"), palette::OK)
    } else {
        (format!("• {text}"), palette::DIM)
    }
}

/// Renders [`ProgressSnapshot`]s into full frames. Owns the text shaper, so
/// repeated renders reuse the shaping caches.
pub struct ScreenRenderer {
    text: TextShaper,
}

impl ScreenRenderer {
    pub fn new(source: FontSource) -> Self {
        Self {
            text: TextShaper::new(source),
        }
    }

    /// True when frames use the embedded bitmap face.
    pub fn uses_builtin_font(&self) -> bool {
        self.text.uses_builtin()
    }

    /// Render one frame. Pure given the resolved font: equal snapshots
    /// produce byte-identical frames.
    #[tracing::instrument(skip(self))]
    pub fn render(&mut self, snapshot: &ProgressSnapshot) -> PreviewResult<FrameRgba> {
        snapshot.validate()?;

        let mut surface = Surface::new(CANVAS)?;
        let w = f64::from(CANVAS.width);
        let h = f64::from(CANVAS.height);

        surface.clear(palette::BACKGROUND);

        // Terminal shell
        surface.bordered_round_rect(
            SHELL_INSET,
            SHELL_INSET,
            w - 2.0 * SHELL_INSET,
            h - 2.0 * SHELL_INSET,
            SHELL_RADIUS,
            BORDER_WIDTH,
            palette::TERMINAL_BG,
            palette::TERMINAL_BORDER,
        );

        self.text_at(&mut surface, 52.0, 62.0, TITLE, font_size::TITLE, palette::ACCENT);
        self.text_at(&mut surface, 52.0, 98.0, SUBTITLE, font_size::BODY, palette::DIM);

        // Run plan
        self.panel(&mut surface, 52.0, 130.0, w - 104.0, 165.0, Some("Run Plan"));
        self.text_at(
            &mut surface,
            76.0,
            172.0,
            RUN_PLAN_LINES[0],
            font_size::BODY,
            palette::TEXT,
        );
        self.text_at(
            &mut surface,
            76.0,
            200.0,
            RUN_PLAN_LINES[1],
            font_size::BODY,
            palette::TEXT,
        );
        self.text_at(
            &mut surface,
            76.0,
            228.0,
            RUN_PLAN_LINES[2],
            font_size::BODY,
            palette::TEXT,
        );
        self.text_at(&mut surface, 76.0, 258.0, CONFIRM_LINE, font_size::BODY, palette::OK);

        // Thinking panel
        self.panel(
            &mut surface,
            52.0,
            320.0,
            w - 104.0,
            220.0,
            Some("Sherlock Thinking"),
        );
        let mut y = 362.0;
        for (i, step) in THINKING_STEPS.iter().enumerate() {
            let (line, color) = step_line(
                i,
                step,
                snapshot.spinner,
                snapshot.active_step,
                snapshot.done_steps,
            );
            self.text_at(&mut surface, 74.0, y, &line, font_size::BODY, color);
            y += 34.0;
        }

        if snapshot.active_step == 2 && snapshot.done_steps < 3 {
            self.text_at(&mut surface, 74.0, 476.0, NOTE_LINE, font_size::SMALL, palette::DIM);
        }

        // Stages
        self.panel(&mut surface, 52.0, 566.0, w - 104.0, 150.0, Some("Stages"));
        let mut sy = 606.0;
        for (idx, stage) in STAGE_LINES.iter().enumerate() {
            let (line, color) = stage_line(idx, stage, snapshot.stages_done);
            self.text_at(&mut surface, 74.0, sy, &line, font_size::SMALL, color);
            sy += 18.0;
        }

        self.text_at(
            &mut surface,
            w - 360.0,
            h - 50.0,
            FOOTER,
            font_size::SMALL,
            palette::WARN,
        );

        Ok(surface.finish())
    }

    fn panel(
        &mut self,
        surface: &mut Surface,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        title: Option<&str>,
    ) {
        surface.bordered_round_rect(
            x,
            y,
            w,
            h,
            PANEL_RADIUS,
            BORDER_WIDTH,
            palette::PANEL_BG,
            palette::PANEL_BORDER,
        );
        if let Some(title) = title {
            self.text_at(
                surface,
                x + 18.0,
                y + 12.0,
                title,
                font_size::PANEL_TITLE,
                palette::ACCENT,
            );
        }
    }

    fn text_at(
        &mut self,
        surface: &mut Surface,
        x: f64,
        y: f64,
        text: &str,
        size: f32,
        color: Rgba8,
    ) {
        let run = self.text.shape(text, size, color);
        surface.text(x, y, &run);
    }
}
