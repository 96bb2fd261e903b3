//! Fixed visual parameters of the preview screen.
//!
//! The tool renders exactly one artwork, so the canvas size, palette, and
//! type sizes are part of the program, not configuration.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

/// Output canvas, 1280x760.
pub const CANVAS: Canvas = Canvas {
    width: 1280,
    height: 760,
};

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

impl Default for Rgba8 {
    fn default() -> Self {
        palette::TEXT
    }
}

/// Screen palette. Dark terminal theme with one accent hue.
pub mod palette {
    use super::Rgba8;

    /// Page background behind the terminal shell.
    pub const BACKGROUND: Rgba8 = Rgba8::opaque(10, 13, 20);
    /// Terminal shell fill.
    pub const TERMINAL_BG: Rgba8 = Rgba8::opaque(12, 16, 24);
    /// Terminal shell border.
    pub const TERMINAL_BORDER: Rgba8 = Rgba8::opaque(45, 58, 78);
    /// Panel fill.
    pub const PANEL_BG: Rgba8 = Rgba8::opaque(16, 22, 34);
    /// Panel border.
    pub const PANEL_BORDER: Rgba8 = Rgba8::opaque(64, 83, 110);
    /// Primary text.
    pub const TEXT: Rgba8 = Rgba8::opaque(215, 224, 238);
    /// Secondary text.
    pub const DIM: Rgba8 = Rgba8::opaque(136, 151, 175);
    /// Accent (titles, active markers).
    pub const ACCENT: Rgba8 = Rgba8::opaque(107, 240, 255);
    /// Success markers.
    pub const OK: Rgba8 = Rgba8::opaque(137, 255, 169);
    /// Footer hint.
    pub const WARN: Rgba8 = Rgba8::opaque(255, 215, 133);
}

/// Type scale, in pixels at 1x.
pub mod font_size {
    pub const SMALL: f32 = 14.0;
    pub const BODY: f32 = 17.0;
    pub const PANEL_TITLE: f32 = 21.0;
    pub const TITLE: f32 = 27.0;
}
