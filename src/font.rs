//! Font discovery.
//!
//! The preview wants a monospace face but must render on any machine,
//! including bare CI containers with no fonts installed. Resolution walks a
//! fixed candidate list, then system fonts, then settles on the embedded
//! bitmap face. It never fails.

use std::path::PathBuf;
use std::sync::Arc;

/// Controls where [`resolve_font`] looks.
#[derive(Clone, Debug)]
pub struct FontLoadOpts {
    /// Candidate font files, tried in order. Unreadable or unparsable
    /// entries are skipped.
    pub candidates: Vec<PathBuf>,
    /// Fall back to system font discovery when no candidate loads.
    pub include_system: bool,
}

impl Default for FontLoadOpts {
    fn default() -> Self {
        Self {
            candidates: default_candidates(),
            include_system: true,
        }
    }
}

impl FontLoadOpts {
    /// Options that skip disk entirely and resolve to the built-in face.
    /// Keeps rendering tests independent of installed fonts.
    pub fn builtin_only() -> Self {
        Self {
            candidates: Vec::new(),
            include_system: false,
        }
    }
}

/// Monospace faces at their usual install locations, preferred order.
fn default_candidates() -> Vec<PathBuf> {
    [
        "/System/Library/Fonts/Menlo.ttc",
        "/Library/Fonts/MesloLGS NF Regular.ttf",
        "/Library/Fonts/Courier New.ttf",
        "/System/Library/Fonts/Supplemental/Courier New.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
    ]
    .into_iter()
    .map(PathBuf::from)
    .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontOrigin {
    Candidate,
    System,
}

/// Resolved face handed to the text shaper.
#[derive(Clone, Debug)]
pub enum FontSource {
    /// Font file bytes plus the face index within them.
    Loaded {
        bytes: Arc<Vec<u8>>,
        index: u32,
        origin: FontOrigin,
    },
    /// Embedded 5x7 bitmap font.
    Builtin,
}

impl FontSource {
    pub fn is_builtin(&self) -> bool {
        matches!(self, Self::Builtin)
    }
}

/// Pick the face used for the whole animation. Infallible: the built-in
/// bitmap font is the floor.
pub fn resolve_font(opts: &FontLoadOpts) -> FontSource {
    for path in &opts.candidates {
        let mut db = fontdb::Database::new();
        let _ = db.load_font_file(path);
        if let Some(source) = pick_face(&db, FontOrigin::Candidate) {
            tracing::debug!(path = %path.display(), "loaded candidate font");
            return source;
        }
    }

    if opts.include_system {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        if let Some(source) = pick_face(&db, FontOrigin::System) {
            tracing::debug!("using system font");
            return source;
        }
    }

    tracing::debug!("no font files available, using built-in bitmap face");
    FontSource::Builtin
}

fn pick_face(db: &fontdb::Database, origin: FontOrigin) -> Option<FontSource> {
    let query = fontdb::Query {
        families: &[fontdb::Family::Monospace],
        weight: fontdb::Weight::NORMAL,
        stretch: fontdb::Stretch::Normal,
        style: fontdb::Style::Normal,
    };
    let id = match db.query(&query) {
        Some(id) => id,
        None => db.faces().next().map(|f| f.id)?,
    };
    db.with_face_data(id, |data, index| FontSource::Loaded {
        bytes: Arc::new(data.to_vec()),
        index,
        origin,
    })
}
