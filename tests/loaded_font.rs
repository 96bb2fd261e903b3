use std::path::PathBuf;

use previewgen::{
    FontLoadOpts, FontOrigin, FontSource, ProgressSnapshot, ScreenRenderer, resolve_font,
};

fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn digest_u64(bytes: &[u8]) -> u64 {
    let mut state = 0x9E37_79B9_7F4A_7C15u64;
    for chunk in bytes.chunks(8) {
        let mut v = 0u64;
        for (i, &b) in chunk.iter().enumerate() {
            v |= (b as u64) << (i * 8);
        }
        state = mix64(state ^ v);
    }
    state
}

/// First default candidate present on this machine. Both tests skip when
/// there is none, the same way the run itself would fall back.
fn installed_candidate() -> Option<PathBuf> {
    FontLoadOpts::default()
        .candidates
        .into_iter()
        .find(|path| path.exists())
}

fn candidate_only(path: PathBuf) -> FontLoadOpts {
    FontLoadOpts {
        candidates: vec![path],
        include_system: false,
    }
}

fn first_snapshot() -> ProgressSnapshot {
    ProgressSnapshot {
        spinner: '⠋',
        active_step: 0,
        done_steps: 0,
        stages_done: 0,
    }
}

#[test]
fn installed_candidate_loads_with_candidate_origin() {
    let Some(path) = installed_candidate() else {
        return;
    };

    let source = resolve_font(&candidate_only(path));
    let FontSource::Loaded { origin, .. } = source else {
        panic!("candidate font on disk did not load");
    };
    assert_eq!(origin, FontOrigin::Candidate);
}

#[test]
fn loaded_font_renders_deterministic_shaped_frames() {
    let Some(path) = installed_candidate() else {
        return;
    };

    let mut renderer = ScreenRenderer::new(resolve_font(&candidate_only(path)));
    assert!(!renderer.uses_builtin_font());

    let snapshot = first_snapshot();
    let a = renderer.render(&snapshot).unwrap();
    let b = renderer.render(&snapshot).unwrap();

    assert_eq!(a.width, 1280);
    assert_eq!(a.height, 760);
    assert_eq!(a.data.len(), 1280 * 760 * 4);
    assert_eq!(digest_u64(&a.data), digest_u64(&b.data));

    let mut fallback = ScreenRenderer::new(FontSource::Builtin);
    let bitmap = fallback.render(&snapshot).unwrap();
    assert_ne!(digest_u64(&a.data), digest_u64(&bitmap.data));
}
