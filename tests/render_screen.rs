use previewgen::{FontLoadOpts, FontSource, ProgressSnapshot, ScreenRenderer, resolve_font};

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

fn first_snapshot() -> ProgressSnapshot {
    ProgressSnapshot {
        spinner: '⠋',
        active_step: 0,
        done_steps: 0,
        stages_done: 0,
    }
}

#[test]
fn builtin_render_is_deterministic_and_nonempty() {
    let mut renderer = ScreenRenderer::new(FontSource::Builtin);
    let snapshot = first_snapshot();

    let a = renderer.render(&snapshot).unwrap();
    let b = renderer.render(&snapshot).unwrap();

    assert_eq!(a.width, 1280);
    assert_eq!(a.height, 760);
    assert!(a.premultiplied);
    assert_eq!(a.data.len(), 1280 * 760 * 4);
    assert_eq!(digest_u64(&a.data), digest_u64(&b.data));
    assert!(a.data.iter().any(|&x| x != 0));
}

#[test]
fn progress_changes_move_pixels() {
    let mut renderer = ScreenRenderer::new(FontSource::Builtin);

    let spinning = renderer.render(&first_snapshot()).unwrap();
    let settled = renderer
        .render(&ProgressSnapshot {
            spinner: '⠿',
            active_step: 2,
            done_steps: 3,
            stages_done: 6,
        })
        .unwrap();

    assert_ne!(digest_u64(&spinning.data), digest_u64(&settled.data));
}

#[test]
fn out_of_range_snapshots_are_rejected() {
    let mut renderer = ScreenRenderer::new(FontSource::Builtin);

    let bad_step = ProgressSnapshot {
        active_step: 3,
        ..first_snapshot()
    };
    let err = renderer.render(&bad_step).unwrap_err();
    assert!(err.to_string().contains("validation error:"));

    let bad_done = ProgressSnapshot {
        done_steps: 4,
        ..first_snapshot()
    };
    assert!(bad_done.validate().is_err());

    let bad_stages = ProgressSnapshot {
        stages_done: 7,
        ..first_snapshot()
    };
    assert!(bad_stages.validate().is_err());
}

#[test]
fn builtin_only_resolution_reports_builtin() {
    let source = resolve_font(&FontLoadOpts::builtin_only());
    assert!(source.is_builtin());

    let renderer = ScreenRenderer::new(source);
    assert!(renderer.uses_builtin_font());
}
