use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use image::AnimationDecoder;
use image::codecs::gif::GifDecoder;
use previewgen::style::palette;
use previewgen::{FontSource, GifSink, RenderStats, ScreenRenderer, render_preview};

#[test]
fn preview_gif_round_trips_schedule_and_loops() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let dir = PathBuf::from("target").join("preview_gif_test");
    std::fs::create_dir_all(&dir).unwrap();
    let out_path = dir.join("preview.gif");
    let _ = std::fs::remove_file(&out_path);

    let mut renderer = ScreenRenderer::new(FontSource::Builtin);
    let mut sink = GifSink::new(&out_path, palette::BACKGROUND);
    let stats = render_preview(&mut renderer, &mut sink).unwrap();

    assert_eq!(
        stats,
        RenderStats {
            frames_total: 28,
            frames_rendered: 21,
            frames_elided: 7,
        }
    );

    let bytes = std::fs::read(&out_path).unwrap();
    assert_eq!(&bytes[..6], b"GIF89a");
    // The Netscape application extension carries the infinite loop count.
    assert!(bytes.windows(11).any(|w| w == b"NETSCAPE2.0"));

    let decoder = GifDecoder::new(BufReader::new(File::open(&out_path).unwrap())).unwrap();
    let frames = decoder.into_frames().collect_frames().unwrap();
    assert_eq!(frames.len(), 28);

    for frame in &frames {
        assert_eq!(frame.buffer().width(), 1280);
        assert_eq!(frame.buffer().height(), 760);
    }

    for (i, frame) in frames.iter().enumerate() {
        let (numer, denom) = frame.delay().numer_denom_ms();
        let expected = if i < 20 { 70 } else { 90 };
        assert_eq!(numer, expected * denom, "frame {i} delay");
    }

    // Settle frames reuse one rasterization, so they decode identically;
    // consecutive spinner frames do not.
    assert_eq!(frames[20].buffer().as_raw(), frames[27].buffer().as_raw());
    assert_ne!(frames[0].buffer().as_raw(), frames[1].buffer().as_raw());
}
