use clap::Parser;

use previewgen::style::palette;
use previewgen::{FontLoadOpts, GifSink, ScreenRenderer, render_preview, resolve_font};

/// Output path, relative to the repository root the tool is run from.
const OUT_PATH: &str = "docs/assets/preview.gif";

/// Renders the docs preview GIF. Takes no arguments: the canvas, palette,
/// text, and frame schedule are all fixed.
#[derive(Parser, Debug)]
#[command(name = "previewgen", version)]
struct Cli {}

fn main() -> anyhow::Result<()> {
    let _cli = Cli::parse();

    let source = resolve_font(&FontLoadOpts::default());
    let mut renderer = ScreenRenderer::new(source);
    let mut sink = GifSink::new(OUT_PATH, palette::BACKGROUND);
    render_preview(&mut renderer, &mut sink)?;

    eprintln!("wrote {}", sink.out_path().display());
    Ok(())
}
