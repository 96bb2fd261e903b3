use std::path::PathBuf;

#[test]
fn cli_writes_preview_gif() {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();

    let out_path = dir.join("docs").join("assets").join("preview.gif");
    let _ = std::fs::remove_file(&out_path);

    let exe = std::env::var_os("CARGO_BIN_EXE_previewgen")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "previewgen.exe"
            } else {
                "previewgen"
            });
            p.canonicalize().unwrap_or(p)
        });

    // The tool writes docs/assets/preview.gif relative to its working
    // directory, so run it inside the scratch dir.
    let status = std::process::Command::new(exe)
        .current_dir(&dir)
        .status()
        .unwrap();

    assert!(status.success());
    assert!(out_path.exists());

    let bytes = std::fs::read(&out_path).unwrap();
    assert!(bytes.len() > 6);
    assert_eq!(&bytes[..6], b"GIF89a");
}
