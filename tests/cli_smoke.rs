use std::path::{Path, PathBuf};

fn exe() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_ledanim")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "ledanim.exe"
            } else {
                "ledanim"
            });
            p
        })
}

fn write_png(path: &Path, width: u32, height: u32, rgba: [u8; 4]) {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    img.save_with_format(path, image::ImageFormat::Png).unwrap();
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("cli_smoke").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn cli_conform_writes_display_sized_png() {
    let dir = scratch_dir("conform");
    let in_path = dir.join("in.png");
    let out_path = dir.join("out.png");
    write_png(&in_path, 64, 48, [10, 10, 10, 255]);

    let status = std::process::Command::new(exe())
        .arg("conform")
        .arg("--in")
        .arg(&in_path)
        .arg("--out")
        .arg(&out_path)
        .status()
        .unwrap();

    assert!(status.success());
    let out = image::open(&out_path).unwrap().to_rgba8();
    assert_eq!(out.dimensions(), (12, 8));
    assert!(out.pixels().all(|p| p.0 == [0, 0, 0, 255]));
}

#[test]
fn cli_animate_writes_header() {
    let dir = scratch_dir("animate");
    let a = dir.join("a.png");
    let b = dir.join("b.png");
    write_png(&a, 24, 16, [0, 0, 0, 255]);
    write_png(&b, 30, 30, [255, 255, 255, 255]);
    let out_path = dir.join("anim.h");
    let preview = dir.join("preview");

    let status = std::process::Command::new(exe())
        .args(["animate", "--fps", "10", "--name", "demo", "--out"])
        .arg(&out_path)
        .arg("--preview-dir")
        .arg(&preview)
        .arg(&a)
        .arg(&b)
        .status()
        .unwrap();

    assert!(status.success());
    let header = std::fs::read_to_string(&out_path).unwrap();
    assert!(header.contains("const uint32_t demo[][4] = {"));
    assert!(header.contains("{ 0xFFFFFFFF, 0xFFFFFFFF, 0xFFFFFFFF, 100 },"));
    assert!(header.contains("{ 0x00000000, 0x00000000, 0x00000000, 100 },"));
    assert!(preview.join("frame_0001.png").exists());
}

#[test]
fn cli_animate_refuses_existing_output() {
    let dir = scratch_dir("no_clobber");
    let a = dir.join("a.png");
    write_png(&a, 12, 8, [0, 0, 0, 255]);
    let out_path = dir.join("anim.json");
    std::fs::write(&out_path, "keep").unwrap();

    let status = std::process::Command::new(exe())
        .args(["animate", "--format", "json", "--out"])
        .arg(&out_path)
        .arg(&a)
        .status()
        .unwrap();

    assert!(!status.success());
    assert_eq!(std::fs::read_to_string(&out_path).unwrap(), "keep");
}
