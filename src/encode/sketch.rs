use std::{fmt::Write as _, path::PathBuf};

use anyhow::Context as _;

use crate::{
    animation::anim::Animation,
    assets::decode::ensure_parent_dir,
    display::format::DisplayFormat,
    foundation::{
        core::Fps,
        error::{LedError, LedResult},
    },
};

/// Packed frames ready to ship to the display, plus the timing they play at.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EncodedAnimation {
    pub fps: Fps,
    pub frame_duration_ms: u32,
    pub format: DisplayFormat,
    pub frames: Vec<Vec<u32>>,
}

impl EncodedAnimation {
    /// Conforms and encodes `anim`. The animation's frames are rewritten in the process.
    pub fn from_animation(anim: &mut Animation) -> LedResult<Self> {
        let frames = anim.to_encoded_frames()?;
        Ok(Self {
            fps: anim.fps(),
            frame_duration_ms: anim.frame_duration_ms(),
            format: *anim.format(),
            frames,
        })
    }

    pub fn size_bytes(&self) -> usize {
        self.frames.len() * self.format.bytes_per_frame()
    }

    /// Renders a C array of `{word0, .., wordN, duration_ms}` rows, the sequence layout
    /// the UNO R4 matrix library plays back.
    pub fn to_arduino_header(&self, name: &str) -> LedResult<String> {
        if !is_c_identifier(name) {
            return Err(LedError::validation(format!(
                "'{name}' is not a valid C identifier"
            )));
        }

        let columns = self.format.words_per_frame() + 1;
        let mut out = String::new();
        let _ = writeln!(
            out,
            "// {} frames, {}x{} cells, {} fps ({} bytes packed)",
            self.frames.len(),
            self.format.width,
            self.format.height,
            self.fps.get(),
            self.size_bytes()
        );
        let _ = writeln!(out, "#pragma once\n");
        let _ = writeln!(out, "const uint32_t {name}[][{columns}] = {{");
        for words in &self.frames {
            out.push_str("  {");
            for w in words {
                let _ = write!(out, " 0x{w:08X},");
            }
            let _ = writeln!(out, " {} }},", self.frame_duration_ms);
        }
        out.push_str("};\n");
        Ok(out)
    }

    pub fn to_json(&self) -> LedResult<String> {
        Ok(serde_json::to_string_pretty(self).context("serialize encoded animation")?)
    }
}

fn is_c_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ExportKind {
    #[default]
    Header,
    Json,
}

#[derive(Clone, Debug)]
pub struct ExportOpts {
    pub out_path: PathBuf,
    pub overwrite: bool,
    pub kind: ExportKind,
    /// C array name for [`ExportKind::Header`].
    pub name: String,
}

impl ExportOpts {
    pub fn validate(&self) -> LedResult<()> {
        if self.kind == ExportKind::Header && !is_c_identifier(&self.name) {
            return Err(LedError::validation(format!(
                "'{}' is not a valid C identifier",
                self.name
            )));
        }
        if !self.overwrite && self.out_path.exists() {
            return Err(LedError::validation(format!(
                "output file '{}' already exists",
                self.out_path.display()
            )));
        }
        Ok(())
    }
}

/// Writes `encoded` to `opts.out_path` in the requested format.
pub fn write_export(encoded: &EncodedAnimation, opts: &ExportOpts) -> LedResult<()> {
    opts.validate()?;
    let text = match opts.kind {
        ExportKind::Header => encoded.to_arduino_header(&opts.name)?,
        ExportKind::Json => encoded.to_json()?,
    };

    ensure_parent_dir(&opts.out_path)?;
    std::fs::write(&opts.out_path, text).map_err(|e| {
        LedError::source_unavailable(format!("write '{}': {e}", opts.out_path.display()))
    })?;
    tracing::info!(
        path = %opts.out_path.display(),
        frames = encoded.frames.len(),
        bytes = encoded.size_bytes(),
        "exported animation"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{foundation::core::Pixel, raster::image::RasterImage};

    fn sample() -> EncodedAnimation {
        EncodedAnimation {
            fps: Fps::new(15).unwrap(),
            frame_duration_ms: 66,
            format: DisplayFormat::UNO_R4,
            frames: vec![vec![1, 0, 0x8000_0000], vec![0xDEAD_BEEF, 2, 3]],
        }
    }

    #[test]
    fn header_rows_end_with_duration() {
        let text = sample().to_arduino_header("animation").unwrap();
        assert!(text.contains("const uint32_t animation[][4] = {"));
        assert!(text.contains("  { 0x00000001, 0x00000000, 0x80000000, 66 },"));
        assert!(text.contains("  { 0xDEADBEEF, 0x00000002, 0x00000003, 66 },"));
        assert!(text.trim_end().ends_with("};"));
    }

    #[test]
    fn header_rejects_bad_identifiers() {
        for bad in ["", "1frames", "my-anim", "a b"] {
            assert!(sample().to_arduino_header(bad).is_err(), "{bad:?}");
        }
        assert!(sample().to_arduino_header("_frames2").is_ok());
    }

    #[test]
    fn json_round_trips() {
        let enc = sample();
        let back: EncodedAnimation = serde_json::from_str(&enc.to_json().unwrap()).unwrap();
        assert_eq!(back, enc);
    }

    #[test]
    fn from_animation_captures_timing_and_frames() {
        let mut anim = Animation::new(Fps::new(4).unwrap());
        anim.add_unchanged(RasterImage::filled(2, 2, Pixel::BLACK));
        let enc = EncodedAnimation::from_animation(&mut anim).unwrap();
        assert_eq!(enc.frame_duration_ms, 250);
        assert_eq!(enc.frames, vec![vec![u32::MAX; 3]]);
        assert_eq!(enc.size_bytes(), 12);
    }

    #[test]
    fn export_refuses_to_clobber_without_overwrite() {
        let path = std::env::temp_dir()
            .join("ledanim_sketch_test")
            .join("anim.h");
        let mut opts = ExportOpts {
            out_path: path.clone(),
            overwrite: true,
            kind: ExportKind::Header,
            name: "animation".to_string(),
        };
        write_export(&sample(), &opts).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("0xDEADBEEF"));

        opts.overwrite = false;
        assert!(matches!(
            write_export(&sample(), &opts),
            Err(LedError::Validation(_))
        ));
    }
}
