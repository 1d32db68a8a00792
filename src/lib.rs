//! ledanim turns raster images into two-color bitmaps for small LED matrices and packs
//! sequences of them into bit-packed animations.
//!
//! # Pipeline overview
//!
//! 1. **Load**: decode a PNG (or any format `image` reads) into a [`RasterImage`]
//! 2. **Transform**: [`RasterImage::resize`] (canvas), [`RasterImage::scale`]
//!    (nearest-neighbor), [`RasterImage::binarize`] (two-color quantization)
//! 3. **Collect**: insert frames into an [`Animation`] under one of its insertion policies
//! 4. **Encode**: [`Animation::to_encoded_frames`] conforms every frame to the
//!    [`DisplayFormat`] and packs it into `u32` words, one bit per cell
//! 5. **Export** (optional): write an Arduino header or JSON via [`write_export`]
//!
//! The default display is the Arduino UNO R4 12x8 matrix: 96 cells, three words per
//! frame, cell `x + y * 12` at bit `i % 32` of word `i / 32`.
#![forbid(unsafe_code)]

mod animation;
mod assets;
mod display;
mod encode;
mod foundation;
mod raster;

pub use animation::anim::Animation;
pub use animation::shape::FrameShape;
pub use assets::decode::{decode_image, ensure_parent_dir, load_image, save_png};
pub use display::format::{DisplayFormat, OFF_COLOR, ON_COLOR};
pub use encode::frame::{decode_frame, encode_frame};
pub use encode::sketch::{EncodedAnimation, ExportKind, ExportOpts, write_export};
pub use foundation::core::{Fps, Pixel};
pub use foundation::error::{LedError, LedResult};
pub use raster::image::RasterImage;
