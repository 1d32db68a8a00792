use rayon::prelude::*;

use crate::{
    animation::shape::FrameShape,
    display::format::{DisplayFormat, OFF_COLOR, ON_COLOR},
    encode::frame::encode_frame,
    foundation::{
        core::Fps,
        error::{LedError, LedResult},
    },
    raster::image::RasterImage,
};

/// Ordered frames plus frame rate and dimension bookkeeping.
///
/// Frames are owned by value. Every insertion policy documents how it moves the
/// [`FrameShape`]; only [`Animation::add_raw`] and [`Animation::frames_mut`] bypass it.
#[derive(Clone, Debug, PartialEq)]
pub struct Animation {
    fps: Fps,
    frames: Vec<RasterImage>,
    shape: FrameShape,
    format: DisplayFormat,
}

impl Default for Animation {
    fn default() -> Self {
        Self::new(Fps::default())
    }
}

impl Animation {
    pub fn new(fps: Fps) -> Self {
        Self {
            fps,
            frames: Vec::new(),
            shape: FrameShape::EMPTY,
            format: DisplayFormat::UNO_R4,
        }
    }

    pub fn with_format(fps: Fps, format: DisplayFormat) -> LedResult<Self> {
        format.validate()?;
        Ok(Self {
            format,
            ..Self::new(fps)
        })
    }

    /// Builds an animation from existing frames. `uniform` is a hint: it is only
    /// honored when every frame really has the first frame's dimensions.
    pub fn from_frames(fps: Fps, frames: Vec<RasterImage>, uniform: bool) -> Self {
        let shape = match frames.first() {
            None => FrameShape::EMPTY,
            Some(first) => {
                let (w, h) = first.dimensions();
                let actual = frames.iter().all(|f| f.dimensions() == (w, h));
                if uniform && !actual {
                    tracing::debug!("uniform hint contradicted by frame dimensions");
                }
                if uniform && actual {
                    FrameShape::uniform(w, h)
                } else {
                    FrameShape::NonUniform
                }
            }
        };

        Self {
            fps,
            frames,
            shape,
            format: DisplayFormat::UNO_R4,
        }
    }

    pub fn fps(&self) -> Fps {
        self.fps
    }

    pub fn set_fps(&mut self, fps: u32) -> LedResult<()> {
        self.fps = Fps::new(fps)?;
        Ok(())
    }

    pub fn format(&self) -> &DisplayFormat {
        &self.format
    }

    pub fn frames(&self) -> &[RasterImage] {
        &self.frames
    }

    pub fn frames_cloned(&self) -> Vec<RasterImage> {
        self.frames.clone()
    }

    /// Direct mutable access to the stored frames.
    ///
    /// Changes made through this slice are not tracked: the reported [`FrameShape`] may
    /// no longer describe the frames. Call [`Animation::scale_all`] or
    /// [`Animation::conform_to_display_format`] afterwards to restore it.
    pub fn frames_mut(&mut self) -> &mut [RasterImage] {
        &mut self.frames
    }

    pub fn into_frames(self) -> Vec<RasterImage> {
        self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn shape(&self) -> FrameShape {
        self.shape
    }

    pub fn uniform_dimensions(&self) -> bool {
        self.shape.is_uniform()
    }

    pub fn width(&self) -> u32 {
        self.shape.dimensions().0
    }

    pub fn height(&self) -> u32 {
        self.shape.dimensions().1
    }

    /// Size of the animation once packed for the display, in bytes.
    pub fn encoded_size_bytes(&self) -> usize {
        self.frames.len() * self.format.bytes_per_frame()
    }

    pub fn frame_duration_ms(&self) -> u32 {
        self.fps.frame_duration_ms()
    }

    fn set_shape(&mut self, shape: FrameShape) {
        if self.shape != shape {
            tracing::debug!(from = ?self.shape, to = ?shape, "frame shape changed");
        }
        self.shape = shape;
    }

    /// Appends a frame rescaled to the shared dimensions. The first frame is taken
    /// as-is and defines them. Fails on an animation already marked non-uniform.
    pub fn add_normalized(&mut self, mut frame: RasterImage) -> LedResult<()> {
        if self.frames.is_empty() {
            let (w, h) = frame.dimensions();
            self.frames.push(frame);
            self.set_shape(FrameShape::uniform(w, h));
            return Ok(());
        }

        let FrameShape::Uniform { width, height } = self.shape else {
            return Err(LedError::non_uniform(
                "add_normalized requires frames of uniform dimensions",
            ));
        };
        if frame.dimensions() != (width, height) {
            frame.scale(width, height)?;
        }
        self.frames.push(frame);
        Ok(())
    }

    /// Appends a frame scaled to the display grid and binarized to the canonical colors.
    /// If earlier frames are not display-sized the animation becomes non-uniform.
    pub fn add_conformed_to_display(&mut self, mut frame: RasterImage) -> LedResult<()> {
        conform_frame(&mut frame, &self.format)?;

        let (w, h) = (self.format.width, self.format.height);
        let next = if self.frames.is_empty() {
            FrameShape::uniform(w, h)
        } else {
            self.shape.admit(w, h)
        };
        self.frames.push(frame);
        self.set_shape(next);
        Ok(())
    }

    /// Appends a frame untouched. A size mismatch marks the animation non-uniform.
    pub fn add_unchanged(&mut self, frame: RasterImage) {
        let (w, h) = frame.dimensions();
        let next = if self.frames.is_empty() {
            FrameShape::uniform(w, h)
        } else {
            self.shape.admit(w, h)
        };
        self.frames.push(frame);
        self.set_shape(next);
    }

    /// Appends a frame with no dimension bookkeeping at all.
    pub fn add_raw(&mut self, frame: RasterImage) {
        self.frames.push(frame);
    }

    /// Scales every frame to `width x height`; the animation is uniform afterwards.
    pub fn scale_all(&mut self, width: u32, height: u32) -> LedResult<()> {
        if width == 0 || height == 0 {
            return Err(LedError::invalid_dimension(format!(
                "scale_all target must be non-zero, got {width}x{height}"
            )));
        }
        ensure_sampleable(&self.frames)?;

        for frame in &mut self.frames {
            frame.scale(width, height)?;
        }
        self.set_shape(FrameShape::uniform(width, height));
        Ok(())
    }

    /// Scales and binarizes every frame for the display. Not reversible.
    pub fn conform_to_display_format(&mut self) -> LedResult<()> {
        self.format.validate()?;
        ensure_sampleable(&self.frames)?;

        let format = self.format;
        self.frames
            .par_iter_mut()
            .try_for_each(|frame| conform_frame(frame, &format))?;
        self.set_shape(FrameShape::uniform(format.width, format.height));
        Ok(())
    }

    /// Conforms every frame to the display, then packs each one. One word sequence per
    /// frame, in frame order.
    #[tracing::instrument(skip(self), fields(frames = self.frames.len()))]
    pub fn to_encoded_frames(&mut self) -> LedResult<Vec<Vec<u32>>> {
        if self.frames.is_empty() {
            return Err(LedError::empty_animation(
                "cannot encode an animation without frames",
            ));
        }
        self.conform_to_display_format()?;

        let format = self.format;
        self.frames
            .par_iter()
            .map(|frame| encode_frame(frame, ON_COLOR, OFF_COLOR, &format))
            .collect()
    }
}

fn conform_frame(frame: &mut RasterImage, format: &DisplayFormat) -> LedResult<()> {
    frame.scale(format.width, format.height)?;
    frame.binarize(ON_COLOR, OFF_COLOR);
    Ok(())
}

fn ensure_sampleable(frames: &[RasterImage]) -> LedResult<()> {
    if let Some(idx) = frames.iter().position(|f| f.width() == 0 || f.height() == 0) {
        return Err(LedError::invalid_dimension(format!(
            "frame {idx} is empty and cannot be scaled"
        )));
    }
    Ok(())
}
