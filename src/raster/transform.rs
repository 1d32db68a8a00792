use crate::{
    foundation::{
        core::Pixel,
        error::{LedError, LedResult},
    },
    raster::image::RasterImage,
};

fn ensure_non_zero(op: &str, width: u32, height: u32) -> LedResult<()> {
    if width == 0 || height == 0 {
        return Err(LedError::invalid_dimension(format!(
            "{op} target must be non-zero, got {width}x{height}"
        )));
    }
    Ok(())
}

impl RasterImage {
    /// Changes the canvas size without resampling. Existing content stays anchored at the
    /// top-left corner; new cells are default pixels.
    pub fn resize(&mut self, new_width: u32, new_height: u32) -> LedResult<()> {
        ensure_non_zero("resize", new_width, new_height)?;

        if new_width < self.width || new_height < self.height {
            tracing::warn!(
                from_width = self.width,
                from_height = self.height,
                new_width,
                new_height,
                "canvas resize crops image content"
            );
        }

        let keep_w = self.width.min(new_width) as usize;
        let keep_h = self.height.min(new_height) as usize;
        let old_w = self.width as usize;
        let new_w = new_width as usize;

        let mut pixels = vec![Pixel::default(); new_w * new_height as usize];
        for y in 0..keep_h {
            let src = &self.pixels[y * old_w..y * old_w + keep_w];
            pixels[y * new_w..y * new_w + keep_w].copy_from_slice(src);
        }

        self.pixels = pixels;
        self.width = new_width;
        self.height = new_height;
        Ok(())
    }

    /// Nearest-neighbor rescale with independent x/y factors (aspect ratio is not kept).
    #[tracing::instrument(skip(self), fields(from_width = self.width, from_height = self.height))]
    pub fn scale(&mut self, new_width: u32, new_height: u32) -> LedResult<()> {
        ensure_non_zero("scale", new_width, new_height)?;
        if self.width == 0 || self.height == 0 {
            return Err(LedError::invalid_dimension(format!(
                "cannot scale an empty {}x{} image",
                self.width, self.height
            )));
        }

        let scale_x = f64::from(new_width) / f64::from(self.width);
        let scale_y = f64::from(new_height) / f64::from(self.height);
        let max_x = self.width - 1;
        let max_y = self.height - 1;

        let mut pixels = Vec::with_capacity(new_width as usize * new_height as usize);
        for y in 0..new_height {
            // Float overshoot on the last row/column is clamped back into the source.
            let src_y = ((f64::from(y) / scale_y) as u32).min(max_y);
            let row = src_y as usize * self.width as usize;
            for x in 0..new_width {
                let src_x = ((f64::from(x) / scale_x) as u32).min(max_x);
                pixels.push(self.pixels[row + src_x as usize]);
            }
        }

        self.pixels = pixels;
        self.width = new_width;
        self.height = new_height;
        Ok(())
    }

    /// Replaces every pixel with whichever of `color_a`/`color_b` is closer in RGBA space.
    /// Equal distances resolve to `color_a`.
    pub fn binarize(&mut self, color_a: Pixel, color_b: Pixel) {
        for px in &mut self.pixels {
            *px = if px.distance_sq(color_a) <= px.distance_sq(color_b) {
                color_a
            } else {
                color_b
            };
        }
    }
}
