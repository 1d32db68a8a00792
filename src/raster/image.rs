use crate::foundation::{
    core::Pixel,
    error::{LedError, LedResult},
};

/// Owned RGBA8 raster, row-major (`index = x + y * width`).
///
/// `pixels.len() == width * height` holds after every public operation. Cloning is a
/// deep copy.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct RasterImage {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) pixels: Vec<Pixel>,
}

impl RasterImage {
    /// Blank canvas of default (opaque black) pixels.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Pixel::default())
    }

    pub fn filled(width: u32, height: u32, pixel: Pixel) -> Self {
        Self {
            width,
            height,
            pixels: vec![pixel; width as usize * height as usize],
        }
    }

    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Pixel>) -> LedResult<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(LedError::invalid_dimension(format!(
                "{width}x{height} image needs {expected} pixels, got {}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Builds an image from a tightly packed straight-alpha RGBA8 buffer.
    pub fn from_rgba8(width: u32, height: u32, data: &[u8]) -> LedResult<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(LedError::source_unavailable(format!(
                "{width}x{height} RGBA8 buffer must be {expected} bytes, got {}",
                data.len()
            )));
        }
        let pixels = data
            .chunks_exact(4)
            .map(|px| Pixel::new(px[0], px[1], px[2], px[3]))
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_array()).collect()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn get(&self, x: u32, y: u32) -> LedResult<Pixel> {
        let idx = self.index(x, y)?;
        Ok(self.pixels[idx])
    }

    pub fn set(&mut self, x: u32, y: u32, pixel: Pixel) -> LedResult<()> {
        let idx = self.index(x, y)?;
        self.pixels[idx] = pixel;
        Ok(())
    }

    fn index(&self, x: u32, y: u32) -> LedResult<usize> {
        if x >= self.width || y >= self.height {
            return Err(LedError::out_of_bounds(format!(
                "({x}, {y}) is outside a {}x{} image",
                self.width, self.height
            )));
        }
        Ok(x as usize + y as usize * self.width as usize)
    }
}
