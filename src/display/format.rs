use crate::foundation::{
    core::Pixel,
    error::{LedError, LedResult},
};

/// Color that lights a cell after display-format binarization.
pub const ON_COLOR: Pixel = Pixel::BLACK;
/// Color of an unlit cell after display-format binarization.
pub const OFF_COLOR: Pixel = Pixel::WHITE;

/// Target LED grid and the word width its frames are packed into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DisplayFormat {
    pub width: u32,
    pub height: u32,
    pub word_bits: u32,
}

impl DisplayFormat {
    /// Arduino UNO R4 WiFi LED matrix: 12x8 cells in three 32-bit words.
    pub const UNO_R4: DisplayFormat = DisplayFormat {
        width: 12,
        height: 8,
        word_bits: 32,
    };

    pub fn validate(&self) -> LedResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(LedError::invalid_dimension(format!(
                "display grid must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.word_bits == 0 || self.word_bits > u32::BITS {
            return Err(LedError::validation(format!(
                "display word_bits must be in 1..={}, got {}",
                u32::BITS,
                self.word_bits
            )));
        }
        Ok(())
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn words_per_frame(&self) -> usize {
        self.cell_count().div_ceil(self.word_bits as usize)
    }

    pub fn bytes_per_frame(&self) -> usize {
        (self.words_per_frame() * self.word_bits as usize).div_ceil(8)
    }

    pub fn matches(&self, width: u32, height: u32) -> bool {
        self.width == width && self.height == height
    }
}

impl Default for DisplayFormat {
    fn default() -> Self {
        Self::UNO_R4
    }
}
