use crate::{
    display::format::DisplayFormat,
    foundation::{
        core::Pixel,
        error::{LedError, LedResult},
    },
    raster::image::RasterImage,
};

/// Packs a display-sized, binarized frame into words, one bit per cell.
///
/// Cell `i = x + y * width` lands in word `i / word_bits` at bit `i % word_bits`
/// (least significant bit first). A bit is set when the cell equals `on`; any other
/// color counts as off.
pub fn encode_frame(
    image: &RasterImage,
    on: Pixel,
    off: Pixel,
    format: &DisplayFormat,
) -> LedResult<Vec<u32>> {
    format.validate()?;
    if !format.matches(image.width(), image.height()) {
        return Err(LedError::invalid_dimension(format!(
            "frame is {}x{}, display grid is {}x{}",
            image.width(),
            image.height(),
            format.width,
            format.height
        )));
    }

    let word_bits = format.word_bits as usize;
    let mut words = vec![0u32; format.words_per_frame()];
    let mut stray = 0usize;
    for (i, px) in image.pixels().iter().enumerate() {
        let (word, bit) = (i / word_bits, i % word_bits);
        if *px == on {
            words[word] |= 1 << bit;
        } else {
            if *px != off {
                stray += 1;
            }
            words[word] &= !(1 << bit);
        }
    }

    if stray > 0 {
        tracing::debug!(stray, "cells matching neither color were encoded as off");
    }
    Ok(words)
}

/// Expands packed words back into a display-sized two-color frame.
pub fn decode_frame(
    words: &[u32],
    on: Pixel,
    off: Pixel,
    format: &DisplayFormat,
) -> LedResult<RasterImage> {
    format.validate()?;
    if words.len() != format.words_per_frame() {
        return Err(LedError::invalid_dimension(format!(
            "display grid {}x{} needs {} words, got {}",
            format.width,
            format.height,
            format.words_per_frame(),
            words.len()
        )));
    }

    let word_bits = format.word_bits as usize;
    let pixels = (0..format.cell_count())
        .map(|i| {
            if (words[i / word_bits] >> (i % word_bits)) & 1 == 1 {
                on
            } else {
                off
            }
        })
        .collect();
    RasterImage::from_pixels(format.width, format.height, pixels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::format::{OFF_COLOR, ON_COLOR};

    fn blank() -> RasterImage {
        RasterImage::filled(12, 8, OFF_COLOR)
    }

    fn light(img: &mut RasterImage, cell: u32) {
        img.set(cell % 12, cell / 12, ON_COLOR).unwrap();
    }

    #[test]
    fn uno_r4_frame_is_three_words() {
        let words = encode_frame(&blank(), ON_COLOR, OFF_COLOR, &DisplayFormat::UNO_R4).unwrap();
        assert_eq!(words, vec![0, 0, 0]);
    }

    #[test]
    fn cell_addressing_is_row_major_lsb_first() {
        let f = DisplayFormat::UNO_R4;
        for (cell, word, bit) in [(0, 0, 0), (31, 0, 31), (32, 1, 0), (95, 2, 31)] {
            let mut img = blank();
            light(&mut img, cell);
            let words = encode_frame(&img, ON_COLOR, OFF_COLOR, &f).unwrap();
            let mut expected = vec![0u32; 3];
            expected[word] = 1 << bit;
            assert_eq!(words, expected, "cell {cell}");
        }
    }

    #[test]
    fn full_frame_sets_every_bit() {
        let img = RasterImage::filled(12, 8, ON_COLOR);
        let words = encode_frame(&img, ON_COLOR, OFF_COLOR, &DisplayFormat::UNO_R4).unwrap();
        assert_eq!(words, vec![u32::MAX; 3]);
    }

    #[test]
    fn unknown_colors_encode_as_off() {
        let mut img = blank();
        img.set(0, 0, Pixel::rgb(1, 2, 3)).unwrap();
        light(&mut img, 1);
        let words = encode_frame(&img, ON_COLOR, OFF_COLOR, &DisplayFormat::UNO_R4).unwrap();
        assert_eq!(words, vec![0b10, 0, 0]);
    }

    #[test]
    fn wrong_size_is_rejected() {
        let img = RasterImage::filled(8, 12, OFF_COLOR);
        assert!(matches!(
            encode_frame(&img, ON_COLOR, OFF_COLOR, &DisplayFormat::UNO_R4),
            Err(LedError::InvalidDimension(_))
        ));
    }

    #[test]
    fn partial_last_word_leaves_high_bits_clear() {
        let f = DisplayFormat {
            width: 5,
            height: 7,
            word_bits: 32,
        };
        let img = RasterImage::filled(5, 7, ON_COLOR);
        let words = encode_frame(&img, ON_COLOR, OFF_COLOR, &f).unwrap();
        assert_eq!(words, vec![u32::MAX, 0b111]);
    }

    #[test]
    fn decode_restores_lit_cells() {
        let mut img = blank();
        for cell in [0, 13, 32, 77, 95] {
            light(&mut img, cell);
        }
        let f = DisplayFormat::UNO_R4;
        let words = encode_frame(&img, ON_COLOR, OFF_COLOR, &f).unwrap();
        assert_eq!(decode_frame(&words, ON_COLOR, OFF_COLOR, &f).unwrap(), img);
        assert!(decode_frame(&words[..2], ON_COLOR, OFF_COLOR, &f).is_err());
    }
}
