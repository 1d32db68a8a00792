use std::str::FromStr;

use crate::foundation::error::{LedError, LedResult};

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Pixel {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Pixel {
    pub const BLACK: Pixel = Pixel::rgb(0, 0, 0);
    pub const WHITE: Pixel = Pixel::rgb(255, 255, 255);

    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Opaque color.
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::new(red, green, blue, 255)
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }

    /// Squared Euclidean distance in RGBA space. Exact, so comparisons between two
    /// distances never suffer from float rounding.
    pub fn distance_sq(self, other: Pixel) -> u32 {
        self.to_array()
            .iter()
            .zip(other.to_array())
            .map(|(&a, b)| {
                let d = u32::from(a.abs_diff(b));
                d * d
            })
            .sum()
    }

    pub fn distance(self, other: Pixel) -> f64 {
        f64::from(self.distance_sq(other)).sqrt()
    }
}

impl Default for Pixel {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<[u8; 4]> for Pixel {
    fn from([red, green, blue, alpha]: [u8; 4]) -> Self {
        Self::new(red, green, blue, alpha)
    }
}

/// Parses `RRGGBB` or `RRGGBBAA`, with an optional leading `#`.
impl FromStr for Pixel {
    type Err = LedError;

    fn from_str(s: &str) -> LedResult<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return Err(LedError::validation(format!(
                "color '{s}' must be RRGGBB or RRGGBBAA hex"
            )));
        }

        let channel = |i: usize| -> LedResult<u8> {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| LedError::validation(format!("color '{s}': {e}")))
        };

        let alpha = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, alpha))
    }
}

/// Whole frames per second, always > 0.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "u32", into = "u32")]
pub struct Fps(u32);

impl Fps {
    pub fn new(fps: u32) -> LedResult<Self> {
        if fps == 0 {
            return Err(LedError::validation("fps must be > 0"));
        }
        Ok(Self(fps))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Per-frame duration in whole milliseconds, never below 1.
    pub fn frame_duration_ms(self) -> u32 {
        (1000 / self.0).max(1)
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self(15)
    }
}

impl TryFrom<u32> for Fps {
    type Error = LedError;

    fn try_from(value: u32) -> LedResult<Self> {
        Self::new(value)
    }
}

impl From<Fps> for u32 {
    fn from(value: Fps) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha_defaults_to_opaque() {
        assert_eq!(Pixel::rgb(1, 2, 3).alpha, 255);
        assert_eq!(Pixel::default(), Pixel::new(0, 0, 0, 255));
    }

    #[test]
    fn distance_is_euclidean_over_four_channels() {
        let a = Pixel::new(0, 0, 0, 0);
        let b = Pixel::new(3, 4, 0, 0);
        assert_eq!(a.distance_sq(b), 25);
        assert_eq!(a.distance(b), 5.0);

        let c = Pixel::new(1, 1, 1, 1);
        assert_eq!(a.distance(c), 2.0);
        assert_eq!(Pixel::BLACK.distance(Pixel::BLACK), 0.0);
    }

    #[test]
    fn parse_hex_colors() {
        assert_eq!("ff0080".parse::<Pixel>().unwrap(), Pixel::rgb(255, 0, 128));
        assert_eq!(
            "#00000080".parse::<Pixel>().unwrap(),
            Pixel::new(0, 0, 0, 128)
        );
        assert!("fff".parse::<Pixel>().is_err());
        assert!("gg0000".parse::<Pixel>().is_err());
    }

    #[test]
    fn fps_rejects_zero_and_reports_duration() {
        assert!(Fps::new(0).is_err());
        assert_eq!(Fps::new(15).unwrap().frame_duration_ms(), 66);
        assert_eq!(Fps::new(5000).unwrap().frame_duration_ms(), 1);
        assert_eq!(Fps::default().get(), 15);
    }

    #[test]
    fn fps_serde_rejects_zero() {
        assert!(serde_json::from_str::<Fps>("0").is_err());
        assert_eq!(serde_json::from_str::<Fps>("24").unwrap().get(), 24);
    }
}
