//! 8-bit RGBA pixel value.

use std::fmt;
use std::str::FromStr;

use super::ParseColorError;

/// An 8-bit-per-channel color.
///
/// Used both for pixels read out of a [`PixelBuffer`](crate::PixelBuffer)
/// and for the two output colors of a dither pass. The engine operates on
/// the decoded channel values as-is: there is no gamma handling.
///
/// `alpha` is carried for completeness. Dither strategies never write it;
/// only the pixelation pass copies it along with the sampled pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pixel {
    /// Red channel (0..=255)
    pub red: u8,
    /// Green channel (0..=255)
    pub green: u8,
    /// Blue channel (0..=255)
    pub blue: u8,
    /// Alpha channel (0..=255), pass-through
    pub alpha: u8,
}

impl Pixel {
    /// Opaque black.
    pub const BLACK: Pixel = Pixel::rgb(0, 0, 0);

    /// Opaque white.
    pub const WHITE: Pixel = Pixel::rgb(255, 255, 255);

    /// Create a pixel from all four channels.
    #[inline]
    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Create an opaque pixel.
    ///
    /// # Example
    /// ```
    /// use duotone::Pixel;
    /// let red = Pixel::rgb(255, 0, 0);
    /// assert_eq!(red.alpha, 255);
    /// ```
    #[inline]
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::new(red, green, blue, 255)
    }

    /// Unweighted channel average `(R + G + B) / 3`, alpha excluded.
    ///
    /// This integer proxy is the luminance signal of every strategy.
    ///
    /// # Example
    /// ```
    /// use duotone::Pixel;
    /// assert_eq!(Pixel::rgb(50, 100, 151).grayscale(), 100);
    /// ```
    #[inline]
    pub const fn grayscale(self) -> i32 {
        (self.red as i32 + self.green as i32 + self.blue as i32) / 3
    }

    /// The color channels as `[R, G, B]`.
    #[inline]
    pub const fn rgb_bytes(self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }

    /// Whether the color channels equal those of `other`, ignoring alpha.
    #[inline]
    pub fn same_rgb(self, other: Pixel) -> bool {
        self.rgb_bytes() == other.rgb_bytes()
    }
}

impl fmt::Display for Pixel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

impl FromStr for Pixel {
    type Err = ParseColorError;

    /// Parse an opaque pixel from a hex string.
    ///
    /// Supports `#RRGGBB`, `RRGGBB`, `#RGB` and `RGB`. Parsing is
    /// case-insensitive and surrounding whitespace is trimmed.
    ///
    /// ```
    /// use duotone::Pixel;
    ///
    /// let bright: Pixel = "#FFFFFE".parse().unwrap();
    /// assert_eq!(bright, Pixel::rgb(255, 255, 254));
    ///
    /// let red: Pixel = "f00".parse().unwrap();
    /// assert_eq!(red, Pixel::rgb(255, 0, 0));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }

        match s.len() {
            3 => {
                // Shorthand: each digit doubles up (0xF -> 0xFF)
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::rgb(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::rgb(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}
