//! Channel layouts for 8-bit pixel buffers.

use crate::color::Pixel;

/// Byte order of one pixel inside a buffer row.
///
/// The engine is layout-agnostic: every strategy reads and writes channels
/// through the offsets reported here. `Argb8` is the native 8-bit pixel
/// order of compositing hosts (alpha first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelLayout {
    /// `R, G, B` (3 bytes, no alpha)
    Rgb8,
    /// `R, G, B, A`
    #[default]
    Rgba8,
    /// `A, R, G, B`
    Argb8,
    /// `B, G, R, A`
    Bgra8,
}

impl PixelLayout {
    /// Number of bytes occupied by one pixel.
    #[inline]
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            PixelLayout::Rgb8 => 3,
            PixelLayout::Rgba8 | PixelLayout::Argb8 | PixelLayout::Bgra8 => 4,
        }
    }

    /// Byte offsets of the red, green and blue channels within a pixel.
    #[inline]
    pub const fn rgb_offsets(self) -> [usize; 3] {
        match self {
            PixelLayout::Rgb8 | PixelLayout::Rgba8 => [0, 1, 2],
            PixelLayout::Argb8 => [1, 2, 3],
            PixelLayout::Bgra8 => [2, 1, 0],
        }
    }

    /// Byte offset of the alpha channel, if the layout carries one.
    #[inline]
    pub const fn alpha_offset(self) -> Option<usize> {
        match self {
            PixelLayout::Rgb8 => None,
            PixelLayout::Rgba8 | PixelLayout::Bgra8 => Some(3),
            PixelLayout::Argb8 => Some(0),
        }
    }

    /// Decode the pixel whose first byte is `bytes[0]`.
    ///
    /// Layouts without alpha report an opaque pixel.
    #[inline]
    pub fn read(self, bytes: &[u8]) -> Pixel {
        let [r, g, b] = self.rgb_offsets();
        let alpha = self.alpha_offset().map_or(255, |a| bytes[a]);
        Pixel::new(bytes[r], bytes[g], bytes[b], alpha)
    }

    /// Overwrite the color channels of one pixel, leaving alpha untouched.
    #[inline]
    pub fn write_rgb(self, bytes: &mut [u8], rgb: [u8; 3]) {
        let offsets = self.rgb_offsets();
        for (offset, value) in offsets.into_iter().zip(rgb) {
            bytes[offset] = value;
        }
    }

    /// Overwrite every channel of one pixel, alpha included.
    #[inline]
    pub fn write(self, bytes: &mut [u8], pixel: Pixel) {
        self.write_rgb(bytes, pixel.rgb_bytes());
        if let Some(a) = self.alpha_offset() {
            bytes[a] = pixel.alpha;
        }
    }
}
