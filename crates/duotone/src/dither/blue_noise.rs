//! Per-pixel random threshold dithering.
//!
//! Despite the name this is white noise: one uniform `0..=255` draw per
//! pixel, taken sequentially from a single RNG in row-major order. The
//! threshold is `trunc(noise * clamp(strength, 0, 1))`, so strength `1.0`
//! behaves like a uniformly random cut and strength `0.0` maps every
//! non-black pixel to the bright color.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{tone, Dither, DitherParams};
use crate::buffer::PixelBuffer;

/// Where the noise RNG of a render call comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoiseSource {
    /// A fresh OS-seeded generator per call; renders are not reproducible.
    #[default]
    Entropy,
    /// A generator seeded with a fixed value; identical inputs give
    /// identical output.
    Seeded(u64),
}

impl NoiseSource {
    /// Build the generator for one call.
    pub fn rng(&self) -> StdRng {
        match *self {
            NoiseSource::Entropy => StdRng::from_entropy(),
            NoiseSource::Seeded(seed) => StdRng::seed_from_u64(seed),
        }
    }
}

/// Random-threshold dithering.
///
/// # Example
///
/// ```
/// use duotone::{
///     Dither, DitherParams, NoiseSource, PixelBuffer, PixelLayout, StochasticBlueNoise,
/// };
///
/// let mut a = vec![128u8; 16 * 16 * 3];
/// let mut b = a.clone();
/// let noise = StochasticBlueNoise::new(NoiseSource::Seeded(7));
///
/// let params = DitherParams::new();
/// noise.apply(&mut PixelBuffer::packed(&mut a, 16, 16, PixelLayout::Rgb8).unwrap(), &params);
/// noise.apply(&mut PixelBuffer::packed(&mut b, 16, 16, PixelLayout::Rgb8).unwrap(), &params);
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StochasticBlueNoise {
    source: NoiseSource,
}

impl StochasticBlueNoise {
    pub fn new(source: NoiseSource) -> Self {
        Self { source }
    }

    pub fn source(&self) -> NoiseSource {
        self.source
    }

    /// Dither with noise drawn from a caller-supplied generator.
    ///
    /// Exactly `width * height` bytes are drawn, in row-major order.
    pub fn apply_with_rng<R: Rng + ?Sized>(
        &self,
        buf: &mut PixelBuffer<'_>,
        params: &DitherParams,
        rng: &mut R,
    ) {
        let width = buf.width();
        let noise: Vec<u8> = (0..width * buf.height()).map(|_| rng.gen::<u8>()).collect();
        let strength = params.strength.clamp(0.0, 1.0);
        let layout = buf.layout();
        let bpp = layout.bytes_per_pixel();
        let dark = tone(false, params);
        let bright = tone(true, params);

        for (row, noise_row) in buf.rows_mut().zip(noise.chunks(width.max(1))) {
            for (px, &n) in row.chunks_exact_mut(bpp).zip(noise_row) {
                let threshold = (f64::from(n) * strength) as i32;
                let rgb = if layout.read(px).grayscale() > threshold {
                    bright
                } else {
                    dark
                };
                layout.write_rgb(px, rgb);
            }
        }
    }
}

impl Dither for StochasticBlueNoise {
    fn apply(&self, buf: &mut PixelBuffer<'_>, params: &DitherParams) {
        let mut rng = self.source.rng();
        self.apply_with_rng(buf, params, &mut rng);
    }
}
