//! PNG frame I/O.
//!
//! Every decoded frame is normalized to packed 8-bit RGBA, the layout the
//! dither engine is handed. Frames without an alpha channel in the source
//! remember that and are written back as plain RGB.

use duotone::{Pixel, PixelBuffer, PixelLayout, PixelView};
use std::io::Cursor;

use crate::error::RenderError;

/// Owned, packed RGBA8 frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    has_alpha: bool,
    data: Vec<u8>,
}

impl Frame {
    /// Wrap packed RGBA8 bytes.
    pub fn from_rgba(
        width: u32,
        height: u32,
        has_alpha: bool,
        data: Vec<u8>,
    ) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::UnsupportedDimensions { width, height });
        }
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(RenderError::UnsupportedFormat(format!(
                "{} bytes of RGBA data for {}x{} (expected {})",
                data.len(),
                width,
                height,
                expected
            )));
        }
        Ok(Self {
            width,
            height,
            has_alpha,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the source image carried an alpha channel
    pub fn has_alpha(&self) -> bool {
        self.has_alpha
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn pixel(&self, x: u32, y: u32) -> Pixel {
        let at = (y as usize * self.width as usize + x as usize) * 4;
        PixelLayout::Rgba8.read(&self.data[at..at + 4])
    }

    pub fn view(&self) -> Result<PixelView<'_>, RenderError> {
        let view = PixelView::packed(
            &self.data,
            self.width as usize,
            self.height as usize,
            PixelLayout::Rgba8,
        )?;
        Ok(view)
    }

    pub fn buffer(&mut self) -> Result<PixelBuffer<'_>, RenderError> {
        let buf = PixelBuffer::packed(
            &mut self.data,
            self.width as usize,
            self.height as usize,
            PixelLayout::Rgba8,
        )?;
        Ok(buf)
    }
}

/// Decode a PNG into an RGBA frame.
///
/// Palette, grayscale and low bit depth images are expanded and 16-bit
/// channels stripped to 8 bits.
pub fn decode_png(bytes: &[u8]) -> Result<Frame, RenderError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| RenderError::PngDecode(e.to_string()))?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| RenderError::PngDecode(e.to_string()))?;

    if info.bit_depth != png::BitDepth::Eight {
        return Err(RenderError::UnsupportedFormat(format!(
            "{:?} bit depth after expansion",
            info.bit_depth
        )));
    }

    let (channels, has_alpha) = match info.color_type {
        png::ColorType::Grayscale => (1, false),
        png::ColorType::GrayscaleAlpha => (2, true),
        png::ColorType::Rgb => (3, false),
        png::ColorType::Rgba => (4, true),
        png::ColorType::Indexed => {
            return Err(RenderError::UnsupportedFormat(
                "indexed color after expansion".to_string(),
            ))
        }
    };

    let row_len = info.width as usize * channels;
    let mut rgba = Vec::with_capacity(info.width as usize * info.height as usize * 4);
    for row in buf.chunks_exact(info.line_size).take(info.height as usize) {
        for px in row[..row_len].chunks_exact(channels) {
            let pixel = match channels {
                1 => [px[0], px[0], px[0], 255],
                2 => [px[0], px[0], px[0], px[1]],
                3 => [px[0], px[1], px[2], 255],
                _ => [px[0], px[1], px[2], px[3]],
            };
            rgba.extend_from_slice(&pixel);
        }
    }

    tracing::trace!(
        width = info.width,
        height = info.height,
        color_type = ?info.color_type,
        "Decoded PNG"
    );
    Frame::from_rgba(info.width, info.height, has_alpha, rgba)
}

/// Encode a frame as an 8-bit RGB or RGBA PNG.
///
/// With `optimize`, the image is written with fast settings and then
/// re-compressed with oxipng. A failed optimization keeps the unoptimized
/// bytes.
pub fn encode_png(frame: &Frame, optimize: bool) -> Result<Vec<u8>, RenderError> {
    let (color_type, pixels) = if frame.has_alpha {
        (png::ColorType::Rgba, frame.data.clone())
    } else {
        let rgb = frame
            .data
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();
        (png::ColorType::Rgb, rgb)
    };

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, frame.width, frame.height);
        encoder.set_color(color_type);
        encoder.set_depth(png::BitDepth::Eight);
        if optimize {
            // oxipng picks compression and filters afterwards
            encoder.set_compression(png::Compression::Fast);
            encoder.set_filter(png::FilterType::NoFilter);
        }
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(&pixels)
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    let png_bytes = buf.into_inner();

    if !optimize {
        return Ok(png_bytes);
    }
    Ok(optimize_png(png_bytes))
}

/// Re-compress PNG bytes with oxipng, keeping the input on failure.
pub fn optimize_png(png_bytes: Vec<u8>) -> Vec<u8> {
    let before = png_bytes.len();
    match oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    ) {
        Ok(optimized) => {
            tracing::debug!(before, after = optimized.len(), "Optimized PNG");
            optimized
        }
        Err(e) => {
            tracing::warn!(%e, "PNG optimization failed, keeping unoptimized output");
            png_bytes
        }
    }
}
