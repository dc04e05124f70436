//! Strided, borrowed views over caller-owned pixel memory.
//!
//! The engine never allocates or frees frame memory. Callers hand in a byte
//! slice plus its geometry; [`PixelBuffer`] validates the geometry once and
//! then gives row-major access in place. [`PixelView`] is the read-only
//! counterpart used for pixelation sources.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::{BufferError, PixelLayout};
use crate::color::Pixel;

/// Validate that `len` bytes hold `height` rows of `width` pixels at `stride`.
fn validate(
    len: usize,
    width: usize,
    height: usize,
    stride: usize,
    layout: PixelLayout,
) -> Result<(), BufferError> {
    let min = width
        .checked_mul(layout.bytes_per_pixel())
        .ok_or(BufferError::Overflow)?;
    if stride < min {
        return Err(BufferError::StrideTooSmall { stride, min });
    }
    if width == 0 || height == 0 {
        return Ok(());
    }
    // The last row only needs its packed bytes, not a full stride.
    let required = (height - 1)
        .checked_mul(stride)
        .and_then(|n| n.checked_add(min))
        .ok_or(BufferError::Overflow)?;
    if len < required {
        return Err(BufferError::DataTooShort { len, required });
    }
    Ok(())
}

/// Mutable strided pixel buffer.
///
/// Row `y` starts at byte `y * stride`. Bytes between the end of a packed
/// row (`width * bytes_per_pixel`) and the next stride boundary are padding:
/// nothing in the engine reads or writes them.
///
/// # Example
///
/// ```
/// use duotone::{PixelBuffer, PixelLayout, Pixel};
///
/// // 2x2 RGBA frame with 4 bytes of padding per row
/// let mut data = vec![0u8; 2 * 12];
/// let mut buf = PixelBuffer::new(&mut data, 2, 2, 12, PixelLayout::Rgba8).unwrap();
///
/// buf.set_pixel(1, 1, Pixel::rgb(10, 20, 30));
/// assert_eq!(buf.pixel(1, 1), Pixel::rgb(10, 20, 30));
/// ```
#[derive(Debug)]
pub struct PixelBuffer<'a> {
    data: &'a mut [u8],
    width: usize,
    height: usize,
    stride: usize,
    layout: PixelLayout,
}

impl<'a> PixelBuffer<'a> {
    /// Wrap `data` as a `width` x `height` buffer with the given row stride.
    ///
    /// Fails when `stride` is smaller than a packed row or `data` cannot
    /// hold every addressed pixel.
    pub fn new(
        data: &'a mut [u8],
        width: usize,
        height: usize,
        stride: usize,
        layout: PixelLayout,
    ) -> Result<Self, BufferError> {
        validate(data.len(), width, height, stride, layout)?;
        Ok(Self {
            data,
            width,
            height,
            stride,
            layout,
        })
    }

    /// Wrap tightly packed `data` (stride equals one packed row).
    pub fn packed(
        data: &'a mut [u8],
        width: usize,
        height: usize,
        layout: PixelLayout,
    ) -> Result<Self, BufferError> {
        let stride = width
            .checked_mul(layout.bytes_per_pixel())
            .ok_or(BufferError::Overflow)?;
        Self::new(data, width, height, stride, layout)
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row stride in bytes.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Channel layout.
    #[inline]
    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    /// Whether the buffer addresses no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Packed bytes per row (`width * bytes_per_pixel`).
    #[inline]
    pub fn row_bytes(&self) -> usize {
        self.width * self.layout.bytes_per_pixel()
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height, "({x},{y}) out of bounds");
        y * self.stride + x * self.layout.bytes_per_pixel()
    }

    /// Read the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate lies outside the buffer.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Pixel {
        let at = self.offset(x, y);
        self.layout.read(&self.data[at..])
    }

    /// Overwrite every channel of the pixel at `(x, y)`, alpha included.
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, pixel: Pixel) {
        let at = self.offset(x, y);
        self.layout.write(&mut self.data[at..], pixel);
    }

    /// Packed bytes of row `y`, padding excluded.
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.row_bytes()]
    }

    /// Iterate mutably over all rows (packed bytes only), top to bottom.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [u8]> + '_ {
        let row_bytes = self.row_bytes();
        let rows = if row_bytes == 0 { 0 } else { self.height };
        self.data
            .chunks_mut(self.stride.max(1))
            .take(rows)
            .map(move |row| &mut row[..row_bytes])
    }

    /// Parallel counterpart of [`rows_mut`](Self::rows_mut), yielding `(y, row)`.
    #[cfg(feature = "parallel")]
    pub fn par_rows_mut(&mut self) -> impl IndexedParallelIterator<Item = (usize, &mut [u8])> + '_ {
        let row_bytes = self.row_bytes();
        let rows = if row_bytes == 0 { 0 } else { self.height };
        self.data
            .par_chunks_mut(self.stride.max(1))
            .take(rows)
            .map(move |row| &mut row[..row_bytes])
            .enumerate()
    }

    /// The whole backing slice, padding included.
    #[inline]
    pub(crate) fn raw_mut(&mut self) -> &mut [u8] {
        &mut *self.data
    }

    /// Borrow as a read-only view.
    pub fn as_view(&self) -> PixelView<'_> {
        PixelView {
            data: &*self.data,
            width: self.width,
            height: self.height,
            stride: self.stride,
            layout: self.layout,
        }
    }

    /// Copy the packed rows of `src` into this buffer.
    ///
    /// This is the "destination starts as a copy of the source" step hosts
    /// perform before invoking the engine. Strides may differ; padding is
    /// not copied.
    pub fn copy_from(&mut self, src: &PixelView<'_>) -> Result<(), BufferError> {
        ensure_same_frame(src, &self.as_view())?;
        for (y, row) in self.rows_mut().enumerate() {
            row.copy_from_slice(src.row(y));
        }
        Ok(())
    }
}

/// Read-only strided pixel buffer.
#[derive(Debug, Clone, Copy)]
pub struct PixelView<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    stride: usize,
    layout: PixelLayout,
}

impl<'a> PixelView<'a> {
    /// Wrap `data` as a read-only `width` x `height` buffer.
    pub fn new(
        data: &'a [u8],
        width: usize,
        height: usize,
        stride: usize,
        layout: PixelLayout,
    ) -> Result<Self, BufferError> {
        validate(data.len(), width, height, stride, layout)?;
        Ok(Self {
            data,
            width,
            height,
            stride,
            layout,
        })
    }

    /// Wrap tightly packed `data`.
    pub fn packed(
        data: &'a [u8],
        width: usize,
        height: usize,
        layout: PixelLayout,
    ) -> Result<Self, BufferError> {
        let stride = width
            .checked_mul(layout.bytes_per_pixel())
            .ok_or(BufferError::Overflow)?;
        Self::new(data, width, height, stride, layout)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    /// Read the pixel at `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Pixel {
        debug_assert!(x < self.width && y < self.height, "({x},{y}) out of bounds");
        let at = y * self.stride + x * self.layout.bytes_per_pixel();
        self.layout.read(&self.data[at..])
    }

    /// Packed bytes of row `y`, padding excluded.
    pub fn row(&self, y: usize) -> &'a [u8] {
        let start = y * self.stride;
        &self.data[start..start + self.width * self.layout.bytes_per_pixel()]
    }
}

/// Check that two buffers describe frames of the same size and layout.
pub(crate) fn ensure_same_frame(a: &PixelView<'_>, b: &PixelView<'_>) -> Result<(), BufferError> {
    if (a.width, a.height) != (b.width, b.height) {
        return Err(BufferError::SizeMismatch {
            expected: (a.width, a.height),
            found: (b.width, b.height),
        });
    }
    if a.layout != b.layout {
        return Err(BufferError::LayoutMismatch {
            expected: a.layout,
            found: b.layout,
        });
    }
    Ok(())
}
