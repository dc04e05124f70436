//! Nearest-neighbor "retro" pixelation.
//!
//! The frame is downsampled by picking the top-left pixel of every
//! `k x k` block (no averaging), then blown back up to full size so each
//! block shows one flat color. The sample grid is `floor(W/k) x floor(H/k)`:
//! a right or bottom strip narrower than one block is left as it was.
//!
//! ```text
//! k = 2, 5x3 frame             after pixelation
//! a b c d e                    a a c c e
//! f g h i j        ------>     a a c c j
//! k l m n o                    k l m n o
//! ```

use crate::buffer::{ensure_same_frame, BufferError, PixelBuffer, PixelView};
use crate::color::Pixel;

/// Downsampled cells of one frame, row-major.
struct BlockGrid {
    cols: usize,
    rows: usize,
    block: usize,
    cells: Vec<Pixel>,
}

fn sample_blocks(src: &PixelView<'_>, block: usize) -> BlockGrid {
    let cols = src.width() / block;
    let rows = src.height() / block;
    let mut cells = Vec::with_capacity(cols * rows);
    for by in 0..rows {
        for bx in 0..cols {
            cells.push(src.pixel(bx * block, by * block));
        }
    }
    BlockGrid {
        cols,
        rows,
        block,
        cells,
    }
}

fn upscale(dst: &mut PixelBuffer<'_>, grid: &BlockGrid) {
    let layout = dst.layout();
    let bpp = layout.bytes_per_pixel();
    let covered_cols = grid.cols * grid.block;

    for (y, row) in dst.rows_mut().enumerate().take(grid.rows * grid.block) {
        let start = (y / grid.block) * grid.cols;
        let cells = &grid.cells[start..start + grid.cols];
        for (x, px) in row.chunks_exact_mut(bpp).take(covered_cols).enumerate() {
            layout.write(px, cells[x / grid.block]);
        }
    }
}

/// Pixelate `src` into `dst` with blocks of `block_factor` pixels.
///
/// `dst` must describe a frame of the same size and layout as `src`
/// (strides may differ) and should already hold a copy of it: pixels
/// outside the block grid are not written. A `block_factor` of `0` or
/// `1` writes nothing.
///
/// # Errors
///
/// [`BufferError::SizeMismatch`] or [`BufferError::LayoutMismatch`] when
/// the two frames disagree.
pub fn pixelate(
    src: &PixelView<'_>,
    dst: &mut PixelBuffer<'_>,
    block_factor: u32,
) -> Result<(), BufferError> {
    ensure_same_frame(src, &dst.as_view())?;
    if block_factor <= 1 {
        return Ok(());
    }
    let grid = sample_blocks(src, block_factor as usize);
    tracing::trace!(cols = grid.cols, rows = grid.rows, block_factor, "pixelate");
    upscale(dst, &grid);
    Ok(())
}

/// Pixelate a buffer in place.
///
/// Equivalent to [`pixelate`] with a source that is a copy of `buf`.
///
/// ```
/// use duotone::{pixelate_in_place, PixelBuffer, PixelLayout};
///
/// let mut rgb: Vec<u8> = (0..48).collect();
/// let mut buf = PixelBuffer::packed(&mut rgb, 4, 4, PixelLayout::Rgb8).unwrap();
/// pixelate_in_place(&mut buf, 2);
///
/// assert_eq!(buf.pixel(1, 1), buf.pixel(0, 0));
/// assert_eq!(buf.pixel(3, 3), buf.pixel(2, 2));
/// ```
pub fn pixelate_in_place(buf: &mut PixelBuffer<'_>, block_factor: u32) {
    if block_factor <= 1 {
        return;
    }
    let grid = sample_blocks(&buf.as_view(), block_factor as usize);
    upscale(buf, &grid);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::PixelLayout;

    /// RGBA frame where pixel (x, y) is (x, y, x + y, 200 + x).
    fn coordinate_frame(w: usize, h: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(w * h * 4);
        for y in 0..h {
            for x in 0..w {
                data.extend_from_slice(&[x as u8, y as u8, (x + y) as u8, 200 + x as u8]);
            }
        }
        data
    }

    #[test]
    fn test_factor_one_is_noop() {
        let original = coordinate_frame(4, 4);
        for k in [0, 1] {
            let mut data = original.clone();
            let mut buf = PixelBuffer::packed(&mut data, 4, 4, PixelLayout::Rgba8).unwrap();
            pixelate_in_place(&mut buf, k);
            assert_eq!(data, original);
        }
    }

    #[test]
    fn test_blocks_take_top_left_sample() {
        let mut data = coordinate_frame(4, 4);
        let mut buf = PixelBuffer::packed(&mut data, 4, 4, PixelLayout::Rgba8).unwrap();
        pixelate_in_place(&mut buf, 2);

        for y in 0..4 {
            for x in 0..4 {
                let (sx, sy) = (x / 2 * 2, y / 2 * 2);
                assert_eq!(
                    buf.pixel(x, y),
                    Pixel::new(sx as u8, sy as u8, (sx + sy) as u8, 200 + sx as u8),
                    "({}, {})",
                    x,
                    y
                );
            }
        }
    }

    #[test]
    fn test_residual_border_untouched() {
        let original = coordinate_frame(5, 3);
        let mut data = original.clone();
        let mut buf = PixelBuffer::packed(&mut data, 5, 3, PixelLayout::Rgba8).unwrap();
        pixelate_in_place(&mut buf, 2);

        // Column 4 and row 2 fall outside the 2x1 block grid.
        for y in 0..3 {
            for x in 0..5 {
                let at = (y * 5 + x) * 4;
                let expected = if x < 4 && y < 2 {
                    let (sx, sy) = (x / 2 * 2, 0);
                    Pixel::new(sx as u8, sy as u8, (sx + sy) as u8, 200 + sx as u8)
                } else {
                    PixelLayout::Rgba8.read(&original[at..])
                };
                assert_eq!(buf.pixel(x, y), expected, "({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_block_larger_than_frame_is_noop() {
        let original = coordinate_frame(3, 7);
        let mut data = original.clone();
        let mut buf = PixelBuffer::packed(&mut data, 3, 7, PixelLayout::Rgba8).unwrap();
        pixelate_in_place(&mut buf, 4);
        assert_eq!(data, original);
    }

    #[test]
    fn test_idempotent() {
        for k in [2, 3, 5, 16] {
            let mut once = coordinate_frame(19, 11);
            let mut buf = PixelBuffer::packed(&mut once, 19, 11, PixelLayout::Rgba8).unwrap();
            pixelate_in_place(&mut buf, k);

            let mut twice = once.clone();
            let mut buf = PixelBuffer::packed(&mut twice, 19, 11, PixelLayout::Rgba8).unwrap();
            pixelate_in_place(&mut buf, k);

            assert_eq!(once, twice, "block factor {}", k);
        }
    }

    #[test]
    fn test_pixelate_across_strides() {
        let src_data = coordinate_frame(4, 2);
        let src = PixelView::packed(&src_data, 4, 2, PixelLayout::Rgba8).unwrap();

        let stride = 4 * 4 + 8;
        let mut dst_data = vec![0x55u8; stride * 2];
        let mut dst = PixelBuffer::new(&mut dst_data, 4, 2, stride, PixelLayout::Rgba8).unwrap();
        dst.copy_from(&src).unwrap();
        pixelate(&src, &mut dst, 2).unwrap();

        assert_eq!(dst.pixel(3, 1), Pixel::new(2, 0, 2, 202));
        assert!(dst_data[16..24].iter().all(|&b| b == 0x55));
        assert!(dst_data[stride + 16..].iter().all(|&b| b == 0x55));
    }

    #[test]
    fn test_pixelate_rejects_mismatched_frames() {
        let src_data = coordinate_frame(4, 4);
        let src = PixelView::packed(&src_data, 4, 4, PixelLayout::Rgba8).unwrap();

        let mut dst_data = vec![0u8; 4 * 3 * 4];
        let mut dst = PixelBuffer::packed(&mut dst_data, 4, 3, PixelLayout::Rgba8).unwrap();
        assert_eq!(
            pixelate(&src, &mut dst, 2),
            Err(BufferError::SizeMismatch {
                expected: (4, 4),
                found: (4, 3)
            })
        );
    }
}
