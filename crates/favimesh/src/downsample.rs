//! Nearest-neighbor downsampling.
//!
//! No smoothing is applied: interpolated colors would blur palette boundaries
//! before quantization and leave fewer identical runs to merge.

use crate::PixelBuffer;

/// Shrinks `buffer` to `target_width`, keeping the aspect ratio.
///
/// The scale is `min(1, target_width / width)`, so images already narrow
/// enough are returned unchanged. The output is
/// `floor(width * s) x floor(height * s)` and every destination pixel copies
/// the source pixel under its center.
pub fn downsample(buffer: &PixelBuffer, target_width: usize) -> PixelBuffer {
    let (src_w, src_h) = (buffer.width(), buffer.height());
    if src_w <= target_width {
        return buffer.clone();
    }
    // src_w > target_width >= 0, so src_w > 0 from here on
    let dst_w = target_width;
    let dst_h = scaled_height(src_h, src_w, target_width);
    if dst_w == 0 || dst_h == 0 {
        return PixelBuffer::from_fn(dst_w, dst_h, |_, _| [0; 4]);
    }

    log::debug!("downsampling {src_w}x{src_h} to {dst_w}x{dst_h}");
    PixelBuffer::from_fn(dst_w, dst_h, |x, y| {
        buffer.pixel(sample(x, src_w, dst_w), sample(y, src_h, dst_h))
    })
}

/// `floor(height * target_width / width)` without going through floats.
fn scaled_height(height: usize, width: usize, target_width: usize) -> usize {
    ((height as u128 * target_width as u128) / width as u128) as usize
}

/// Source coordinate under the center of destination coordinate `d`.
#[inline]
fn sample(d: usize, src: usize, dst: usize) -> usize {
    let s = ((2 * d as u128 + 1) * src as u128) / (2 * dst as u128);
    (s as usize).min(src - 1)
}
