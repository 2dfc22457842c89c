//! Row-major RGBA pixel buffer.

use crate::{MeshError, Result};

/// Bytes per RGBA pixel.
pub const CHANNELS: usize = 4;

/// A dense RGBA raster.
///
/// Pixels are stored row-major with the origin at the top-left corner,
/// 4 bytes per pixel `[R, G, B, A]`. Pixel `(x, y)` starts at byte
/// `(y * width + x) * 4`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PixelBuffer {
    pixels: Vec<u8>,
    width: usize,
    height: usize,
}

impl PixelBuffer {
    /// Wraps raw RGBA bytes.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidDimensions`] if `pixels.len() != width * height * 4`
    /// and [`MeshError::IntegerOverflow`] if that product does not fit in `usize`.
    pub fn new(pixels: Vec<u8>, width: usize, height: usize) -> Result<Self> {
        let expected = byte_len(width, height)?;
        if pixels.len() != expected {
            return Err(MeshError::InvalidDimensions {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Builds a buffer by evaluating `f(x, y)` for every pixel in row-major order.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> [u8; 4]) -> Self {
        let mut pixels = Vec::with_capacity(width * height * CHANNELS);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&f(x, y));
            }
        }
        Self {
            pixels,
            width,
            height,
        }
    }

    /// A fully transparent black buffer.
    pub fn transparent(width: usize, height: usize) -> Result<Self> {
        let len = byte_len(width, height)?;
        Ok(Self {
            pixels: vec![0; len],
            width,
            height,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// True when the buffer has no pixels (`width == 0` or `height == 0`).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// RGBA of pixel `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the buffer.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        self.pixel_at(y * self.width + x)
    }

    /// RGBA of the pixel at linear index `idx` (`y * width + x`).
    #[inline]
    pub fn pixel_at(&self, idx: usize) -> [u8; 4] {
        let i = idx * CHANNELS;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// Overwrites pixel `(x, y)`.
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let i = (y * self.width + x) * CHANNELS;
        self.pixels[i..i + CHANNELS].copy_from_slice(&rgba);
    }

    /// Raw RGBA bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    #[inline]
    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Consumes the buffer, returning `(pixels, width, height)`.
    pub fn into_raw(self) -> (Vec<u8>, usize, usize) {
        (self.pixels, self.width, self.height)
    }
}

fn byte_len(width: usize, height: usize) -> Result<usize> {
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or(MeshError::IntegerOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_length() {
        assert!(PixelBuffer::new(vec![0; 16], 2, 2).is_ok());
        assert_eq!(
            PixelBuffer::new(vec![0; 15], 2, 2),
            Err(MeshError::InvalidDimensions {
                width: 2,
                height: 2,
                expected: 16,
                actual: 15,
            })
        );
    }

    #[test]
    fn test_overflow() {
        assert_eq!(
            PixelBuffer::new(Vec::new(), usize::MAX, 2),
            Err(MeshError::IntegerOverflow)
        );
    }

    #[test]
    fn test_degenerate_is_valid() {
        let buf = PixelBuffer::new(Vec::new(), 0, 7).unwrap();
        assert!(buf.is_empty());
        assert_eq!(buf.pixel_count(), 0);
        assert!(PixelBuffer::new(Vec::new(), 5, 0).unwrap().is_empty());
    }

    #[test]
    fn test_row_major_indexing() {
        let buf = PixelBuffer::from_fn(3, 2, |x, y| [x as u8, y as u8, 0, 255]);
        assert_eq!(buf.pixel(2, 1), [2, 1, 0, 255]);
        assert_eq!(buf.pixel_at(4), [1, 1, 0, 255]);
        assert_eq!(&buf.as_bytes()[4..8], &[1, 0, 0, 255]);
    }

    #[test]
    fn test_set_pixel() {
        let mut buf = PixelBuffer::transparent(2, 2).unwrap();
        buf.set_pixel(1, 0, [9, 8, 7, 6]);
        assert_eq!(buf.pixel(1, 0), [9, 8, 7, 6]);
        assert_eq!(buf.pixel(0, 1), [0, 0, 0, 0]);
    }
}
