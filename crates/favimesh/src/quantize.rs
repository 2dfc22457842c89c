//! Nearest-palette-color quantization.

use crate::buffer::CHANNELS;
use crate::{MeshError, PixelBuffer, Result, Rgb};

/// Euclidean distance between two colors in RGB space.
#[inline]
pub fn color_distance(a: Rgb, b: Rgb) -> f64 {
    f64::from(color_distance_squared(a, b)).sqrt()
}

/// Squared Euclidean distance; orders colors exactly like [`color_distance`].
#[inline]
pub fn color_distance_squared(a: Rgb, b: Rgb) -> u32 {
    let dr = i32::from(a.r) - i32::from(b.r);
    let dg = i32::from(a.g) - i32::from(b.g);
    let db = i32::from(a.b) - i32::from(b.b);
    (dr * dr + dg * dg + db * db) as u32
}

/// Index of the palette entry closest to `color`.
///
/// Entries are scanned in order and only a strictly smaller distance replaces
/// the current best, so among equidistant entries the first one wins.
/// Returns `None` for an empty palette.
pub fn nearest_color(color: Rgb, palette: &[Rgb]) -> Option<usize> {
    let (first, rest) = palette.split_first()?;
    let mut best = 0;
    let mut best_dist = color_distance_squared(color, *first);
    for (i, candidate) in rest.iter().enumerate() {
        let dist = color_distance_squared(color, *candidate);
        if dist < best_dist {
            best = i + 1;
            best_dist = dist;
        }
    }
    Some(best)
}

/// Replaces the RGB of every pixel with its nearest palette color, in place.
/// Alpha is left untouched.
///
/// # Errors
///
/// Returns [`MeshError::InvalidPalette`] for an empty palette; the buffer is
/// not modified in that case.
pub fn quantize(buffer: &mut PixelBuffer, palette: &[Rgb]) -> Result<()> {
    if palette.is_empty() {
        return Err(MeshError::InvalidPalette);
    }

    // runs of equal pixels reuse the previous lookup
    let mut last: Option<(Rgb, Rgb)> = None;
    for px in buffer.as_bytes_mut().chunks_exact_mut(CHANNELS) {
        let color = Rgb::new(px[0], px[1], px[2]);
        let target = match last {
            Some((src, dst)) if src == color => dst,
            _ => {
                let idx = nearest_color(color, palette).ok_or(MeshError::InvalidPalette)?;
                let dst = palette[idx];
                last = Some((color, dst));
                dst
            }
        };
        px[0] = target.r;
        px[1] = target.g;
        px[2] = target.b;
    }
    Ok(())
}

/// Returns a quantized copy of `buffer`.
pub fn quantized(buffer: &PixelBuffer, palette: &[Rgb]) -> Result<PixelBuffer> {
    let mut out = buffer.clone();
    quantize(&mut out, palette)?;
    Ok(out)
}
