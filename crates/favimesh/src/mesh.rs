//! Greedy rectangle meshing.
//!
//! The mesher scans a quantized image row-major and, from every cell not yet
//! covered, grows the widest run of identical pixels to the right, then extends
//! that run downwards for as long as every cell of the next row matches. The
//! resulting rectangles exactly tile the image and are returned largest first.
//!
//! Width is always settled before height. The output is therefore not an
//! optimal rectangle cover, and renderers depend on these exact shapes.

use crate::{MeshError, PixelBuffer, Result};
use serde::{Deserialize, Serialize};

/// Color of a mesh cell: RGB as 0-255 integers, alpha as a float in `[0, 1]`.
///
/// Serialized as `[r, g, b, a]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "(u8, u8, u8, f64)", into = "(u8, u8, u8, f64)")]
pub struct MeshColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl MeshColor {
    /// Converts a stored pixel, dividing the alpha byte by 255.
    #[inline]
    pub fn from_rgba([r, g, b, a]: [u8; 4]) -> Self {
        Self {
            r,
            g,
            b,
            a: f64::from(a) / 255.0,
        }
    }

    /// Inverse of [`MeshColor::from_rgba`].
    #[inline]
    pub fn to_rgba(self) -> [u8; 4] {
        let a = (self.a.clamp(0.0, 1.0) * 255.0).round() as u8;
        [self.r, self.g, self.b, a]
    }
}

impl From<(u8, u8, u8, f64)> for MeshColor {
    fn from((r, g, b, a): (u8, u8, u8, f64)) -> Self {
        Self { r, g, b, a }
    }
}

impl From<MeshColor> for (u8, u8, u8, f64) {
    fn from(c: MeshColor) -> Self {
        (c.r, c.g, c.b, c.a)
    }
}

/// One mesh cell in output coordinates (already multiplied by the scale).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
    pub color: MeshColor,
    pub z: i32,
}

impl Rect {
    #[inline]
    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

/// Work counters from one mesher run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MeshStats {
    /// Seed cells found; equals the number of rectangles emitted.
    pub seeds: usize,
    /// Cells examined while growing rectangles.
    pub probes: usize,
}

/// Meshes `buffer` into rectangles, multiplying every coordinate by `scale`.
///
/// Rectangles are sorted by descending area; equal areas keep scan order.
///
/// # Errors
///
/// [`MeshError::InvalidScale`] if `scale` is zero and
/// [`MeshError::IntegerOverflow`] if scaled coordinates do not fit in `usize`.
pub fn greedy_mesh(buffer: &PixelBuffer, scale: usize) -> Result<Vec<Rect>> {
    greedy_mesh_with_stats(buffer, scale).map(|(rects, _)| rects)
}

/// [`greedy_mesh`] that also reports how much work the scan did.
pub fn greedy_mesh_with_stats(buffer: &PixelBuffer, scale: usize) -> Result<(Vec<Rect>, MeshStats)> {
    if scale == 0 {
        return Err(MeshError::InvalidScale(scale));
    }
    let mut stats = MeshStats::default();
    if buffer.is_empty() {
        return Ok((Vec::new(), stats));
    }

    let width = buffer.width();
    let height = buffer.height();
    let scaled_w = width.checked_mul(scale).ok_or(MeshError::IntegerOverflow)?;
    let scaled_h = height.checked_mul(scale).ok_or(MeshError::IntegerOverflow)?;
    scaled_w
        .checked_mul(scaled_h)
        .ok_or(MeshError::IntegerOverflow)?;

    let mut visited = vec![false; width * height];
    let mut rects = Vec::new();

    for y in 0..height {
        for x in 0..width {
            if visited[y * width + x] {
                continue;
            }
            let seed = buffer.pixel_at(y * width + x);
            let matches = |idx: usize, visited: &[bool]| !visited[idx] && buffer.pixel_at(idx) == seed;

            let mut max_x = x;
            while max_x + 1 < width {
                stats.probes += 1;
                if !matches(y * width + max_x + 1, &visited) {
                    break;
                }
                max_x += 1;
            }

            let mut max_y = y;
            'rows: while max_y + 1 < height {
                let row = (max_y + 1) * width;
                for i in x..=max_x {
                    stats.probes += 1;
                    if !matches(row + i, &visited) {
                        break 'rows;
                    }
                }
                max_y += 1;
            }

            for j in y..=max_y {
                visited[j * width + x..=j * width + max_x].fill(true);
            }

            stats.seeds += 1;
            rects.push(Rect {
                x: x * scale,
                y: y * scale,
                width: (max_x - x + 1) * scale,
                height: (max_y - y + 1) * scale,
                color: MeshColor::from_rgba(seed),
                z: 0,
            });
        }
    }

    // stable: equal areas stay in discovery order
    rects.sort_by(|a, b| b.area().cmp(&a.area()));

    log::trace!(
        "meshed {}x{} into {} rects ({} probes)",
        width,
        height,
        rects.len(),
        stats.probes
    );
    Ok((rects, stats))
}

/// Paints `rects` onto a transparent `width`x`height` canvas.
///
/// Coordinates are taken as-is, so a mesh built with scale `s` needs a canvas
/// `s` times the source size.
///
/// # Errors
///
/// [`MeshError::RectOutOfBounds`] if any rectangle leaves the canvas.
pub fn rasterize(rects: &[Rect], width: usize, height: usize) -> Result<PixelBuffer> {
    let mut canvas = PixelBuffer::transparent(width, height)?;
    for rect in rects {
        let fits_x = rect.x.checked_add(rect.width).is_some_and(|right| right <= width);
        let fits_y = rect.y.checked_add(rect.height).is_some_and(|bottom| bottom <= height);
        if !fits_x || !fits_y {
            return Err(MeshError::RectOutOfBounds {
                x: rect.x,
                y: rect.y,
                width: rect.width,
                height: rect.height,
                canvas_width: width,
                canvas_height: height,
            });
        }
        let rgba = rect.color.to_rgba();
        for y in rect.y..rect.y + rect.height {
            for x in rect.x..rect.x + rect.width {
                canvas.set_pixel(x, y, rgba);
            }
        }
    }
    Ok(canvas)
}
