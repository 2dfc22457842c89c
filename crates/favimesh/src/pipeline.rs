//! Downsample, quantize and mesh in one call.

use crate::{downsample, greedy_mesh, quantize, MeshError, PixelBuffer, Rect, Result, Rgb};
use serde::{Deserialize, Serialize};

/// Options for [`process_image`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ProcessOptions {
    /// Width the image is shrunk to before quantization. Narrower images are
    /// left as they are.
    pub target_width: usize,

    /// Multiplier applied to every mesh coordinate.
    pub scale: usize,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            target_width: 64,
            scale: 1,
        }
    }
}

/// A meshed image: the rectangles plus the dimensions they were computed at
/// (before `scale` is applied).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProcessedImage {
    #[serde(rename = "meshData")]
    pub mesh: Vec<Rect>,
    pub width: usize,
    pub height: usize,
}

/// Runs the full chain: [`downsample`] to `opts.target_width`, [`quantize`]
/// against `palette`, then [`greedy_mesh`] with `opts.scale`.
///
/// # Errors
///
/// [`MeshError::InvalidPalette`] for an empty palette and
/// [`MeshError::InvalidScale`] for a zero scale, both checked before any work
/// is done.
pub fn process_image(
    buffer: &PixelBuffer,
    palette: &[Rgb],
    opts: &ProcessOptions,
) -> Result<ProcessedImage> {
    if palette.is_empty() {
        return Err(MeshError::InvalidPalette);
    }
    if opts.scale == 0 {
        return Err(MeshError::InvalidScale(opts.scale));
    }

    let mut small = downsample(buffer, opts.target_width);
    quantize(&mut small, palette)?;
    let mesh = greedy_mesh(&small, opts.scale)?;

    log::debug!(
        "processed {}x{} image into {} rects at {}x{}",
        buffer.width(),
        buffer.height(),
        mesh.len(),
        small.width(),
        small.height()
    );

    Ok(ProcessedImage {
        mesh,
        width: small.width(),
        height: small.height(),
    })
}
