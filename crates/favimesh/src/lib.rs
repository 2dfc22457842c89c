//! # favimesh
//!
//! Turns a small raster image into a short list of axis-aligned, single-color
//! rectangles that exactly tile it.
//!
//! ## Features
//!
//! - **Quantizer**: maps every pixel to the nearest color of a fixed palette
//! - **Greedy mesher**: merges runs of identical pixels into the fewest, largest
//!   rectangles, sorted largest first
//! - **Downsampler**: nearest-neighbor, aspect-preserving resize to a target width
//! - **Themes**: built-in palettes, hex palette parsing and palette extraction
//!   using quantette
//!
//! ## Quick Start
//!
//! ```ignore
//! use favimesh::{process_image, PixelBuffer, ProcessOptions, Theme};
//!
//! // RGBA image data (4 bytes per pixel)
//! let rgba = vec![255u8, 0, 0, 255, 255, 0, 0, 255]; // 2 red pixels
//! let buffer = PixelBuffer::new(rgba, 2, 1)?;
//! let processed = process_image(&buffer, &Theme::default().palette(), &ProcessOptions::default())?;
//! println!("{}", serde_json::to_string(&processed)?);
//! ```
//!
//! ### Meshing an already quantized buffer
//!
//! ```
//! use favimesh::{greedy_mesh, PixelBuffer};
//!
//! let buffer = PixelBuffer::from_fn(2, 1, |_, _| [255, 0, 0, 255]);
//! let rects = greedy_mesh(&buffer, 4)?;
//! assert_eq!(rects.len(), 1);
//! assert_eq!((rects[0].width, rects[0].height), (8, 4));
//! # Ok::<(), favimesh::MeshError>(())
//! ```

use thiserror::Error;

pub mod buffer;
pub mod cache;
pub mod downsample;
pub mod mesh;
pub mod palette;
pub mod pipeline;
pub mod quantize;

pub use buffer::PixelBuffer;
pub use cache::MeshCache;
pub use downsample::downsample;
pub use mesh::{greedy_mesh, greedy_mesh_with_stats, rasterize, MeshColor, MeshStats, Rect};
pub use palette::{Palette, Rgb, Theme, THEMES};
pub use pipeline::{process_image, ProcessOptions, ProcessedImage};
pub use quantize::{color_distance, color_distance_squared, nearest_color, quantize, quantized};

/// Errors that can occur while quantizing or meshing an image.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// The palette has no colors
    #[error("invalid palette: a palette needs at least one color")]
    InvalidPalette,

    /// Buffer size doesn't match the stated dimensions
    #[error("invalid dimensions {width}x{height}: expected {expected} bytes, got {actual}")]
    InvalidDimensions {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    /// Mesh scale factor must be at least 1
    #[error("invalid scale factor: {0}")]
    InvalidScale(usize),

    /// Malformed color literal
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// No built-in theme with that name
    #[error("unknown theme: {0}")]
    UnknownTheme(String),

    /// A rectangle lies outside the canvas it is painted on
    #[error("rectangle at ({x}, {y}) sized {width}x{height} exceeds {canvas_width}x{canvas_height} canvas")]
    RectOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        canvas_width: usize,
        canvas_height: usize,
    },

    /// Palette extraction failed
    #[error("quantization error: {0}")]
    Quantization(String),

    /// Integer overflow during processing
    #[error("integer overflow")]
    IntegerOverflow,
}

/// Result type for favimesh operations.
pub type Result<T> = core::result::Result<T, MeshError>;
