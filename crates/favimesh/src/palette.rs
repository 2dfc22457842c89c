//! Palettes, built-in themes and palette extraction.

use crate::{MeshError, PixelBuffer, Result};
use quantette::{deps::palette::Srgb, ImageRef, PaletteSize, Pipeline, QuantizeMethod};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

/// An 8-bit RGB color. Serialized as `[r, g, b]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Takes the RGB part of an RGBA pixel.
    #[inline]
    pub const fn from_rgba(rgba: [u8; 4]) -> Self {
        Self::new(rgba[0], rgba[1], rgba[2])
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(c: Rgb) -> Self {
        [c.r, c.g, c.b]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Parses `#rrggbb`, `rrggbb`, `#rgb` or `rgb`.
impl FromStr for Rgb {
    type Err = MeshError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        let invalid = || MeshError::InvalidColor(s.to_string());
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let digit = |i: usize, len: usize| {
            u8::from_str_radix(&hex[i..i + len], 16).map_err(|_| invalid())
        };
        match hex.len() {
            6 => Ok(Self::new(digit(0, 2)?, digit(2, 2)?, digit(4, 2)?)),
            3 => Ok(Self::new(
                digit(0, 1)? * 17,
                digit(1, 1)? * 17,
                digit(2, 1)? * 17,
            )),
            _ => Err(invalid()),
        }
    }
}

/// An ordered, non-empty list of colors.
///
/// Order matters: when a pixel is equally close to several entries the
/// earliest one wins. Duplicates are allowed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Rgb>", into = "Vec<Rgb>")]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidPalette`] if `colors` is empty.
    pub fn new(colors: Vec<Rgb>) -> Result<Self> {
        if colors.is_empty() {
            return Err(MeshError::InvalidPalette);
        }
        Ok(Self { colors })
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Derives a palette of at most `max_colors` (clamped to 2..=256) from the
    /// image using Wu's quantizer. Alpha is ignored.
    pub fn extract(buffer: &PixelBuffer, max_colors: u16) -> Result<Self> {
        if buffer.is_empty() {
            return Err(MeshError::Quantization(
                "cannot extract a palette from an empty image".to_string(),
            ));
        }

        let rgb_pixels: Vec<Srgb<u8>> = buffer
            .as_bytes()
            .chunks_exact(4)
            .map(|c| Srgb::new(c[0], c[1], c[2]))
            .collect();

        let max_colors = max_colors.clamp(2, 256);
        let palette_size = u8::try_from(max_colors)
            .ok()
            .and_then(|n| PaletteSize::try_from(n).ok())
            .unwrap_or(PaletteSize::MAX);

        let width = u32::try_from(buffer.width()).map_err(|_| MeshError::IntegerOverflow)?;
        let height = u32::try_from(buffer.height()).map_err(|_| MeshError::IntegerOverflow)?;
        let image = ImageRef::new(width, height, &rgb_pixels)
            .map_err(|e| MeshError::Quantization(e.to_string()))?;

        let indexed_image = Pipeline::new()
            .palette_size(palette_size)
            .quantize_method(QuantizeMethod::Wu)
            .input_image(image)
            .output_srgb8_indexed_image();

        let colors: Vec<Rgb> = indexed_image
            .palette()
            .iter()
            .map(|c| Rgb::new(c.red, c.green, c.blue))
            .collect();
        log::debug!(
            "extracted {} colors from {}x{} image",
            colors.len(),
            buffer.width(),
            buffer.height()
        );
        Self::new(colors)
    }
}

impl Deref for Palette {
    type Target = [Rgb];

    fn deref(&self) -> &[Rgb] {
        &self.colors
    }
}

impl TryFrom<Vec<Rgb>> for Palette {
    type Error = MeshError;

    fn try_from(colors: Vec<Rgb>) -> Result<Self> {
        Self::new(colors)
    }
}

impl From<Palette> for Vec<Rgb> {
    fn from(p: Palette) -> Self {
        p.colors
    }
}

/// Parses a comma-separated list of hex colors, e.g. `"#0d2b45, #203c56"`.
impl FromStr for Palette {
    type Err = MeshError;

    fn from_str(s: &str) -> Result<Self> {
        let colors = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(Rgb::from_str)
            .collect::<Result<Vec<_>>>()?;
        Self::new(colors)
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.colors.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

/// A named built-in palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub colors: &'static [Rgb],
}

impl Theme {
    /// Case-insensitive lookup in [`THEMES`].
    pub fn by_name(name: &str) -> Option<&'static Theme> {
        THEMES.iter().find(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// Like [`Theme::by_name`] but reports unknown names as an error.
    pub fn lookup(name: &str) -> Result<&'static Theme> {
        Self::by_name(name).ok_or_else(|| MeshError::UnknownTheme(name.to_string()))
    }

    pub fn palette(&self) -> Palette {
        Palette {
            colors: self.colors.to_vec(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        THEMES[0]
    }
}

/// The built-in themes. The first one is the default.
pub static THEMES: [Theme; 5] = [
    Theme {
        name: "Default",
        colors: &[
            Rgb::new(13, 43, 69),
            Rgb::new(32, 60, 86),
            Rgb::new(84, 78, 104),
            Rgb::new(141, 105, 122),
            Rgb::new(208, 129, 89),
            Rgb::new(255, 170, 94),
            Rgb::new(255, 212, 163),
            Rgb::new(255, 236, 214),
        ],
    },
    Theme {
        name: "A",
        colors: &[
            Rgb::new(34, 34, 34),
            Rgb::new(56, 76, 68),
            Rgb::new(80, 108, 120),
            Rgb::new(128, 110, 95),
            Rgb::new(168, 140, 125),
            Rgb::new(204, 163, 76),
            Rgb::new(240, 230, 215),
            Rgb::new(250, 250, 250),
        ],
    },
    Theme {
        name: "B",
        colors: &[
            Rgb::new(25, 24, 59),
            Rgb::new(112, 137, 147),
            Rgb::new(161, 194, 189),
            Rgb::new(237, 240, 240),
        ],
    },
    Theme {
        name: "C",
        colors: &[
            Rgb::new(16, 2, 43),
            Rgb::new(36, 0, 70),
            Rgb::new(60, 15, 156),
            Rgb::new(90, 24, 154),
            Rgb::new(123, 44, 191),
            Rgb::new(157, 77, 221),
            Rgb::new(199, 119, 255),
            Rgb::new(224, 170, 255),
        ],
    },
    Theme {
        name: "D",
        colors: &[
            Rgb::new(49, 31, 95),
            Rgb::new(22, 135, 167),
            Rgb::new(31, 213, 188),
            Rgb::new(237, 255, 177),
        ],
    },
];
