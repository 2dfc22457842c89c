//! In-memory memo of processed images.

use crate::{process_image, PixelBuffer, ProcessOptions, ProcessedImage, Result, Rgb};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct CacheKey {
    id: String,
    palette: Vec<Rgb>,
    opts: ProcessOptions,
}

impl CacheKey {
    fn new(id: &str, palette: &[Rgb], opts: &ProcessOptions) -> Self {
        Self {
            id: id.to_string(),
            palette: palette.to_vec(),
            opts: opts.clone(),
        }
    }
}

/// Processed images keyed by a caller identifier (e.g. a domain name), the
/// palette they were quantized with and the [`ProcessOptions`] they were
/// produced under.
///
/// The cache only stays valid because [`process_image`] is deterministic.
/// Entries are never evicted on their own; call [`MeshCache::clear`].
#[derive(Debug, Default)]
pub struct MeshCache {
    entries: HashMap<CacheKey, ProcessedImage>,
}

impl MeshCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str, palette: &[Rgb], opts: &ProcessOptions) -> Option<&ProcessedImage> {
        self.entries.get(&CacheKey::new(id, palette, opts))
    }

    /// Stores `image`, returning the entry it replaced.
    pub fn insert(
        &mut self,
        id: &str,
        palette: &[Rgb],
        opts: &ProcessOptions,
        image: ProcessedImage,
    ) -> Option<ProcessedImage> {
        self.entries.insert(CacheKey::new(id, palette, opts), image)
    }

    /// Returns the cached entry or runs [`process_image`] and stores the result.
    /// Failures are returned and nothing is cached.
    pub fn get_or_process(
        &mut self,
        id: &str,
        buffer: &PixelBuffer,
        palette: &[Rgb],
        opts: &ProcessOptions,
    ) -> Result<&ProcessedImage> {
        match self.entries.entry(CacheKey::new(id, palette, opts)) {
            Entry::Occupied(entry) => {
                log::debug!("mesh cache hit for {id}");
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => {
                log::debug!("mesh cache miss for {id}");
                let image = process_image(buffer, palette, opts)?;
                Ok(entry.insert(image))
            }
        }
    }

    pub fn remove(&mut self, id: &str, palette: &[Rgb], opts: &ProcessOptions) -> Option<ProcessedImage> {
        self.entries.remove(&CacheKey::new(id, palette, opts))
    }

    pub fn clear(&mut self) {
        log::debug!("clearing {} cached meshes", self.entries.len());
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
