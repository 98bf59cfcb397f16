use std::fs;
use std::num::NonZeroUsize;
use std::sync::Arc;

use log::debug;
use lru::LruCache;

use crate::error::MangaError;
use crate::types::Page;

/// Raw bytes for a page image, shared with whatever draws it.
pub type ImageHandle = Arc<Vec<u8>>;

/// Loads page images on first use and keeps the most recent ones around.
/// Only pages that are actually displayed ever get read.
pub struct PageImages {
    cache: LruCache<String, ImageHandle>,
}

impl PageImages {
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(cap),
        }
    }

    pub fn fetch(&mut self, page: &Page) -> Result<ImageHandle, MangaError> {
        if let Some(handle) = self.cache.get(page.id()) {
            return Ok(Arc::clone(handle));
        }
        let bytes = fs::read(page.source())?;
        debug!("loaded {} ({} bytes)", page.id(), bytes.len());
        let handle = Arc::new(bytes);
        self.cache.put(page.id().to_string(), Arc::clone(&handle));
        Ok(handle)
    }

    pub fn contains(&self, page: &Page) -> bool {
        self.cache.contains(page.id())
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Drops every handle; called when a new directory replaces the library.
    pub fn release_all(&mut self) {
        if !self.cache.is_empty() {
            debug!("releasing {} page images", self.cache.len());
        }
        self.cache.clear();
    }
}
