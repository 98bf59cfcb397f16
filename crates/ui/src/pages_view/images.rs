use manga_core::Page;
use ratatui::layout::Rect;

#[cfg(feature = "kitty-images")]
use std::{env, io::Write, num::NonZeroUsize};

#[cfg(feature = "kitty-images")]
use base64::Engine;
#[cfg(feature = "kitty-images")]
use crossterm::{cursor::MoveTo, queue};
#[cfg(feature = "kitty-images")]
use image::ImageFormat;
#[cfg(feature = "kitty-images")]
use log::debug;
#[cfg(feature = "kitty-images")]
use lru::LruCache;
#[cfg(feature = "kitty-images")]
use manga_core::images::PageImages;

/// Cell area reserved for a page image during the last draw.
#[derive(Clone, Debug)]
pub struct ImagePlacement {
    pub page: Page,
    pub area: Rect,
}

/// Base64 PNG payloads for the most recently shown pages, keyed by page id.
#[cfg(feature = "kitty-images")]
pub struct KittyEncoder {
    encoded: LruCache<String, String>,
}

#[cfg(feature = "kitty-images")]
impl KittyEncoder {
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            encoded: LruCache::new(cap),
        }
    }

    pub fn len(&self) -> usize {
        self.encoded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.encoded.is_empty()
    }

    pub fn clear(&mut self) {
        self.encoded.clear();
    }

    pub fn render<W: Write>(
        &mut self,
        out: &mut W,
        placements: &[ImagePlacement],
        images: &mut PageImages,
    ) -> std::io::Result<()> {
        if !kitty_supported() {
            return Ok(());
        }
        write!(out, "\x1b_Ga=d\x1b\\")?;
        for placement in placements {
            let Some(encoded) = self.ensure_png_base64(&placement.page, images) else {
                continue;
            };
            let area = placement.area;
            if area.width == 0 || area.height == 0 {
                continue;
            }
            queue!(out, MoveTo(area.x, area.y))?;
            send_kitty_image(out, encoded, area.width, area.height)?;
        }
        out.flush()
    }

    fn ensure_png_base64(&mut self, page: &Page, images: &mut PageImages) -> Option<&str> {
        if !self.encoded.contains(page.id()) {
            let data = images.fetch(page).ok()?;
            let Some(png) = encode_png(data.as_slice()) else {
                debug!("{} is not a decodable image", page.id());
                return None;
            };
            let encoded = base64::engine::general_purpose::STANDARD.encode(png);
            self.encoded.put(page.id().to_string(), encoded);
        }
        self.encoded.get(page.id()).map(String::as_str)
    }
}

#[cfg(feature = "kitty-images")]
fn kitty_supported() -> bool {
    if env::var("KITTY_WINDOW_ID").is_ok() {
        return true;
    }
    env::var("TERM")
        .map(|term| term.contains("kitty"))
        .unwrap_or(false)
}

#[cfg(feature = "kitty-images")]
fn encode_png(data: &[u8]) -> Option<Vec<u8>> {
    let image = image::load_from_memory(data).ok()?;
    let mut out = Vec::new();
    image
        .write_to(&mut std::io::Cursor::new(&mut out), ImageFormat::Png)
        .ok()?;
    Some(out)
}

#[cfg(feature = "kitty-images")]
fn send_kitty_image<W: Write>(
    out: &mut W,
    base64: &str,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let chunk_size = 4096usize;
    let bytes = base64.as_bytes();
    let total = bytes.len().div_ceil(chunk_size);
    for idx in 0..total {
        let start = idx * chunk_size;
        let end = (start + chunk_size).min(bytes.len());
        let chunk = std::str::from_utf8(&bytes[start..end]).unwrap_or("");
        let last = idx + 1 == total;
        let mut params = String::new();
        if idx == 0 {
            params.push_str(&format!("a=T,f=100,C=1,c={},r={},q=2", cols, rows));
        }
        if !last {
            if !params.is_empty() {
                params.push(',');
            }
            params.push_str("m=1");
        }
        write!(out, "\x1b_G{};{}\x1b\\", params, chunk)?;
    }
    Ok(())
}

#[cfg(all(test, feature = "kitty-images"))]
mod tests {
    use manga_core::FileEntry;

    use super::*;

    #[test]
    fn encoded_pages_are_bounded() {
        let dir = tempfile::tempdir().unwrap();
        let pages: Vec<Page> = (0..5)
            .map(|i| {
                let path = dir.path().join(format!("{i:03}.png"));
                image::RgbImage::new(1, 1).save(&path).unwrap();
                Page::from_entry(&FileEntry::new(format!("m/chapter_2024-01/{i:03}.png"), path))
            })
            .collect();
        let mut images = PageImages::new(2);
        let mut encoder = KittyEncoder::new(2);
        for page in &pages {
            assert!(encoder.ensure_png_base64(page, &mut images).is_some());
            assert!(encoder.len() <= 2);
        }
        assert_eq!(encoder.len(), 2);
        assert!(encoder.encoded.contains(pages[4].id()));
        assert!(!encoder.encoded.contains(pages[0].id()));

        encoder.clear();
        assert!(encoder.is_empty());
    }
}
