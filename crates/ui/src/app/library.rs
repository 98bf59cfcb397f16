use std::path::{Path, PathBuf};

use log::{info, warn};
use manga_core::{load_library, Chapter, MangaError};

use crate::pages_view::PagesView;

use super::App;

impl App {
    /// Scans `root` and swaps the result in. On failure the current library
    /// stays untouched.
    pub fn load_directory(&mut self, root: &Path) -> Result<usize, MangaError> {
        let chapters = load_library(root)?;
        Ok(self.replace_library(root.to_path_buf(), chapters))
    }

    /// Installs a new chapter set and drops every image handle that belonged
    /// to the old one.
    pub fn replace_library(&mut self, root: PathBuf, chapters: Vec<Chapter>) -> usize {
        let count = chapters.len();
        let previous = self.state.set_chapters(chapters);
        self.images.release_all();
        #[cfg(feature = "kitty-images")]
        self.kitty.clear();
        self.sidebar.reset();
        self.pages = PagesView::for_mode(self.state.display_mode());
        info!(
            "opened {} ({} chapters, replaced {})",
            root.display(),
            count,
            previous.len()
        );
        self.status = Some(if count == 0 {
            format!("No chapter_YYYY-NN folders in {}", root.display())
        } else {
            format!("Loaded {} chapters from {}", count, root.display())
        });
        self.library_root = Some(root);
        count
    }

    pub(super) fn submit_prompt(&mut self) {
        let Some(prompt) = self.prompt.take() else {
            return;
        };
        let Some(path) = prompt.path() else {
            return;
        };
        if let Err(e) = self.load_directory(&path) {
            warn!("failed to open {}: {}", path.display(), e);
            self.status = Some(format!("Failed to open {}: {}", path.display(), e));
        }
    }
}
