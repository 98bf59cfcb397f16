use std::path::PathBuf;

use manga_core::config::ReaderConfig;
use manga_core::images::PageImages;
use manga_core::{Chapter, ReaderState};
use ratatui::layout::Rect;

#[cfg(feature = "kitty-images")]
use crate::pages_view::KittyEncoder;
use crate::{
    pages_view::{ImagePlacement, PagesView},
    path_prompt::PathPrompt,
    sidebar::ChapterListView,
    theme::Theme,
};

pub struct App {
    pub state: ReaderState,
    pub images: PageImages,
    pub theme: Theme,
    pub sidebar: ChapterListView,
    pub pages: PagesView,
    pub prompt: Option<PathPrompt>,
    pub show_help: bool,
    pub status: Option<String>,
    pub library_root: Option<PathBuf>,
    pub(super) pages_area: Rect,
    pub(super) placements: Vec<ImagePlacement>,
    #[cfg(feature = "kitty-images")]
    pub(super) kitty: KittyEncoder,
}

impl Default for App {
    fn default() -> Self {
        Self::new(&ReaderConfig::default())
    }
}

impl App {
    pub fn new(config: &ReaderConfig) -> Self {
        let state = ReaderState::new(config);
        let pages = PagesView::for_mode(state.display_mode());
        Self {
            state,
            images: PageImages::new(config.cache_pages),
            theme: Theme::from_table(&config.theme),
            sidebar: ChapterListView::new(),
            pages,
            prompt: None,
            show_help: false,
            status: None,
            library_root: None,
            pages_area: Rect::default(),
            placements: Vec::new(),
            #[cfg(feature = "kitty-images")]
            kitty: KittyEncoder::new(config.cache_pages),
        }
    }

    pub fn with_library(config: &ReaderConfig, root: PathBuf, chapters: Vec<Chapter>) -> Self {
        let mut app = Self::new(config);
        app.replace_library(root, chapters);
        app
    }
}
