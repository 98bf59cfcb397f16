use std::time::Instant;

use log::debug;

use crate::config::{ReaderConfig, ScrollPolicy, ZoomPolicy};
use crate::scroll::{infer_focused_page, PageVisibility, ScrollSync};
use crate::types::{Chapter, DisplayMode, Page, ViewPhase};

/// Why a page became selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollHint {
    /// The user asked for this page; the view should scroll to it.
    Jump,
    /// The view scrolled onto this page; do not scroll again.
    Follow,
}

/// Session state for one reader window. Owned by the UI root and handed out
/// by reference; these methods are the only way to change it.
pub struct ReaderState {
    chapters: Vec<Chapter>,
    selected_chapter: Option<usize>,
    selected_page: Option<usize>,
    sidebar_open: bool,
    zoom: f32,
    mode: DisplayMode,
    zoom_policy: ZoomPolicy,
    scroll_policy: ScrollPolicy,
    sync: ScrollSync,
}

impl Default for ReaderState {
    fn default() -> Self {
        Self::new(&ReaderConfig::default())
    }
}

impl ReaderState {
    pub fn new(config: &ReaderConfig) -> Self {
        Self {
            chapters: Vec::new(),
            selected_chapter: None,
            selected_page: None,
            sidebar_open: true,
            zoom: config.zoom.default,
            mode: config.start_mode,
            zoom_policy: config.zoom,
            scroll_policy: config.scroll,
            sync: ScrollSync::new(config.scroll.suppress_window()),
        }
    }

    /// Replaces the library and resets the selection. Returns the previous
    /// chapters so their image handles can be released.
    pub fn set_chapters(&mut self, chapters: Vec<Chapter>) -> Vec<Chapter> {
        debug!("library replaced: {} chapters", chapters.len());
        let old = std::mem::replace(&mut self.chapters, chapters);
        self.selected_chapter = None;
        self.selected_page = None;
        self.sync.cancel();
        self.sidebar_open = true;
        old
    }

    /// Selecting the open chapter (or `None`) closes it. Selecting another one
    /// materializes it and jumps to its first page.
    pub fn select_chapter(&mut self, index: Option<usize>, now: Instant) {
        let Some(index) = index else {
            self.clear_selection();
            return;
        };
        if index >= self.chapters.len() {
            return;
        }
        if self.selected_chapter == Some(index) {
            debug!("chapter {} closed", self.chapters[index].id());
            self.clear_selection();
            return;
        }
        let chapter = &mut self.chapters[index];
        chapter.materialize();
        debug!("chapter {} opened", chapter.id());
        let has_pages = !chapter.pages().is_empty();
        self.selected_chapter = Some(index);
        self.selected_page = None;
        self.sync.cancel();
        if has_pages {
            self.select_page(0, ScrollHint::Jump, now);
        }
    }

    pub fn toggle_chapter(&mut self, index: usize, now: Instant) {
        self.select_chapter(Some(index), now);
    }

    fn clear_selection(&mut self) {
        self.selected_chapter = None;
        self.selected_page = None;
        self.sync.cancel();
    }

    /// Returns `true` when the view should scroll to the page.
    pub fn select_page(&mut self, index: usize, hint: ScrollHint, now: Instant) -> bool {
        let Some(chapter) = self.selected_chapter() else {
            return false;
        };
        if index >= chapter.pages().len() {
            return false;
        }
        self.selected_page = Some(index);
        match hint {
            ScrollHint::Jump => {
                self.sync.begin(now);
                true
            }
            ScrollHint::Follow => false,
        }
    }

    pub fn next_page(&mut self, now: Instant) -> bool {
        let len = self.selected_chapter().map_or(0, |ch| ch.pages().len());
        match self.selected_page {
            Some(idx) if idx + 1 < len => self.select_page(idx + 1, ScrollHint::Jump, now),
            _ => false,
        }
    }

    pub fn prev_page(&mut self, now: Instant) -> bool {
        match self.selected_page {
            Some(idx) if idx > 0 => self.select_page(idx - 1, ScrollHint::Jump, now),
            _ => false,
        }
    }

    pub fn next_chapter(&mut self, now: Instant) {
        let next = self.selected_chapter.map_or(0, |i| i + 1);
        if next < self.chapters.len() {
            self.select_chapter(Some(next), now);
        }
    }

    pub fn prev_chapter(&mut self, now: Instant) {
        if let Some(idx) = self.selected_chapter.filter(|&i| i > 0) {
            self.select_chapter(Some(idx - 1), now);
        }
    }

    /// Viewport report from the scroll view. Picks up the most visible page
    /// unless a jump is still settling.
    pub fn on_viewport(&mut self, visible: &[PageVisibility], now: Instant) -> Option<usize> {
        if self.mode != DisplayMode::Scroll || self.selected_chapter.is_none() {
            return None;
        }
        if self.sync.is_suppressed(now) {
            return None;
        }
        let focused = infer_focused_page(visible, self.scroll_policy.threshold)?;
        if self.selected_page == Some(focused) {
            return None;
        }
        // A selected page that is just as visible keeps focus.
        let ratio_of = |index: usize| visible.iter().find(|v| v.index == index).map(|v| v.ratio);
        if let (Some(current), Some(best)) =
            (self.selected_page.and_then(ratio_of), ratio_of(focused))
        {
            if current >= best {
                return None;
            }
        }
        self.select_page(focused, ScrollHint::Follow, now);
        self.selected_page.filter(|&p| p == focused)
    }

    pub fn is_scroll_suppressed(&mut self, now: Instant) -> bool {
        self.sync.is_suppressed(now)
    }

    pub fn set_zoom(&mut self, value: f32) {
        if let Some(zoom) = self.zoom_policy.clamp(value) {
            self.zoom = zoom;
        }
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + self.zoom_policy.step);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - self.zoom_policy.step);
    }

    pub fn open_sidebar(&mut self) {
        self.sidebar_open = true;
    }

    pub fn close_sidebar(&mut self) {
        self.sidebar_open = false;
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    pub fn set_scroll_mode(&mut self, scroll: bool) {
        self.set_display_mode(if scroll {
            DisplayMode::Scroll
        } else {
            DisplayMode::PageTurn
        });
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        if self.mode != mode {
            debug!("display mode -> {:?}", mode);
            self.mode = mode;
            self.sync.cancel();
        }
    }

    pub fn toggle_display_mode(&mut self) {
        self.set_display_mode(self.mode.toggled());
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn selected_chapter_index(&self) -> Option<usize> {
        self.selected_chapter
    }

    pub fn selected_page_index(&self) -> Option<usize> {
        self.selected_page
    }

    pub fn selected_chapter(&self) -> Option<&Chapter> {
        self.selected_chapter.and_then(|i| self.chapters.get(i))
    }

    pub fn selected_page(&self) -> Option<&Page> {
        let chapter = self.selected_chapter()?;
        chapter.pages().get(self.selected_page?)
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn zoom_policy(&self) -> &ZoomPolicy {
        &self.zoom_policy
    }

    pub fn scroll_policy(&self) -> &ScrollPolicy {
        &self.scroll_policy
    }

    pub fn is_sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn is_scroll_mode(&self) -> bool {
        self.mode == DisplayMode::Scroll
    }

    pub fn phase(&self) -> ViewPhase {
        if self.selected_page().is_some() {
            ViewPhase::Reader
        } else {
            ViewPhase::Idle
        }
    }

    /// Call to action shown while idle.
    pub fn prompt(&self) -> Option<&'static str> {
        if self.phase() == ViewPhase::Reader {
            None
        } else if self.chapters.is_empty() {
            Some("Upload manga")
        } else if self.selected_chapter.is_none() {
            Some("Select chapter")
        } else {
            Some("Select page")
        }
    }

    /// 1-based position and page total of the selected page.
    pub fn position(&self) -> Option<(usize, usize)> {
        let chapter = self.selected_chapter()?;
        let page = self.selected_page?;
        Some((page + 1, chapter.pages().len()))
    }
}
