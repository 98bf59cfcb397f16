use std::path::PathBuf;

use serde::Deserialize;

/// A file picked by the user: its `/`-separated path relative to the parent
/// of the picked directory, and where its bytes live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub relative_path: String,
    pub source: PathBuf,
}

impl FileEntry {
    pub fn new(relative_path: impl Into<String>, source: impl Into<PathBuf>) -> Self {
        Self {
            relative_path: relative_path.into(),
            source: source.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    id: String,
    source: PathBuf,
}

impl Page {
    pub fn from_entry(entry: &FileEntry) -> Self {
        Self {
            id: entry.relative_path.clone(),
            source: entry.source.clone(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source(&self) -> &PathBuf {
        &self.source
    }

    /// Last path segment, e.g. `001.png`.
    pub fn name(&self) -> &str {
        self.id.rsplit('/').next().unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChapterPages {
    /// Raw file references in page order; no pages built yet.
    Lazy(Vec<FileEntry>),
    Ready(Vec<Page>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    id: String,
    title: String,
    pages: ChapterPages,
}

impl Chapter {
    pub fn lazy(folder: impl Into<String>, files: Vec<FileEntry>) -> Self {
        let id = folder.into();
        Self {
            title: id.clone(),
            id,
            pages: ChapterPages::Lazy(files),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_materialized(&self) -> bool {
        matches!(self.pages, ChapterPages::Ready(_))
    }

    /// Builds the page sequence from the stored file order. Calling it again
    /// is a no-op.
    pub fn materialize(&mut self) {
        if let ChapterPages::Lazy(files) = &self.pages {
            let pages = files.iter().map(Page::from_entry).collect();
            self.pages = ChapterPages::Ready(pages);
        }
    }

    /// Materialized pages; empty while the chapter is still lazy.
    pub fn pages(&self) -> &[Page] {
        match &self.pages {
            ChapterPages::Ready(pages) => pages,
            ChapterPages::Lazy(_) => &[],
        }
    }

    pub fn page_count(&self) -> usize {
        match &self.pages {
            ChapterPages::Ready(pages) => pages.len(),
            ChapterPages::Lazy(files) => files.len(),
        }
    }

    /// Relative paths in page order, whichever form the chapter is in.
    pub fn page_ids(&self) -> Vec<&str> {
        match &self.pages {
            ChapterPages::Ready(pages) => pages.iter().map(Page::id).collect(),
            ChapterPages::Lazy(files) => files.iter().map(|f| f.relative_path.as_str()).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayMode {
    /// Continuous vertical strip of every page in the chapter.
    #[default]
    Scroll,
    /// One page at a time, turned by key or click.
    #[serde(alias = "page_turn", alias = "turn")]
    PageTurn,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Scroll => DisplayMode::PageTurn,
            DisplayMode::PageTurn => DisplayMode::Scroll,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DisplayMode::Scroll => "Scroll Mode",
            DisplayMode::PageTurn => "Page Turn",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPhase {
    Idle,
    Reader,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(path: &str) -> FileEntry {
        FileEntry::new(path, format!("/tmp/{path}"))
    }

    #[test]
    fn lazy_chapter_reports_count_before_materializing() {
        let ch = Chapter::lazy(
            "chapter_2024-01",
            vec![entry("m/chapter_2024-01/001.jpg"), entry("m/chapter_2024-01/002.jpg")],
        );
        assert!(!ch.is_materialized());
        assert!(ch.pages().is_empty());
        assert_eq!(ch.page_count(), 2);
    }

    #[test]
    fn materialize_keeps_order_and_is_idempotent() {
        let mut ch = Chapter::lazy(
            "chapter_2024-01",
            vec![entry("m/chapter_2024-01/002.jpg"), entry("m/chapter_2024-01/010.jpg")],
        );
        ch.materialize();
        let first: Vec<_> = ch.pages().to_vec();
        ch.materialize();
        assert_eq!(ch.pages(), first.as_slice());
        assert_eq!(ch.pages()[0].name(), "002.jpg");
        assert_eq!(ch.pages()[1].name(), "010.jpg");
        assert_eq!(ch.title(), "chapter_2024-01");
    }
}
