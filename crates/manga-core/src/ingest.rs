use std::collections::HashMap;
use std::path::{Component, Path};

use log::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::error::MangaError;
use crate::natural::natural_cmp;
use crate::types::{Chapter, FileEntry};

const CHAPTER_PREFIX: &str = "chapter_";

/// `chapter_YYYY-NN`, prefix case-insensitive, anchored on both ends.
pub fn is_chapter_folder(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    if bytes.len() != CHAPTER_PREFIX.len() + 7 {
        return false;
    }
    let (prefix, rest) = bytes.split_at(CHAPTER_PREFIX.len());
    if !prefix.eq_ignore_ascii_case(CHAPTER_PREFIX.as_bytes()) {
        return false;
    }
    rest[..4].iter().all(u8::is_ascii_digit)
        && rest[4] == b'-'
        && rest[5..].iter().all(u8::is_ascii_digit)
}

/// First path segment that names a chapter folder. With nested chapter
/// folders the outermost one wins.
pub fn chapter_folder_of(relative_path: &str) -> Option<&str> {
    relative_path
        .split('/')
        .filter(|s| !s.is_empty())
        .find(|s| is_chapter_folder(s))
}

/// Groups picked files into lazily materialized chapters. Chapters are ordered
/// by folder name and pages by relative path, both with [`natural_cmp`].
pub fn group_chapters<I>(entries: I) -> Vec<Chapter>
where
    I: IntoIterator<Item = FileEntry>,
{
    let mut groups: HashMap<String, Vec<FileEntry>> = HashMap::new();
    let mut skipped = 0usize;
    for entry in entries {
        if entry.relative_path.is_empty() {
            skipped += 1;
            continue;
        }
        let Some(folder) = chapter_folder_of(&entry.relative_path) else {
            debug!("skipping {}: no chapter folder", entry.relative_path);
            skipped += 1;
            continue;
        };
        groups.entry(folder.to_string()).or_default().push(entry);
    }

    let mut folders: Vec<(String, Vec<FileEntry>)> = groups.into_iter().collect();
    folders.sort_by(|(a, _), (b, _)| natural_cmp(a, b));

    let chapters: Vec<Chapter> = folders
        .into_iter()
        .map(|(folder, mut files)| {
            files.sort_by(|a, b| natural_cmp(&a.relative_path, &b.relative_path));
            files.dedup_by(|a, b| a.relative_path == b.relative_path);
            Chapter::lazy(folder, files)
        })
        .collect();

    info!(
        "grouped {} chapters ({} pages, {} files skipped)",
        chapters.len(),
        chapters.iter().map(Chapter::page_count).sum::<usize>(),
        skipped
    );
    chapters
}

/// Walks `root` the way a directory picker would, yielding paths relative to
/// the root's parent so the root's own name is the first segment. Entries
/// that cannot be read are logged and skipped.
pub fn scan_directory(root: &Path) -> Result<Vec<FileEntry>, MangaError> {
    if !root.is_dir() {
        return Err(MangaError::NotADirectory(root.to_path_buf()));
    }
    let base = root.parent().unwrap_or(root);
    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));
    let mut out = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("skipping unreadable entry: {e}");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(base) else {
            continue;
        };
        let relative = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => Some(s.to_string_lossy()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/");
        out.push(FileEntry::new(relative, entry.path()));
    }
    debug!("scanned {} files under {}", out.len(), root.display());
    Ok(out)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

pub fn load_library(root: &Path) -> Result<Vec<Chapter>, MangaError> {
    Ok(group_chapters(scan_directory(root)?))
}

#[cfg(test)]
mod tests;
