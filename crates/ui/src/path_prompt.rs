use std::path::PathBuf;

use ratatui::{prelude::*, widgets::*};
use unicode_segmentation::UnicodeSegmentation;

/// Single-line input for the manga directory to open.
pub struct PathPrompt {
    pub input: String,
}

impl Default for PathPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl PathPrompt {
    pub fn new() -> Self {
        Self {
            input: String::new(),
        }
    }

    pub fn with_input(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }

    pub fn push_char(&mut self, c: char) {
        if !c.is_control() {
            self.input.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some((idx, _)) = self.input.grapheme_indices(true).last() {
            self.input.truncate(idx);
        }
    }

    /// Trimmed input with a leading `~` expanded; `None` when blank.
    pub fn path(&self) -> Option<PathBuf> {
        let trimmed = self.input.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Some(rest) = trimmed.strip_prefix("~/") {
            if let Some(home) = std::env::var_os("HOME") {
                return Some(PathBuf::from(home).join(rest));
            }
        }
        Some(PathBuf::from(trimmed))
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let mut width = ((area.width as f32) * 0.6) as u16;
        width = width.max(24).min(area.width.saturating_sub(2).max(1));
        let height: u16 = 3;
        let popup_area = Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height: height.min(area.height),
        };

        let block = Block::default()
            .title("Open manga folder (Enter open, Esc cancel)")
            .borders(Borders::ALL);
        let prompt = Paragraph::new(format!("> {}", self.input)).block(block);
        f.render_widget(Clear, popup_area);
        f.render_widget(prompt, popup_area);
    }
}
