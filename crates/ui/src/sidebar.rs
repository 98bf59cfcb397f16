use std::time::Instant;

use manga_core::{ReaderState, ScrollHint};
use ratatui::{prelude::*, widgets::*};
use unicode_segmentation::UnicodeSegmentation;

use crate::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SidebarRow {
    Chapter(usize),
    Page(usize),
}

/// Chapter list with the open chapter's pages folded out beneath it.
pub struct ChapterListView {
    pub cursor: usize,
    list_state: ListState,
    list_area: Rect,
}

impl Default for ChapterListView {
    fn default() -> Self {
        Self::new()
    }
}

impl ChapterListView {
    pub fn new() -> Self {
        Self {
            cursor: 0,
            list_state: ListState::default(),
            list_area: Rect::default(),
        }
    }

    pub fn rows(state: &ReaderState) -> Vec<SidebarRow> {
        let mut rows = Vec::new();
        for (i, chapter) in state.chapters().iter().enumerate() {
            rows.push(SidebarRow::Chapter(i));
            if state.selected_chapter_index() == Some(i) {
                rows.extend((0..chapter.pages().len()).map(SidebarRow::Page));
            }
        }
        rows
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
        self.list_state = ListState::default();
    }

    pub fn up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn down(&mut self, state: &ReaderState) {
        let len = Self::rows(state).len();
        if len > 0 {
            self.cursor = (self.cursor + 1).min(len - 1);
        }
    }

    pub fn current_row(&self, state: &ReaderState) -> Option<SidebarRow> {
        Self::rows(state).get(self.cursor).copied()
    }

    /// Moves the cursor onto the selected page, or the open chapter.
    pub fn follow_selection(&mut self, state: &ReaderState) {
        let target = match (state.selected_chapter_index(), state.selected_page_index()) {
            (Some(_), Some(page)) => Some(SidebarRow::Page(page)),
            (Some(ch), None) => Some(SidebarRow::Chapter(ch)),
            _ => None,
        };
        if let Some(target) = target {
            if let Some(pos) = Self::rows(state).iter().position(|r| *r == target) {
                self.cursor = pos;
            }
        }
    }

    /// Enter on the cursor row. A chapter row toggles the chapter, a page row
    /// opens the page and hides the sidebar. Returns the page the reader
    /// should jump to.
    pub fn activate(&mut self, state: &mut ReaderState, now: Instant) -> Option<usize> {
        match self.current_row(state)? {
            SidebarRow::Chapter(index) => {
                state.toggle_chapter(index, now);
                if let Some(pos) = Self::rows(state)
                    .iter()
                    .position(|r| *r == SidebarRow::Chapter(index))
                {
                    self.cursor = pos;
                }
                state.selected_page_index()
            }
            SidebarRow::Page(page) => {
                state.select_page(page, ScrollHint::Jump, now);
                state.close_sidebar();
                Some(page)
            }
        }
    }

    /// Row index under a mouse position from the last render.
    pub fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        let area = self.list_area;
        let inside = column >= area.x
            && column < area.x.saturating_add(area.width)
            && row >= area.y
            && row < area.y.saturating_add(area.height);
        inside.then(|| self.list_state.offset() + usize::from(row - area.y))
    }

    pub fn render(&mut self, f: &mut Frame<'_>, area: Rect, state: &ReaderState, theme: &Theme) {
        f.render_widget(Clear, area);
        let outer = Block::default().borders(Borders::RIGHT);
        let inner = outer.inner(area);
        f.render_widget(outer, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(1),
                Constraint::Length(4),
            ])
            .split(inner);

        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                "ZMREADER",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "o: choose manga folder",
                Style::default().add_modifier(Modifier::DIM),
            )),
        ]);
        f.render_widget(header, chunks[0]);

        self.list_area = chunks[1];
        let rows = Self::rows(state);
        if rows.is_empty() {
            let empty = Paragraph::new("No chapters found.")
                .style(Style::default().add_modifier(Modifier::DIM));
            f.render_widget(empty, chunks[1]);
        } else {
            self.cursor = self.cursor.min(rows.len() - 1);
            let max_w = chunks[1].width as usize;
            let items: Vec<ListItem> = rows
                .iter()
                .map(|row| self.row_item(*row, state, theme, max_w))
                .collect();
            let list = List::new(items)
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
            self.list_state.select(Some(self.cursor));
            f.render_stateful_widget(list, chunks[1], &mut self.list_state);
        }

        render_footer(f, chunks[2], state);
    }

    fn row_item(
        &self,
        row: SidebarRow,
        state: &ReaderState,
        theme: &Theme,
        max_w: usize,
    ) -> ListItem<'static> {
        let selected_style = Style::default().bg(theme.selected_bg).fg(theme.selected_fg);
        match row {
            SidebarRow::Chapter(i) => {
                let open = state.selected_chapter_index() == Some(i);
                let title = state.chapters()[i].title();
                let marker = if open { "▾" } else { "▸" };
                let label = truncate_with_ellipsis(title, max_w.saturating_sub(2));
                let item = ListItem::new(format!("{marker} {label}"));
                if open {
                    item.style(selected_style)
                } else {
                    item
                }
            }
            SidebarRow::Page(p) => {
                let name = state
                    .selected_chapter()
                    .and_then(|ch| ch.pages().get(p))
                    .map(|page| page.name().to_string())
                    .unwrap_or_default();
                let label = truncate_with_ellipsis(&name, max_w.saturating_sub(4));
                let item = ListItem::new(format!("    {label}"));
                if state.selected_page_index() == Some(p) {
                    item.style(selected_style.add_modifier(Modifier::BOLD))
                } else {
                    item
                }
            }
        }
    }
}

fn render_footer(f: &mut Frame<'_>, area: Rect, state: &ReaderState) {
    let mut lines = Vec::new();
    lines.push(Line::from(""));
    if let Some((current, total)) = state.position() {
        let prev = if current > 1 { "◀" } else { " " };
        let next = if current < total { "▶" } else { " " };
        lines.push(Line::from(format!("{prev}  {current} / {total}  {next}")));
    } else {
        lines.push(Line::from(""));
    }
    lines.push(Line::from(format!("-  {:.2}x  +", state.zoom())));
    lines.push(Line::from(format!("[{}]", state.display_mode().label())));
    let footer = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(footer, area);
}

pub(crate) fn truncate_with_ellipsis(text: &str, max_w: usize) -> String {
    if max_w == 0 {
        return String::new();
    }
    let gs: Vec<&str> = text.graphemes(true).collect();
    if gs.len() <= max_w {
        return text.to_string();
    }
    if max_w == 1 {
        return "…".to_string();
    }
    let keep = max_w.saturating_sub(1);
    format!("{}…", gs[..keep].concat())
}

#[cfg(test)]
mod tests {
    use manga_core::{group_chapters, FileEntry};

    use super::*;

    fn state() -> ReaderState {
        let paths = [
            "m/chapter_2024-01/001.png",
            "m/chapter_2024-01/002.png",
            "m/chapter_2024-02/001.png",
        ];
        let mut state = ReaderState::default();
        state.set_chapters(group_chapters(
            paths.iter().map(|p| FileEntry::new(*p, format!("/x/{p}"))),
        ));
        state
    }

    #[test]
    fn rows_fold_out_open_chapter() {
        let mut state = state();
        assert_eq!(
            ChapterListView::rows(&state),
            vec![SidebarRow::Chapter(0), SidebarRow::Chapter(1)]
        );
        state.toggle_chapter(0, Instant::now());
        assert_eq!(
            ChapterListView::rows(&state),
            vec![
                SidebarRow::Chapter(0),
                SidebarRow::Page(0),
                SidebarRow::Page(1),
                SidebarRow::Chapter(1),
            ]
        );
    }

    #[test]
    fn activating_chapter_then_page() {
        let mut state = state();
        let mut view = ChapterListView::new();
        let now = Instant::now();
        assert_eq!(view.activate(&mut state, now), Some(0));
        assert_eq!(state.selected_chapter_index(), Some(0));
        assert!(state.is_sidebar_open());

        view.down(&state);
        view.down(&state);
        assert_eq!(view.current_row(&state), Some(SidebarRow::Page(1)));
        assert_eq!(view.activate(&mut state, now), Some(1));
        assert_eq!(state.selected_page_index(), Some(1));
        assert!(!state.is_sidebar_open());
    }

    #[test]
    fn cursor_stays_on_chapter_when_rows_shift() {
        let mut state = state();
        let mut view = ChapterListView::new();
        let now = Instant::now();
        view.activate(&mut state, now);
        view.cursor = 3;
        assert_eq!(view.current_row(&state), Some(SidebarRow::Chapter(1)));
        view.activate(&mut state, now);
        assert_eq!(state.selected_chapter_index(), Some(1));
        assert_eq!(view.current_row(&state), Some(SidebarRow::Chapter(1)));
        assert_eq!(view.cursor, 1);
    }

    #[test]
    fn closing_chapter_returns_no_jump() {
        let mut state = state();
        let mut view = ChapterListView::new();
        let now = Instant::now();
        view.activate(&mut state, now);
        assert_eq!(view.activate(&mut state, now), None);
        assert_eq!(state.selected_chapter_index(), None);
    }

    #[test]
    fn follow_selection_tracks_page() {
        let mut state = state();
        let mut view = ChapterListView::new();
        state.toggle_chapter(0, Instant::now());
        state.next_page(Instant::now());
        view.follow_selection(&state);
        assert_eq!(view.cursor, 2);
    }

    #[test]
    fn truncation_counts_graphemes() {
        assert_eq!(truncate_with_ellipsis("chapter_2024-01", 8), "chapter…");
        assert_eq!(truncate_with_ellipsis("short", 8), "short");
        assert_eq!(truncate_with_ellipsis("abc", 1), "…");
        assert_eq!(truncate_with_ellipsis("abc", 0), "");
    }
}
