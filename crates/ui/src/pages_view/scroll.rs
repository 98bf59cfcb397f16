use std::time::Instant;

use manga_core::scroll::ScrollLayout;
use manga_core::{ReaderState, ScrollHint};
use ratatui::prelude::*;

use super::{draw_card, zoomed_columns, Clip, PageSurface, RenderCtx};

/// Every page of the chapter stacked in one vertical strip.
pub struct ScrollablePages {
    pub offset: usize,
    layout: ScrollLayout,
    chapter: Option<usize>,
    pending_jump: Option<usize>,
    area: Rect,
}

impl Default for ScrollablePages {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollablePages {
    pub fn new() -> Self {
        Self {
            offset: 0,
            layout: ScrollLayout::new(0, 0, 1.0, 0),
            chapter: None,
            pending_jump: None,
            area: Rect::default(),
        }
    }

    pub fn layout(&self) -> &ScrollLayout {
        &self.layout
    }

    fn page_at_row(&self, row: u16) -> Option<usize> {
        let stride = usize::from(self.layout.page_rows) + usize::from(self.layout.gap_rows);
        if stride == 0 {
            return None;
        }
        let abs = self.offset + usize::from(row.checked_sub(self.area.y)?);
        let index = abs / stride;
        let within = abs % stride < usize::from(self.layout.page_rows);
        (within && index < self.layout.page_count).then_some(index)
    }
}

impl PageSurface for ScrollablePages {
    fn sync(&mut self, state: &ReaderState, area: Rect) {
        let count = state.selected_chapter().map_or(0, |c| c.pages().len());
        let layout = ScrollLayout::new(
            count,
            area.height,
            state.zoom(),
            state.scroll_policy().gap_rows,
        );
        let chapter = state.selected_chapter_index();
        if layout != self.layout || chapter != self.chapter {
            // Keep the selected page in view across resizes, zoom and
            // chapter changes.
            if self.pending_jump.is_none() {
                self.pending_jump = state.selected_page_index();
            }
            self.layout = layout;
            self.chapter = chapter;
        }
        self.area = area;
        if let Some(page) = self.pending_jump.take() {
            self.offset = self.layout.offset_for_page(page);
        }
        self.offset = self.offset.min(self.layout.max_offset());
    }

    fn render(&mut self, f: &mut Frame<'_>, state: &ReaderState, ctx: &mut RenderCtx<'_>) {
        let Some(chapter) = state.selected_chapter() else {
            return;
        };
        let pages = chapter.pages();
        let area = self.area;
        let view_top = self.offset;
        let view_bottom = self.offset + usize::from(area.height);
        let columns = zoomed_columns(area, state.zoom());
        for vis in self.layout.visibility(self.offset) {
            let Some(page) = pages.get(vis.index) else {
                continue;
            };
            let top = self.layout.page_offset(vis.index);
            let bottom = top + usize::from(self.layout.page_rows);
            let shown_top = top.max(view_top);
            let shown_bottom = bottom.min(view_bottom);
            let rect = Rect {
                y: area.y + (shown_top - view_top) as u16,
                height: (shown_bottom - shown_top) as u16,
                ..columns
            };
            let clip = Clip {
                top: top < view_top,
                bottom: bottom > view_bottom,
            };
            let active = state.selected_page_index() == Some(vis.index);
            draw_card(
                f,
                rect,
                clip,
                page,
                (vis.index + 1, pages.len()),
                active,
                ctx,
            );
        }
    }

    fn jump_to(&mut self, page: usize) {
        self.pending_jump = Some(page);
    }

    fn scroll_by(&mut self, rows: isize, state: &mut ReaderState, now: Instant) {
        let max = self.layout.max_offset();
        let next = if rows < 0 {
            self.offset.saturating_sub(rows.unsigned_abs())
        } else {
            self.offset.saturating_add(rows as usize).min(max)
        };
        if next == self.offset {
            return;
        }
        self.offset = next;
        state.on_viewport(&self.layout.visibility(self.offset), now);
    }

    fn settle(&mut self, state: &mut ReaderState, now: Instant) {
        if self.pending_jump.is_some() || state.is_scroll_suppressed(now) {
            return;
        }
        state.on_viewport(&self.layout.visibility(self.offset), now);
    }

    fn turn(&mut self, forward: bool, state: &mut ReaderState, now: Instant) -> bool {
        let moved = if forward {
            state.next_page(now)
        } else {
            state.prev_page(now)
        };
        if moved {
            if let Some(page) = state.selected_page_index() {
                self.jump_to(page);
            }
        }
        moved
    }

    fn click(&mut self, column: u16, row: u16, state: &mut ReaderState, now: Instant) -> bool {
        let area = self.area;
        if column < area.x || column >= area.x.saturating_add(area.width) {
            return false;
        }
        if row >= area.y.saturating_add(area.height) {
            return false;
        }
        let Some(page) = self.page_at_row(row) else {
            return false;
        };
        if state.select_page(page, ScrollHint::Jump, now) {
            self.jump_to(page);
            return true;
        }
        false
    }
}
