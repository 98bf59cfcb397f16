use std::time::Instant;

use manga_core::ReaderState;
use ratatui::prelude::*;

use super::{draw_card, zoomed_columns, Clip, PageSurface, RenderCtx};

/// One page at a time. Clicking the left half goes back, the right half
/// goes forward.
#[derive(Default)]
pub struct TurnablePages {
    area: Rect,
}

impl TurnablePages {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PageSurface for TurnablePages {
    fn sync(&mut self, _state: &ReaderState, area: Rect) {
        self.area = area;
    }

    fn render(&mut self, f: &mut Frame<'_>, state: &ReaderState, ctx: &mut RenderCtx<'_>) {
        let (Some(page), Some((current, total))) = (state.selected_page(), state.position()) else {
            return;
        };
        let rect = zoomed_columns(self.area, state.zoom());
        draw_card(f, rect, Clip::default(), page, (current, total), true, ctx);
    }

    fn jump_to(&mut self, _page: usize) {}

    fn scroll_by(&mut self, rows: isize, state: &mut ReaderState, now: Instant) {
        if rows != 0 {
            self.turn(rows > 0, state, now);
        }
    }

    fn turn(&mut self, forward: bool, state: &mut ReaderState, now: Instant) -> bool {
        if forward {
            state.next_page(now)
        } else {
            state.prev_page(now)
        }
    }

    fn click(&mut self, column: u16, row: u16, state: &mut ReaderState, now: Instant) -> bool {
        let area = self.area;
        let inside = column >= area.x
            && column < area.x.saturating_add(area.width)
            && row >= area.y
            && row < area.y.saturating_add(area.height);
        if !inside {
            return false;
        }
        let forward = column >= area.x + area.width / 2;
        self.turn(forward, state, now)
    }
}
