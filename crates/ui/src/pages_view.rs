//! The two ways of showing a chapter's pages. Both read and write the
//! selected page through [`ReaderState`], so switching between them keeps the
//! reader's place.

mod images;
mod scroll;
mod turn;

use std::time::Instant;

use log::debug;
use manga_core::images::PageImages;
use manga_core::{DisplayMode, Page, ReaderState};
use ratatui::{prelude::*, widgets::*};

pub use images::ImagePlacement;
#[cfg(feature = "kitty-images")]
pub use images::KittyEncoder;
pub use scroll::ScrollablePages;
pub use turn::TurnablePages;

use crate::theme::Theme;

/// Everything a surface needs while drawing one frame.
pub struct RenderCtx<'a> {
    pub images: &'a mut PageImages,
    pub theme: &'a Theme,
    pub placements: &'a mut Vec<ImagePlacement>,
}

pub trait PageSurface {
    /// Adopts the latest state and drawing area before rendering or input.
    fn sync(&mut self, state: &ReaderState, area: Rect);

    fn render(&mut self, f: &mut Frame<'_>, state: &ReaderState, ctx: &mut RenderCtx<'_>);

    /// Brings `page` into view on the next sync.
    fn jump_to(&mut self, page: usize);

    /// Vertical movement in rows; page-turn surfaces treat it as a turn.
    fn scroll_by(&mut self, rows: isize, state: &mut ReaderState, now: Instant);

    /// Next or previous page. No-op at the chapter bounds.
    fn turn(&mut self, forward: bool, state: &mut ReaderState, now: Instant) -> bool;

    fn click(&mut self, column: u16, row: u16, state: &mut ReaderState, now: Instant) -> bool;

    /// Reports what is on screen once a jump has settled, so scrolling done
    /// during the jump window still moves the selection.
    fn settle(&mut self, _state: &mut ReaderState, _now: Instant) {}

    fn current_page(&self, state: &ReaderState) -> Option<usize> {
        state.selected_page_index()
    }
}

pub enum PagesView {
    Scroll(ScrollablePages),
    Turn(TurnablePages),
}

impl PagesView {
    pub fn for_mode(mode: DisplayMode) -> Self {
        match mode {
            DisplayMode::Scroll => PagesView::Scroll(ScrollablePages::new()),
            DisplayMode::PageTurn => PagesView::Turn(TurnablePages::new()),
        }
    }

    pub fn mode(&self) -> DisplayMode {
        match self {
            PagesView::Scroll(_) => DisplayMode::Scroll,
            PagesView::Turn(_) => DisplayMode::PageTurn,
        }
    }

    /// Swaps the surface when the display mode changed, keeping the page.
    pub fn follow_mode(&mut self, state: &ReaderState) {
        if self.mode() == state.display_mode() {
            return;
        }
        *self = Self::for_mode(state.display_mode());
        if let Some(page) = state.selected_page_index() {
            self.jump_to(page);
        }
    }

    fn surface(&mut self) -> &mut dyn PageSurface {
        match self {
            PagesView::Scroll(view) => view,
            PagesView::Turn(view) => view,
        }
    }

    fn surface_ref(&self) -> &dyn PageSurface {
        match self {
            PagesView::Scroll(view) => view,
            PagesView::Turn(view) => view,
        }
    }
}

impl PageSurface for PagesView {
    fn sync(&mut self, state: &ReaderState, area: Rect) {
        self.surface().sync(state, area);
    }

    fn render(&mut self, f: &mut Frame<'_>, state: &ReaderState, ctx: &mut RenderCtx<'_>) {
        self.surface().render(f, state, ctx);
    }

    fn jump_to(&mut self, page: usize) {
        self.surface().jump_to(page);
    }

    fn scroll_by(&mut self, rows: isize, state: &mut ReaderState, now: Instant) {
        self.surface().scroll_by(rows, state, now);
    }

    fn turn(&mut self, forward: bool, state: &mut ReaderState, now: Instant) -> bool {
        self.surface().turn(forward, state, now)
    }

    fn click(&mut self, column: u16, row: u16, state: &mut ReaderState, now: Instant) -> bool {
        self.surface().click(column, row, state, now)
    }

    fn settle(&mut self, state: &mut ReaderState, now: Instant) {
        self.surface().settle(state, now);
    }

    fn current_page(&self, state: &ReaderState) -> Option<usize> {
        self.surface_ref().current_page(state)
    }
}

/// Which edges of a page card fall inside the viewport.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Clip {
    pub top: bool,
    pub bottom: bool,
}

/// Width of a page card at `zoom`, centred in `area`.
pub(crate) fn zoomed_columns(area: Rect, zoom: f32) -> Rect {
    let scaled = (f32::from(area.width) * zoom).round();
    let width = if scaled.is_finite() {
        (scaled.max(1.0) as u16).min(area.width)
    } else {
        area.width
    };
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

/// Draws one page as a bordered card with its name, position and what the
/// image loader made of it. Fully visible cards get an image placement.
pub(crate) fn draw_card(
    f: &mut Frame<'_>,
    rect: Rect,
    clip: Clip,
    page: &Page,
    position: (usize, usize),
    active: bool,
    ctx: &mut RenderCtx<'_>,
) {
    if rect.width == 0 || rect.height == 0 {
        return;
    }
    let mut borders = Borders::LEFT | Borders::RIGHT;
    if !clip.top {
        borders |= Borders::TOP;
    }
    if !clip.bottom {
        borders |= Borders::BOTTOM;
    }
    let color = if active {
        ctx.theme.active_border
    } else {
        ctx.theme.page_border
    };
    let mut block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(color));
    if !clip.top {
        block = block.title(format!(" {} ", page.name()));
    }
    let inner = block.inner(rect);
    f.render_widget(Clear, rect);
    f.render_widget(block, rect);

    let detail = match ctx.images.fetch(page) {
        Ok(handle) => format_size(handle.len()),
        Err(e) => {
            debug!("{}: {e}", page.id());
            "unreadable".to_string()
        }
    };
    let lines = vec![
        Line::from(page.name().to_string()),
        Line::from(format!("{} / {}", position.0, position.1)),
        Line::from(Span::styled(
            detail,
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];
    let text_h = (lines.len() as u16).min(inner.height);
    let text_area = Rect {
        y: inner.y + inner.height.saturating_sub(text_h) / 2,
        height: text_h,
        ..inner
    };
    f.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        text_area,
    );

    if !clip.top && !clip.bottom {
        ctx.placements.push(ImagePlacement {
            page: page.clone(),
            area: inner,
        });
    }
}

fn format_size(bytes: usize) -> String {
    const KIB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KIB {
        format!("{bytes} B")
    } else if b < KIB * KIB {
        format!("{:.1} KiB", b / KIB)
    } else {
        format!("{:.1} MiB", b / (KIB * KIB))
    }
}

#[cfg(test)]
mod tests;
