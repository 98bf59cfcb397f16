use std::time::{Duration, Instant};

use manga_core::images::PageImages;
use manga_core::{group_chapters, DisplayMode, FileEntry, ReaderState};
use ratatui::{backend::TestBackend, layout::Rect, Terminal};

use super::*;

fn state_with_pages(count: usize) -> ReaderState {
    let entries = (1..=count).map(|i| {
        let rel = format!("m/chapter_2024-01/{i:03}.png");
        FileEntry::new(rel.clone(), format!("/nonexistent/{rel}"))
    });
    let mut state = ReaderState::default();
    state.set_chapters(group_chapters(entries));
    state.select_chapter(Some(0), Instant::now());
    state
}

fn area() -> Rect {
    Rect::new(0, 0, 40, 20)
}

fn later() -> Instant {
    Instant::now() + Duration::from_secs(5)
}

#[test]
fn scrolling_moves_selection_once_suppression_ends() {
    let mut state = state_with_pages(4);
    let mut view = ScrollablePages::new();
    view.sync(&state, area());
    assert_eq!(view.offset, 0);
    assert_eq!(view.layout().page_rows, 20);

    view.scroll_by(21, &mut state, later());
    assert_eq!(view.offset, 21);
    assert_eq!(state.selected_page_index(), Some(1));
}

#[test]
fn scrolling_during_jump_window_keeps_selection() {
    let mut state = state_with_pages(4);
    let mut view = ScrollablePages::new();
    let now = Instant::now();
    view.sync(&state, area());
    assert!(view.turn(true, &mut state, now));
    view.sync(&state, area());
    assert_eq!(view.offset, view.layout().offset_for_page(1));

    view.scroll_by(21, &mut state, now + Duration::from_millis(100));
    assert_eq!(state.selected_page_index(), Some(1));
}

#[test]
fn scroll_is_clamped_to_strip() {
    let mut state = state_with_pages(2);
    let mut view = ScrollablePages::new();
    view.sync(&state, area());
    view.scroll_by(-5, &mut state, later());
    assert_eq!(view.offset, 0);
    view.scroll_by(10_000, &mut state, later());
    assert_eq!(view.offset, view.layout().max_offset());
    assert_eq!(state.selected_page_index(), Some(1));
}

#[test]
fn zoom_change_recentres_selected_page() {
    let mut state = state_with_pages(6);
    let mut view = ScrollablePages::new();
    view.sync(&state, area());
    state.select_page(3, manga_core::ScrollHint::Jump, Instant::now());
    view.jump_to(3);
    view.sync(&state, area());
    state.set_zoom(0.5);
    view.sync(&state, area());
    assert_eq!(view.layout().page_rows, 10);
    assert_eq!(view.offset, view.layout().offset_for_page(3));
}

#[test]
fn clicking_a_scrolled_page_selects_it() {
    let mut state = state_with_pages(4);
    state.set_zoom(0.5);
    let mut view = ScrollablePages::new();
    view.sync(&state, area());
    assert!(view.click(10, 12, &mut state, Instant::now()));
    assert_eq!(state.selected_page_index(), Some(1));
    // The gap row between pages belongs to no page.
    assert!(!view.click(10, 10, &mut state, Instant::now()));
}

#[test]
fn turn_view_click_halves() {
    let mut state = state_with_pages(3);
    state.set_display_mode(DisplayMode::PageTurn);
    let mut view = TurnablePages::new();
    view.sync(&state, area());
    let now = Instant::now();
    assert!(!view.click(5, 5, &mut state, now));
    assert!(view.click(30, 5, &mut state, now));
    assert!(view.click(30, 5, &mut state, now));
    assert!(!view.click(30, 5, &mut state, now));
    assert_eq!(state.position(), Some((3, 3)));
    assert!(view.click(0, 5, &mut state, now));
    assert_eq!(state.position(), Some((2, 3)));
    assert!(!view.click(50, 5, &mut state, now));
}

#[test]
fn turn_view_treats_scroll_as_turns() {
    let mut state = state_with_pages(3);
    let mut view = TurnablePages::new();
    view.sync(&state, area());
    view.scroll_by(3, &mut state, Instant::now());
    assert_eq!(state.selected_page_index(), Some(1));
    view.scroll_by(-1, &mut state, Instant::now());
    assert_eq!(state.selected_page_index(), Some(0));
}

#[test]
fn switching_mode_swaps_surface_and_keeps_page() {
    let mut state = state_with_pages(5);
    let mut pages = PagesView::for_mode(state.display_mode());
    pages.sync(&state, area());
    pages.turn(true, &mut state, Instant::now());
    pages.turn(true, &mut state, Instant::now());

    state.toggle_display_mode();
    pages.follow_mode(&state);
    assert_eq!(pages.mode(), DisplayMode::PageTurn);
    assert_eq!(pages.current_page(&state), Some(2));

    state.toggle_display_mode();
    pages.follow_mode(&state);
    pages.sync(&state, area());
    match &pages {
        PagesView::Scroll(view) => assert_eq!(view.offset, view.layout().offset_for_page(2)),
        PagesView::Turn(_) => panic!("expected scroll view"),
    }
}

#[test]
fn zoomed_card_is_centred() {
    let rect = zoomed_columns(Rect::new(10, 0, 40, 5), 0.5);
    assert_eq!(rect, Rect::new(20, 0, 20, 5));
    let full = zoomed_columns(Rect::new(0, 0, 40, 5), 3.0);
    assert_eq!(full.width, 40);
}

#[test]
fn cards_render_with_unreadable_images() {
    let state = state_with_pages(2);
    let mut view = ScrollablePages::new();
    let mut images = PageImages::new(4);
    let theme = Theme::default();
    let mut placements = Vec::new();
    let mut terminal = Terminal::new(TestBackend::new(40, 20)).unwrap();
    terminal
        .draw(|f| {
            view.sync(&state, f.area());
            let mut ctx = RenderCtx {
                images: &mut images,
                theme: &theme,
                placements: &mut placements,
            };
            view.render(f, &state, &mut ctx);
        })
        .unwrap();
    let text: String = terminal
        .backend()
        .buffer()
        .content
        .iter()
        .map(|c| c.symbol())
        .collect();
    assert!(text.contains("001.png"));
    assert!(text.contains("unreadable"));
    assert_eq!(placements.len(), 1);
    assert!(images.is_empty());
}

#[test]
fn scrolling_inside_jump_window_is_picked_up_once_it_ends() {
    let mut state = state_with_pages(4);
    let mut view = ScrollablePages::new();
    let now = Instant::now();
    view.sync(&state, area());
    assert!(view.turn(true, &mut state, now));
    view.sync(&state, area());

    view.scroll_by(42, &mut state, now + Duration::from_millis(200));
    assert_eq!(view.offset, 63);
    view.settle(&mut state, now + Duration::from_millis(500));
    assert_eq!(state.selected_page_index(), Some(1));

    view.settle(&mut state, now + Duration::from_millis(1500));
    assert_eq!(state.selected_page_index(), Some(3));

    view.sync(&state, Rect::new(0, 0, 40, 19));
    assert_eq!(view.offset, view.layout().offset_for_page(3));
    assert!(view.offset > view.layout().page_offset(2));
}

#[test]
fn turn_view_settle_keeps_selection() {
    let mut state = state_with_pages(3);
    state.set_display_mode(DisplayMode::PageTurn);
    let mut pages = PagesView::for_mode(state.display_mode());
    pages.sync(&state, area());
    pages.settle(&mut state, later());
    assert_eq!(state.selected_page_index(), Some(0));
}
