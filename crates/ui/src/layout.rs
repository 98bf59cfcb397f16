use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub const SIDEBAR_WIDTH: u16 = 36;

/// Rectangle of `percent_x` by `percent_y` centred in `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

pub struct ScreenAreas {
    pub sidebar: Option<Rect>,
    pub pages: Rect,
    pub status: Rect,
}

/// Sidebar on the left when open, pages fill the rest, one status line at
/// the bottom.
pub fn screen_areas(area: Rect, sidebar_open: bool) -> ScreenAreas {
    let vchunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);
    let body = vchunks[0];
    if !sidebar_open {
        return ScreenAreas {
            sidebar: None,
            pages: body,
            status: vchunks[1],
        };
    }
    let width = SIDEBAR_WIDTH.min(body.width.saturating_sub(1) / 2 + 1);
    let hchunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(width), Constraint::Min(1)])
        .split(body);
    ScreenAreas {
        sidebar: Some(hchunks[0]),
        pages: hchunks[1],
        status: vchunks[1],
    }
}
