use std::{
    io::stdout,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use manga_core::ViewPhase;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use unicode_segmentation::UnicodeSegmentation;

use crate::layout::{centered_rect, screen_areas};
use crate::pages_view::{PageSurface, RenderCtx};
use crate::sidebar::truncate_with_ellipsis;

use super::types::{Command, CommandOutcome};
use super::App;

const HELP_LINES: &[&str] = &[
    "q / Ctrl-C: quit",
    "o: open a manga folder",
    "Tab: toggle chapter sidebar",
    "Enter: open chapter or page under the cursor",
    "Esc: hide sidebar",
    "j / k or arrows: move cursor or scroll",
    "PageUp / PageDown: scroll half a screen",
    "h / l or arrows: previous / next page",
    "p / n: previous / next chapter",
    "+ / -: zoom",
    "m: switch scroll and page-turn mode",
    "?: toggle this help",
];

impl App {
    pub fn run(mut self) -> std::io::Result<()> {
        let mut stdout = stdout();
        let raw_ok = enable_raw_mode().is_ok();
        if raw_ok {
            execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        } else {
            execute!(stdout, EnterAlternateScreen)?;
        }
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        if !raw_ok {
            // Non-interactive fallback: draw once and exit cleanly
            let _ = terminal.draw(|f| self.draw(f));
            execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
            return Ok(());
        }

        let mut exit = false;
        while !exit {
            terminal.draw(|f| self.draw(f))?;
            #[cfg(feature = "kitty-images")]
            {
                let overlay = self.prompt.is_some() || self.show_help;
                let placements = if overlay { &[][..] } else { &self.placements[..] };
                self.kitty
                    .render(terminal.backend_mut(), placements, &mut self.images)?;
            }

            match event::poll(Duration::from_millis(100)) {
                Ok(true) => match event::read() {
                    Ok(Event::Mouse(mouse)) => self.handle_mouse(mouse, Instant::now()),
                    Ok(Event::Key(key)) => {
                        if let Some(command) = Command::from_key(&self, key) {
                            if self.apply_command(command, Instant::now()) == CommandOutcome::Exit {
                                exit = true;
                            }
                        }
                    }
                    Ok(_) => {}
                    Err(_) => {
                        exit = true;
                    }
                },
                Ok(false) => {}
                Err(_) => {
                    exit = true;
                }
            }
        }

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        Ok(())
    }

    /// Draws one frame and records where page images should go.
    pub fn draw(&mut self, f: &mut Frame<'_>) {
        let size = f.area();
        let areas = screen_areas(size, self.state.is_sidebar_open());
        self.pages_area = areas.pages;
        self.placements.clear();
        self.pages.follow_mode(&self.state);
        self.pages.sync(&self.state, areas.pages);
        self.pages.settle(&mut self.state, Instant::now());

        match self.state.phase() {
            ViewPhase::Reader => {
                let mut ctx = RenderCtx {
                    images: &mut self.images,
                    theme: &self.theme,
                    placements: &mut self.placements,
                };
                self.pages.render(f, &self.state, &mut ctx);
            }
            ViewPhase::Idle => self.render_idle(f, areas.pages),
        }
        if let Some(area) = areas.sidebar {
            self.sidebar.render(f, area, &self.state, &self.theme);
        }
        self.render_status(f, areas.status);

        if let Some(prompt) = &self.prompt {
            prompt.render(f, size);
        }
        if self.show_help {
            let popup_area = centered_rect(70, 70, size);
            let help = Paragraph::new(HELP_LINES.join("\n"))
                .block(
                    Block::default()
                        .title("Help (Esc or ? to close)")
                        .borders(Borders::ALL),
                )
                .wrap(Wrap { trim: false });
            f.render_widget(Clear, popup_area);
            f.render_widget(help, popup_area);
        }
    }

    fn render_idle(&self, f: &mut Frame<'_>, area: Rect) {
        f.render_widget(Clear, area);
        let Some(prompt) = self.state.prompt() else {
            return;
        };
        let hint = if self.state.chapters().is_empty() {
            "press o to choose a folder"
        } else {
            "press Enter or Tab to browse chapters"
        };
        let lines = vec![
            Line::from(Span::styled(
                format!("[ {prompt} ]"),
                Style::default()
                    .fg(self.theme.status_fg)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                hint,
                Style::default().add_modifier(Modifier::DIM),
            )),
        ];
        let height = (lines.len() as u16).min(area.height);
        let text_area = Rect {
            y: area.y + area.height.saturating_sub(height) / 2,
            height,
            ..area
        };
        f.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center),
            text_area,
        );
    }

    fn render_status(&self, f: &mut Frame<'_>, area: Rect) {
        let total_width = usize::from(area.width);
        let right = match self.state.position() {
            Some((current, total)) => format!(
                " Pg {}/{} · {:.2}x · {} ",
                current,
                total,
                self.state.zoom(),
                self.state.display_mode().label()
            ),
            None => format!(" {} ", self.state.display_mode().label()),
        };
        let right_len = right.graphemes(true).count();
        let left_text = match (&self.status, self.state.selected_chapter()) {
            (Some(status), _) => status.clone(),
            (None, Some(chapter)) => chapter.title().to_string(),
            (None, None) => "zmreader".to_string(),
        };
        let left = format!(
            " {} ",
            truncate_with_ellipsis(&left_text, total_width.saturating_sub(right_len + 3))
        );
        let left_len = left.graphemes(true).count();

        let mut line = Line::default();
        line.push_span(Span::styled(
            left,
            Style::default()
                .bg(self.theme.status_bg)
                .fg(self.theme.status_fg),
        ));
        let pad = total_width.saturating_sub(left_len + right_len);
        if pad > 0 {
            line.push_span(Span::styled(
                " ".repeat(pad),
                Style::default().bg(self.theme.status_pad_bg),
            ));
        }
        if left_len + right_len <= total_width {
            line.push_span(Span::styled(
                right,
                Style::default()
                    .bg(self.theme.status_pad_bg)
                    .fg(self.theme.status_fg),
            ));
        }
        f.render_widget(Paragraph::new(line), area);
    }
}
