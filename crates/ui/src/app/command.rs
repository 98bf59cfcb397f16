use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use manga_core::ViewPhase;

use crate::pages_view::PageSurface;
use crate::path_prompt::PathPrompt;

use super::types::{Command, CommandOutcome, PromptCommand};
use super::App;

const SCROLL_STEP: isize = 2;
const WHEEL_STEP: isize = 3;

impl Command {
    pub(super) fn from_key(app: &App, key: KeyEvent) -> Option<Self> {
        if app.prompt.is_some() {
            return match key.code {
                KeyCode::Esc => Some(Command::Prompt(PromptCommand::Cancel)),
                KeyCode::Enter => Some(Command::Prompt(PromptCommand::Submit)),
                KeyCode::Backspace => Some(Command::Prompt(PromptCommand::Backspace)),
                KeyCode::Char(c) => Some(Command::Prompt(PromptCommand::Insert(c))),
                _ => None,
            };
        }
        if app.show_help {
            return matches!(key.code, KeyCode::Esc | KeyCode::Char('?'))
                .then_some(Command::CloseHelp);
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('q') => Some(Command::Exit),
            KeyCode::Char('c') if ctrl => Some(Command::Exit),
            KeyCode::Esc => Some(Command::Cancel),
            KeyCode::Enter => Some(Command::Submit),
            KeyCode::Tab => Some(Command::ToggleSidebar),
            KeyCode::Char('o') => Some(Command::OpenDirectory),
            KeyCode::Char('m') => Some(Command::ToggleMode),
            KeyCode::Char('?') => Some(Command::ToggleHelp),
            KeyCode::Char('+') | KeyCode::Char('=') => Some(Command::ZoomIn),
            KeyCode::Char('-') | KeyCode::Char('_') => Some(Command::ZoomOut),
            KeyCode::Char('j') | KeyCode::Down if !ctrl => Some(Command::NavigateDown(1)),
            KeyCode::Char('k') | KeyCode::Up if !ctrl => Some(Command::NavigateUp(1)),
            KeyCode::PageDown | KeyCode::Char(' ') => Some(Command::HalfPageDown),
            KeyCode::PageUp => Some(Command::HalfPageUp),
            KeyCode::Char('h') | KeyCode::Left => Some(Command::PrevPage),
            KeyCode::Char('l') | KeyCode::Right => Some(Command::NextPage),
            KeyCode::Char('n') => Some(Command::NextChapter),
            KeyCode::Char('p') => Some(Command::PrevChapter),
            _ => None,
        }
    }
}

impl App {
    pub(super) fn apply_command(&mut self, command: Command, now: Instant) -> CommandOutcome {
        match command {
            Command::Exit => return CommandOutcome::Exit,
            Command::Prompt(prompt) => self.apply_prompt_command(prompt),
            Command::CloseHelp => self.show_help = false,
            Command::ToggleHelp => self.show_help = !self.show_help,
            Command::OpenDirectory => {
                let input = self
                    .library_root
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                self.prompt = Some(PathPrompt::with_input(&input));
            }
            Command::Cancel => {
                if self.state.is_sidebar_open() && self.state.phase() == ViewPhase::Reader {
                    self.state.close_sidebar();
                }
                self.status = None;
            }
            Command::Submit => {
                if self.state.is_sidebar_open() {
                    if let Some(page) = self.sidebar.activate(&mut self.state, now) {
                        self.pages.jump_to(page);
                    }
                } else if self.state.phase() == ViewPhase::Idle {
                    self.state.open_sidebar();
                    self.sidebar.follow_selection(&self.state);
                }
            }
            Command::ToggleSidebar => {
                self.state.toggle_sidebar();
                if self.state.is_sidebar_open() {
                    self.sidebar.follow_selection(&self.state);
                }
            }
            Command::ToggleMode => {
                self.state.toggle_display_mode();
                self.pages.follow_mode(&self.state);
            }
            Command::ZoomIn => self.state.zoom_in(),
            Command::ZoomOut => self.state.zoom_out(),
            Command::NavigateDown(steps) => {
                if self.state.is_sidebar_open() {
                    for _ in 0..steps {
                        self.sidebar.down(&self.state);
                    }
                } else {
                    self.scroll_pages(SCROLL_STEP * steps as isize, now);
                }
            }
            Command::NavigateUp(steps) => {
                if self.state.is_sidebar_open() {
                    for _ in 0..steps {
                        self.sidebar.up();
                    }
                } else {
                    self.scroll_pages(-SCROLL_STEP * steps as isize, now);
                }
            }
            Command::HalfPageDown => {
                let rows = self.half_page();
                self.scroll_pages(rows, now);
            }
            Command::HalfPageUp => {
                let rows = self.half_page();
                self.scroll_pages(-rows, now);
            }
            Command::NextPage => {
                self.pages.turn(true, &mut self.state, now);
                self.sidebar.follow_selection(&self.state);
            }
            Command::PrevPage => {
                self.pages.turn(false, &mut self.state, now);
                self.sidebar.follow_selection(&self.state);
            }
            Command::NextChapter => {
                self.state.next_chapter(now);
                self.follow_jump();
            }
            Command::PrevChapter => {
                self.state.prev_chapter(now);
                self.follow_jump();
            }
        }
        CommandOutcome::Continue
    }

    fn apply_prompt_command(&mut self, command: PromptCommand) {
        match command {
            PromptCommand::Cancel => self.prompt = None,
            PromptCommand::Submit => self.submit_prompt(),
            PromptCommand::Backspace => {
                if let Some(prompt) = &mut self.prompt {
                    prompt.backspace();
                }
            }
            PromptCommand::Insert(c) => {
                if let Some(prompt) = &mut self.prompt {
                    prompt.push_char(c);
                }
            }
        }
    }

    pub(super) fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        if self.prompt.is_some() || self.show_help {
            return;
        }
        let on_sidebar = self.state.is_sidebar_open()
            && self.sidebar.row_at(mouse.column, mouse.row).is_some();
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(row) = self
                    .state
                    .is_sidebar_open()
                    .then(|| self.sidebar.row_at(mouse.column, mouse.row))
                    .flatten()
                {
                    self.sidebar.cursor = row;
                    if self.sidebar.current_row(&self.state).is_some() {
                        self.apply_command(Command::Submit, now);
                    }
                } else if self.state.phase() == ViewPhase::Idle {
                    self.state.open_sidebar();
                    self.sidebar.follow_selection(&self.state);
                } else if self
                    .pages
                    .click(mouse.column, mouse.row, &mut self.state, now)
                {
                    self.sidebar.follow_selection(&self.state);
                }
            }
            MouseEventKind::ScrollDown if on_sidebar => self.sidebar.down(&self.state),
            MouseEventKind::ScrollUp if on_sidebar => self.sidebar.up(),
            MouseEventKind::ScrollDown => self.scroll_pages(WHEEL_STEP, now),
            MouseEventKind::ScrollUp => self.scroll_pages(-WHEEL_STEP, now),
            _ => {}
        }
    }

    fn scroll_pages(&mut self, rows: isize, now: Instant) {
        if self.state.phase() != ViewPhase::Reader {
            return;
        }
        self.pages.scroll_by(rows, &mut self.state, now);
        self.sidebar.follow_selection(&self.state);
    }

    fn half_page(&self) -> isize {
        (i32::from(self.pages_area.height) / 2).max(1) as isize
    }

    fn follow_jump(&mut self) {
        if let Some(page) = self.state.selected_page_index() {
            self.pages.jump_to(page);
        }
        self.sidebar.follow_selection(&self.state);
    }
}
