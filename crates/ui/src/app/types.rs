#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum PromptCommand {
    Cancel,
    Submit,
    Backspace,
    Insert(char),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Command {
    Exit,
    Cancel,
    Submit,
    OpenDirectory,
    ToggleSidebar,
    ToggleMode,
    ToggleHelp,
    CloseHelp,
    ZoomIn,
    ZoomOut,
    NavigateDown(usize),
    NavigateUp(usize),
    HalfPageDown,
    HalfPageUp,
    PrevPage,
    NextPage,
    PrevChapter,
    NextChapter,
    Prompt(PromptCommand),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum CommandOutcome {
    Continue,
    Exit,
}
