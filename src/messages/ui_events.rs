//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone)]
pub enum UiEvent {
    // Panel navigation
    NextPanel,
    PrevPanel,
    ScrollUp,
    ScrollDown,

    // Catalogue
    NextEndpoint,
    PrevEndpoint,
    SelectEndpoint,
    StartFilter,
    FilterChar(char),
    FilterBackspace,
    ApplyFilter,
    CancelFilter,
    ProbeServiceRoot,

    // Parameter form
    NextField,
    PrevField,
    StartEditing,
    StopEditing,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,
    FillExample,

    // Probe actions
    SendProbe,
    ShareUrl,

    // Popups
    ToggleHelp,
    CloseHelp,
    ToggleLog,

    // System
    Quit,
}

/// Active panel in the UI (needed for context-aware event mapping)
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Panel {
    Catalog,
    Params,
    Response,
}

impl Panel {
    pub fn next(&self) -> Panel {
        match self {
            Panel::Catalog => Panel::Params,
            Panel::Params => Panel::Response,
            Panel::Response => Panel::Catalog,
        }
    }

    pub fn prev(&self) -> Panel {
        match self {
            Panel::Catalog => Panel::Response,
            Panel::Params => Panel::Catalog,
            Panel::Response => Panel::Params,
        }
    }
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    active_panel: Panel,
    input_mode: InputMode,
    show_help: bool,
    show_log: bool,
    filtering: bool,
) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if let KeyCode::Char('c') = key.code {
            return Some(UiEvent::Quit);
        }
    }

    // Popups swallow all input
    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    if show_log {
        return Some(UiEvent::ToggleLog);
    }

    // Filter line captures text while active
    if filtering {
        return match key.code {
            KeyCode::Esc => Some(UiEvent::CancelFilter),
            KeyCode::Enter => Some(UiEvent::ApplyFilter),
            KeyCode::Backspace => Some(UiEvent::FilterBackspace),
            KeyCode::Char(c) => Some(UiEvent::FilterChar(c)),
            _ => None,
        };
    }

    match input_mode {
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
            KeyCode::Tab => Some(UiEvent::NextPanel),
            KeyCode::BackTab => Some(UiEvent::PrevPanel),
            KeyCode::Char('s') => Some(UiEvent::SendProbe),
            KeyCode::Char('c') => Some(UiEvent::ShareUrl),
            KeyCode::Char('h') => Some(UiEvent::ToggleLog),
            KeyCode::Char('/') if active_panel == Panel::Catalog => Some(UiEvent::StartFilter),
            KeyCode::Char('g') if active_panel == Panel::Catalog => {
                Some(UiEvent::ProbeServiceRoot)
            }
            KeyCode::Char('x') if active_panel == Panel::Params => Some(UiEvent::FillExample),
            KeyCode::Char('e') | KeyCode::Enter => match active_panel {
                Panel::Catalog => Some(UiEvent::SelectEndpoint),
                Panel::Params => Some(UiEvent::StartEditing),
                Panel::Response => None,
            },
            KeyCode::Up => match active_panel {
                Panel::Catalog => Some(UiEvent::PrevEndpoint),
                Panel::Params => Some(UiEvent::PrevField),
                Panel::Response => Some(UiEvent::ScrollUp),
            },
            KeyCode::Down => match active_panel {
                Panel::Catalog => Some(UiEvent::NextEndpoint),
                Panel::Params => Some(UiEvent::NextField),
                Panel::Response => Some(UiEvent::ScrollDown),
            },
            _ => None,
        },
        InputMode::Editing => match key.code {
            KeyCode::Esc | KeyCode::Enter => Some(UiEvent::StopEditing),
            KeyCode::Left => Some(UiEvent::CursorLeft),
            KeyCode::Right => Some(UiEvent::CursorRight),
            KeyCode::Backspace => Some(UiEvent::Backspace),
            KeyCode::Tab => Some(UiEvent::NextField),
            KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
            _ => None,
        },
    }
}
