//! Status bar — bottom line with input mode, screen keys, and the last log line.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::action::Screen;
use crate::theme::{C_ACCENT, C_MODE_FILTER, C_MODE_NORMAL, C_MUTED, C_PLAYING, C_SECONDARY};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    Filter,
}

impl InputMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Filter => "FILTER",
        }
    }

    pub fn color(self) -> ratatui::style::Color {
        match self {
            Self::Normal => C_MODE_NORMAL,
            Self::Filter => C_MODE_FILTER,
        }
    }
}

/// Draw the log bar: connection dot plus the last log line.
pub fn draw_log_bar(frame: &mut Frame, area: Rect, last_log: Option<&str>, audio_alive: bool) {
    let conn_span = if audio_alive {
        Span::styled("●", Style::default().fg(C_PLAYING))
    } else {
        Span::styled("○", Style::default().fg(C_ACCENT))
    };

    let log_span = Span::styled(last_log.unwrap_or(""), Style::default().fg(C_SECONDARY));

    let line = Line::from(vec![conn_span, Span::raw(" "), log_span]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Draw the keybindings footer bar (one row).
pub fn draw_keys_bar(frame: &mut Frame, area: Rect, mode: InputMode, screen: Screen) {
    let (label, label_color) = match mode {
        InputMode::Filter => ("FILTER", C_MODE_FILTER),
        InputMode::Normal => (screen.title(), C_MODE_NORMAL),
    };

    let keys = match mode {
        InputMode::Normal => match screen {
            Screen::Surahs => {
                " ↑↓/jk select  Enter play  f fav  t tafsir  T source  y copy  r random  Space pause  x close  ←→ vol  Tab panes  / filter  1-5 screens  ? help  q quit"
            }
            Screen::Radio => {
                " ↑↓/jk select  Enter play  Space pause  x close  ←→ vol  / filter  1-5 screens  ? help  q quit"
            }
            Screen::Search => {
                " type query  Enter search  ↑↓ results  Enter open verse  Esc clear  1-5 screens  q quit"
            }
            Screen::Favorites => {
                " ↑↓/jk select  Enter open verse  d remove  y copy  1-5 screens  ? help  q quit"
            }
            Screen::Settings => {
                " ↑↓ reciter  Enter apply  +/- font size  D clear favorites  1-5 screens  q quit"
            }
        },
        InputMode::Filter => " type to filter  Up/Down move  Enter keep  Esc clear+close",
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", label),
            Style::default().fg(label_color).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(keys, Style::default().fg(C_MUTED)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
