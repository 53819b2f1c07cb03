//! SearchPane component — full-text verse search with a result list.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

use quran_core::types::SearchMatch;

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    theme::{
        C_FILTER_FG, C_MUTED, C_NUMBER_HINT, C_PRIMARY, C_SECONDARY, C_SELECTION_BG,
        style_arabic,
    },
    widgets::pane_chrome::pane_chrome,
};

pub struct SearchPane {
    input: Input,
    /// True while keystrokes go to the query box instead of the result list.
    editing: bool,
    selected: usize,
    scroll_offset: usize,
    list_state: ListState,
    /// Query of the results currently in state, to detect staleness.
    last_submitted: String,
}

impl SearchPane {
    pub fn new() -> Self {
        Self {
            input: Input::default(),
            editing: true,
            selected: 0,
            scroll_offset: 0,
            list_state: ListState::default(),
            last_submitted: String::new(),
        }
    }

    fn results<'a>(&self, state: &'a AppState) -> &'a [SearchMatch] {
        state
            .search_results
            .as_ref()
            .map(|r| r.matches.as_slice())
            .unwrap_or(&[])
    }

    fn open_selected(&self, state: &AppState) -> Vec<Action> {
        match self.results(state).get(self.selected) {
            Some(m) => vec![
                Action::OpenSurahAt {
                    surah: m.surah.number,
                    ayah: m.number_in_surah,
                },
                Action::SwitchScreen(crate::action::Screen::Surahs),
            ],
            None => vec![],
        }
    }

    fn render_item<'a>(&self, m: &'a SearchMatch, is_selected: bool) -> ListItem<'a> {
        let style = if is_selected {
            style_arabic().add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(C_SECONDARY)
        };
        let item_bg = if is_selected {
            Style::default().bg(C_SELECTION_BG)
        } else {
            Style::default()
        };
        ListItem::new(Line::from(vec![
            Span::styled(
                format!(" {:>3}:{:<3} ", m.surah.number, m.number_in_surah),
                Style::default().fg(C_NUMBER_HINT),
            ),
            Span::styled(m.surah.english_name.as_str(), Style::default().fg(C_PRIMARY)),
            Span::raw("  "),
            Span::styled(m.text.as_str(), style),
        ]))
        .style(item_bg)
    }
}

impl Component for SearchPane {
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }

        if self.editing {
            match key.code {
                KeyCode::Enter => {
                    let query = self.input.value().trim().to_string();
                    if query.is_empty() {
                        return vec![];
                    }
                    self.editing = false;
                    self.selected = 0;
                    self.scroll_offset = 0;
                    self.last_submitted = query.clone();
                    return vec![Action::SubmitSearch(query), Action::CloseFilter];
                }
                KeyCode::Esc => {
                    self.input = Input::default();
                    return vec![];
                }
                KeyCode::Down | KeyCode::Tab if !self.results(state).is_empty() => {
                    self.editing = false;
                    return vec![Action::CloseFilter];
                }
                _ => {
                    self.input
                        .handle_event(&ratatui::crossterm::event::Event::Key(key));
                }
            }
            return vec![];
        }

        let count = self.results(state).len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                if self.selected == 0 {
                    self.editing = true;
                    return vec![Action::OpenFilter];
                }
                self.selected -= 1;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if count > 0 {
                    self.selected = (self.selected + 1).min(count - 1);
                }
            }
            KeyCode::PageUp => self.selected = self.selected.saturating_sub(10),
            KeyCode::PageDown => {
                if count > 0 {
                    self.selected = (self.selected + 10).min(count - 1);
                }
            }
            KeyCode::Enter => return self.open_selected(state),
            KeyCode::Esc | KeyCode::Char('/') => {
                self.editing = true;
                return vec![Action::OpenFilter];
            }
            KeyCode::Char('y') => {
                if let Some(m) = self.results(state).get(self.selected) {
                    return vec![Action::CopyToClipboard(format!(
                        "{} ({}:{})",
                        m.text, m.surah.number, m.number_in_surah
                    ))];
                }
            }
            _ => {}
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        // Re-assert filter mode on entry so the query box grabs the keyboard.
        if let Action::SwitchScreen(crate::action::Screen::Search) = action {
            if self.editing {
                return vec![Action::OpenFilter];
            }
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, state: &AppState) -> Vec<Action> {
        let count = self.results(state).len();
        match event.kind {
            MouseEventKind::ScrollUp => self.selected = self.selected.saturating_sub(1),
            MouseEventKind::ScrollDown => {
                if count > 0 {
                    self.selected = (self.selected + 1).min(count - 1);
                }
            }
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let block = pane_chrome("search", Some('3'), focused, None);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height < 2 {
            return;
        }

        // Query line on top, results below.
        let query_area = Rect { height: 1, ..inner };
        let results_area = Rect {
            y: inner.y + 2,
            height: inner.height.saturating_sub(2),
            ..inner
        };

        let cursor_marker = if self.editing && focused { "█" } else { "" };
        let query_line = Line::from(vec![
            Span::styled(" query: ", Style::default().fg(C_MUTED)),
            Span::styled(
                self.input.value().to_string(),
                Style::default().fg(C_FILTER_FG),
            ),
            Span::styled(cursor_marker, Style::default().fg(C_FILTER_FG)),
        ]);
        frame.render_widget(Paragraph::new(query_line), query_area);

        let results = self.results(state);
        if state.search_in_flight {
            frame.render_widget(
                Paragraph::new(Span::styled("  searching…", Style::default().fg(C_MUTED))),
                results_area,
            );
            return;
        }
        if results.is_empty() {
            let msg = if self.last_submitted.is_empty() {
                "  type a query and press Enter"
            } else {
                "  no matches"
            };
            frame.render_widget(
                Paragraph::new(Span::styled(msg, Style::default().fg(C_MUTED))),
                results_area,
            );
            return;
        }

        let content_h = results_area.height as usize;
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + content_h {
            self.scroll_offset = self.selected.saturating_sub(content_h.saturating_sub(1));
        }
        let sel_in_view = self
            .selected
            .saturating_sub(self.scroll_offset)
            .min(content_h.saturating_sub(1));

        let end = (self.scroll_offset + content_h).min(results.len());
        let items: Vec<ListItem> = results[self.scroll_offset..end]
            .iter()
            .enumerate()
            .map(|(view_row, m)| self.render_item(m, view_row == sel_in_view && !self.editing))
            .collect();

        let list = List::new(items)
            .highlight_style(Style::default())
            .highlight_symbol("");
        self.list_state.select(Some(sel_in_view));
        frame.render_stateful_widget(list, results_area, &mut self.list_state);
    }
}
