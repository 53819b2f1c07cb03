//! SettingsPane component — reciter selection, reader font size, and the
//! clear-all-favorites action.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    theme::{C_ACCENT, C_MUTED, C_PLAYING, C_PRIMARY, C_SECONDARY, C_SELECTION_BG},
    widgets::pane_chrome::pane_chrome,
};

pub struct SettingsPane {
    selected: usize,
    scroll_offset: usize,
    list_state: ListState,
}

impl SettingsPane {
    pub fn new() -> Self {
        Self {
            selected: 0,
            scroll_offset: 0,
            list_state: ListState::default(),
        }
    }
}

impl Component for SettingsPane {
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        let count = state.editions.len();
        if self.selected >= count && count > 0 {
            self.selected = count - 1;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                if count > 0 {
                    self.selected = (self.selected + 1).min(count - 1);
                }
            }
            KeyCode::Home | KeyCode::Char('g') => self.selected = 0,
            KeyCode::End | KeyCode::Char('G') => self.selected = count.saturating_sub(1),

            KeyCode::Enter => {
                if let Some(edition) = state.editions.get(self.selected) {
                    return vec![Action::SetReciter(edition.identifier.clone())];
                }
            }

            KeyCode::Char('+') | KeyCode::Char('=') => return vec![Action::FontSizeDelta(2)],
            KeyCode::Char('-') | KeyCode::Char('_') => return vec![Action::FontSizeDelta(-2)],

            KeyCode::Char('D') => return vec![Action::ClearFavorites],

            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, state: &AppState) -> Vec<Action> {
        let count = state.editions.len();
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
        let block = pane_chrome("settings", Some('5'), focused, None);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height < 4 {
            return;
        }

        // Header: the live settings values.
        let header = vec![
            Line::from(vec![
                Span::styled(" reciter     ", Style::default().fg(C_MUTED)),
                Span::styled(
                    state.settings.default_reciter.clone(),
                    Style::default().fg(C_ACCENT),
                ),
            ]),
            Line::from(vec![
                Span::styled(" font size   ", Style::default().fg(C_MUTED)),
                Span::styled(
                    format!("{}", state.settings.font_size),
                    Style::default().fg(C_PRIMARY),
                ),
                Span::styled("   +/- adjust", Style::default().fg(C_MUTED)),
            ]),
            Line::from(vec![
                Span::styled(" favorites   ", Style::default().fg(C_MUTED)),
                Span::styled(
                    format!("{}", state.favorites.len()),
                    Style::default().fg(C_PRIMARY),
                ),
                Span::styled("   D clears all", Style::default().fg(C_MUTED)),
            ]),
            Line::default(),
        ];
        let header_h = header.len() as u16;
        frame.render_widget(
            Paragraph::new(header),
            Rect {
                height: header_h.min(inner.height),
                ..inner
            },
        );

        let list_area = Rect {
            y: inner.y + header_h,
            height: inner.height.saturating_sub(header_h),
            ..inner
        };
        if list_area.height == 0 {
            return;
        }

        if state.editions.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "  loading reciters…",
                    Style::default().fg(C_MUTED),
                )),
                list_area,
            );
            return;
        }

        let content_h = list_area.height as usize;
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + content_h {
            self.scroll_offset = self.selected.saturating_sub(content_h.saturating_sub(1));
        }
        let sel_in_view = self
            .selected
            .saturating_sub(self.scroll_offset)
            .min(content_h.saturating_sub(1));

        let end = (self.scroll_offset + content_h).min(state.editions.len());
        let items: Vec<ListItem> = state.editions[self.scroll_offset..end]
            .iter()
            .enumerate()
            .map(|(view_row, edition)| {
                let is_selected = view_row == sel_in_view;
                let is_active = edition.identifier == state.settings.default_reciter;
                let marker = if is_active {
                    Span::styled("● ", Style::default().fg(C_PLAYING))
                } else {
                    Span::raw("  ")
                };
                let name_style = if is_selected {
                    Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(C_SECONDARY)
                };
                let item_bg = if is_selected {
                    Style::default().bg(C_SELECTION_BG)
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(vec![
                    Span::raw(" "),
                    marker,
                    Span::styled(edition.english_name.clone(), name_style),
                    Span::styled(
                        format!("  {}", edition.identifier),
                        Style::default().fg(C_MUTED),
                    ),
                ]))
                .style(item_bg)
            })
            .collect();

        let list = List::new(items)
            .highlight_style(Style::default())
            .highlight_symbol("");
        self.list_state.select(Some(sel_in_view));
        frame.render_stateful_widget(list, list_area, &mut self.list_state);
    }
}
