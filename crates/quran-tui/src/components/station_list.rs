//! StationList component — the Radio screen's station picker.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};
use std::time::Instant;

use quran_core::session::PlaybackStatus;
use quran_core::types::Station;

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    theme::{C_CONNECTING, C_ERROR, C_MUTED, C_PLAYING, C_PRIMARY, C_SECONDARY, C_SELECTION_BG},
    widgets::{
        filter_input::{FilterAction, FilterInput},
        pane_chrome::{pane_chrome, Badge},
        scrollable_list::ScrollableList,
    },
};

pub struct StationList {
    list: ScrollableList<Station>,
    filter_input: FilterInput,
    list_state: ListState,
    last_click: Option<(usize, Instant)>,
}

impl StationList {
    pub fn new() -> Self {
        Self {
            list: ScrollableList::new(|station: &Station, q: &str| {
                q.split_whitespace()
                    .all(|term| station.name.to_lowercase().contains(&term.to_lowercase()))
            }),
            filter_input: FilterInput::new("station name…"),
            list_state: ListState::default(),
            last_click: None,
        }
    }

    fn sync_items(&mut self, state: &AppState) {
        if self.list.total_len() != state.stations.len() {
            self.list.set_items(state.stations.clone());
        }
    }

    fn play_selected(&self) -> Vec<Action> {
        match self.list.selected_item() {
            Some(station) => vec![Action::PlayStation(station.clone())],
            None => vec![],
        }
    }

    fn render_item<'a>(
        &self,
        station: &'a Station,
        is_selected: bool,
        state: &AppState,
    ) -> ListItem<'a> {
        let is_current = state.session.is_current_station(station.id);

        let (icon, icon_color): (&'static str, Color) = if is_current {
            match state.status {
                PlaybackStatus::Playing => ("▶", C_PLAYING),
                PlaybackStatus::Paused => ("⏸", C_CONNECTING),
                PlaybackStatus::Connecting => ("⋯", C_CONNECTING),
                PlaybackStatus::Error => ("✗", C_ERROR),
                PlaybackStatus::Idle => ("■", C_MUTED),
            }
        } else {
            (" ", C_MUTED)
        };

        let name_color = if is_current {
            match state.status {
                PlaybackStatus::Playing => C_PLAYING,
                PlaybackStatus::Paused | PlaybackStatus::Connecting => C_CONNECTING,
                PlaybackStatus::Error => C_ERROR,
                PlaybackStatus::Idle => C_PRIMARY,
            }
        } else if is_selected {
            C_PRIMARY
        } else {
            C_SECONDARY
        };

        let name_style = if is_current || is_selected {
            Style::default().fg(name_color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(name_color)
        };
        let item_bg = if is_selected {
            Style::default().bg(C_SELECTION_BG)
        } else {
            Style::default()
        };

        ListItem::new(Line::from(vec![
            Span::styled(format!(" {} ", icon), Style::default().fg(icon_color)),
            Span::styled(station.name.clone(), name_style),
        ]))
        .style(item_bg)
    }
}

impl Component for StationList {
    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }

        if self.filter_input.is_active() {
            match key.code {
                KeyCode::Up => {
                    self.list.select_up(1);
                    return vec![];
                }
                KeyCode::Down => {
                    self.list.select_down(1);
                    return vec![];
                }
                _ => {}
            }
            return match self.filter_input.handle_key(key) {
                FilterAction::Changed(q) => {
                    self.list.set_filter(&q);
                    vec![]
                }
                FilterAction::Confirmed => vec![Action::CloseFilter],
                FilterAction::Cancelled => {
                    self.list.set_filter("");
                    vec![Action::CloseFilter]
                }
            };
        }

        let step = if key.modifiers.contains(KeyModifiers::SHIFT) {
            5
        } else {
            1
        };
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.list.select_up(step),
            KeyCode::Down | KeyCode::Char('j') => self.list.select_down(step),
            KeyCode::PageUp => self.list.select_up(10),
            KeyCode::PageDown => self.list.select_down(10),
            KeyCode::Home | KeyCode::Char('g') => self.list.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.list.select_last(),

            KeyCode::Enter => return self.play_selected(),

            KeyCode::Char('y') => {
                if let Some(st) = self.list.selected_item() {
                    return vec![Action::CopyToClipboard(st.url.clone())];
                }
            }

            KeyCode::Char('/') => {
                self.filter_input.activate();
                return vec![Action::OpenFilter];
            }

            _ => {}
        }

        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, _state: &AppState) -> Vec<Action> {
        let rel_row = event.row.saturating_sub(area.y + 1) as usize;
        match event.kind {
            MouseEventKind::ScrollUp => self.list.select_up(1),
            MouseEventKind::ScrollDown => self.list.select_down(1),
            MouseEventKind::Down(ratatui::crossterm::event::MouseButton::Left) => {
                let now = Instant::now();
                let is_double = self
                    .last_click
                    .map(|(row, t)| row == rel_row && t.elapsed().as_millis() < 400)
                    .unwrap_or(false);
                if self.list.handle_click(rel_row) && is_double {
                    self.last_click = None;
                    return self.play_selected();
                }
                self.last_click = Some((rel_row, now));
            }
            _ => {}
        }
        vec![]
    }

    fn on_action(&mut self, _action: &Action, state: &AppState) -> Vec<Action> {
        self.sync_items(state);
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        self.sync_items(state);

        let badge = if matches!(&state.session.current, quran_core::session::NowPlaying::Station(_))
            && state.status == PlaybackStatus::Playing
        {
            Some(Badge {
                text: "LIVE",
                color: C_PLAYING,
            })
        } else {
            None
        };

        let block = pane_chrome("stations", Some('1'), focused, badge);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if state.stations.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "  loading stations…",
                    Style::default().fg(C_MUTED),
                )),
                inner,
            );
            return;
        }

        if self.list.is_empty() && !self.list.filter.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "  no stations match filter",
                    Style::default().fg(C_MUTED),
                )),
                inner,
            );
            return;
        }

        let content_h = inner.height as usize;
        self.list.ensure_visible(content_h);
        let sel_in_view = self
            .list
            .selected
            .saturating_sub(self.list.scroll_offset)
            .min(content_h.saturating_sub(1));

        let visible: Vec<(usize, Station)> = self
            .list
            .visible_items(content_h)
            .into_iter()
            .map(|(i, s)| (i, s.clone()))
            .collect();

        let items: Vec<ListItem> = visible
            .iter()
            .enumerate()
            .map(|(view_row, (_, station))| {
                self.render_item(station, view_row == sel_in_view, state)
            })
            .collect();

        let list = List::new(items)
            .highlight_style(Style::default())
            .highlight_symbol("");
        self.list_state.select(Some(sel_in_view));
        frame.render_stateful_widget(list, inner, &mut self.list_state);

        if self.filter_input.is_active() {
            let filter_area = Rect {
                y: inner.y + inner.height.saturating_sub(1),
                height: 1,
                ..inner
            };
            self.filter_input.draw(frame, filter_area);
        }
    }
}
