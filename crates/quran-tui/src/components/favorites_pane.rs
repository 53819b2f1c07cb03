//! FavoritesPane component — bookmarked verses, newest last.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

use quran_core::types::FavoriteAyah;

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    theme::{style_arabic, C_FAVORITE, C_MUTED, C_NUMBER_HINT, C_PRIMARY, C_SELECTION_BG},
    widgets::pane_chrome::{pane_chrome, Badge},
};

pub struct FavoritesPane {
    selected: usize,
    scroll_offset: usize,
    list_state: ListState,
}

impl FavoritesPane {
    pub fn new() -> Self {
        Self {
            selected: 0,
            scroll_offset: 0,
            list_state: ListState::default(),
        }
    }

    fn clamp_selection(&mut self, state: &AppState) {
        let len = state.favorites.len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    fn selected_item<'a>(&self, state: &'a AppState) -> Option<&'a FavoriteAyah> {
        state.favorites.items().get(self.selected)
    }
}

impl Component for FavoritesPane {
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        self.clamp_selection(state);
        let count = state.favorites.len();

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
                if let Some(fav) = self.selected_item(state) {
                    return vec![
                        Action::OpenSurahAt {
                            surah: fav.surah_number,
                            ayah: fav.ayah_number,
                        },
                        Action::SwitchScreen(crate::action::Screen::Surahs),
                    ];
                }
            }
            KeyCode::Char('d') | KeyCode::Char('f') => {
                if let Some(fav) = self.selected_item(state) {
                    return vec![Action::ToggleFavorite {
                        surah_number: fav.surah_number,
                        surah_name: fav.surah_name.clone(),
                        ayah_number: fav.ayah_number,
                        text: fav.text.clone(),
                    }];
                }
            }
            KeyCode::Char('y') => {
                if let Some(fav) = self.selected_item(state) {
                    return vec![Action::CopyToClipboard(format!(
                        "{} ({}:{})",
                        fav.text, fav.surah_number, fav.ayah_number
                    ))];
                }
            }
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, state: &AppState) -> Vec<Action> {
        let count = state.favorites.len();
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

    fn on_action(&mut self, _action: &Action, state: &AppState) -> Vec<Action> {
        self.clamp_selection(state);
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        self.clamp_selection(state);

        let count_text = format!("{}", state.favorites.len());
        let badge = if state.favorites.is_empty() {
            None
        } else {
            Some(Badge {
                text: &count_text,
                color: C_FAVORITE,
            })
        };
        let block = pane_chrome("favorites", Some('4'), focused, badge);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if state.favorites.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "  no favorites yet · press f on a verse in the reader",
                    Style::default().fg(C_MUTED),
                )),
                inner,
            );
            return;
        }

        let content_h = inner.height as usize;
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + content_h {
            self.scroll_offset = self.selected.saturating_sub(content_h.saturating_sub(1));
        }
        let sel_in_view = self
            .selected
            .saturating_sub(self.scroll_offset)
            .min(content_h.saturating_sub(1));

        let items_all = state.favorites.items();
        let end = (self.scroll_offset + content_h).min(items_all.len());
        let items: Vec<ListItem> = items_all[self.scroll_offset..end]
            .iter()
            .enumerate()
            .map(|(view_row, fav)| {
                let is_selected = view_row == sel_in_view;
                let text_style = if is_selected {
                    style_arabic().add_modifier(Modifier::BOLD)
                } else {
                    style_arabic()
                };
                let item_bg = if is_selected {
                    Style::default().bg(C_SELECTION_BG)
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(vec![
                    Span::styled(" ✹ ", Style::default().fg(C_FAVORITE)),
                    Span::styled(
                        format!("{:>3}:{:<3} ", fav.surah_number, fav.ayah_number),
                        Style::default().fg(C_NUMBER_HINT),
                    ),
                    Span::styled(fav.surah_name.as_str(), Style::default().fg(C_PRIMARY)),
                    Span::raw("  "),
                    Span::styled(fav.text.as_str(), text_style),
                ]))
                .style(item_bg)
            })
            .collect();

        let list = List::new(items)
            .highlight_style(Style::default())
            .highlight_symbol("");
        self.list_state.select(Some(sel_in_view));
        frame.render_stateful_widget(list, inner, &mut self.list_state);
    }
}
