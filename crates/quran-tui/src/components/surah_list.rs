//! SurahList component — left pane of the Surahs screen, the chapter index.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};
use std::time::Instant;

use quran_core::types::SurahRef;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{C_MUTED, C_NUMBER_HINT, C_PLAYING, C_PRIMARY, C_SECONDARY, C_SELECTION_BG},
    widgets::{
        filter_input::{FilterAction, FilterInput},
        pane_chrome::{pane_chrome, Badge},
        scrollable_list::ScrollableList,
    },
};

/// "114 surahs · 6236 ayahs" once the index has loaded.
fn text_stats(surahs: &[SurahRef]) -> Option<String> {
    if surahs.is_empty() {
        return None;
    }
    let ayahs: u32 = surahs.iter().map(|s| s.number_of_ayahs).sum();
    Some(format!("{} surahs · {} ayahs", surahs.len(), ayahs))
}

pub struct SurahList {
    list: ScrollableList<SurahRef>,
    filter_input: FilterInput,
    list_state: ListState,
    last_click: Option<(usize, Instant)>,
}

impl SurahList {
    pub fn new() -> Self {
        Self {
            list: ScrollableList::new(|surah: &SurahRef, q: &str| surah_matches(surah, q)),
            filter_input: FilterInput::new("surah name or number…"),
            list_state: ListState::default(),
            last_click: None,
        }
    }

    fn sync_items(&mut self, state: &AppState) {
        if self.list.total_len() != state.surahs.len() {
            self.list.set_items(state.surahs.clone());
        }
    }

    fn open_selected(&self) -> Vec<Action> {
        match self.list.selected_item() {
            Some(surah) => vec![
                Action::OpenSurah(surah.number),
                Action::FocusPane(ComponentId::VersePane),
            ],
            None => vec![],
        }
    }

    fn render_item<'a>(
        &self,
        surah: &'a SurahRef,
        is_selected: bool,
        state: &AppState,
    ) -> ListItem<'a> {
        let is_open = state
            .open_surah
            .as_ref()
            .map(|s| s.number == surah.number)
            .unwrap_or(false);
        let has_playing = matches!(
            &state.session.current,
            quran_core::session::NowPlaying::Verse { surah: s, .. } if s.number == surah.number
        );

        let marker = if has_playing {
            Span::styled("▶ ", Style::default().fg(C_PLAYING))
        } else if is_open {
            Span::styled("› ", Style::default().fg(C_SECONDARY))
        } else {
            Span::raw("  ")
        };

        let name_style = if is_selected || is_open {
            Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(C_SECONDARY)
        };

        let item_bg = if is_selected {
            Style::default().bg(C_SELECTION_BG)
        } else {
            Style::default()
        };

        let spans = vec![
            marker,
            Span::styled(
                format!("{:>3} ", surah.number),
                Style::default().fg(C_NUMBER_HINT),
            ),
            Span::styled(surah.english_name.clone(), name_style),
            Span::styled(
                format!("  {} ayahs", surah.number_of_ayahs),
                Style::default().fg(C_MUTED),
            ),
        ];

        ListItem::new(Line::from(spans)).style(item_bg)
    }
}

fn surah_matches(surah: &SurahRef, q: &str) -> bool {
    if q.trim().is_empty() {
        return true;
    }
    let q = q.to_lowercase();
    let text = format!(
        "{} {} {} {}",
        surah.number,
        surah.english_name.to_lowercase(),
        surah.english_name_translation.to_lowercase(),
        surah.name
    );
    q.split_whitespace().all(|term| text.contains(term))
}

impl Component for SurahList {
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

            KeyCode::Enter => return self.open_selected(),
            KeyCode::Char('r') => return vec![Action::RandomSurah],

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
                    return self.open_selected();
                }
                self.last_click = Some((rel_row, now));
            }
            _ => {}
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, state: &AppState) -> Vec<Action> {
        self.sync_items(state);
        if let Action::OpenSurahAt { surah, .. } = action {
            if let Some(pos) = state.surahs.iter().position(|s| s.number == *surah) {
                self.list.set_selected_by_original(pos);
            }
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        self.sync_items(state);

        // Corpus totals in the header, like the web reader's stats card.
        let stats = text_stats(&state.surahs);
        let badge = stats.as_deref().map(|text| Badge {
            text,
            color: C_MUTED,
        });
        let block = pane_chrome("surahs", Some('1'), focused, badge);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if state.surahs.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "  loading surah index…",
                    Style::default().fg(C_MUTED),
                )),
                inner,
            );
            return;
        }

        if self.list.is_empty() && !self.list.filter.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "  no surahs match filter",
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

        let visible: Vec<(usize, SurahRef)> = self
            .list
            .visible_items(content_h)
            .into_iter()
            .map(|(i, s)| (i, s.clone()))
            .collect();

        let items: Vec<ListItem> = visible
            .iter()
            .enumerate()
            .map(|(view_row, (_, surah))| self.render_item(surah, view_row == sel_in_view, state))
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_sum_the_loaded_index() {
        assert_eq!(text_stats(&[]), None);
        let surahs = vec![
            SurahRef {
                number: 1,
                number_of_ayahs: 7,
                ..Default::default()
            },
            SurahRef {
                number: 2,
                number_of_ayahs: 286,
                ..Default::default()
            },
        ];
        assert_eq!(
            text_stats(&surahs).as_deref(),
            Some("2 surahs · 293 ayahs")
        );
    }
}
