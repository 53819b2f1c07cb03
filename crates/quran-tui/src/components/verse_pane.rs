//! VersePane component — the reader: verses of the open surah, playback,
//! favorites, and the tafsir overlay.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use quran_core::types::SurahDetail;

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    theme::{
        style_arabic, C_FAVORITE, C_MUTED, C_NUMBER_HINT, C_PLAYING, C_PRIMARY, C_SECONDARY,
        C_SELECTION_BG, C_TAFSIR,
    },
    widgets::pane_chrome::{pane_chrome, Badge},
};

pub struct VersePane {
    /// Cursor over `open_surah.ayahs` (plain index into the loaded vec).
    cursor: usize,
    scroll: u16,
    tafsir_visible: bool,
    tafsir_source_idx: usize,
    /// Surah number the cursor belongs to, to reset on surah change.
    cursor_surah: Option<u32>,
}

impl VersePane {
    pub fn new() -> Self {
        Self {
            cursor: 0,
            scroll: 0,
            tafsir_visible: false,
            tafsir_source_idx: 0,
            cursor_surah: None,
        }
    }

    fn sync_cursor(&mut self, state: &AppState) {
        let open = state.open_surah.as_ref().map(|s| s.number);
        if open != self.cursor_surah {
            self.cursor_surah = open;
            self.cursor = 0;
            self.scroll = 0;
            self.tafsir_visible = false;
        }
        if let Some(surah) = &state.open_surah {
            if self.cursor >= surah.ayahs.len() {
                self.cursor = surah.ayahs.len().saturating_sub(1);
            }
        }
    }

    fn tafsir_source(&self, state: &AppState) -> Option<u32> {
        state
            .tafsir_sources
            .get(self.tafsir_source_idx % state.tafsir_sources.len().max(1))
            .map(|t| t.id)
    }

    fn fetch_tafsir_action(&self, state: &AppState) -> Option<Action> {
        let surah = state.open_surah.as_ref()?;
        let ayah = surah.ayahs.get(self.cursor)?;
        let source = self.tafsir_source(state)?;
        Some(Action::FetchTafsir {
            source,
            surah: surah.number,
            ayah: ayah.number_in_surah,
        })
    }

    /// Blank rows between verses, scaled off the configured reader font size.
    fn verse_gap(state: &AppState) -> u16 {
        if state.settings.font_size >= 28 {
            2
        } else {
            1
        }
    }

    fn verse_lines<'a>(&self, surah: &'a SurahDetail, state: &AppState) -> Vec<Line<'a>> {
        let gap = Self::verse_gap(state);
        let mut lines: Vec<Line> = Vec::new();

        for (idx, ayah) in surah.ayahs.iter().enumerate() {
            let selected = idx == self.cursor;
            let playing = state
                .session
                .is_current_verse(surah.number, ayah.number_in_surah);
            let fav = state.is_favorite(surah.number, ayah.number_in_surah);

            let marker = if playing {
                Span::styled("▶ ", Style::default().fg(C_PLAYING))
            } else if selected {
                Span::styled("› ", Style::default().fg(C_PRIMARY))
            } else {
                Span::raw("  ")
            };
            let star = if fav {
                Span::styled("✹ ", Style::default().fg(C_FAVORITE))
            } else {
                Span::raw("  ")
            };
            let number = Span::styled(
                format!("{:>3}  ", ayah.number_in_surah),
                Style::default().fg(C_NUMBER_HINT),
            );

            let text_style = if playing {
                style_arabic().add_modifier(Modifier::BOLD)
            } else if selected {
                style_arabic()
            } else {
                Style::default().fg(C_SECONDARY)
            };
            let row_bg = if selected {
                Style::default().bg(C_SELECTION_BG)
            } else {
                Style::default()
            };

            lines.push(
                Line::from(vec![
                    marker,
                    star,
                    number,
                    Span::styled(ayah.text.as_str(), text_style),
                ])
                .style(row_bg),
            );
            for _ in 0..gap {
                lines.push(Line::default());
            }
        }
        lines
    }
}

impl Component for VersePane {
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        self.sync_cursor(state);
        let Some(surah) = &state.open_surah else {
            return vec![];
        };
        if surah.ayahs.is_empty() {
            return vec![];
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
                if self.tafsir_visible {
                    return self.fetch_tafsir_action(state).into_iter().collect();
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.cursor = (self.cursor + 1).min(surah.ayahs.len() - 1);
                if self.tafsir_visible {
                    return self.fetch_tafsir_action(state).into_iter().collect();
                }
            }
            KeyCode::PageUp => self.cursor = self.cursor.saturating_sub(10),
            KeyCode::PageDown => self.cursor = (self.cursor + 10).min(surah.ayahs.len() - 1),
            KeyCode::Home | KeyCode::Char('g') => self.cursor = 0,
            KeyCode::End | KeyCode::Char('G') => self.cursor = surah.ayahs.len() - 1,

            KeyCode::Enter => {
                let ayah = surah.ayahs[self.cursor].clone();
                return vec![Action::PlayVerse {
                    surah: surah.clone(),
                    ayah,
                }];
            }

            KeyCode::Char('f') => {
                let ayah = &surah.ayahs[self.cursor];
                return vec![Action::ToggleFavorite {
                    surah_number: surah.number,
                    surah_name: surah.english_name.clone(),
                    ayah_number: ayah.number_in_surah,
                    text: ayah.text.clone(),
                }];
            }

            KeyCode::Char('t') => {
                self.tafsir_visible = !self.tafsir_visible;
                if self.tafsir_visible {
                    return self.fetch_tafsir_action(state).into_iter().collect();
                }
            }
            KeyCode::Char('T') => {
                if !state.tafsir_sources.is_empty() {
                    self.tafsir_source_idx =
                        (self.tafsir_source_idx + 1) % state.tafsir_sources.len();
                    if self.tafsir_visible {
                        return self.fetch_tafsir_action(state).into_iter().collect();
                    }
                }
            }

            KeyCode::Char('y') => {
                let ayah = &surah.ayahs[self.cursor];
                let text = format!(
                    "{} ({}:{})",
                    ayah.text, surah.number, ayah.number_in_surah
                );
                return vec![Action::CopyToClipboard(text)];
            }

            _ => {}
        }

        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, state: &AppState) -> Vec<Action> {
        self.sync_cursor(state);
        let Some(surah) = &state.open_surah else {
            return vec![];
        };
        match event.kind {
            MouseEventKind::ScrollUp => self.cursor = self.cursor.saturating_sub(1),
            MouseEventKind::ScrollDown => {
                self.cursor = (self.cursor + 1).min(surah.ayahs.len().saturating_sub(1))
            }
            _ => {}
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, state: &AppState) -> Vec<Action> {
        self.sync_cursor(state);
        if let Action::OpenSurahAt { surah, ayah } = action {
            if state.open_surah.as_ref().map(|s| s.number) == Some(*surah) {
                if let Some(pos) = state
                    .open_surah
                    .as_ref()
                    .and_then(|s| s.ayahs.iter().position(|a| a.number_in_surah == *ayah))
                {
                    self.cursor = pos;
                }
            }
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        self.sync_cursor(state);

        let title = state
            .open_surah
            .as_ref()
            .map(|s| format!("{} · {}", s.english_name, s.name))
            .unwrap_or_else(|| "reader".to_string());
        let badge = state.open_surah.as_ref().map(|s| Badge {
            text: match s.revelation_type.as_str() {
                "Meccan" => "MECCAN",
                "Medinan" => "MEDINAN",
                _ => "",
            },
            color: C_MUTED,
        });

        let block = pane_chrome(&title, Some('2'), focused, badge);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(surah) = &state.open_surah else {
            let msg = if state.surah_loading {
                "  loading surah…"
            } else {
                "  select a surah"
            };
            frame.render_widget(
                Paragraph::new(Span::styled(msg, Style::default().fg(C_MUTED))),
                inner,
            );
            return;
        };

        // Tafsir overlay takes the lower third while visible.
        let (verse_area, tafsir_area) = if self.tafsir_visible {
            let split = inner.height.saturating_sub(inner.height / 3);
            (
                Rect {
                    height: split,
                    ..inner
                },
                Some(Rect {
                    y: inner.y + split,
                    height: inner.height - split,
                    ..inner
                }),
            )
        } else {
            (inner, None)
        };

        // Keep the cursor row in view.  Row position is cursor * (1 + gap)
        // before wrapping; close enough to track since long verses wrap a
        // few rows at most at typical widths.
        let gap = Self::verse_gap(state) as usize;
        let cursor_row = (self.cursor * (1 + gap)) as u16;
        let view_h = verse_area.height;
        if cursor_row < self.scroll {
            self.scroll = cursor_row;
        } else if cursor_row >= self.scroll + view_h.saturating_sub(2) {
            self.scroll = cursor_row.saturating_sub(view_h.saturating_sub(2).max(1)) + 1;
        }

        let lines = self.verse_lines(surah, state);
        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0));
        frame.render_widget(paragraph, verse_area);

        if let Some(tafsir_area) = tafsir_area {
            let source_name = state
                .tafsir_sources
                .get(self.tafsir_source_idx % state.tafsir_sources.len().max(1))
                .map(|t| t.name.as_str())
                .unwrap_or("tafsir");

            let mut lines = vec![Line::from(Span::styled(
                format!("── {} ──", source_name),
                Style::default().fg(C_TAFSIR).add_modifier(Modifier::BOLD),
            ))];
            let body = if state.tafsir_loading {
                "loading…"
            } else {
                state.tafsir_text.as_deref().unwrap_or("no tafsir available")
            };
            lines.push(Line::from(Span::styled(
                body,
                Style::default().fg(C_SECONDARY),
            )));

            frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), tafsir_area);
        }
    }
}
