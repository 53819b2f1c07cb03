//! Player bar — two rows above the status line, visible on every screen
//! whenever something is selected for playback.
//!
//! Row 1:  status glyph, what is playing (verse reference or station name)
//! Row 2:  progress bar for verse audio, LIVE marker for stations, volume

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use quran_core::session::{NowPlaying, PlaybackStatus};

use crate::app_state::AppState;
use crate::theme::{
    C_CONNECTING, C_ERROR, C_MUTED, C_PLAYING, C_PRIMARY, C_SECONDARY, style_muted,
};

pub fn height(state: &AppState) -> u16 {
    if state.session.current.is_idle() {
        0
    } else {
        2
    }
}

pub fn draw(frame: &mut Frame, area: Rect, state: &AppState) {
    if area.height < 2 || state.session.current.is_idle() {
        return;
    }

    let (glyph, glyph_color) = match state.status {
        PlaybackStatus::Playing => ("▶", C_PLAYING),
        PlaybackStatus::Paused => ("⏸", C_SECONDARY),
        PlaybackStatus::Connecting => ("◌", C_CONNECTING),
        PlaybackStatus::Error => ("✗", C_ERROR),
        PlaybackStatus::Idle => (" ", C_MUTED),
    };

    let title = match &state.session.current {
        NowPlaying::Idle => String::new(),
        NowPlaying::Verse { surah, ayah } => {
            let name = state
                .surah_ref(surah.number)
                .map(|s| s.english_name.as_str())
                .unwrap_or(surah.english_name.as_str());
            format!("{} {}:{}", name, surah.number, ayah.number_in_surah)
        }
        NowPlaying::Station(station) => station.name.clone(),
    };
    let title = truncate_to_width(&title, area.width.saturating_sub(4) as usize);

    let top = Line::from(vec![
        Span::styled(
            format!(" {} ", glyph),
            Style::default().fg(glyph_color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(title, Style::default().fg(C_PRIMARY)),
    ]);
    frame.render_widget(
        Paragraph::new(top),
        Rect {
            height: 1,
            ..area
        },
    );

    let bottom_area = Rect {
        y: area.y + 1,
        height: 1,
        ..area
    };
    let vol_label = format!(" vol {:3.0}% ", state.volume * 100.0);
    let vol_w = vol_label.len() as u16;
    let bar_area = Rect {
        x: bottom_area.x + 3,
        width: bottom_area.width.saturating_sub(3 + vol_w),
        ..bottom_area
    };

    match &state.session.current {
        NowPlaying::Verse { .. } => {
            let progress = match (state.time_pos, state.duration) {
                (Some(t), Some(d)) if d > 0.0 => (t / d).clamp(0.0, 1.0),
                _ => 0.0,
            };
            draw_progress(frame, bar_area, progress, state.time_pos, state.duration);
        }
        NowPlaying::Station(_) => {
            let live = if state.status == PlaybackStatus::Playing {
                Span::styled("● LIVE", Style::default().fg(C_PLAYING))
            } else {
                Span::styled("○ live", style_muted())
            };
            frame.render_widget(Paragraph::new(Line::from(live)), bar_area);
        }
        NowPlaying::Idle => {}
    }

    let vol_area = Rect {
        x: bottom_area.x + bottom_area.width.saturating_sub(vol_w),
        width: vol_w,
        ..bottom_area
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(vol_label, style_muted()))),
        vol_area,
    );
}

/// Render a smooth progress bar in `area`.
/// `progress` is 0.0..=1.0. `time_pos` and `duration` are optional display values.
pub fn draw_progress(
    frame: &mut Frame,
    area: Rect,
    progress: f64,
    time_pos: Option<f64>,
    duration: Option<f64>,
) {
    if area.width < 4 || area.height == 0 {
        return;
    }

    let left_label = time_pos.map(fmt_time).unwrap_or_default();
    let right_label = duration.map(fmt_time).unwrap_or_default();
    let label_w = (left_label.len() + right_label.len() + 2) as u16;
    let bar_w = area.width.saturating_sub(label_w).max(4) as usize;

    // Unicode smooth fill: 8 eighths per cell
    let eighths = (progress.clamp(0.0, 1.0) * bar_w as f64 * 8.0) as usize;
    let full_blocks = eighths / 8;
    let partial = eighths % 8;

    const BLOCKS: [char; 9] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉', '█'];

    let mut bar = String::with_capacity(bar_w + 4);
    for _ in 0..full_blocks {
        bar.push('█');
    }
    if full_blocks < bar_w {
        bar.push(BLOCKS[partial]);
        for _ in (full_blocks + 1)..bar_w {
            bar.push(' ');
        }
    }

    let mut spans = Vec::new();
    if !left_label.is_empty() {
        spans.push(Span::styled(
            format!("{} ", left_label),
            Style::default().fg(C_SECONDARY),
        ));
    }
    spans.push(Span::styled(bar, Style::default().fg(C_PLAYING)));
    if !right_label.is_empty() {
        spans.push(Span::styled(
            format!(" {}", right_label),
            Style::default().fg(C_MUTED),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn fmt_time(secs: f64) -> String {
    if secs < 0.0 {
        return "0:00".to_string();
    }
    let s = secs as u64;
    let h = s / 3600;
    let m = (s % 3600) / 60;
    let s = s % 60;
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}", m, s)
    }
}

fn truncate_to_width(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    let mut w = 0;
    for ch in s.chars() {
        let cw = ch.width().unwrap_or(0);
        if w + cw + 1 > max {
            break;
        }
        w += cw;
        out.push(ch);
    }
    out.push('…');
    out
}
