//! Color palette and style constants for the reading companion TUI.

use ratatui::style::{Color, Style};

// ── Color palette ─────────────────────────────────────────────────────────────

pub const C_ACCENT: Color = Color::Rgb(120, 190, 140);
pub const C_PLAYING: Color = Color::Rgb(80, 200, 120);
pub const C_CONNECTING: Color = Color::Rgb(255, 184, 80);
pub const C_ERROR: Color = Color::Rgb(255, 80, 80);
pub const C_MUTED: Color = Color::Rgb(72, 80, 72);
pub const C_SECONDARY: Color = Color::Rgb(115, 130, 118);
pub const C_PRIMARY: Color = Color::Rgb(212, 218, 210);
pub const C_ARABIC: Color = Color::Rgb(235, 230, 200);
pub const C_SELECTION_BG: Color = Color::Rgb(26, 34, 28);
pub const C_PANEL_BORDER: Color = Color::Rgb(38, 48, 40);
pub const C_PANEL_BORDER_FOCUSED: Color = Color::Rgb(110, 190, 150);
pub const C_NUMBER_HINT: Color = Color::Rgb(88, 100, 90);
pub const C_FILTER_BG: Color = Color::Rgb(20, 26, 20);
pub const C_FILTER_FG: Color = Color::Rgb(255, 200, 80);
pub const C_FAVORITE: Color = Color::Rgb(255, 210, 50);
pub const C_TAFSIR: Color = Color::Rgb(150, 170, 220);
pub const C_TOAST_INFO: Color = Color::Rgb(80, 160, 220);
pub const C_TOAST_SUCCESS: Color = Color::Rgb(80, 200, 120);
pub const C_TOAST_WARNING: Color = Color::Rgb(255, 184, 80);
pub const C_TOAST_ERROR: Color = Color::Rgb(255, 95, 95);
pub const C_MODE_NORMAL: Color = Color::Rgb(115, 130, 118);
pub const C_MODE_FILTER: Color = Color::Rgb(255, 200, 80);

// ── Predefined styles ─────────────────────────────────────────────────────────

pub fn style_arabic() -> Style {
    Style::default().fg(C_ARABIC)
}

pub fn style_focused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER_FOCUSED)
}

pub fn style_unfocused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER)
}

pub fn style_muted() -> Style {
    Style::default().fg(C_MUTED)
}
