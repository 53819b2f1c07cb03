pub mod favorites_pane;
pub mod help_overlay;
pub mod search_pane;
pub mod settings_pane;
pub mod station_list;
pub mod surah_list;
pub mod verse_pane;
