use quran_core::config::AppSettings;
use quran_core::favorites::Favorites;
use quran_core::session::{PlaybackSession, PlaybackStatus};
use quran_core::types::{Edition, SearchResults, Station, SurahDetail, SurahRef, TafsirInfo};

use crate::action::Screen;
use crate::widgets::status_bar::InputMode;

/// Read-only snapshot of shared app state, passed to every component on
/// input handling and draw.  Components keep their own view state (cursor,
/// scroll, filter) privately; anything two components need to agree on
/// lives here.
pub struct AppState {
    pub session: PlaybackSession,
    pub status: PlaybackStatus,
    pub time_pos: Option<f64>,
    pub duration: Option<f64>,
    pub volume: f32,

    pub settings: AppSettings,
    pub favorites: Favorites,

    pub surahs: Vec<SurahRef>,
    /// The surah open in the reader, fetched with the configured reciter.
    pub open_surah: Option<SurahDetail>,
    pub surah_loading: bool,
    /// Commentary for the verse it was last requested for.
    pub tafsir_text: Option<String>,
    pub tafsir_loading: bool,
    pub stations: Vec<Station>,
    pub editions: Vec<Edition>,
    pub tafsir_sources: Vec<TafsirInfo>,
    pub search_results: Option<SearchResults>,
    pub search_in_flight: bool,

    pub screen: Screen,
    pub input_mode: InputMode,
    pub logs: Vec<String>,
}

impl AppState {
    pub fn new(settings: AppSettings, favorites: Favorites) -> Self {
        let volume = settings.volume;
        Self {
            session: PlaybackSession::default(),
            status: PlaybackStatus::Idle,
            time_pos: None,
            duration: None,
            volume,
            settings,
            favorites,
            surahs: Vec::new(),
            open_surah: None,
            surah_loading: false,
            tafsir_text: None,
            tafsir_loading: false,
            stations: Vec::new(),
            editions: Vec::new(),
            tafsir_sources: Vec::new(),
            search_results: None,
            search_in_flight: false,
            screen: Screen::Surahs,
            input_mode: InputMode::Normal,
            logs: Vec::new(),
        }
    }

    pub fn surah_ref(&self, number: u32) -> Option<&SurahRef> {
        self.surahs.iter().find(|s| s.number == number)
    }

    pub fn is_favorite(&self, surah: u32, ayah: u32) -> bool {
        self.favorites.contains(surah, ayah)
    }

    pub fn push_log(&mut self, line: String) {
        self.logs.push(line);
        let overflow = self.logs.len().saturating_sub(200);
        if overflow > 0 {
            self.logs.drain(..overflow);
        }
    }
}
