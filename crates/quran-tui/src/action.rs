use quran_core::types::{Ayah, Station, SurahDetail};

/// Stable identifiers for every focusable component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    SurahList,
    VersePane,
    StationList,
    SearchPane,
    FavoritesPane,
    SettingsPane,
}

/// Top-level screens, selected with the number keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Surahs,
    Radio,
    Search,
    Favorites,
    Settings,
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Surahs => "Surahs",
            Screen::Radio => "Radio",
            Screen::Search => "Search",
            Screen::Favorites => "Favorites",
            Screen::Settings => "Settings",
        }
    }
}

/// Actions flow from components back to the app after input handling.
/// The app applies each action, possibly producing follow-up work
/// (spawned fetches, player commands), and re-broadcasts it to all
/// components so they can react to changes they did not initiate.
#[derive(Debug, Clone)]
pub enum Action {
    // playback
    PlayVerse { surah: SurahDetail, ayah: Ayah },
    PlayStation(Station),
    TogglePause,
    ClosePlayer,
    VolumeDelta(f32),

    // navigation / data
    OpenSurah(u32),
    OpenSurahAt { surah: u32, ayah: u32 },
    RandomSurah,
    ToggleFavorite { surah_number: u32, surah_name: String, ayah_number: u32, text: String },
    ClearFavorites,
    SetReciter(String),
    FontSizeDelta(i16),
    SubmitSearch(String),
    FetchTafsir { source: u32, surah: u32, ayah: u32 },
    CopyToClipboard(String),

    // ui
    SwitchScreen(Screen),
    FocusNext,
    FocusPrev,
    FocusPane(ComponentId),
    OpenFilter,
    CloseFilter,
    ToggleHelp,
    Quit,
    Noop,
}
