//! App — owns the terminal, the components, and the message loop.
//!
//! Everything funnels through one mpsc channel of `AppMessage`s: terminal
//! events from a blocking reader task, player updates forwarded from the
//! broadcast channel, and completions of spawned fetch tasks.  Components
//! produce `Action`s; `dispatch` broadcasts each action to every component
//! (collecting one level of secondary actions) and then applies it at the
//! app level.

use std::io;
use std::time::Duration;

use ratatui::crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers,
    MouseEvent, MouseEventKind,
};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::CrosstermBackend;
use ratatui::Terminal;
use rand::Rng;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, warn};

use quran_core::api::ContentClient;
use quran_core::config::AppSettings;
use quran_core::favorites::Favorites;
use quran_core::session::PlaybackStatus;
use quran_core::types::{
    Edition, FavoriteAyah, SearchResults, Station, SurahDetail, SurahRef, TafsirInfo,
};

use crate::action::{Action, ComponentId, Screen};
use crate::app_state::AppState;
use crate::component::Component;
use crate::components::{
    favorites_pane::FavoritesPane, help_overlay::HelpOverlay, search_pane::SearchPane,
    settings_pane::SettingsPane, station_list::StationList, surah_list::SurahList,
    verse_pane::VersePane,
};
use crate::core::{PlayerCommand, PlayerEvent};
use crate::focus::FocusRing;
use crate::widgets::status_bar::{self, InputMode};
use crate::widgets::{player_bar, toast::ToastManager};
use crate::PlayerUpdate;

enum AppMessage {
    Event(Event),
    Update(PlayerUpdate),
    SurahsLoaded(Vec<SurahRef>),
    SurahLoaded(u32, Option<SurahDetail>),
    StationsLoaded(Vec<Station>),
    EditionsLoaded(Vec<Edition>),
    TafsirSourcesLoaded(Vec<TafsirInfo>),
    TafsirLoaded(Option<String>),
    SearchDone(Option<SearchResults>),
}

/// Last drawn pane rectangles, for mouse hit-testing.
#[derive(Default, Clone)]
struct PaneAreas {
    panes: Vec<(ComponentId, Rect)>,
}

pub struct App {
    state: AppState,
    focus: FocusRing,

    surah_list: SurahList,
    verse_pane: VersePane,
    station_list: StationList,
    search_pane: SearchPane,
    favorites_pane: FavoritesPane,
    settings_pane: SettingsPane,
    help_overlay: HelpOverlay,
    toast: ToastManager,

    client: ContentClient,
    player_tx: mpsc::Sender<PlayerEvent>,
    msg_tx: Option<mpsc::Sender<AppMessage>>,

    pane_areas: PaneAreas,
    show_help: bool,
    should_quit: bool,
    /// Verse to jump to once the pending surah fetch lands.
    pending_ayah: Option<u32>,
}

fn ring_for(screen: Screen) -> Vec<ComponentId> {
    match screen {
        Screen::Surahs => vec![ComponentId::SurahList, ComponentId::VersePane],
        Screen::Radio => vec![ComponentId::StationList],
        Screen::Search => vec![ComponentId::SearchPane],
        Screen::Favorites => vec![ComponentId::FavoritesPane],
        Screen::Settings => vec![ComponentId::SettingsPane],
    }
}

impl App {
    pub fn new(
        settings: AppSettings,
        favorites: Favorites,
        client: ContentClient,
        player_tx: mpsc::Sender<PlayerEvent>,
    ) -> Self {
        Self {
            state: AppState::new(settings, favorites),
            focus: FocusRing::new(ring_for(Screen::Surahs)),
            surah_list: SurahList::new(),
            verse_pane: VersePane::new(),
            station_list: StationList::new(),
            search_pane: SearchPane::new(),
            favorites_pane: FavoritesPane::new(),
            settings_pane: SettingsPane::new(),
            help_overlay: HelpOverlay::new(),
            toast: ToastManager::new(),
            client,
            player_tx,
            msg_tx: None,
            pane_areas: PaneAreas::default(),
            show_help: false,
            should_quit: false,
            pending_ayah: None,
        }
    }

    pub async fn run(
        mut self,
        mut update_rx: broadcast::Receiver<PlayerUpdate>,
    ) -> anyhow::Result<()> {
        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let (tx, mut rx) = mpsc::channel::<AppMessage>(1024);
        self.msg_tx = Some(tx.clone());
        self.state.push_log("wird started".to_string());

        // ── Background task: keyboard/mouse events ────────────────────────────
        let event_tx = tx.clone();
        tokio::task::spawn_blocking(move || loop {
            match event::read() {
                Ok(ev) => {
                    if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        });

        // ── Background task: player updates (PlayerCore → AppMessage) ────────
        let up_tx = tx.clone();
        tokio::spawn(async move {
            loop {
                match update_rx.recv().await {
                    Ok(update) => {
                        if up_tx.send(AppMessage::Update(update)).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        warn!("player update receiver lagged by {} messages", n);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });

        // ── Initial catalog fetches ───────────────────────────────────────────
        self.spawn_initial_fetches(&tx);

        // Toast expiry check.
        let mut toast_tick = tokio::time::interval(Duration::from_millis(250));
        toast_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // ── Main loop ─────────────────────────────────────────────────────────
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }

            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    const MAX_DRAIN: usize = 256;
                    let mut redraw = self.handle_message(msg).await;
                    let mut drained = 0usize;
                    while drained < MAX_DRAIN {
                        let next = match rx.try_recv() {
                            Ok(v) => v,
                            Err(_) => break,
                        };
                        drained += 1;
                        redraw |= self.handle_message(next).await;
                    }
                    needs_redraw = redraw;
                }

                _ = toast_tick.tick() => {
                    self.toast.tick();
                    needs_redraw = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        Ok(())
    }

    fn spawn_initial_fetches(&self, tx: &mpsc::Sender<AppMessage>) {
        let client = self.client.clone();
        let t = tx.clone();
        tokio::spawn(async move {
            let _ = t.send(AppMessage::SurahsLoaded(client.surah_list().await)).await;
        });

        let client = self.client.clone();
        let t = tx.clone();
        tokio::spawn(async move {
            let _ = t.send(AppMessage::StationsLoaded(client.stations().await)).await;
        });

        let client = self.client.clone();
        let t = tx.clone();
        tokio::spawn(async move {
            let _ = t
                .send(AppMessage::EditionsLoaded(client.audio_editions().await))
                .await;
        });

        let client = self.client.clone();
        let t = tx.clone();
        tokio::spawn(async move {
            let _ = t
                .send(AppMessage::TafsirSourcesLoaded(client.tafsir_list().await))
                .await;
        });
    }

    // ── Message handling ──────────────────────────────────────────────────────

    async fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::Event(Event::Key(key)) => {
                let actions = self.handle_key(key);
                for action in actions {
                    self.dispatch(action).await;
                }
                true
            }
            AppMessage::Event(Event::Mouse(mouse)) => {
                let actions = self.handle_mouse(mouse);
                for action in actions {
                    self.dispatch(action).await;
                }
                true
            }
            AppMessage::Event(Event::Resize(_, _)) => true,
            AppMessage::Event(_) => false,

            AppMessage::Update(update) => self.handle_player_update(update),

            AppMessage::SurahsLoaded(surahs) => {
                if surahs.is_empty() {
                    self.toast.warning("failed to load surah index");
                } else {
                    self.state.push_log(format!("loaded {} surahs", surahs.len()));
                }
                self.state.surahs = surahs;
                true
            }
            AppMessage::SurahLoaded(number, detail) => {
                self.state.surah_loading = false;
                match detail {
                    Some(surah) => {
                        self.state.open_surah = Some(surah);
                        self.state.tafsir_text = None;
                        if let Some(ayah) = self.pending_ayah.take() {
                            self.dispatch(Action::OpenSurahAt {
                                surah: number,
                                ayah,
                            })
                            .await;
                        }
                    }
                    None => {
                        self.pending_ayah = None;
                        self.toast.error(format!("failed to load surah {}", number));
                    }
                }
                true
            }
            AppMessage::StationsLoaded(stations) => {
                if stations.is_empty() {
                    self.toast.warning("failed to load radio stations");
                }
                self.state.stations = stations;
                true
            }
            AppMessage::EditionsLoaded(editions) => {
                self.state.editions = editions;
                true
            }
            AppMessage::TafsirSourcesLoaded(sources) => {
                self.state.tafsir_sources = sources;
                true
            }
            AppMessage::TafsirLoaded(text) => {
                self.state.tafsir_loading = false;
                self.state.tafsir_text = text;
                true
            }
            AppMessage::SearchDone(results) => {
                self.state.search_in_flight = false;
                match &results {
                    Some(r) => self.state.push_log(format!("search: {} matches", r.count)),
                    None => self.toast.warning("search failed"),
                }
                self.state.search_results = results;
                true
            }
        }
    }

    fn handle_player_update(&mut self, update: PlayerUpdate) -> bool {
        match update {
            PlayerUpdate::SessionChanged(session) => {
                self.state.session = session;
                true
            }
            PlayerUpdate::Status(status) => {
                if status == PlaybackStatus::Error && self.state.status != PlaybackStatus::Error {
                    self.toast.error("playback failed");
                }
                self.state.status = status;
                true
            }
            PlayerUpdate::Timeline { position, duration } => {
                self.state.time_pos = position;
                self.state.duration = duration;
                true
            }
            PlayerUpdate::Volume(volume) => {
                self.state.volume = volume;
                true
            }
            PlayerUpdate::Log(line) => {
                self.state.push_log(line);
                true
            }
        }
    }

    // ── Key handling ──────────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        if key.kind == event::KeyEventKind::Release {
            return vec![];
        }

        // Global keys, active regardless of focus
        match key.code {
            KeyCode::Char('q') if key.modifiers == KeyModifiers::NONE => {
                if self.state.input_mode == InputMode::Normal {
                    return vec![Action::Quit];
                }
            }
            KeyCode::Char('c') if key.modifiers == KeyModifiers::CONTROL => {
                return vec![Action::Quit];
            }
            KeyCode::Char('?') if self.state.input_mode == InputMode::Normal => {
                return vec![Action::ToggleHelp];
            }
            _ => {}
        }

        // Help overlay captures all keys when visible
        if self.show_help {
            return self.help_overlay.handle_key(key, &self.state);
        }

        // Tab / Shift-Tab always cycle focus (filter mode closes first)
        match key.code {
            KeyCode::Tab if self.state.screen != Screen::Search => {
                if self.state.input_mode == InputMode::Filter {
                    return vec![Action::CloseFilter, Action::FocusNext];
                }
                return vec![Action::FocusNext];
            }
            KeyCode::BackTab => {
                if self.state.input_mode == InputMode::Filter {
                    return vec![Action::CloseFilter, Action::FocusPrev];
                }
                return vec![Action::FocusPrev];
            }
            _ => {}
        }

        // Global playback and screen keys (Normal mode only)
        if self.state.input_mode == InputMode::Normal {
            match key.code {
                KeyCode::Char(' ') => return vec![Action::TogglePause],
                KeyCode::Char('x') => return vec![Action::ClosePlayer],
                KeyCode::Right => return vec![Action::VolumeDelta(0.05)],
                KeyCode::Left => return vec![Action::VolumeDelta(-0.05)],
                KeyCode::Char('1') => return vec![Action::SwitchScreen(Screen::Surahs)],
                KeyCode::Char('2') => return vec![Action::SwitchScreen(Screen::Radio)],
                KeyCode::Char('3') => return vec![Action::SwitchScreen(Screen::Search)],
                KeyCode::Char('4') => return vec![Action::SwitchScreen(Screen::Favorites)],
                KeyCode::Char('5') => return vec![Action::SwitchScreen(Screen::Settings)],
                _ => {}
            }
        }

        // Dispatch to the focused component
        let s = &self.state;
        match self.focus.current() {
            Some(ComponentId::SurahList) => self.surah_list.handle_key(key, s),
            Some(ComponentId::VersePane) => self.verse_pane.handle_key(key, s),
            Some(ComponentId::StationList) => self.station_list.handle_key(key, s),
            Some(ComponentId::SearchPane) => self.search_pane.handle_key(key, s),
            Some(ComponentId::FavoritesPane) => self.favorites_pane.handle_key(key, s),
            Some(ComponentId::SettingsPane) => self.settings_pane.handle_key(key, s),
            _ => vec![],
        }
    }

    // ── Mouse handling ────────────────────────────────────────────────────────

    fn handle_mouse(&mut self, event: MouseEvent) -> Vec<Action> {
        let relevant = matches!(
            event.kind,
            MouseEventKind::Down(_) | MouseEventKind::ScrollUp | MouseEventKind::ScrollDown
        );
        if !relevant || self.show_help {
            return vec![];
        }

        fn hit(r: Rect, col: u16, row: u16) -> bool {
            r.width > 0
                && r.height > 0
                && col >= r.x
                && col < r.x + r.width
                && row >= r.y
                && row < r.y + r.height
        }

        let areas = self.pane_areas.clone();
        for (id, area) in areas.panes {
            if !hit(area, event.column, event.row) {
                continue;
            }
            let s = &self.state;
            let mut actions = match id {
                ComponentId::SurahList => self.surah_list.handle_mouse(event, area, s),
                ComponentId::VersePane => self.verse_pane.handle_mouse(event, area, s),
                ComponentId::StationList => self.station_list.handle_mouse(event, area, s),
                ComponentId::SearchPane => self.search_pane.handle_mouse(event, area, s),
                ComponentId::FavoritesPane => self.favorites_pane.handle_mouse(event, area, s),
                ComponentId::SettingsPane => self.settings_pane.handle_mouse(event, area, s),
                _ => vec![],
            };
            if self.focus.current() != Some(id) {
                actions.insert(0, Action::FocusPane(id));
            }
            return actions;
        }
        vec![]
    }

    // ── Action dispatcher ─────────────────────────────────────────────────────

    async fn dispatch(&mut self, action: Action) {
        // Broadcast the action to all components first so they can react to
        // changes they did not initiate.
        let secondary: Vec<Action> = {
            let s = &self.state;
            let mut out = Vec::new();
            out.extend(self.surah_list.on_action(&action, s));
            out.extend(self.verse_pane.on_action(&action, s));
            out.extend(self.station_list.on_action(&action, s));
            out.extend(self.search_pane.on_action(&action, s));
            out.extend(self.favorites_pane.on_action(&action, s));
            out.extend(self.settings_pane.on_action(&action, s));
            out.extend(self.help_overlay.on_action(&action, s));
            out
        };

        self.apply_action(action).await;

        // One level deep, never re-broadcast.
        for a in secondary {
            self.apply_action(a).await;
        }
    }

    async fn send_player(&self, cmd: PlayerCommand) {
        if self
            .player_tx
            .send(PlayerEvent::Command(cmd))
            .await
            .is_err()
        {
            warn!("player core channel closed");
        }
    }

    async fn apply_action(&mut self, action: Action) {
        match &action {
            Action::Noop => {}
            _ => debug!("apply_action: {:?}", action),
        }
        match action {
            // ── Playback ──────────────────────────────────────────────────────
            Action::PlayVerse { surah, ayah } => {
                self.send_player(PlayerCommand::SelectVerse { surah, ayah }).await;
            }
            Action::PlayStation(station) => {
                self.send_player(PlayerCommand::SelectStation(station)).await;
            }
            Action::TogglePause => {
                self.send_player(PlayerCommand::TogglePause).await;
            }
            Action::ClosePlayer => {
                self.send_player(PlayerCommand::Close).await;
            }
            Action::VolumeDelta(delta) => {
                let volume = (self.state.volume + delta).clamp(0.0, 1.0);
                self.state.settings.set_volume(volume);
                if let Err(e) = self.state.settings.save() {
                    warn!("failed to save settings: {}", e);
                }
                self.send_player(PlayerCommand::SetVolume(volume)).await;
            }

            // ── Reader / data ─────────────────────────────────────────────────
            Action::OpenSurah(number) => {
                self.pending_ayah = None;
                self.fetch_surah(number);
            }
            Action::OpenSurahAt { surah, ayah } => {
                let already_open = self
                    .state
                    .open_surah
                    .as_ref()
                    .map(|s| s.number == surah)
                    .unwrap_or(false);
                if !already_open {
                    self.pending_ayah = Some(ayah);
                    self.fetch_surah(surah);
                }
                // Components moved their cursors in the broadcast phase.
            }
            Action::RandomSurah => {
                let number = rand::thread_rng().gen_range(1..=114);
                self.pending_ayah = None;
                self.fetch_surah(number);
                self.focus.set(ComponentId::VersePane);
            }
            Action::ToggleFavorite {
                surah_number,
                surah_name,
                ayah_number,
                text,
            } => {
                let favorite = FavoriteAyah {
                    surah_number,
                    surah_name,
                    ayah_number,
                    text,
                    added_at: chrono::Utc::now(),
                };
                match self.state.favorites.toggle(favorite) {
                    Ok(true) => self.toast.success(format!(
                        "favorited {}:{}",
                        surah_number, ayah_number
                    )),
                    Ok(false) => self.toast.info(format!(
                        "removed favorite {}:{}",
                        surah_number, ayah_number
                    )),
                    Err(e) => self.toast.error(format!("favorites: {}", e)),
                }
            }
            Action::ClearFavorites => match self.state.favorites.clear() {
                Ok(()) => self.toast.success("cleared all favorites"),
                Err(e) => self.toast.error(format!("favorites: {}", e)),
            },
            Action::SetReciter(identifier) => {
                self.state.settings.default_reciter = identifier.clone();
                if let Err(e) = self.state.settings.save() {
                    warn!("failed to save settings: {}", e);
                }
                self.toast.success(format!("reciter: {}", identifier));
                // Reload the open surah so verse audio points at the new voice.
                if let Some(number) = self.state.open_surah.as_ref().map(|s| s.number) {
                    self.fetch_surah(number);
                }
            }
            Action::FontSizeDelta(delta) => {
                let current = self.state.settings.font_size as i32;
                let next = (current + delta as i32).max(0) as u16;
                self.state.settings.set_font_size(next);
                if let Err(e) = self.state.settings.save() {
                    warn!("failed to save settings: {}", e);
                }
            }
            Action::SubmitSearch(query) => {
                self.state.search_in_flight = true;
                self.state.search_results = None;
                let client = self.client.clone();
                if let Some(tx) = self.msg_tx.clone() {
                    tokio::spawn(async move {
                        let results = client.search(&query).await;
                        let _ = tx.send(AppMessage::SearchDone(results)).await;
                    });
                }
            }
            Action::FetchTafsir {
                source,
                surah,
                ayah,
            } => {
                self.state.tafsir_loading = true;
                self.state.tafsir_text = None;
                let client = self.client.clone();
                if let Some(tx) = self.msg_tx.clone() {
                    tokio::spawn(async move {
                        let content = client.tafsir_for_ayah(source, surah, ayah).await;
                        let _ = tx
                            .send(AppMessage::TafsirLoaded(content.map(|c| c.text)))
                            .await;
                    });
                }
            }
            Action::CopyToClipboard(text) => {
                match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text)) {
                    Ok(()) => self.toast.success("copied to clipboard"),
                    Err(e) => self.toast.warning(format!("clipboard: {}", e)),
                }
            }

            // ── UI ────────────────────────────────────────────────────────────
            Action::SwitchScreen(screen) => {
                self.state.screen = screen;
                self.state.input_mode = InputMode::Normal;
                self.focus.set_items(ring_for(screen));
            }
            Action::FocusNext => {
                self.focus.next();
            }
            Action::FocusPrev => {
                self.focus.prev();
            }
            Action::FocusPane(id) => {
                self.focus.set(id);
            }
            Action::OpenFilter => {
                self.state.input_mode = InputMode::Filter;
            }
            Action::CloseFilter => {
                self.state.input_mode = InputMode::Normal;
            }
            Action::ToggleHelp => {
                self.show_help = !self.show_help;
            }
            Action::Quit => {
                self.should_quit = true;
            }
            Action::Noop => {}
        }
    }

    fn fetch_surah(&mut self, number: u32) {
        self.state.surah_loading = true;
        let client = self.client.clone();
        let reciter = self.state.settings.default_reciter.clone();
        if let Some(tx) = self.msg_tx.clone() {
            tokio::spawn(async move {
                let detail = client.surah_detail(number, &reciter).await;
                let _ = tx.send(AppMessage::SurahLoaded(number, detail)).await;
            });
        }
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut ratatui::Frame) {
        let size = frame.area();
        self.pane_areas.panes.clear();

        let bar_h = player_bar::height(&self.state);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),
                Constraint::Length(bar_h),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(size);
        let body = chunks[0];

        match self.state.screen {
            Screen::Surahs => {
                let cols = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(34), Constraint::Percentage(66)])
                    .split(body);
                let focused_list = self.focus.is_focused(ComponentId::SurahList);
                let focused_reader = self.focus.is_focused(ComponentId::VersePane);
                self.surah_list.draw(frame, cols[0], focused_list, &self.state);
                self.verse_pane.draw(frame, cols[1], focused_reader, &self.state);
                self.pane_areas.panes.push((ComponentId::SurahList, cols[0]));
                self.pane_areas.panes.push((ComponentId::VersePane, cols[1]));
            }
            Screen::Radio => {
                let focused = self.focus.is_focused(ComponentId::StationList);
                self.station_list.draw(frame, body, focused, &self.state);
                self.pane_areas.panes.push((ComponentId::StationList, body));
            }
            Screen::Search => {
                let focused = self.focus.is_focused(ComponentId::SearchPane);
                self.search_pane.draw(frame, body, focused, &self.state);
                self.pane_areas.panes.push((ComponentId::SearchPane, body));
            }
            Screen::Favorites => {
                let focused = self.focus.is_focused(ComponentId::FavoritesPane);
                self.favorites_pane.draw(frame, body, focused, &self.state);
                self.pane_areas.panes.push((ComponentId::FavoritesPane, body));
            }
            Screen::Settings => {
                let focused = self.focus.is_focused(ComponentId::SettingsPane);
                self.settings_pane.draw(frame, body, focused, &self.state);
                self.pane_areas.panes.push((ComponentId::SettingsPane, body));
            }
        }

        player_bar::draw(frame, chunks[1], &self.state);

        let audio_alive = self.state.status == PlaybackStatus::Playing;
        status_bar::draw_log_bar(
            frame,
            chunks[2],
            self.state.logs.last().map(String::as_str),
            audio_alive,
        );
        status_bar::draw_keys_bar(frame, chunks[3], self.state.input_mode, self.state.screen);

        self.toast.draw(frame, size);
        self.help_overlay.draw(frame, size, false, &self.state);
    }
}
