/// PlayerCore — single-owner event loop for the playback session and the
/// mpv transport.
///
/// Runs embedded in the TUI process.  Views send `PlayerCommand` messages in
/// over an mpsc channel; PlayerCore owns the `SessionManager` write side and
/// the `MpvDriver` exclusively.  After every session mutation it reconciles
/// the transport toward the session (load / pause / stop) and broadcasts a
/// `PlayerUpdate` so all views re-render from the fresh snapshot.
///
/// mpv integration is property-observation-driven: on every fresh connection
/// we send `observe_property` for core-idle, pause, time-pos and duration and
/// mpv pushes `property-change` events.  The 10-second heartbeat tick only
/// checks process liveness.
use quran_core::session::{CompletionOutcome, PlaybackStatus, SessionManager};
use quran_core::types::{Ayah, Station, SurahDetail};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, error, info, warn};

use crate::mpv::{
    MpvDriver, MpvEvent, MpvHandle, OBS_CORE_IDLE, OBS_DURATION, OBS_PAUSE, OBS_TIME_POS,
};
use crate::PlayerUpdate;

/// Session intents plus transport-only knobs, as sent by the views.
#[derive(Debug)]
pub enum PlayerCommand {
    SelectVerse { surah: SurahDetail, ayah: Ayah },
    SelectStation(Station),
    TogglePause,
    /// Clear the session (the player bar's close button).
    Close,
    SetVolume(f32),
}

/// All inputs into the PlayerCore loop.
#[derive(Debug)]
pub enum PlayerEvent {
    Command(PlayerCommand),
    /// Raw mpv unsolicited event (forwarded from the reader task).
    Mpv(MpvEvent),
    /// Heartbeat — check process liveness.
    HeartbeatTick,
}

/// What the transport must do to catch up with the session.
#[derive(Debug, Clone, PartialEq)]
enum ReconcileStep {
    /// No media wanted: stop and forget the loaded URL.
    Stop,
    /// Different media wanted: (re)load this URL, then force the pause
    /// property.  mpv keeps `pause` sticky across loadfile, so a load that
    /// follows a paused session must explicitly unpause.
    Load { url: String, paused: bool },
    /// Same media: only the pause flag may differ.
    SyncPause,
}

fn reconcile_step(loaded: Option<&str>, wanted: Option<&str>, is_playing: bool) -> ReconcileStep {
    match wanted {
        None => ReconcileStep::Stop,
        Some(url) if loaded != Some(url) => ReconcileStep::Load {
            url: url.to_string(),
            paused: !is_playing,
        },
        Some(_) => ReconcileStep::SyncPause,
    }
}

pub struct PlayerCore {
    session: SessionManager,
    mpv_driver: MpvDriver,
    /// Live handle to the mpv IO tasks.  `None` when mpv is not yet connected.
    mpv_handle: Option<MpvHandle>,
    /// Channel to forward mpv events back into our own event loop.
    event_tx: mpsc::Sender<PlayerEvent>,
    update_tx: broadcast::Sender<PlayerUpdate>,
    /// The URL currently loaded into mpv.  Compared against the session on
    /// every reconcile, and passed to the completion handler so a signal for
    /// a superseded load can be recognised as stale.
    loaded_url: Option<String>,
    /// Desired play state as of the last reconcile (drives status derivation).
    intend_playing: bool,
    volume: f32,
    /// Observed property values from mpv push events.
    obs_core_idle: Option<bool>,
    obs_pause: bool,
    obs_time_pos: Option<f64>,
    obs_duration: Option<f64>,
    /// When we started connecting/buffering (to detect timeout).
    connecting_since: Option<tokio::time::Instant>,
    /// Last derived playback status (to avoid redundant broadcasts).
    last_status: PlaybackStatus,
}

impl PlayerCore {
    pub fn new(
        session: SessionManager,
        volume: f32,
        update_tx: broadcast::Sender<PlayerUpdate>,
        event_tx: mpsc::Sender<PlayerEvent>,
    ) -> Self {
        let mut mpv_driver = MpvDriver::new();
        mpv_driver.last_volume = volume;

        Self {
            session,
            mpv_driver,
            mpv_handle: None,
            event_tx,
            update_tx,
            loaded_url: None,
            intend_playing: false,
            volume,
            obs_core_idle: None,
            obs_pause: false,
            obs_time_pos: None,
            obs_duration: None,
            connecting_since: None,
            last_status: PlaybackStatus::Idle,
        }
    }

    /// Run the core event loop.  Returns when the event channel is closed
    /// (TUI exited).
    pub async fn run(mut self, mut event_rx: mpsc::Receiver<PlayerEvent>) -> anyhow::Result<()> {
        info!("PlayerCore: starting event loop");

        let heartbeat_tx = self.event_tx.clone();
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(tokio::time::Duration::from_secs(10)).await;
                if heartbeat_tx.send(PlayerEvent::HeartbeatTick).await.is_err() {
                    break;
                }
            }
        });

        loop {
            match event_rx.recv().await {
                None => {
                    info!("PlayerCore: event channel closed, shutting down");
                    break;
                }

                Some(PlayerEvent::Command(cmd)) => {
                    debug!("PlayerCore: command {:?}", cmd);
                    if let Err(e) = self.handle_command(cmd).await {
                        error!("PlayerCore: command error: {}", e);
                    }
                }

                Some(PlayerEvent::Mpv(evt)) => {
                    self.handle_mpv_event(evt).await;
                }

                Some(PlayerEvent::HeartbeatTick) => {
                    if self.mpv_handle.is_some() && !self.mpv_driver.process_alive() {
                        warn!("PlayerCore: heartbeat: mpv process died");
                        self.mpv_handle = None;
                        self.reset_observed_state();
                        if self.intend_playing {
                            self.set_status(PlaybackStatus::Error).await;
                        }
                    }
                    // Also re-check the connecting timeout in case property
                    // events never arrive.
                    if self.intend_playing && !self.obs_pause {
                        self.maybe_update_status().await;
                    }
                }
            }
        }

        self.cleanup().await;
        Ok(())
    }

    // ── command handlers ──────────────────────────────────────────────────────

    async fn handle_command(&mut self, cmd: PlayerCommand) -> anyhow::Result<()> {
        match cmd {
            PlayerCommand::SelectVerse { surah, ayah } => {
                info!("playing verse {}:{}", surah.number, ayah.number_in_surah);
                let snapshot = self.session.select_verse(surah, ayah).await;
                let _ = self
                    .update_tx
                    .send(PlayerUpdate::SessionChanged(snapshot.clone()));
                self.reconcile(&snapshot).await;
            }
            PlayerCommand::SelectStation(station) => {
                info!("selecting station '{}'", station.name);
                let snapshot = self.session.select_station(station).await;
                let _ = self
                    .update_tx
                    .send(PlayerUpdate::SessionChanged(snapshot.clone()));
                self.reconcile(&snapshot).await;
            }
            PlayerCommand::TogglePause => {
                let snapshot = self.session.toggle_play_pause().await;
                let _ = self
                    .update_tx
                    .send(PlayerUpdate::SessionChanged(snapshot.clone()));
                self.reconcile(&snapshot).await;
            }
            PlayerCommand::Close => {
                let snapshot = self.session.clear().await;
                let _ = self
                    .update_tx
                    .send(PlayerUpdate::SessionChanged(snapshot.clone()));
                self.reconcile(&snapshot).await;
            }
            PlayerCommand::SetVolume(value) => {
                self.volume = value.clamp(0.0, 1.0);
                self.mpv_driver.last_volume = self.volume;
                if let Some(handle) = self.mpv_handle.as_ref() {
                    handle.set_volume(self.volume).await?;
                }
                let _ = self.update_tx.send(PlayerUpdate::Volume(self.volume));
            }
        }
        Ok(())
    }

    /// Drive the transport toward the session: load when the URL changed,
    /// stop when it is gone, otherwise just sync the pause flag.
    async fn reconcile(&mut self, snapshot: &quran_core::session::PlaybackSession) {
        match reconcile_step(
            self.loaded_url.as_deref(),
            snapshot.media_url(),
            snapshot.is_playing,
        ) {
            ReconcileStep::Stop => {
                self.intend_playing = false;
                self.connecting_since = None;
                if self.loaded_url.take().is_some() {
                    if let Some(handle) = self.mpv_handle.as_ref() {
                        if let Err(e) = handle.stop().await {
                            warn!("mpv stop failed: {}", e);
                        }
                    }
                }
                self.obs_time_pos = None;
                self.obs_duration = None;
                let _ = self.update_tx.send(PlayerUpdate::Timeline {
                    position: None,
                    duration: None,
                });
                self.maybe_update_status().await;
            }
            ReconcileStep::Load { url, paused } => {
                self.intend_playing = snapshot.is_playing;
                // A fresh load always restarts the connecting timer, even when
                // the previous one never reached Playing.
                self.connecting_since = None;
                self.obs_core_idle = None;
                self.maybe_update_status().await;

                match self.ensure_mpv_handle().await {
                    Some(handle) => {
                        if let Err(e) = handle.load_url(&url, self.volume).await {
                            warn!("failed to load '{}': {}", url, e);
                            self.intend_playing = false;
                            self.loaded_url = None;
                            self.set_status(PlaybackStatus::Error).await;
                            return;
                        }
                        // Always set it: a leftover pause=true from before the
                        // switch would otherwise hold the new media silent.
                        if let Err(e) = handle.set_pause(paused).await {
                            warn!("mpv set_pause failed: {}", e);
                        }
                        self.loaded_url = Some(url);
                    }
                    None => {
                        self.intend_playing = false;
                        self.loaded_url = None;
                        self.set_status(PlaybackStatus::Error).await;
                    }
                }
            }
            ReconcileStep::SyncPause => {
                // Same media, different desired play state: pause in place
                // rather than restarting the load.
                self.intend_playing = snapshot.is_playing;
                if let Some(handle) = self.mpv_handle.as_ref() {
                    if let Err(e) = handle.set_pause(!snapshot.is_playing).await {
                        warn!("mpv set_pause failed: {}", e);
                    }
                }
                self.maybe_update_status().await;
            }
        }
    }

    // ── mpv event handler ─────────────────────────────────────────────────────

    async fn handle_mpv_event(&mut self, evt: MpvEvent) {
        if let Some((obs_id, data)) = evt.as_property_change() {
            match obs_id {
                OBS_CORE_IDLE => {
                    let val = data.as_bool();
                    if val != self.obs_core_idle {
                        debug!("mpv: core-idle -> {:?}", val);
                        self.obs_core_idle = val;
                        self.maybe_update_status().await;
                    }
                }
                OBS_PAUSE => {
                    let val = data.as_bool().unwrap_or(false);
                    if val != self.obs_pause {
                        debug!("mpv: pause -> {}", val);
                        self.obs_pause = val;
                        self.maybe_update_status().await;
                    }
                }
                OBS_TIME_POS => {
                    self.obs_time_pos = if data.is_null() { None } else { data.as_f64() };
                    let _ = self.update_tx.send(PlayerUpdate::Timeline {
                        position: self.obs_time_pos,
                        duration: self.obs_duration,
                    });
                }
                OBS_DURATION => {
                    let val = if data.is_null() { None } else { data.as_f64() };
                    if val != self.obs_duration {
                        self.obs_duration = val;
                        let _ = self.update_tx.send(PlayerUpdate::Timeline {
                            position: self.obs_time_pos,
                            duration: self.obs_duration,
                        });
                    }
                }
                _ => {}
            }
            return;
        }

        match evt.event_name() {
            Some("end-file") => {
                let reason = evt.end_reason().unwrap_or("unknown");
                info!("mpv: end-file reason={}", reason);
                self.obs_time_pos = None;
                self.obs_duration = None;
                self.obs_core_idle = Some(true);
                let _ = self.update_tx.send(PlayerUpdate::Timeline {
                    position: None,
                    duration: None,
                });

                match reason {
                    // Natural completion — the only trigger for auto-advance.
                    // Loads that were replaced by a newer selection end with
                    // "stop"/"redirect" and never reach this arm.
                    "eof" => self.on_media_finished().await,
                    "error" | "network" | "quit" => {
                        if self.intend_playing && !self.obs_pause {
                            warn!("mpv: stream ended with reason={}, marking Error", reason);
                            self.connecting_since = None;
                            self.set_status(PlaybackStatus::Error).await;
                        }
                    }
                    _ => {
                        self.maybe_update_status().await;
                    }
                }
            }
            Some("start-file") => {
                self.connecting_since = None;
                self.obs_core_idle = Some(true); // flips to false when audio flows
                self.maybe_update_status().await;
            }
            _ => {}
        }
    }

    /// The loaded media played to its natural end: run the continue-reading
    /// rule against the session and reconcile whatever it decided.
    async fn on_media_finished(&mut self) {
        let Some(ended_url) = self.loaded_url.take() else {
            return;
        };

        let (outcome, snapshot) = self.session.handle_completion(&ended_url).await;
        match outcome {
            CompletionOutcome::Advanced => {
                debug!("auto-advance: next verse");
                let _ = self
                    .update_tx
                    .send(PlayerUpdate::SessionChanged(snapshot.clone()));
                self.reconcile(&snapshot).await;
            }
            CompletionOutcome::Finished => {
                info!("auto-advance: surah finished");
                let _ = self
                    .update_tx
                    .send(PlayerUpdate::SessionChanged(snapshot.clone()));
                self.reconcile(&snapshot).await;
            }
            CompletionOutcome::Stale => {
                // The session already points elsewhere; the reconcile that
                // accompanied that selection owns the transport now.
                debug!("mpv: eof for superseded url, ignoring");
                self.loaded_url = snapshot.media_url().map(|u| u.to_string());
            }
            CompletionOutcome::NotVerse => {
                // A live stream does not end on its own; degrade to Error so
                // the station row shows the drop.
                if self.intend_playing {
                    warn!("mpv: station stream ended unexpectedly");
                    self.connecting_since = None;
                    self.set_status(PlaybackStatus::Error).await;
                }
                self.loaded_url = Some(ended_url);
            }
        }
    }

    // ── status derivation ─────────────────────────────────────────────────────

    /// Derive PlaybackStatus from observed state and broadcast if changed.
    async fn maybe_update_status(&mut self) {
        let status = if !self.intend_playing {
            self.connecting_since = None;
            if self.loaded_url.is_some() {
                PlaybackStatus::Paused
            } else {
                PlaybackStatus::Idle
            }
        } else if self.obs_pause {
            self.connecting_since = None;
            PlaybackStatus::Paused
        } else {
            match self.obs_core_idle {
                Some(false) => {
                    self.connecting_since = None;
                    PlaybackStatus::Playing
                }
                _ => {
                    let since = self
                        .connecting_since
                        .get_or_insert_with(tokio::time::Instant::now);
                    if since.elapsed().as_secs() >= 15 {
                        warn!("mpv: no audio after {}s, marking Error", since.elapsed().as_secs());
                        PlaybackStatus::Error
                    } else {
                        PlaybackStatus::Connecting
                    }
                }
            }
        };

        if status != self.last_status {
            info!("PlayerCore: status {:?} -> {:?}", self.last_status, status);
            self.last_status = status;
            let _ = self.update_tx.send(PlayerUpdate::Status(status));
        }
    }

    async fn set_status(&mut self, status: PlaybackStatus) {
        if status != self.last_status {
            info!("PlayerCore: status {:?} -> {:?}", self.last_status, status);
            self.last_status = status;
            let _ = self.update_tx.send(PlayerUpdate::Status(status));
        }
    }

    fn reset_observed_state(&mut self) {
        self.obs_core_idle = None;
        self.obs_pause = false;
        self.obs_time_pos = None;
        self.obs_duration = None;
        self.connecting_since = None;
        self.loaded_url = None;
    }

    // ── mpv handle management ─────────────────────────────────────────────────

    async fn ensure_mpv_handle(&mut self) -> Option<MpvHandle> {
        if self.mpv_handle.is_some() && !self.mpv_driver.process_alive() {
            warn!("PlayerCore: mpv process died, dropping handle");
            self.mpv_handle = None;
            self.reset_observed_state();
        }

        if self.mpv_handle.is_none() {
            // Single channel + single forwarder task per connection; both
            // try_reconnect and spawn_and_connect receive a clone of the same
            // sender so only one forwarder is ever running.
            let (event_tx, mut event_rx) = mpsc::channel::<MpvEvent>(64);
            let core_tx = self.event_tx.clone();
            tokio::spawn(async move {
                while let Some(evt) = event_rx.recv().await {
                    if core_tx.send(PlayerEvent::Mpv(evt)).await.is_err() {
                        break;
                    }
                }
            });

            let handle = match self.mpv_driver.try_reconnect(event_tx.clone()).await {
                Some(h) => h,
                None => match self.mpv_driver.spawn_and_connect(event_tx).await {
                    Ok(h) => h,
                    Err(e) => {
                        warn!("PlayerCore: failed to start mpv: {}", e);
                        let _ = self
                            .update_tx
                            .send(PlayerUpdate::Log(format!("mpv unavailable: {}", e)));
                        return None;
                    }
                },
            };

            let h_clone = handle.clone();
            tokio::spawn(async move {
                h_clone.observe_playback_properties().await;
            });

            self.mpv_handle = Some(handle);
        }

        self.mpv_handle.clone()
    }

    async fn cleanup(&mut self) {
        info!("PlayerCore: cleanup, killing mpv");
        if let Some(handle) = self.mpv_handle.take() {
            let _ = handle.stop().await;
        }
        self.mpv_driver.kill().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_session_stops_transport() {
        assert_eq!(reconcile_step(Some("a.mp3"), None, false), ReconcileStep::Stop);
        assert_eq!(reconcile_step(None, None, false), ReconcileStep::Stop);
    }

    #[test]
    fn changed_url_loads() {
        assert_eq!(
            reconcile_step(None, Some("a.mp3"), true),
            ReconcileStep::Load {
                url: "a.mp3".to_string(),
                paused: false,
            }
        );
        assert_eq!(
            reconcile_step(Some("a.mp3"), Some("b.mp3"), true),
            ReconcileStep::Load {
                url: "b.mp3".to_string(),
                paused: false,
            }
        );
    }

    #[test]
    fn load_after_pause_demands_unpause() {
        // Space (pause) then Enter on different media: the session wants
        // playback, so the load must clear mpv's sticky pause property.
        assert_eq!(
            reconcile_step(Some("a.mp3"), Some("b.mp3"), true),
            ReconcileStep::Load {
                url: "b.mp3".to_string(),
                paused: false,
            }
        );
        // And a load while the session is paused must stay silent.
        assert_eq!(
            reconcile_step(Some("a.mp3"), Some("b.mp3"), false),
            ReconcileStep::Load {
                url: "b.mp3".to_string(),
                paused: true,
            }
        );
    }

    #[test]
    fn same_url_only_syncs_pause() {
        assert_eq!(
            reconcile_step(Some("a.mp3"), Some("a.mp3"), true),
            ReconcileStep::SyncPause
        );
        assert_eq!(
            reconcile_step(Some("a.mp3"), Some("a.mp3"), false),
            ReconcileStep::SyncPause
        );
    }
}
