//! PlaybackSession — the single source of truth for "what should be playing".
//!
//! One live record, shared across every screen (surah reader, radio list,
//! global player bar). Views never touch its fields; they go through the
//! four intents: `select_verse`, `select_station`, `toggle_play_pause`,
//! `clear`. Each intent replaces the whole record, never part of it, so a
//! verse context and a station context can never coexist.
//!
//! The player core observes the record after every mutation and drives the
//! transport toward it; `is_playing` is desired state, not actual transport
//! state (that is [`PlaybackStatus`], derived from mpv observations).

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::types::{Ayah, Station, SurahDetail};

/// The current selection. The media URL is derived from the variant, so
/// "URL present iff something is selected" holds by construction.
#[derive(Debug, Clone, Default)]
pub enum NowPlaying {
    #[default]
    Idle,
    Verse {
        surah: SurahDetail,
        ayah: Ayah,
    },
    Station(Station),
}

impl NowPlaying {
    pub fn media_url(&self) -> Option<&str> {
        match self {
            NowPlaying::Idle => None,
            NowPlaying::Verse { ayah, .. } => Some(ayah.audio.as_str()),
            NowPlaying::Station(station) => Some(station.url.as_str()),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, NowPlaying::Idle)
    }
}

/// Actual transport state as observed from mpv — what the UI renders next
/// to the desired `is_playing` flag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub enum PlaybackStatus {
    #[default]
    Idle, // nothing loaded / explicitly stopped
    Connecting, // loadfile sent, mpv buffering/connecting
    Playing,    // audio flowing
    Paused,     // explicitly paused
    Error,      // failed to play (timeout or mpv error)
}

#[derive(Debug, Clone, Default)]
pub struct PlaybackSession {
    pub current: NowPlaying,
    /// Desired transport state. Only meaningful while something is selected.
    pub is_playing: bool,
    /// Monotonic revision counter — incremented on every mutation.
    pub rev: u64,
}

impl PlaybackSession {
    pub fn media_url(&self) -> Option<&str> {
        self.current.media_url()
    }

    /// True when `ayah` of `surah_number` is the selected verse.
    pub fn is_current_verse(&self, surah_number: u32, number_in_surah: u32) -> bool {
        match &self.current {
            NowPlaying::Verse { surah, ayah } => {
                surah.number == surah_number && ayah.number_in_surah == number_in_surah
            }
            _ => false,
        }
    }

    pub fn is_current_station(&self, station_id: u32) -> bool {
        matches!(&self.current, NowPlaying::Station(s) if s.id == station_id)
    }

    /// Select a verse for playback. Replaces any prior selection outright,
    /// radio included, and requests playback.
    pub fn select_verse(&mut self, surah: SurahDetail, ayah: Ayah) {
        self.current = NowPlaying::Verse { surah, ayah };
        self.is_playing = true;
        self.rev += 1;
    }

    /// Select a station. Re-invoking on the station that is already selected
    /// and playing pauses in place instead of restarting the stream.
    pub fn select_station(&mut self, station: Station) {
        if self.is_playing {
            if let NowPlaying::Station(current) = &self.current {
                if current.id == station.id {
                    self.is_playing = false;
                    self.rev += 1;
                    return;
                }
            }
        }
        self.current = NowPlaying::Station(station);
        self.is_playing = true;
        self.rev += 1;
    }

    /// Flip the desired play state. No-op while nothing is selected.
    pub fn toggle_play_pause(&mut self) {
        if self.media_url().is_none() {
            return;
        }
        self.is_playing = !self.is_playing;
        self.rev += 1;
    }

    /// Reset to the empty state. Reachable (and harmless) from any state.
    pub fn clear(&mut self) {
        self.current = NowPlaying::Idle;
        self.is_playing = false;
        self.rev += 1;
    }
}

// ── auto-advance ──────────────────────────────────────────────────────────────

/// What a completion signal did to the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CompletionOutcome {
    /// The signal was for a URL the session no longer points at; ignored.
    Stale,
    /// The selection is not a verse (station or idle); ignored.
    NotVerse,
    /// Moved to the next verse of the same surah, still playing.
    Advanced,
    /// The finished verse was the last one; session cleared.
    Finished,
}

/// Apply the "continue reading" rule for a natural end-of-media signal.
///
/// `ended_url` is the URL the transport finished playing. If the session has
/// since been pointed elsewhere the signal is stale and must not mutate the
/// now-current selection. A verse that cannot be found in its own surah's
/// sequence is treated as the last verse — this is a convenience feature and
/// must never escalate a data inconsistency into a failure.
pub fn handle_completion(session: &mut PlaybackSession, ended_url: &str) -> CompletionOutcome {
    if session.media_url() != Some(ended_url) {
        return CompletionOutcome::Stale;
    }

    let NowPlaying::Verse { surah, ayah } = &session.current else {
        return CompletionOutcome::NotVerse;
    };

    let next = surah
        .ayahs
        .iter()
        .position(|a| a.number_in_surah == ayah.number_in_surah)
        .and_then(|i| surah.ayahs.get(i + 1))
        .cloned();

    match next {
        Some(next_ayah) => {
            let surah = surah.clone();
            session.select_verse(surah, next_ayah);
            CompletionOutcome::Advanced
        }
        None => {
            session.clear();
            CompletionOutcome::Finished
        }
    }
}

// ── shared handle ─────────────────────────────────────────────────────────────

/// Shared handle to the one live [`PlaybackSession`].
///
/// The player core is the only writer (it receives the intents); views read
/// snapshots. Mutation is confined to the core's event loop, so the lock is
/// only ever briefly contended.
#[derive(Clone)]
pub struct SessionManager {
    session: Arc<RwLock<PlaybackSession>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self {
            session: Arc::new(RwLock::new(PlaybackSession::default())),
        }
    }

    pub async fn snapshot(&self) -> PlaybackSession {
        self.session.read().await.clone()
    }

    pub async fn select_verse(&self, surah: SurahDetail, ayah: Ayah) -> PlaybackSession {
        let mut s = self.session.write().await;
        s.select_verse(surah, ayah);
        s.clone()
    }

    pub async fn select_station(&self, station: Station) -> PlaybackSession {
        let mut s = self.session.write().await;
        s.select_station(station);
        s.clone()
    }

    pub async fn toggle_play_pause(&self) -> PlaybackSession {
        let mut s = self.session.write().await;
        s.toggle_play_pause();
        s.clone()
    }

    pub async fn clear(&self) -> PlaybackSession {
        let mut s = self.session.write().await;
        s.clear();
        s.clone()
    }

    /// Run the auto-advance rule against the live session.
    pub async fn handle_completion(&self, ended_url: &str) -> (CompletionOutcome, PlaybackSession) {
        let mut s = self.session.write().await;
        let outcome = handle_completion(&mut s, ended_url);
        (outcome, s.clone())
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ayah(number_in_surah: u32) -> Ayah {
        Ayah {
            number: 100 + number_in_surah,
            number_in_surah,
            text: format!("verse {}", number_in_surah),
            audio: format!("https://cdn.example/audio/{}.mp3", 100 + number_in_surah),
        }
    }

    fn surah(verses: &[u32]) -> SurahDetail {
        SurahDetail {
            number: 18,
            name: "الكهف".into(),
            english_name: "Al-Kahf".into(),
            number_of_ayahs: verses.len() as u32,
            ayahs: verses.iter().map(|&n| ayah(n)).collect(),
            ..Default::default()
        }
    }

    fn station() -> Station {
        Station {
            id: 7,
            name: "Idhaa".into(),
            url: "https://stream.example/live".into(),
        }
    }

    #[test]
    fn select_verse_sets_playing_and_url() {
        let mut s = PlaybackSession::default();
        let su = surah(&[1, 2, 3]);
        s.select_verse(su.clone(), su.ayahs[1].clone());
        assert!(s.is_playing);
        assert_eq!(s.media_url(), Some(su.ayahs[1].audio.as_str()));
        assert!(s.is_current_verse(18, 2));
    }

    #[test]
    fn select_station_replaces_verse_context_entirely() {
        let mut s = PlaybackSession::default();
        let su = surah(&[1, 2]);
        s.select_verse(su.clone(), su.ayahs[0].clone());
        s.select_station(station());
        assert!(matches!(s.current, NowPlaying::Station(_)));
        assert!(!s.is_current_verse(18, 1));
        assert_eq!(s.media_url(), Some("https://stream.example/live"));
        assert!(s.is_playing);
    }

    #[test]
    fn reselecting_playing_station_pauses_in_place() {
        let mut s = PlaybackSession::default();
        s.select_station(station());
        assert!(s.is_playing);
        s.select_station(station());
        assert!(!s.is_playing);
        // Selection and URL untouched — pause, not restart.
        assert!(s.is_current_station(7));
        assert_eq!(s.media_url(), Some("https://stream.example/live"));
        // A third call plays again (the guard requires is_playing).
        s.select_station(station());
        assert!(s.is_playing);
    }

    #[test]
    fn selecting_a_different_station_while_playing_switches() {
        let mut s = PlaybackSession::default();
        s.select_station(station());
        let other = Station {
            id: 8,
            name: "Other".into(),
            url: "https://stream.example/other".into(),
        };
        s.select_station(other);
        assert!(s.is_playing);
        assert!(s.is_current_station(8));
    }

    #[test]
    fn toggle_is_noop_when_idle() {
        let mut s = PlaybackSession::default();
        let rev = s.rev;
        s.toggle_play_pause();
        assert!(!s.is_playing);
        assert_eq!(s.rev, rev);
    }

    #[test]
    fn toggle_flips_when_loaded() {
        let mut s = PlaybackSession::default();
        s.select_station(station());
        s.toggle_play_pause();
        assert!(!s.is_playing);
        s.toggle_play_pause();
        assert!(s.is_playing);
    }

    #[test]
    fn clear_is_idempotent_from_any_state() {
        let mut s = PlaybackSession::default();
        let su = surah(&[1, 2]);
        s.select_verse(su.clone(), su.ayahs[0].clone());
        s.clear();
        assert!(s.current.is_idle());
        assert!(!s.is_playing);
        assert_eq!(s.media_url(), None);
        s.clear();
        assert!(s.current.is_idle());
        assert!(!s.is_playing);
        assert_eq!(s.media_url(), None);
    }

    #[test]
    fn completion_advances_to_next_verse() {
        let mut s = PlaybackSession::default();
        let su = surah(&[1, 2, 3]);
        s.select_verse(su.clone(), su.ayahs[1].clone());
        let ended = s.media_url().unwrap().to_string();
        let outcome = handle_completion(&mut s, &ended);
        assert_eq!(outcome, CompletionOutcome::Advanced);
        assert!(s.is_current_verse(18, 3));
        assert!(s.is_playing);
    }

    #[test]
    fn completion_on_last_verse_clears() {
        let mut s = PlaybackSession::default();
        let su = surah(&[1, 2, 3]);
        s.select_verse(su.clone(), su.ayahs[2].clone());
        let ended = s.media_url().unwrap().to_string();
        let outcome = handle_completion(&mut s, &ended);
        assert_eq!(outcome, CompletionOutcome::Finished);
        assert!(s.current.is_idle());
        assert!(!s.is_playing);
    }

    #[test]
    fn completion_advance_follows_verse_identity_not_index() {
        // Sequence with a gap: 1, 3, 7. After 3 comes 7.
        let mut s = PlaybackSession::default();
        let su = surah(&[1, 3, 7]);
        s.select_verse(su.clone(), su.ayahs[1].clone());
        let ended = s.media_url().unwrap().to_string();
        assert_eq!(handle_completion(&mut s, &ended), CompletionOutcome::Advanced);
        assert!(s.is_current_verse(18, 7));
    }

    #[test]
    fn completion_with_verse_missing_from_sequence_clears() {
        let mut s = PlaybackSession::default();
        let su = surah(&[1, 2, 3]);
        // A verse that is not in its own surah's sequence.
        s.select_verse(su.clone(), ayah(99));
        let ended = s.media_url().unwrap().to_string();
        let outcome = handle_completion(&mut s, &ended);
        assert_eq!(outcome, CompletionOutcome::Finished);
        assert!(s.current.is_idle());
    }

    #[test]
    fn stale_completion_does_not_mutate_session() {
        let mut s = PlaybackSession::default();
        let su = surah(&[1, 2, 3]);
        s.select_verse(su.clone(), su.ayahs[0].clone());
        let old_url = s.media_url().unwrap().to_string();
        // User switched to radio before the old verse's signal arrived.
        s.select_station(station());
        let rev = s.rev;
        let outcome = handle_completion(&mut s, &old_url);
        assert_eq!(outcome, CompletionOutcome::Stale);
        assert_eq!(s.rev, rev);
        assert!(s.is_current_station(7));
        assert!(s.is_playing);
    }

    #[test]
    fn completion_for_station_is_ignored() {
        let mut s = PlaybackSession::default();
        s.select_station(station());
        let url = s.media_url().unwrap().to_string();
        assert_eq!(handle_completion(&mut s, &url), CompletionOutcome::NotVerse);
        assert!(s.is_current_station(7));
    }
}
