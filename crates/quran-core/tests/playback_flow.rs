//! End-to-end session flows through the shared SessionManager handle, the
//! way the player core drives it: intent, snapshot, completion, intent.

use quran_core::session::{CompletionOutcome, NowPlaying, SessionManager};
use quran_core::types::{Ayah, Station, SurahDetail};

fn test_surah() -> SurahDetail {
    let ayahs: Vec<Ayah> = (1..=3)
        .map(|n| Ayah {
            number: 5270 + n,
            number_in_surah: n,
            text: format!("آية {}", n),
            audio: format!("https://cdn.example/ar.alafasy/{}.mp3", 5270 + n),
        })
        .collect();
    SurahDetail {
        number: 112,
        name: "الإخلاص".into(),
        english_name: "Al-Ikhlaas".into(),
        number_of_ayahs: 3,
        ayahs,
        ..Default::default()
    }
}

fn test_station() -> Station {
    Station {
        id: 3,
        name: "إذاعة".into(),
        url: "https://stream.example/quran".into(),
    }
}

#[tokio::test]
async fn chapter_plays_through_and_clears() {
    let manager = SessionManager::new();
    let surah = test_surah();
    manager
        .select_verse(surah.clone(), surah.ayahs[0].clone())
        .await;

    // Two completions walk to the last verse, the third clears.
    for expected_next in [2u32, 3u32] {
        let ended = manager.snapshot().await.media_url().unwrap().to_string();
        let (outcome, session) = manager.handle_completion(&ended).await;
        assert_eq!(outcome, CompletionOutcome::Advanced);
        assert!(session.is_current_verse(112, expected_next));
        assert!(session.is_playing);
    }

    let ended = manager.snapshot().await.media_url().unwrap().to_string();
    let (outcome, session) = manager.handle_completion(&ended).await;
    assert_eq!(outcome, CompletionOutcome::Finished);
    assert!(session.current.is_idle());
    assert!(!session.is_playing);
}

#[tokio::test]
async fn radio_handoff_discards_verse_completion() {
    let manager = SessionManager::new();
    let surah = test_surah();
    manager
        .select_verse(surah.clone(), surah.ayahs[0].clone())
        .await;
    let verse_url = manager.snapshot().await.media_url().unwrap().to_string();

    // User switches to radio mid-verse; the verse's eventual completion
    // signal must not disturb the station selection.
    let session = manager.select_station(test_station()).await;
    assert!(matches!(session.current, NowPlaying::Station(_)));

    let (outcome, session) = manager.handle_completion(&verse_url).await;
    assert_eq!(outcome, CompletionOutcome::Stale);
    assert!(session.is_current_station(3));
    assert!(session.is_playing);
}

#[tokio::test]
async fn switch_while_paused_resumes_playback() {
    let manager = SessionManager::new();
    let surah = test_surah();
    manager
        .select_verse(surah.clone(), surah.ayahs[0].clone())
        .await;
    let first_url = manager.snapshot().await.media_url().unwrap().to_string();

    let session = manager.toggle_play_pause().await;
    assert!(!session.is_playing);

    // Selecting different media while paused demands playback of the new
    // target; the transport must load it unpaused, not inherit the old
    // paused state.
    let session = manager
        .select_verse(surah.clone(), surah.ayahs[1].clone())
        .await;
    assert!(session.is_playing);
    assert_ne!(session.media_url().unwrap(), first_url);

    let session = manager.select_station(test_station()).await;
    assert!(session.is_playing);
}

#[tokio::test]
async fn rapid_reselection_leaves_last_target() {
    let manager = SessionManager::new();
    let surah = test_surah();
    for ayah in &surah.ayahs {
        manager.select_verse(surah.clone(), ayah.clone()).await;
    }
    let session = manager.snapshot().await;
    assert!(session.is_current_verse(112, 3));
    assert_eq!(
        session.media_url(),
        Some(surah.ayahs[2].audio.as_str())
    );
}

#[tokio::test]
async fn clear_from_player_bar_is_terminal() {
    let manager = SessionManager::new();
    manager.select_station(test_station()).await;
    let first = manager.clear().await;
    let second = manager.clear().await;
    assert!(first.current.is_idle() && second.current.is_idle());
    assert!(!second.is_playing);
    assert_eq!(second.media_url(), None);
}
