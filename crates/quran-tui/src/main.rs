mod action;
mod app;
mod app_state;
mod component;
mod components;
mod core;
mod focus;
mod mpv;
mod theme;
mod widgets;

use tokio::sync::{broadcast, mpsc};

use quran_core::session::{PlaybackSession, PlaybackStatus};

/// What PlayerCore broadcasts to the UI.
#[derive(Debug, Clone)]
pub enum PlayerUpdate {
    /// The playback session changed; carries a full snapshot.
    SessionChanged(PlaybackSession),
    /// Derived transport status changed.
    Status(PlaybackStatus),
    /// Position/duration from mpv (None = unknown, e.g. live streams).
    Timeline {
        position: Option<f64>,
        duration: Option<f64>,
    },
    /// Effective volume after a SetVolume command.
    Volume(f32),
    /// A log message from the player event loop.
    Log(String),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let data_dir = quran_core::platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;

    let log_path = data_dir.join("wird.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Allow RUST_LOG override; default to debug for app code but suppress noisy
    // connection-level DEBUG from HTTP client internals (hyper_util, reqwest).
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "debug,hyper_util=warn,reqwest=warn,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // Print log path to stderr so the operator can tail it immediately.
    eprintln!("wird log: {}", log_path.display());

    tracing::info!("wird starting…");

    // ── Load config and favorites ────────────────────────────────────────────
    let settings = quran_core::config::AppSettings::load();
    let favorites = quran_core::favorites::Favorites::load();

    // ── Channels: PlayerCore → UI and UI → PlayerCore ───────────────────────
    let (update_tx, update_rx) = broadcast::channel::<PlayerUpdate>(1024);
    let (event_tx, event_rx) = mpsc::channel::<core::PlayerEvent>(1024);

    // ── Build PlayerCore ─────────────────────────────────────────────────────
    let session = quran_core::session::SessionManager::new();
    let player_core = core::PlayerCore::new(
        session,
        settings.volume,
        update_tx.clone(),
        event_tx.clone(),
    );

    tokio::spawn(async move {
        if let Err(e) = player_core.run(event_rx).await {
            tracing::error!("PlayerCore exited with error: {}", e);
        }
    });

    // ── Run TUI ──────────────────────────────────────────────────────────────
    let client = quran_core::api::ContentClient::new();
    let app = app::App::new(settings, favorites, client, event_tx);
    app.run(update_rx).await?;

    Ok(())
}
