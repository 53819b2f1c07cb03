//! Domain types shared between the API client, the playback session and the UI.
//!
//! Field names mirror the upstream JSON: alquran.cloud uses camelCase,
//! quran.com and mp3quran.net use snake_case.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of the surah index (chapter list, no verses).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SurahRef {
    pub number: u32,
    /// Arabic name, e.g. "سُورَةُ ٱلْفَاتِحَةِ".
    pub name: String,
    pub english_name: String,
    #[serde(default)]
    pub english_name_translation: String,
    /// "Meccan" or "Medinan" — kept as the upstream string.
    #[serde(default)]
    pub revelation_type: String,
    pub number_of_ayahs: u32,
}

/// A single verse with its per-verse audio recording.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Ayah {
    /// Global verse number (1..6236), unique across the whole text.
    pub number: u32,
    /// Position within the owning surah.
    pub number_in_surah: u32,
    pub text: String,
    /// Audio URL for the configured reciter. Empty in text-only editions
    /// until merged with the audio edition.
    #[serde(default)]
    pub audio: String,
}

/// A surah with its full ordered verse sequence.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SurahDetail {
    pub number: u32,
    pub name: String,
    pub english_name: String,
    #[serde(default)]
    pub english_name_translation: String,
    #[serde(default)]
    pub revelation_type: String,
    pub number_of_ayahs: u32,
    pub ayahs: Vec<Ayah>,
}

impl SurahDetail {
    /// Locate a verse by its position in the surah (identity, not slice index).
    pub fn ayah_by_number_in_surah(&self, number_in_surah: u32) -> Option<&Ayah> {
        self.ayahs.iter().find(|a| a.number_in_surah == number_in_surah)
    }
}

/// An audio edition, i.e. a reciter catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Edition {
    pub identifier: String,
    pub language: String,
    pub name: String,
    pub english_name: String,
}

/// A live Quran radio station (mp3quran.net).
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Station {
    pub id: u32,
    pub name: String,
    pub url: String,
}

/// A commentary source (quran.com resource).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TafsirInfo {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub language_name: String,
}

/// Commentary text for one verse, already reduced to plain text.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TafsirContent {
    pub resource_id: u32,
    pub text: String,
}

/// One verse-text search hit.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchMatch {
    pub number: u32,
    pub number_in_surah: u32,
    pub text: String,
    pub surah: SurahRef,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SearchResults {
    pub count: u32,
    pub matches: Vec<SearchMatch>,
}

/// A bookmarked verse. Uniqueness key = (surah_number, ayah_number).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FavoriteAyah {
    pub surah_number: u32,
    pub surah_name: String,
    /// Verse position within the surah.
    pub ayah_number: u32,
    pub text: String,
    pub added_at: DateTime<Utc>,
}

impl FavoriteAyah {
    pub fn key(&self) -> (u32, u32) {
        (self.surah_number, self.ayah_number)
    }
}
