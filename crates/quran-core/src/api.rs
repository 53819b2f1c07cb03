//! Content provider — thin client over the three upstream APIs.
//!
//! alquran.cloud serves verse text/audio and search, quran.com serves tafsir,
//! mp3quran.net serves the radio station list. All payload handling lives in
//! pure `parse_*` functions so it can be tested against canned JSON; the
//! async fetchers wrap them with the degrade-gracefully policy: log a
//! warning and return an empty/absent result, never an error. No retries.

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::types::{
    Edition, SearchResults, Station, SurahDetail, SurahRef, TafsirContent, TafsirInfo,
};

const ALQURAN_CLOUD_API: &str = "https://api.alquran.cloud/v1";
const QURAN_COM_API: &str = "https://api.quran.com/api/v4";
const MP3QURAN_API: &str = "https://mp3quran.net/api/v3";

/// Text edition merged with the chosen audio edition for surah detail.
const TEXT_EDITION: &str = "quran-uthmani";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected HTTP status {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unexpected response shape: {0}")]
    Shape(&'static str),
}

// ── wire envelopes ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct CloudEnvelope<T> {
    code: u32,
    data: T,
}

#[derive(Deserialize)]
struct RadiosEnvelope {
    radios: Vec<Station>,
}

#[derive(Deserialize)]
struct TafsirListEnvelope {
    tafsirs: Vec<TafsirInfo>,
}

#[derive(Deserialize)]
struct TafsirTextEnvelope {
    tafsirs: Vec<RawTafsirContent>,
}

#[derive(Deserialize)]
struct RawTafsirContent {
    resource_id: u32,
    #[serde(default)]
    text: String,
}

// ── parsers ───────────────────────────────────────────────────────────────────

pub fn parse_surah_list(body: &str) -> Result<Vec<SurahRef>, ApiError> {
    let env: CloudEnvelope<Vec<SurahRef>> = serde_json::from_str(body)?;
    if env.code != 200 {
        return Err(ApiError::Shape("surah list: non-200 envelope code"));
    }
    Ok(env.data)
}

/// The merged-surah endpoint returns two editions of the same surah: the
/// canonical text first, the audio edition second. Verse audio URLs are
/// zipped onto the text verses positionally; a length mismatch means the
/// upstream served inconsistent editions and the whole surah is rejected.
pub fn parse_merged_surah(body: &str) -> Result<SurahDetail, ApiError> {
    let env: CloudEnvelope<Vec<SurahDetail>> = serde_json::from_str(body)?;
    if env.code != 200 {
        return Err(ApiError::Shape("surah detail: non-200 envelope code"));
    }
    let mut editions = env.data;
    if editions.len() != 2 {
        return Err(ApiError::Shape("surah detail: expected exactly 2 editions"));
    }
    let audio = editions.pop().expect("len checked");
    let mut text = editions.pop().expect("len checked");
    if text.ayahs.len() != audio.ayahs.len() {
        return Err(ApiError::Shape("surah detail: edition verse counts differ"));
    }
    for (verse, audio_verse) in text.ayahs.iter_mut().zip(audio.ayahs.iter()) {
        verse.audio = audio_verse.audio.clone();
    }
    Ok(text)
}

pub fn parse_audio_editions(body: &str) -> Result<Vec<Edition>, ApiError> {
    let env: CloudEnvelope<Vec<Edition>> = serde_json::from_str(body)?;
    Ok(env.data)
}

pub fn parse_stations(body: &str) -> Result<Vec<Station>, ApiError> {
    let env: RadiosEnvelope = serde_json::from_str(body)?;
    Ok(env.radios)
}

pub fn parse_tafsir_list(body: &str) -> Result<Vec<TafsirInfo>, ApiError> {
    let env: TafsirListEnvelope = serde_json::from_str(body)?;
    Ok(env.tafsirs)
}

pub fn parse_tafsir_content(body: &str) -> Result<TafsirContent, ApiError> {
    let env: TafsirTextEnvelope = serde_json::from_str(body)?;
    let raw = env
        .tafsirs
        .into_iter()
        .next()
        .ok_or(ApiError::Shape("tafsir: empty result array"))?;
    Ok(TafsirContent {
        resource_id: raw.resource_id,
        text: strip_html(&raw.text),
    })
}

pub fn parse_search_results(body: &str) -> Result<SearchResults, ApiError> {
    let env: CloudEnvelope<SearchResults> = serde_json::from_str(body)?;
    Ok(env.data)
}

/// Reduce a tafsir HTML body to whitespace-normalised plain text.
pub fn strip_html(raw: &str) -> String {
    let fragment = scraper::Html::parse_fragment(raw);
    let text: Vec<&str> = fragment.root_element().text().collect();
    text.join(" ").split_whitespace().collect::<Vec<_>>().join(" ")
}

// ── client ────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct ContentClient {
    http: reqwest::Client,
}

impl ContentClient {
    pub fn new() -> Self {
        let http = reqwest::Client::builder()
            .user_agent(concat!("wird/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(15))
            .build()
            .unwrap_or_default();
        Self { http }
    }

    async fn get_text(&self, url: &str) -> Result<String, ApiError> {
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }
        Ok(response.text().await?)
    }

    /// Full surah index, empty on any failure.
    pub async fn surah_list(&self) -> Vec<SurahRef> {
        let url = format!("{}/surah", ALQURAN_CLOUD_API);
        match self.get_text(&url).await.and_then(|b| parse_surah_list(&b)) {
            Ok(list) => list,
            Err(e) => {
                warn!("failed to fetch surah list: {}", e);
                Vec::new()
            }
        }
    }

    /// Surah text merged with the per-verse audio of `reciter`.
    pub async fn surah_detail(&self, number: u32, reciter: &str) -> Option<SurahDetail> {
        let url = format!(
            "{}/surah/{}/editions/{},{}",
            ALQURAN_CLOUD_API, number, TEXT_EDITION, reciter
        );
        match self.get_text(&url).await.and_then(|b| parse_merged_surah(&b)) {
            Ok(surah) => Some(surah),
            Err(e) => {
                warn!("failed to fetch surah {} ({}): {}", number, reciter, e);
                None
            }
        }
    }

    pub async fn audio_editions(&self) -> Vec<Edition> {
        let url = format!("{}/edition/format/audio", ALQURAN_CLOUD_API);
        match self.get_text(&url).await.and_then(|b| parse_audio_editions(&b)) {
            Ok(editions) => editions,
            Err(e) => {
                warn!("failed to fetch audio editions: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn stations(&self) -> Vec<Station> {
        let url = format!("{}/radios", MP3QURAN_API);
        match self.get_text(&url).await.and_then(|b| parse_stations(&b)) {
            Ok(stations) => stations,
            Err(e) => {
                warn!("failed to fetch radio stations: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn tafsir_list(&self) -> Vec<TafsirInfo> {
        let url = format!("{}/resources/tafsirs", QURAN_COM_API);
        match self.get_text(&url).await.and_then(|b| parse_tafsir_list(&b)) {
            Ok(list) => list,
            Err(e) => {
                warn!("failed to fetch tafsir sources: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn tafsir_for_ayah(
        &self,
        tafsir_id: u32,
        surah_number: u32,
        ayah_number: u32,
    ) -> Option<TafsirContent> {
        let url = format!(
            "{}/quran/tafsirs/{}?verse_key={}:{}",
            QURAN_COM_API, tafsir_id, surah_number, ayah_number
        );
        match self.get_text(&url).await.and_then(|b| parse_tafsir_content(&b)) {
            Ok(content) => Some(content),
            Err(e) => {
                warn!(
                    "failed to fetch tafsir {} for {}:{}: {}",
                    tafsir_id, surah_number, ayah_number, e
                );
                None
            }
        }
    }

    /// Arabic full-text search across all surahs.
    pub async fn search(&self, query: &str) -> Option<SearchResults> {
        let url = format!("{}/search/{}/all/ar", ALQURAN_CLOUD_API, query);
        match self.get_text(&url).await.and_then(|b| parse_search_results(&b)) {
            Ok(results) => Some(results),
            Err(e) => {
                warn!("search for '{}' failed: {}", query, e);
                None
            }
        }
    }
}

impl Default for ContentClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_surah_list() {
        let body = r#"{
            "code": 200, "status": "OK",
            "data": [
                {"number": 1, "name": "سُورَةُ ٱلْفَاتِحَةِ", "englishName": "Al-Faatiha",
                 "englishNameTranslation": "The Opening", "numberOfAyahs": 7,
                 "revelationType": "Meccan"},
                {"number": 2, "name": "سُورَةُ البَقَرَةِ", "englishName": "Al-Baqara",
                 "englishNameTranslation": "The Cow", "numberOfAyahs": 286,
                 "revelationType": "Medinan"}
            ]
        }"#;
        let list = parse_surah_list(body).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].english_name, "Al-Faatiha");
        assert_eq!(list[1].number_of_ayahs, 286);
    }

    #[test]
    fn merges_audio_onto_text_edition() {
        let body = r#"{
            "code": 200, "status": "OK",
            "data": [
                {"number": 114, "name": "سُورَةُ النَّاسِ", "englishName": "An-Naas",
                 "numberOfAyahs": 2, "revelationType": "Meccan",
                 "ayahs": [
                    {"number": 6231, "numberInSurah": 1, "text": "قل"},
                    {"number": 6232, "numberInSurah": 2, "text": "ملك"}
                 ]},
                {"number": 114, "name": "سُورَةُ النَّاسِ", "englishName": "An-Naas",
                 "numberOfAyahs": 2, "revelationType": "Meccan",
                 "ayahs": [
                    {"number": 6231, "numberInSurah": 1, "text": "قل",
                     "audio": "https://cdn.example/6231.mp3"},
                    {"number": 6232, "numberInSurah": 2, "text": "ملك",
                     "audio": "https://cdn.example/6232.mp3"}
                 ]}
            ]
        }"#;
        let surah = parse_merged_surah(body).unwrap();
        assert_eq!(surah.ayahs.len(), 2);
        assert_eq!(surah.ayahs[0].audio, "https://cdn.example/6231.mp3");
        assert_eq!(surah.ayahs[1].text, "ملك");
    }

    #[test]
    fn rejects_mismatched_edition_lengths() {
        let body = r#"{
            "code": 200, "status": "OK",
            "data": [
                {"number": 114, "name": "n", "englishName": "e", "numberOfAyahs": 2,
                 "ayahs": [{"number": 1, "numberInSurah": 1, "text": "a"}]},
                {"number": 114, "name": "n", "englishName": "e", "numberOfAyahs": 2,
                 "ayahs": []}
            ]
        }"#;
        assert!(parse_merged_surah(body).is_err());
    }

    #[test]
    fn parses_station_list() {
        let body = r#"{"radios":[
            {"id": 1, "name": "إذاعة القرآن الكريم", "url": "https://stream.example/a"},
            {"id": 2, "name": "المصحف المرتل", "url": "https://stream.example/b"}
        ]}"#;
        let stations = parse_stations(body).unwrap();
        assert_eq!(stations.len(), 2);
        assert_eq!(stations[1].url, "https://stream.example/b");
    }

    #[test]
    fn tafsir_text_is_stripped_to_plain_text() {
        let body = r#"{"tafsirs":[
            {"resource_id": 169, "text": "<p>First  line</p><p>second <b>bold</b></p>"}
        ]}"#;
        let content = parse_tafsir_content(body).unwrap();
        assert_eq!(content.resource_id, 169);
        assert_eq!(content.text, "First line second bold");
    }

    #[test]
    fn empty_tafsir_array_is_an_error() {
        assert!(parse_tafsir_content(r#"{"tafsirs":[]}"#).is_err());
    }

    #[test]
    fn parses_search_results() {
        let body = r#"{
            "code": 200, "status": "OK",
            "data": {
                "count": 1,
                "matches": [
                    {"number": 262, "numberInSurah": 255, "text": "...",
                     "surah": {"number": 2, "name": "سُورَةُ البَقَرَةِ",
                               "englishName": "Al-Baqara", "numberOfAyahs": 286}}
                ]
            }
        }"#;
        let results = parse_search_results(body).unwrap();
        assert_eq!(results.count, 1);
        assert_eq!(results.matches[0].surah.number, 2);
        assert_eq!(results.matches[0].number_in_surah, 255);
    }
}
