//! Favorite-verse store — a TOML file of `[[favorite]]` tables, rewritten in
//! full on every change.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::platform;
use crate::types::FavoriteAyah;

#[derive(Debug, Default, Serialize, Deserialize)]
struct FavoritesFile {
    #[serde(default, rename = "favorite")]
    favorites: Vec<FavoriteAyah>,
}

pub struct Favorites {
    items: Vec<FavoriteAyah>,
    path: PathBuf,
}

impl Favorites {
    pub fn default_path() -> PathBuf {
        platform::data_dir().join("favorites.toml")
    }

    pub fn load() -> Self {
        Self::load_from(Self::default_path())
    }

    /// Missing or unreadable file is an empty list, never an error.
    pub fn load_from(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let items = match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<FavoritesFile>(&content) {
                Ok(file) => file.favorites,
                Err(e) => {
                    tracing::warn!("invalid favorites file {}: {}", path.display(), e);
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };
        Self { items, path }
    }

    pub fn items(&self) -> &[FavoriteAyah] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, surah_number: u32, ayah_number: u32) -> bool {
        self.items
            .iter()
            .any(|f| f.key() == (surah_number, ayah_number))
    }

    /// Insert or remove by the uniqueness key. Returns true when the verse
    /// was added. The full list is written back either way.
    pub fn toggle(&mut self, favorite: FavoriteAyah) -> anyhow::Result<bool> {
        let key = favorite.key();
        let added = if self.contains(key.0, key.1) {
            self.items.retain(|f| f.key() != key);
            false
        } else {
            self.items.push(favorite);
            true
        };
        self.save()?;
        Ok(added)
    }

    pub fn remove(&mut self, surah_number: u32, ayah_number: u32) -> anyhow::Result<()> {
        self.items
            .retain(|f| f.key() != (surah_number, ayah_number));
        self.save()
    }

    pub fn clear(&mut self) -> anyhow::Result<()> {
        self.items.clear();
        self.save()
    }

    fn save(&self) -> anyhow::Result<()> {
        save_to(&self.path, &self.items)
    }
}

fn save_to(path: &Path, items: &[FavoriteAyah]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = FavoritesFile {
        favorites: items.to_vec(),
    };
    let content = toml::to_string_pretty(&file)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn fav(surah: u32, ayah: u32) -> FavoriteAyah {
        FavoriteAyah {
            surah_number: surah,
            surah_name: "الفاتحة".into(),
            ayah_number: ayah,
            text: "بِسْمِ اللَّهِ".into(),
            added_at: Utc::now(),
        }
    }

    #[test]
    fn toggle_adds_then_removes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("favorites.toml");
        let mut favorites = Favorites::load_from(&path);

        assert!(favorites.toggle(fav(1, 1)).unwrap());
        assert!(favorites.contains(1, 1));
        assert!(!favorites.toggle(fav(1, 1)).unwrap());
        assert!(!favorites.contains(1, 1));
        assert!(favorites.is_empty());
    }

    #[test]
    fn survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("favorites.toml");
        {
            let mut favorites = Favorites::load_from(&path);
            favorites.toggle(fav(1, 5)).unwrap();
            favorites.toggle(fav(2, 255)).unwrap();
        }
        let favorites = Favorites::load_from(&path);
        assert_eq!(favorites.len(), 2);
        assert!(favorites.contains(2, 255));
    }

    #[test]
    fn uniqueness_is_per_surah_and_verse() {
        let dir = tempfile::tempdir().unwrap();
        let mut favorites = Favorites::load_from(dir.path().join("f.toml"));
        favorites.toggle(fav(1, 3)).unwrap();
        favorites.toggle(fav(2, 3)).unwrap();
        assert_eq!(favorites.len(), 2);
    }

    #[test]
    fn clear_empties_the_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("favorites.toml");
        let mut favorites = Favorites::load_from(&path);
        favorites.toggle(fav(1, 1)).unwrap();
        favorites.clear().unwrap();
        assert!(favorites.is_empty());
        assert!(Favorites::load_from(&path).is_empty());
    }

    #[test]
    fn missing_file_is_empty() {
        let favorites = Favorites::load_from("/definitely/not/here.toml");
        assert!(favorites.is_empty());
    }
}
