//! Loading chapter text, translations, and chapter metadata.
//!
//! Chapters are fetched fresh for every session. Translations go through
//! the [`FileCache`] first (key `translation_<code>`) and are written back
//! after a successful fetch.

use std::collections::BTreeMap;

use quran_core::models::{RawTranslation, SurahInfo};
use quran_core::{ChapterIndex, Language, TranslationSet};
use tracing::{error, info, warn};

use crate::cache::FileCache;
use crate::error::LoadError;
use crate::source::DataSource;

pub fn translation_cache_key(language: Language) -> String {
    format!("translation_{}", language.code())
}

pub async fn load_chapters(source: &DataSource, resource: &str) -> Result<ChapterIndex, LoadError> {
    let chapters: ChapterIndex = source
        .fetch_json(resource)
        .await
        .inspect_err(|e| error!(error = %e, "quran data unavailable"))?;
    info!(chapters = chapters.len(), "quran data loaded");
    Ok(chapters)
}

pub async fn load_translation(
    source: &DataSource,
    cache: &FileCache,
    language: Language,
) -> Result<TranslationSet, LoadError> {
    let key = translation_cache_key(language);
    if let Some(raw) = cache.load::<RawTranslation>(&key) {
        return Ok(TranslationSet::new(language, raw));
    }
    info!(key = %key, "cache miss");

    let raw: RawTranslation = source.fetch_json(&language.resource_file()).await?;
    cache.save(&key, &raw);
    info!(language = %language, chapters = raw.len(), "translation loaded");
    Ok(TranslationSet::new(language, raw))
}

/// Chapter titles. A missing or broken resource yields an empty map and
/// titles fall back to "Surah N".
pub async fn load_surah_info(source: &DataSource, resource: &str) -> BTreeMap<u32, SurahInfo> {
    match source.fetch_json(resource).await {
        Ok(info) => info,
        Err(e) => {
            warn!(error = %e, "surah info unavailable, using numeric titles");
            BTreeMap::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::TempDir;

    const TRANSLATION: &str = r#"{"112": {"ayahs": {"1": "Say, He is Allah, One"}}}"#;

    #[tokio::test]
    async fn test_translation_is_cached_after_fetch() {
        let tmp = TempDir::new().unwrap();
        let data = tmp.path().join("data");
        std::fs::create_dir_all(&data).unwrap();
        std::fs::write(data.join("translation-en.json"), TRANSLATION).unwrap();

        let source = DataSource::Local(data.clone());
        let cache = FileCache::new(tmp.path().join("cache"), Duration::hours(24));

        let set = load_translation(&source, &cache, Language::En).await.unwrap();
        assert_eq!(set.verse(112, 1), Some("Say, He is Allah, One"));

        // Served from cache once the source file is gone.
        std::fs::remove_file(data.join("translation-en.json")).unwrap();
        let set = load_translation(&source, &cache, Language::En).await.unwrap();
        assert_eq!(set.verse(112, 1), Some("Say, He is Allah, One"));
    }

    #[tokio::test]
    async fn test_missing_translation_fails() {
        let tmp = TempDir::new().unwrap();
        let source = DataSource::Local(tmp.path().to_path_buf());
        let err = load_translation(&source, &FileCache::disabled(), Language::Ur)
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::DataSourceFetchFailed { .. }));
    }

    #[tokio::test]
    async fn test_missing_chapters_fails() {
        let tmp = TempDir::new().unwrap();
        let source = DataSource::Local(tmp.path().to_path_buf());
        let err = load_chapters(&source, "quran.json").await.unwrap_err();
        assert!(matches!(err, LoadError::DataSourceFetchFailed { .. }));
        assert!(err.to_string().starts_with("failed to fetch quran.json"));
    }

    #[tokio::test]
    async fn test_load_chapters_and_missing_surah_info() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("quran.json"),
            r#"{"112": {"ayahs": {"1": "a", "2": "b"}}}"#,
        )
        .unwrap();
        let source = DataSource::Local(tmp.path().to_path_buf());

        let chapters = load_chapters(&source, "quran.json").await.unwrap();
        assert_eq!(chapters[&112].verses.len(), 2);

        let info = load_surah_info(&source, "surah-info.json").await;
        assert!(info.is_empty());
    }
}
