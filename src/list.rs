//! Listing commands: `qt list`, `qt languages`, `qt cache clear`.

use anyhow::Result;
use quran_core::store::TranslationState;
use quran_core::Language;

use crate::cache::FileCache;
use crate::config::Config;
use crate::loader::translation_cache_key;
use crate::session::Session;

pub async fn run_list(config: &Config) -> Result<()> {
    let mut session = Session::new(config)?;
    let chapters = match session.chapter_list().await {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load {}: {}", config.data.chapters_file, e);
            std::process::exit(1);
        }
    };

    println!("{:<6} TITLE", "SURAH");
    for (number, title) in chapters {
        println!("{:<6} {}", number, title);
    }
    Ok(())
}

pub fn run_languages(config: &Config) -> Result<()> {
    let cache = FileCache::from_config(&config.cache);
    let default = config.reader.language();

    println!("{:<6} {:<32} {:<8} DEFAULT", "CODE", "LANGUAGE", "CACHED");
    for lang in Language::ALL {
        let cached = cache
            .load::<serde_json::Value>(&translation_cache_key(lang))
            .is_some();
        println!(
            "{:<6} {:<32} {:<8} {}",
            lang.code(),
            lang.display_name(),
            cached,
            lang == default
        );
    }
    Ok(())
}

pub fn run_cache_clear(config: &Config) -> Result<()> {
    let cache = FileCache::from_config(&config.cache);
    let removed = cache.clear()?;
    println!("Removed {} cache entries from {}", removed, cache.dir().display());
    Ok(())
}

/// One-line status of a language for the interactive session.
pub fn describe_translation(session: &Session, lang: Language) -> &'static str {
    match session.translation_state(lang) {
        TranslationState::Pending => "not loaded",
        TranslationState::Loaded(_) => "loaded",
        TranslationState::Failed => "failed",
    }
}
