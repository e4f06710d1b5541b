//! Reading session: the state a reader carries between commands.
//!
//! A [`Session`] owns everything that changes while reading: which chapter
//! and language are current, which data has been loaded, reading stats,
//! the stopwatch, and the trivia rotation. Handlers receive the session
//! explicitly; there is no global state.
//!
//! Loads are awaited one at a time by the caller. When two loads for the
//! same language complete out of order, the later write wins.

use std::collections::BTreeMap;

use quran_core::compose::{TRANSLATION_LOADING, TRANSLATION_NOT_AVAILABLE};
use quran_core::models::SurahInfo;
use quran_core::store::{InMemoryChapterStore, InMemoryTranslationStore, TranslationState};
use quran_core::{
    compose_from_store, ChapterStore, ComposeError, Composition, Language, TranslationLookup,
    TranslationStore,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::cache::FileCache;
use crate::config::Config;
use crate::error::{LoadError, SessionError};
use crate::loader;
use crate::source::DataSource;
use crate::stats::ReadingStats;
use crate::timer::Stopwatch;
use crate::trivia::{ClockPicker, IndexPicker, Trivia};

/// A composed chapter plus the title to show above it.
#[derive(Debug, Clone, Serialize)]
pub struct ChapterView {
    pub title: String,
    #[serde(flatten)]
    pub composition: Composition,
}

/// A single verse picked at random ("verse of the day").
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RandomVerse {
    pub chapter: u32,
    pub verse: u32,
    pub text: String,
    pub translation: String,
    /// e.g. `The Cow (2:255)`
    pub reference: String,
}

pub struct Session {
    source: DataSource,
    cache: FileCache,
    chapters_file: String,
    surah_info_file: String,
    initial_language: Language,

    chapters: Option<InMemoryChapterStore>,
    surah_info: BTreeMap<u32, SurahInfo>,
    translations: InMemoryTranslationStore,
    language: Language,
    current_chapter: Option<u32>,
    stats: ReadingStats,
    stopwatch: Stopwatch,
    trivia: Trivia,
    picker: Box<dyn IndexPicker + Send>,
}

impl Session {
    pub fn new(config: &Config) -> Result<Self, LoadError> {
        let source = DataSource::from_config(&config.data)?;
        let mut session = Self::with_source(
            source,
            FileCache::from_config(&config.cache),
            config.reader.language(),
        );
        session.chapters_file = config.data.chapters_file.clone();
        session.surah_info_file = config.data.surah_info_file.clone();
        Ok(session)
    }

    pub fn with_source(source: DataSource, cache: FileCache, language: Language) -> Self {
        Self {
            source,
            cache,
            chapters_file: "quran.json".to_string(),
            surah_info_file: "surah-info.json".to_string(),
            initial_language: language,
            chapters: None,
            surah_info: BTreeMap::new(),
            translations: InMemoryTranslationStore::new(),
            language,
            current_chapter: None,
            stats: ReadingStats::default(),
            stopwatch: Stopwatch::new(),
            trivia: Trivia::new(),
            picker: Box::new(ClockPicker::new()),
        }
    }

    pub fn with_picker(mut self, picker: Box<dyn IndexPicker + Send>) -> Self {
        self.picker = picker;
        self
    }

    /// Return to the freshly-created state, keeping the data source. The
    /// trivia rotation carries on so a restart does not repeat the fact
    /// already on screen.
    pub fn reset(&mut self) {
        self.chapters = None;
        self.surah_info.clear();
        self.translations.clear();
        self.language = self.initial_language;
        self.current_chapter = None;
        self.stats = ReadingStats::default();
        self.stopwatch.reset();
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn current_chapter(&self) -> Option<u32> {
        self.current_chapter
    }

    pub fn stats(&self) -> ReadingStats {
        ReadingStats {
            time_spent: self.stopwatch.elapsed_secs(),
            ..self.stats
        }
    }

    pub fn translation_state(&self, language: Language) -> &TranslationState {
        self.translations.state(language)
    }

    async fn ensure_chapters(&mut self) -> Result<(), LoadError> {
        if self.chapters.is_none() {
            let index = loader::load_chapters(&self.source, &self.chapters_file).await?;
            self.surah_info = loader::load_surah_info(&self.source, &self.surah_info_file).await;
            self.chapters = Some(InMemoryChapterStore::new(index));
        }
        Ok(())
    }

    fn loaded_chapters(&self) -> Result<&InMemoryChapterStore, LoadError> {
        self.chapters.as_ref().ok_or_else(|| LoadError::Malformed {
            resource: self.chapters_file.clone(),
            reason: "chapters not loaded".to_string(),
        })
    }

    /// Load a translation unless it is already loaded. A failure marks the
    /// language as failed and is otherwise absorbed.
    async fn ensure_translation(&mut self, language: Language) -> bool {
        if self.translations.is_loaded(language) {
            return true;
        }
        match loader::load_translation(&self.source, &self.cache, language).await {
            Ok(set) => {
                self.translations.insert(set);
                true
            }
            Err(e) => {
                warn!(language = %language, error = %e, "translation load failed");
                self.translations
                    .set_state(language, TranslationState::Failed);
                false
            }
        }
    }

    /// Chapter numbers with their list titles, ascending.
    pub async fn chapter_list(&mut self) -> Result<Vec<(u32, String)>, SessionError> {
        self.ensure_chapters().await?;
        let numbers = self.loaded_chapters()?.chapter_numbers();
        Ok(numbers
            .into_iter()
            .map(|n| (n, SurahInfo::list_title(self.surah_info.get(&n), n)))
            .collect())
    }

    /// Load and compose a chapter in the current language.
    ///
    /// Counts as one read on success. When the current language cannot be
    /// loaded but English is available, the session switches to English.
    pub async fn load_chapter(&mut self, number: u32) -> Result<ChapterView, SessionError> {
        self.ensure_chapters().await?;

        let language = self.language;
        if !self.ensure_translation(language).await
            && language != Language::En
            && self.translations.is_loaded(Language::En)
        {
            warn!(
                "Could not load {} translation. Falling back to English.",
                language.display_name()
            );
            self.language = Language::En;
        }

        let chapters = self.loaded_chapters()?;
        let composition = compose_from_store(chapters, number, &self.translations, self.language)?;
        let title = SurahInfo::header_title(self.surah_info.get(&number), number);

        self.current_chapter = Some(number);
        self.stats.surahs_read += 1;
        info!(chapter = number, language = %self.language, "surah loaded");

        Ok(ChapterView { title, composition })
    }

    /// Switch language; re-renders the current chapter if there is one.
    pub async fn set_language(
        &mut self,
        language: Language,
    ) -> Result<Option<ChapterView>, SessionError> {
        self.language = language;
        match self.current_chapter {
            Some(number) => self.load_chapter(number).await.map(Some),
            None => {
                self.ensure_translation(language).await;
                Ok(None)
            }
        }
    }

    pub async fn random_verse(&mut self) -> Result<RandomVerse, SessionError> {
        self.ensure_chapters().await?;
        let language = self.language;
        self.ensure_translation(language).await;

        let numbers = self.loaded_chapters()?.chapter_numbers();
        if numbers.is_empty() {
            return Err(LoadError::Malformed {
                resource: self.chapters_file.clone(),
                reason: "no chapters".to_string(),
            }
            .into());
        }
        let chapter_number = numbers[self.picker.pick(numbers.len())];
        let chapter = self
            .loaded_chapters()?
            .chapter(chapter_number)
            .cloned()
            .ok_or(ComposeError::ChapterNotFound(chapter_number))?;

        let verse_numbers: Vec<u32> = chapter.verses.keys().copied().collect();
        if verse_numbers.is_empty() {
            return Err(ComposeError::NoVersesInChapter(chapter_number).into());
        }
        let verse = verse_numbers[self.picker.pick(verse_numbers.len())];
        let text = chapter.verse(verse).unwrap_or_default().to_string();

        let translation = match self
            .translations
            .verse_translation(chapter_number, verse, language)
        {
            TranslationLookup::Found(t) => t.to_string(),
            TranslationLookup::Pending => TRANSLATION_LOADING.to_string(),
            TranslationLookup::Unavailable => TRANSLATION_NOT_AVAILABLE.to_string(),
        };

        let name = self
            .surah_info
            .get(&chapter_number)
            .and_then(|i| i.english.clone())
            .unwrap_or_else(|| format!("Surah {}", chapter_number));

        Ok(RandomVerse {
            chapter: chapter_number,
            verse,
            text,
            translation,
            reference: format!("{} ({}:{})", name, chapter_number, verse),
        })
    }

    /// Start or pause the stopwatch. Returns whether it is now running.
    pub fn timer_toggle(&mut self) -> bool {
        self.stopwatch.toggle()
    }

    pub fn timer_reset(&mut self) {
        self.stopwatch.reset();
    }

    pub fn timer_elapsed(&self) -> u64 {
        self.stopwatch.elapsed_secs()
    }

    pub fn current_trivia(&self) -> &'static str {
        self.trivia.current()
    }

    pub fn next_trivia(&mut self) -> &'static str {
        self.trivia.next()
    }
}
