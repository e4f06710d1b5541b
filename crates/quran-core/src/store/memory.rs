//! In-memory [`ChapterStore`] and [`TranslationStore`] implementations.
//!
//! These back both the CLI session (after loading) and the tests.

use std::collections::HashMap;

use crate::models::{Chapter, ChapterIndex, Language, TranslationSet};

use super::{ChapterStore, TranslationLookup, TranslationStore};

/// Chapters held in memory for the lifetime of a session.
#[derive(Debug, Clone, Default)]
pub struct InMemoryChapterStore {
    chapters: ChapterIndex,
}

impl InMemoryChapterStore {
    pub fn new(chapters: ChapterIndex) -> Self {
        Self { chapters }
    }

    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }
}

impl From<ChapterIndex> for InMemoryChapterStore {
    fn from(chapters: ChapterIndex) -> Self {
        Self::new(chapters)
    }
}

impl ChapterStore for InMemoryChapterStore {
    fn chapter(&self, number: u32) -> Option<&Chapter> {
        self.chapters.get(&number)
    }

    fn chapter_numbers(&self) -> Vec<u32> {
        self.chapters.keys().copied().collect()
    }
}

/// Load state of one language's translation set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationState {
    Pending,
    Loaded(TranslationSet),
    Failed,
}

static PENDING: TranslationState = TranslationState::Pending;

/// Translation sets per language.
///
/// Writes are last-writer-wins: a late-arriving load simply replaces
/// whatever state the language had.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTranslationStore {
    states: HashMap<Language, TranslationState>,
}

impl InMemoryTranslationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_state(&mut self, language: Language, state: TranslationState) {
        self.states.insert(language, state);
    }

    pub fn insert(&mut self, set: TranslationSet) {
        self.set_state(set.language, TranslationState::Loaded(set));
    }

    pub fn state(&self, language: Language) -> &TranslationState {
        self.states.get(&language).unwrap_or(&PENDING)
    }

    pub fn is_loaded(&self, language: Language) -> bool {
        matches!(self.state(language), TranslationState::Loaded(_))
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }
}

impl TranslationStore for InMemoryTranslationStore {
    fn verse_translation(
        &self,
        chapter: u32,
        verse: u32,
        language: Language,
    ) -> TranslationLookup<'_> {
        match self.state(language) {
            TranslationState::Pending => TranslationLookup::Pending,
            TranslationState::Failed => TranslationLookup::Unavailable,
            TranslationState::Loaded(set) => match set.verse(chapter, verse) {
                Some(text) => TranslationLookup::Found(text),
                None => TranslationLookup::Unavailable,
            },
        }
    }
}
