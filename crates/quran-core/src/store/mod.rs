//! Read-side abstractions over loaded chapter and translation data.
//!
//! The composer only ever sees these traits, so it can be exercised against
//! in-memory fixtures without any loader in the picture. Both traits are
//! synchronous: loading is awaited by the caller before composition starts.

pub mod memory;

use crate::models::{Chapter, Language};

/// Outcome of a single verse translation lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationLookup<'a> {
    Found(&'a str),
    /// The language's resource has been requested but not loaded yet.
    Pending,
    /// The load failed, or the chapter/verse pair is absent from the set.
    Unavailable,
}

/// Source of chapter text, keyed by chapter number.
pub trait ChapterStore {
    fn chapter(&self, number: u32) -> Option<&Chapter>;

    /// All chapter numbers present, ascending.
    fn chapter_numbers(&self) -> Vec<u32>;
}

/// Source of per-language verse translations.
pub trait TranslationStore {
    fn verse_translation(&self, chapter: u32, verse: u32, language: Language)
        -> TranslationLookup<'_>;
}

pub use memory::{InMemoryChapterStore, InMemoryTranslationStore, TranslationState};
