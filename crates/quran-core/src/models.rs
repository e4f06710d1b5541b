//! Core data models used throughout Quran Tracker.
//!
//! Chapters and translation sets mirror the shape of the static JSON
//! resources they are loaded from; display units are the derived,
//! render-ready output of composition.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Verse number → text, ordered by verse number.
pub type VerseMap = BTreeMap<u32, String>;

/// All chapters of the source text, keyed by chapter number.
pub type ChapterIndex = BTreeMap<u32, Chapter>;

/// A single chapter (surah) as found in `quran.json`.
///
/// ```json
/// { "ayahs": { "1": "...", "2": "..." }, "bismillah": "..." }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    #[serde(rename = "ayahs", default)]
    pub verses: VerseMap,
    #[serde(rename = "bismillah", default, skip_serializing_if = "Option::is_none")]
    pub opener: Option<String>,
}

impl Chapter {
    pub fn new(verses: VerseMap) -> Self {
        Self {
            verses,
            opener: None,
        }
    }

    pub fn with_opener(mut self, opener: impl Into<String>) -> Self {
        self.opener = Some(opener.into());
        self
    }

    pub fn verse(&self, number: u32) -> Option<&str> {
        self.verses.get(&number).map(String::as_str)
    }
}

/// Translation languages with a published resource file.
///
/// Adding a language means adding a variant here and shipping a matching
/// `translation-<code>.json`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ms,
    Id,
    Ur,
    Tr,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::En,
        Language::Ms,
        Language::Id,
        Language::Ur,
        Language::Tr,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ms => "ms",
            Language::Id => "id",
            Language::Ur => "ur",
            Language::Tr => "tr",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Ms => "Malay (Bahasa Melayu)",
            Language::Id => "Indonesian (Bahasa Indonesia)",
            Language::Ur => "Urdu (اردو)",
            Language::Tr => "Turkish (Türkçe)",
        }
    }

    /// Name of the static resource holding this language's translation.
    pub fn resource_file(self) -> String {
        format!("translation-{}.json", self.code())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown language code '{0}' (expected one of: en, ms, id, ur, tr)")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        Language::ALL
            .into_iter()
            .find(|lang| lang.code() == code)
            .ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}

/// One chapter entry of a translation resource. Same shape as [`Chapter`]
/// minus the opener.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatedChapter {
    #[serde(default)]
    pub ayahs: VerseMap,
}

/// A translation resource exactly as it is stored on disk and in the cache.
pub type RawTranslation = BTreeMap<u32, TranslatedChapter>;

/// A language's parallel text, chapter → verse → translated string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationSet {
    pub language: Language,
    chapters: BTreeMap<u32, VerseMap>,
}

impl TranslationSet {
    pub fn new(language: Language, raw: RawTranslation) -> Self {
        let chapters = raw
            .into_iter()
            .map(|(number, chapter)| (number, chapter.ayahs))
            .collect();
        Self { language, chapters }
    }

    pub fn verse(&self, chapter: u32, verse: u32) -> Option<&str> {
        self.chapters
            .get(&chapter)
            .and_then(|verses| verses.get(&verse))
            .map(String::as_str)
    }

    pub fn chapter_count(&self) -> usize {
        self.chapters.len()
    }
}

/// Role of a display unit within a composed chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitRole {
    /// Decorative opener emitted before the Opening (chapter 1).
    Opener,
    /// Opener text split off the front of verse 1.
    SplitOpener,
    /// Verse 1 with the split opener removed.
    Remainder,
    Verse,
}

/// One render-ready row produced by composition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayUnit {
    pub role: UnitRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verse: Option<u32>,
    pub text: String,
    pub translation: String,
}

impl DisplayUnit {
    /// Whether this unit contributes to the reported verse count.
    pub fn is_counted(&self) -> bool {
        !matches!(self.role, UnitRole::Opener | UnitRole::SplitOpener)
    }
}

/// Optional chapter metadata used for titles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurahInfo {
    #[serde(default)]
    pub english: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl SurahInfo {
    /// Title used in chapter pickers: `"2. The Cow"` or `"Surah 2"`.
    pub fn list_title(info: Option<&SurahInfo>, number: u32) -> String {
        match info.and_then(|i| i.english.as_deref()) {
            Some(english) => format!("{}. {}", number, english),
            None => format!("Surah {}", number),
        }
    }

    /// Title used in chapter headers: `"The Cow (البقرة)"` or `"Surah 2"`.
    pub fn header_title(info: Option<&SurahInfo>, number: u32) -> String {
        match info {
            Some(SurahInfo {
                english: Some(english),
                name,
            }) => format!("{} ({})", english, name.as_deref().unwrap_or("")),
            _ => format!("Surah {}", number),
        }
    }
}
