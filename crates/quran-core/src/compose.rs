//! Verse composition: chapter text + translations → ordered display units.
//!
//! How a chapter opens depends on its number alone:
//!
//! | Chapter | Policy | Output |
//! |---------|--------|--------|
//! | 1 | [`OpenerPolicy::AlwaysSeparate`] | opener, then verses 1–6 |
//! | 9 | [`OpenerPolicy::NeverPresent`] | every verse, no opener |
//! | others | [`OpenerPolicy::DetectAndSplit`] | split opener off verse 1 if embedded |
//!
//! Composition is pure: the same inputs always yield the same units, and
//! nothing outside the returned [`Composition`] is touched.

use serde::Serialize;

use crate::error::{ComposeError, Result};
use crate::models::{Chapter, DisplayUnit, Language, UnitRole};
use crate::store::{ChapterStore, TranslationLookup, TranslationStore};

/// The opening formula, exactly as it appears in the source text.
pub const CANONICAL_OPENER: &str = "بِسْمِ ٱللَّهِ ٱلرَّحْمَـٰنِ ٱلرَّحِيمِ";

/// Fixed rendering of the opener, regardless of the selected language.
pub const OPENER_TRANSLATION: &str =
    "In the name of Allah, the Most Gracious, the Most Merciful";

pub const TRANSLATION_NOT_AVAILABLE: &str = "Translation not available";
pub const TRANSLATION_LOADING: &str = "Translation loading...";

/// Number of verses in the Opening.
const OPENING_VERSES: u32 = 6;

/// How a chapter's opener is handled, resolved once from its number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenerPolicy {
    AlwaysSeparate,
    NeverPresent,
    DetectAndSplit,
}

impl OpenerPolicy {
    pub fn for_chapter(number: u32) -> Self {
        match number {
            1 => OpenerPolicy::AlwaysSeparate,
            9 => OpenerPolicy::NeverPresent,
            _ => OpenerPolicy::DetectAndSplit,
        }
    }
}

/// A composed chapter, ready to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Composition {
    pub chapter: u32,
    pub language: Language,
    /// Verse count to display; not necessarily `units.len()`.
    pub verse_count: usize,
    pub units: Vec<DisplayUnit>,
}

/// Compose a chapter looked up from `chapters`.
pub fn compose_from_store(
    chapters: &dyn ChapterStore,
    number: u32,
    translations: &dyn TranslationStore,
    language: Language,
) -> Result<Composition> {
    let chapter = chapters
        .chapter(number)
        .ok_or(ComposeError::ChapterNotFound(number))?;
    compose(number, chapter, translations, language)
}

/// Compose an already-resolved chapter.
pub fn compose(
    number: u32,
    chapter: &Chapter,
    translations: &dyn TranslationStore,
    language: Language,
) -> Result<Composition> {
    if chapter.verses.is_empty() {
        return Err(ComposeError::NoVersesInChapter(number));
    }

    let translate = Translator {
        store: translations,
        chapter: number,
        language,
    };

    let policy = OpenerPolicy::for_chapter(number);
    let units = match policy {
        OpenerPolicy::AlwaysSeparate => compose_always_separate(chapter, &translate),
        OpenerPolicy::NeverPresent => compose_never_present(chapter, &translate),
        OpenerPolicy::DetectAndSplit => compose_detect_and_split(chapter, &translate),
    };

    Ok(Composition {
        chapter: number,
        language,
        verse_count: verse_count(policy, chapter),
        units,
    })
}

/// Verse count shown in a chapter header.
pub fn verse_count(policy: OpenerPolicy, chapter: &Chapter) -> usize {
    match policy {
        OpenerPolicy::AlwaysSeparate => OPENING_VERSES as usize,
        OpenerPolicy::NeverPresent | OpenerPolicy::DetectAndSplit => chapter.verses.len(),
    }
}

/// Translation lookup bound to one chapter and language.
struct Translator<'a> {
    store: &'a dyn TranslationStore,
    chapter: u32,
    language: Language,
}

impl Translator<'_> {
    fn verse(&self, verse: u32) -> String {
        match self.store.verse_translation(self.chapter, verse, self.language) {
            TranslationLookup::Found(text) => text.to_string(),
            TranslationLookup::Pending => TRANSLATION_LOADING.to_string(),
            TranslationLookup::Unavailable => TRANSLATION_NOT_AVAILABLE.to_string(),
        }
    }

    fn unit(&self, role: UnitRole, verse: u32, text: &str) -> DisplayUnit {
        DisplayUnit {
            role,
            verse: Some(verse),
            text: text.to_string(),
            translation: self.verse(verse),
        }
    }
}

fn opener_unit(role: UnitRole, text: &str) -> DisplayUnit {
    DisplayUnit {
        role,
        verse: None,
        text: text.to_string(),
        translation: OPENER_TRANSLATION.to_string(),
    }
}

/// Chapter 1: decorative opener, then verses 1 through 6 by number.
fn compose_always_separate(chapter: &Chapter, translate: &Translator<'_>) -> Vec<DisplayUnit> {
    let opener = chapter.opener.as_deref().unwrap_or(CANONICAL_OPENER);
    let mut units = vec![opener_unit(UnitRole::Opener, opener)];
    units.extend((1..=OPENING_VERSES).filter_map(|n| {
        chapter
            .verse(n)
            .map(|text| translate.unit(UnitRole::Verse, n, text))
    }));
    units
}

/// Chapter 9: every verse in key order; any opener field is ignored.
fn compose_never_present(chapter: &Chapter, translate: &Translator<'_>) -> Vec<DisplayUnit> {
    all_verses(chapter, translate)
}

/// Every other chapter: split an embedded opener off verse 1.
///
/// After a split, verses are scanned upward from 2 and the scan stops at the
/// first missing number, so anything past a gap is not emitted.
fn compose_detect_and_split(chapter: &Chapter, translate: &Translator<'_>) -> Vec<DisplayUnit> {
    let rest = match chapter
        .verse(1)
        .and_then(|first| first.strip_prefix(CANONICAL_OPENER))
    {
        Some(rest) => rest,
        None => return all_verses(chapter, translate),
    };

    let mut units = vec![
        opener_unit(UnitRole::SplitOpener, CANONICAL_OPENER),
        translate.unit(UnitRole::Remainder, 1, rest.trim()),
    ];

    let mut n = 2;
    while let Some(text) = chapter.verse(n) {
        units.push(translate.unit(UnitRole::Verse, n, text));
        n += 1;
    }
    units
}

fn all_verses(chapter: &Chapter, translate: &Translator<'_>) -> Vec<DisplayUnit> {
    chapter
        .verses
        .iter()
        .map(|(&n, text)| translate.unit(UnitRole::Verse, n, text))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChapterIndex, RawTranslation, TranslatedChapter, TranslationSet, VerseMap};
    use crate::store::{InMemoryChapterStore, InMemoryTranslationStore, TranslationState};

    fn verses(range: std::ops::RangeInclusive<u32>) -> VerseMap {
        range.map(|n| (n, format!("verse {}", n))).collect()
    }

    fn english_for(chapter: u32, numbers: &[u32]) -> InMemoryTranslationStore {
        let ayahs = numbers.iter().map(|&n| (n, format!("en {}", n))).collect();
        let mut raw = RawTranslation::new();
        raw.insert(chapter, TranslatedChapter { ayahs });
        let mut store = InMemoryTranslationStore::new();
        store.insert(TranslationSet::new(Language::En, raw));
        store
    }

    fn roles(c: &Composition) -> Vec<UnitRole> {
        c.units.iter().map(|u| u.role).collect()
    }

    fn numbers(c: &Composition) -> Vec<Option<u32>> {
        c.units.iter().map(|u| u.verse).collect()
    }

    #[test]
    fn test_policy_dispatch() {
        assert_eq!(OpenerPolicy::for_chapter(1), OpenerPolicy::AlwaysSeparate);
        assert_eq!(OpenerPolicy::for_chapter(9), OpenerPolicy::NeverPresent);
        assert_eq!(OpenerPolicy::for_chapter(2), OpenerPolicy::DetectAndSplit);
        assert_eq!(OpenerPolicy::for_chapter(114), OpenerPolicy::DetectAndSplit);
    }

    #[test]
    fn test_opening_uses_canonical_opener_and_six_verses() {
        let chapter = Chapter::new(verses(1..=10));
        let store = english_for(1, &[1, 2, 3, 4, 5, 6, 7]);
        let c = compose(1, &chapter, &store, Language::En).unwrap();

        assert_eq!(c.units.len(), 7);
        assert_eq!(c.units[0].role, UnitRole::Opener);
        assert_eq!(c.units[0].text, CANONICAL_OPENER);
        assert_eq!(c.units[0].translation, OPENER_TRANSLATION);
        assert!(!c.units[0].is_counted());
        assert_eq!(
            numbers(&c)[1..].to_vec(),
            (1..=6).map(Some).collect::<Vec<_>>()
        );
        assert_eq!(c.units[3].translation, "en 3");
        assert_eq!(c.verse_count, 6);
    }

    #[test]
    fn test_opening_prefers_explicit_opener() {
        let chapter = Chapter::new(verses(1..=6)).with_opener("explicit");
        let store = InMemoryTranslationStore::new();
        let c = compose(1, &chapter, &store, Language::En).unwrap();
        assert_eq!(c.units[0].text, "explicit");
    }

    #[test]
    fn test_opening_skips_sparse_keys() {
        let mut map = verses(1..=6);
        map.remove(&4);
        let chapter = Chapter::new(map);
        let store = InMemoryTranslationStore::new();
        let c = compose(1, &chapter, &store, Language::En).unwrap();
        assert_eq!(
            numbers(&c),
            vec![None, Some(1), Some(2), Some(3), Some(5), Some(6)]
        );
        assert_eq!(c.verse_count, 6);
    }

    #[test]
    fn test_repentance_never_has_opener() {
        let mut map = verses(1..=5);
        map.insert(1, format!("{} first", CANONICAL_OPENER));
        let chapter = Chapter::new(map).with_opener(CANONICAL_OPENER);
        let store = InMemoryTranslationStore::new();
        let c = compose(9, &chapter, &store, Language::En).unwrap();

        assert!(c.units.iter().all(|u| u.role == UnitRole::Verse));
        assert_eq!(c.units.len(), 5);
        assert!(c.units[0].text.starts_with(CANONICAL_OPENER));
        assert_eq!(c.verse_count, 5);
    }

    #[test]
    fn test_split_opener_from_first_verse() {
        let mut map = verses(1..=286);
        map.insert(1, format!("{}  الم", CANONICAL_OPENER));
        let chapter = Chapter::new(map);
        let store = english_for(2, &[1, 2]);
        let c = compose(2, &chapter, &store, Language::En).unwrap();

        assert_eq!(c.units.len(), 287);
        assert_eq!(c.units[0].role, UnitRole::SplitOpener);
        assert_eq!(c.units[0].text, CANONICAL_OPENER);
        assert_eq!(c.units[0].verse, None);
        assert_eq!(c.units[0].translation, OPENER_TRANSLATION);
        assert_eq!(c.units[1].role, UnitRole::Remainder);
        assert_eq!(c.units[1].verse, Some(1));
        assert_eq!(c.units[1].text, "الم");
        assert_eq!(c.units[1].translation, "en 1");
        assert!(c.units[2..].iter().all(|u| u.role == UnitRole::Verse));
        assert_eq!(c.units[286].verse, Some(286));
        assert_eq!(c.verse_count, 286);
    }

    #[test]
    fn test_no_embedded_opener_emits_plain_verses() {
        let chapter = Chapter::new(verses(1..=3));
        let store = english_for(112, &[1, 2, 3]);
        let c = compose(112, &chapter, &store, Language::En).unwrap();
        assert_eq!(roles(&c), vec![UnitRole::Verse; 3]);
        assert_eq!(c.verse_count, 3);
    }

    #[test]
    fn test_opener_detection_is_exact() {
        let mut map = verses(1..=2);
        // Opener without diacritics does not count as a match.
        map.insert(1, "بسم الله الرحمن الرحيم rest".to_string());
        let chapter = Chapter::new(map);
        let store = InMemoryTranslationStore::new();
        let c = compose(3, &chapter, &store, Language::En).unwrap();
        assert_eq!(roles(&c), vec![UnitRole::Verse; 2]);
    }

    #[test]
    fn test_split_scan_stops_at_first_gap() {
        let mut map: VerseMap = [1, 2, 3, 5]
            .into_iter()
            .map(|n| (n, format!("verse {}", n)))
            .collect();
        map.insert(1, format!("{}rest", CANONICAL_OPENER));
        let chapter = Chapter::new(map);
        let store = InMemoryTranslationStore::new();
        let c = compose(4, &chapter, &store, Language::En).unwrap();
        assert_eq!(numbers(&c), vec![None, Some(1), Some(2), Some(3)]);
        assert_eq!(c.verse_count, 4);
    }

    #[test]
    fn test_unsplit_chapter_keeps_verses_after_gap() {
        let map: VerseMap = [1, 2, 5]
            .into_iter()
            .map(|n| (n, format!("verse {}", n)))
            .collect();
        let chapter = Chapter::new(map);
        let store = InMemoryTranslationStore::new();
        let c = compose(4, &chapter, &store, Language::En).unwrap();
        assert_eq!(numbers(&c), vec![Some(1), Some(2), Some(5)]);
    }

    #[test]
    fn test_missing_translation_degrades_to_placeholder() {
        let chapter = Chapter::new(verses(1..=3));
        let store = english_for(112, &[1, 3]);
        let c = compose(112, &chapter, &store, Language::En).unwrap();
        assert_eq!(c.units[0].translation, "en 1");
        assert_eq!(c.units[1].translation, TRANSLATION_NOT_AVAILABLE);
        assert_eq!(c.units[2].translation, "en 3");
    }

    #[test]
    fn test_pending_and_failed_translation_placeholders() {
        let chapter = Chapter::new(verses(1..=1));
        let mut store = InMemoryTranslationStore::new();
        let c = compose(112, &chapter, &store, Language::Ur).unwrap();
        assert_eq!(c.units[0].translation, TRANSLATION_LOADING);

        store.set_state(Language::Ur, TranslationState::Failed);
        let c = compose(112, &chapter, &store, Language::Ur).unwrap();
        assert_eq!(c.units[0].translation, TRANSLATION_NOT_AVAILABLE);
    }

    #[test]
    fn test_empty_chapter_fails() {
        let store = InMemoryTranslationStore::new();
        let err = compose(5, &Chapter::default(), &store, Language::En).unwrap_err();
        assert_eq!(err, ComposeError::NoVersesInChapter(5));
    }

    #[test]
    fn test_absent_chapter_fails() {
        let mut index = ChapterIndex::new();
        index.insert(112, Chapter::new(verses(1..=3)));
        let chapters = InMemoryChapterStore::new(index);
        let translations = InMemoryTranslationStore::new();

        let err = compose_from_store(&chapters, 200, &translations, Language::En).unwrap_err();
        assert_eq!(err, ComposeError::ChapterNotFound(200));
        assert!(compose_from_store(&chapters, 112, &translations, Language::En).is_ok());
    }

    #[test]
    fn test_compose_is_idempotent() {
        let mut map = verses(1..=7);
        map.insert(1, format!("{} x", CANONICAL_OPENER));
        let chapter = Chapter::new(map);
        let store = english_for(2, &[1, 2, 3]);
        let a = compose(2, &chapter, &store, Language::En).unwrap();
        let b = compose(2, &chapter, &store, Language::En).unwrap();
        assert_eq!(a, b);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn verse_map() -> impl Strategy<Value = VerseMap> {
            prop::collection::btree_map(1u32..40, "[a-z ]{0,12}", 1..20)
        }

        proptest! {
            #[test]
            fn repentance_never_emits_opener(map in verse_map(), opener in any::<bool>()) {
                let mut chapter = Chapter::new(map);
                if opener {
                    chapter = chapter.with_opener(CANONICAL_OPENER);
                }
                let store = InMemoryTranslationStore::new();
                let c = compose(9, &chapter, &store, Language::En).unwrap();
                prop_assert!(c.units.iter().all(|u| u.role == UnitRole::Verse));
                prop_assert_eq!(c.units.len(), chapter.verses.len());
            }

            #[test]
            fn opening_emits_one_opener_and_at_most_six(map in verse_map()) {
                let chapter = Chapter::new(map);
                let store = InMemoryTranslationStore::new();
                let c = compose(1, &chapter, &store, Language::En).unwrap();
                prop_assert_eq!(c.units[0].role, UnitRole::Opener);
                prop_assert!(c.units.len() <= 7);
                prop_assert!(c.units[1..].iter().all(|u| u.verse.is_some_and(|n| n <= 6)));
                prop_assert_eq!(c.verse_count, 6);
            }

            #[test]
            fn split_happens_iff_first_verse_has_opener(
                map in verse_map(),
                chapter_number in prop::sample::select(vec![2u32, 3, 8, 10, 55, 114]),
                embed in any::<bool>(),
            ) {
                let mut map = map;
                map.insert(1, if embed {
                    format!("{} tail", CANONICAL_OPENER)
                } else {
                    "tail".to_string()
                });
                let chapter = Chapter::new(map);
                let store = InMemoryTranslationStore::new();
                let c = compose(chapter_number, &chapter, &store, Language::En).unwrap();
                let split = c.units[0].role == UnitRole::SplitOpener;
                prop_assert_eq!(split, embed);
                if split {
                    prop_assert_eq!(c.units[1].role, UnitRole::Remainder);
                    prop_assert_eq!(c.units[1].text.as_str(), "tail");
                } else {
                    prop_assert_eq!(c.units[0].verse, Some(1));
                }
                prop_assert_eq!(c.verse_count, chapter.verses.len());
            }
        }
    }
}
