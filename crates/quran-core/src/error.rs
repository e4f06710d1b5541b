use thiserror::Error;

/// Terminal failures of a single composition call.
///
/// Missing translations are never reported here; they degrade to a
/// placeholder inside the produced units.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposeError {
    #[error("Surah {0} not found")]
    ChapterNotFound(u32),
    #[error("Surah {0} has no verses")]
    NoVersesInChapter(u32),
}

pub type Result<T> = std::result::Result<T, ComposeError>;
