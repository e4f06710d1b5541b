//! # Quran Tracker Core
//!
//! Shared, I/O-free logic for Quran Tracker: data models, the chapter and
//! translation store abstractions, and the verse composer that turns a
//! chapter into the ordered display units a reader sees.
//!
//! This crate contains no tokio, reqwest, filesystem access, or other
//! native-only dependencies. Loading data is the caller's job; composition
//! is a pure function of what was loaded.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | Chapters, translation sets, languages, display units |
//! | [`store`] | `ChapterStore` / `TranslationStore` traits and in-memory impls |
//! | [`compose`] | Opener policy dispatch and verse composition |
//! | [`error`] | Composition error taxonomy |

pub mod compose;
pub mod error;
pub mod models;
pub mod store;

pub use compose::{compose, compose_from_store, Composition, OpenerPolicy};
pub use error::ComposeError;
pub use models::{Chapter, ChapterIndex, DisplayUnit, Language, TranslationSet, UnitRole};
pub use store::{ChapterStore, TranslationLookup, TranslationStore};
