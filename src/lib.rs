//! # Quran Tracker
//!
//! **A local-first Quran reader and reading tracker for the terminal.**
//!
//! Quran Tracker loads chapter (surah) text and per-language translations
//! from static JSON resources, composes each chapter into display units
//! with the correct handling of the opening formula, and keeps simple
//! reading statistics for the session.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌────────────┐   ┌──────────────┐
//! │ Data source  │──▶│  Loaders   │──▶│   Session    │
//! │ dir / HTTP   │   │ + 24h cache│   │ stores+stats │
//! └──────────────┘   └────────────┘   └──────┬───────┘
//!                                            │ compose (quran-core)
//!                        ┌───────────────────┤
//!                        ▼                   ▼
//!                   ┌──────────┐       ┌──────────┐
//!                   │ Terminal │       │   HTML   │
//!                   │  (qt)    │       │  export  │
//!                   └──────────┘       └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! qt list                       # chapters available in quran.json
//! qt read 2 --lang ur           # read a surah with a translation
//! qt export 1 --output fatiha.html
//! qt verse                      # a random verse
//! qt session                    # interactive reading session with timer
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing and validation |
//! | [`logging`] | `tracing` subscriber setup |
//! | [`error`] | Load and session error types |
//! | [`source`] | Local directory / HTTP data source |
//! | [`cache`] | Time-bounded file cache |
//! | [`loader`] | Chapter, translation, and surah-info loading |
//! | [`session`] | Session state: stores, language, stats, timer, trivia |
//! | [`render`] | Terminal and HTML rendering |
//! | [`read`] | `read`, `export`, `verse` commands |
//! | [`list`] | `list`, `languages`, `cache clear` commands |
//! | [`repl`] | Interactive `session` command |
//! | [`stats`] | Reading statistics |
//! | [`timer`] | Reading stopwatch |
//! | [`trivia`] | Trivia facts |
//! | [`greeting`] | Time-of-day greeting |
//! | [`donate`] | Donation link |

pub mod cache;
pub mod config;
pub mod donate;
pub mod error;
pub mod greeting;
pub mod list;
pub mod loader;
pub mod logging;
pub mod read;
pub mod render;
pub mod repl;
pub mod session;
pub mod source;
pub mod stats;
pub mod timer;
pub mod trivia;

pub use quran_core;
pub use session::{ChapterView, RandomVerse, Session};
