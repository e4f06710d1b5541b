//! # Quran Tracker CLI (`qt`)
//!
//! The `qt` binary reads surahs with translations, exports them as HTML,
//! and runs an interactive reading session with a timer and stats.
//!
//! ## Usage
//!
//! ```bash
//! qt --config ./config/qt.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `qt read <n>` | Print a surah with its translation |
//! | `qt export <n>` | Write a surah as a standalone HTML page |
//! | `qt verse` | Print a random verse |
//! | `qt list` | List available surahs |
//! | `qt languages` | List translation languages and cache state |
//! | `qt session` | Interactive reading session |
//! | `qt trivia` | Print a trivia fact |
//! | `qt greet` | Time-of-day greeting and date |
//! | `qt donate` | Donation link |
//! | `qt cache clear` | Remove cached translations |

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use quran_tracker::config;
use quran_tracker::logging::{self, LogConfig, LogFormat};
use quran_tracker::quran_core::Language;
use quran_tracker::{donate, greeting, list, read, repl, trivia};

/// Quran Tracker: read surahs with translations and track reading time.
///
/// Commands that load data read a TOML configuration file pointed to by
/// `--config`. When the file does not exist, data is read from
/// `./data/quran` with default settings.
#[derive(Parser)]
#[command(
    name = "qt",
    about = "Quran Tracker — read surahs with translations and track your reading",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/qt.toml")]
    config: PathBuf,

    /// Increase log verbosity (-v info, -vv debug). Logs go to stderr.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log output format.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a surah with its translation.
    ///
    /// Surah 1 is shown with its opener followed by six verses, surah 9
    /// without an opener, and every other surah with the opener split
    /// from its first verse when present.
    Read {
        /// Surah number (1-114).
        chapter: String,

        /// Translation language: en, ms, id, ur, tr. Defaults to `reader.language`.
        #[arg(long)]
        lang: Option<Language>,

        /// Print the composed surah as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Write a surah as a standalone HTML page.
    Export {
        /// Surah number (1-114).
        chapter: String,

        /// Translation language: en, ms, id, ur, tr.
        #[arg(long)]
        lang: Option<Language>,

        /// Output file. Writes to stdout when omitted.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Print a random verse with its translation.
    Verse {
        /// Translation language: en, ms, id, ur, tr.
        #[arg(long)]
        lang: Option<Language>,

        /// Print the verse as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List available surahs.
    List,

    /// List translation languages and whether each is cached.
    Languages,

    /// Start an interactive reading session on stdin.
    Session,

    /// Print a trivia fact.
    Trivia,

    /// Print a time-of-day greeting and the current date.
    Greet,

    /// Print the donation link.
    Donate,

    /// Manage the translation cache.
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// Remove every cached translation.
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging(&LogConfig::from_verbosity(cli.verbose).with_format(cli.log_format));

    // Commands that don't require config
    match &cli.command {
        Commands::Trivia => {
            println!("{}", trivia::Trivia::new().current());
            return Ok(());
        }
        Commands::Greet => {
            greeting::run_greet();
            return Ok(());
        }
        Commands::Donate => {
            donate::run_donate();
            return Ok(());
        }
        _ => {}
    }

    let cfg = if cli.config.exists() {
        config::load_config(&cli.config)?
    } else {
        tracing::debug!(path = %cli.config.display(), "no config file, using defaults");
        config::Config::minimal()
    };

    match cli.command {
        Commands::Read { chapter, lang, json } => {
            read::run_read(&cfg, &chapter, lang, json).await?;
        }
        Commands::Export {
            chapter,
            lang,
            output,
        } => {
            read::run_export(&cfg, &chapter, lang, output.as_deref()).await?;
        }
        Commands::Verse { lang, json } => {
            read::run_verse(&cfg, lang, json).await?;
        }
        Commands::List => {
            list::run_list(&cfg).await?;
        }
        Commands::Languages => {
            list::run_languages(&cfg)?;
        }
        Commands::Session => {
            repl::run_session(&cfg).await?;
        }
        Commands::Cache { action } => match action {
            CacheAction::Clear => list::run_cache_clear(&cfg)?,
        },
        Commands::Trivia | Commands::Greet | Commands::Donate => {
            // Handled above (before config loading)
            unreachable!()
        }
    }

    Ok(())
}
