//! Chapter reading commands: `qt read`, `qt export`, `qt verse`.
//!
//! Each command builds a fresh [`Session`], performs one load, and prints
//! the result. Load failures are reported on stderr with a retry hint and a
//! non-zero exit status.

use std::path::Path;

use anyhow::Result;
use quran_core::Language;

use crate::config::Config;
use crate::error::SessionError;
use crate::render;
use crate::session::{ChapterView, Session};

/// Parse a chapter argument as typed by the user.
pub fn parse_chapter(arg: &str) -> Option<u32> {
    arg.trim().parse::<u32>().ok().filter(|n| *n > 0)
}

fn report_failure(chapter: &str, err: &SessionError) -> ! {
    eprintln!("Failed to load surah {}: {}", chapter, err);
    if err.is_retryable() {
        eprintln!("Check the data source and retry.");
    }
    std::process::exit(1);
}

async fn load_view(config: &Config, chapter: &str, lang: Option<Language>) -> Result<ChapterView> {
    let Some(number) = parse_chapter(chapter) else {
        eprintln!("Please select a surah first");
        std::process::exit(1);
    };

    let mut session = Session::new(config)?;
    if let Some(lang) = lang {
        session.set_language(lang).await?;
    }

    match session.load_chapter(number).await {
        Ok(view) => Ok(view),
        Err(e) => report_failure(chapter, &e),
    }
}

/// CLI entry point for `qt read`.
pub async fn run_read(
    config: &Config,
    chapter: &str,
    lang: Option<Language>,
    json: bool,
) -> Result<()> {
    let view = load_view(config, chapter, lang).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render::render_text(&view));
    }
    Ok(())
}

/// CLI entry point for `qt export`.
pub async fn run_export(
    config: &Config,
    chapter: &str,
    lang: Option<Language>,
    output: Option<&Path>,
) -> Result<()> {
    let view = load_view(config, chapter, lang).await?;
    let html = render::render_html(&view, config.reader.font_size);
    render::write_output(&html, output)
}

/// CLI entry point for `qt verse`.
pub async fn run_verse(config: &Config, lang: Option<Language>, json: bool) -> Result<()> {
    let mut session = Session::new(config)?;
    if let Some(lang) = lang {
        session.set_language(lang).await?;
    }

    match session.random_verse().await {
        Ok(verse) if json => println!("{}", serde_json::to_string_pretty(&verse)?),
        Ok(verse) => print!("{}", render::render_random_verse(&verse)),
        Err(e) => {
            eprintln!("Failed to load new verse: {}", e);
            std::process::exit(1);
        }
    }
    Ok(())
}
