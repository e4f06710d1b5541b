//! Interactive reading session (`qt session`).
//!
//! Reads one command per line from stdin and applies it to a single
//! [`Session`]. Commands run to completion before the next line is read, so
//! at most one load is ever in flight.
//!
//! ```text
//! load <n>     read a surah
//! lang <code>  switch translation (en, ms, id, ur, tr)
//! timer        start / pause the reading timer
//! reset        reset the reading timer
//! stats        show reading stats
//! trivia       show another trivia fact
//! verse        show a random verse
//! status       show current surah, language, translation state
//! restart      start a fresh session
//! quit         leave
//! ```

use std::io::Write;

use anyhow::Result;
use quran_core::Language;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::config::Config;
use crate::list::describe_translation;
use crate::read::parse_chapter;
use crate::render;
use crate::session::Session;
use crate::stats::format_time;
use crate::timer::format_clock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Load(Option<u32>),
    Lang(String),
    Timer,
    ResetTimer,
    Stats,
    Trivia,
    Verse,
    Status,
    Restart,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

pub fn parse_command(line: &str) -> SessionCommand {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return SessionCommand::Empty;
    };
    let arg = parts.next().unwrap_or("");
    match head.to_ascii_lowercase().as_str() {
        "load" | "read" => SessionCommand::Load(parse_chapter(arg)),
        "lang" | "language" => SessionCommand::Lang(arg.to_string()),
        "timer" => SessionCommand::Timer,
        "reset" => SessionCommand::ResetTimer,
        "stats" => SessionCommand::Stats,
        "trivia" => SessionCommand::Trivia,
        "verse" => SessionCommand::Verse,
        "status" => SessionCommand::Status,
        "restart" => SessionCommand::Restart,
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" | "q" => SessionCommand::Quit,
        other => SessionCommand::Unknown(other.to_string()),
    }
}

const HELP: &str = "commands: load <n>, lang <code>, timer, reset, stats, trivia, verse, status, restart, quit";

/// Apply one command. Returns `false` when the session should end.
pub async fn handle<W: Write>(
    session: &mut Session,
    command: SessionCommand,
    out: &mut W,
) -> Result<bool> {
    match command {
        SessionCommand::Load(None) => writeln!(out, "Please select a surah first")?,
        SessionCommand::Load(Some(n)) => match session.load_chapter(n).await {
            Ok(view) => {
                write!(out, "{}", render::render_text(&view))?;
                writeln!(out, "Surah {} loaded!", n)?;
            }
            Err(e) => {
                writeln!(out, "Failed to load surah {}: {}", n, e)?;
                if e.is_retryable() {
                    writeln!(out, "Type `load {}` to retry.", n)?;
                }
            }
        },
        SessionCommand::Lang(code) => match code.parse::<Language>() {
            Ok(lang) => {
                writeln!(out, "Switching to {}...", lang.display_name())?;
                match session.set_language(lang).await {
                    Ok(Some(view)) => write!(out, "{}", render::render_text(&view))?,
                    Ok(None) => {}
                    Err(e) => writeln!(out, "Failed to reload surah: {}", e)?,
                }
                if session.language() != lang {
                    writeln!(
                        out,
                        "Could not load {} translation. Falling back to English.",
                        lang.display_name()
                    )?;
                }
            }
            Err(e) => writeln!(out, "{}", e)?,
        },
        SessionCommand::Timer => {
            let running = session.timer_toggle();
            let state = if running { "running" } else { "paused" };
            writeln!(out, "Timer {} at {}", state, format_clock(session.timer_elapsed()))?;
        }
        SessionCommand::ResetTimer => {
            session.timer_reset();
            writeln!(out, "Timer reset to {}", format_clock(0))?;
        }
        SessionCommand::Stats => {
            let stats = session.stats();
            writeln!(out, "Surahs read: {}", stats.surahs_read)?;
            writeln!(out, "Time spent:  {}", format_time(stats.time_spent))?;
            writeln!(out, "Day streak:  {}", stats.day_streak)?;
        }
        SessionCommand::Trivia => writeln!(out, "{}", session.next_trivia())?,
        SessionCommand::Verse => match session.random_verse().await {
            Ok(verse) => write!(out, "{}", render::render_random_verse(&verse))?,
            Err(e) => writeln!(out, "Failed to load new verse: {}", e)?,
        },
        SessionCommand::Status => {
            let current = session
                .current_chapter()
                .map(|n| n.to_string())
                .unwrap_or_else(|| "none".to_string());
            writeln!(out, "Surah:       {}", current)?;
            writeln!(
                out,
                "Language:    {} ({})",
                session.language().display_name(),
                describe_translation(session, session.language())
            )?;
        }
        SessionCommand::Restart => {
            session.reset();
            writeln!(out, "Session reset.")?;
        }
        SessionCommand::Help => writeln!(out, "{}", HELP)?,
        SessionCommand::Quit => return Ok(false),
        SessionCommand::Empty => {}
        SessionCommand::Unknown(word) => {
            writeln!(out, "Unknown command '{}'. {}", word, HELP)?;
        }
    }
    Ok(true)
}

/// CLI entry point for `qt session`.
pub async fn run_session(config: &Config) -> Result<()> {
    let mut session = Session::new(config)?;
    let mut stdout = std::io::stdout();

    writeln!(stdout, "{}", session.current_trivia())?;
    writeln!(stdout, "{}", HELP)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let keep_going = handle(&mut session, parse_command(&line), &mut stdout).await?;
        stdout.flush()?;
        if !keep_going {
            break;
        }
    }
    Ok(())
}
