//! Rendering composed chapters for the terminal and as standalone HTML.
//!
//! Source-script text is right-to-left. In the terminal it is wrapped in
//! Unicode directional isolates so mixed-direction lines (verse text plus a
//! Latin verse number) keep their order; in HTML it gets `dir="rtl"`.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Result;
use quran_core::{DisplayUnit, UnitRole};

use crate::session::{ChapterView, RandomVerse};

const RLI: char = '\u{2067}';
const PDI: char = '\u{2069}';

fn rtl(text: &str) -> String {
    format!("{}{}{}", RLI, text, PDI)
}

/// Plain-text rendering of a chapter.
pub fn render_text(view: &ChapterView) -> String {
    let c = &view.composition;
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.title);
    let _ = writeln!(out, "{} verses", c.verse_count);
    let _ = writeln!(out, "Translation: {}", c.language.display_name());
    let _ = writeln!(out, "{}", "-".repeat(60));

    for unit in &c.units {
        let _ = writeln!(out);
        match unit.role {
            UnitRole::Opener | UnitRole::SplitOpener => {
                let _ = writeln!(out, "    {}", rtl(&unit.text));
            }
            UnitRole::Remainder | UnitRole::Verse => {
                let number = unit.verse.map(|n| n.to_string()).unwrap_or_default();
                let _ = writeln!(out, "{} ({})", rtl(&unit.text), number);
            }
        }
        let _ = writeln!(out, "    {}", unit.translation);
    }
    out
}

pub fn render_random_verse(verse: &RandomVerse) -> String {
    format!(
        "{}\n{}\n— {}\n",
        rtl(&verse.text),
        verse.translation,
        verse.reference
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn html_unit(out: &mut String, unit: &DisplayUnit) {
    let class = match unit.role {
        UnitRole::Opener | UnitRole::SplitOpener => "bismillah-starter",
        UnitRole::Remainder | UnitRole::Verse => "verse",
    };
    let _ = writeln!(out, "  <div class=\"{}\">", class);
    match unit.verse {
        Some(n) => {
            let _ = writeln!(
                out,
                "    <div class=\"verse-ar\" dir=\"rtl\">{} <span class=\"verse-number\">{}</span></div>",
                escape_html(&unit.text),
                n
            );
        }
        None => {
            let _ = writeln!(
                out,
                "    <div class=\"verse-ar bismillah-text\" dir=\"rtl\">{}</div>",
                escape_html(&unit.text)
            );
        }
    }
    let _ = writeln!(
        out,
        "    <div class=\"verse-tr\">{}</div>",
        escape_html(&unit.translation)
    );
    let _ = writeln!(out, "  </div>");
}

/// Standalone HTML page for a chapter.
pub fn render_html(view: &ChapterView, font_size: u32) -> String {
    let c = &view.composition;
    let mut out = String::new();
    let _ = writeln!(out, "<!DOCTYPE html>");
    let _ = writeln!(out, "<html lang=\"{}\">", c.language.code());
    let _ = writeln!(out, "<head>");
    let _ = writeln!(out, "<meta charset=\"utf-8\">");
    let _ = writeln!(out, "<title>{}</title>", escape_html(&view.title));
    let _ = writeln!(
        out,
        "<style>.verse-ar {{ font-size: {}px; text-align: right; }} .verse-tr {{ color: #555; }}</style>",
        font_size
    );
    let _ = writeln!(out, "</head>");
    let _ = writeln!(out, "<body>");
    let _ = writeln!(out, "<div class=\"surah-header\">");
    let _ = writeln!(out, "  <h2>{}</h2>", escape_html(&view.title));
    let _ = writeln!(out, "  <p>{} verses</p>", c.verse_count);
    let _ = writeln!(
        out,
        "  <p>Translation: {}</p>",
        escape_html(c.language.display_name())
    );
    let _ = writeln!(out, "</div>");
    let _ = writeln!(out, "<div id=\"reader\">");
    for unit in &c.units {
        html_unit(&mut out, unit);
    }
    let _ = writeln!(out, "</div>");
    let _ = writeln!(out, "</body>");
    let _ = writeln!(out, "</html>");
    out
}

/// Write `content` to `output`, or to stdout when no path is given.
pub fn write_output(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(path, content)?;
            eprintln!("Wrote {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}
