//! Framed status banners on stderr.
//!
//! Log lines go through `tracing`; these banners mark the start and end of
//! a run so the outcome stands out in container logs.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;

// ── Color helpers ────────────────────────────────────────────────────

/// Color only when stderr is a terminal and `NO_COLOR` is unset.
pub fn should_color() -> bool {
    io::stderr().is_terminal() && std::env::var("NO_COLOR").is_err()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Failure,
}

impl Tone {
    fn paint(self, text: &str, color: bool) -> String {
        if !color {
            return text.to_owned();
        }
        match self {
            Self::Info => text.cyan().to_string(),
            Self::Success => text.green().bold().to_string(),
            Self::Failure => text.red().bold().to_string(),
        }
    }
}

// ── Frame rendering ──────────────────────────────────────────────────

/// Render `title` and `lines` inside a box-drawing frame.
pub fn frame(title: &str, lines: &[String], tone: Tone, color: bool) -> String {
    let width = std::iter::once(title)
        .chain(lines.iter().map(String::as_str))
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0);

    let rule = "─".repeat(width + 2);
    let mut out = String::new();

    out.push_str(&tone.paint(&format!("┌{rule}┐"), color));
    out.push('\n');
    out.push_str(&row(title, width, tone, color));
    if !lines.is_empty() {
        out.push_str(&tone.paint(&format!("├{rule}┤"), color));
        out.push('\n');
        for line in lines {
            out.push_str(&row(line, width, tone, color));
        }
    }
    out.push_str(&tone.paint(&format!("└{rule}┘"), color));
    out.push('\n');
    out
}

fn row(text: &str, width: usize, tone: Tone, color: bool) -> String {
    let pad = " ".repeat(width - text.chars().count());
    let border = tone.paint("│", color);
    format!("{border} {text}{pad} {border}\n")
}

/// Print a framed banner to stderr.
pub fn banner(title: &str, lines: &[String], tone: Tone) {
    let rendered = frame(title, lines, tone, should_color());
    let _ = io::stderr().write_all(rendered.as_bytes());
}
