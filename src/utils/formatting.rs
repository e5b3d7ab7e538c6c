//! Formatting utilities used for CLI outputs.

use ansi_term::Colour;

/// Minutes as `HHh MMm` (or `HH:MM` when `short`), optionally signed.
pub fn mins2readable(mins: i64, want_sign: bool, short: bool) -> String {
    let abs_m = mins.abs();
    let hours = abs_m / 60;
    let minutes = abs_m % 60;

    let sign = if mins > 0 && want_sign {
        "+"
    } else if mins < 0 && want_sign {
        "-"
    } else {
        ""
    };

    if short {
        format!("{}{:02}:{:02}", sign, hours, minutes)
    } else {
        format!("{}{:02}h {:02}m", sign, hours, minutes)
    }
}

/// Status label of a shift, green while in progress.
pub fn status_label(status: &str, in_progress: bool) -> String {
    if in_progress {
        Colour::Green.bold().paint("IN PROGRESS").to_string()
    } else if status.trim().is_empty() {
        Colour::Fixed(244).paint("closed").to_string()
    } else {
        Colour::Fixed(244).paint(status.to_lowercase()).to_string()
    }
}

/// Shorten `s` to `max` visible characters, marking the cut with `…`.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
