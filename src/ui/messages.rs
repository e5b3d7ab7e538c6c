//! User-facing terminal messages. Diagnostics go through `tracing` instead.

use ansi_term::Colour;
use std::fmt;

const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";

pub fn info<T: fmt::Display>(msg: T) {
    println!("{} {}", Colour::Blue.bold().paint(ICON_INFO), msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{} {}", Colour::Green.bold().paint(ICON_OK), msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{} {}", Colour::Yellow.bold().paint(ICON_WARN), msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{} {}", Colour::Red.bold().paint(ICON_ERR), msg);
}

/// Framed error for failures that must not go unnoticed (account deletion / edits).
pub fn alert<T: fmt::Display>(msg: T) {
    let text = msg.to_string();
    let rule = "═".repeat(text.chars().count() + 4);
    eprintln!("{}", Colour::Red.paint(format!("╔{rule}╗")));
    eprintln!("{}", Colour::Red.bold().paint(format!("║  {text}  ║")));
    eprintln!("{}", Colour::Red.paint(format!("╚{rule}╝")));
}

/// Section header
pub fn header<T: fmt::Display>(msg: T) {
    println!(
        "{}",
        Colour::Blue.bold().paint(format!("====================== {msg}"))
    );
}
