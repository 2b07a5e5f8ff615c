//! Colored status lines on stderr.
//!
//! Colors are only emitted when stderr supports them (not when piped, or with
//! `NO_COLOR` set).

use owo_colors::{OwoColorize, Stream::Stderr};
use std::fmt::Display;

pub fn success(message: impl Display) {
    eprintln!(
        "{} {}",
        "==>".if_supports_color(Stderr, |t| t.green()),
        message.if_supports_color(Stderr, |t| t.bold())
    );
}

pub fn error(message: impl Display) {
    eprintln!(
        "{} {}",
        "Error:".if_supports_color(Stderr, |t| t.red()),
        message.if_supports_color(Stderr, |t| t.red())
    );
}

pub fn warning(message: impl Display) {
    eprintln!(
        "{} {}",
        "Warning:".if_supports_color(Stderr, |t| t.yellow()),
        message
    );
}

pub fn step(message: impl Display) {
    eprintln!(
        "{} {}",
        "==>".if_supports_color(Stderr, |t| t.blue()),
        message
    );
}
