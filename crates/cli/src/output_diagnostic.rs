// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error, warning and note lines on stderr, colored when stderr is a terminal.

use std::io::{self, IsTerminal, Write};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Level {
    Error,
    Warning,
    Note,
}

impl Level {
    fn label(self) -> &'static str {
        match self {
            Level::Error => "Error",
            Level::Warning => "Warning",
            Level::Note => "Note",
        }
    }

    /// SGR color code
    fn color(self) -> u8 {
        match self {
            Level::Error => 31,
            Level::Warning => 33,
            Level::Note => 36,
        }
    }
}

pub fn print_error(msg: impl std::fmt::Display) {
    print(Level::Error, msg);
}

pub fn print_warning(msg: impl std::fmt::Display) {
    print(Level::Warning, msg);
}

/// Follow-up the user should know about, e.g. a restart the tool needs.
pub fn print_note(msg: impl std::fmt::Display) {
    print(Level::Note, msg);
}

fn print(level: Level, msg: impl std::fmt::Display) {
    let is_tty = io::stderr().is_terminal();
    write_line(&mut io::stderr(), level, msg, is_tty);
}

fn write_line<W: Write>(
    writer: &mut W,
    level: Level,
    msg: impl std::fmt::Display,
    is_terminal: bool,
) {
    let label = level.label();
    if is_terminal {
        let _ = writeln!(writer, "\x1b[{}m{label}: {msg}\x1b[0m", level.color());
    } else {
        let _ = writeln!(writer, "{label}: {msg}");
    }
}

#[cfg(test)]
#[path = "output_diagnostic_tests.rs"]
mod tests;
