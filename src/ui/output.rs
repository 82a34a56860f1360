//! ui::output
//!
//! Operator-facing output.
//!
//! # Design
//!
//! Status lines respect the quiet flag and `[debug]` lines appear only
//! under `--debug`. Errors and hints always go to stderr. Developer
//! diagnostics do not belong here; they go through `tracing` (see
//! [`crate::logging`]).

use std::fmt::Display;
use std::io::{self, Write};

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Write a status line to `out` (respects quiet mode).
pub fn status<W: Write + ?Sized>(
    out: &mut W,
    message: impl Display,
    verbosity: Verbosity,
) -> io::Result<()> {
    if verbosity != Verbosity::Quiet {
        writeln!(out, "{}", message)?;
    }
    Ok(())
}

/// Write a `[debug]` line to `out` (only in debug mode).
pub fn debug<W: Write + ?Sized>(
    out: &mut W,
    message: impl Display,
    verbosity: Verbosity,
) -> io::Result<()> {
    if verbosity == Verbosity::Debug {
        writeln!(out, "[debug] {}", message)?;
    }
    Ok(())
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a remediation hint (always shown).
pub fn hint(message: impl Display) {
    eprintln!("hint: {}", message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_wins_over_debug() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
    }

    #[test]
    fn status_suppressed_when_quiet() {
        let mut out = Vec::new();
        status(&mut out, "hidden", Verbosity::Quiet).unwrap();
        assert!(out.is_empty());

        status(&mut out, "shown", Verbosity::Normal).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "shown\n");
    }

    #[test]
    fn debug_lines_only_in_debug_mode() {
        let mut out = Vec::new();
        debug(&mut out, "hidden", Verbosity::Normal).unwrap();
        debug(&mut out, "hidden", Verbosity::Quiet).unwrap();
        assert!(out.is_empty());

        debug(&mut out, "shown", Verbosity::Debug).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[debug] shown\n");
    }

    #[test]
    fn debug_flag() {
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
    }
}
