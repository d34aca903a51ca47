//! Terminal output for the facetone CLI.
//!
//! Status lines follow the Cargo layout: a right-aligned coloured verb and a
//! message. They go to stderr; stdout is kept for JSON reports and shell
//! completions.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Width of the verb column.
const VERB_WIDTH: usize = 12;

/// Colour of a status verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Work done: Processing, Wrote, Finished.
    Progress,
    /// Detail: Detected, Step.
    Detail,
    /// Degraded result: Fallback.
    Caution,
}

impl Tone {
    fn code(self) -> &'static str {
        match self {
            Tone::Progress => "\x1b[32m",
            Tone::Detail => "\x1b[36m",
            Tone::Caution => "\x1b[33m",
        }
    }
}

/// Status printer for image batches. Colour is on when stderr is a terminal.
pub struct Printer {
    color: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
        }
    }

    /// Printer that never emits escape codes; used by tests.
    pub fn plain() -> Self {
        Self { color: false }
    }

    pub fn status(&self, verb: &str, message: &str) {
        self.line(Tone::Progress, verb, message);
    }

    pub fn success(&self, verb: &str, message: &str) {
        self.line(Tone::Progress, verb, message);
    }

    pub fn info(&self, verb: &str, message: &str) {
        self.line(Tone::Detail, verb, message);
    }

    pub fn warning(&self, verb: &str, message: &str) {
        self.line(Tone::Caution, verb, message);
    }

    pub fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    pub fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    /// Output paths.
    pub fn cyan(&self, text: &str) -> String {
        self.paint(Tone::Detail.code(), text)
    }

    /// `verb` right-aligned in its column, then `message`.
    pub fn format_line(&self, tone: Tone, verb: &str, message: &str) -> String {
        if self.color {
            format!("{BOLD}{}{verb:>VERB_WIDTH$}{RESET} {message}", tone.code())
        } else {
            format!("{verb:>VERB_WIDTH$} {message}")
        }
    }

    fn line(&self, tone: Tone, verb: &str, message: &str) {
        let text = self.format_line(tone, verb, message);
        let _ = writeln!(io::stderr().lock(), "{text}");
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

/// `plural(1, "image", "images")` gives "1 image".
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    if n == 1 {
        format!("{} {}", n, singular)
    } else {
        format!("{} {}", n, pluralized)
    }
}

/// Path relative to the working directory when possible.
pub fn display_path(path: &Path) -> String {
    if let Ok(cwd) = std::env::current_dir() {
        if let Ok(relative) = path.strip_prefix(&cwd) {
            let s = relative.display().to_string();
            if s.is_empty() {
                return ".".to_string();
            }
            return s;
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural() {
        assert_eq!(plural(0, "image", "images"), "0 images");
        assert_eq!(plural(1, "image", "images"), "1 image");
        assert_eq!(plural(3, "pixel", "pixels"), "3 pixels");
    }

    #[test]
    fn test_format_line_aligns_verbs() {
        let printer = Printer::plain();
        assert_eq!(
            printer.format_line(Tone::Caution, "Fallback", "face.jpg"),
            "    Fallback face.jpg"
        );
        assert_eq!(
            printer.format_line(Tone::Progress, "Wrote", "out/face-lipstick.jpg"),
            "       Wrote out/face-lipstick.jpg"
        );
    }

    #[test]
    fn test_colour_line_wraps_verb() {
        let printer = Printer { color: true };
        let line = printer.format_line(Tone::Caution, "Fallback", "x");
        assert!(line.starts_with("\x1b[1m\x1b[33m"));
        assert!(line.ends_with("\x1b[0m x"));
    }

    #[test]
    fn test_plain_printer_does_not_paint() {
        let printer = Printer::plain();
        assert_eq!(printer.cyan("narrowing"), "narrowing");
        assert_eq!(printer.bold("x"), "x");
    }

    #[test]
    fn test_display_path_outside_cwd() {
        let p = Path::new("/nonexistent/portraits/face.jpg");
        assert_eq!(display_path(p), "/nonexistent/portraits/face.jpg");
    }
}
