#![allow(clippy::module_inception)]

use std::{fmt::Display, path::Path};

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod codegen;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod session;

extern crate regex;

/// A line/column pair in the source file.
///
/// Lines start at 1 and the first character of a line sits in column 1.
/// The column is signed: pushing a newline back into the lexer leaves it at
/// `-1` until the newline is read again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    pub line: usize,
    pub column: isize,
}

impl Location {
    pub fn new(line: usize, column: isize) -> Self {
        Location { line, column }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Returns the text of line `line` (1-based) without its line terminator.
pub fn get_line(source: &str, line: usize) -> Option<&str> {
    if line == 0 {
        return None;
    }

    source
        .split('\n')
        .nth(line - 1)
        .map(|text| text.strip_suffix('\r').unwrap_or(text))
}

/// Strips the directory and the last extension from `path`.
///
/// `tests/math.val` becomes `math`, `archive.tar.val` becomes `archive.tar`.
pub fn base_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::Location;

    #[test]
    fn test_get_line() {
        let source = "validate m {\n  function f { (1) }\r\n}";
        assert_eq!(super::get_line(source, 1), Some("validate m {"));
        assert_eq!(super::get_line(source, 2), Some("  function f { (1) }"));
        assert_eq!(super::get_line(source, 3), Some("}"));
        assert_eq!(super::get_line(source, 4), None);
        assert_eq!(super::get_line(source, 0), None);
    }

    #[test]
    fn test_base_name() {
        assert_eq!(super::base_name(&PathBuf::from("tests/math.val")), "math");
        assert_eq!(super::base_name(&PathBuf::from("math")), "math");
        assert_eq!(super::base_name(&PathBuf::from("/a/b/archive.tar.val")), "archive.tar");
    }

    #[test]
    fn test_location_display() {
        assert_eq!(Location::new(3, 14).to_string(), "3:14");
    }
}

/// Severity label used when rendering a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "Error"),
            Severity::Warning => write!(f, "Warning"),
        }
    }
}

/// Renders `error` with the offending source line and a caret.
pub fn render_error(error: &Error, severity: Severity, file: &Path, source: &str) -> String {
    /*
        Error: message
        -> math.val
           |
        20 |   (1, 0x)
           | -------^
    */

    let location = error.get_location();
    let mut out = String::new();

    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("{}: {}\n", severity, error.get_error_name()));
    } else {
        out.push_str(&format!(
            "{}: {} ({})\n",
            severity,
            error.get_error_name(),
            error.get_tip()
        ));
    }
    out.push_str(&format!("-> {}:{}\n", file.to_string_lossy(), location));

    let Some(line_text) = get_line(source, location.line) else {
        return out;
    };

    let line_string = location.line.to_string();
    let padding = line_string.len() + 2;

    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let column = location.column.max(1) as usize;
    let arrows = column.saturating_sub(removed_whitespace).max(1);

    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));
    out
}

/// Prints a rendered diagnostic to stderr.
pub fn display_error(error: &Error, severity: Severity, file: &Path, source: &str) {
    eprint!("{}", render_error(error, severity, file, source));
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
