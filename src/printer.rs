//! Reporting matches.

use serde_json::json;
use std::io::{self, Write};
use termcolor::{Color, ColorSpec, StandardStream, WriteColor};

use crate::store::{MatchEntry, ResultStore};

/// Output format.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Format {
    /// `found query '<lexeme>' @ <<path>:<line>:<column>>`
    Text,
    /// One JSON object per line.
    Json,
}

/// Writes matches to an output stream.
pub struct Printer<W> {
    out: W,
    format: Format,
}

impl<W: WriteColor> Printer<W> {
    /// Create a printer writing to `out`.
    pub fn new(out: W, format: Format) -> Self {
        Printer { out, format }
    }

    /// Print every entry of `results` in order.
    pub fn print_all(&mut self, results: &ResultStore) -> io::Result<()> {
        for entry in results {
            self.print(entry)?;
        }
        self.out.flush()
    }

    /// Print a single entry.
    pub fn print(&mut self, entry: &MatchEntry) -> io::Result<()> {
        match self.format {
            Format::Text => self.print_text(entry),
            Format::Json => self.print_json(entry),
        }
    }

    fn colored(&mut self, color: Color, bold: bool, text: &str) -> io::Result<()> {
        self.out
            .set_color(ColorSpec::new().set_fg(Some(color)).set_bold(bold))?;
        write!(self.out, "{}", text)?;
        self.out.reset()
    }

    fn print_text(&mut self, entry: &MatchEntry) -> io::Result<()> {
        write!(self.out, "found query '")?;
        self.colored(Color::Red, true, entry.lexeme())?;
        write!(self.out, "' @ <")?;
        self.colored(Color::Magenta, false, &entry.path().display().to_string())?;
        write!(self.out, ":")?;
        self.colored(Color::Green, false, &entry.line().to_string())?;
        write!(self.out, ":")?;
        self.colored(Color::Green, false, &entry.column().to_string())?;
        writeln!(self.out, ">")
    }

    fn print_json(&mut self, entry: &MatchEntry) -> io::Result<()> {
        let value = json!({
            "lexeme": entry.lexeme(),
            "path": entry.path().to_string_lossy(),
            "line": entry.line(),
            "column": entry.column(),
        });
        writeln!(self.out, "{}", value)
    }
}

impl Printer<StandardStream> {
    /// Printer for the standard output.
    pub fn stdout(color: termcolor::ColorChoice, format: Format) -> Self {
        Printer::new(StandardStream::stdout(color), format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use termcolor::{Ansi, NoColor};

    fn store() -> ResultStore {
        let mut store = ResultStore::new();
        for (line, column) in [(1, 1), (2, 17)] {
            store
                .append(MatchEntry::new(b"foo", Path::new("dir/a.txt"), line, column, None).unwrap())
                .unwrap();
        }
        store
    }

    #[test]
    fn text_format() {
        let mut printer = Printer::new(NoColor::new(Vec::new()), Format::Text);
        printer.print_all(&store()).unwrap();
        assert_eq!(
            String::from_utf8(printer.out.into_inner()).unwrap(),
            "found query 'foo' @ <dir/a.txt:1:1>\nfound query 'foo' @ <dir/a.txt:2:17>\n"
        );
    }

    #[test]
    fn colored_text_keeps_content() {
        let mut printer = Printer::new(Ansi::new(Vec::new()), Format::Text);
        printer.print_all(&store()).unwrap();
        let out = String::from_utf8(printer.out.into_inner()).unwrap();
        assert!(out.contains("\x1b["));
        assert!(out.contains("foo"));
        assert_eq!(out.lines().count(), 2);
    }

    #[test]
    fn json_format() {
        let mut printer = Printer::new(NoColor::new(Vec::new()), Format::Json);
        printer.print_all(&store()).unwrap();
        let out = String::from_utf8(printer.out.into_inner()).unwrap();
        let values = out
            .lines()
            .map(|l| serde_json::from_str::<serde_json::Value>(l).unwrap())
            .collect::<Vec<_>>();
        assert_eq!(values.len(), 2);
        assert_eq!(values[1]["lexeme"], "foo");
        assert_eq!(values[1]["path"], "dir/a.txt");
        assert_eq!(values[1]["line"], 2);
        assert_eq!(values[1]["column"], 17);
    }
}
