use crate::error::Result;
use std::fs;
use std::path::Path;

/// Newline convention of a file, taken from its first line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Newline {
    #[default]
    Lf,
    CrLf,
}

impl Newline {
    pub fn as_str(&self) -> &'static str {
        match self {
            Newline::Lf => "\n",
            Newline::CrLf => "\r\n",
        }
    }
}

/// Ordered in-memory working copy of a text file
///
/// Every line keeps its own terminator, so rendering an untouched buffer
/// reproduces the source byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineBuffer {
    lines: Vec<String>,
    newline: Newline,
}

impl LineBuffer {
    /// Split text into lines, keeping terminators
    pub fn from_text(text: &str) -> Self {
        let lines: Vec<String> = text.split_inclusive('\n').map(str::to_string).collect();
        let newline = match lines.first() {
            Some(first) if first.ends_with("\r\n") => Newline::CrLf,
            _ => Newline::Lf,
        };
        LineBuffer { lines, newline }
    }

    /// Read a UTF-8 file into a buffer
    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self::from_text(&text))
    }

    /// An empty buffer that writes the same newline convention as `self`
    pub fn empty_like(&self) -> Self {
        LineBuffer {
            lines: Vec::new(),
            newline: self.newline,
        }
    }

    pub fn newline(&self) -> Newline {
        self.newline
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn last(&self) -> Option<&str> {
        self.lines.last().map(String::as_str)
    }

    /// Append one line verbatim
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Append generated text, one entry per line
    ///
    /// `\n` terminators in `text` are rewritten to the buffer's newline
    /// convention.
    pub fn push_text(&mut self, text: &str) {
        let newline = self.newline.as_str();
        for piece in text.split_inclusive('\n') {
            match piece.strip_suffix('\n') {
                Some(body) => {
                    let body = body.strip_suffix('\r').unwrap_or(body);
                    self.lines.push(format!("{}{}", body, newline));
                }
                None => self.lines.push(piece.to_string()),
            }
        }
    }

    pub fn pop(&mut self) -> Option<String> {
        self.lines.pop()
    }

    /// Drop every line from `len` onwards
    pub fn truncate(&mut self, len: usize) {
        self.lines.truncate(len);
    }

    /// Insert `block` so its first line lands at `offset`
    ///
    /// Offsets past the end append.
    pub fn splice(&mut self, offset: usize, block: LineBuffer) {
        let offset = offset.min(self.lines.len());
        self.lines.splice(offset..offset, block.lines);
    }

    /// Concatenate all lines back into file content
    pub fn render(&self) -> String {
        self.lines.concat()
    }
}

/// Terminator of a single line: "\r\n", "\n" or "" for an unterminated last line
pub fn line_ending(line: &str) -> &str {
    if line.ends_with("\r\n") {
        "\r\n"
    } else if line.ends_with('\n') {
        "\n"
    } else {
        ""
    }
}

/// Line content without its terminator
pub fn strip_line_ending(line: &str) -> &str {
    &line[..line.len() - line_ending(line).len()]
}

/// Leading whitespace of a line
pub fn indentation(line: &str) -> &str {
    let content = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - content.len()]
}
