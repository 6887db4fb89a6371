//! Line-oriented text document model

use serde::Serialize;

/// Line terminator used when rendering a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    /// Detect the line ending from the first terminator in `source`.
    ///
    /// Content without any newline is treated as LF.
    pub fn detect(source: &str) -> Self {
        match source.find('\n') {
            Some(idx) if idx > 0 && source.as_bytes()[idx - 1] == b'\r' => Self::CrLf,
            _ => Self::Lf,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

/// A text file as an ordered list of lines.
///
/// Lines are stored without terminators. Rendering joins every line
/// with the ending detected from the first terminator and restores a
/// final terminator if the source had one. A file with uniform endings
/// round-trips unchanged; a file with mixed endings comes back with the
/// first ending on every line, including lines no edit touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDocument {
    lines: Vec<String>,
    ending: LineEnding,
    trailing_newline: bool,
}

impl TextDocument {
    /// Split `source` into lines.
    pub fn parse(source: &str) -> Self {
        Self {
            lines: source.lines().map(str::to_owned).collect(),
            ending: LineEnding::detect(source),
            trailing_newline: source.ends_with('\n'),
        }
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

    /// Same formatting, different lines.
    pub fn with_lines(&self, lines: Vec<String>) -> Self {
        Self {
            lines,
            ending: self.ending,
            trailing_newline: self.trailing_newline,
        }
    }

    /// Join the lines back into text.
    pub fn render(&self) -> String {
        let ending = self.ending.as_str();
        let mut out = self.lines.join(ending);
        if self.trailing_newline && !self.lines.is_empty() {
            out.push_str(ending);
        }
        out
    }
}

/// Split a literal fragment into lines.
///
/// A trailing line terminator does not produce an extra empty line, so
/// fragments read from files and inline fragments behave the same.
pub fn split_fragment(text: &str) -> Vec<String> {
    text.lines().map(str::to_owned).collect()
}
