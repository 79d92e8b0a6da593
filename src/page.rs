use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder content of a blank line. A non-breaking space keeps the line's height
/// when it is rendered, where an empty string would collapse.
pub const BLANK_LINE: &str = "\u{00A0}";

/// One visual row of text inside a column
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Line(String);

impl Line {
    /// Create a line, substituting [BLANK_LINE] for empty text
    pub fn new<S: Into<String>>(text: S) -> Line {
        let text: String = text.into();
        if text.is_empty() {
            Line(BLANK_LINE.to_string())
        } else {
            Line(text)
        }
    }

    pub fn text(&self) -> &str {
        &self.0
    }

    /// Whether this line is the blank-line placeholder
    pub fn is_blank(&self) -> bool {
        self.0 == BLANK_LINE
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A vertical run of lines, rendered top to bottom within one column of a page
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct Column {
    pub lines: Vec<Line>,
}

impl Column {
    pub fn new(lines: Vec<Line>) -> Column {
        Column { lines }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }
}

/// A page of laid out text, holding its columns left to right
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct Page {
    pub columns: Vec<Column>,
}

impl Page {
    pub fn new(columns: Vec<Column>) -> Page {
        Page { columns }
    }

    /// A page with `column_count` empty columns
    pub fn empty(column_count: usize) -> Page {
        Page {
            columns: vec![Column::default(); column_count],
        }
    }

    /// Append empty columns until the page holds `column_count` of them
    pub fn pad_to(&mut self, column_count: usize) {
        if self.columns.len() < column_count {
            self.columns.resize_with(column_count, Column::default);
        }
    }

    /// Iterate every line on the page, column by column
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.columns.iter().flat_map(|column| column.lines.iter())
    }

    pub fn is_blank(&self) -> bool {
        self.columns.iter().all(Column::is_empty)
    }
}
