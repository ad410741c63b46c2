//! Source location spans.
//!
//! Spans are 1-indexed, matching what editors display. The parsers work
//! in 0-indexed lines and columns and convert with [`Span::from_zero`].

use std::path::PathBuf;

/// A source location span representing a range in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// File path.
    pub file: PathBuf,
    /// Starting line (1-indexed).
    pub start_line: usize,
    /// Starting column (1-indexed).
    pub start_col: usize,
    /// Ending line (1-indexed).
    pub end_line: usize,
    /// Ending column (1-indexed, exclusive).
    pub end_col: usize,
}

impl Span {
    /// Create a span covering a single line.
    pub fn line(file: impl Into<PathBuf>, line: usize) -> Self {
        Self {
            file: file.into(),
            start_line: line,
            start_col: 1,
            end_line: line,
            end_col: usize::MAX,
        }
    }

    /// Create a span with precise positions.
    pub fn new(
        file: impl Into<PathBuf>,
        start_line: usize,
        start_col: usize,
        end_line: usize,
        end_col: usize,
    ) -> Self {
        Self {
            file: file.into(),
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// Create a single-line span from 0-indexed line and columns.
    pub fn from_zero(file: impl Into<PathBuf>, line: usize, start: usize, end: usize) -> Self {
        Self::new(file, line + 1, start + 1, line + 1, end.max(start) + 1)
    }
}
