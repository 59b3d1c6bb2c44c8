//! Source location tracking

use serde::{Deserialize, Serialize};

/// A byte range in the source code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl From<Span> for std::ops::Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(range: std::ops::Range<usize>) -> Self {
        Span::new(range.start, range.end)
    }
}

/// A resolved source position attached to symbols and errors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// 1-based line number
    pub line: usize,
    /// 1-based column number, counted in code points
    pub column: usize,
    /// Byte offset from the start of the source
    pub offset: usize,
}

impl Position {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Maps byte offsets to line/column positions.
///
/// Lines are terminated by `\n`, `\r` or `\r\n`.
#[derive(Debug)]
pub struct SourceMap {
    line_starts: Vec<usize>,
}

impl SourceMap {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        let mut chars = source.char_indices().peekable();

        while let Some((i, c)) = chars.next() {
            match c {
                '\r' => {
                    if let Some(&(_, '\n')) = chars.peek() {
                        chars.next();
                        line_starts.push(i + 2);
                    } else {
                        line_starts.push(i + 1);
                    }
                }
                '\n' => line_starts.push(i + 1),
                _ => {}
            }
        }

        Self { line_starts }
    }

    /// Resolves a byte offset into a position. Offsets past the end of a
    /// line clamp to that line.
    pub fn position(&self, source: &str, offset: usize) -> Position {
        let line_index = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        let line_start = self.line_starts[line_index];
        let column = source[line_start..offset.min(source.len())].chars().count() + 1;

        Position::new(line_index + 1, column, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_new() {
        let span = Span::new(3, 9);
        assert_eq!(span.start, 3);
        assert_eq!(span.end, 9);
    }

    #[test]
    fn test_span_merge() {
        let merged = Span::new(0, 5).merge(Span::new(10, 15));
        assert_eq!(merged, Span::new(0, 15));
    }

    #[test]
    fn test_position_display() {
        assert_eq!(format!("{}", Position::new(3, 7, 42)), "3:7");
    }

    #[test]
    fn test_source_map_first_line() {
        let source = "dup *";
        let map = SourceMap::new(source);
        assert_eq!(map.position(source, 0), Position::new(1, 1, 0));
        assert_eq!(map.position(source, 4), Position::new(1, 5, 4));
    }

    #[test]
    fn test_source_map_lf() {
        let source = "a\nbc\nd";
        let map = SourceMap::new(source);
        assert_eq!(map.position(source, 2), Position::new(2, 1, 2));
        assert_eq!(map.position(source, 3), Position::new(2, 2, 3));
        assert_eq!(map.position(source, 5), Position::new(3, 1, 5));
    }

    #[test]
    fn test_source_map_crlf() {
        let source = "a\r\nb\rc";
        let map = SourceMap::new(source);
        assert_eq!(map.position(source, 3).line, 2);
        assert_eq!(map.position(source, 5).line, 3);
    }

    #[test]
    fn test_source_map_multibyte_column() {
        // Columns count code points, not bytes
        let source = "äö x";
        let map = SourceMap::new(source);
        let offset = source.find('x').unwrap();
        assert_eq!(map.position(source, offset).column, 4);
    }
}
