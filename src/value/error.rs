//! Error values

use crate::position::Position;
use std::fmt;

/// Category of an error value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Compiler rejected the input
    Syntax,
    /// Unresolved symbol
    Reference,
    /// Wrong type on top of the stack
    Type,
    /// Domain error
    Value,
    /// Stack underflow or index out of bounds
    Range,
    /// Reserved for the embedder
    Unknown,
    /// Reserved for the embedder
    Import,
    /// Reserved for the embedder
    Io,
}

impl ErrorCode {
    pub fn name(&self) -> &'static str {
        match self {
            ErrorCode::Syntax => "syntax",
            ErrorCode::Reference => "reference",
            ErrorCode::Type => "type",
            ErrorCode::Value => "value",
            ErrorCode::Range => "range",
            ErrorCode::Unknown => "unknown",
            ErrorCode::Import => "import",
            ErrorCode::Io => "io",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// First-class error: a code, a human message and an optional source
/// position. Stored in the context's error slot and, like any other
/// value, free to travel on the stack.
#[derive(Debug, Clone)]
pub struct ErrorValue {
    code: ErrorCode,
    message: String,
    position: Option<Position>,
}

impl ErrorValue {
    pub fn new(code: ErrorCode, message: impl Into<String>, position: Option<Position>) -> Self {
        Self {
            code,
            message: message.into(),
            position,
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn position(&self) -> Option<&Position> {
        self.position.as_ref()
    }

    /// Renders the error with an optional `<file>:<line>:<column>:`
    /// prefix for embedder diagnostics.
    pub fn display_with_filename(&self, filename: Option<&str>) -> String {
        match (&self.position, filename) {
            (Some(position), Some(filename)) => {
                format!("{filename}:{position}: {self}")
            }
            (Some(position), None) => format!("{position}: {self}"),
            _ => format!("{self}"),
        }
    }
}

/// Errors compare by code and message; position is diagnostic only.
impl PartialEq for ErrorValue {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code && self.message == other.message
    }
}

impl fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ErrorValue {}
