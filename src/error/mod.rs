//! Compile-stage error types and reporting

use crate::position::Position;
use thiserror::Error;

/// Result type alias for the lexer and compiler
pub type Result<T> = std::result::Result<T, CompileError>;

/// Error produced while turning source text into a quote
#[derive(Debug, Clone, Error)]
pub enum CompileError {
    #[error("{position}: syntax error: {message}")]
    Syntax { message: String, position: Position },
}

impl CompileError {
    pub fn syntax(message: impl Into<String>, position: Position) -> Self {
        Self::Syntax {
            message: message.into(),
            position,
        }
    }

    pub fn position(&self) -> &Position {
        match self {
            Self::Syntax { position, .. } => position,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Syntax { message, .. } => message,
        }
    }
}

/// Report a compile error with ariadne
pub fn report_error(filename: &str, source: &str, error: &CompileError) {
    use ariadne::{Color, Label, Report, ReportKind, Source};

    let offset = error.position().offset.min(source.len());
    let end = (offset + 1).min(source.len());

    Report::build(ReportKind::Error, (filename, offset..end))
        .with_message("syntax error")
        .with_label(
            Label::new((filename, offset..end))
                .with_message(error.message())
                .with_color(Color::Red),
        )
        .finish()
        .eprint((filename, Source::from(source)))
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_display() {
        let err = CompileError::syntax("unexpected `;'", Position::new(2, 4, 10));
        assert_eq!(format!("{err}"), "2:4: syntax error: unexpected `;'");
    }

    #[test]
    fn test_accessors() {
        let err = CompileError::syntax("oops", Position::new(1, 1, 0));
        assert_eq!(err.message(), "oops");
        assert_eq!(err.position().offset, 0);
    }
}
