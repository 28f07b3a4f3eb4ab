//! Diagnostic construction and collection.
//!
//! A much smaller cousin of the teacher's `diagnostic` module: no
//! diagnostic codes, no fluent builder, no source-snippet rendering —
//! this pipeline has one source file per run and the CLI only ever needs
//! to print "error: message at file:line:column". The `Handler` still
//! plays the same role: a sink every pipeline stage reports into, queried
//! once at the end for pass/fail.

use std::cell::RefCell;
use std::fmt;

use crate::span::{line_column_at, Span};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Warning => write!(f, "warning"),
            Level::Note => write!(f, "note"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn new(level: Level, message: impl Into<String>, span: Span) -> Self {
        Self {
            level,
            message: message.into(),
            span,
        }
    }

    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Error, message, span)
    }

    pub fn warning(message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Warning, message, span)
    }

    /// Render as `error: message (line:column)`, reconstructing the
    /// position from `source` if the span didn't carry one.
    pub fn render(&self, source: &str) -> String {
        let (line, column) = if self.span.line == 0 {
            line_column_at(source, self.span.start)
        } else {
            (self.span.line, self.span.column)
        };
        format!("{}: {} ({}:{})", self.level, self.message, line, column)
    }
}

/// Collects diagnostics emitted while lexing, parsing, or evaluating a
/// single source file.
#[derive(Default)]
pub struct Handler {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl Handler {
    pub fn new() -> Self {
        Self {
            diagnostics: RefCell::new(Vec::new()),
        }
    }

    pub fn emit(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    pub fn error(&self, message: impl Into<String>, span: Span) {
        self.emit(Diagnostic::error(message, span));
    }

    pub fn warning(&self, message: impl Into<String>, span: Span) {
        self.emit(Diagnostic::warning(message, span));
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .borrow()
            .iter()
            .any(|d| d.level == Level::Error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.level == Level::Error)
            .count()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    pub fn clear(&self) {
        self.diagnostics.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_errors_distinctly_from_warnings() {
        let handler = Handler::new();
        handler.warning("unused variable", Span::DUMMY);
        assert!(!handler.has_errors());
        handler.error("unexpected token", Span::DUMMY);
        assert!(handler.has_errors());
        assert_eq!(handler.error_count(), 1);
    }

    #[test]
    fn render_reconstructs_line_column_from_source() {
        let source = "let x = 1;\nlet y = @;";
        let span = Span::new(19, 20, 0, 0);
        let diag = Diagnostic::error("unexpected character '@'", span);
        assert_eq!(diag.render(source), "error: unexpected character '@' (2:9)");
    }
}
