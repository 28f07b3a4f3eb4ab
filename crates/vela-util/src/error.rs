//! Error types owned by this crate's own operations (interning, diagnostic
//! construction). Lexer/parser/evaluator errors live in their own crates.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SymbolError {
    #[error("symbol not found: index {index}")]
    NotFound { index: u32 },
}

#[derive(Debug, Error)]
pub enum DiagnosticError {
    #[error("failed to format diagnostic: {0}")]
    FormatFailed(String),
}

pub type SymbolResult<T> = std::result::Result<T, SymbolError>;
pub type DiagnosticResult<T> = std::result::Result<T, DiagnosticError>;
