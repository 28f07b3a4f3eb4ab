//! Shared infrastructure for the vela workspace: string interning, source
//! spans, and diagnostic reporting.
//!
//! Every other crate in the workspace (`vela-lex`, `vela-par`, `vela-gc`,
//! `vela-eval`, `vela-drv`) depends on this one. None of it is specific to
//! lexing, parsing, or evaluation.

pub mod diagnostic;
pub mod error;
pub mod span;
pub mod symbol;

pub use diagnostic::{Diagnostic, Handler, Level};
pub use error::{DiagnosticError, SymbolError};
pub use span::Span;
pub use symbol::{Interner, Symbol};
