//! Library entry point for the `vela` interpreter: read a source file,
//! run it through `vela-lex -> vela-par -> vela-eval`, and render the
//! first error (lex, parse, or evaluation) as a single diagnostic.
//!
//! Kept separate from `main.rs` so the pipeline is testable without a
//! subprocess (see `tests/scenarios.rs`) — the same split `faxc-drv`
//! makes between its `main` shim and its `Session`-driven library code.

use std::cell::RefCell;
use std::io::Write;
use std::path::Path;
use std::rc::Rc;

use vela_par::Parser;
use vela_util::span::line_column_at;
use vela_util::{Handler, Interner};

/// Runs already-loaded source text, writing `console.log` output to
/// `out`. Returns the rendered text of the first error: every lex/parse
/// diagnostic the parser collected (it recovers past one bad statement
/// to keep finding more), or the single evaluation error that aborted
/// the program.
pub fn run_source(source: &str, out: Rc<RefCell<dyn Write>>) -> Result<(), String> {
    let handler = Handler::new();
    let mut interner = Interner::new();

    log::debug!("lexing and parsing {} bytes", source.len());
    let program = Parser::parse_source(source, &handler, &mut interner);

    if handler.has_errors() {
        return Err(handler
            .diagnostics()
            .iter()
            .map(|d| d.render(source))
            .collect::<Vec<_>>()
            .join("\n"));
    }

    log::debug!("evaluating {} top-level statement(s)", program.len());
    vela_eval::run(&program, &mut interner, out).map_err(|e| {
        let (line, column) = line_column_at(source, e.span().start);
        format!("error: {e} ({line}:{column})")
    })
}

/// Reads `path` and runs it, writing output to `out`. The `anyhow`
/// boundary lives here and in `main`, matching the teacher's own
/// `main() -> anyhow::Result<()>` driver shape.
pub fn run_file(path: &Path, out: Rc<RefCell<dyn Write>>) -> anyhow::Result<()> {
    let source = std::fs::read_to_string(path)?;
    run_source(&source, out).map_err(|diagnostic| anyhow::anyhow!(diagnostic))
}
