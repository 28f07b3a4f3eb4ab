//! Tree-walking evaluator over a parsed program: environments, the
//! evaluator itself, and the host standard library it bootstraps.

pub mod builtins;
pub mod completion;
pub mod environment;
pub mod error;
pub mod evaluator;
pub mod numeric;
pub mod stringify;

pub use completion::Completion;
pub use environment::Environment;
pub use error::{EvalError, EvalResult};
pub use evaluator::Evaluator;
pub use vela_gc::Value;

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use vela_gc::{GcConfig, Heap};
use vela_par::ast::Program;
use vela_util::Interner;

/// Runs a parsed program start to finish: allocates a heap, sets up a
/// global environment with `console`/`Math`/`JSON` bound in it, and
/// evaluates every top-level statement in order.
///
/// `out` is the writer `console.log` writes through — callers that want
/// to assert on exact output pass an in-memory buffer; `vela-drv`'s CLI
/// passes a handle to stdout.
pub fn run(program: &Program, interner: &mut Interner, out: Rc<RefCell<dyn Write>>) -> EvalResult<()> {
    let mut heap = Heap::new(GcConfig::default());
    let global = Environment::global(&mut heap);
    builtins::install(&mut heap, interner, global, out);

    let mut evaluator = Evaluator::new(&mut heap, interner, global);
    evaluator.run_program(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vela_par::Parser;
    use vela_util::Handler;

    fn run_source(source: &str) -> Result<String, String> {
        let handler = Handler::new();
        let mut interner = Interner::new();
        let program = Parser::parse_source(source, &handler, &mut interner);
        if handler.has_errors() {
            return Err(handler
                .diagnostics()
                .iter()
                .map(|d| d.render(source))
                .collect::<Vec<_>>()
                .join("\n"));
        }
        let out = Rc::new(RefCell::new(Vec::new()));
        run(&program, &mut interner, out.clone()).map_err(|e| e.to_string())?;
        Ok(String::from_utf8(out.borrow().clone()).unwrap())
    }

    #[test]
    fn arithmetic_and_precedence() {
        assert_eq!(run_source("console.log(1 + 2 * 3);").unwrap(), "7\n");
    }

    #[test]
    fn closures_capture_their_defining_scope_not_the_call_site() {
        let source = "function mk(){ let c = 0; return function(){ c = c + 1; return c; }; } \
                       let f = mk(); console.log(f(), f(), f());";
        assert_eq!(run_source(source).unwrap(), "1 2 3\n");
    }

    #[test]
    fn const_reassignment_is_a_type_error() {
        let err = run_source("const x = 1; x = 2;").unwrap_err();
        assert!(err.contains("Assignment to constant variable."));
    }

    #[test]
    fn object_and_array_literals_round_trip_through_json() {
        let source = "console.log(JSON.stringify({a:1,b:[2,3]}));";
        assert_eq!(run_source(source).unwrap(), "{\"a\":1,\"b\":[2,3]}\n");
    }

    #[test]
    fn json_parse_then_stringify_is_stable() {
        let source = "let v = JSON.parse('{\"x\":[1,2,3],\"y\":\"hi\"}'); console.log(JSON.stringify(v));";
        assert_eq!(run_source(source).unwrap(), "{\"x\":[1,2,3],\"y\":\"hi\"}\n");
    }

    #[test]
    fn template_literals_interpolate_and_stringify() {
        let source = "let name = \"world\"; console.log(`hello ${name}, ${1 + 1}`);";
        assert_eq!(run_source(source).unwrap(), "hello world, 2\n");
    }

    #[test]
    fn json_stringify_escapes_control_characters() {
        let source = "console.log(JSON.stringify({a: \"line\\nbreak\\ttab\"}));";
        assert_eq!(run_source(source).unwrap(), "{\"a\":\"line\\nbreak\\ttab\"}\n");
    }

    /// spec.md §8's lexical-resolution property: a function's free
    /// variables resolve against the scope it was *defined* in, not
    /// wherever it happens to be called from.
    #[quickcheck_macros::quickcheck]
    fn calling_from_a_different_scope_does_not_leak_its_bindings(n: u8) -> bool {
        let captured = (n % 50) as i64;
        let source = format!(
            "function outer() {{ let n = {captured}; return function() {{ return n; }}; }} \
             function caller() {{ let n = -1; let inner = outer(); return inner(); }} \
             console.log(caller());"
        );
        let expected = format!("{captured}\n");
        run_source(&source).map(|out| out == expected).unwrap_or(false)
    }
}
