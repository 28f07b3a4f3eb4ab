//! `console.log`: default-stringify each argument, space-join, newline,
//! write to whichever sink the driver wired up (a real terminal for
//! `vela-drv`'s CLI, an in-memory buffer for the scenario tests).

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use vela_gc::{Heap, NativeError, Value};
use vela_util::Interner;

use crate::stringify::to_display_string;

pub fn log_fn(out: Rc<RefCell<dyn Write>>) -> impl Fn(&mut Heap, &mut Interner, &[Value]) -> Result<Value, NativeError> {
    move |heap, interner, args| {
        let line = args
            .iter()
            .map(|v| to_display_string(heap, interner, v))
            .collect::<Vec<_>>()
            .join(" ");
        let mut sink = out.borrow_mut();
        writeln!(sink, "{line}").map_err(|e| NativeError::TypeError(format!("console.log: write failed: {e}")))?;
        Ok(Value::Undefined)
    }
}
