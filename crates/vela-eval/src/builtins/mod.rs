//! Host standard library, registered into the global environment
//! before a program runs: `console`, `Math`, `JSON`.

pub mod console;
pub mod json;
pub mod math;

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use vela_gc::{BindingKind, Heap, JSObject, NativeFn, NativeValue, Value};
use vela_util::Interner;

use crate::environment::Environment;

fn native(interner: &mut Interner, name: &str, func: NativeFn) -> Value {
    let symbol = interner.intern(name);
    Value::Native(Rc::new(NativeValue { name: symbol, func, closure: None }))
}

fn object_of(heap: &mut Heap, interner: &mut Interner, entries: &[(&str, Value)]) -> Value {
    let mut object = JSObject::default();
    for (key, value) in entries {
        object.0.insert(interner.intern(key), value.clone());
    }
    Value::Object(heap.alloc_object(object))
}

/// Installs `console`, `Math`, and `JSON` as `const` bindings in `env`.
/// `out` is where `console.log` writes — a real stdout handle for the
/// CLI, an in-memory buffer for tests that assert on exact output.
pub fn install(heap: &mut Heap, interner: &mut Interner, env: Environment, out: Rc<RefCell<dyn Write>>) {
    let console_log = native(interner, "log", Rc::new(console::log_fn(out)));
    let console = object_of(heap, interner, &[("log", console_log)]);
    env.define(heap, interner.intern("console"), console, BindingKind::Const);

    let math_random = native(interner, "random", Rc::new(math::random_fn()));
    let math_floor = native(interner, "floor", Rc::new(math::floor));
    let math_ceil = native(interner, "ceil", Rc::new(math::ceil));
    let math_abs = native(interner, "abs", Rc::new(math::abs));
    let math_max = native(interner, "max", Rc::new(math::max));
    let math_min = native(interner, "min", Rc::new(math::min));
    let math_pow = native(interner, "pow", Rc::new(math::pow));
    let math_sqrt = native(interner, "sqrt", Rc::new(math::sqrt));
    let math = object_of(
        heap,
        interner,
        &[
            ("random", math_random),
            ("floor", math_floor),
            ("ceil", math_ceil),
            ("abs", math_abs),
            ("max", math_max),
            ("min", math_min),
            ("pow", math_pow),
            ("sqrt", math_sqrt),
        ],
    );
    env.define(heap, interner.intern("Math"), math, BindingKind::Const);

    let json_stringify = native(interner, "stringify", Rc::new(json::stringify));
    let json_parse = native(interner, "parse", Rc::new(json::parse));
    let json = object_of(heap, interner, &[("stringify", json_stringify), ("parse", json_parse)]);
    env.define(heap, interner.intern("JSON"), json, BindingKind::Const);
}
