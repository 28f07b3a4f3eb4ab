//! Reachability marking.
//!
//! Marking only needs a shared `&Heap`: [`crate::object::Header`] holds
//! its bit in a `Cell`, so recursive traversal never has to fight the
//! borrow checker for a `&mut` it would otherwise need at every nested
//! object. Every `mark_*` function returns early if the object was
//! already marked, which is what makes cycles (an env whose closure
//! points back into a value it itself stores, etc.) safe to walk.

use crate::heap::Heap;
use crate::object::EnvHandle;
use crate::value::Value;

pub fn mark_env(heap: &Heap, handle: EnvHandle) {
    let Some(slot) = heap.env_slab().get(handle.0) else {
        return;
    };
    if slot.header.mark() {
        return; // already marked
    }
    for binding in slot.payload.bindings.values() {
        mark_value(heap, &binding.value);
    }
    if let Some(parent) = slot.payload.parent {
        mark_env(heap, parent);
    }
}

pub fn mark_value(heap: &Heap, value: &Value) {
    match value {
        Value::String(handle) => {
            if let Some(slot) = heap.string_slab().get(handle.0) {
                slot.header.mark();
            }
        }
        Value::Object(handle) => {
            let Some(slot) = heap.object_slab().get(handle.0) else {
                return;
            };
            if slot.header.mark() {
                return;
            }
            for value in slot.payload.0.values() {
                mark_value(heap, value);
            }
        }
        Value::Array(handle) => {
            let Some(slot) = heap.array_slab().get(handle.0) else {
                return;
            };
            if slot.header.mark() {
                return;
            }
            for value in &slot.payload.0 {
                mark_value(heap, value);
            }
        }
        Value::Function(func) => mark_env(heap, func.closure),
        Value::Native(native) => {
            if let Some(closure) = native.closure {
                mark_env(heap, closure);
            }
        }
        Value::Number(_) | Value::Boolean(_) | Value::Null | Value::Undefined => {}
    }
}
