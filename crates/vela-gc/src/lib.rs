//! Mark-and-sweep heap for the `vela` evaluator.
//!
//! Stop-the-world, non-incremental, non-moving — a drastic scale-down
//! of the teacher's `fgc` crate (concurrent, generational, relocating)
//! to match what a synchronous tree-walking interpreter actually needs.
//! See `object.rs` and `heap.rs` for what was kept and what was
//! dropped.

pub mod config;
pub mod error;
pub mod heap;
pub mod marker;
pub mod object;
pub mod stats;
pub mod value;

pub use config::GcConfig;
pub use error::{AssignError, GcError, NativeError};
pub use heap::Heap;
pub use object::{ArrayHandle, EnvHandle, Header, ObjectHandle, StringHandle};
pub use stats::GcStats;
pub use value::{BindingKind, FunctionValue, JSArray, JSEnv, JSObject, JSString, NativeFn, NativeValue, Value};

#[cfg(test)]
mod tests {
    use super::*;
    use vela_util::Interner;

    #[test]
    fn allocating_a_string_increases_bytes_allocated() {
        let mut heap = Heap::new(GcConfig::default());
        let before = heap.bytes_allocated();
        heap.alloc_string("hello");
        assert!(heap.bytes_allocated() > before);
    }

    #[test]
    fn collecting_with_no_roots_frees_everything() {
        let mut heap = Heap::new(GcConfig::default());
        heap.alloc_string("unreachable");
        heap.alloc_object(JSObject::default());
        heap.collect();
        assert_eq!(heap.bytes_allocated(), 0);
        assert_eq!(heap.stats().objects_freed, 2);
    }

    #[test]
    fn collecting_twice_with_no_allocation_in_between_is_idempotent() {
        let mut heap = Heap::new(GcConfig::default());
        heap.alloc_array(JSArray::default());
        heap.collect();
        let bytes_after_first = heap.bytes_allocated();
        heap.collect();
        assert_eq!(heap.bytes_allocated(), bytes_after_first);
    }

    #[test]
    fn rooted_env_chain_survives_collection() {
        let mut interner = Interner::new();
        let mut heap = Heap::new(GcConfig::default());
        let global = heap.alloc_env(None, true);
        let child = heap.alloc_env(Some(global), false);

        let name = interner.intern("x");
        let value = Value::Number(42.0);
        heap.define(child, name, value, BindingKind::Let);

        heap.set_current_env(child);
        heap.collect();

        assert_eq!(heap.lookup(child, name).is_some(), true);
        if let Some(Value::Number(n)) = heap.lookup(child, name) {
            assert_eq!(n, 42.0);
        } else {
            panic!("binding did not survive collection");
        }
    }

    #[test]
    fn unrooted_string_is_collected() {
        let mut heap = Heap::new(GcConfig::default());
        let global = heap.alloc_env(None, true);
        heap.set_current_env(global);
        heap.alloc_string("dangling");
        heap.collect();
        assert_eq!(heap.stats().objects_freed, 1);
    }

    #[test]
    fn const_binding_rejects_reassignment() {
        let mut interner = Interner::new();
        let mut heap = Heap::new(GcConfig::default());
        let global = heap.alloc_env(None, true);
        let name = interner.intern("x");
        heap.define(global, name, Value::Number(1.0), BindingKind::Const);
        let result = heap.assign(global, name, Value::Number(2.0));
        assert_eq!(result, Err(AssignError::Const));
    }

    #[test]
    fn var_hoists_to_enclosing_function_boundary() {
        let mut interner = Interner::new();
        let mut heap = Heap::new(GcConfig::default());
        let function_scope = heap.alloc_env(None, true);
        let block_scope = heap.alloc_env(Some(function_scope), false);

        let name = interner.intern("hoisted");
        heap.define(block_scope, name, Value::Number(7.0), BindingKind::Var);

        // bound in the function scope, not the block scope's own frame
        assert!(heap.env(function_scope).unwrap().bindings.contains_key(&name));
        assert!(!heap.env(block_scope).unwrap().bindings.contains_key(&name));
    }
}
