//! Thin wrapper over a heap-owned `JSEnv`.
//!
//! All the actual storage and parent-chain walking lives in
//! `vela_gc::Heap` (see its "Environment bindings" section); this type
//! exists so evaluator code reads as operations on "the environment"
//! rather than threading a bare `EnvHandle` and remembering which
//! `Heap` method does what.

use vela_gc::{AssignError, BindingKind, EnvHandle, Heap, Value};
use vela_util::Symbol;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Environment(pub EnvHandle);

impl Environment {
    pub fn global(heap: &mut Heap) -> Self {
        Environment(heap.alloc_env(None, true))
    }

    pub fn child(self, heap: &mut Heap, is_function_boundary: bool) -> Self {
        Environment(heap.alloc_env(Some(self.0), is_function_boundary))
    }

    pub fn define(self, heap: &mut Heap, name: Symbol, value: Value, kind: BindingKind) {
        heap.define(self.0, name, value, kind);
    }

    pub fn get(self, heap: &Heap, name: Symbol) -> Option<Value> {
        heap.lookup(self.0, name)
    }

    pub fn set(self, heap: &mut Heap, name: Symbol, value: Value) -> Result<(), AssignError> {
        heap.assign(self.0, name, value)
    }

    pub fn handle(self) -> EnvHandle {
        self.0
    }
}
