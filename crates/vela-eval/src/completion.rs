//! Non-local control flow.
//!
//! The AST's `Break`/`Continue` statements carry no label (the grammar
//! has no label syntax), so unlike the fuller `Break(Option<Symbol>)`
//! shape a labeled-break design would need, these are bare signals —
//! the nearest enclosing loop always catches them.

use vela_gc::Value;

#[derive(Debug, Clone)]
pub enum Completion {
    Normal(Value),
    Return(Value),
    Break,
    Continue,
}

impl Completion {
    /// Unwraps to the carried value for `Normal`/`Return`, or
    /// `Undefined` for `Break`/`Continue` (which carry none).
    pub fn into_value(self) -> Value {
        match self {
            Completion::Normal(v) | Completion::Return(v) => v,
            Completion::Break | Completion::Continue => Value::Undefined,
        }
    }

    pub fn is_normal(&self) -> bool {
        matches!(self, Completion::Normal(_))
    }
}
